//! Transformations between AIG, BDD and two-level representations

use tracing::debug;

use crate::aig::{lit_compl, lit_not, lit_object, Aig, Lit, LIT_FALSE, LIT_TRUE};
use crate::bdd::{BddManager, NodeId};
use crate::cube::Cube;
use crate::two_level::{Kind, TwoLevel};

/// Lift an AIG into the BDD manager by straight substitution of BDD
/// operations for AIG operations.
///
/// Returns one BDD root per primary output, in output order. The roots stay
/// valid for the manager's lifetime.
pub fn aig_to_bdd(aig: &Aig, mgr: &mut BddManager) -> Vec<NodeId> {
    debug!(
        inputs = aig.n_inputs(),
        ands = aig.n_ands(),
        "converting AIG to BDD"
    );
    let mut nodes = vec![crate::bdd::BDD_FALSE; aig.n_objects()];
    for i in 0..aig.n_inputs() {
        nodes[(i + 1) as usize] = mgr.var(i);
    }
    let cofactored = |mgr: &mut BddManager, nodes: &[NodeId], lit: Lit| {
        let node = nodes[lit_object(lit) as usize];
        if lit_compl(lit) {
            mgr.not(node)
        } else {
            node
        }
    };
    for (object, f0, f1) in aig.and_objects() {
        let b0 = cofactored(mgr, &nodes, f0);
        let b1 = cofactored(mgr, &nodes, f1);
        nodes[object as usize] = mgr.and(b0, b1);
    }
    aig.outputs()
        .iter()
        .map(|&lit| cofactored(mgr, &nodes, lit))
        .collect()
}

/// Re-synthesize a two-level form as an AIG.
///
/// Each cube becomes a chain of hashed ANDs over its literals; the cubes of
/// one output accumulate with XOR for an ESOP (and for an undefined kind)
/// or with OR for an SOP. An empty cube list yields the constant-false
/// output.
pub fn esop_to_aig(two_level: &TwoLevel) -> Aig {
    let mut aig = Aig::new(two_level.n_inputs());
    for cubes in two_level.outputs() {
        let mut root = LIT_FALSE;
        for &cube in cubes {
            let mut product = LIT_TRUE;
            if cube != Cube::ONE {
                for var in 0..two_level.n_inputs() {
                    if cube.mask() & (1 << var) != 0 {
                        let input = aig.input(var);
                        let literal = if cube.polarity() & (1 << var) != 0 {
                            input
                        } else {
                            lit_not(input)
                        };
                        product = aig.and(product, literal);
                    }
                }
            }
            root = match two_level.kind() {
                Kind::Sop => aig.or(root, product),
                Kind::Esop | Kind::Undef => aig.xor(root, product),
            };
        }
        aig.add_output(root);
    }
    aig
}
