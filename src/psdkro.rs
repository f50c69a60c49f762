//! Pseudo-Kronecker (PSDKRO) ESOP extraction from a BDD
//!
//! At every BDD node one of three expansions applies, written here for a
//! node over variable `x` with cofactors `f0`, `f1` and `f2 = f0 ⊕ f1`:
//!
//! - positive Davio: `f = f0 ⊕ x·f2`
//! - negative Davio: `f = f1 ⊕ ¬x·f2`
//! - Shannon:        `f = ¬x·f0 ⊕ x·f1`
//!
//! A first pass computes, bottom-up and memoised per BDD node, the cube
//! count of the cheapest expansion and which one it is. A second pass
//! replays the chosen expansions, carrying a tri-state assignment for every
//! variable, and materializes one cube per path that reaches the constant
//! one. The extractor does not care how the BDD's variables are ordered.

use std::collections::HashMap;

use tracing::debug;

use crate::bdd::{BddManager, NodeId, BDD_FALSE, BDD_TRUE};
use crate::cube::Cube;
use crate::error::CapacityError;
use crate::esop::EsopSet;
use crate::two_level::{Kind, TwoLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VarValue {
    Positive,
    Negative,
    Unused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expansion {
    PositiveDavio,
    NegativeDavio,
    Shannon,
}

/// Extract an ESOP for every BDD root, producing a [`TwoLevel`].
///
/// Fails with [`CapacityError`] when the manager references more than 32
/// variables.
pub fn bdd_extract(
    mgr: &mut BddManager,
    roots: &[NodeId],
    n_inputs: u32,
) -> Result<TwoLevel, CapacityError> {
    if n_inputs > 32 {
        return Err(CapacityError { n_inputs });
    }
    debug!(outputs = roots.len(), n_inputs, "collapsing using BDD");
    let mut extractor = Psdkro::new(mgr, n_inputs);
    let outputs = roots
        .iter()
        .map(|&root| extractor.extract(root))
        .collect();
    Ok(TwoLevel::from_parts(Kind::Esop, n_inputs, outputs))
}

/// Dynamic-programming extraction of a Pseudo-Kronecker expansion.
///
/// Borrows the BDD manager for its whole lifetime; the function nodes must
/// stay alive until [`extract`] returns.
///
/// [`extract`]: Psdkro::extract
pub struct Psdkro<'m> {
    mgr: &'m mut BddManager,
    var_values: Vec<VarValue>,
    /// Chosen expansion and resulting cube count, memoised per BDD node.
    costs: HashMap<NodeId, (Expansion, u32)>,
    esop: EsopSet,
}

impl<'m> Psdkro<'m> {
    pub fn new(mgr: &'m mut BddManager, n_vars: u32) -> Psdkro<'m> {
        Psdkro {
            mgr,
            var_values: vec![VarValue::Unused; n_vars as usize],
            costs: HashMap::new(),
            esop: EsopSet::new(n_vars),
        }
    }

    /// Extract the ESOP of one BDD function as a sorted cube list.
    pub fn extract(&mut self, f: NodeId) -> Vec<Cube> {
        self.costs.clear();
        self.esop.clear();
        self.var_values.fill(VarValue::Unused);
        self.count_cubes(f);
        self.emit(f, 0);
        self.esop.drain_sorted()
    }

    /// Count pass: cheapest expansion per node, memoised by node identity.
    fn count_cubes(&mut self, f: NodeId) -> u32 {
        if f == BDD_FALSE {
            return 0;
        }
        if f == BDD_TRUE {
            return 1;
        }
        if let Some(&(_, n)) = self.costs.get(&f) {
            return n;
        }

        let f0 = self.mgr.cofactor_neg(f);
        let f1 = self.mgr.cofactor_pos(f);
        let f2 = self.mgr.xor(f0, f1);

        let n0 = self.count_cubes(f0);
        let n1 = self.count_cubes(f1);
        let n2 = self.count_cubes(f2);

        // Discard the most expensive branch; ties break 0, then 1, then 2.
        let n_max = n0.max(n1).max(n2);
        let chosen = if n_max == n0 {
            (Expansion::NegativeDavio, n1 + n2)
        } else if n_max == n1 {
            (Expansion::PositiveDavio, n0 + n2)
        } else {
            (Expansion::Shannon, n0 + n1)
        };
        self.costs.insert(f, chosen);
        chosen.1
    }

    /// Emit pass: replay the memoised expansions. `n_set` is how many
    /// leading entries of the assignment vector are currently decided.
    fn emit(&mut self, f: NodeId, n_set: usize) {
        if f == BDD_FALSE {
            return;
        }
        if f == BDD_TRUE {
            let mut cube = Cube::ONE;
            for (i, &value) in self.var_values[..n_set].iter().enumerate() {
                match value {
                    VarValue::Positive => cube.add_lit(i as u32, true),
                    VarValue::Negative => cube.add_lit(i as u32, false),
                    VarValue::Unused => {}
                }
            }
            self.esop.add_cube(cube);
            return;
        }

        let expansion = self.costs[&f].0;
        let idx = self.mgr.var_index(f) as usize;
        // Variables skipped between the parent and this node are free.
        for value in &mut self.var_values[n_set..idx] {
            *value = VarValue::Unused;
        }

        let f0 = self.mgr.cofactor_neg(f);
        let f1 = self.mgr.cofactor_pos(f);
        let f2 = self.mgr.xor(f0, f1);

        match expansion {
            Expansion::PositiveDavio => {
                self.var_values[idx] = VarValue::Unused;
                self.emit(f0, idx + 1);
                self.var_values[idx] = VarValue::Positive;
                self.emit(f2, idx + 1);
            }
            Expansion::NegativeDavio => {
                self.var_values[idx] = VarValue::Unused;
                self.emit(f1, idx + 1);
                self.var_values[idx] = VarValue::Negative;
                self.emit(f2, idx + 1);
            }
            Expansion::Shannon => {
                self.var_values[idx] = VarValue::Negative;
                self.emit(f0, idx + 1);
                self.var_values[idx] = VarValue::Positive;
                self.emit(f1, idx + 1);
            }
        }
    }
}
