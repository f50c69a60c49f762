//! Collapsing an AIG into one ESOP per primary output
//!
//! The collapser walks the AND nodes in topological order, keeping an ESOP
//! cube list for every object it has passed. A primary input is the single
//! positive-literal cube of its variable; an AND node is the pairwise AND of
//! its two (possibly complemented) fanin lists, routed through the
//! canonicalizing [`EsopSet`] insertion so XOR cancellation and adjacency
//! merging happen as the product is built.
//!
//! Complementing a fanin list uses `¬f = 1 ⊕ f`: prepend the constant-one
//! cube, except when the first element already is the constant one (the two
//! cancel) or is a single literal (which just inverts). Only the first
//! element is inspected; cube lists keep the constant one in front, so this
//! is sufficient.
//!
//! No bound is placed on intermediate cube counts. Some inputs blow up;
//! they are allowed to.

use tracing::{debug, trace};

use crate::aig::{lit_compl, lit_object, Aig};
use crate::cube::Cube;
use crate::error::CapacityError;
use crate::esop::EsopSet;
use crate::two_level::{Kind, TwoLevel};

/// Collapse an AIG into a [`TwoLevel`] ESOP, one cube list per output.
///
/// Fails with [`CapacityError`] before doing any work when the AIG has more
/// than 32 primary inputs.
///
/// # Examples
///
/// ```
/// use esop_logic::{aig_extract, Aig};
///
/// let mut aig = Aig::new(2);
/// let x0 = aig.input(0);
/// let x1 = aig.input(1);
/// let f = aig.and(x0, x1);
/// aig.add_output(f);
///
/// let esop = aig_extract(&aig).unwrap();
/// assert_eq!(esop.output(0).len(), 1);
/// assert_eq!(esop.output(0)[0].to_pla(2), "11");
/// ```
pub fn aig_extract(aig: &Aig) -> Result<TwoLevel, CapacityError> {
    if aig.n_inputs() > 32 {
        return Err(CapacityError {
            n_inputs: aig.n_inputs(),
        });
    }
    debug!(
        inputs = aig.n_inputs(),
        ands = aig.n_ands(),
        "collapsing using AIG"
    );
    Ok(AigCollapser::new(aig).run())
}

/// Node-by-node ESOP synthesis over an AIG.
///
/// Owns one cube list per AIG object for the duration of a [`run`] call and
/// releases everything as the returned [`TwoLevel`].
///
/// [`run`]: AigCollapser::run
pub struct AigCollapser<'a> {
    aig: &'a Aig,
    /// One ESOP cube list per AIG object id.
    esops: Vec<Vec<Cube>>,
    /// Prepared fanin lists of the node in flight.
    fanin0: Vec<Cube>,
    fanin1: Vec<Cube>,
    /// Scratch set the pairwise products are inserted into.
    scratch: EsopSet,
}

impl<'a> AigCollapser<'a> {
    pub fn new(aig: &'a Aig) -> AigCollapser<'a> {
        AigCollapser {
            aig,
            esops: vec![Vec::new(); aig.n_objects()],
            fanin0: Vec::new(),
            fanin1: Vec::new(),
            scratch: EsopSet::new(aig.n_inputs()),
        }
    }

    /// Traverse the AIG and emit one ESOP per primary output.
    pub fn run(mut self) -> TwoLevel {
        // Elementary input ESOPs: object id i+1 is primary input i.
        for i in 0..self.aig.n_inputs() {
            self.esops[(i + 1) as usize] = vec![Cube::literal(i, true)];
        }

        for (object, f0, f1) in self.aig.and_objects() {
            Self::prepare_input(
                &self.esops[lit_object(f0) as usize],
                lit_compl(f0),
                &mut self.fanin0,
            );
            Self::prepare_input(
                &self.esops[lit_object(f1) as usize],
                lit_compl(f1),
                &mut self.fanin1,
            );
            self.compute_and(object as usize);
            trace!(
                node = object,
                fanin0 = self.fanin0.len(),
                fanin1 = self.fanin1.len(),
                cubes = self.esops[object as usize].len(),
                "collapsed AND node"
            );
        }

        let mut result = Vec::with_capacity(self.aig.n_outputs());
        for &lit in self.aig.outputs() {
            Self::prepare_input(
                &self.esops[lit_object(lit) as usize],
                lit_compl(lit),
                &mut self.fanin0,
            );
            result.push(self.fanin0.clone());
        }
        TwoLevel::from_parts(Kind::Esop, self.aig.n_inputs(), result)
    }

    /// Copy a fanin's cube list into `out`, complementing on the way when
    /// the edge is inverted.
    fn prepare_input(esop: &[Cube], compl: bool, out: &mut Vec<Cube>) {
        out.clear();
        let mut offset = 0;
        if compl {
            match esop.first() {
                // ¬0 = 1
                None => out.push(Cube::ONE),
                // 1 ⊕ 1 ⊕ rest = rest
                Some(&first) if first == Cube::ONE => offset = 1,
                // 1 ⊕ x ⊕ rest = ¬x ⊕ rest
                Some(&first) if first.n_lits() == 1 => {
                    out.push(first.invert());
                    offset = 1;
                }
                Some(_) => out.push(Cube::ONE),
            }
        }
        out.extend_from_slice(&esop[offset..]);
    }

    /// Pairwise AND of the prepared fanin lists into this object's ESOP.
    fn compute_and(&mut self, object: usize) {
        // One of the children is the zero function.
        if self.fanin0.is_empty() || self.fanin1.is_empty() {
            return;
        }
        for &cube0 in &self.fanin0 {
            if cube0 == Cube::ONE {
                for &cube1 in &self.fanin1 {
                    self.scratch.add_cube(cube1);
                }
                continue;
            }
            for &cube1 in &self.fanin1 {
                if cube1 == Cube::ONE {
                    self.scratch.add_cube(cube0);
                    continue;
                }
                let product = cube0 & cube1;
                if product != Cube::ZERO {
                    self.scratch.add_cube(product);
                }
            }
        }
        self.esops[object] = self.scratch.drain_sorted();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aig::lit_not;

    #[test]
    fn rejects_more_than_32_inputs() {
        let aig = Aig::new(33);
        assert!(matches!(
            aig_extract(&aig),
            Err(CapacityError { n_inputs: 33 })
        ));
    }

    #[test]
    fn and_of_two_inputs_is_one_cube() {
        let mut aig = Aig::new(2);
        let x0 = aig.input(0);
        let x1 = aig.input(1);
        let f = aig.and(x0, x1);
        aig.add_output(f);
        let esop = aig_extract(&aig).unwrap();
        assert_eq!(
            esop.output(0),
            vec![Cube::literal(0, true) & Cube::literal(1, true)]
        );
    }

    #[test]
    fn constant_outputs() {
        let mut aig = Aig::new(3);
        aig.add_output(crate::aig::LIT_TRUE);
        aig.add_output(crate::aig::LIT_FALSE);
        let esop = aig_extract(&aig).unwrap();
        assert_eq!(esop.output(0), vec![Cube::ONE]);
        assert!(esop.output(1).is_empty());
    }

    #[test]
    fn complemented_single_literal_fanin_inverts() {
        let mut aig = Aig::new(2);
        let x0 = aig.input(0);
        let x1 = aig.input(1);
        let f = aig.and(lit_not(x0), x1);
        aig.add_output(f);
        let esop = aig_extract(&aig).unwrap();
        assert_eq!(
            esop.output(0),
            vec![Cube::literal(0, false) & Cube::literal(1, true)]
        );
    }

    #[test]
    fn two_variable_xor_collapses_to_two_cubes() {
        let mut aig = Aig::new(2);
        let x0 = aig.input(0);
        let x1 = aig.input(1);
        let f = aig.xor(x0, x1);
        aig.add_output(f);
        let esop = aig_extract(&aig).unwrap();
        assert_eq!(esop.output(0).len(), 2);
        for assignment in 0..4u32 {
            let expected = (assignment & 1) ^ (assignment >> 1 & 1) == 1;
            assert_eq!(esop.eval_output(0, assignment), expected);
        }
    }
}
