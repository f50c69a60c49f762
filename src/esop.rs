//! Self-minimizing cube sets representing an exclusive sum of products
//!
//! An [`EsopSet`] holds cubes whose XOR is the represented function. All
//! insertions go through [`EsopSet::add_cube`], which exhaustively applies
//! the algebraic identities of XOR, cancellation (`c ⊕ c = 0`) and adjacency
//! merging (two cubes at distance 1 combine into one), so the set always
//! stays in canonical form: no cube appears twice and no two cubes are at
//! distance 1. Both the AIG collapser and the PSDKRO extractor build
//! their results exclusively through this routine.

use std::collections::HashSet;

use crate::cube::Cube;

/// A hashed set of cubes representing the XOR of its elements.
///
/// # Examples
///
/// ```
/// use esop_logic::{Cube, EsopSet};
///
/// let mut set = EsopSet::new(2);
/// let x0x1 = Cube::literal(0, true) & Cube::literal(1, true);
/// set.add_cube(x0x1);
/// // x0*x1 ⊕ x0*x1 cancels out.
/// set.add_cube(x0x1);
/// assert!(set.is_empty());
///
/// // x0*x1 ⊕ x0*!x1 merges into the single cube x0.
/// set.add_cube(x0x1);
/// set.add_cube(Cube::literal(0, true) & Cube::literal(1, false));
/// assert_eq!(set.drain_sorted(), vec![Cube::literal(0, true)]);
/// ```
#[derive(Debug, Clone)]
pub struct EsopSet {
    n_vars: u32,
    cubes: HashSet<Cube>,
}

impl EsopSet {
    /// Create an empty set over `n_vars` variables.
    pub fn new(n_vars: u32) -> EsopSet {
        assert!(n_vars <= 32, "cannot handle more than 32 variables");
        EsopSet {
            n_vars,
            cubes: HashSet::new(),
        }
    }

    /// Number of cubes currently held.
    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    /// Whether the set represents the zero function.
    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    /// Drop all cubes, keeping the allocation.
    pub fn clear(&mut self) {
        self.cubes.clear();
    }

    /// Whether `cube` is currently a member.
    pub fn contains(&self, cube: &Cube) -> bool {
        self.cubes.contains(cube)
    }

    /// XOR a cube into the set, restoring canonical form.
    ///
    /// The routine loops until a fixpoint:
    ///
    /// 1. if the cube is already present, the pair cancels and both vanish;
    /// 2. the constant-one cube is inserted as-is (no neighbour can merge
    ///    with it through the rotation probe);
    /// 3. otherwise each variable position is probed with one and two
    ///    rotations; a hit at distance 1 merges the two cubes and the loop
    ///    restarts with the shorter replacement.
    ///
    /// Every merge removes one member from the set, so the loop terminates.
    pub fn add_cube(&mut self, cube: Cube) {
        let mut cube = cube;
        loop {
            if self.cubes.remove(&cube) {
                return;
            }
            if cube == Cube::ONE {
                self.cubes.insert(cube);
                return;
            }
            let mut neighbour = None;
            'probe: for var in 0..self.n_vars {
                let mut probe = cube.rotate(var);
                for _ in 0..2 {
                    if self.cubes.contains(&probe) {
                        neighbour = Some(probe);
                        break 'probe;
                    }
                    probe = probe.rotate(var);
                }
            }
            match neighbour {
                Some(hit) => {
                    self.cubes.remove(&hit);
                    cube = cube.merge(hit);
                }
                None => {
                    self.cubes.insert(cube);
                    return;
                }
            }
        }
    }

    /// Iterate over the member cubes in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Cube> {
        self.cubes.iter()
    }

    /// Empty the set into a vector sorted by the packed 64-bit cube word.
    ///
    /// Sorting makes downstream output reproducible (the hash order is
    /// randomized per process) and places [`Cube::ONE`] first whenever it is
    /// a member, which the collapser's complement rule relies on.
    pub fn drain_sorted(&mut self) -> Vec<Cube> {
        let mut cubes: Vec<Cube> = self.cubes.drain().collect();
        cubes.sort_unstable();
        cubes
    }
}

/// Evaluate a cube list as an XOR under the given assignment bitmap.
///
/// Bit *i* of `assignment` is the value of variable *i*. Useful for
/// exhaustive equivalence checks on small functions.
pub fn eval_esop(cubes: &[Cube], assignment: u32) -> bool {
    cubes
        .iter()
        .fold(false, |acc, cube| acc ^ cube.eval(assignment))
}
