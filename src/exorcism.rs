//! EXORCISM cube minimization for exclusive sums of products
//!
//! A local-search minimizer over one output's cube set. Cubes live in
//! buckets indexed by literal count; every insertion scans the buckets
//! within reshaping distance, firing duplicate cancellation and adjacent
//! merges immediately and recording distance-2 and distance-3 pairs as
//! reshape candidates.
//!
//! The reshape itself is the *exor-link*: a pair of cubes at distance `d`
//! is XOR-equivalent to `d` other cubes obtained by mixing, position by
//! differing position, the literals of the first cube, of the second cube
//! and of the unique third state. The fixed group tables below enumerate
//! the useful mixes. A reshape is kept only when one of its cubes is
//! absorbed by the existing set (positive gain); otherwise the pair queues
//! are rolled back to their bookmarked lengths and the pair is restored.
//!
//! One iteration of the outer loop runs the distance-2 and distance-3
//! drivers interleaved a fixed number of times; minimization stops after
//! three consecutive iterations without gain.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, trace};

use crate::cube::Cube;
use crate::two_level::TwoLevel;

/// Maximum pair distance considered for reshaping.
const MAX_DIST: u32 = 3;

/// How many times the 2/3 driver pair runs per outer iteration.
const N_PASSES: usize = 6;

/// Literal selectors for distance-2 exor-links: two groups of two cubes,
/// two positions each. 0 keeps the first cube's literal, 1 adopts the
/// second cube's, 2 adopts the remaining third state.
const CUBE_GROUPS2: [[u32; 4]; 2] = [[2, 0, 1, 2], [0, 2, 2, 1]];

/// Literal selectors for distance-3 exor-links: six groups of three cubes,
/// three positions each.
const CUBE_GROUPS3: [[u32; 9]; 6] = [
    [2, 0, 0, 1, 2, 0, 1, 1, 2],
    [2, 0, 0, 1, 0, 2, 1, 2, 1],
    [0, 2, 0, 2, 1, 0, 1, 1, 2],
    [0, 2, 0, 0, 1, 2, 2, 1, 1],
    [0, 0, 2, 2, 0, 1, 1, 2, 1],
    [0, 0, 2, 0, 2, 1, 2, 1, 1],
];

/// Generate the `dist` replacement cubes of an exor-link.
///
/// `group` holds `dist * dist` selector values; selector `k * dist + j`
/// decides position `j` (in increasing bit order of the difference bitmap)
/// of replacement cube `k`.
fn exorlink(c0: Cube, c1: Cube, dist: u32, group: &[u32]) -> [Cube; 3] {
    debug_assert!(dist >= 2 && dist <= MAX_DIST);
    debug_assert_eq!(group.len(), (dist * dist) as usize);
    let diff = c0.difference(c1);
    let (c0, c1) = if c0.value() <= c1.value() {
        (c0, c1)
    } else {
        (c1, c0)
    };
    // Third-state words: where neither polarity bit is set and the masks
    // disagree.
    let other_polarity = !c0.polarity & !c1.polarity;
    let other_mask = c0.mask ^ c1.mask;

    let mut out = [Cube::ZERO; 3];
    let mut selector = group.iter();
    for slot in out.iter_mut().take(dist as usize) {
        let mut polarity = c0.polarity;
        let mut mask = c0.mask;
        let mut positions = diff;
        for _ in 0..dist {
            let bit = positions & positions.wrapping_neg();
            positions &= positions - 1;
            match selector.next() {
                Some(0) => {} // keep c0's literal
                Some(1) => {
                    polarity = (polarity & !bit) | (c1.polarity & bit);
                    mask = (mask & !bit) | (c1.mask & bit);
                }
                Some(2) => {
                    polarity = (polarity & !bit) | (other_polarity & bit);
                    mask = (mask & !bit) | (other_mask & bit);
                }
                _ => unreachable!(),
            }
        }
        *slot = Cube { polarity, mask };
    }
    out
}

/// Minimize every output of a two-level form with EXORCISM.
///
/// Cube counts never grow; the represented functions are unchanged.
///
/// # Examples
///
/// ```
/// use esop_logic::{exorcise, Kind, TwoLevel};
///
/// let mut esop = TwoLevel::new(Kind::Esop, 2, 1);
/// // 1 ⊕ x0x1 ⊕ !x0!x1  ==  x0 ⊕ x1
/// esop.add_pla_cube("--", "1");
/// esop.add_pla_cube("11", "1");
/// esop.add_pla_cube("00", "1");
///
/// let minimized = exorcise(&esop);
/// assert_eq!(minimized.output(0).len(), 2);
/// ```
pub fn exorcise(original: &TwoLevel) -> TwoLevel {
    debug!(
        outputs = original.n_outputs(),
        cubes = original.total_cubes(),
        "exorcism"
    );
    let outputs = original
        .outputs()
        .iter()
        .map(|cubes| Exorcism::new(cubes, original.n_inputs()).run())
        .collect();
    TwoLevel::from_parts(original.kind(), original.n_inputs(), outputs)
}

/// Exor-link minimizer state for a single output.
pub struct Exorcism {
    /// `buckets[k]` holds the cubes with exactly `k` literals.
    buckets: Vec<HashSet<Cube>>,
    n_vars: u32,
    /// Candidate pairs at distance 2 (`pairs[0]`) and 3 (`pairs[1]`).
    pairs: [VecDeque<(Cube, Cube)>; 2],
    /// Pairs discovered by the insertion scan in flight.
    pairs_tmp: [Vec<(Cube, Cube)>; 2],
    /// Single-slot checkpoint of the pair-queue lengths.
    bookmark: [usize; 2],
}

impl Exorcism {
    /// Load an initial cube list. Duplicate and adjacent cubes already
    /// simplify during the load.
    pub fn new(original: &[Cube], n_vars: u32) -> Exorcism {
        assert!(n_vars <= 32, "cannot handle more than 32 variables");
        let mut exorcism = Exorcism {
            buckets: vec![HashSet::new(); n_vars as usize + 1],
            n_vars,
            pairs: [VecDeque::new(), VecDeque::new()],
            pairs_tmp: [Vec::new(), Vec::new()],
            bookmark: [0, 0],
        };
        for &cube in original {
            exorcism.add_cube(cube, true);
        }
        exorcism
    }

    /// Total cube count across the buckets.
    pub fn n_cubes(&self) -> usize {
        self.buckets.iter().map(HashSet::len).sum()
    }

    /// Run the reshape schedule to quiescence and flatten the buckets.
    pub fn run(mut self) -> Vec<Cube> {
        let mut without_improv = 0;
        let mut iteration = 0;
        while without_improv <= 2 {
            let mut gain = 0i64;
            for _ in 0..N_PASSES {
                gain += self.exorlink2();
                gain += self.exorlink3();
            }
            debug!(iteration, gain, cubes = self.n_cubes(), "exorcism iteration");
            if gain > 0 {
                without_improv = 0;
            } else {
                without_improv += 1;
            }
            iteration += 1;
        }
        let mut result: Vec<Cube> = self
            .buckets
            .iter_mut()
            .flat_map(|bucket| bucket.drain())
            .collect();
        result.sort_unstable();
        result
    }

    fn pairs_bookmark(&mut self) {
        self.bookmark[0] = self.pairs[0].len();
        self.bookmark[1] = self.pairs[1].len();
    }

    fn pairs_rollback(&mut self) {
        self.pairs[0].truncate(self.bookmark[0]);
        self.pairs[1].truncate(self.bookmark[1]);
    }

    /// Insert a cube, simplifying against the nearby buckets.
    ///
    /// Returns a positive gain when `cube` was absorbed: 2 when it
    /// cancelled an equal cube, the recursive gain plus one when it merged
    /// with an adjacent one. Returns 0 when the cube survives; it is then
    /// stored only if `commit` is set, and the candidate pairs discovered
    /// by the scan are appended to the global queues either way.
    fn add_cube(&mut self, cube: Cube, commit: bool) -> i64 {
        self.pairs_tmp[0].clear();
        self.pairs_tmp[1].clear();

        let n_lits = cube.n_lits();
        let lo = n_lits.saturating_sub(MAX_DIST) as usize;
        let hi = self.n_vars.min(n_lits + MAX_DIST) as usize;
        for bucket in lo..=hi {
            let mut hit = None;
            for &other in &self.buckets[bucket] {
                let dist = cube.distance(other);
                if dist <= 1 {
                    hit = Some((other, dist));
                    break;
                }
                if dist <= MAX_DIST {
                    self.pairs_tmp[(dist - 2) as usize].push((cube, other));
                }
            }
            if let Some((other, dist)) = hit {
                self.buckets[bucket].remove(&other);
                if dist == 1 {
                    return self.add_cube(cube.merge(other), true) + 1;
                }
                // Equal pair cancelled outright.
                return 2;
            }
        }
        if commit {
            self.buckets[n_lits as usize].insert(cube);
        }
        for d in 0..self.pairs_tmp.len() {
            let found = std::mem::take(&mut self.pairs_tmp[d]);
            self.pairs[d].extend(found);
        }
        0
    }

    /// Process every queued distance-2 pair once. Returns the cube-count
    /// gain.
    fn exorlink2(&mut self) -> i64 {
        let old_size = self.n_cubes();
        let n_pairs = self.pairs[0].len();
        let mut n_attempts = 0u32;
        let mut n_reshapes = 0u32;
        for _ in 0..n_pairs {
            let (cube0, cube1) = match self.pairs[0].pop_front() {
                Some(pair) => pair,
                None => break,
            };
            let size0 = cube0.n_lits() as usize;
            let size1 = cube1.n_lits() as usize;
            // Stale entries: one of the cubes has been reshaped away.
            if !self.buckets[size0].contains(&cube0) || !self.buckets[size1].contains(&cube1) {
                continue;
            }
            self.buckets[size0].remove(&cube0);
            self.buckets[size1].remove(&cube1);

            self.pairs_bookmark();
            n_attempts += 1;
            let mut reshaped = false;
            for group in CUBE_GROUPS2.iter() {
                let n = exorlink(cube0, cube1, 2, group);
                if self.add_cube(n[0], false) > 0 {
                    self.add_cube(n[1], true);
                    reshaped = true;
                    break;
                }
                if self.add_cube(n[1], false) > 0 {
                    self.add_cube(n[0], true);
                    reshaped = true;
                    break;
                }
                self.pairs_rollback();
            }
            if reshaped {
                n_reshapes += 1;
            } else {
                self.buckets[size0].insert(cube0);
                self.buckets[size1].insert(cube1);
                self.pairs[0].push_back((cube0, cube1));
            }
        }
        let curr_size = self.n_cubes();
        trace!(
            queue = n_pairs,
            attempts = n_attempts,
            reshapes = n_reshapes,
            cubes = curr_size,
            "exorlink-2 pass"
        );
        old_size as i64 - curr_size as i64
    }

    /// Process every queued distance-3 pair once. Returns the cube-count
    /// gain.
    fn exorlink3(&mut self) -> i64 {
        let old_size = self.n_cubes();
        let n_pairs = self.pairs[1].len();
        let mut n_attempts = 0u32;
        let mut n_reshapes = 0u32;
        for _ in 0..n_pairs {
            let (cube0, cube1) = match self.pairs[1].pop_front() {
                Some(pair) => pair,
                None => break,
            };
            let size0 = cube0.n_lits() as usize;
            let size1 = cube1.n_lits() as usize;
            if !self.buckets[size0].contains(&cube0) || !self.buckets[size1].contains(&cube1) {
                continue;
            }
            self.buckets[size0].remove(&cube0);
            self.buckets[size1].remove(&cube1);

            self.pairs_bookmark();
            n_attempts += 1;
            let mut reshaped = false;
            'groups: for group in CUBE_GROUPS3.iter() {
                let n = exorlink(cube0, cube1, 3, group);
                // Each candidate gets a turn as the speculative first.
                for first in 0..3 {
                    if self.add_cube(n[first], false) > 0 {
                        for other in 0..3 {
                            if other != first {
                                self.add_cube(n[other], true);
                            }
                        }
                        reshaped = true;
                        break 'groups;
                    }
                    self.pairs_rollback();
                }
            }
            if reshaped {
                n_reshapes += 1;
            } else {
                self.buckets[size0].insert(cube0);
                self.buckets[size1].insert(cube1);
                self.pairs[1].push_back((cube0, cube1));
            }
        }
        let curr_size = self.n_cubes();
        trace!(
            queue = n_pairs,
            attempts = n_attempts,
            reshapes = n_reshapes,
            cubes = curr_size,
            "exorlink-3 pass"
        );
        old_size as i64 - curr_size as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::esop::eval_esop;

    #[test]
    fn exorlink2_candidates_preserve_the_xor() {
        let c0 = Cube::literal(0, true) & Cube::literal(1, false);
        let c1 = Cube::literal(0, false) & Cube::literal(1, true);
        assert_eq!(c0.distance(c1), 2);
        for group in CUBE_GROUPS2.iter() {
            let n = exorlink(c0, c1, 2, group);
            for assignment in 0..4u32 {
                let original = c0.eval(assignment) ^ c1.eval(assignment);
                let reshaped = n[0].eval(assignment) ^ n[1].eval(assignment);
                assert_eq!(original, reshaped, "group {:?}", group);
            }
        }
    }

    #[test]
    fn exorlink3_candidates_preserve_the_xor() {
        let c0 = Cube::literal(0, true) & Cube::literal(1, true) & Cube::literal(2, true);
        let c1 = Cube::literal(0, false) & Cube::literal(1, false) & Cube::literal(2, false);
        assert_eq!(c0.distance(c1), 3);
        for group in CUBE_GROUPS3.iter() {
            let n = exorlink(c0, c1, 3, group);
            for assignment in 0..8u32 {
                let original = c0.eval(assignment) ^ c1.eval(assignment);
                let reshaped =
                    n[0].eval(assignment) ^ n[1].eval(assignment) ^ n[2].eval(assignment);
                assert_eq!(original, reshaped, "group {:?}", group);
            }
        }
    }

    #[test]
    fn duplicates_cancel_during_load() {
        let cube = Cube::literal(0, true) & Cube::literal(2, false);
        let exorcism = Exorcism::new(&[cube, cube], 3);
        assert_eq!(exorcism.n_cubes(), 0);
    }

    #[test]
    fn adjacent_cubes_merge_during_load() {
        let a = Cube::literal(0, true) & Cube::literal(1, true);
        let b = Cube::literal(0, true) & Cube::literal(1, false);
        let result = Exorcism::new(&[a, b], 2).run();
        assert_eq!(result, vec![Cube::literal(0, true)]);
    }

    #[test]
    fn three_cube_xor_form_reduces_to_two() {
        // 1 ⊕ x0x1 ⊕ !x0!x1  ==  x0 ⊕ x1
        let cubes = [
            Cube::ONE,
            Cube::literal(0, true) & Cube::literal(1, true),
            Cube::literal(0, false) & Cube::literal(1, false),
        ];
        let result = Exorcism::new(&cubes, 2).run();
        assert_eq!(result.len(), 2);
        for assignment in 0..4u32 {
            let expected = (assignment & 1) ^ (assignment >> 1 & 1) == 1;
            assert_eq!(eval_esop(&result, assignment), expected);
        }
    }

    #[test]
    fn parity_stays_at_four_cubes() {
        let cubes: Vec<Cube> = (0..4).map(|i| Cube::literal(i, true)).collect();
        let result = Exorcism::new(&cubes, 4).run();
        assert_eq!(result.len(), 4);
        for assignment in 0..16u32 {
            assert_eq!(
                eval_esop(&result, assignment),
                assignment.count_ones() % 2 == 1
            );
        }
    }
}
