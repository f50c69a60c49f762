//! # ESOP collapsing and minimization
//!
//! This crate turns combinational Boolean circuits into two-level
//! exclusive-sum-of-products (ESOP) form and minimizes the number of
//! product terms. It targets logic-synthesis research on small to medium
//! functions (at most 32 input variables, thousands of cubes) rather than
//! industrial-scale circuits.
//!
//! ## Pipeline
//!
//! ```text
//! AIG ──► aig_extract                       ──┐
//!                                             ├─► ESOP ──► exorcise ──► ESOP
//! AIG ──► aig_to_bdd ──► BDD ──► bdd_extract ──┘
//! ```
//!
//! Three engines share one primitive, the packed 32-variable [`Cube`], and
//! one invariant-preserving operation, [`EsopSet::add_cube`], which inserts
//! a cube into a set while exhaustively applying the algebraic identities
//! of XOR:
//!
//! - **[`aig_extract`]** collapses an [`Aig`] node by node, computing an
//!   ESOP for every AND gate by pairwise cube products.
//! - **[`bdd_extract`]** converts a BDD into a Pseudo-Kronecker expansion,
//!   picking at every node the cheapest of the positive Davio, negative
//!   Davio and Shannon decompositions.
//! - **[`exorcise`]** runs EXORCISM, a local search that reshapes pairs of
//!   cubes at distance 2 and 3 through XOR-preserving *exor-links* and
//!   greedily merges what it can.
//!
//! ## Collapsing an AIG
//!
//! ```
//! use esop_logic::{aig_extract, exorcise, Aig};
//!
//! # fn main() -> Result<(), esop_logic::CapacityError> {
//! // Majority of three inputs: x0*x1 + x1*x2 + x0*x2.
//! let mut aig = Aig::new(3);
//! let x0 = aig.input(0);
//! let x1 = aig.input(1);
//! let x2 = aig.input(2);
//! let a = aig.and(x0, x1);
//! let b = aig.and(x1, x2);
//! let c = aig.and(x0, x2);
//! let ab = aig.or(a, b);
//! let maj = aig.or(ab, c);
//! aig.add_output(maj);
//!
//! let esop = aig_extract(&aig)?;
//! let minimized = exorcise(&esop);
//! assert!(minimized.output(0).len() <= esop.output(0).len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Going through a BDD
//!
//! The Pseudo-Kronecker route often starts smaller than direct collapsing:
//!
//! ```
//! use esop_logic::{aig_to_bdd, bdd_extract, Aig, BddManager};
//!
//! # fn main() -> Result<(), esop_logic::CapacityError> {
//! let mut aig = Aig::new(2);
//! let x0 = aig.input(0);
//! let x1 = aig.input(1);
//! let f = aig.xor(x0, x1);
//! aig.add_output(f);
//!
//! let mut mgr = BddManager::new();
//! let roots = aig_to_bdd(&aig, &mut mgr);
//! let esop = bdd_extract(&mut mgr, &roots, aig.n_inputs())?;
//! assert_eq!(esop.output(0).len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## PLA files
//!
//! Two-level forms read from and write to the PLA format through the
//! [`PlaReader`] and [`PlaWriter`] traits:
//!
//! ```
//! use esop_logic::{exorcise, PlaReader, PlaWriter, TwoLevel};
//!
//! # fn main() -> Result<(), std::io::Error> {
//! let pla = ".i 2\n.o 1\n.type esop\n.p 3\n-- 1\n11 1\n00 1\n.e\n";
//! let esop = TwoLevel::from_pla_string(pla)?;
//! let minimized = exorcise(&esop);
//! print!("{}", minimized.to_pla_string(0)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Scope
//!
//! Functions with more than 32 inputs are rejected up front
//! ([`CapacityError`]). The minimizer is best-effort local search, not
//! provably optimal, and outputs are minimized independently (no
//! multi-output cube sharing). AIGER file parsing and equivalence checking
//! are left to external tools.

// Public modules
pub mod aig;
pub mod bdd;
pub mod collapse;
pub mod cube;
pub mod error;
pub mod esop;
pub mod exorcism;
pub mod pla;
pub mod psdkro;
pub mod two_level;
pub mod xforms;

// Re-export the public API
pub use aig::{Aig, Lit, LIT_FALSE, LIT_TRUE};
pub use bdd::{BddManager, NodeId, BDD_FALSE, BDD_TRUE};
pub use collapse::{aig_extract, AigCollapser};
pub use cube::Cube;
pub use error::{CapacityError, PlaError, PlaReadError, PlaWriteError};
pub use esop::{eval_esop, EsopSet};
pub use exorcism::{exorcise, Exorcism};
pub use pla::{PlaReader, PlaWriter};
pub use psdkro::{bdd_extract, Psdkro};
pub use two_level::{Kind, TwoLevel};
pub use xforms::{aig_to_bdd, esop_to_aig};
