//! In-memory And-Inverter Graphs
//!
//! An AIG is a DAG whose internal nodes are two-input ANDs and whose edges
//! carry optional complement bits. Edges are encoded as literals in the
//! AIGER style: `lit = 2 * object + complement`, where object 0 is the
//! constant false, objects `1..=n_inputs` are the primary inputs and AND
//! objects follow in topological order.
//!
//! [`Aig`] is a builder as much as a container: `and`/`or`/`xor` perform
//! two-level structural hashing with constant folding, so re-synthesising a
//! function produces a compact graph without a separate cleanup pass.

use std::collections::HashMap;

/// An edge literal: object id shifted left once, low bit = complement.
pub type Lit = u32;

/// The constant-false literal.
pub const LIT_FALSE: Lit = 0;

/// The constant-true literal.
pub const LIT_TRUE: Lit = 1;

/// Complement a literal.
pub fn lit_not(lit: Lit) -> Lit {
    lit ^ 1
}

/// The object id a literal points at.
pub fn lit_object(lit: Lit) -> u32 {
    lit >> 1
}

/// Whether a literal is complemented.
pub fn lit_compl(lit: Lit) -> bool {
    lit & 1 == 1
}

/// A combinational And-Inverter Graph with structural hashing.
///
/// # Examples
///
/// ```
/// use esop_logic::Aig;
///
/// let mut aig = Aig::new(2);
/// let x0 = aig.input(0);
/// let x1 = aig.input(1);
/// let f = aig.xor(x0, x1);
/// aig.add_output(f);
///
/// assert_eq!(aig.eval(0b00), vec![false]);
/// assert_eq!(aig.eval(0b01), vec![true]);
/// assert_eq!(aig.eval(0b11), vec![false]);
/// ```
#[derive(Debug, Clone)]
pub struct Aig {
    n_inputs: u32,
    /// Fanin literal pairs of the AND objects, in topological order.
    ands: Vec<(Lit, Lit)>,
    outputs: Vec<Lit>,
    strash: HashMap<(Lit, Lit), Lit>,
}

impl Aig {
    /// Create a graph with `n_inputs` primary inputs and no nodes.
    pub fn new(n_inputs: u32) -> Aig {
        Aig {
            n_inputs,
            ands: Vec::new(),
            outputs: Vec::new(),
            strash: HashMap::new(),
        }
    }

    pub fn n_inputs(&self) -> u32 {
        self.n_inputs
    }

    pub fn n_ands(&self) -> usize {
        self.ands.len()
    }

    pub fn n_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Total object count: constant, inputs and AND nodes.
    pub fn n_objects(&self) -> usize {
        1 + self.n_inputs as usize + self.ands.len()
    }

    /// The positive literal of primary input `index`.
    pub fn input(&self, index: u32) -> Lit {
        assert!(index < self.n_inputs, "input index {} out of range", index);
        2 * (index + 1)
    }

    /// The AND of two literals, folded and structurally hashed.
    pub fn and(&mut self, a: Lit, b: Lit) -> Lit {
        if a == LIT_FALSE || b == LIT_FALSE || a == lit_not(b) {
            return LIT_FALSE;
        }
        if a == LIT_TRUE || a == b {
            return b;
        }
        if b == LIT_TRUE {
            return a;
        }
        let key = if a <= b { (a, b) } else { (b, a) };
        if let Some(&lit) = self.strash.get(&key) {
            return lit;
        }
        let object = 1 + self.n_inputs + self.ands.len() as u32;
        self.ands.push(key);
        let lit = 2 * object;
        self.strash.insert(key, lit);
        lit
    }

    /// The OR of two literals, via De Morgan.
    pub fn or(&mut self, a: Lit, b: Lit) -> Lit {
        let nand = self.and(lit_not(a), lit_not(b));
        lit_not(nand)
    }

    /// The XOR of two literals, built from three ANDs.
    pub fn xor(&mut self, a: Lit, b: Lit) -> Lit {
        let left = self.and(a, lit_not(b));
        let right = self.and(lit_not(a), b);
        self.or(left, right)
    }

    /// Register a primary output.
    pub fn add_output(&mut self, lit: Lit) {
        self.outputs.push(lit);
    }

    /// The primary-output literals, in registration order.
    pub fn outputs(&self) -> &[Lit] {
        &self.outputs
    }

    /// Iterate the AND objects in topological order as
    /// `(object id, fanin0, fanin1)`.
    pub fn and_objects(&self) -> impl Iterator<Item = (u32, Lit, Lit)> + '_ {
        let first = 1 + self.n_inputs;
        self.ands
            .iter()
            .enumerate()
            .map(move |(i, &(a, b))| (first + i as u32, a, b))
    }

    /// Evaluate every output under an input assignment bitmap.
    ///
    /// Bit *i* of `assignment` is the value of input *i*. Intended for
    /// exhaustive equivalence checks on small functions.
    pub fn eval(&self, assignment: u32) -> Vec<bool> {
        let mut values = Vec::with_capacity(self.n_objects());
        values.push(false);
        for i in 0..self.n_inputs {
            values.push((assignment >> i) & 1 == 1);
        }
        for &(a, b) in &self.ands {
            let va = values[lit_object(a) as usize] ^ lit_compl(a);
            let vb = values[lit_object(b) as usize] ^ lit_compl(b);
            values.push(va && vb);
        }
        self.outputs
            .iter()
            .map(|&lit| values[lit_object(lit) as usize] ^ lit_compl(lit))
            .collect()
    }
}
