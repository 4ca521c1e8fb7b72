//! Variable numbering for SAT encodings

use crate::error::Result;

/// A bijection between propositions and positive SAT variable IDs.
///
/// `decode(encode(key)) == key` must hold for every key in range, and no two
/// keys may share an ID within one instance.
pub trait VariableEncoding {
    /// The proposition a variable stands for
    type Key;

    /// Map a proposition to its variable ID (>= 1)
    fn encode(&self, key: &Self::Key) -> Result<i32>;

    /// Map a variable ID back to its proposition
    fn decode(&self, variable: i32) -> Result<Self::Key>;

    /// Number of IDs the encoding can produce (IDs are `1..=variable_count`)
    fn variable_count(&self) -> usize;

    /// Decode the true literals of a model, skipping IDs outside this encoding.
    ///
    /// Only positive literals are read; list order is irrelevant.
    fn true_propositions(&self, model: &[i32]) -> Vec<Self::Key> {
        model
            .iter()
            .filter(|&&lit| lit > 0 && (lit as usize) <= self.variable_count())
            .filter_map(|&lit| self.decode(lit).ok())
            .collect()
    }
}
