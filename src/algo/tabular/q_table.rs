use crate::{
    error::{Error, Result},
    random::RandomSource,
};

/// A dense table of action-value estimates for discrete state and action spaces
///
/// Values are stored row-major, one row of `A` estimates per state, so a
/// `QTable` is addressed by a `(state, action)` pair of indices. The shape is
/// fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    values: Vec<f32>,
    num_states: usize,
    num_actions: usize,
}

impl QTable {
    /// Initialize an all-zero table with `num_states` rows and `num_actions` columns
    pub fn zeros(num_states: usize, num_actions: usize) -> Self {
        Self {
            values: vec![0.0; num_states * num_actions],
            num_states,
            num_actions,
        }
    }

    /// Number of state rows `S`
    pub fn num_states(&self) -> usize {
        self.num_states
    }

    /// Number of action columns `A`
    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    /// Get the value estimate for a state-action pair
    pub fn get(&self, state: usize, action: usize) -> f32 {
        self.values[state * self.num_actions + action]
    }

    /// Set the value estimate for a state-action pair
    pub fn set(&mut self, state: usize, action: usize, value: f32) {
        self.values[state * self.num_actions + action] = value;
    }

    /// Get a slice view of a state's value row
    pub fn row(&self, state: usize) -> &[f32] {
        let start = state * self.num_actions;
        &self.values[start..start + self.num_actions]
    }

    /// Largest value estimate in a state's row
    pub fn row_max(&self, state: usize) -> f32 {
        self.row(state)
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Index of the largest value in a state's row, breaking ties uniformly at random
    ///
    /// A plain argmax would always pick the lowest tied index, which biases a
    /// freshly zeroed table toward low-numbered actions. Instead the indices
    /// tied for the maximum are collected and one is drawn via
    /// `rng.uniform_int(0, ties.len())`. The draw is made even when the
    /// maximum is unique, so a run consumes the same number of draws per
    /// selection regardless of ties.
    pub fn random_argmax<R: RandomSource + ?Sized>(
        &self,
        state: usize,
        rng: &mut R,
    ) -> Result<usize> {
        let row = self.row(state);
        if row.is_empty() {
            return Err(Error::InvalidConfiguration {
                message: format!("state {} has an empty action-value row", state),
            });
        }

        let max = row.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let ties = row
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == max)
            .map(|(a, _)| a)
            .collect::<Vec<_>>();

        Ok(ties[rng.uniform_int(0, ties.len())])
    }
}
