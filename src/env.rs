/// Represents a Markov decision process, defining the dynamics of an environment
/// in which an agent can operate.
///
/// This trait covers the common case of a discrete-time MDP with one agent and
/// finite state and action spaces, both addressed by index: states are integers
/// in `[0, S)` and actions are integers in `[0, A)`. Both sizes are fixed for
/// the lifetime of the environment.
pub trait Environment {
    /// Number of available actions `A`
    fn action_space_size(&self) -> usize;

    /// Number of observable states `S`
    fn observation_space_size(&self) -> usize;

    /// Reset the environment to an initial state
    ///
    /// May be called any number of times.
    ///
    /// **Returns** the initial state
    fn reset(&mut self) -> usize;

    /// Update the environment in response to an action taken by an agent
    ///
    /// **Returns** `(next_state, reward, terminated, truncated)`
    fn step(&mut self, action: usize) -> (usize, f32, bool, bool);
}
