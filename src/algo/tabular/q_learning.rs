use log::debug;

use crate::{
    env::Environment,
    error::{Error, Result},
    exploration::{Choice, EpsilonGreedy},
    random::RandomSource,
};

use super::{q_table::QTable, reward_trace::RewardTrace};

/// Configuration for the [`QLearningAgent`]
pub struct QLearningAgentConfig {
    pub exploration: EpsilonGreedy,
    pub alpha: f32,
    pub gamma: f32,
}

impl Default for QLearningAgentConfig {
    fn default() -> Self {
        Self {
            exploration: EpsilonGreedy::new(0.2),
            alpha: 0.5,
            gamma: 0.5,
        }
    }
}

/// A zipped record of one evaluation episode
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    /// The state reported by the environment after each step; the start state is not recorded
    pub states: Vec<usize>,
    /// The action taken at each step
    pub actions: Vec<usize>,
    /// The reward received after each step
    pub rewards: Vec<f32>,
}

impl Trajectory {
    /// Number of steps in the episode
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// A Q-learning agent that learns a dense state-action value table
///
/// The agent trains for a fixed number of environment steps (not episodes)
/// with an epsilon-greedy policy, updating its table with the one-step TD(0)
/// control rule, and evaluates by running a single pure-exploitation episode
/// against a previously learned table.
///
/// All randomness is drawn from an injected [`RandomSource`], so a fixed seed
/// reproduces a training run exactly.
///
/// ### Parameters
/// - `exploration` - The epsilon greedy policy deciding when to explore
/// - `alpha` - The learning rate, the weight on the TD error - should be in `[0, 1]`
/// - `gamma` - The discount factor, the weight on future value - should be in `[0, 1]`
///
/// Out-of-range parameters are not rejected; they simply produce different
/// (possibly divergent) updates.
pub struct QLearningAgent {
    exploration: EpsilonGreedy,
    alpha: f32, // learning rate
    gamma: f32, // discount factor
}

impl QLearningAgent {
    /// Initialize a new `QLearningAgent`
    pub fn new(config: QLearningAgentConfig) -> Self {
        Self {
            exploration: config.exploration,
            alpha: config.alpha,
            gamma: config.gamma,
        }
    }

    /// Choose an action for `state` based on the exploration policy
    ///
    /// Consumes exactly two draws: one real for the explore/exploit decision
    /// and one integer for the action, on either branch.
    fn act<R: RandomSource + ?Sized>(
        &self,
        q: &QTable,
        state: usize,
        rng: &mut R,
    ) -> Result<usize> {
        match self.exploration.choose(rng) {
            Choice::Explore => Ok(rng.uniform_int(0, q.num_actions())),
            Choice::Exploit => q.random_argmax(state, rng),
        }
    }

    /// Train against `env` for `steps` environment interactions
    ///
    /// The value table is zero-initialized at the start of the run and updated
    /// in place after every step with
    /// `Q[s,a] += alpha * (r + gamma * max_a' Q[s',a'] - Q[s,a])`,
    /// where `s'` is the state the step reported. When a step terminates or
    /// truncates the episode, the bootstrap target still uses that reported
    /// state; the environment is reset afterwards and the fresh start state
    /// only becomes current for the next iteration.
    ///
    /// **Returns** the learned table and the per-step rewards averaged into
    /// `num_bins` bins of `ceil(steps / num_bins)` steps each, the final bin
    /// covering whatever remains.
    ///
    /// ### Errors
    /// - [`Error::InvalidConfiguration`] if `steps` or `num_bins` is zero, or
    ///   the environment declares an empty action space - raised before any
    ///   environment interaction
    /// - [`Error::EnvironmentContractViolation`] if the environment reports a
    ///   state outside its declared state space
    pub fn fit<E, R>(
        &self,
        env: &mut E,
        rng: &mut R,
        steps: usize,
        num_bins: usize,
    ) -> Result<(QTable, Vec<f32>)>
    where
        E: Environment + ?Sized,
        R: RandomSource + ?Sized,
    {
        if steps == 0 {
            return Err(Error::InvalidConfiguration {
                message: "`steps` must be at least 1".into(),
            });
        }
        if num_bins == 0 {
            return Err(Error::InvalidConfiguration {
                message: "`num_bins` must be at least 1".into(),
            });
        }

        let num_states = env.observation_space_size();
        let num_actions = env.action_space_size();
        if num_actions == 0 {
            return Err(Error::InvalidConfiguration {
                message: "environment declares an empty action space".into(),
            });
        }

        let mut q = QTable::zeros(num_states, num_actions);
        let mut trace = RewardTrace::with_capacity(steps);
        let mut episodes = 0u32;

        let mut state = check_state(env.reset(), num_states)?;
        for _ in 0..steps {
            let action = self.act(&q, state, rng)?;
            let (next_state, reward, terminated, truncated) = env.step(action);
            let next_state = check_state(next_state, num_states)?;
            trace.push(reward);

            // Bootstrap off the state the step reported, before any reset
            let target = reward + self.gamma * q.row_max(next_state);
            let value = q.get(state, action);
            q.set(state, action, value + self.alpha * (target - value));

            state = if terminated || truncated {
                episodes += 1;
                check_state(env.reset(), num_states)?
            } else {
                next_state
            };
        }

        debug!("trained for {} steps over {} finished episodes", steps, episodes);
        Ok((q, trace.bin_averages(num_bins)))
    }

    /// Run a single episode against `env`, exploiting `q` at every step
    ///
    /// The table is read-only; ties between equally valued actions are still
    /// broken at random, consuming one integer draw per step. The episode runs
    /// until the environment reports termination or truncation - no step cap
    /// is imposed here, so an environment that never signals either will loop
    /// forever.
    ///
    /// **Returns** the [`Trajectory`] of visited states, chosen actions, and
    /// received rewards, one entry per step.
    ///
    /// ### Errors
    /// - [`Error::InvalidConfiguration`] if the table shape does not match the
    ///   environment's declared state and action space sizes
    /// - [`Error::EnvironmentContractViolation`] if the environment reports a
    ///   state outside its declared state space
    pub fn predict<E, R>(&self, env: &mut E, q: &QTable, rng: &mut R) -> Result<Trajectory>
    where
        E: Environment + ?Sized,
        R: RandomSource + ?Sized,
    {
        let num_states = env.observation_space_size();
        if q.num_states() != num_states || q.num_actions() != env.action_space_size() {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "table shape ({}, {}) does not match environment ({}, {})",
                    q.num_states(),
                    q.num_actions(),
                    num_states,
                    env.action_space_size(),
                ),
            });
        }

        let mut trajectory = Trajectory::default();
        let mut state = check_state(env.reset(), num_states)?;
        loop {
            let action = q.random_argmax(state, rng)?;
            let (next_state, reward, terminated, truncated) = env.step(action);
            let next_state = check_state(next_state, num_states)?;

            trajectory.states.push(next_state);
            trajectory.actions.push(action);
            trajectory.rewards.push(reward);

            state = next_state;
            if terminated || truncated {
                break;
            }
        }

        debug!("evaluation episode finished after {} steps", trajectory.len());
        Ok(trajectory)
    }
}

fn check_state(state: usize, num_states: usize) -> Result<usize> {
    if state < num_states {
        Ok(state)
    } else {
        Err(Error::EnvironmentContractViolation {
            message: format!("reported state {} outside [0, {})", state, num_states),
        })
    }
}
