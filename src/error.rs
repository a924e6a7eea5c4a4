use thiserror::Error;

/// Error type for training and evaluation runs
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A run was requested with parameters under which the algorithm is undefined
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// The environment stepped outside its own declared state space
    #[error("environment contract violation: {message}")]
    EnvironmentContractViolation { message: String },
}

/// Result type alias for training and evaluation runs
pub type Result<T> = std::result::Result<T, Error>;
