use thiserror::Error;

/// Precondition violations of the sample statistics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("statistic requested on an empty sample set")]
    EmptySamples,

    #[error("bootstrap requires at least one resample")]
    NoResamples,
}

/// Problems with run parameters, raised before any sweep runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("parameter line has {found} fields, expected {expected}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid value '{value}' for {field}")]
    Parse { field: &'static str, value: String },

    #[error("unknown dynamics '{0}', expected 'glauber' or 'kawasaki'")]
    UnknownDynamics(String),

    #[error("unknown initial state '{0}', expected 'up', 'random' or 'split'")]
    UnknownInitialState(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Stats(#[from] StatsError),
}

pub type Result<T> = std::result::Result<T, SimError>;
