use thiserror::Error;

/// Problems with the inputs of a run. Raised before any request is made.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Please set the {var} environment variable.")]
    MissingCredential { var: &'static str },

    #[error("The {name} argument must not be empty")]
    EmptyArgument { name: &'static str },
}

/// A release listing that could not be used. The run carries on without releases.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedIssue {
    #[error("Error decoding JSON: {0}")]
    InvalidJson(String),

    #[error("Unexpected data format: expected an array of releases, got {0}")]
    UnexpectedShape(&'static str),
}
