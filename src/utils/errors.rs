#![forbid(unsafe_code)]

use thiserror::Error;

/// Error enumerates the errors returned by this application.
#[derive(Error, Debug)]
pub enum Errors {
    /// Input parameter logging.
    #[error("worker_server input parameters:\n{}", .0)]
    InputParms(String),

    /// Inaccessible or invalid logger configuration.
    #[error("Unable to initialize Log4rs using: {}", .0)]
    Log4rsInitialization(String),

    #[error("Unable to start server on {}: {}", .0, .1)]
    ServerStart(String, String),

    #[error("Unable to serialize worker registry: {}", .0)]
    Serialization(String),
}
