use crate::bus::BusError;
use thiserror::Error;
use tokio::task::JoinError;

/// Errors from starting or stopping a service runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Could not subscribe: {0}")]
    Bus(#[from] BusError),

    #[error("{task} task failed: {source}")]
    TaskFailed {
        task: &'static str,
        #[source]
        source: JoinError,
    },
}
