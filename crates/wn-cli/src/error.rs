//! Maps a failure to one of the three exit codes named in the external
//! interfaces table: 0 success, 1 validation error, 2 runtime error.

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] wn_types::TopologyError),

    #[error(transparent)]
    Runtime(#[from] wn_controller::ControllerError),

    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Validation(_) => 1,
            CliError::Runtime(_) | CliError::Other(_) => 2,
        }
    }
}
