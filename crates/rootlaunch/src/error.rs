use std::io;

/// Failure reported by a launch strategy.
///
/// Strategies never return these through `Err` to the caller; they collect
/// them into a [`LaunchOutcome`](crate::launch::LaunchOutcome) instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LaunchError {
    /// The system refused the call for lack of the named permission.
    #[error("Requires permission {permission}")]
    PermissionDenied { permission: String },

    #[error("Unable to find service!")]
    ServiceNotFound,

    /// Generic service start failure carrying the system's message.
    #[error("{0}")]
    ServiceFailed(String),

    #[error("Error starting Activity: {code}")]
    ActivityStart { code: i32 },

    #[error("Error starting Receiver: {code}")]
    Broadcast { code: i32 },

    /// Root command exited non-zero; holds the joined stderr lines.
    #[error("{0}")]
    ShellFailed(String),

    /// The call shape for the running OS version is not served.
    #[error("Method unavailable: {0}")]
    MethodUnavailable(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Not implemented")]
    NotImplemented,

    #[error("Launch panicked: {0}")]
    Panicked(String),

    #[error("No eligible launch strategy")]
    NoEligibleStrategy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    PermissionDenial,
    NotFound,
    Transport,
}

impl LaunchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LaunchError::PermissionDenied { .. } => ErrorCategory::PermissionDenial,
            LaunchError::ServiceNotFound | LaunchError::NoEligibleStrategy => {
                ErrorCategory::NotFound
            }
            _ => ErrorCategory::Transport,
        }
    }
}

pub type LaunchResult<T> = Result<T, LaunchError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
