use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Module initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },
}

impl From<core_runtime::Error> for CoreError {
    fn from(err: core_runtime::Error) -> Self {
        match err {
            core_runtime::Error::Config(message) => CoreError::InitializationFailed(message),
            core_runtime::Error::CapabilityMissing {
                capability,
                message,
            } => CoreError::CapabilityMissing {
                capability,
                message,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
