use thiserror::Error;
use vpf_aero::AeroError;
use vpf_core::CoreError;
use vpf_domain::DomainError;

pub type StudyResult<T> = Result<T, StudyError>;

#[derive(Error, Debug)]
pub enum StudyError {
    #[error("Invalid study configuration: {what}")]
    InvalidConfig { what: String },

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Aero error: {0}")]
    Aero(#[from] AeroError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<CoreError> for StudyError {
    fn from(err: CoreError) -> Self {
        StudyError::Domain(err.into())
    }
}

impl StudyError {
    pub(crate) fn config(what: impl Into<String>) -> Self {
        StudyError::InvalidConfig { what: what.into() }
    }
}
