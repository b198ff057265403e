//! Service layer error types

use blog_common::AppError;
use blog_core::DomainError;
use thiserror::Error;

/// Everything a service operation can fail with
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A domain rule was violated or a resource is missing
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Auth, hashing, storage or configuration failure
    #[error(transparent)]
    App(#[from] AppError),

    /// The service context was built without a collaborator
    #[error("Service context is missing {0}")]
    MissingDependency(&'static str),
}

impl ServiceError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status(e),
            Self::App(e) => e.status_code(),
            Self::MissingDependency(_) => 500,
        }
    }

    /// Machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::MissingDependency(_) => "INTERNAL_ERROR",
        }
    }
}

fn domain_status(err: &DomainError) -> u16 {
    AppError::Domain(err.clone()).status_code()
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
