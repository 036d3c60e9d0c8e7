//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the capability registry
///
/// "No resource available" is never an error; it is the `Ok(None)` outcome of
/// [`SourceRepository::resolve`](crate::SourceRepository::resolve). Errors are
/// reserved for invalid registrations and provider malfunctions.
#[derive(Error, Debug)]
pub enum Error {
    /// A provider descriptor was rejected at repository construction
    #[error("Invalid provider: {message}")]
    InvalidProvider {
        /// Description of what is wrong with the descriptor
        message: String,
    },

    /// A provider factory failed while attempting to create a resource
    ///
    /// This is a malfunction, not a decline; it aborts the in-progress
    /// resolution and is propagated to the caller unchanged.
    #[error("Provider '{provider}' failed: {message}")]
    Provider {
        /// Name of the provider that failed
        provider: String,
        /// Description of the failure
        message: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A provider factory produced a resource of the wrong concrete type
    #[error("Provider '{provider}' produced a resource that is not a {resource}")]
    ResourceType {
        /// Name of the offending provider
        provider: String,
        /// Type name the caller requested
        resource: &'static str,
    },

    /// A factory call observed its cancellation signal and aborted
    #[error("Resolution cancelled")]
    Cancelled,
}

impl Error {
    /// Create an invalid-provider construction error
    pub fn invalid_provider(message: impl Into<String>) -> Self {
        Self::InvalidProvider {
            message: message.into(),
        }
    }

    /// Create a provider malfunction error without an underlying source
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a provider malfunction error wrapping an underlying error
    pub fn provider_with_source(
        provider: impl Into<String>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
