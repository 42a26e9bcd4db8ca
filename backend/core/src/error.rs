use thiserror::Error;

/// Top-level error type for the Jiaofu gateway.
#[derive(Debug, Error)]
pub enum JiaofuError {
    /// A credential or setting required at call time is missing.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Malformed or missing request field.
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("no choices returned from vendor API")]
    EmptyResponse,

    #[error("unauthorized")]
    Unauthorized,

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Token file could not be read, parsed, or written.
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl JiaofuError {
    /// True for failures that originate at the vendor API.
    pub fn is_upstream(&self) -> bool {
        matches!(self, JiaofuError::Upstream(_) | JiaofuError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_kinds() {
        assert!(JiaofuError::EmptyResponse.is_upstream());
        assert!(JiaofuError::Upstream("503".into()).is_upstream());
        assert!(!JiaofuError::Configuration("api key".into()).is_upstream());
    }

    #[test]
    fn display_carries_detail() {
        let err = JiaofuError::AlreadyExists("alice".into());
        assert_eq!(err.to_string(), "already exists: alice");
    }
}
