/// Why a device position could not be obtained.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Unknown demo location '{0}'")]
    UnknownDemoLocation(String),
}

/// Failures talking to the recommendation backend.
///
/// Recommendation failures collapse into one generic message; the detail
/// lookups keep their own message so each can be shown next to its action.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Failed to load recommendations")]
    RecommendationsUnavailable { reason: String },

    #[error("Failed to generate recipe. {0}")]
    Recipe(String),

    #[error("Failed to generate description. {0}")]
    Description(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_error_messages() {
        assert_eq!(LocationError::ServiceUnavailable.to_string(), "Location service unavailable");
        assert_eq!(
            LocationError::UnknownDemoLocation("Atlantis".into()).to_string(),
            "Unknown demo location 'Atlantis'"
        );
    }

    #[test]
    fn recommendation_failure_hides_reason() {
        let err = BackendError::RecommendationsUnavailable { reason: "connection refused".into() };
        assert_eq!(err.to_string(), "Failed to load recommendations");
    }

    #[test]
    fn detail_failures_are_scoped() {
        assert_eq!(
            BackendError::Recipe("No recipe returned".into()).to_string(),
            "Failed to generate recipe. No recipe returned"
        );
        assert_eq!(
            BackendError::Description("No description returned".into()).to_string(),
            "Failed to generate description. No description returned"
        );
    }
}
