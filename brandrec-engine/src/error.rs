use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecommendError {
	#[error("NEXTJS_URL is not set")]
	UpstreamNotConfigured,
	#[error("Upstream unavailable: {0}")]
	UpstreamUnavailable(String),
	#[error("Brand not found: {0}")]
	NotFound(String),
	#[error("Malformed upstream response: {0}")]
	MalformedResponse(String),
	#[error("Invalid similarity score for brand {id}: {score}")]
	InvalidScore { id: String, score: f64 },
	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),
}

impl RecommendError {
	pub fn code(&self) -> &str {
		match self {
			Self::UpstreamNotConfigured => "CONFIG_UPSTREAM_MISSING",
			Self::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
			Self::NotFound(_) => "BRAND_NOT_FOUND",
			Self::MalformedResponse(_) => "UPSTREAM_MALFORMED",
			Self::InvalidScore { .. } => "SCORE_INVALID",
			Self::InvalidConfig(_) => "CONFIG_INVALID",
		}
	}

	pub fn to_json_error(&self) -> serde_json::Value {
		serde_json::json!({
			"error": self.to_string(),
			"code": self.code(),
		})
	}
}
