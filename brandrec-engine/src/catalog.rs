//! Upstream brand catalog access.
//!
//! [`CatalogSource`] is the seam between the scoring pipeline and wherever
//! brand records come from. [`HttpCatalog`] talks to the storefront backend
//! over blocking HTTP with a per-call timeout.

use std::collections::HashSet;
use std::time::Duration;

use serde::de::DeserializeOwned;
use ureq::Agent;
use ureq::http::StatusCode;

use crate::error::RecommendError;
use crate::types::Brand;

/// Read-only access to brand records.
pub trait CatalogSource: Send + Sync {
	/// All brands eligible for recommendation (the unmarked ones).
	fn fetch_candidates(&self) -> Result<Vec<Brand>, RecommendError>;

	/// A single brand by id.
	fn fetch_target(&self, id: &str) -> Result<Brand, RecommendError>;
}

/// Configuration for the HTTP catalog.
#[derive(Debug, Clone)]
pub struct HttpCatalogConfig {
	/// Base URL of the backend (e.g., `http://localhost:3000`).
	pub base_url: String,
	/// Timeout per outbound call in seconds.
	pub timeout_secs: u64,
}

/// Catalog backed by the storefront's `/api/brands` endpoints.
pub struct HttpCatalog {
	base_url: String,
	agent: Agent,
}

impl HttpCatalog {
	pub fn new(config: HttpCatalogConfig) -> Self {
		let agent_config = Agent::config_builder()
			.timeout_global(Some(Duration::from_secs(config.timeout_secs)))
			.http_status_as_error(false)
			.build();
		let agent = Agent::new_with_config(agent_config);
		Self {
			base_url: config.base_url.trim_end_matches('/').to_string(),
			agent,
		}
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// GET `url` and decode the JSON body as `T`.
	///
	/// Returns `Ok(None)` on 404 so callers decide whether absence is an error.
	fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>, RecommendError> {
		tracing::debug!(url = %url, "Fetching from upstream catalog");

		let mut response = self
			.agent
			.get(url)
			.call()
			.map_err(|e| RecommendError::UpstreamUnavailable(format!("GET {url}: {e}")))?;

		let status = response.status();
		if status == StatusCode::NOT_FOUND {
			return Ok(None);
		}
		if !status.is_success() {
			return Err(RecommendError::UpstreamUnavailable(format!(
				"GET {url}: status {status}"
			)));
		}

		let body = response
			.body_mut()
			.read_to_string()
			.map_err(|e| RecommendError::UpstreamUnavailable(format!("GET {url}: {e}")))?;

		serde_json::from_str(&body)
			.map(Some)
			.map_err(|e| RecommendError::MalformedResponse(format!("GET {url}: {e}")))
	}
}

impl CatalogSource for HttpCatalog {
	fn fetch_candidates(&self) -> Result<Vec<Brand>, RecommendError> {
		let url = format!("{}/api/brands?unmarked_only=true", self.base_url);
		let brands: Vec<Brand> = self.get_json(&url)?.ok_or_else(|| {
			RecommendError::UpstreamUnavailable(format!("GET {url}: status 404 Not Found"))
		})?;
		let brands = validate_collection(brands)?;
		tracing::debug!(count = brands.len(), "Fetched candidate brands");
		Ok(brands)
	}

	fn fetch_target(&self, id: &str) -> Result<Brand, RecommendError> {
		let url = format!("{}/api/brands/{}", self.base_url, encode_path_segment(id));
		// A 404 and a `null` body both mean the id does not resolve.
		let brand: Brand = self
			.get_json::<Option<Brand>>(&url)?
			.flatten()
			.ok_or_else(|| RecommendError::NotFound(id.to_string()))?;
		validate_brand(&brand)?;
		Ok(brand)
	}
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check the fields serde cannot: prices must be finite and non-negative.
pub fn validate_brand(brand: &Brand) -> Result<(), RecommendError> {
	if !brand.price.is_finite() || brand.price < 0.0 {
		return Err(RecommendError::MalformedResponse(format!(
			"brand {} has invalid price {}",
			brand.id, brand.price
		)));
	}
	Ok(())
}

/// Validate every record and drop repeated ids, keeping the first.
pub fn validate_collection(brands: Vec<Brand>) -> Result<Vec<Brand>, RecommendError> {
	let mut seen = HashSet::with_capacity(brands.len());
	let mut out = Vec::with_capacity(brands.len());
	for brand in brands {
		validate_brand(&brand)?;
		if !seen.insert(brand.id.key().into_owned()) {
			tracing::warn!(id = %brand.id, "Duplicate brand id in catalog, keeping first");
			continue;
		}
		out.push(brand);
	}
	Ok(out)
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode_path_segment(segment: &str) -> String {
	let mut out = String::with_capacity(segment.len());
	for byte in segment.bytes() {
		match byte {
			b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
				out.push(byte as char)
			}
			_ => out.push_str(&format!("%{byte:02X}")),
		}
	}
	out
}
