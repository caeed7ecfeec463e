use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Brand identifier as sent by the upstream catalog.
///
/// Upstream ids may be JSON numbers or strings; whichever form arrives is kept
/// so records echo back unchanged, including floats and integers beyond `i64`. Comparison goes through [`BrandId::key`],
/// so `3` and `"3"` identify the same brand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BrandId {
	Number(Number),
	Text(String),
}

impl BrandId {
	/// Textual form used for equality and lookups.
	pub fn key(&self) -> Cow<'_, str> {
		match self {
			Self::Number(n) => Cow::Owned(n.to_string()),
			Self::Text(s) => Cow::Borrowed(s.as_str()),
		}
	}

	pub fn matches(&self, key: &str) -> bool {
		self.key() == key
	}
}

impl PartialEq for BrandId {
	fn eq(&self, other: &Self) -> bool {
		self.key() == other.key()
	}
}

impl Eq for BrandId {}

impl fmt::Display for BrandId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.key())
	}
}

impl From<i64> for BrandId {
	fn from(n: i64) -> Self {
		Self::Number(n.into())
	}
}

impl From<&str> for BrandId {
	fn from(s: &str) -> Self {
		Self::Text(s.to_string())
	}
}

/// A catalog record: either a recommendation candidate or the target.
///
/// Fields beyond the five the scorer reads are kept in `extra` and
/// serialized back inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
	pub id: BrandId,
	pub name: String,
	pub price: f64,
	pub tag: String,
	#[serde(default, deserialize_with = "deserialize_flag")]
	pub boosted: bool,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Brand {
	pub fn new(id: impl Into<BrandId>, name: &str, price: f64, tag: &str, boosted: bool) -> Self {
		Self {
			id: id.into(),
			name: name.to_string(),
			price,
			tag: tag.to_string(),
			boosted,
			extra: Map::new(),
		}
	}
}

/// `null` and a missing field both mean "not boosted".
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// A candidate with its per-signal similarities and fused score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredBrand {
	#[serde(flatten)]
	pub brand: Brand,
	pub price_similarity: f64,
	pub name_similarity: f64,
	pub tag_similarity: f64,
	pub similarity_score: f64,
}

/// Body of `GET /api/brands/{product_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
	pub target: Brand,
	pub recommendations: Vec<ScoredBrand>,
}
