// ---------------------------------------------------------------------------
// Recommendation scoring -- weighted fusion, boost, and ranking
// ---------------------------------------------------------------------------
//
// Pure functions: fuse the per-candidate feature scores into one weighted
// score, apply the boost multiplier to flagged candidates, then exclude the
// target and keep the best `limit` entries. No side effects.
// ---------------------------------------------------------------------------

use std::cmp::Ordering;

use crate::error::RecommendError;
use crate::features::{FeatureScores, PriceRangePolicy, build_features};
use crate::types::{Brand, BrandId, ScoredBrand};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

pub const DEFAULT_PRICE_WEIGHT: f64 = 0.3;
pub const DEFAULT_NAME_WEIGHT: f64 = 0.3;
pub const DEFAULT_TAG_WEIGHT: f64 = 0.4;
pub const DEFAULT_BOOST: f64 = 1.5;

/// Number of recommendations returned when the caller gives no limit.
pub const DEFAULT_LIMIT: i64 = 6;

/// Signal weights and the boost multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
	pub price: f64,
	pub name: f64,
	pub tag: f64,
	pub boost: f64,
}

impl Default for ScoreWeights {
	fn default() -> Self {
		Self {
			price: DEFAULT_PRICE_WEIGHT,
			name: DEFAULT_NAME_WEIGHT,
			tag: DEFAULT_TAG_WEIGHT,
			boost: DEFAULT_BOOST,
		}
	}
}

impl ScoreWeights {
	/// Reject weights that could make a score negative or non-finite.
	pub fn validate(&self) -> Result<(), RecommendError> {
		for (label, value) in [
			("price weight", self.price),
			("name weight", self.name),
			("tag weight", self.tag),
			("boost", self.boost),
		] {
			if !value.is_finite() || value < 0.0 {
				return Err(RecommendError::InvalidConfig(format!(
					"{label} must be a finite non-negative number, got {value}"
				)));
			}
		}
		Ok(())
	}
}

// ---------------------------------------------------------------------------
// Fusion
// ---------------------------------------------------------------------------

/// Weighted sum of the three similarity signals.
pub fn fuse_score(features: &FeatureScores, weights: &ScoreWeights) -> f64 {
	features.price * weights.price + features.name * weights.name + features.tag * weights.tag
}

/// Multiply a fused score by the boost for flagged candidates.
pub fn apply_boost(score: f64, boosted: bool, weights: &ScoreWeights) -> f64 {
	if boosted {
		score * weights.boost
	} else {
		score
	}
}

/// Score every candidate against `target`.
///
/// Output order matches `candidates`. Fails with `InvalidScore` rather than
/// handing a NaN or infinite score to the ranker.
pub fn score_brands(
	candidates: Vec<Brand>,
	target: &Brand,
	weights: &ScoreWeights,
	policy: PriceRangePolicy,
) -> Result<Vec<ScoredBrand>, RecommendError> {
	let features = build_features(&candidates, target, policy);

	candidates
		.into_iter()
		.zip(features)
		.map(|(brand, f)| {
			let score = apply_boost(fuse_score(&f, weights), brand.boosted, weights);
			if !score.is_finite() {
				return Err(RecommendError::InvalidScore {
					id: brand.id.to_string(),
					score,
				});
			}
			Ok(ScoredBrand {
				brand,
				price_similarity: f.price,
				name_similarity: f.name,
				tag_similarity: f.tag,
				similarity_score: score,
			})
		})
		.collect()
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Drop the target, sort by score descending, keep the first `limit`.
///
/// The sort is stable: equal scores keep their upstream order. A `limit`
/// of zero or less yields nothing; one larger than the remaining candidates
/// yields all of them.
pub fn rank(scored: Vec<ScoredBrand>, target_id: &BrandId, limit: i64) -> Vec<ScoredBrand> {
	let Ok(limit) = usize::try_from(limit) else {
		return Vec::new();
	};
	if limit == 0 {
		return Vec::new();
	}

	let mut ranked: Vec<ScoredBrand> = scored
		.into_iter()
		.filter(|s| s.brand.id != *target_id)
		.collect();
	ranked.sort_by(|a, b| {
		b.similarity_score
			.partial_cmp(&a.similarity_score)
			.unwrap_or(Ordering::Equal)
	});
	ranked.truncate(limit);
	ranked
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
