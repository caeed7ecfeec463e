// ---------------------------------------------------------------------------
// Recommender -- fetch, score, rank for one request
// ---------------------------------------------------------------------------
//
// Holds the catalog handle and scoring settings for the process lifetime.
// Every call works on its own freshly fetched collection and freshly fit
// vector spaces; nothing is cached between calls.
// ---------------------------------------------------------------------------

use std::sync::Arc;

use crate::catalog::CatalogSource;
use crate::error::RecommendError;
use crate::features::PriceRangePolicy;
use crate::recommendation::{ScoreWeights, rank, score_brands};
use crate::types::RecommendationResponse;

#[derive(Clone)]
pub struct Recommender {
	catalog: Arc<dyn CatalogSource>,
	weights: ScoreWeights,
	price_range: PriceRangePolicy,
}

impl Recommender {
	pub fn new(
		catalog: Arc<dyn CatalogSource>,
		weights: ScoreWeights,
		price_range: PriceRangePolicy,
	) -> Self {
		Self {
			catalog,
			weights,
			price_range,
		}
	}

	/// Recommend up to `limit` brands similar to `product_id`.
	///
	/// Blocks on upstream I/O; call from a blocking context.
	pub fn recommend(
		&self,
		product_id: &str,
		limit: i64,
	) -> Result<RecommendationResponse, RecommendError> {
		let target = self.catalog.fetch_target(product_id)?;
		let candidates = self.catalog.fetch_candidates()?;
		let candidate_count = candidates.len();

		let scored = score_brands(candidates, &target, &self.weights, self.price_range)?;
		let recommendations = rank(scored, &target.id, limit);

		tracing::info!(
			product_id = %product_id,
			candidates = candidate_count,
			returned = recommendations.len(),
			"Computed recommendations"
		);
		for rec in &recommendations {
			tracing::debug!(
				id = %rec.brand.id,
				name = %rec.brand.name,
				price = rec.brand.price,
				score = rec.similarity_score,
				"Recommendation"
			);
		}

		Ok(RecommendationResponse {
			target,
			recommendations,
		})
	}
}
