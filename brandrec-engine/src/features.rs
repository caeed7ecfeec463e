// ---------------------------------------------------------------------------
// Feature builder -- per-candidate similarity signals against a target
// ---------------------------------------------------------------------------
//
// Three signals, each computed fresh per request:
//   price  1 - |p - p_target| / (max - min)
//   name   cosine over a TF-IDF space fit on candidate names
//   tag    cosine over a TF-IDF space fit on candidate tags
// Name and tag spaces are fit independently and never mixed.
// ---------------------------------------------------------------------------

use clap::ValueEnum;

use crate::cosine::cosine_similarity;
use crate::tfidf::TfidfVectorizer;
use crate::types::Brand;

// ---------------------------------------------------------------------------
// Price
// ---------------------------------------------------------------------------

/// Which prices span the normalisation range for price similarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PriceRangePolicy {
	/// Candidate prices plus the target price. Keeps similarity in [0, 1].
	#[default]
	IncludeTarget,
	/// Candidate prices only. A target priced outside the candidates'
	/// range yields negative similarities.
	CandidatesOnly,
}

/// Min/max price over the relevant records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
	pub min: f64,
	pub max: f64,
}

impl PriceRange {
	/// Compute the range over `candidates`, adding `target_price` when the
	/// policy asks for it. Returns `None` when no price is in scope.
	pub fn over(candidates: &[Brand], target_price: f64, policy: PriceRangePolicy) -> Option<Self> {
		let extra = match policy {
			PriceRangePolicy::IncludeTarget => Some(target_price),
			PriceRangePolicy::CandidatesOnly => None,
		};
		candidates
			.iter()
			.map(|c| c.price)
			.chain(extra)
			.fold(None, |acc: Option<Self>, p| {
				Some(match acc {
					None => Self { min: p, max: p },
					Some(r) => Self {
						min: r.min.min(p),
						max: r.max.max(p),
					},
				})
			})
	}

	pub fn width(&self) -> f64 {
		self.max - self.min
	}
}

/// Price similarity of `price` to `target_price` within `range`.
///
/// A zero-width (or absent) range means every in-scope price is the same;
/// every candidate then scores 1.0.
pub fn price_similarity(price: f64, target_price: f64, range: Option<PriceRange>) -> f64 {
	match range {
		Some(r) if r.width() > 0.0 => 1.0 - (price - target_price).abs() / r.width(),
		_ => 1.0,
	}
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Cosine similarity of every corpus document to `query`, in a TF-IDF space
/// fit on `corpus` alone.
///
/// A corpus with no usable terms, or a query sharing no terms with it,
/// yields 0.0 for every document.
pub fn text_similarities<S: AsRef<str>>(corpus: &[S], query: &str) -> Vec<f64> {
	let (vectorizer, vectors) = TfidfVectorizer::fit_transform(corpus);
	let query_vector = vectorizer.transform(query);
	tracing::trace!(
		documents = corpus.len(),
		vocabulary = vectorizer.vocabulary_len(),
		query_terms = query_vector.len(),
		"Fit TF-IDF space"
	);
	vectors
		.iter()
		.map(|v| cosine_similarity(v, &query_vector).max(0.0))
		.collect()
}

// ---------------------------------------------------------------------------
// Combined
// ---------------------------------------------------------------------------

/// The three similarity signals for one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureScores {
	pub price: f64,
	pub name: f64,
	pub tag: f64,
}

/// Compute feature scores for every candidate, in input order.
pub fn build_features(
	candidates: &[Brand],
	target: &Brand,
	policy: PriceRangePolicy,
) -> Vec<FeatureScores> {
	let range = PriceRange::over(candidates, target.price, policy);

	let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
	let name_scores = text_similarities(&names, &target.name);

	let tags: Vec<&str> = candidates.iter().map(|c| c.tag.as_str()).collect();
	let tag_scores = text_similarities(&tags, &target.tag);

	candidates
		.iter()
		.zip(name_scores)
		.zip(tag_scores)
		.map(|((c, name), tag)| FeatureScores {
			price: price_similarity(c.price, target.price, range),
			name,
			tag,
		})
		.collect()
}
