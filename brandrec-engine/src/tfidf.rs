// ---------------------------------------------------------------------------
// TF-IDF vectorizer -- corpus-fit term weighting for short product texts
// ---------------------------------------------------------------------------
//
// Fits a vocabulary and smoothed IDF weights over a corpus of documents,
// then projects any text into that space as an L2-normalised sparse vector.
// Terms outside the fitted vocabulary are dropped, so a text sharing no
// terms with the corpus maps to the empty vector.
// ---------------------------------------------------------------------------

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;

/// Sparse vector as `(dimension, weight)` pairs sorted by dimension.
pub type SparseVector = Vec<(usize, f64)>;

/// Words of two or more word characters.
static TOKEN_PATTERN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"));

// ---------------------------------------------------------------------------
// Tokenisation
// ---------------------------------------------------------------------------

/// Split text into lowercased word tokens.
///
/// Single-character words are dropped. No stemming or stop-word removal.
pub fn tokenize(text: &str) -> Vec<String> {
	let lower = text.to_lowercase();
	TOKEN_PATTERN
		.find_iter(&lower)
		.map(|m| m.as_str().to_string())
		.collect()
}

// ---------------------------------------------------------------------------
// TfidfVectorizer
// ---------------------------------------------------------------------------

/// Vocabulary plus per-term IDF weights fit on one corpus.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
	/// term -> dimension index (assigned in sorted term order)
	vocabulary: HashMap<String, usize>,
	/// IDF weight per dimension
	idf: Vec<f64>,
}

impl TfidfVectorizer {
	/// Fit vocabulary and IDF weights on `documents`.
	///
	/// IDF is smoothed as if one extra document contained every term:
	/// `ln((1 + n) / (1 + df)) + 1`.
	pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
		let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
		for doc in documents {
			let unique: BTreeSet<String> = tokenize(doc.as_ref()).into_iter().collect();
			for term in unique {
				*doc_freq.entry(term).or_insert(0) += 1;
			}
		}

		let n = documents.len() as f64;
		let mut vocabulary = HashMap::with_capacity(doc_freq.len());
		let mut idf = Vec::with_capacity(doc_freq.len());
		for (idx, (term, df)) in doc_freq.into_iter().enumerate() {
			idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
			vocabulary.insert(term, idx);
		}

		Self { vocabulary, idf }
	}

	/// Project `text` into the fitted space.
	pub fn transform(&self, text: &str) -> SparseVector {
		let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
		for token in tokenize(text) {
			if let Some(&idx) = self.vocabulary.get(&token) {
				*counts.entry(idx).or_insert(0.0) += 1.0;
			}
		}

		let mut vector: SparseVector = counts
			.into_iter()
			.map(|(idx, tf)| (idx, tf * self.idf[idx]))
			.collect();
		normalize(&mut vector);
		vector
	}

	/// Fit on `documents` and return each document's vector.
	pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> (Self, Vec<SparseVector>) {
		let vectorizer = Self::fit(documents);
		let vectors = documents
			.iter()
			.map(|d| vectorizer.transform(d.as_ref()))
			.collect();
		(vectorizer, vectors)
	}

	/// Number of distinct terms in the fitted vocabulary.
	pub fn vocabulary_len(&self) -> usize {
		self.vocabulary.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vocabulary.is_empty()
	}
}

/// Scale a sparse vector to unit length in place. Zero vectors stay zero.
fn normalize(v: &mut SparseVector) {
	let norm = crate::cosine::compute_magnitude(v);
	if norm > 0.0 {
		for (_, w) in v.iter_mut() {
			*w /= norm;
		}
	}
}
