use std::cmp::Ordering;

/// Compute cosine similarity between two sparse `(dimension, weight)`
/// vectors whose entries are sorted by dimension.
/// Returns 0.0 when either vector has zero magnitude.
/// Result clamped to [-1.0, 1.0].
pub fn cosine_similarity(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
	let denom = compute_magnitude(a) * compute_magnitude(b);
	if denom == 0.0 {
		return 0.0;
	}

	let result = sparse_dot(a, b) / denom;
	if !result.is_finite() {
		return 0.0;
	}
	result.clamp(-1.0, 1.0)
}

/// Compute the magnitude (L2 norm) of a sparse vector.
pub fn compute_magnitude(v: &[(usize, f64)]) -> f64 {
	v.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt()
}

/// Dot product over the dimensions both vectors share.
fn sparse_dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
	let mut dot = 0.0;
	let (mut i, mut j) = (0, 0);
	while i < a.len() && j < b.len() {
		match a[i].0.cmp(&b[j].0) {
			Ordering::Less => i += 1,
			Ordering::Greater => j += 1,
			Ordering::Equal => {
				dot += a[i].1 * b[j].1;
				i += 1;
				j += 1;
			}
		}
	}
	dot
}
