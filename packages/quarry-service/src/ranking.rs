use std::cmp::Ordering;

use time::OffsetDateTime;

use quarry_config::Search;
use quarry_domain::recency;

use crate::HybridResult;

#[derive(Debug, Clone, Copy)]
pub struct RecencyPolicy {
	pub window_days: i64,
	pub factor: f32,
	pub now: OffsetDateTime,
}
impl RecencyPolicy {
	pub fn from_config(search: &Search, now: OffsetDateTime) -> Self {
		Self { window_days: search.recency_window_days, factor: search.recency_factor, now }
	}
}

/// Boosts each result's combined score once when its document is recent.
pub fn apply_recency(results: &mut [HybridResult], policy: &RecencyPolicy) {
	for result in results {
		result.combined_score = recency::boost_at(
			result.combined_score,
			result.created_at,
			policy.window_days,
			policy.factor,
			policy.now,
		);
	}
}

/// Orders by combined score (descending, `doc_id` ascending on ties), keeps the first `limit`
/// entries, and assigns contiguous 1-based ranks.
pub fn rank_results(mut results: Vec<HybridResult>, limit: usize) -> Vec<HybridResult> {
	results.sort_by(|left, right| {
		cmp_f32_desc(left.combined_score, right.combined_score)
			.then_with(|| left.doc_id.cmp(&right.doc_id))
	});
	results.truncate(limit);

	for (idx, result) in results.iter_mut().enumerate() {
		result.rank = idx as u32 + 1;
	}

	results
}

pub fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}
