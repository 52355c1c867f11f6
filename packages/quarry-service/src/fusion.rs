use std::collections::HashMap;

use quarry_config::Search;
use quarry_domain::SearchHit;

use crate::HybridResult;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionWeights {
	pub semantic: f32,
	pub keyword: f32,
}
impl FusionWeights {
	pub fn from_config(search: &Search) -> Self {
		Self { semantic: search.semantic_weight, keyword: search.keyword_weight }
	}

	pub fn combine(&self, semantic_score: f32, keyword_score: f32) -> f32 {
		semantic_score * self.semantic + keyword_score * self.keyword
	}
}

/// Merges both hit lists into one entry per `doc_id` with a weighted combined score.
///
/// Documents found by only one backend keep their single weighted score. Descriptive fields come
/// from the semantic hit when both backends returned the document. The output is unranked and
/// keeps first-seen order: semantic hits first, then keyword-only hits.
pub fn fuse(
	semantic_hits: Vec<SearchHit>,
	keyword_hits: Vec<SearchHit>,
	weights: FusionWeights,
) -> Vec<HybridResult> {
	let mut out: Vec<HybridResult> = Vec::with_capacity(semantic_hits.len() + keyword_hits.len());
	let mut by_doc: HashMap<String, usize> = HashMap::new();

	for hit in semantic_hits {
		let score = hit.score;

		match by_doc.get(&hit.doc_id) {
			Some(&idx) => {
				let entry = &mut out[idx];

				entry.semantic_score = entry.semantic_score.max(score);
			},
			None => {
				by_doc.insert(hit.doc_id.clone(), out.len());

				let mut entry = HybridResult::from_hit(hit);

				entry.semantic_score = score;
				out.push(entry);
			},
		}
	}

	for hit in keyword_hits {
		let score = hit.score;

		match by_doc.get(&hit.doc_id) {
			Some(&idx) => {
				let entry = &mut out[idx];

				entry.keyword_score = entry.keyword_score.max(score);
			},
			None => {
				by_doc.insert(hit.doc_id.clone(), out.len());

				let mut entry = HybridResult::from_hit(hit);

				entry.keyword_score = score;
				out.push(entry);
			},
		}
	}

	for entry in &mut out {
		entry.combined_score = weights.combine(entry.semantic_score, entry.keyword_score);
	}

	out
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	const WEIGHTS: FusionWeights = FusionWeights { semantic: 0.7, keyword: 0.3 };

	fn hit(doc_id: &str, score: f32) -> SearchHit {
		SearchHit::new(doc_id, score)
	}

	fn titled(doc_id: &str, title: &str, score: f32) -> SearchHit {
		SearchHit { title: title.to_string(), ..SearchHit::new(doc_id, score) }
	}

	#[test]
	fn overlapping_document_gets_full_weighted_sum() {
		let fused = fuse(vec![hit("A", 0.9)], vec![hit("A", 4.0), hit("B", 2.0)], WEIGHTS);

		assert_eq!(fused.len(), 2);
		assert_eq!(fused[0].doc_id, "A");
		assert!((fused[0].combined_score - 1.83).abs() < 1e-5);
		assert_eq!(fused[0].semantic_score, 0.9);
		assert_eq!(fused[0].keyword_score, 4.0);
		assert_eq!(fused[1].doc_id, "B");
		assert!((fused[1].combined_score - 0.6).abs() < 1e-6);
		assert_eq!(fused[1].semantic_score, 0.0);
	}

	#[test]
	fn output_covers_union_without_duplicates() {
		let semantic = vec![hit("A", 0.9), hit("C", 0.5), hit("D", 0.4)];
		let keyword = vec![hit("B", 3.0), hit("A", 1.0), hit("E", 0.2)];
		let fused = fuse(semantic, keyword, WEIGHTS);
		let ids: HashSet<&str> = fused.iter().map(|r| r.doc_id.as_str()).collect();

		assert_eq!(fused.len(), 5);
		assert_eq!(ids.len(), 5);
	}

	#[test]
	fn combined_score_matches_formula_for_every_entry() {
		let semantic = vec![hit("A", 0.8), hit("B", 0.3)];
		let keyword = vec![hit("B", 7.5), hit("C", 1.25)];

		for entry in fuse(semantic, keyword, WEIGHTS) {
			let expected = entry.semantic_score * 0.7 + entry.keyword_score * 0.3;

			assert!((entry.combined_score - expected).abs() < 1e-5, "doc {}", entry.doc_id);
		}
	}

	#[test]
	fn semantic_fields_win_when_both_backends_match() {
		let fused = fuse(
			vec![titled("A", "From vectors", 0.5)],
			vec![titled("A", "From lexical", 2.0)],
			WEIGHTS,
		);

		assert_eq!(fused[0].title, "From vectors");
	}

	#[test]
	fn keyword_only_document_keeps_its_fields() {
		let fused = fuse(Vec::new(), vec![titled("K", "Lexical only", 2.0)], WEIGHTS);

		assert_eq!(fused[0].title, "Lexical only");
		assert!((fused[0].combined_score - 0.6).abs() < 1e-6);
	}

	#[test]
	fn empty_inputs_produce_empty_output() {
		assert!(fuse(Vec::new(), Vec::new(), WEIGHTS).is_empty());
	}

	#[test]
	fn repeated_doc_id_within_one_backend_keeps_best_score() {
		let fused = fuse(vec![hit("A", 0.4), hit("A", 0.6)], Vec::new(), WEIGHTS);

		assert_eq!(fused.len(), 1);
		assert_eq!(fused[0].semantic_score, 0.6);
	}
}
