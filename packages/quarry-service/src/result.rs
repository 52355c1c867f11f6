use std::collections::BTreeSet;

use serde_json::{Map, Value};
use time::OffsetDateTime;

use quarry_domain::{
	SearchHit,
	preview::{self, PREVIEW_MAX_CHARS},
};

/// One fused, scored, and (once returned from a search) ranked document.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HybridResult {
	pub doc_id: String,
	pub title: String,
	pub content: String,
	pub source_type: String,
	pub source_id: String,
	#[serde(default, with = "quarry_domain::time_serde::option")]
	pub created_at: Option<OffsetDateTime>,
	#[serde(default, with = "quarry_domain::time_serde::option")]
	pub updated_at: Option<OffsetDateTime>,
	pub permissions: BTreeSet<String>,
	pub metadata: Map<String, Value>,
	pub semantic_score: f32,
	pub keyword_score: f32,
	pub combined_score: f32,
	pub content_preview: String,
	/// 1-based position in the returned list; 0 until ranking runs.
	pub rank: u32,
}
impl HybridResult {
	/// Copies the descriptive fields of `hit`; all scores start at zero.
	pub fn from_hit(hit: SearchHit) -> Self {
		let content_preview = preview::content_preview(&hit.body, PREVIEW_MAX_CHARS);

		Self {
			doc_id: hit.doc_id,
			title: hit.title,
			content: hit.body,
			source_type: hit.source_type,
			source_id: hit.source_id,
			created_at: hit.created_at,
			updated_at: hit.updated_at,
			permissions: hit.permissions,
			metadata: hit.metadata,
			semantic_score: 0.0,
			keyword_score: 0.0,
			combined_score: 0.0,
			content_preview,
			rank: 0,
		}
	}
}
