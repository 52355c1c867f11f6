use std::collections::BTreeSet;

use serde_json::{Map, Value};
use time::OffsetDateTime;

/// One document returned by a retrieval backend.
///
/// `score` only has meaning relative to other hits from the same backend. `doc_id` is unique
/// within a single backend's result list for one query.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SearchHit {
	pub doc_id: String,
	#[serde(default)]
	pub title: String,
	#[serde(default, alias = "content")]
	pub body: String,
	#[serde(default)]
	pub source_type: String,
	#[serde(default)]
	pub source_id: String,
	#[serde(default, with = "crate::time_serde::option")]
	pub created_at: Option<OffsetDateTime>,
	#[serde(default, with = "crate::time_serde::option")]
	pub updated_at: Option<OffsetDateTime>,
	#[serde(default)]
	pub permissions: BTreeSet<String>,
	#[serde(default)]
	pub metadata: Map<String, Value>,
	pub score: f32,
}
impl SearchHit {
	pub fn new(doc_id: impl Into<String>, score: f32) -> Self {
		Self {
			doc_id: doc_id.into(),
			title: String::new(),
			body: String::new(),
			source_type: String::new(),
			source_id: String::new(),
			created_at: None,
			updated_at: None,
			permissions: BTreeSet::new(),
			metadata: Map::new(),
			score,
		}
	}
}
