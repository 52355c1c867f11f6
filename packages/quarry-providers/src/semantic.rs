use std::collections::BTreeSet;

use color_eyre::Result;
use serde_json::Value;

use quarry_config::BackendConfig;
use quarry_domain::SearchHit;

#[derive(Debug, Clone)]
pub struct SemanticQuery<'a> {
	pub query: &'a str,
	pub top_k: u32,
	pub source_filter: Option<&'a str>,
	pub permissions: &'a BTreeSet<String>,
	pub score_threshold: f32,
}

pub async fn search(cfg: &BackendConfig, req: &SemanticQuery<'_>) -> Result<Vec<SearchHit>> {
	crate::post_search(cfg, request_body(req)).await
}

fn request_body(req: &SemanticQuery<'_>) -> Value {
	serde_json::json!({
		"query": req.query,
		"top_k": req.top_k,
		"source_filter": req.source_filter,
		"permissions": req.permissions,
		"score_threshold": req.score_threshold,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn body_carries_every_contract_argument() {
		let permissions = BTreeSet::from(["team:eng".to_string()]);
		let req = SemanticQuery {
			query: "vacation policy",
			top_k: 10,
			source_filter: Some("confluence"),
			permissions: &permissions,
			score_threshold: 0.25,
		};
		let body = request_body(&req);

		assert_eq!(body["query"], "vacation policy");
		assert_eq!(body["top_k"], 10);
		assert_eq!(body["source_filter"], "confluence");
		assert_eq!(body["permissions"], serde_json::json!(["team:eng"]));
		assert_eq!(body["score_threshold"], 0.25);
	}

	#[test]
	fn absent_source_filter_is_null() {
		let permissions = BTreeSet::new();
		let req = SemanticQuery {
			query: "q",
			top_k: 1,
			source_filter: None,
			permissions: &permissions,
			score_threshold: 0.0,
		};

		assert!(request_body(&req)["source_filter"].is_null());
	}
}
