use std::collections::BTreeSet;

use color_eyre::Result;
use serde_json::Value;

use quarry_config::BackendConfig;
use quarry_domain::SearchHit;

#[derive(Debug, Clone)]
pub struct KeywordQuery<'a> {
	pub query: &'a str,
	pub permissions: &'a BTreeSet<String>,
	pub source_filter: Option<&'a str>,
	pub limit: u32,
	pub offset: u32,
}

pub async fn search(cfg: &BackendConfig, req: &KeywordQuery<'_>) -> Result<Vec<SearchHit>> {
	crate::post_search(cfg, request_body(req)).await
}

fn request_body(req: &KeywordQuery<'_>) -> Value {
	serde_json::json!({
		"query": req.query,
		"permissions": req.permissions,
		"source_filter": req.source_filter,
		"limit": req.limit,
		"offset": req.offset,
	})
}
