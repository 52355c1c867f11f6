pub mod health;
pub mod keyword;
pub mod semantic;

use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::{
	Client,
	header::{AUTHORIZATION, HeaderMap, HeaderName},
};
use serde_json::{Map, Value};

use quarry_config::BackendConfig;
use quarry_domain::SearchHit;

pub fn auth_headers(api_key: &str, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();
	headers.insert(AUTHORIZATION, format!("Bearer {api_key}").parse()?);
	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(eyre::eyre!("Default header values must be strings."));
		};
		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}
	Ok(headers)
}

pub(crate) fn client(cfg: &BackendConfig) -> Result<Client> {
	Ok(Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?)
}

pub(crate) async fn post_search(cfg: &BackendConfig, body: Value) -> Result<Vec<SearchHit>> {
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let res = client(cfg)?
		.post(url)
		.headers(auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_hits(json)
}

/// Decodes `{"results": [...]}` (or `{"hits": [...]}`) into hits, keeping backend order.
pub fn parse_hits(json: Value) -> Result<Vec<SearchHit>> {
	let items = json
		.get("results")
		.or_else(|| json.get("hits"))
		.and_then(|v| v.as_array())
		.ok_or_else(|| eyre::eyre!("Search response is missing results array."))?;

	let mut hits = Vec::with_capacity(items.len());
	for (index, item) in items.iter().enumerate() {
		let hit: SearchHit = serde_json::from_value(item.clone())
			.map_err(|err| eyre::eyre!("Search result {index} is malformed: {err}"))?;
		if !hit.score.is_finite() {
			return Err(eyre::eyre!("Search result {index} has a non-finite score."));
		}
		hits.push(hit);
	}

	Ok(hits)
}
