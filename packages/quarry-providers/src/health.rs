use color_eyre::{Result, eyre};
use serde_json::Value;

use quarry_config::BackendConfig;
use quarry_domain::BackendHealth;

pub async fn check(cfg: &BackendConfig) -> Result<BackendHealth> {
	let url = format!("{}{}", cfg.api_base, cfg.health_path);
	let res = crate::client(cfg)?
		.get(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_health_response(json)
}

fn parse_health_response(json: Value) -> Result<BackendHealth> {
	if json.get("status").and_then(|v| v.as_str()).is_none() {
		return Err(eyre::eyre!("Health response is missing status."));
	}

	Ok(serde_json::from_value(json)?)
}
