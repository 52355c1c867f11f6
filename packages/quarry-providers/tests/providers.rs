use reqwest::header::AUTHORIZATION;
use serde_json::Map;

#[test]
fn builds_bearer_auth_header() {
	let headers =
		quarry_providers::auth_headers("secret", &Map::new()).expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");
	assert_eq!(value, "Bearer secret");
}

#[test]
fn merges_default_headers() {
	let mut defaults = Map::new();
	defaults.insert("x-client".to_string(), serde_json::json!("quarry"));

	let headers =
		quarry_providers::auth_headers("secret", &defaults).expect("Failed to build headers.");
	assert_eq!(headers.get("x-client").expect("Missing default header."), "quarry");
}

#[test]
fn rejects_non_string_default_headers() {
	let mut defaults = Map::new();
	defaults.insert("x-retries".to_string(), serde_json::json!(3));

	assert!(quarry_providers::auth_headers("secret", &defaults).is_err());
}
