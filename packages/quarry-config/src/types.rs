use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub service: Service,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub classifier: Classifier,
	pub backends: Backends,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Service {
	pub log_level: String,
}
impl Default for Service {
	fn default() -> Self {
		Self { log_level: "info".to_string() }
	}
}

/// Fusion, deadline, and recency policy shared by every search call.
///
/// Loaded once at startup and never mutated afterwards. The two weights are independent
/// multipliers and do not need to sum to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Search {
	pub semantic_weight: f32,
	pub keyword_weight: f32,
	/// Shared budget for the pair of backend calls on the hybrid path.
	pub deadline_ms: u64,
	pub recency_window_days: i64,
	pub recency_factor: f32,
	pub default_limit: u32,
	/// Each backend is asked for `limit * candidate_multiplier` hits.
	pub candidate_multiplier: u32,
	pub semantic_score_threshold: f32,
	pub health_timeout_ms: u64,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			semantic_weight: 0.7,
			keyword_weight: 0.3,
			deadline_ms: 200,
			recency_window_days: 30,
			recency_factor: 1.1,
			default_limit: 5,
			candidate_multiplier: 2,
			semantic_score_threshold: 0.0,
			health_timeout_ms: 1_000,
		}
	}
}

/// Tuning for the query classifier.
///
/// `margin` is how far one indicator count must exceed the other before the query is routed to a
/// single backend. `exact_match_bonus` is added to the lexical count for quoted phrases, email
/// addresses, and URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Classifier {
	pub margin: u32,
	pub exact_match_bonus: u32,
}
impl Default for Classifier {
	fn default() -> Self {
		Self { margin: 1, exact_match_bonus: 2 }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Backends {
	pub semantic: BackendConfig,
	pub keyword: BackendConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
	pub backend_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	#[serde(default = "default_health_path")]
	pub health_path: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

fn default_health_path() -> String {
	"/health".to_string()
}
