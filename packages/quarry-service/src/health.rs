use std::time::Duration;

use quarry_config::{Classifier, Search};
use quarry_domain::BackendHealth;

use crate::{BackendFailure, QuarryService, StatsSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
	Healthy,
	Degraded,
	Unhealthy,
}
impl HealthStatus {
	/// Healthy only when both backends are; unhealthy only when neither is.
	pub fn aggregate(semantic_healthy: bool, keyword_healthy: bool) -> Self {
		match (semantic_healthy, keyword_healthy) {
			(true, true) => Self::Healthy,
			(false, false) => Self::Unhealthy,
			_ => Self::Degraded,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Healthy => "healthy",
			Self::Degraded => "degraded",
			Self::Unhealthy => "unhealthy",
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BackendHealthReport {
	pub backend_id: String,
	pub healthy: bool,
	/// Status string as reported by the backend, or `unreachable` when the probe failed.
	pub status: String,
	pub document_count: Option<u64>,
	pub error: Option<String>,
}
impl BackendHealthReport {
	pub fn from_probe(backend_id: &str, probe: Result<BackendHealth, BackendFailure>) -> Self {
		match probe {
			Ok(health) => Self {
				backend_id: backend_id.to_string(),
				healthy: health.is_healthy(),
				status: health.status,
				document_count: Some(health.document_count),
				error: None,
			},
			Err(err) => Self {
				backend_id: backend_id.to_string(),
				healthy: false,
				status: "unreachable".to_string(),
				document_count: None,
				error: Some(err.to_string()),
			},
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HealthReport {
	pub status: HealthStatus,
	pub semantic: BackendHealthReport,
	pub keyword: BackendHealthReport,
	pub search: Search,
	pub classifier: Classifier,
	pub stats: StatsSnapshot,
}

impl QuarryService {
	/// Probes both backends and reports aggregate health with the active policy and counters.
	///
	/// Never fails. A probe that errors or exceeds `search.health_timeout_ms` marks its backend
	/// unhealthy.
	pub async fn health(&self) -> HealthReport {
		let timeout = Duration::from_millis(self.cfg.search.health_timeout_ms);
		let (semantic, keyword) = self.invoker.probe_health(timeout).await;
		let status = HealthStatus::aggregate(semantic.healthy, keyword.healthy);

		if status != HealthStatus::Healthy {
			tracing::warn!(
				status = status.as_str(),
				semantic = semantic.status.as_str(),
				keyword = keyword.status.as_str(),
				"Retrieval backends are not fully healthy."
			);
		}

		HealthReport {
			status,
			semantic,
			keyword,
			search: self.cfg.search.clone(),
			classifier: self.cfg.classifier,
			stats: self.stats.snapshot(),
		}
	}
}
