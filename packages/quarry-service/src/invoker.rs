use std::{collections::BTreeSet, fmt, time::Duration};

use quarry_config::{BackendConfig, Config, Search};
use quarry_domain::{BackendHealth, SearchHit, recency};

use crate::{Backends, BackendHealthReport, KeywordQuery, SemanticQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
	Semantic,
	Keyword,
}
impl BackendKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Semantic => "semantic",
			Self::Keyword => "keyword",
		}
	}
}
impl fmt::Display for BackendKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Why a backend produced no usable answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendFailure {
	#[error("{backend} backend is unavailable: {message}")]
	Unavailable { backend: BackendKind, message: String },
	#[error("{backend} backend did not answer within {timeout_ms}ms.")]
	TimedOut { backend: BackendKind, timeout_ms: u64 },
}
impl BackendFailure {
	pub fn backend(&self) -> BackendKind {
		match self {
			Self::Unavailable { backend, .. } | Self::TimedOut { backend, .. } => *backend,
		}
	}
}

pub type BackendOutcome = Result<Vec<SearchHit>, BackendFailure>;

/// Arguments shared by every backend call of one search.
#[derive(Debug, Clone, Copy)]
pub struct BackendRequest<'a> {
	pub query: &'a str,
	pub permissions: &'a BTreeSet<String>,
	pub source_filter: Option<&'a str>,
	/// Number of hits to ask each backend for.
	pub limit: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HybridOutcome {
	/// Both calls settled before the deadline. A failed side is already an empty list.
	Completed { semantic: Vec<SearchHit>, keyword: Vec<SearchHit> },
	/// The pair was abandoned; the caller should fall back to semantic-only.
	DeadlineExceeded,
}

/// Wraps both retrieval collaborators behind calls that never fail.
pub struct BackendInvoker {
	backends: Backends,
	semantic_cfg: BackendConfig,
	keyword_cfg: BackendConfig,
	search: Search,
}
impl BackendInvoker {
	pub fn new(cfg: &Config, backends: Backends) -> Self {
		Self {
			backends,
			semantic_cfg: cfg.backends.semantic.clone(),
			keyword_cfg: cfg.backends.keyword.clone(),
			search: cfg.search.clone(),
		}
	}

	pub async fn semantic_search(&self, req: &BackendRequest<'_>) -> Vec<SearchHit> {
		recover(self.fetch_semantic(req).await)
	}

	/// Keyword hits, optionally with each raw score passed through the recency booster.
	pub async fn keyword_search(
		&self,
		req: &BackendRequest<'_>,
		apply_recency: bool,
	) -> Vec<SearchHit> {
		let mut hits = recover(self.fetch_keyword(req).await);

		if apply_recency {
			for hit in &mut hits {
				hit.score = recency::boost(
					hit.score,
					hit.created_at,
					self.search.recency_window_days,
					self.search.recency_factor,
				);
			}
		}

		hits
	}

	/// Runs both backends concurrently under one shared deadline.
	///
	/// The deadline bounds the pair: when it expires both in-flight calls are dropped together and
	/// any late answer is discarded.
	pub async fn invoke_hybrid(&self, req: &BackendRequest<'_>, deadline: Duration) -> HybridOutcome {
		let pair = async { tokio::join!(self.fetch_semantic(req), self.fetch_keyword(req)) };

		match tokio::time::timeout(deadline, pair).await {
			Ok((semantic, keyword)) =>
				HybridOutcome::Completed { semantic: recover(semantic), keyword: recover(keyword) },
			Err(_) => {
				tracing::debug!(
					deadline_ms = deadline.as_millis() as u64,
					"Hybrid backend pair abandoned at deadline."
				);

				HybridOutcome::DeadlineExceeded
			},
		}
	}

	pub async fn fetch_semantic(&self, req: &BackendRequest<'_>) -> BackendOutcome {
		let query = SemanticQuery {
			query: req.query,
			top_k: req.limit,
			source_filter: req.source_filter,
			permissions: req.permissions,
			score_threshold: self.search.semantic_score_threshold,
		};

		self.backends.semantic.search(&self.semantic_cfg, &query).await.map_err(|err| {
			BackendFailure::Unavailable { backend: BackendKind::Semantic, message: err.to_string() }
		})
	}

	pub async fn fetch_keyword(&self, req: &BackendRequest<'_>) -> BackendOutcome {
		let query = KeywordQuery {
			query: req.query,
			permissions: req.permissions,
			source_filter: req.source_filter,
			limit: req.limit,
			offset: 0,
		};

		self.backends.keyword.search(&self.keyword_cfg, &query).await.map_err(|err| {
			BackendFailure::Unavailable { backend: BackendKind::Keyword, message: err.to_string() }
		})
	}

	/// Probes both backends concurrently, each bounded by `timeout`.
	pub async fn probe_health(
		&self,
		timeout: Duration,
	) -> (BackendHealthReport, BackendHealthReport) {
		let semantic = async {
			let probe = self.backends.semantic.health_check(&self.semantic_cfg);

			settle_probe(BackendKind::Semantic, timeout, tokio::time::timeout(timeout, probe).await)
		};
		let keyword = async {
			let probe = self.backends.keyword.health_check(&self.keyword_cfg);

			settle_probe(BackendKind::Keyword, timeout, tokio::time::timeout(timeout, probe).await)
		};
		let (semantic, keyword) = tokio::join!(semantic, keyword);

		(
			BackendHealthReport::from_probe(&self.semantic_cfg.backend_id, semantic),
			BackendHealthReport::from_probe(&self.keyword_cfg.backend_id, keyword),
		)
	}
}

/// Failure policy for backend calls: a failed backend contributes no hits.
pub fn recover(outcome: BackendOutcome) -> Vec<SearchHit> {
	match outcome {
		Ok(hits) => hits,
		Err(err) => {
			tracing::warn!(
				backend = err.backend().as_str(),
				error = %err,
				"Backend call failed; continuing without its hits."
			);

			Vec::new()
		},
	}
}

fn settle_probe(
	backend: BackendKind,
	timeout: Duration,
	probe: Result<color_eyre::Result<BackendHealth>, tokio::time::error::Elapsed>,
) -> Result<BackendHealth, BackendFailure> {
	let failure = match probe {
		Ok(Ok(health)) => return Ok(health),
		Ok(Err(err)) => BackendFailure::Unavailable { backend, message: err.to_string() },
		Err(_) => BackendFailure::TimedOut { backend, timeout_ms: timeout.as_millis() as u64 },
	};

	tracing::warn!(backend = backend.as_str(), error = %failure, "Backend health check failed.");

	Err(failure)
}
