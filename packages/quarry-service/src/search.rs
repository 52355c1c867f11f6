use std::{collections::BTreeSet, str::FromStr, time::Duration};

use time::OffsetDateTime;
use tokio::time::Instant;

use quarry_domain::{QueryIntent, SearchHit, classifier};

use crate::{
	BackendRequest, Error, HybridOutcome, HybridResult, QuarryService,
	fusion::{self, FusionWeights},
	ranking::{self, RecencyPolicy},
};

/// Permission scope used when the caller does not supply one.
pub const WILDCARD_PERMISSION: &str = "*";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
	Semantic,
	Keyword,
	Hybrid,
	/// Let the query classifier pick the backend(s).
	#[default]
	Auto,
}
impl SearchMode {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Semantic => "semantic",
			Self::Keyword => "keyword",
			Self::Hybrid => "hybrid",
			Self::Auto => "auto",
		}
	}
}
impl FromStr for SearchMode {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"semantic" => Ok(Self::Semantic),
			"keyword" => Ok(Self::Keyword),
			"hybrid" => Ok(Self::Hybrid),
			"auto" => Ok(Self::Auto),
			other => Err(Error::InvalidRequest {
				message: format!(
					"mode must be one of semantic, keyword, hybrid, or auto; got {other:?}."
				),
			}),
		}
	}
}

/// The retrieval plan that actually ran for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
	SemanticOnly,
	KeywordOnly,
	Hybrid,
	/// Nothing to search for; no backend was called.
	Skipped,
}
impl SearchStrategy {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::SemanticOnly => "semantic_only",
			Self::KeywordOnly => "keyword_only",
			Self::Hybrid => "hybrid",
			Self::Skipped => "skipped",
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SearchRequest {
	pub query: String,
	/// Passed verbatim to both backends. `None` means the wildcard scope.
	#[serde(default)]
	pub permissions: Option<BTreeSet<String>>,
	#[serde(default)]
	pub source_filter: Option<String>,
	/// Maximum results to return. `None` uses `search.default_limit`; `Some(0)` is raised to 1.
	#[serde(default)]
	pub limit: Option<u32>,
	#[serde(default = "default_include_recency_boost")]
	pub include_recency_boost: bool,
	#[serde(default)]
	pub mode: SearchMode,
}
impl SearchRequest {
	pub fn new(query: impl Into<String>) -> Self {
		Self {
			query: query.into(),
			permissions: None,
			source_filter: None,
			limit: None,
			include_recency_boost: default_include_recency_boost(),
			mode: SearchMode::Auto,
		}
	}

	pub fn with_mode(mut self, mode: SearchMode) -> Self {
		self.mode = mode;

		self
	}

	pub fn with_limit(mut self, limit: u32) -> Self {
		self.limit = Some(limit);

		self
	}

	pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.permissions = Some(permissions.into_iter().map(Into::into).collect());

		self
	}

	pub fn with_source_filter(mut self, source_filter: impl Into<String>) -> Self {
		self.source_filter = Some(source_filter.into());

		self
	}

	pub fn without_recency_boost(mut self) -> Self {
		self.include_recency_boost = false;

		self
	}
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SearchResponse {
	pub strategy: SearchStrategy,
	/// Classifier verdict, present only when the request used `auto` mode.
	pub intent: Option<QueryIntent>,
	/// The hybrid pair missed its deadline and the semantic-only path answered instead.
	pub fell_back: bool,
	pub items: Vec<HybridResult>,
}
impl SearchResponse {
	fn skipped() -> Self {
		Self { strategy: SearchStrategy::Skipped, intent: None, fell_back: false, items: Vec::new() }
	}
}

struct Plan {
	strategy: SearchStrategy,
	intent: Option<QueryIntent>,
}

impl QuarryService {
	/// Runs one hybrid retrieval.
	///
	/// Never fails: backend errors, empty backends, and a missed deadline all degrade to fewer
	/// results. Every call, including an empty query, is counted in the stats.
	pub async fn search(&self, req: SearchRequest) -> SearchResponse {
		let started = Instant::now();
		let response = self.execute(&req).await;
		let elapsed = started.elapsed();

		self.stats.record_search(elapsed);

		tracing::debug!(
			strategy = response.strategy.as_str(),
			intent = response.intent.map(QueryIntent::as_str),
			fell_back = response.fell_back,
			results = response.items.len(),
			elapsed_ms = elapsed.as_millis() as u64,
			"Search finished."
		);

		response
	}

	async fn execute(&self, req: &SearchRequest) -> SearchResponse {
		let query = req.query.trim();

		if query.is_empty() {
			return SearchResponse::skipped();
		}

		let search_cfg = &self.cfg.search;
		let limit = req.limit.unwrap_or(search_cfg.default_limit).max(1);
		let candidates = limit.saturating_mul(search_cfg.candidate_multiplier);
		let wildcard;
		let permissions = match req.permissions.as_ref() {
			Some(permissions) => permissions,
			None => {
				wildcard = BTreeSet::from([WILDCARD_PERMISSION.to_string()]);

				&wildcard
			},
		};
		let backend_req = BackendRequest {
			query,
			permissions,
			source_filter: req.source_filter.as_deref(),
			limit: candidates,
		};
		let plan = self.plan(query, req.mode);
		let (strategy, fell_back, semantic, keyword) = self.retrieve(&backend_req, plan.strategy).await;
		let mut items = fusion::fuse(semantic, keyword, FusionWeights::from_config(search_cfg));

		if req.include_recency_boost {
			let policy = RecencyPolicy::from_config(search_cfg, OffsetDateTime::now_utc());

			ranking::apply_recency(&mut items, &policy);
		}

		let items = ranking::rank_results(items, limit as usize);

		SearchResponse { strategy, intent: plan.intent, fell_back, items }
	}

	fn plan(&self, query: &str, mode: SearchMode) -> Plan {
		match mode {
			SearchMode::Semantic => Plan { strategy: SearchStrategy::SemanticOnly, intent: None },
			SearchMode::Keyword => Plan { strategy: SearchStrategy::KeywordOnly, intent: None },
			SearchMode::Hybrid => Plan { strategy: SearchStrategy::Hybrid, intent: None },
			SearchMode::Auto => {
				let intent = classifier::classify_with(query, &self.cfg.classifier);
				let strategy = match intent {
					QueryIntent::Semantic => SearchStrategy::SemanticOnly,
					QueryIntent::Keyword => SearchStrategy::KeywordOnly,
					QueryIntent::Mixed => SearchStrategy::Hybrid,
				};

				Plan { strategy, intent: Some(intent) }
			},
		}
	}

	async fn retrieve(
		&self,
		req: &BackendRequest<'_>,
		strategy: SearchStrategy,
	) -> (SearchStrategy, bool, Vec<SearchHit>, Vec<SearchHit>) {
		match strategy {
			SearchStrategy::SemanticOnly =>
				(strategy, false, self.invoker.semantic_search(req).await, Vec::new()),
			SearchStrategy::KeywordOnly =>
				(strategy, false, Vec::new(), self.invoker.keyword_search(req, false).await),
			SearchStrategy::Hybrid => {
				let deadline = Duration::from_millis(self.cfg.search.deadline_ms);

				match self.invoker.invoke_hybrid(req, deadline).await {
					HybridOutcome::Completed { semantic, keyword } =>
						(SearchStrategy::Hybrid, false, semantic, keyword),
					HybridOutcome::DeadlineExceeded => {
						tracing::warn!(
							deadline_ms = self.cfg.search.deadline_ms,
							"Hybrid search missed its deadline; falling back to semantic-only."
						);

						let semantic = self.invoker.semantic_search(req).await;

						(SearchStrategy::SemanticOnly, true, semantic, Vec::new())
					},
				}
			},
			SearchStrategy::Skipped => (strategy, false, Vec::new(), Vec::new()),
		}
	}
}

fn default_include_recency_boost() -> bool {
	true
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_modes_case_insensitively() {
		assert_eq!(" Hybrid ".parse::<SearchMode>().ok(), Some(SearchMode::Hybrid));
		assert_eq!("KEYWORD".parse::<SearchMode>().ok(), Some(SearchMode::Keyword));
		assert!(matches!("fuzzy".parse::<SearchMode>(), Err(Error::InvalidRequest { .. })));
	}

	#[test]
	fn request_defaults_from_json() {
		let req: SearchRequest =
			serde_json::from_value(serde_json::json!({ "query": "release notes" }))
				.expect("Failed to parse request.");

		assert_eq!(req, SearchRequest::new("release notes"));
		assert!(req.include_recency_boost);
		assert_eq!(req.mode, SearchMode::Auto);
	}
}
