pub mod fusion;
pub mod health;
pub mod invoker;
pub mod ranking;
pub mod result;
pub mod search;
pub mod stats;

mod error;

pub use error::{Error, Result};
pub use fusion::FusionWeights;
pub use health::{BackendHealthReport, HealthReport, HealthStatus};
pub use invoker::{BackendFailure, BackendInvoker, BackendKind, BackendRequest, HybridOutcome};
pub use quarry_providers::{keyword::KeywordQuery, semantic::SemanticQuery};
pub use result::HybridResult;
pub use search::{SearchMode, SearchRequest, SearchResponse, SearchStrategy};
pub use stats::{SearchStats, StatsSnapshot};

use std::{future::Future, pin::Pin, sync::Arc};

use quarry_config::{BackendConfig, Config};
use quarry_domain::{BackendHealth, SearchHit};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Embedding-similarity retrieval collaborator.
///
/// Hits come back ordered by descending relevance with scores in `[0, 1]`. An empty list means
/// nothing cleared the score threshold.
pub trait SemanticBackend
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		cfg: &'a BackendConfig,
		req: &'a SemanticQuery<'a>,
	) -> BoxFuture<'a, color_eyre::Result<Vec<SearchHit>>>;

	fn health_check<'a>(
		&'a self,
		cfg: &'a BackendConfig,
	) -> BoxFuture<'a, color_eyre::Result<BackendHealth>>;
}

/// Term-relevance retrieval collaborator.
///
/// Scores are unbounded positive floats on a backend-defined scale.
pub trait KeywordBackend
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		cfg: &'a BackendConfig,
		req: &'a KeywordQuery<'a>,
	) -> BoxFuture<'a, color_eyre::Result<Vec<SearchHit>>>;

	fn health_check<'a>(
		&'a self,
		cfg: &'a BackendConfig,
	) -> BoxFuture<'a, color_eyre::Result<BackendHealth>>;
}

#[derive(Clone)]
pub struct Backends {
	pub semantic: Arc<dyn SemanticBackend>,
	pub keyword: Arc<dyn KeywordBackend>,
}

/// Hybrid retrieval entry point.
///
/// Owns the immutable configuration, both backend handles (through the invoker), and the
/// per-instance performance counters.
pub struct QuarryService {
	pub cfg: Config,
	invoker: BackendInvoker,
	stats: SearchStats,
}

struct HttpBackends;

impl SemanticBackend for HttpBackends {
	fn search<'a>(
		&'a self,
		cfg: &'a BackendConfig,
		req: &'a SemanticQuery<'a>,
	) -> BoxFuture<'a, color_eyre::Result<Vec<SearchHit>>> {
		Box::pin(quarry_providers::semantic::search(cfg, req))
	}

	fn health_check<'a>(
		&'a self,
		cfg: &'a BackendConfig,
	) -> BoxFuture<'a, color_eyre::Result<BackendHealth>> {
		Box::pin(quarry_providers::health::check(cfg))
	}
}

impl KeywordBackend for HttpBackends {
	fn search<'a>(
		&'a self,
		cfg: &'a BackendConfig,
		req: &'a KeywordQuery<'a>,
	) -> BoxFuture<'a, color_eyre::Result<Vec<SearchHit>>> {
		Box::pin(quarry_providers::keyword::search(cfg, req))
	}

	fn health_check<'a>(
		&'a self,
		cfg: &'a BackendConfig,
	) -> BoxFuture<'a, color_eyre::Result<BackendHealth>> {
		Box::pin(quarry_providers::health::check(cfg))
	}
}

impl Backends {
	pub fn new(semantic: Arc<dyn SemanticBackend>, keyword: Arc<dyn KeywordBackend>) -> Self {
		Self { semantic, keyword }
	}
}

impl Default for Backends {
	fn default() -> Self {
		let backend = Arc::new(HttpBackends);
		Self { semantic: backend.clone(), keyword: backend }
	}
}

impl QuarryService {
	pub fn new(cfg: Config) -> Result<Self> {
		Self::with_backends(cfg, Backends::default())
	}

	pub fn with_backends(cfg: Config, backends: Backends) -> Result<Self> {
		quarry_config::validate(&cfg)?;

		let invoker = BackendInvoker::new(&cfg, backends);

		Ok(Self { cfg, invoker, stats: SearchStats::default() })
	}

	pub fn invoker(&self) -> &BackendInvoker {
		&self.invoker
	}

	pub fn stats(&self) -> StatsSnapshot {
		self.stats.snapshot()
	}

	/// Lets a caching layer in front of the engine account for its lookups in the shared stats.
	pub fn record_cache_lookup(&self, hit: bool) {
		self.stats.record_cache_lookup(hit);
	}
}
