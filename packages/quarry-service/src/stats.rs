use std::{
	sync::atomic::{AtomicU64, Ordering},
	time::Duration,
};

/// Monotonic performance counters owned by one service instance.
#[derive(Debug, Default)]
pub struct SearchStats {
	total_searches: AtomicU64,
	total_latency_ms: AtomicU64,
	cache_hits: AtomicU64,
	cache_misses: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StatsSnapshot {
	pub total_searches: u64,
	pub total_latency_ms: u64,
	pub cache_hits: u64,
	pub cache_misses: u64,
	pub average_latency_ms: f64,
}

impl SearchStats {
	pub fn record_search(&self, elapsed: Duration) {
		let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

		self.total_searches.fetch_add(1, Ordering::Relaxed);
		self.total_latency_ms.fetch_add(elapsed_ms, Ordering::Relaxed);
	}

	pub fn record_cache_lookup(&self, hit: bool) {
		let counter = if hit { &self.cache_hits } else { &self.cache_misses };

		counter.fetch_add(1, Ordering::Relaxed);
	}

	pub fn snapshot(&self) -> StatsSnapshot {
		let total_searches = self.total_searches.load(Ordering::Relaxed);
		let total_latency_ms = self.total_latency_ms.load(Ordering::Relaxed);
		let average_latency_ms =
			if total_searches == 0 { 0.0 } else { total_latency_ms as f64 / total_searches as f64 };

		StatsSnapshot {
			total_searches,
			total_latency_ms,
			cache_hits: self.cache_hits.load(Ordering::Relaxed),
			cache_misses: self.cache_misses.load(Ordering::Relaxed),
			average_latency_ms,
		}
	}
}
