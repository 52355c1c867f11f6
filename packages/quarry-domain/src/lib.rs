pub mod backend;
pub mod classifier;
pub mod hit;
pub mod preview;
pub mod recency;
pub mod time_serde;

pub use backend::BackendHealth;
pub use classifier::QueryIntent;
pub use hit::SearchHit;
