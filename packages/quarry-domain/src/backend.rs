/// Health probe answer from a retrieval backend.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BackendHealth {
	pub status: String,
	#[serde(default, alias = "documentCount")]
	pub document_count: u64,
}
impl BackendHealth {
	pub fn healthy(document_count: u64) -> Self {
		Self { status: "healthy".to_string(), document_count }
	}

	pub fn is_healthy(&self) -> bool {
		matches!(self.status.trim().to_ascii_lowercase().as_str(), "healthy" | "ok" | "green")
	}
}
