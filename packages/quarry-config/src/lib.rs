mod error;
mod types;

pub use error::{Error, Result};
pub use types::{BackendConfig, Backends, Classifier, Config, Search, Service};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	validate_search(&cfg.search)?;

	for (label, backend) in
		[("backends.semantic", &cfg.backends.semantic), ("backends.keyword", &cfg.backends.keyword)]
	{
		validate_backend(label, backend)?;
	}

	Ok(())
}

pub fn validate_search(search: &Search) -> Result<()> {
	for (label, weight) in [
		("search.semantic_weight", search.semantic_weight),
		("search.keyword_weight", search.keyword_weight),
	] {
		if !weight.is_finite() {
			return Err(Error::Validation { message: format!("{label} must be a finite number.") });
		}
		if weight < 0.0 {
			return Err(Error::Validation { message: format!("{label} must be zero or greater.") });
		}
	}

	if search.semantic_weight == 0.0 && search.keyword_weight == 0.0 {
		return Err(Error::Validation {
			message: "search.semantic_weight and search.keyword_weight must not both be zero."
				.to_string(),
		});
	}
	if search.deadline_ms == 0 {
		return Err(Error::Validation {
			message: "search.deadline_ms must be greater than zero.".to_string(),
		});
	}
	if search.recency_window_days < 0 {
		return Err(Error::Validation {
			message: "search.recency_window_days must be zero or greater.".to_string(),
		});
	}
	if !search.recency_factor.is_finite() {
		return Err(Error::Validation {
			message: "search.recency_factor must be a finite number.".to_string(),
		});
	}
	if search.recency_factor <= 1.0 {
		return Err(Error::Validation {
			message: "search.recency_factor must be greater than 1.0.".to_string(),
		});
	}
	if search.default_limit == 0 {
		return Err(Error::Validation {
			message: "search.default_limit must be greater than zero.".to_string(),
		});
	}
	if search.candidate_multiplier == 0 {
		return Err(Error::Validation {
			message: "search.candidate_multiplier must be greater than zero.".to_string(),
		});
	}
	if !search.semantic_score_threshold.is_finite() {
		return Err(Error::Validation {
			message: "search.semantic_score_threshold must be a finite number.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&search.semantic_score_threshold) {
		return Err(Error::Validation {
			message: "search.semantic_score_threshold must be in the range 0.0-1.0.".to_string(),
		});
	}
	if search.health_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "search.health_timeout_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn validate_backend(label: &str, backend: &BackendConfig) -> Result<()> {
	for (field, value) in [
		("backend_id", &backend.backend_id),
		("api_base", &backend.api_base),
		("api_key", &backend.api_key),
		("path", &backend.path),
		("health_path", &backend.health_path),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label}.{field} must be non-empty.") });
		}
	}

	if !backend.api_base.starts_with("http://") && !backend.api_base.starts_with("https://") {
		return Err(Error::Validation {
			message: format!("{label}.api_base must start with http:// or https://."),
		});
	}
	if backend.timeout_ms == 0 {
		return Err(Error::Validation {
			message: format!("{label}.timeout_ms must be greater than zero."),
		});
	}
	if backend.default_headers.values().any(|value| !value.is_string()) {
		return Err(Error::Validation {
			message: format!("{label}.default_headers values must be strings."),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for backend in [&mut cfg.backends.semantic, &mut cfg.backends.keyword] {
		let trimmed = backend.api_base.trim().trim_end_matches('/');

		if trimmed.len() != backend.api_base.len() {
			backend.api_base = trimmed.to_string();
		}
	}

	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
