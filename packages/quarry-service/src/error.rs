pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid configuration: {message}")]
	InvalidConfiguration { message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
}
impl From<quarry_config::Error> for Error {
	fn from(err: quarry_config::Error) -> Self {
		Self::InvalidConfiguration { message: err.to_string() }
	}
}
