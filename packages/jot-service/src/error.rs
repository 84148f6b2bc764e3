pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Denied: {message}")]
	Denied { message: String },
	#[error("Upstream error: {message}")]
	Upstream { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Internal error: {message}")]
	Internal { message: String },
}
impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<jot_storage::Error> for Error {
	fn from(err: jot_storage::Error) -> Self {
		match err {
			jot_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			jot_storage::Error::NotFound(message) => Self::NotFound { message },
		}
	}
}

impl From<reqwest::Error> for Error {
	fn from(err: reqwest::Error) -> Self {
		Self::Upstream { message: err.to_string() }
	}
}
