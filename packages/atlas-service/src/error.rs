pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{field}: {message}")]
	Validation { field: String, message: String },
	#[error("Store unavailable: {message}")]
	StoreUnavailable { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
}
impl Error {
	pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Validation { field: field.into(), message: message.into() }
	}

	/// Stable code carried in response envelopes.
	pub fn code(&self) -> &'static str {
		match self {
			Self::Validation { .. } => "ValidationError",
			Self::StoreUnavailable { .. } => "StoreUnavailable",
			Self::NotFound { .. } => "NotFound",
		}
	}
}

impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		Self::StoreUnavailable { message: err.to_string() }
	}
}

impl From<atlas_storage::Error> for Error {
	fn from(err: atlas_storage::Error) -> Self {
		match err {
			atlas_storage::Error::Sqlx(inner) => Self::StoreUnavailable { message: inner.to_string() },
			atlas_storage::Error::InvalidArgument(message) =>
				Self::Validation { field: "$".to_string(), message },
			atlas_storage::Error::NotFound(message) => Self::NotFound { message },
		}
	}
}
