use serde::{Deserialize, Serialize};

use crate::{Error, assemble::PatternResult, filter::Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeStatus {
	Ok,
	Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
	pub code: String,
	pub message: String,
}
impl From<&Error> for ErrorBody {
	fn from(err: &Error) -> Self {
		Self { code: err.code().to_string(), message: err.to_string() }
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEnvelope {
	pub status: EnvelopeStatus,
	pub error: Option<ErrorBody>,
	pub limit: u32,
	pub offset: u64,
	pub returned_count: usize,
	pub total_considered_hint: usize,
	pub results: Vec<PatternResult>,
}
impl SearchEnvelope {
	pub fn success(page: Page, total_considered: usize, results: Vec<PatternResult>) -> Self {
		Self {
			status: EnvelopeStatus::Ok,
			error: None,
			limit: page.limit,
			offset: page.offset,
			returned_count: results.len(),
			total_considered_hint: total_considered,
			results,
		}
	}

	/// Echoes the compiled window when the request got that far, the configured default
	/// otherwise.
	pub fn failure(page: Page, err: &Error) -> Self {
		Self {
			status: EnvelopeStatus::Error,
			error: Some(ErrorBody::from(err)),
			limit: page.limit,
			offset: page.offset,
			returned_count: 0,
			total_considered_hint: 0,
			results: Vec::new(),
		}
	}

	pub fn is_ok(&self) -> bool {
		self.status == EnvelopeStatus::Ok
	}

	pub fn error_code(&self) -> Option<&str> {
		self.error.as_ref().map(|body| body.code.as_str())
	}
}
