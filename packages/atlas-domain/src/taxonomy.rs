use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Taxonomy axes patterns are classified against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKind {
	CompanyType,
	Department,
	BusinessFunction,
	AiCategory,
}
impl DimensionKind {
	pub const ALL: [Self; 4] =
		[Self::CompanyType, Self::Department, Self::BusinessFunction, Self::AiCategory];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::CompanyType => "company_type",
			Self::Department => "department",
			Self::BusinessFunction => "business_function",
			Self::AiCategory => "ai_category",
		}
	}

	pub fn table(self) -> &'static str {
		match self {
			Self::CompanyType => "company_types",
			Self::Department => "departments",
			Self::BusinessFunction => "business_functions",
			Self::AiCategory => "ai_categories",
		}
	}

	/// Column holding the parent reference, for dimensions that nest.
	pub fn parent_column(self) -> Option<&'static str> {
		match self {
			Self::CompanyType => Some("parent_id"),
			Self::BusinessFunction => Some("department_id"),
			Self::Department | Self::AiCategory => None,
		}
	}
}
impl fmt::Display for DimensionKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for DimensionKind {
	type Err = String;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		let trimmed = raw.trim();

		Self::ALL
			.into_iter()
			.find(|kind| kind.as_str() == trimmed || kind.table() == trimmed)
			.ok_or_else(|| format!("Unknown taxonomy dimension '{trimmed}'."))
	}
}

/// Lifecycle of a cataloged pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternStatus {
	Pending,
	Classified,
	Verified,
}
impl PatternStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Pending => "pending",
			Self::Classified => "classified",
			Self::Verified => "verified",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim() {
			"pending" => Some(Self::Pending),
			"classified" => Some(Self::Classified),
			"verified" => Some(Self::Verified),
			_ => None,
		}
	}
}
