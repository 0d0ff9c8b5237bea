use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use atlas_domain::relevance;

use crate::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
	pub keywords: Option<String>,
	pub role: Option<String>,
	pub department: Option<String>,
	pub ai_category: Option<String>,
	pub difficulty: Option<String>,
	pub company_type: Option<String>,
	pub verified_only: Option<bool>,
	pub include_related: Option<bool>,
	pub limit: Option<PageParam>,
	pub offset: Option<PageParam>,
}
impl SearchRequest {
	/// Reads a request mapping field by field so a bad value is reported against its own key.
	/// Unknown keys are ignored.
	pub fn from_value(raw: &Value) -> Result<Self> {
		let obj = match raw {
			Value::Object(obj) => obj,
			Value::Null => return Ok(Self::default()),
			_ => return Err(Error::validation("$", "request must be an object.")),
		};

		Ok(Self {
			keywords: text_field(obj, "keywords")?,
			role: text_field(obj, "role")?,
			department: text_field(obj, "department")?,
			ai_category: text_field(obj, "ai_category")?,
			difficulty: text_field(obj, "difficulty")?,
			company_type: text_field(obj, "company_type")?,
			verified_only: bool_field(obj, "verified_only")?,
			include_related: bool_field(obj, "include_related")?,
			limit: obj.get("limit").filter(|value| !value.is_null()).map(PageParam::from_value),
			offset: obj.get("offset").filter(|value| !value.is_null()).map(PageParam::from_value),
		})
	}
}

/// A pagination value as supplied by the caller. Transports that only carry text (query strings,
/// form posts) send numbers as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageParam {
	Integer(i64),
	Text(String),
	Invalid(Value),
}
impl PageParam {
	fn from_value(value: &Value) -> Self {
		match value {
			Value::Number(number) => match number.as_i64() {
				Some(int) => Self::Integer(int),
				None => Self::Invalid(value.clone()),
			},
			Value::String(text) => Self::Text(text.clone()),
			other => Self::Invalid(other.clone()),
		}
	}

	fn resolve(&self, field: &str) -> Result<i64> {
		match self {
			Self::Integer(value) => Ok(*value),
			Self::Text(text) => text
				.trim()
				.parse::<i64>()
				.map_err(|_| Error::validation(field, format!("{field} must be an integer."))),
			Self::Invalid(_) => Err(Error::validation(field, format!("{field} must be an integer."))),
		}
	}
}
impl From<i64> for PageParam {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}

/// Categorical pattern attributes that accept an equality filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
	Role,
	Department,
	AiCategory,
	Difficulty,
	CompanyType,
}
impl FilterField {
	pub fn column(self) -> &'static str {
		match self {
			Self::Role => "role",
			Self::Department => "department",
			Self::AiCategory => "ai_category",
			Self::Difficulty => "difficulty_level",
			Self::CompanyType => "company_type",
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct EqualityPredicate {
	pub field: FilterField,
	pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextPredicate {
	pub query: String,
	/// Empty when the keywords carry no searchable word; such a predicate matches nothing.
	pub terms: Vec<String>,
}
impl TextPredicate {
	pub fn matches_nothing(&self) -> bool {
		self.terms.is_empty()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
	pub limit: u32,
	pub offset: u64,
}
impl Page {
	pub fn default_for(cfg: &atlas_config::Search) -> Self {
		Self { limit: cfg.default_limit, offset: 0 }
	}
}

/// Conjunction of every supplied constraint plus the pagination window.
#[derive(Debug, Clone, PartialEq)]
pub struct PredicateSet {
	pub equality: Vec<EqualityPredicate>,
	pub verified_only: bool,
	pub text: Option<TextPredicate>,
	pub page: Page,
	pub include_related: bool,
}
impl PredicateSet {
	/// True when no pattern can satisfy the set, so the store need not be asked.
	pub fn matches_nothing(&self) -> bool {
		self.text.as_ref().is_some_and(TextPredicate::matches_nothing)
	}
}

pub fn compile(req: &SearchRequest, cfg: &atlas_config::Search) -> Result<PredicateSet> {
	let page = compile_page(req, cfg)?;
	let mut equality = Vec::new();

	for (field, value) in [
		(FilterField::Role, &req.role),
		(FilterField::Department, &req.department),
		(FilterField::AiCategory, &req.ai_category),
		(FilterField::Difficulty, &req.difficulty),
		(FilterField::CompanyType, &req.company_type),
	] {
		if let Some(value) = non_empty(value) {
			equality.push(EqualityPredicate { field, value: value.to_string() });
		}
	}

	let text = non_empty(&req.keywords).map(|query| {
		let terms = relevance::tokenize_query(query, cfg.max_query_terms as usize);

		if terms.is_empty() {
			tracing::debug!(query, "Keywords carry no searchable terms; nothing can match.");
		}

		TextPredicate { query: query.to_string(), terms }
	});

	Ok(PredicateSet {
		equality,
		verified_only: req.verified_only.unwrap_or(false),
		text,
		page,
		include_related: req.include_related.unwrap_or(cfg.related.enabled) && cfg.related.top_n > 0,
	})
}

fn compile_page(req: &SearchRequest, cfg: &atlas_config::Search) -> Result<Page> {
	let limit = match req.limit.as_ref() {
		Some(param) => {
			let value = param.resolve("limit")?;

			if value <= 0 {
				return Err(Error::validation("limit", "limit must be a positive integer."));
			}

			value.min(i64::from(cfg.max_limit)) as u32
		},
		None => cfg.default_limit,
	};
	let offset = match req.offset.as_ref() {
		Some(param) => {
			let value = param.resolve("offset")?;

			u64::try_from(value)
				.map_err(|_| Error::validation("offset", "offset must not be negative."))?
		},
		None => 0,
	};

	Ok(Page { limit, offset })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
	value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Result<Option<String>> {
	match obj.get(key) {
		None | Some(Value::Null) => Ok(None),
		Some(Value::String(value)) => Ok(Some(value.clone())),
		Some(_) => Err(Error::validation(key, format!("{key} must be a string."))),
	}
}

fn bool_field(obj: &Map<String, Value>, key: &str) -> Result<Option<bool>> {
	match obj.get(key) {
		None | Some(Value::Null) => Ok(None),
		Some(Value::Bool(value)) => Ok(Some(*value)),
		Some(_) => Err(Error::validation(key, format!("{key} must be a boolean."))),
	}
}
