use serde_json::Value;
use time::OffsetDateTime;

/// Full pattern row as persisted by the ingestion pipeline.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Pattern {
	pub id: i64,
	pub title: String,
	pub description: String,
	pub company_type: Option<String>,
	pub department: Option<String>,
	pub role: Option<String>,
	pub business_function: Option<String>,
	pub ai_category: Option<String>,
	pub difficulty_level: Option<String>,
	pub tech_stack: Option<Value>,
	pub success_metrics: Option<Value>,
	pub company_examples: Option<Value>,
	pub content_quality_score: i32,
	pub extraction_confidence: f32,
	pub is_verified: bool,
	pub status: String,
	pub created_at: OffsetDateTime,
	pub processed_at: Option<OffsetDateTime>,
	pub updated_at: OffsetDateTime,
}

/// The slice of a pattern row needed to rank it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PatternCandidate {
	pub id: i64,
	pub title: String,
	pub description: String,
	pub content_quality_score: i32,
	pub extraction_confidence: f32,
	pub created_at: OffsetDateTime,
}

/// A ranking key read together with the size of the whole filtered set.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PatternRank {
	pub id: i64,
	pub content_quality_score: i32,
	pub extraction_confidence: f32,
	pub created_at: OffsetDateTime,
	pub total_considered: i64,
}

/// A pattern-tag association. `name` is `None` when the tag row could not be resolved.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PatternTag {
	pub pattern_id: i64,
	pub tag_id: i64,
	pub name: Option<String>,
	pub confidence: f32,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Tag {
	pub id: i64,
	pub name: String,
	pub usage_count: i32,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SimilarityEdge {
	pub pattern_a_id: i64,
	pub pattern_b_id: i64,
	pub similarity_score: f32,
	pub similarity_type: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Dimension {
	pub id: i64,
	pub name: String,
	pub description: Option<String>,
	pub parent_id: Option<i64>,
}

/// Insert payload for a classified pattern.
#[derive(Debug, Clone, Default)]
pub struct NewPattern {
	pub title: String,
	pub description: String,
	pub company_type: Option<String>,
	pub department: Option<String>,
	pub role: Option<String>,
	pub business_function: Option<String>,
	pub ai_category: Option<String>,
	pub difficulty_level: Option<String>,
	pub tech_stack: Option<Value>,
	pub success_metrics: Option<Value>,
	pub company_examples: Option<Value>,
	pub content_quality_score: i32,
	pub extraction_confidence: f32,
	pub is_verified: bool,
	pub status: String,
	/// Defaults to the database clock when unset.
	pub created_at: Option<OffsetDateTime>,
}
