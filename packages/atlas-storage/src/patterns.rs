use sqlx::PgExecutor;

use atlas_domain::taxonomy::PatternStatus;

use crate::{
	Error, Result,
	models::{NewPattern, Pattern},
};

pub const PATTERN_COLUMNS: &str = "\
id,
	title,
	description,
	company_type,
	department,
	role,
	business_function,
	ai_category,
	difficulty_level,
	tech_stack,
	success_metrics,
	company_examples,
	content_quality_score,
	extraction_confidence,
	is_verified,
	status,
	created_at,
	processed_at,
	updated_at";

pub async fn insert_pattern<'e, E>(executor: E, pattern: &NewPattern) -> Result<i64>
where
	E: PgExecutor<'e>,
{
	let Some(status) = PatternStatus::parse(&pattern.status) else {
		return Err(Error::InvalidArgument(format!(
			"Unknown pattern status '{}'.",
			pattern.status
		)));
	};
	if !(0.0..=1.0).contains(&pattern.extraction_confidence) {
		return Err(Error::InvalidArgument(
			"extraction_confidence must be in the range 0.0-1.0.".to_string(),
		));
	}

	let id = sqlx::query_scalar::<_, i64>(
		"\
INSERT INTO patterns (
	title,
	description,
	company_type,
	department,
	role,
	business_function,
	ai_category,
	difficulty_level,
	tech_stack,
	success_metrics,
	company_examples,
	content_quality_score,
	extraction_confidence,
	is_verified,
	status,
	created_at,
	updated_at
)
VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,COALESCE($16, now()),COALESCE($16, now()))
RETURNING id",
	)
	.bind(pattern.title.as_str())
	.bind(pattern.description.as_str())
	.bind(pattern.company_type.as_deref())
	.bind(pattern.department.as_deref())
	.bind(pattern.role.as_deref())
	.bind(pattern.business_function.as_deref())
	.bind(pattern.ai_category.as_deref())
	.bind(pattern.difficulty_level.as_deref())
	.bind(&pattern.tech_stack)
	.bind(&pattern.success_metrics)
	.bind(&pattern.company_examples)
	.bind(pattern.content_quality_score)
	.bind(pattern.extraction_confidence)
	.bind(pattern.is_verified)
	.bind(status.as_str())
	.bind(pattern.created_at)
	.fetch_one(executor)
	.await?;

	Ok(id)
}

/// Fetches full rows for `ids` in one round-trip. Row order is unspecified.
pub async fn get_patterns_by_ids<'e, E>(executor: E, ids: &[i64]) -> Result<Vec<Pattern>>
where
	E: PgExecutor<'e>,
{
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let sql = format!("SELECT {PATTERN_COLUMNS}\nFROM patterns\nWHERE id = ANY($1)");
	let rows = sqlx::query_as::<_, Pattern>(&sql).bind(ids).fetch_all(executor).await?;

	Ok(rows)
}
