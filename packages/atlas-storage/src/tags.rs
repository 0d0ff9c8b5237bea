use sqlx::{PgConnection, PgExecutor};

use crate::{
	Error, Result,
	models::{PatternTag, Tag},
};

/// Tags for a whole result page. Associations whose tag row is gone come back with `name = None`.
pub async fn list_tags_for_patterns<'e, E>(
	executor: E,
	pattern_ids: &[i64],
) -> Result<Vec<PatternTag>>
where
	E: PgExecutor<'e>,
{
	if pattern_ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows = sqlx::query_as::<_, PatternTag>(
		"\
SELECT
	pt.pattern_id,
	pt.tag_id,
	t.name,
	pt.confidence
FROM pattern_tags pt
LEFT JOIN tags t ON t.id = pt.tag_id
WHERE pt.pattern_id = ANY($1)",
	)
	.bind(pattern_ids)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

pub async fn get_tag_by_name<'e, E>(executor: E, name: &str) -> Result<Option<Tag>>
where
	E: PgExecutor<'e>,
{
	let row = sqlx::query_as::<_, Tag>("SELECT id, name, usage_count FROM tags WHERE name = $1")
		.bind(name)
		.fetch_optional(executor)
		.await?;

	Ok(row)
}

/// Attaches `name` to a pattern, creating the tag when needed.
///
/// Returns `true` when the association is new. The tag's usage counter moves only in that case,
/// so re-attaching is idempotent. Run it inside a transaction so the counter stays consistent with
/// the association rows.
pub async fn attach_tag(
	conn: &mut PgConnection,
	pattern_id: i64,
	name: &str,
	confidence: f32,
) -> Result<bool> {
	let name = name.trim();

	if name.is_empty() {
		return Err(Error::InvalidArgument("Tag name must be non-empty.".to_string()));
	}
	if !(0.0..=1.0).contains(&confidence) {
		return Err(Error::InvalidArgument(
			"Tag confidence must be in the range 0.0-1.0.".to_string(),
		));
	}

	sqlx::query("INSERT INTO tags (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
		.bind(name)
		.execute(&mut *conn)
		.await?;

	let tag_id: i64 = sqlx::query_scalar("SELECT id FROM tags WHERE name = $1")
		.bind(name)
		.fetch_one(&mut *conn)
		.await?;
	let result = sqlx::query(
		"\
INSERT INTO pattern_tags (pattern_id, tag_id, confidence)
VALUES ($1, $2, $3)
ON CONFLICT (pattern_id, tag_id) DO NOTHING",
	)
	.bind(pattern_id)
	.bind(tag_id)
	.bind(confidence)
	.execute(&mut *conn)
	.await?;
	let inserted = result.rows_affected() == 1;

	if inserted {
		sqlx::query("UPDATE tags SET usage_count = usage_count + 1 WHERE id = $1")
			.bind(tag_id)
			.execute(&mut *conn)
			.await?;
	}

	Ok(inserted)
}
