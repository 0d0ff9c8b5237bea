use sqlx::PgExecutor;

use atlas_domain::similarity::{self, SimilarityPair};

use crate::{Error, Result, models::SimilarityEdge};

/// Edges touching any of `pattern_ids`, looked up from both sides of the stored pair.
pub async fn list_edges_for_patterns<'e, E>(
	executor: E,
	pattern_ids: &[i64],
) -> Result<Vec<SimilarityEdge>>
where
	E: PgExecutor<'e>,
{
	if pattern_ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows = sqlx::query_as::<_, SimilarityEdge>(
		"\
SELECT
	pattern_a_id,
	pattern_b_id,
	similarity_score,
	similarity_type
FROM pattern_similarities
WHERE pattern_a_id = ANY($1) OR pattern_b_id = ANY($1)",
	)
	.bind(pattern_ids)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

/// Inserts or refreshes the edge between `a` and `b`, in whichever order they are given.
pub async fn upsert_similarity_edge<'e, E>(
	executor: E,
	a: i64,
	b: i64,
	score: f32,
	similarity_type: &str,
) -> Result<SimilarityPair>
where
	E: PgExecutor<'e>,
{
	let pair = SimilarityPair::new(a, b).ok_or_else(|| {
		Error::InvalidArgument(format!("Pattern {a} cannot be similar to itself."))
	})?;
	let similarity_type = similarity_type.trim();

	if similarity_type.is_empty() {
		return Err(Error::InvalidArgument("similarity_type must be non-empty.".to_string()));
	}

	sqlx::query(
		"\
INSERT INTO pattern_similarities (pattern_a_id, pattern_b_id, similarity_score, similarity_type)
VALUES ($1, $2, $3, $4)
ON CONFLICT (pattern_a_id, pattern_b_id) DO UPDATE
SET
	similarity_score = EXCLUDED.similarity_score,
	similarity_type = EXCLUDED.similarity_type",
	)
	.bind(pair.low())
	.bind(pair.high())
	.bind(similarity::clamp_score(score))
	.bind(similarity_type)
	.execute(executor)
	.await?;

	Ok(pair)
}
