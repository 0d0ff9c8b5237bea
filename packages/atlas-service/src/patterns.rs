use atlas_domain::taxonomy::DimensionKind;
use atlas_storage::taxonomy;

use crate::{
	AtlasService, Error, Result,
	assemble::{self, DimensionRef, PatternResult},
	planner::RankedHit,
};

impl AtlasService {
	/// One fully assembled pattern, as it would appear in a search result.
	pub async fn get_pattern(&self, pattern_id: i64) -> Result<PatternResult> {
		let pool = &self.db.pool;
		let related = &self.cfg.search.related;
		let include_related = related.enabled && related.top_n > 0;

		self.bounded(async {
			let relations = assemble::fetch_relations(pool, &[pattern_id], include_related).await?;
			let Some(row) = relations.patterns.first() else {
				return Err(not_found(pattern_id));
			};
			let hit = RankedHit {
				pattern_id: row.id,
				relevance: None,
				content_quality_score: row.content_quality_score,
				extraction_confidence: row.extraction_confidence,
				created_at: row.created_at,
			};

			assemble::assemble(&[hit], relations, related.top_n as usize)
				.pop()
				.ok_or_else(|| not_found(pattern_id))
		})
		.await
	}

	/// All rows of one taxonomy dimension, ordered by name. `kind` accepts the dimension label
	/// (`department`) or its table name (`departments`).
	pub async fn list_dimensions(&self, kind: &str) -> Result<Vec<DimensionRef>> {
		let kind = kind.parse::<DimensionKind>().map_err(|message| Error::validation("kind", message))?;
		let pool = &self.db.pool;
		let rows = self
			.bounded(async { taxonomy::list_dimensions(pool, kind).await.map_err(Error::from) })
			.await?;

		Ok(rows.into_iter().map(DimensionRef::from).collect())
	}
}

fn not_found(pattern_id: i64) -> Error {
	Error::NotFound { message: format!("Pattern {pattern_id} does not exist.") }
}
