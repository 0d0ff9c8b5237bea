use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::PgPool;
use time::OffsetDateTime;

use atlas_domain::{document, similarity::SimilarityPair, taxonomy::DimensionKind};
use atlas_storage::{
	models::{Dimension, Pattern, PatternTag, SimilarityEdge},
	patterns, similarity, tags, taxonomy,
};

use crate::{Result, planner::RankedHit};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagResult {
	pub name: String,
	pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedPattern {
	pub pattern_id: i64,
	pub similarity_score: f32,
	pub similarity_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionRef {
	pub id: i64,
	pub name: String,
	pub description: Option<String>,
	pub parent_id: Option<i64>,
}
impl From<Dimension> for DimensionRef {
	fn from(row: Dimension) -> Self {
		Self { id: row.id, name: row.name, description: row.description, parent_id: row.parent_id }
	}
}

/// Taxonomy rows matching the pattern's free-text labels. Labels without a row stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyRefs {
	pub company_type: Option<DimensionRef>,
	pub department: Option<DimensionRef>,
	pub business_function: Option<DimensionRef>,
	pub ai_category: Option<DimensionRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternResult {
	pub id: i64,
	pub title: String,
	pub description: String,
	pub company_type: Option<String>,
	pub department: Option<String>,
	pub role: Option<String>,
	pub business_function: Option<String>,
	pub ai_category: Option<String>,
	pub difficulty_level: Option<String>,
	pub content_quality_score: i32,
	pub extraction_confidence: f32,
	pub is_verified: bool,
	pub status: String,
	#[serde(with = "crate::rfc3339")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::rfc3339::option")]
	pub processed_at: Option<OffsetDateTime>,
	#[serde(with = "crate::rfc3339")]
	pub updated_at: OffsetDateTime,
	pub tech_stack: Value,
	pub success_metrics: Value,
	pub tags: Vec<TagResult>,
	pub company_examples: Vec<Value>,
	pub related: Vec<RelatedPattern>,
	pub taxonomy: TaxonomyRefs,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub relevance_score: Option<f32>,
}

/// Everything the assembler reads for one page, fetched up front.
#[derive(Debug, Default)]
pub(crate) struct PageRelations {
	pub(crate) patterns: Vec<Pattern>,
	pub(crate) tags: Vec<PatternTag>,
	pub(crate) edges: Vec<SimilarityEdge>,
	pub(crate) dimensions: HashMap<DimensionKind, Vec<Dimension>>,
}

/// Issues a fixed number of concurrent reads for the whole page, independent of its size.
pub(crate) async fn fetch_relations(
	pool: &PgPool,
	ids: &[i64],
	include_related: bool,
) -> Result<PageRelations> {
	if ids.is_empty() {
		return Ok(PageRelations::default());
	}

	let edges = async {
		if include_related {
			similarity::list_edges_for_patterns(pool, ids).await
		} else {
			Ok(Vec::new())
		}
	};
	let (patterns, tags, edges, company_types, departments, business_functions, ai_categories) = tokio::try_join!(
		patterns::get_patterns_by_ids(pool, ids),
		tags::list_tags_for_patterns(pool, ids),
		edges,
		taxonomy::find_dimensions_for_patterns(pool, DimensionKind::CompanyType, ids),
		taxonomy::find_dimensions_for_patterns(pool, DimensionKind::Department, ids),
		taxonomy::find_dimensions_for_patterns(pool, DimensionKind::BusinessFunction, ids),
		taxonomy::find_dimensions_for_patterns(pool, DimensionKind::AiCategory, ids),
	)?;
	let dimensions = HashMap::from([
		(DimensionKind::CompanyType, company_types),
		(DimensionKind::Department, departments),
		(DimensionKind::BusinessFunction, business_functions),
		(DimensionKind::AiCategory, ai_categories),
	]);

	Ok(PageRelations { patterns, tags, edges, dimensions })
}

/// Builds one record per hit, in hit order. Broken sub-fields are dropped from their record and
/// logged; they never fail the page.
pub(crate) fn assemble(
	hits: &[RankedHit],
	relations: PageRelations,
	related_top_n: usize,
) -> Vec<PatternResult> {
	let PageRelations { patterns, tags, edges, dimensions } = relations;
	let mut patterns: HashMap<i64, Pattern> =
		patterns.into_iter().map(|pattern| (pattern.id, pattern)).collect();
	let mut tags_by_pattern = group_tags(tags);
	let mut related_by_pattern = group_related(hits, edges, related_top_n);
	let dimensions: HashMap<DimensionKind, HashMap<String, Dimension>> = dimensions
		.into_iter()
		.map(|(kind, rows)| (kind, rows.into_iter().map(|row| (row.name.clone(), row)).collect()))
		.collect();
	let mut out = Vec::with_capacity(hits.len());

	for hit in hits {
		let Some(pattern) = patterns.remove(&hit.pattern_id) else {
			tracing::warn!(
				pattern_id = hit.pattern_id,
				"Ranked pattern disappeared before assembly; skipping record."
			);

			continue;
		};
		let examples = document::entries(pattern.company_examples.as_ref().unwrap_or(&Value::Null));

		if examples.coerced {
			tracing::warn!(
				pattern_id = pattern.id,
				"company_examples is not a list; returning it as a single entry."
			);
		}

		let taxonomy = TaxonomyRefs {
			company_type: lookup(&dimensions, DimensionKind::CompanyType, &pattern.company_type),
			department: lookup(&dimensions, DimensionKind::Department, &pattern.department),
			business_function: lookup(
				&dimensions,
				DimensionKind::BusinessFunction,
				&pattern.business_function,
			),
			ai_category: lookup(&dimensions, DimensionKind::AiCategory, &pattern.ai_category),
		};

		out.push(PatternResult {
			id: pattern.id,
			title: pattern.title,
			description: pattern.description,
			company_type: pattern.company_type,
			department: pattern.department,
			role: pattern.role,
			business_function: pattern.business_function,
			ai_category: pattern.ai_category,
			difficulty_level: pattern.difficulty_level,
			content_quality_score: pattern.content_quality_score,
			extraction_confidence: pattern.extraction_confidence,
			is_verified: pattern.is_verified,
			status: pattern.status,
			created_at: pattern.created_at,
			processed_at: pattern.processed_at,
			updated_at: pattern.updated_at,
			tech_stack: document::or_null(pattern.tech_stack),
			success_metrics: document::or_null(pattern.success_metrics),
			tags: tags_by_pattern.remove(&pattern.id).unwrap_or_default(),
			company_examples: examples.entries,
			related: related_by_pattern.remove(&pattern.id).unwrap_or_default(),
			taxonomy,
			relevance_score: hit.relevance.map(|relevance| relevance.score),
		});
	}

	out
}

fn group_tags(rows: Vec<PatternTag>) -> HashMap<i64, Vec<TagResult>> {
	let mut grouped: HashMap<i64, Vec<TagResult>> = HashMap::new();

	for row in rows {
		let Some(name) = row.name else {
			tracing::warn!(
				pattern_id = row.pattern_id,
				tag_id = row.tag_id,
				"Dangling tag reference; omitting tag."
			);

			continue;
		};

		grouped.entry(row.pattern_id).or_default().push(TagResult { name, confidence: row.confidence });
	}

	for tags in grouped.values_mut() {
		tags.sort_by(|a, b| {
			b.confidence
				.partial_cmp(&a.confidence)
				.unwrap_or(std::cmp::Ordering::Equal)
				.then_with(|| a.name.cmp(&b.name))
		});
	}

	grouped
}

fn group_related(
	hits: &[RankedHit],
	edges: Vec<SimilarityEdge>,
	top_n: usize,
) -> HashMap<i64, Vec<RelatedPattern>> {
	let mut grouped: HashMap<i64, Vec<RelatedPattern>> = HashMap::new();

	if top_n == 0 {
		return grouped;
	}

	for edge in &edges {
		let Some(pair) = SimilarityPair::new(edge.pattern_a_id, edge.pattern_b_id) else {
			tracing::warn!(pattern_id = edge.pattern_a_id, "Ignoring self-referencing similarity edge.");

			continue;
		};

		for hit in hits {
			let Some(other) = pair.other(hit.pattern_id) else { continue };

			grouped.entry(hit.pattern_id).or_default().push(RelatedPattern {
				pattern_id: other,
				similarity_score: edge.similarity_score,
				similarity_type: edge.similarity_type.clone(),
			});
		}
	}

	for related in grouped.values_mut() {
		related.sort_by(|a, b| {
			b.similarity_score
				.partial_cmp(&a.similarity_score)
				.unwrap_or(std::cmp::Ordering::Equal)
				.then_with(|| a.pattern_id.cmp(&b.pattern_id))
		});
		related.dedup_by_key(|entry| entry.pattern_id);
		related.truncate(top_n);
	}

	grouped
}

fn lookup(
	dimensions: &HashMap<DimensionKind, HashMap<String, Dimension>>,
	kind: DimensionKind,
	label: &Option<String>,
) -> Option<DimensionRef> {
	let label = label.as_deref()?;
	let found = dimensions.get(&kind).and_then(|rows| rows.get(label)).cloned();

	if found.is_none() {
		tracing::debug!(dimension = %kind, label, "Label has no taxonomy row.");
	}

	found.map(DimensionRef::from)
}
