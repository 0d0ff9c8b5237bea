use std::cmp::Ordering;

use sqlx::{PgPool, Postgres, QueryBuilder};
use time::OffsetDateTime;

use atlas_domain::relevance::{self, Relevance, RelevanceWeights};
use atlas_storage::models::{PatternCandidate, PatternRank};

use crate::{
	Result,
	filter::{Page, PredicateSet, TextPredicate},
};

/// Same order as `cmp_hits` for searches without keywords.
const RANK_ORDER: &str =
	" ORDER BY content_quality_score DESC, extraction_confidence DESC, created_at DESC, id ASC";

#[derive(Debug, Clone)]
pub struct RankedHit {
	pub pattern_id: i64,
	/// Present only when the request carried a text predicate.
	pub relevance: Option<Relevance>,
	pub content_quality_score: i32,
	pub extraction_confidence: f32,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Default)]
pub struct RankedPage {
	/// Patterns that satisfied every predicate, before paging.
	pub total_considered: usize,
	pub hits: Vec<RankedHit>,
}

pub(crate) async fn execute(
	pool: &PgPool,
	predicates: &PredicateSet,
	cfg: &atlas_config::Config,
) -> Result<RankedPage> {
	if predicates.matches_nothing() {
		return Ok(RankedPage::default());
	}

	let case_insensitive = cfg.search.case_insensitive_filters;

	match predicates.text.as_ref() {
		Some(text) => {
			let mut builder = build_candidate_query(predicates, case_insensitive);
			let candidates: Vec<PatternCandidate> = builder.build_query_as().fetch_all(pool).await?;
			let weights = RelevanceWeights {
				title: cfg.ranking.title_weight,
				description: cfg.ranking.description_weight,
			};
			let ranked = rank_candidates(candidates, Some(text), weights);
			let total_considered = ranked.len();

			Ok(RankedPage { total_considered, hits: paginate(ranked, predicates.page) })
		},
		None => {
			let mut builder = build_ranked_page_query(predicates, case_insensitive);
			let rows: Vec<PatternRank> = builder.build_query_as().fetch_all(pool).await?;
			let total_considered = match rows.first() {
				Some(row) => row.total_considered,
				// The window count is only visible on returned rows.
				None if predicates.page.offset > 0 => {
					let mut builder = build_count_query(predicates, case_insensitive);

					builder.build_query_scalar::<i64>().fetch_one(pool).await?
				},
				None => 0,
			};
			let hits = rows
				.into_iter()
				.map(|row| RankedHit {
					pattern_id: row.id,
					relevance: None,
					content_quality_score: row.content_quality_score,
					extraction_confidence: row.extraction_confidence,
					created_at: row.created_at,
				})
				.collect();

			Ok(RankedPage { total_considered: usize::try_from(total_considered).unwrap_or(0), hits })
		},
	}
}

/// Keyword retrieval: every pattern passing the filters and the substring prefilter, unordered.
pub(crate) fn build_candidate_query(
	predicates: &PredicateSet,
	case_insensitive: bool,
) -> QueryBuilder<'_, Postgres> {
	let mut builder = QueryBuilder::new(
		"SELECT id, title, description, content_quality_score, extraction_confidence, created_at \
		 FROM patterns WHERE TRUE",
	);

	push_predicates(&mut builder, predicates, case_insensitive);

	builder
}

/// Ordered retrieval of one page of ranking keys, carrying the size of the filtered set.
pub(crate) fn build_ranked_page_query(
	predicates: &PredicateSet,
	case_insensitive: bool,
) -> QueryBuilder<'_, Postgres> {
	let mut builder = QueryBuilder::new(
		"SELECT id, content_quality_score, extraction_confidence, created_at, \
		 count(*) OVER () AS total_considered FROM patterns WHERE TRUE",
	);

	push_predicates(&mut builder, predicates, case_insensitive);

	builder.push(RANK_ORDER);
	builder.push(" LIMIT ");
	builder.push_bind(i64::from(predicates.page.limit));
	builder.push(" OFFSET ");
	builder.push_bind(i64::try_from(predicates.page.offset).unwrap_or(i64::MAX));

	builder
}

pub(crate) fn build_count_query(
	predicates: &PredicateSet,
	case_insensitive: bool,
) -> QueryBuilder<'_, Postgres> {
	let mut builder = QueryBuilder::new("SELECT count(*) FROM patterns WHERE TRUE");

	push_predicates(&mut builder, predicates, case_insensitive);

	builder
}

fn push_predicates<'a>(
	builder: &mut QueryBuilder<'a, Postgres>,
	predicates: &'a PredicateSet,
	case_insensitive: bool,
) {
	// NULL columns never satisfy `=`, so absent attributes drop out on their own.
	for predicate in &predicates.equality {
		let column = predicate.field.column();

		if case_insensitive {
			builder.push(format_args!(" AND lower({column}) = lower("));
			builder.push_bind(predicate.value.as_str());
			builder.push(")");
		} else {
			builder.push(format_args!(" AND {column} = "));
			builder.push_bind(predicate.value.as_str());
		}
	}

	if predicates.verified_only {
		builder.push(" AND is_verified");
	}

	if let Some(text) = predicates.text.as_ref() {
		if text.matches_nothing() {
			builder.push(" AND FALSE");

			return;
		}

		let patterns = relevance::like_patterns(&text.terms);

		builder.push(" AND (title ILIKE ANY(");
		builder.push_bind(patterns.clone());
		builder.push(") OR description ILIKE ANY(");
		builder.push_bind(patterns);
		builder.push("))");
	}
}

/// Scores and orders candidates. With a text predicate, candidates without any term overlap are
/// dropped.
pub fn rank_candidates(
	candidates: Vec<PatternCandidate>,
	text: Option<&TextPredicate>,
	weights: RelevanceWeights,
) -> Vec<RankedHit> {
	let mut hits: Vec<RankedHit> = candidates
		.into_iter()
		.filter_map(|candidate| {
			let relevance = match text {
				Some(text) => {
					let scored = relevance::score(
						&text.terms,
						&candidate.title,
						&candidate.description,
						weights,
					);

					if !scored.is_match() {
						return None;
					}

					Some(scored)
				},
				None => None,
			};

			Some(RankedHit {
				pattern_id: candidate.id,
				relevance,
				content_quality_score: candidate.content_quality_score,
				extraction_confidence: candidate.extraction_confidence,
				created_at: candidate.created_at,
			})
		})
		.collect();

	hits.sort_by(cmp_hits);

	hits
}

pub fn paginate(hits: Vec<RankedHit>, page: Page) -> Vec<RankedHit> {
	let offset = usize::try_from(page.offset).unwrap_or(usize::MAX);

	hits.into_iter().skip(offset).take(page.limit as usize).collect()
}

fn cmp_hits(a: &RankedHit, b: &RankedHit) -> Ordering {
	let primary = match (a.relevance, b.relevance) {
		(Some(left), Some(right)) => cmp_f32_desc(left.score, right.score),
		_ => b.content_quality_score.cmp(&a.content_quality_score),
	};

	primary
		.then_with(|| cmp_f32_desc(a.extraction_confidence, b.extraction_confidence))
		.then_with(|| b.created_at.cmp(&a.created_at))
		.then_with(|| a.pattern_id.cmp(&b.pattern_id))
}

fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}
