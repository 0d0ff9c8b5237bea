use serde_json::json;

use atlas_domain::taxonomy::DimensionKind;
use atlas_service::Error;
use atlas_storage::taxonomy;

use super::{build_service, pattern, relate, seed, seed_reference, tag, test_db};

#[tokio::test]
#[ignore = "Requires external Postgres. Set ATLAS_PG_DSN to run."]
async fn patterns_without_relations_still_appear() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping patterns_without_relations_still_appear; set ATLAS_PG_DSN.");

		return;
	};
	let service = build_service(&test_db).await;
	let (p1, p2) = seed_reference(&service).await;

	tag(&service, p1, "fraud", 0.7).await;

	let envelope = service.search(&json!({})).await;
	let bare = envelope.results.iter().find(|result| result.id == p2).expect("P2 is returned.");

	assert!(envelope.is_ok());
	assert!(bare.tags.is_empty());
	assert!(bare.related.is_empty());
	assert!(bare.company_examples.is_empty());

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ATLAS_PG_DSN to run."]
async fn results_carry_tags_examples_related_and_taxonomy() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping results_carry_tags_examples_related_and_taxonomy; set ATLAS_PG_DSN.");

		return;
	};
	let service = build_service(&test_db).await;
	let department = taxonomy::upsert_dimension(
		&service.db.pool,
		DimensionKind::Department,
		"Data",
		Some("Analytics teams."),
		None,
	)
	.await
	.expect("Failed to upsert department.");
	let mut anchor = pattern("Fraud detection with anomaly models", "Data", 80);

	anchor.company_examples = Some(json!([{ "company": "Acme Bank", "outcome": "-30% losses" }]));
	anchor.ai_category = Some("Anomaly detection".to_string());

	let anchor = seed(&service, anchor).await;
	let near = seed(&service, pattern("Card skimming alerts", "Risk", 40)).await;
	let far = seed(&service, pattern("Chargeback triage", "Risk", 40)).await;

	tag(&service, anchor, "anomaly", 0.6).await;
	tag(&service, anchor, "fraud", 0.95).await;
	relate(&service, far, anchor, 0.3).await;
	relate(&service, anchor, near, 0.9).await;

	let envelope = service.search(&json!({ "keywords": "fraud" })).await;
	let result = envelope.results.first().expect("Anchor is returned.");
	let tag_names: Vec<&str> = result.tags.iter().map(|tag| tag.name.as_str()).collect();
	let related: Vec<i64> = result.related.iter().map(|entry| entry.pattern_id).collect();

	assert_eq!(result.id, anchor);
	assert_eq!(tag_names, vec!["fraud", "anomaly"]);
	assert_eq!(related, vec![near, far]);
	assert_eq!(result.related[0].similarity_type, "same-function");
	assert_eq!(result.company_examples.len(), 1);
	assert_eq!(result.taxonomy.department.as_ref().map(|row| row.id), Some(department));
	assert!(result.taxonomy.ai_category.is_none());

	let without_related =
		service.search(&json!({ "keywords": "fraud", "include_related": false })).await;

	assert!(without_related.results[0].related.is_empty());

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ATLAS_PG_DSN to run."]
async fn pattern_lookup_and_dimension_listing() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping pattern_lookup_and_dimension_listing; set ATLAS_PG_DSN.");

		return;
	};
	let service = build_service(&test_db).await;
	let (p1, _) = seed_reference(&service).await;

	for name in ["NLP", "Computer vision"] {
		taxonomy::upsert_dimension(&service.db.pool, DimensionKind::AiCategory, name, None, None)
			.await
			.expect("Failed to upsert category.");
	}

	let found = service.get_pattern(p1).await.expect("Pattern exists.");

	assert_eq!(found.title, "Fraud detection with anomaly models");
	assert!(found.relevance_score.is_none());
	assert!(matches!(service.get_pattern(p1 + 1_000).await, Err(Error::NotFound { .. })));

	let categories = service.list_dimensions("ai_categories").await.expect("Known dimension.");
	let names: Vec<&str> = categories.iter().map(|row| row.name.as_str()).collect();

	assert_eq!(names, vec!["Computer vision", "NLP"]);
	assert!(matches!(
		service.list_dimensions("industries").await,
		Err(Error::Validation { .. })
	));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
