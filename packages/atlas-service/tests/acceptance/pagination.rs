use std::collections::HashSet;

use serde_json::json;

use super::{aged, build_service, ids, pattern, seed, test_db};

#[tokio::test]
#[ignore = "Requires external Postgres. Set ATLAS_PG_DSN to run."]
async fn unfiltered_search_orders_the_whole_store() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping unfiltered_search_orders_the_whole_store; set ATLAS_PG_DSN.");

		return;
	};
	let service = build_service(&test_db).await;
	let low = seed(&service, pattern("Low quality", "Ops", 10)).await;
	let mut confident = pattern("Confident", "Ops", 50);

	confident.extraction_confidence = 0.9;

	let confident = seed(&service, confident).await;
	let newer = seed(&service, pattern("Newer", "Ops", 50)).await;
	let older = seed(&service, aged(pattern("Older", "Ops", 50), 30)).await;
	let best = seed(&service, pattern("Best", "Ops", 95)).await;
	let envelope = service.search(&json!({})).await;

	assert_eq!(ids(&envelope), vec![best, confident, newer, older, low]);
	assert!(envelope.results.iter().all(|result| result.relevance_score.is_none()));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ATLAS_PG_DSN to run."]
async fn consecutive_pages_are_disjoint_and_ordered() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping consecutive_pages_are_disjoint_and_ordered; set ATLAS_PG_DSN.");

		return;
	};
	let service = build_service(&test_db).await;

	for index in 0..25_i32 {
		let quality = index % 4 * 10;
		let age_days = i64::from(index % 3);

		seed(&service, aged(pattern(&format!("Pattern {index}"), "Ops", quality), age_days)).await;
	}

	let first = service.search(&json!({ "limit": 10, "offset": 0 })).await;
	let second = service.search(&json!({ "limit": 10, "offset": 10 })).await;
	let whole = service.search(&json!({ "limit": 20 })).await;
	let mut seen = HashSet::new();
	let concatenated: Vec<i64> = ids(&first).into_iter().chain(ids(&second)).collect();

	assert!(concatenated.iter().all(|id| seen.insert(*id)));
	assert_eq!(concatenated, ids(&whole));
	assert_eq!(first.total_considered_hint, 25);
	assert_eq!((second.limit, second.offset), (10, 10));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ATLAS_PG_DSN to run."]
async fn negative_limit_is_a_validation_error() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping negative_limit_is_a_validation_error; set ATLAS_PG_DSN.");

		return;
	};
	let service = build_service(&test_db).await;

	seed(&service, pattern("Anything", "Ops", 10)).await;

	let envelope = service.search(&json!({ "limit": -5 })).await;

	assert!(!envelope.is_ok());
	assert_eq!(envelope.error_code(), Some("ValidationError"));
	assert!(envelope.results.is_empty());

	let follow_up = service.search(&json!({})).await;

	assert!(follow_up.is_ok());
	assert_eq!(follow_up.returned_count, 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
