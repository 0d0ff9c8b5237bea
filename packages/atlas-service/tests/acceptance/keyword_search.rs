use serde_json::json;

use super::{build_service, ids, pattern, seed, seed_reference, test_db};

#[tokio::test]
#[ignore = "Requires external Postgres. Set ATLAS_PG_DSN to run."]
async fn matching_keyword_ranks_its_pattern_first() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping matching_keyword_ranks_its_pattern_first; set ATLAS_PG_DSN.");

		return;
	};
	let service = build_service(&test_db).await;
	let (p1, p2) = seed_reference(&service).await;
	let envelope = service.search(&json!({ "keywords": "fraud" })).await;

	assert!(envelope.is_ok(), "{envelope:?}");
	assert_eq!(ids(&envelope).first(), Some(&p1));
	assert!(!ids(&envelope).contains(&p2));
	assert!(envelope.results.iter().all(|result| result.relevance_score.is_some_and(|s| s > 0.0)));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ATLAS_PG_DSN to run."]
async fn unmatched_keyword_is_an_empty_success() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping unmatched_keyword_is_an_empty_success; set ATLAS_PG_DSN.");

		return;
	};
	let service = build_service(&test_db).await;

	seed_reference(&service).await;

	let envelope = service.search(&json!({ "keywords": "blockchain" })).await;

	assert!(envelope.is_ok());
	assert!(envelope.error.is_none());
	assert!(envelope.results.is_empty());
	assert_eq!(envelope.returned_count, 0);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ATLAS_PG_DSN to run."]
async fn title_matches_outrank_description_matches() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping title_matches_outrank_description_matches; set ATLAS_PG_DSN.");

		return;
	};
	let service = build_service(&test_db).await;
	let mut in_description = pattern("Payment monitoring", "Risk", 100);

	in_description.description = "Scores card transactions for fraud in real time.".to_string();

	let in_description = seed(&service, in_description).await;
	let in_title = seed(&service, pattern("Fraud ring detection", "Risk", 10)).await;
	let envelope = service.search(&json!({ "keywords": "FRAUD detection" })).await;
	let scores: Vec<f32> =
		envelope.results.iter().filter_map(|result| result.relevance_score).collect();

	assert_eq!(ids(&envelope), vec![in_title, in_description]);
	assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ATLAS_PG_DSN to run."]
async fn keywords_without_words_return_nothing() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping keywords_without_words_return_nothing; set ATLAS_PG_DSN.");

		return;
	};
	let service = build_service(&test_db).await;

	seed_reference(&service).await;

	for keywords in ["日本語", "R"] {
		let envelope = service.search(&json!({ "keywords": keywords })).await;

		assert!(envelope.is_ok(), "{keywords}: {envelope:?}");
		assert!(envelope.results.is_empty(), "{keywords}");
		assert_eq!(envelope.total_considered_hint, 0, "{keywords}");
	}

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ATLAS_PG_DSN to run."]
async fn accented_keywords_match_whole_words() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping accented_keywords_match_whole_words; set ATLAS_PG_DSN.");

		return;
	};
	let service = build_service(&test_db).await;
	let (p1, _) = seed_reference(&service).await;
	let accented = seed(&service, pattern("Détection de fraude bancaire", "Risk", 50)).await;
	let envelope = service.search(&json!({ "keywords": "détection" })).await;

	assert!(envelope.is_ok(), "{envelope:?}");
	assert_eq!(ids(&envelope), vec![accented]);
	assert!(!ids(&envelope).contains(&p1));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
