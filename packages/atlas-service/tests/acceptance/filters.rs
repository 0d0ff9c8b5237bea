use serde_json::json;

use super::{build_service, ids, pattern, seed, seed_reference, test_db};

#[tokio::test]
#[ignore = "Requires external Postgres. Set ATLAS_PG_DSN to run."]
async fn department_filter_returns_only_matching_patterns() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping department_filter_returns_only_matching_patterns; set ATLAS_PG_DSN.");

		return;
	};
	let service = build_service(&test_db).await;
	let (p1, _) = seed_reference(&service).await;
	let envelope = service.search(&json!({ "department": "Data" })).await;

	assert!(envelope.is_ok(), "{envelope:?}");
	assert_eq!(ids(&envelope), vec![p1]);
	assert_eq!(envelope.returned_count, 1);
	assert_eq!(envelope.total_considered_hint, 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ATLAS_PG_DSN to run."]
async fn equality_filters_are_conjunctive() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping equality_filters_are_conjunctive; set ATLAS_PG_DSN.");

		return;
	};
	let service = build_service(&test_db).await;
	let mut both = pattern("Demand forecasting", "Engineering", 70);
	let mut role_only = pattern("Churn scoring", "Data", 90);
	let department_only = pattern("Code review assistant", "Engineering", 90);

	both.role = Some("Data Scientist".to_string());
	role_only.role = Some("Data Scientist".to_string());

	let both = seed(&service, both).await;

	seed(&service, role_only).await;
	seed(&service, department_only).await;

	let envelope = service
		.search(&json!({ "department": "Engineering", "role": "Data Scientist" }))
		.await;

	assert_eq!(ids(&envelope), vec![both]);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ATLAS_PG_DSN to run."]
async fn verified_only_and_case_sensitivity() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping verified_only_and_case_sensitivity; set ATLAS_PG_DSN.");

		return;
	};
	let service = build_service(&test_db).await;
	let mut verified = pattern("Invoice matching", "Finance", 50);

	verified.is_verified = true;
	verified.status = "verified".to_string();

	let verified = seed(&service, verified).await;

	seed(&service, pattern("Expense triage", "Finance", 90)).await;

	let only_verified = service.search(&json!({ "verified_only": true })).await;
	let lowercase = service.search(&json!({ "department": "finance" })).await;

	assert_eq!(ids(&only_verified), vec![verified]);
	assert!(lowercase.is_ok());
	assert!(lowercase.results.is_empty());

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
