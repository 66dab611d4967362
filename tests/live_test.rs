// tests/live_test.rs

use std::env;
use talentis_core::{ProfileRef, TalentisClient};

/// End-to-end smoke test against a real Talentis instance.
///
/// Needs TALENTIS_BASE_URL, TALENTIS_EMAIL and TALENTIS_PASSWORD (a `.env`
/// file works). Run with:
/// cargo test --test live_test -- --ignored --nocapture
#[tokio::test]
#[ignore = "needs live CRM credentials"]
async fn test_live_session_and_lookup() {
    dotenvy::dotenv().ok();
    let base_url =
        env::var("TALENTIS_BASE_URL").expect("ERROR: TALENTIS_BASE_URL environment variable not set.");

    let client = TalentisClient::new(base_url);

    // --- STEP 1: Establish a session ---
    assert!(
        client.ensure_session().await,
        "Could not establish an authenticated session"
    );
    println!("[1/2] Session established");

    // --- STEP 2: Resolve a profile ---
    let profile_url = env::var("TALENTIS_TEST_PROFILE")
        .unwrap_or_else(|_| "https://linkedin.com/in/kaidi-cao-398131117".to_string());
    let result = client.lookup(&ProfileRef::new(&profile_url)).await;
    println!("[2/2] Lookup result for {}: {:#?}", profile_url, result);
}
