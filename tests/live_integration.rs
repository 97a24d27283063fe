//! Live tests against the real Nimble API.
//!
//! Skipped unless `NIMBLE_API_KEY` is set; run with:
//! `NIMBLE_API_KEY=... cargo test --test live_integration`

use nimble_http::{NimbleClient, SearchParams};

fn live_client() -> Option<NimbleClient> {
    let key = std::env::var("NIMBLE_API_KEY").ok()?;
    if key.trim().is_empty() {
        return None;
    }
    Some(NimbleClient::new(key).expect("client must build"))
}

#[tokio::test]
async fn live_search_returns_ranked_documents() {
    let Some(client) = live_client() else {
        eprintln!("skipping live test: NIMBLE_API_KEY is not set");
        return;
    };

    let docs = client
        .search(&SearchParams::new("What is the capital of France?").num_results(3))
        .await
        .expect("live search must succeed");

    assert!(!docs.is_empty());
    for doc in &docs {
        assert!(!doc.page_content.is_empty());
        assert!(!doc.metadata.url.is_empty());
    }
}
