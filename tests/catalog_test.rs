use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use cbt_catalog::error::CatalogError;
use cbt_catalog::http::HttpPort;
use cbt_catalog::QuestionCatalog;

/// In-memory stand-in for the static file server: URLs with no entry
/// answer 404, entries holding invalid JSON text never occur because the
/// stub stores parsed values.
struct StubHttp {
    responses: Mutex<HashMap<String, Value>>,
}

impl StubHttp {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(HashMap::new()),
        })
    }

    fn set(&self, url: &str, value: Value) {
        self.responses.lock().unwrap().insert(url.to_string(), value);
    }

    fn remove(&self, url: &str) {
        self.responses.lock().unwrap().remove(url);
    }
}

#[async_trait]
impl HttpPort for StubHttp {
    async fn get_json(&self, url: &str) -> cbt_catalog::Result<Value> {
        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| CatalogError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

const BASE: &str = "http://test";

fn seeded_stub() -> Arc<StubHttp> {
    let stub = StubHttp::new();
    stub.set(
        "http://test/data/topics.json",
        json!({
            "topics": [
                { "id": "psr", "file": "data/psr.json", "name": "Public Service Rules" },
                { "id": "current_affairs", "file": "data/current_affairs.json" },
                { "id": "broken", "file": "data/broken.json" }
            ]
        }),
    );
    stub.set(
        "http://test/data/psr.json",
        json!({
            "psr_categories": {
                "psr_leave": { "questions": [1, 2, 3] },
                "psr_discipline": { "questions": [1, 2] }
            }
        }),
    );
    stub.set(
        "http://test/data/current_affairs.json",
        json!({
            "subcategories": [
                { "id": "a", "questions": [1, 2] },
                { "id": "b", "questions": [1] }
            ]
        }),
    );
    // data/broken.json is deliberately absent
    stub
}

#[tokio::test]
async fn loads_topics_from_the_index() -> Result<()> {
    let stub = seeded_stub();
    let mut catalog = QuestionCatalog::with_http(stub, BASE);

    let topics = catalog.load_topics().await?;
    assert_eq!(topics.len(), 3);
    assert_eq!(topics[0].id, "psr");
    assert_eq!(topics[0].name.as_deref(), Some("Public Service Rules"));
    assert_eq!(catalog.topics().len(), 3);
    Ok(())
}

#[tokio::test]
async fn load_topics_fails_on_missing_index() {
    let stub = StubHttp::new();
    let mut catalog = QuestionCatalog::with_http(stub, BASE);

    let err = catalog.load_topics().await.unwrap_err();
    assert!(matches!(err, CatalogError::Load(_)));
    assert!(catalog.topics().is_empty());
}

#[tokio::test]
async fn load_topics_fails_on_empty_topic_list() {
    let stub = StubHttp::new();
    stub.set("http://test/data/topics.json", json!({ "topics": [] }));
    let mut catalog = QuestionCatalog::with_http(stub, BASE);

    let err = catalog.load_topics().await.unwrap_err();
    assert!(matches!(err, CatalogError::Load(_)));
}

#[tokio::test]
async fn failed_reload_keeps_the_previous_topic_list() -> Result<()> {
    let stub = seeded_stub();
    let mut catalog = QuestionCatalog::with_http(stub.clone(), BASE);
    catalog.load_topics().await?;

    stub.remove("http://test/data/topics.json");
    assert!(catalog.load_topics().await.is_err());
    assert_eq!(catalog.topics().len(), 3);
    Ok(())
}

#[tokio::test]
async fn counts_every_topic_even_when_some_fetches_fail() -> Result<()> {
    let stub = seeded_stub();
    let mut catalog = QuestionCatalog::with_http(stub, BASE);
    catalog.load_topics().await?;

    let counts = catalog.topic_question_counts(catalog.topics()).await;
    assert_eq!(counts.len(), 3);
    assert_eq!(counts["psr"], 5);
    assert_eq!(counts["current_affairs"], 3);
    assert_eq!(counts["broken"], 0);
    Ok(())
}

#[tokio::test]
async fn looks_up_subcategory_counts() -> Result<()> {
    let stub = seeded_stub();
    let mut catalog = QuestionCatalog::with_http(stub, BASE);
    catalog.load_topics().await?;
    let topics: Vec<_> = catalog.topics().to_vec();

    let current_affairs = &topics[1];
    assert_eq!(
        catalog.question_count_for_subcategory(current_affairs, "b").await,
        1
    );
    assert_eq!(
        catalog.question_count_for_subcategory(current_affairs, "z").await,
        0
    );

    let psr = &topics[0];
    assert_eq!(
        catalog.question_count_for_subcategory(psr, "psr_leave").await,
        3
    );

    let broken = &topics[2];
    assert_eq!(catalog.question_count_for_subcategory(broken, "any").await, 0);
    Ok(())
}

#[tokio::test]
async fn totals_one_topic() -> Result<()> {
    let stub = seeded_stub();
    let mut catalog = QuestionCatalog::with_http(stub, BASE);
    catalog.load_topics().await?;
    let topics: Vec<_> = catalog.topics().to_vec();

    assert_eq!(catalog.total_question_count_for_topic(&topics[0]).await, 5);
    assert_eq!(catalog.total_question_count_for_topic(&topics[2]).await, 0);
    Ok(())
}

#[tokio::test]
async fn malformed_question_file_counts_zero() -> Result<()> {
    let stub = seeded_stub();
    stub.set("http://test/data/broken.json", json!("just a string"));
    let mut catalog = QuestionCatalog::with_http(stub, BASE);
    catalog.load_topics().await?;

    let counts = catalog.topic_question_counts(catalog.topics()).await;
    assert_eq!(counts["broken"], 0);
    Ok(())
}
