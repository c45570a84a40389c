//! The question catalog: topic index loading and per-topic question counts.

use crate::constants::{join_url, TOPICS_INDEX_PATH};
use crate::error::{CatalogError, Result};
use crate::http::{HttpPort, ReqwestHttp};
use crate::schema::{count_questions, QuestionFile};
use crate::types::{Topic, TopicIndex};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Loads the topic index and computes question counts from the per-topic
/// data files, tolerating every schema generation the app has shipped.
///
/// The catalog owns its topic list: it is empty until [`load_topics`]
/// succeeds and is only replaced by a subsequent successful load.
///
/// [`load_topics`]: QuestionCatalog::load_topics
pub struct QuestionCatalog {
    http: Arc<dyn HttpPort>,
    base_url: String,
    topics: Vec<Topic>,
}

impl QuestionCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(Arc::new(ReqwestHttp::new()), base_url)
    }

    pub fn with_http(http: Arc<dyn HttpPort>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            topics: Vec::new(),
        }
    }

    /// Fetch and parse the topic index, replacing the cached topic list.
    ///
    /// Fails with [`CatalogError::Load`] when the index cannot be fetched,
    /// cannot be parsed, or parses to an empty topic list; the previously
    /// loaded list is kept untouched in every failure case.
    #[instrument(skip(self))]
    pub async fn load_topics(&mut self) -> Result<&[Topic]> {
        let url = join_url(&self.base_url, TOPICS_INDEX_PATH);
        let value = self
            .http
            .get_json(&url)
            .await
            .map_err(|e| CatalogError::Load(e.to_string()))?;
        let index: TopicIndex =
            serde_json::from_value(value).map_err(|e| CatalogError::Load(e.to_string()))?;
        if index.topics.is_empty() {
            return Err(CatalogError::Load("topic index contains no topics".into()));
        }
        info!("Loaded {} topics from {}", index.topics.len(), url);
        self.topics = index.topics;
        Ok(&self.topics)
    }

    /// The cached topic list; empty if the index was never loaded.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    async fn fetch_question_file(&self, topic: &Topic) -> Result<QuestionFile> {
        let url = join_url(&self.base_url, &topic.file);
        let value = self.http.get_json(&url).await?;
        let file = QuestionFile::detect(&value);
        debug!(topic = %topic.id, "Classified question file");
        Ok(file)
    }

    /// Question count per topic, fetched concurrently.
    ///
    /// Every input topic gets an entry. A topic whose file cannot be
    /// fetched or parsed reports zero questions; its failure is logged but
    /// never aborts the other topics.
    pub async fn topic_question_counts(&self, topics: &[Topic]) -> HashMap<String, usize> {
        let fetches = topics.iter().map(|topic| async move {
            let outcome = self
                .fetch_question_file(topic)
                .await
                .map(|file| count_questions(&file));
            (topic.id.clone(), outcome)
        });

        join_all(fetches)
            .await
            .into_iter()
            .map(|(id, outcome)| match outcome {
                Ok(count) => (id, count),
                Err(e) => {
                    warn!(topic = %id, "Failed to load question file, counting 0: {e}");
                    (id, 0)
                }
            })
            .collect()
    }

    /// Question count of one subcategory within a topic's file, or zero if
    /// the subcategory is absent or the file cannot be loaded.
    pub async fn question_count_for_subcategory(
        &self,
        topic: &Topic,
        subcategory_id: &str,
    ) -> usize {
        match self.fetch_question_file(topic).await {
            Ok(file) => file
                .find_subcategory(subcategory_id)
                .map(|sub| sub.question_count())
                .unwrap_or(0),
            Err(e) => {
                warn!(topic = %topic.id, subcategory = %subcategory_id,
                    "Failed to load question file, counting 0: {e}");
                0
            }
        }
    }

    /// Total question count of a topic's file, or zero on any error.
    pub async fn total_question_count_for_topic(&self, topic: &Topic) -> usize {
        match self.fetch_question_file(topic).await {
            Ok(file) => count_questions(&file),
            Err(e) => {
                warn!(topic = %topic.id, "Failed to load question file, counting 0: {e}");
                0
            }
        }
    }
}
