use serde::Deserialize;
use serde_json::Value;

/// Raw question payload as authored in the data files. The catalog only
/// counts questions, so their inner fields stay opaque.
pub type QuestionData = Value;

/// One entry of the topic index, pointing at the file that holds the
/// topic's questions. Index files carry extra presentation fields
/// (description, icon, subcategory metadata) which are ignored here.
#[derive(Debug, Clone, Deserialize)]
pub struct Topic {
    pub id: String,
    pub file: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// The topic index document: `{ "topics": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicIndex {
    #[serde(default)]
    pub topics: Vec<Topic>,
}

/// A named grouping of questions within a topic file.
#[derive(Debug, Clone)]
pub struct Subcategory {
    pub id: String,
    pub questions: Vec<QuestionData>,
}

impl Subcategory {
    /// Build a subcategory from a raw JSON object, tolerating drift: a
    /// missing id becomes empty, a missing or non-array `questions` field
    /// becomes an empty list.
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: value
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            questions: value
                .get("questions")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
        }
    }

    /// Number of questions in this subcategory. No fetch involved.
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// A domain groups subcategory-like entries under a `topics` array. Only
/// the newest schema generation uses it.
#[derive(Debug, Clone)]
pub struct Domain {
    pub id: String,
    pub topics: Vec<Subcategory>,
}

impl Domain {
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: value
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            topics: value
                .get("topics")
                .and_then(Value::as_array)
                .map(|entries| entries.iter().map(Subcategory::from_value).collect())
                .unwrap_or_default(),
        }
    }
}
