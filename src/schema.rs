//! Schema detection and question counting for topic data files.
//!
//! The question files were authored over several generations of the app and
//! four shapes coexist in production data: domain-grouped, flat array,
//! `subcategories`-keyed, and the legacy `psr_categories` mapping. Each file
//! is classified once at the data boundary into a [`QuestionFile`] variant;
//! everything downstream pattern-matches instead of re-sniffing fields.

use crate::types::{Domain, QuestionData, Subcategory};
use serde_json::Value;
use std::collections::BTreeMap;

/// A topic data file, classified into exactly one known shape.
#[derive(Debug, Clone)]
pub enum QuestionFile {
    /// `{ "domains": [ { "topics": [ { "questions": [...] } ] } ] }`
    Domains(Vec<Domain>),
    /// The file itself is a JSON array of subcategory-like objects.
    FlatSubcategories(Vec<Subcategory>),
    /// `{ "subcategories": [ { "id", "questions": [...] } ] }`
    Subcategories(Vec<Subcategory>),
    /// Legacy `{ "psr_categories": { "<id>": { "questions": [...] } } }`
    LegacyCategories(BTreeMap<String, Subcategory>),
    /// `{ "questions": [...] }` with no grouping at all.
    FlatQuestions(Vec<QuestionData>),
    /// None of the known shapes; counts as zero questions.
    Unrecognized,
}

impl QuestionFile {
    /// Classify a parsed JSON document into its schema generation.
    ///
    /// Precedence is fixed and deliberate: a file matching several shapes
    /// (mixed legacy data exists) is governed by the first match, checked
    /// in the order domains, array file, subcategories, psr_categories,
    /// flat questions.
    pub fn detect(value: &Value) -> Self {
        if let Some(domains) = value.get("domains").and_then(Value::as_array) {
            return Self::Domains(domains.iter().map(Domain::from_value).collect());
        }
        if let Some(entries) = value.as_array() {
            return Self::FlatSubcategories(entries.iter().map(Subcategory::from_value).collect());
        }
        if let Some(subs) = value.get("subcategories").and_then(Value::as_array) {
            return Self::Subcategories(subs.iter().map(Subcategory::from_value).collect());
        }
        if let Some(categories) = value.get("psr_categories").and_then(Value::as_object) {
            let map = categories
                .iter()
                .map(|(id, entry)| {
                    let mut sub = Subcategory::from_value(entry);
                    // The mapping key is authoritative for legacy files
                    sub.id = id.clone();
                    (id.clone(), sub)
                })
                .collect();
            return Self::LegacyCategories(map);
        }
        if let Some(questions) = value.get("questions").and_then(Value::as_array) {
            return Self::FlatQuestions(questions.clone());
        }
        Self::Unrecognized
    }

    /// Find a subcategory by id under whichever shape applies.
    pub fn find_subcategory(&self, subcategory_id: &str) -> Option<&Subcategory> {
        match self {
            Self::Domains(domains) => domains
                .iter()
                .flat_map(|domain| domain.topics.iter())
                .find(|sub| sub.id == subcategory_id),
            Self::FlatSubcategories(subs) | Self::Subcategories(subs) => {
                subs.iter().find(|sub| sub.id == subcategory_id)
            }
            Self::LegacyCategories(map) => map.get(subcategory_id),
            Self::FlatQuestions(_) | Self::Unrecognized => None,
        }
    }
}

/// Total question count of a classified file: the sum of `questions`
/// lengths across all nested subcategories, zero for unrecognized shapes.
pub fn count_questions(file: &QuestionFile) -> usize {
    match file {
        QuestionFile::Domains(domains) => domains
            .iter()
            .flat_map(|domain| domain.topics.iter())
            .map(Subcategory::question_count)
            .sum(),
        QuestionFile::FlatSubcategories(subs) | QuestionFile::Subcategories(subs) => {
            subs.iter().map(Subcategory::question_count).sum()
        }
        QuestionFile::LegacyCategories(map) => {
            map.values().map(Subcategory::question_count).sum()
        }
        QuestionFile::FlatQuestions(questions) => questions.len(),
        QuestionFile::Unrecognized => 0,
    }
}
