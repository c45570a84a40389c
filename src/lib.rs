pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod logging;
pub mod schema;
pub mod types;

pub use catalog::QuestionCatalog;
pub use error::{CatalogError, Result};
pub use schema::{count_questions, QuestionFile};
