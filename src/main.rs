use clap::{Parser, Subcommand};
use tracing::error;

use cbt_catalog::config::Config;
use cbt_catalog::logging;
use cbt_catalog::types::Topic;
use cbt_catalog::QuestionCatalog;

#[derive(Parser)]
#[command(name = "cbt_catalog")]
#[command(about = "Promotion CBT quiz data catalog")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the topics from the index
    Topics,
    /// Show the question count for every topic
    Counts,
    /// Show the question count of one subcategory within a topic
    Subcategory {
        /// Topic id from the index
        #[arg(long)]
        topic: String,
        /// Subcategory id within the topic's file
        #[arg(long)]
        id: String,
    },
    /// Show the total question count of one topic
    TopicTotal {
        /// Topic id from the index
        #[arg(long)]
        topic: String,
    },
}

fn find_topic<'a>(catalog: &'a QuestionCatalog, topic_id: &str) -> Option<&'a Topic> {
    catalog.topics().iter().find(|t| t.id == topic_id)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load_from(&cli.config)?;

    let mut catalog = QuestionCatalog::new(config.catalog.base_url);
    if let Err(e) = catalog.load_topics().await {
        error!("Topic index load failed: {e}");
        anyhow::bail!("could not load topic index: {e}");
    }

    match cli.command {
        Commands::Topics => {
            println!("📚 {} topics:", catalog.topics().len());
            for topic in catalog.topics() {
                let name = topic.name.as_deref().unwrap_or(&topic.id);
                println!("   {} — {} ({})", topic.id, name, topic.file);
            }
        }
        Commands::Counts => {
            let counts = catalog.topic_question_counts(catalog.topics()).await;
            println!("📊 Question counts:");
            // Index order, not map order
            for topic in catalog.topics() {
                let count = counts.get(&topic.id).copied().unwrap_or(0);
                println!("   {:<24} {}", topic.id, count);
            }
            let total: usize = counts.values().sum();
            println!("   Total: {total}");
        }
        Commands::Subcategory { topic, id } => match find_topic(&catalog, &topic) {
            Some(t) => {
                let count = catalog.question_count_for_subcategory(t, &id).await;
                println!("📊 {topic}/{id}: {count} questions");
            }
            None => {
                println!("⚠️  Unknown topic: {topic}");
            }
        },
        Commands::TopicTotal { topic } => match find_topic(&catalog, &topic) {
            Some(t) => {
                let count = catalog.total_question_count_for_topic(t).await;
                println!("📊 {topic}: {count} questions");
            }
            None => {
                println!("⚠️  Unknown topic: {topic}");
            }
        },
    }

    Ok(())
}
