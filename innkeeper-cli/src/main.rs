//! innkeeper command line: QA over the indexed corpus, plus the
//! dashboard aggregates for a cleaned bookings CSV.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use innkeeper_analytics::{DashboardSummary, load_bookings_from_path};
use innkeeper_embed::{EmbedConfig, HttpEmbedProvider};
use innkeeper_index::{HttpVectorIndex, IndexConfig};
use innkeeper_rag::generate::{GenerateConfig, HttpGenerator};
use innkeeper_rag::{QaPipeline, RetryPolicy};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "innkeeper",
    version,
    about = "Hotel-bookings QA assistant and analytics"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask a question against the indexed document corpus
    Ask {
        /// The question to answer
        question: String,
        #[command(flatten)]
        services: ServiceArgs,
    },
    /// Print the dashboard aggregates for a cleaned bookings CSV
    Stats {
        /// Path to the cleaned bookings CSV
        csv: PathBuf,
        /// How many countries the booking-count ranking shows
        #[arg(long, default_value_t = 15)]
        top_countries: usize,
    },
}

#[derive(Args)]
struct ServiceArgs {
    /// Embedding service base URL
    #[arg(long, env = "INNKEEPER_EMBED_URL")]
    embed_url: String,
    /// Embedding model identifier
    #[arg(long, default_value = "all-mpnet-base-v2")]
    embed_model: String,
    /// Vector index base URL
    #[arg(long, env = "INNKEEPER_INDEX_URL")]
    index_url: String,
    /// Vector index name
    #[arg(long, default_value = "bookings")]
    index_name: String,
    /// Vector index API key
    #[arg(long, env = "INNKEEPER_INDEX_API_KEY", hide_env_values = true)]
    index_api_key: Option<String>,
    /// Generative model service base URL
    #[arg(
        long,
        env = "INNKEEPER_GENAI_URL",
        default_value = "https://generativelanguage.googleapis.com"
    )]
    genai_url: String,
    /// Generative model identifier
    #[arg(long, default_value = "gemini-1.5-flash")]
    genai_model: String,
    /// Generative model API key
    #[arg(long, env = "INNKEEPER_GENAI_API_KEY", hide_env_values = true)]
    genai_api_key: Option<String>,
    /// Matches consumed per retrieval
    #[arg(long, default_value_t = innkeeper_rag::DEFAULT_TOP_K)]
    top_k: usize,
    /// Per-call timeout in seconds for the embedding, index and
    /// generation calls
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
    /// Additional attempts after a failed embedding or index call
    #[arg(long, default_value_t = 0)]
    max_retries: u32,
}

fn build_pipeline(args: &ServiceArgs) -> Result<QaPipeline> {
    let timeout = Duration::from_secs(args.timeout_secs);

    let embed_config =
        EmbedConfig::new(&args.embed_url, &args.embed_model).with_timeout(timeout);
    let embedder = HttpEmbedProvider::new(embed_config)?;

    let mut index_config =
        IndexConfig::new(&args.index_url, &args.index_name).with_timeout(timeout);
    if let Some(key) = &args.index_api_key {
        index_config = index_config.with_api_key(key);
    }
    let index = HttpVectorIndex::new(index_config)?;

    let mut genai_config =
        GenerateConfig::new(&args.genai_url, &args.genai_model).with_timeout(timeout);
    if let Some(key) = &args.genai_api_key {
        genai_config = genai_config.with_api_key(key);
    }
    let generator = HttpGenerator::new(genai_config)?;

    Ok(
        QaPipeline::new(Arc::new(embedder), Arc::new(index), Arc::new(generator))
            .with_top_k(args.top_k)
            .with_retry_policy(RetryPolicy {
                max_retries: args.max_retries,
                ..RetryPolicy::default()
            }),
    )
}

async fn run_ask(question: &str, services: &ServiceArgs) -> Result<()> {
    if question.trim().is_empty() {
        eprintln!("Please enter a question to get an answer.");
        return Ok(());
    }

    let pipeline = build_pipeline(services)?;
    let answer = pipeline.ask(question).await?;
    if !answer.is_answered() {
        tracing::warn!("showing generation failure text as the answer");
    }

    println!("Answer");
    println!("{}", answer.text);
    Ok(())
}

fn run_stats(csv: &PathBuf, top_n: usize) -> Result<()> {
    let bookings = load_bookings_from_path(csv)
        .with_context(|| format!("failed to load bookings from {}", csv.display()))?;
    let summary = DashboardSummary::compute(&bookings, top_n);

    println!("Hotel Booking Analytics ({} bookings)", bookings.len());

    println!("\n1. Monthly revenue");
    for ((year, month), revenue) in &summary.monthly_revenue {
        println!("   {year}-{month:02}: {revenue:.2}");
    }

    println!(
        "\n2. Cancellation rate: {:.2}% of total bookings",
        summary.cancellation_rate
    );

    println!("\n3. Top {top_n} countries by bookings");
    for (country, count) in &summary.top_countries {
        println!("   {country}: {count}");
    }

    println!("\n4. Lead time distribution (days)");
    for (bin, count) in &summary.lead_time_histogram {
        let end = bin + innkeeper_analytics::stats::LEAD_TIME_BIN_DAYS - 1;
        println!("   {bin}-{end}: {count}");
    }

    println!("\n5. Market segments");
    for (segment, count) in &summary.market_segment_counts {
        println!("   {segment}: {count}");
    }

    println!("\n6. Average daily rate by hotel");
    for (hotel, adr) in &summary.adr_by_hotel {
        println!(
            "   {hotel}: mean {:.2} (min {:.2}, max {:.2}, n={})",
            adr.mean, adr.min, adr.max, adr.bookings
        );
    }

    println!("\n7. Booking changes (fewer than 5)");
    for (changes, count) in &summary.booking_changes_counts {
        println!("   {changes}: {count}");
    }

    println!("\n8. Special requests");
    for (requests, count) in &summary.special_requests_counts {
        println!("   {requests}: {count}");
    }

    println!("\n9. Cancellation rate by deposit type");
    for (deposit, rate) in &summary.cancellation_rate_by_deposit {
        println!("   {deposit}: {rate:.2}%");
    }

    println!(
        "\n10. Repeated guests: {:.2}%",
        summary.repeated_guest_share
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Ask { question, services } => run_ask(question, services).await,
        Command::Stats { csv, top_countries } => run_stats(csv, *top_countries),
    }
}
