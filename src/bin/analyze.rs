use clap::Parser;
use dotenvy::dotenv;
use std::io::Read;
use tracing_subscriber::{fmt, EnvFilter};

use sentiment_backend::{
    analysis::{
        analyzer::{Analyzer, LocalAnalyzer},
        lifecycle::AnalysisSession,
    },
    api::analyzer_client::AnalyzerClient,
    handlers::review_dtos::ReviewSubmission,
    scoring::scorer::AnalysisResult,
};

#[derive(Parser, Debug)]
#[command(name = "analyze")]
#[command(about = "Score the sentiment of a product review")]
struct Args {
    /// Review text; read from stdin when omitted
    text: Vec<String>,

    /// Base URL of a running sentiment backend; scores locally when unset
    #[arg(short, long, env = "ANALYZER_URL")]
    remote: Option<String>,

    /// Store the finished analysis on the remote backend
    #[arg(short, long, requires = "remote")]
    save: bool,

    /// List recently stored reviews instead of analyzing
    #[arg(long, requires = "remote")]
    reviews: bool,

    /// Number of reviews to list
    #[arg(long, default_value = "10")]
    limit: u32,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = args.remote.as_deref().map(AnalyzerClient::new);

    if args.reviews {
        if let Some(client) = &client {
            let reviews = client.get_reviews(Some(args.limit)).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&reviews)?);
            } else {
                for review in reviews {
                    println!("#{:<5} {:<9} {:>3}  {}", review.id, review.sentiment, review.score, review.text);
                }
            }
        }
        return Ok(());
    }

    let text = if args.text.is_empty() {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        args.text.join(" ")
    };

    let result = match &client {
        Some(client) => run_submission(client, &text).await?,
        None => run_submission(&LocalAnalyzer::default(), &text).await?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    if args.save {
        if let Some(client) = &client {
            let submission = ReviewSubmission {
                text: text.trim().to_string(),
                sentiment: result.sentiment,
                score: result.score.round() as i32,
                confidence: result.confidence,
            };
            // Outcome is only logged; the printed result stands either way.
            let _ = client.submit_review_detached(submission).await;
        }
    }
    Ok(())
}

async fn run_submission<A: Analyzer>(analyzer: &A, text: &str) -> anyhow::Result<AnalysisResult> {
    let mut session = AnalysisSession::new();
    let result = session.submit(analyzer, text).await?;
    Ok(result.clone())
}

fn print_result(result: &AnalysisResult) {
    println!("Sentiment:  {}", result.sentiment);
    println!("Score:      {}", result.score);
    println!("Confidence: {}%", result.confidence);
    if !result.keywords.is_empty() {
        println!("Keywords:   {}", result.keywords.join(", "));
    }
}
