use analysis::PostAnalyzer;
use clap::Parser;
use export::{ExportOutcome, Exporter};
use reddit_client::RedditClient;
use scanner::Scanner;
use std::path::PathBuf;
use std::process::ExitCode;
use sublens_core::{AppConfig, CollectorError};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Collect keyword-matched Reddit posts with sentiment metrics", long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "sublens.toml")]
    config: PathBuf,
}

enum RunOutcome {
    Exported { records: usize },
    NoData,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter("sublens=info,sublens_core=info,reddit_client=info,scanner=info,analysis=info,export=info")
        .init();

    let args = Args::parse();

    match run(&args).await {
        Ok(RunOutcome::Exported { records }) => {
            info!("Processed {} posts", records);
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::NoData) => {
            warn!("No data found");
            ExitCode::from(2)
        }
        Err(CollectorError::Config(e)) => {
            error!("Configuration error: {}", e);
            ExitCode::from(1)
        }
        Err(e) => {
            error!("Run failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<RunOutcome, CollectorError> {
    let config = AppConfig::load(&args.config)?;
    config.validate()?;

    info!(
        "Starting scan of {} subreddits. Metrics: sentiment, disclaimers, engagement",
        config.scan.subreddits.len()
    );

    // Fail fast on model load and pattern compilation, before any network I/O
    let analyzer = PostAnalyzer::new(
        &config.scan.disclaimer_terms,
        &config.scan.influencer_terms,
        config.limits.comments_per_post,
    )?;

    let mut client = RedditClient::new(config.reddit.clone());
    client.authenticate().await?;

    let scanner = Scanner::new(
        client,
        analyzer,
        &config.scan.influencer_terms,
        config.limits.clone(),
    )?;
    let report = scanner.scan_all(&config.scan.subreddits).await;

    for failure in &report.failures {
        warn!(
            "r/{} contributed no records: {}",
            failure.subreddit, failure.reason
        );
    }
    if report.is_degraded() {
        warn!(
            "Run degraded: {} of {} subreddits failed",
            report.failures.len(),
            config.scan.subreddits.len()
        );
    }

    let exporter = Exporter::new(&config.output.csv_path, &config.output.json_path);
    match exporter.export(&report.records)? {
        ExportOutcome::NoData => Ok(RunOutcome::NoData),
        ExportOutcome::Written { records } => {
            info!(
                "Metrics saved to {} and {}",
                config.output.csv_path.display(),
                config.output.json_path.display()
            );
            Ok(RunOutcome::Exported { records })
        }
    }
}
