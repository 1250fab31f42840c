//! `moodflow analyze`: one pipeline pass, printed as JSON on stdout.

use anyhow::Context;
use clap::Args;
use tracing::{error, info};

use moodflow_agent::Orchestrator;
use moodflow_core::Config;

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Free-text mood description
    #[arg(short, long)]
    pub text: String,

    /// City used for the weather lookup
    #[arg(short, long)]
    pub city: String,

    /// Optional event message (mail, chat, feedback) to classify
    #[arg(short, long)]
    pub event: Option<String>,

    /// Micro signal: 1, 0 or -1. Anything else counts as 0.
    #[arg(short, long, allow_hyphen_values = true)]
    pub micro: Option<String>,

    /// Seed for the recommendation draw
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Run the pipeline and print the result.
///
/// # Returns
///
/// Exit code 0 on success, 1 on any error.
pub async fn handle_analyze(args: AnalyzeArgs, config: &Config) -> i32 {
    match run(&args, config).await {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            error!(error = %e, "analyze failed");
            eprintln!("error: {:#}", e);
            1
        }
    }
}

async fn run(args: &AnalyzeArgs, config: &Config) -> anyhow::Result<String> {
    let orchestrator =
        Orchestrator::from_config(config, args.seed).context("failed to set up collaborators")?;

    let result = orchestrator
        .process(
            &args.text,
            &args.city,
            args.event.as_deref(),
            micro_input(args.micro.as_deref()),
        )
        .await?;
    info!(
        request_id = %result.request_id,
        emotion = %result.final_emotion,
        "analysis complete"
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    Ok(json)
}

/// Raw micro input as an integer. Unparseable input counts as missing.
fn micro_input(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse().ok())
}
