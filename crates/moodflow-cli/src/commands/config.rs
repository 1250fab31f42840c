//! `moodflow config`: show the effective configuration.

use clap::Args;
use tracing::error;

use moodflow_core::Config;

const MASK: &str = "***";

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print credentials unmasked
    #[arg(long)]
    pub show_secrets: bool,
}

pub fn handle_config(args: ConfigArgs, config: &Config) -> i32 {
    let shown = if args.show_secrets {
        config.clone()
    } else {
        masked(config)
    };

    match serde_json::to_string_pretty(&shown) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            error!(error = %e, "failed to serialize configuration");
            eprintln!("error: {}", e);
            1
        }
    }
}

fn masked(config: &Config) -> Config {
    let mask = |v: &Option<String>| v.as_ref().map(|_| MASK.to_string());
    let mut out = config.clone();
    out.llm.api_key = mask(&config.llm.api_key);
    out.sentiment.api_key = mask(&config.sentiment.api_key);
    out.weather.api_key = mask(&config.weather.api_key);
    out.music.client_id = mask(&config.music.client_id);
    out.music.client_secret = mask(&config.music.client_secret);
    out
}
