use clap::Parser;
use log::error;
use repirecipe_import::{AppConfig, RecipeImporter};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "repirecipe-import",
    version,
    about = "Extract a recipe (title, thumbnail, ingredients) from a recipe page or YouTube video"
)]
struct Cli {
    /// Recipe page or YouTube video URL
    url: String,

    /// Print single-line JSON instead of pretty-printed JSON
    #[arg(long)]
    compact: bool,

    /// HTTP timeout in seconds (overrides the configured timeout)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

async fn run(cli: Cli) -> Result<String, Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    let mut builder = RecipeImporter::builder().config(config);
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    let recipe = builder.build()?.import(&cli.url).await?;

    let json = if cli.compact {
        serde_json::to_string(&recipe)?
    } else {
        serde_json::to_string_pretty(&recipe)?
    };
    Ok(json)
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Recipe import failed: {}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
