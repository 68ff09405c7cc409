//! Studio command-line entry point.
//!
//! Usage: `pvid-studio [status|select <product.json>|step <name>|settings <json>|generate|health|reset]`

use anyhow::{bail, Context};
use tracing::{error, info};

use pvid_models::{Product, VideoSettingsPatch, WorkflowStep};
use pvid_render::RenderClient;
use pvid_studio::{init_tracing, SaveOutcome, Studio, StudioConfig};

#[tokio::main]
async fn main() {
    let config = StudioConfig::load();

    if let Err(e) = init_tracing(config.log_format) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(config: StudioConfig) -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("status");
    let argument = args.get(1).map(String::as_str);

    info!("Starting pvid-studio: {}", command);

    if command == "health" {
        let client = RenderClient::new(config.render.clone())?;
        if !client.health_check().await? {
            bail!("Rendering service at {} is unhealthy", config.render.base_url);
        }
        println!("ok");
        return Ok(());
    }

    let mut studio = Studio::from_config(&config)?;

    match command {
        "status" => {}
        "select" => {
            let path = argument.context("select needs a product JSON file")?;
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path))?;
            let product: Product = serde_json::from_str(&raw).context("Invalid product JSON")?;
            report(studio.progress_mut().set_product(product)?);
        }
        "step" => {
            let step: WorkflowStep = argument.context("step needs a step name")?.parse()?;
            report(studio.progress_mut().set_active_step(step)?);
        }
        "settings" => {
            let raw = argument.context("settings needs a JSON object")?;
            let patch: VideoSettingsPatch =
                serde_json::from_str(raw).context("Invalid settings JSON")?;
            report(studio.progress_mut().set_video_settings(patch)?);
        }
        "generate" => {
            let result = studio.generate_from_progress().await;
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.is_success() {
                bail!(
                    "Generation failed: {}",
                    result.failure_message().unwrap_or_default()
                );
            }
            return Ok(());
        }
        "reset" => studio.progress_mut().reset()?,
        other => bail!("Unknown command: {}", other),
    }

    println!("{}", serde_json::to_string_pretty(studio.progress().progress())?);
    Ok(())
}

fn report(outcome: SaveOutcome) {
    match outcome {
        SaveOutcome::Saved(at) => info!("Progress saved at {}", at),
        SaveOutcome::Skipped => info!("Nothing saved yet, select a product first"),
    }
}
