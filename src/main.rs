use anyhow::Context;
use clap::Parser;
use hvacdraw::cli::Cli;
use hvacdraw::script::parse_script;
use hvacdraw::{init_logging, replay, ActionController, DocumentConfig, Scene};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let config = match &cli.config {
        Some(path) => DocumentConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DocumentConfig::load_or_default().context("Failed to load config")?,
    };
    info!(version = hvacdraw::VERSION, build = hvacdraw::BUILD_DATE, "HVACDraw replay");

    let scene_text = std::fs::read_to_string(&cli.scene)
        .with_context(|| format!("Failed to read scene {}", cli.scene.display()))?;
    let script_text = std::fs::read_to_string(&cli.script)
        .with_context(|| format!("Failed to read script {}", cli.script.display()))?;

    let mut store = Scene::from_json(&scene_text)?.into_store()?;
    let steps = parse_script(&script_text)?;
    let mut controller = ActionController::new(config);
    let report = replay(&mut controller, &mut store, &steps)?;

    let scene = Scene {
        shapes: store.iter().cloned().collect(),
    };
    let output = serde_json::json!({
        "report": report,
        "scene": scene,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
