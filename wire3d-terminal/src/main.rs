/// wire3d - wireframe viewer driven by typed commands
///
/// Logs go to stderr; redirect them (`2>wire3d.log`) when drawing to the
/// terminal.
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufReader};
use wire3d_core::{loader, Command, PointCloud, SceneRegistry};
use wire3d_terminal::{Config, SinkKind, TerminalApp, TerminalSink, TextSink};

/// Edge length of the `--demo-cube` model, in scene units
const DEMO_CUBE_SIZE: f32 = 100.0;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    log::debug!("configuration: {config:?}");

    let mut registry = SceneRegistry::new();
    let mut first = None;
    if config.demo_cube {
        registry.insert("cube", PointCloud::cube(DEMO_CUBE_SIZE).into());
        first = Some("cube".to_string());
    }
    for path in &config.scenes {
        match loader::load_model_file(path) {
            Ok((name, model)) => {
                first.get_or_insert_with(|| name.clone());
                registry.insert(name, model);
            }
            Err(e) => log::error!("{e}"),
        }
    }
    if registry.is_empty() {
        log::warn!("no models loaded; every command will be rejected (pass scene files or --demo-cube)");
    } else {
        log::info!("models: {}", registry.names().join(", "));
    }

    let mut app = TerminalApp::new(config.loop_config(), registry);

    // Draw the first model once before any operator input.
    if let Some(name) = first {
        app.commands()
            .publish(Command::rotate(name, 0.0, 0.0, 0.0))
            .context("failed to queue the initial frame")?;
    }

    let input = BufReader::new(io::stdin());
    match config.sink {
        SinkKind::Terminal => {
            let mut sink = TerminalSink::stdout().context("failed to open the terminal")?;
            app.run(input, &mut sink)?;
        }
        SinkKind::Text => {
            let mut sink = TextSink::new(io::stdout(), config.text_viewport());
            app.run(input, &mut sink)?;
        }
    }

    Ok(())
}
