use anyhow::{Context, Result};
use clap::Parser;
use stagehand_engine::logging::init_logging;
use stagehand_engine::window::{Headless, LogPresenter, Runtime};
use stagehand_scene::Player;

mod cli;
mod demo;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logging());

    let mut player = Player::new(cli.player()).context("failed to create the object space")?;
    let size = (cli.width as f32, cli.height as f32);
    let mut scene = None;
    player
        .setup(|heap, stage| {
            scene = Some(demo::build(heap, stage, size)?);
            Ok(())
        })
        .context("failed to build the demo scene")?;
    let scene = scene.context("demo scene was not built")?;

    if !cli.headless {
        return Runtime::run(cli.runtime(), player, LogPresenter::default());
    }

    let report = Headless::new(cli.frames, cli.step()).run(&mut player, |frame, input| {
        if let Some(event) = demo::scripted_input(frame, size) {
            input.push_event(event);
        }
    });
    let label = player
        .heap_mut()
        .call(scene.label, "text", &[])
        .context("failed to read the label")?;
    log::info!(
        "headless run: {} frames, {} draw items in the last frame, label {:?}",
        report.frames_run,
        report.last_frame.len(),
        label.as_str().unwrap_or_default()
    );
    Ok(())
}
