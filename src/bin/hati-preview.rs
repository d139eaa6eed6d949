//! Render a press, hold and release sequence of the highlight ring to PNGs.
//!
//! Usage: `hati-preview [settings.json] [out_dir]`

use anyhow::{Context, Result};
use hati_overlay::animation::ClickAnimator;
use hati_overlay::render::{DrawSettings, RingRenderer};
use hati_overlay::{ModifierMask, Settings};
use std::path::{Path, PathBuf};

const PRESS_TICKS: usize = 10;
const RELEASE_TICKS: usize = 10;

fn main() -> Result<()> {
    hati_overlay::init_tracing();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path))
            .with_context(|| format!("Failed to load settings from {}", path))?,
        None => Settings::default(),
    }
    .sanitized();
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("preview"));

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let draw = DrawSettings::build(&settings, None);
    let mut renderer = RingRenderer::new();
    let mut click = ClickAnimator::new();

    let masks = std::iter::repeat(ModifierMask::BUTTON1)
        .take(PRESS_TICKS)
        .chain(std::iter::repeat(ModifierMask::NONE).take(RELEASE_TICKS));

    for (frame, mask) in masks.enumerate() {
        click.update(mask);
        let state = click.state();
        let pixmap = renderer
            .render(Some(&draw), &state)
            .context("Nothing to render for these settings")?;

        let path = out_dir.join(format!("frame-{:03}.png", frame));
        pixmap
            .save_png(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!("Wrote {} (progress {:.2})", path.display(), state.progress);
    }

    tracing::info!(
        "Rendered {} frames of {}x{} to {}",
        PRESS_TICKS + RELEASE_TICKS,
        draw.canvas_size(),
        draw.canvas_size(),
        out_dir.display()
    );
    Ok(())
}
