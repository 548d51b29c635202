//! Render every catalog sound to a WAV file.
//!
//! ```text
//! render-sounds [OUT_DIR]     (default: sounds/rendered)
//! ```
//!
//! Writes `<key>.wav` per sound plus an `index.json` manifest.
//! Set `RUST_LOG=debug` for verbose output.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use serde::Serialize;
use softos::sound::write_wav;
use softos::{AudioResult, OfflineRenderer, SoundEngine, SoundName};

const DEFAULT_OUT_DIR: &str = "sounds/rendered";

#[derive(Debug, Serialize)]
struct Rendered {
  name: SoundName,
  file: String,
  seconds: f64,
  peak: f32,
}

fn render(name: SoundName, out_dir: &Path) -> AudioResult<Rendered> {
  let renderer = OfflineRenderer::default();
  let engine = SoundEngine::new(Arc::new(renderer.clone()));
  engine.play(name)?;

  let samples = renderer.render_all();
  let file = format!("{}.wav", name.key());
  write_wav(out_dir.join(&file), &samples, renderer.sample_rate())?;

  let peak = samples.iter().fold(0.0f32, |peak, s| peak.max(s.abs()));
  #[allow(clippy::cast_precision_loss)]
  let seconds = samples.len() as f64 / f64::from(renderer.sample_rate());
  Ok(Rendered {
    name,
    file,
    seconds,
    peak,
  })
}

fn main() -> ExitCode {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let out_dir = std::env::args()
    .nth(1)
    .map_or_else(|| PathBuf::from(DEFAULT_OUT_DIR), PathBuf::from);
  if let Err(e) = std::fs::create_dir_all(&out_dir) {
    log::error!("Cannot create {}: {e}", out_dir.display());
    return ExitCode::FAILURE;
  }

  let mut manifest = Vec::with_capacity(SoundName::ALL.len());
  for name in SoundName::ALL {
    match render(name, &out_dir) {
      Ok(rendered) => {
        log::info!(
          "{name}: {:.2}s, peak {:.3} -> {}",
          rendered.seconds,
          rendered.peak,
          rendered.file
        );
        manifest.push(rendered);
      }
      Err(e) => log::error!("{name}: {e}"),
    }
  }

  let index = out_dir.join("index.json");
  let written = serde_json::to_string_pretty(&manifest)
    .map_err(|e| e.to_string())
    .and_then(|json| std::fs::write(&index, json).map_err(|e| e.to_string()));
  if let Err(e) = written {
    log::error!("Cannot write {}: {e}", index.display());
    return ExitCode::FAILURE;
  }

  if manifest.len() == SoundName::ALL.len() {
    ExitCode::SUCCESS
  } else {
    ExitCode::FAILURE
  }
}
