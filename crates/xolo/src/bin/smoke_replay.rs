//! # Smoke Replay
//!
//! Plays a scripted visitor session against a headless storefront and prints
//! what the smoke overlay did. No window, no GPU.
//!
//! ## Usage
//!
//! ```bash
//! smoke_replay --seconds 10 --width 1280 --height 720 --dpr 2
//! smoke_replay --config smoke.toml --dump last_frame.ppm
//! RUST_LOG=xolo_smoke=debug smoke_replay
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use tracing_subscriber::EnvFilter;
use xolo::smoke::{HeadlessHost, SmokeConfig, SmokeError, SmokeResult, Viewport};
use xolo::{SessionScript, Storefront};

struct Options {
    seconds: f64,
    width: f32,
    height: f32,
    dpr: f32,
    seed: Option<u64>,
    config: Option<PathBuf>,
    dump: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seconds: 10.0,
            width: 1280.0,
            height: 720.0,
            dpr: 1.0,
            seed: None,
            config: None,
            dump: None,
        }
    }
}

/// Parses arguments. `None` means help was printed.
fn parse_args() -> Option<Options> {
    let args: Vec<String> = std::env::args().collect();
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--seconds" | "-s", Some(v)) => {
                options.seconds = v.parse().unwrap_or(options.seconds);
                i += 1;
            }
            ("--width" | "-w", Some(v)) => {
                options.width = v.parse().unwrap_or(options.width);
                i += 1;
            }
            ("--height" | "-H", Some(v)) => {
                options.height = v.parse().unwrap_or(options.height);
                i += 1;
            }
            ("--dpr", Some(v)) => {
                options.dpr = v.parse().unwrap_or(options.dpr);
                i += 1;
            }
            ("--seed", Some(v)) => {
                options.seed = v.parse().ok();
                i += 1;
            }
            ("--config" | "-c", Some(v)) => {
                options.config = Some(PathBuf::from(v));
                i += 1;
            }
            ("--dump", Some(v)) => {
                options.dump = Some(PathBuf::from(v));
                i += 1;
            }
            ("--help" | "-h", _) => {
                println!("Usage: smoke_replay [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -s, --seconds <SECS>    Session length (default: 10)");
                println!("  -w, --width <PX>        Viewport width (default: 1280)");
                println!("  -H, --height <PX>       Viewport height (default: 720)");
                println!("      --dpr <RATIO>       Device pixel ratio (default: 1)");
                println!("      --seed <N>          RNG seed (default: from config or clock)");
                println!("  -c, --config <FILE>     Smoke config TOML");
                println!("      --dump <FILE>       Write the last frame as a PPM image");
                println!("  -h, --help              Show this help");
                return None;
            }
            (other, _) => eprintln!("ignoring argument {other}"),
        }
        i += 1;
    }
    Some(options)
}

/// Writes the canvas as binary PPM, alpha dropped.
fn write_ppm(path: &Path, width: u32, height: u32, rgba: &[u8]) -> SmokeResult<()> {
    let mut out = format!("P6\n{width} {height}\n255\n").into_bytes();
    out.reserve(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        out.extend_from_slice(&px[..3]);
    }
    fs::write(path, out).map_err(|source| SmokeError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn run(options: &Options) -> SmokeResult<()> {
    let mut config = match &options.config {
        Some(path) => SmokeConfig::load(path)?,
        None => SmokeConfig::default(),
    };
    if let Some(seed) = options.seed {
        config = config.with_seed(seed);
    }

    let viewport = Viewport::new(options.width, options.height, options.dpr);
    let mut page = Storefront::new(HeadlessHost::new(viewport), config);
    let script = SessionScript::with_duration(options.seconds * 1000.0);

    let started = Instant::now();
    let summary = script.run(&mut page);
    let elapsed = started.elapsed();

    println!("┌─ SMOKE REPLAY ──────────────────────────────────────────────┐");
    println!("│ Viewport:         {} x {} @ {}x", options.width, options.height, options.dpr);
    println!("│ Simulated:        {:.1} s", options.seconds);
    println!("│ Wall time:        {elapsed:?}");
    println!("│ Page refreshes:   {}", summary.refreshes);
    println!("│ Smoke frames:     {}", summary.frames);
    println!("│ Input events:     {}", summary.events);
    println!("│ Peak active:      {}", summary.peak_active);
    println!("│ Peak drawn:       {}", summary.peak_drawn);
    println!("│ Mean drawn:       {:.1}", summary.mean_drawn());
    println!("│ Spawned:          {}", summary.engine.spawned);
    println!("│ Dropped (cap):    {}", summary.engine.dropped);
    println!("│ Retired expired:  {}", summary.engine.retired_expired);
    println!("│ Retired offscr.:  {}", summary.engine.retired_offscreen);
    println!("│ Records created:  {}", summary.engine.allocated);
    println!("└─────────────────────────────────────────────────────────────┘");

    if let Some(path) = &options.dump {
        if let Some(surface) = page.smoke().surface() {
            let canvas = surface.canvas();
            write_ppm(path, canvas.width(), canvas.height(), &canvas.to_rgba8())?;
            println!("Last frame written to {}", path.display());
        }
    }

    page.teardown();
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let Some(options) = parse_args() else {
        return ExitCode::SUCCESS;
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "replay failed");
            eprintln!("smoke_replay: {err}");
            ExitCode::FAILURE
        }
    }
}
