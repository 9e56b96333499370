//! Dino Dash entry point
//!
//! Native builds run the simulation headless from the command line and draw
//! ASCII frames. The browser build enters through `dino_dash::web` instead.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use anyhow::{Context, Result};
#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

#[cfg(not(target_arch = "wasm32"))]
use dino_dash::{
    Game, QualityPreset, Settings,
    persistence::{MemoryStore, ScoreStore, file::FileStore},
    renderer::ascii::AsciiPresenter,
    sim::{GamePhase, autopilot},
};

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(name = "dino-dash")]
#[command(about = "Headless side-scrolling runner", long_about = None)]
struct Args {
    /// RNG seed (default: current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to run (60 ticks = 1 second of play)
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Let the demo player press jump
    #[arg(long)]
    autopilot: bool,

    /// Best-score file (default: in-memory, nothing persisted)
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Settings JSON file
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Quality preset (low, medium, high); overrides the settings file
    #[arg(long, value_parser = parse_quality)]
    quality: Option<QualityPreset>,

    /// Print a frame every N ticks (0 prints only the final frame)
    #[arg(long, default_value_t = 0)]
    render_every: u64,

    /// Log filter in env_logger syntax, e.g. "debug" or "dino_dash=debug"
    #[arg(long)]
    log: Option<String>,
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_quality(s: &str) -> Result<QualityPreset, String> {
    QualityPreset::parse(s).ok_or_else(|| format!("unknown quality preset '{}'", s))
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging(filter: Option<&str>) {
    let mut builder = env_logger::Builder::new();
    if let Some(filter) = filter {
        builder.parse_filters(filter);
    } else if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_deref());

    let seed = args.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });
    log::info!("Dino Dash (native) starting with seed {}", seed);

    let mut settings = match &args.settings {
        Some(path) => Settings::load_from(path).unwrap_or_else(|e| {
            log::warn!("Using default settings ({}): {}", path.display(), e);
            Settings::default()
        }),
        None => Settings::from_preset(args.quality.unwrap_or_default()),
    };
    if let Some(quality) = args.quality {
        settings.quality = quality;
    }
    log::info!(
        "Quality {} ({} particles max)",
        settings.quality.as_str(),
        settings.max_particles()
    );

    let store: Box<dyn ScoreStore> = match &args.store {
        Some(path) => Box::new(FileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    };

    let mut game = Game::new(seed, store).with_settings(&settings);
    let mut presenter = AsciiPresenter::new(std::io::stdout());

    game.begin_or_restart();
    for _ in 0..args.ticks {
        if args.autopilot && autopilot::should_jump(game.session()) {
            game.jump();
        }

        game.frame();

        let tick = game.session().time_ticks;
        if args.render_every > 0 && tick % args.render_every == 0 {
            game.present(&mut presenter);
        }

        if game.phase() == GamePhase::GameOver {
            break;
        }
    }

    game.present(&mut presenter);

    let session = game.session();
    let outcome = match session.phase {
        GamePhase::GameOver => "crashed",
        _ => "still running",
    };
    println!(
        "{} after {} ticks: score {}, best {}",
        outcome,
        session.time_ticks,
        session.score(),
        session.best_score
    );

    if let Some(path) = &args.store {
        log::info!("Best score stored in {}", path.display());
    }
    std::io::Write::flush(&mut std::io::stdout()).context("Failed to flush stdout")?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is dino_dash::web::wasm_start, this is just to satisfy the compiler
}
