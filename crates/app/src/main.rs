use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use hero_carousel_core::{
    Carousel, CarouselConfig, CarouselError, InputEvent, RecordingSurface, VirtualClock,
};
use tracing_subscriber::EnvFilter;

fn main() -> hero_carousel_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            script,
            slides,
            config,
            viewport_width,
        } => run_simulate(&script, slides, config.as_deref(), viewport_width),
        Commands::Config { config } => run_config(config.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> hero_carousel_core::Result<CarouselConfig> {
    match path {
        Some(path) => CarouselConfig::load(path),
        None => Ok(CarouselConfig::default()),
    }
}

fn run_simulate(
    script: &PathBuf,
    slides: usize,
    config: Option<&Path>,
    viewport_width: f64,
) -> hero_carousel_core::Result<()> {
    let config = load_config(config)?;
    let events = InputEvent::parse_script(&std::fs::read_to_string(script)?)?;
    tracing::info!(?script, slides, events = events.len(), "replaying input script");

    let clock = VirtualClock::new();
    let surface = RecordingSurface::new(slides, viewport_width);
    let mut carousel = Carousel::mount(slides, surface, clock.clone(), config)
        .ok_or_else(|| CarouselError::msg("carousel needs at least one slide"))?;

    emit(clock.now_ms(), "mount", &carousel)?;

    let mut ticks = 0;
    for event in &events {
        match event {
            InputEvent::Wait { ms } => {
                let mut failure = None;
                clock.advance(*ms, |_| {
                    carousel.autoplay_tick();
                    ticks += 1;
                    if let Err(err) = emit(clock.now_ms(), "autoplay", &carousel) {
                        failure.get_or_insert(err);
                    }
                });
                if let Some(err) = failure {
                    return Err(err);
                }
            }
            other => {
                let handled = carousel.dispatch(other);
                if !handled {
                    tracing::debug!(?other, "event ignored");
                }
                emit(clock.now_ms(), event_name(other), &carousel)?;
            }
        }
    }

    tracing::info!(
        final_index = carousel.current_index(),
        autoplay_ticks = ticks,
        elapsed_ms = clock.now_ms(),
        "simulation finished"
    );
    Ok(())
}

fn run_config(config: Option<&Path>) -> hero_carousel_core::Result<()> {
    let config = load_config(config)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn emit(
    time_ms: u64,
    source: &str,
    carousel: &Carousel<RecordingSurface, VirtualClock>,
) -> hero_carousel_core::Result<()> {
    let line = serde_json::json!({
        "time_ms": time_ms,
        "source": source,
        "index": carousel.current_index(),
        "autoplay_running": carousel.is_autoplay_running(),
        "gesture": carousel.gesture(),
        "view": carousel.surface().snapshot(),
    });
    println!("{}", serde_json::to_string(&line)?);
    Ok(())
}

fn event_name(event: &InputEvent) -> &'static str {
    match event {
        InputEvent::Prev => "prev",
        InputEvent::Next => "next",
        InputEvent::Dot { .. } => "dot",
        InputEvent::Key { .. } => "key",
        InputEvent::PointerEnter => "pointer_enter",
        InputEvent::PointerLeave => "pointer_leave",
        InputEvent::FocusIn => "focus_in",
        InputEvent::FocusOut => "focus_out",
        InputEvent::TouchStart { .. } => "touch_start",
        InputEvent::TouchMove { .. } => "touch_move",
        InputEvent::TouchEnd { .. } => "touch_end",
        InputEvent::Wait { .. } => "wait",
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Hero carousel simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a JSON list of input events on a virtual clock.
    Simulate {
        /// Path to the JSON event script.
        script: PathBuf,
        /// Number of slides in the carousel.
        #[arg(short, long, default_value_t = 3)]
        slides: usize,
        /// Optional JSON config file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Viewport width in CSS pixels, used for the swipe threshold.
        #[arg(long, default_value_t = 375.0)]
        viewport_width: f64,
    },
    /// Print the effective configuration.
    Config {
        /// Optional JSON config file to validate and print.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
