//! Boxwood entrypoint.
use anyhow::Result;
use boxwood::scenes::{self, Scene, dump};
use clap::Parser;
use core_config::load_from;
use core_model::Screen;
use core_render::{BufferSurface, TerminalSurface};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "boxwood", version, about = "Nested terminal windows demo")]
struct Args {
    /// Scene to play.
    #[arg(long, value_enum, default_value_t = Scene::Nested)]
    scene: Scene,
    /// Optional configuration file path (overrides discovery of `boxwood.toml`).
    #[arg(long = "config")]
    config: Option<PathBuf>,
    /// Render into memory and print each frame to stdout instead of taking
    /// over the terminal.
    #[arg(long)]
    headless: bool,
    /// Headless screen height.
    #[arg(long, default_value_t = 24)]
    rows: u16,
    /// Headless screen width.
    #[arg(long, default_value_t = 80)]
    cols: u16,
}

fn configure_logging(log_path: &Path) -> Result<Option<WorkerGuard>> {
    if log_path.exists() {
        let _ = std::fs::remove_file(log_path);
    }
    let dir = match log_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let file_name = log_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "boxwood.log".into());

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Ok(Some(guard)),
        // Global tracing subscriber already installed; drop guard so writer shuts down.
        Err(_err) => Ok(None),
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn run_headless(args: &Args, config: &core_config::Config) -> Result<()> {
    let surface = BufferSurface::headless(args.rows, args.cols).with_glyphs(config.glyphs());
    let mut screen = Screen::new(surface)?;
    let (rows, cols) = (args.rows, args.cols);
    let mut out = std::io::stdout().lock();
    scenes::run(&mut screen, args.scene, &mut |screen, label| {
        if let Some(surface) = screen.surface() {
            writeln!(out, "== {label}")?;
            writeln!(out, "{}", dump(surface, rows, cols))?;
        }
        Ok(())
    })?;
    screen.close()?;
    Ok(())
}

fn run_terminal(args: &Args, config: &core_config::Config) -> Result<()> {
    let pause = config.demo_pause();
    let surface = TerminalSurface::new(config.glyphs()).with_title("Boxwood");
    // Dropping the screen on any early return restores the terminal.
    let mut screen = Screen::new(surface)?;
    scenes::run(&mut screen, args.scene, &mut |_, _| {
        std::thread::sleep(pause);
        Ok(())
    })?;
    screen.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_from(args.config.clone())?;
    let _log_guard = configure_logging(config.log_file())?;
    install_panic_hook();

    info!(
        target: "runtime",
        scene = ?args.scene,
        headless = args.headless,
        config = ?config.source,
        "startup"
    );
    let result = if args.headless {
        run_headless(&args, &config)
    } else {
        run_terminal(&args, &config)
    };
    match &result {
        Ok(()) => info!(target: "runtime", "shutdown"),
        Err(e) => tracing::error!(target: "runtime", error = %e, "scene_failed"),
    }
    result
}
