use arcade::app::App;
use arcade::build_info;
use arcade::config::ArcadeConfig;
use arcade::core::driver::HostClock;
use arcade::input::GameKind;
use arcade::ui;
use arcade::utils::{logging, persistence};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::{error, info};

fn print_help() {
    println!("Arcade - Snake and Flappy in the terminal\n");
    println!("Usage: arcade [game] [options]\n");
    println!("Games:");
    println!("  snake      Open Snake directly");
    println!("  flappy     Open Flappy directly\n");
    println!("Options:");
    println!("  --sound    Start with sound on");
    println!("  --version  Show version information");
    println!("  --help     Show this help message\n");
    println!("Settings are read from ~/.arcade/config.json, scores kept in ~/.arcade/scores.json.");
    println!("Set {}=debug for a verbose ~/.arcade/{}.", logging::LOG_ENV, logging::LOG_FILE);
}

fn main() -> io::Result<()> {
    let mut open_game = None;
    let mut sound = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "snake" => open_game = Some(GameKind::Snake),
            "flappy" => open_game = Some(GameKind::Flappy),
            "--sound" => sound = true,
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'arcade --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    // The game runs fine without a log file.
    match persistence::arcade_dir() {
        Ok(dir) => {
            if let Err(e) = logging::init(&dir) {
                eprintln!("Warning: {}", e);
            }
        }
        Err(e) => eprintln!("Warning: no home directory for logs: {}", e),
    }
    info!(version = build_info::VERSION, commit = build_info::BUILD_COMMIT, "starting");

    let mut config = ArcadeConfig::load();
    config.sound_enabled |= sound;

    let mut app = App::from_config(&config);
    if let Some(kind) = open_game {
        app.open(kind);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, config.frame_budget());

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "terminal loop failed");
    }
    info!("exiting");
    result
}

/// Draw when something changed, wait for input until the next display
/// frame, then give the visible game its frame.
fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    frame_budget: Duration,
) -> io::Result<()> {
    let clock = HostClock::new();
    let mut dirty = true;

    while !app.should_quit {
        if dirty {
            terminal.draw(|frame| ui::draw(frame, &*app))?;
            dirty = false;
        }

        let deadline = Instant::now() + frame_budget;
        while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
            if !event::poll(remaining)? {
                break;
            }
            dirty |= app.handle_event(event::read()?, clock.now_ms());
            if app.should_quit {
                return Ok(());
            }
        }

        dirty |= app.on_frame(clock.now_ms());
    }
    Ok(())
}
