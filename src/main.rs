mod algo;
mod api;
mod app;
mod config;
mod model;
mod session;
mod step;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use algo::AlgoId;
use api::{AlgoOutcome, SortClient};
use app::{App, Popup};
use config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "sortvis")]
#[command(version = "0.1.0")]
#[command(about = "A terminal visualizer for comparing sorting algorithms")]
struct Args {
    /// Sort service endpoint, e.g. http://127.0.0.1:5000 (overrides config)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Comma-separated array to preload, e.g. "5,3,8,1"
    #[arg(short, long)]
    array: Option<String>,

    /// Comma-separated algorithms to preselect
    /// (bubble, selection, insertion, quick, merge)
    #[arg(short = 'A', long)]
    algorithms: Option<String>,

    /// Animation speed 1-10 (overrides config)
    #[arg(short, long)]
    speed: Option<u8>,

    /// Fetch steps and print a JSON summary instead of running the TUI
    #[arg(long)]
    dump: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to a file so events never write over the TUI
    init_logging();

    let args = Args::parse();

    let mut config = AppConfig::load().unwrap_or_default();
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(speed) = args.speed {
        config.speed = speed.clamp(1, 10);
    }
    if let Some(ref list) = args.algorithms {
        config.algorithms = parse_algorithm_list(list)?;
    }

    let initial_array = match args.array.as_deref() {
        Some(text) => {
            Some(model::parse_input(text).map_err(|e| anyhow::anyhow!("--array: {}", e))?)
        }
        None => None,
    };

    // Handle CLI-only commands
    if args.dump {
        return dump_steps(&config, initial_array).await;
    }

    run_tui(config, initial_array).await
}

fn init_logging() {
    let log_dir = dirs::state_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("sortvis");
    let _ = std::fs::create_dir_all(&log_dir);

    if let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("sortvis.log"))
    {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false),
            )
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }
}

fn parse_algorithm_list(list: &str) -> Result<Vec<AlgoId>> {
    list.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<AlgoId>().map_err(|e| anyhow::anyhow!(e)))
        .collect()
}

/// Fetch step sequences and print a JSON summary (for scripting, and for
/// checking a sort service without entering the TUI).
async fn dump_steps(config: &AppConfig, array: Option<Vec<i64>>) -> Result<()> {
    let array = array.unwrap_or_else(model::generate_random);
    let algorithms = config.algorithms.clone();

    let client = SortClient::new(&config.endpoint)?;
    let response = client.fetch_steps(&array, &algorithms).await?;

    let mut results = serde_json::Map::new();
    for algo in &algorithms {
        let entry = match response.get(algo.id()) {
            Some(AlgoOutcome::Run(run)) => serde_json::json!({
                "steps": run.steps.len(),
                "time_taken_ms": run.time_taken,
            }),
            Some(AlgoOutcome::Error(e)) => serde_json::json!({ "error": e.error }),
            None => serde_json::json!({ "error": "missing from response" }),
        };
        results.insert(algo.id().to_string(), entry);
    }

    let output = serde_json::json!({
        "endpoint": client.endpoint(),
        "array": array,
        "results": results,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run_tui(config: AppConfig, initial_array: Option<Vec<i64>>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(config, initial_array)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // Poll well below the fastest animation delay so ticks stay close
        // to their deadlines
        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c')
                            if key.modifiers.contains(event::KeyModifiers::CONTROL) =>
                        {
                            return Ok(())
                        }
                        _ => {
                            // Handle key and catch any errors to prevent crashes
                            if let Err(e) = app.handle_key(key).await {
                                app.status_message = Some(format!("Error: {}", e));
                            }
                        }
                    }
                }
            }
        }

        // Advance animation timers
        app.tick();
    }
}
