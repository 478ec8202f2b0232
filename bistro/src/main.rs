//! Bistro - restaurant storefront in the terminal
//!
//! ```sh
//! # Bundled menu, simulated network delays
//! cargo run -p bistro
//!
//! # Own seed data, no delays, logs to a file
//! cargo run -p bistro -- --seed menu.json --instant --log-file bistro.log
//! ```

use std::cell::RefCell;
use std::io;

use bistro::action::Action;
use bistro::app::EffectHandler;
use bistro::cli::Args;
use bistro::logging;
use bistro::reducer::reducer;
use bistro::runtime::EffectRuntime;
use bistro::state::AppState;
use bistro::store::EffectStore;
use bistro::ui::{date_change, BistroUi};
use bistro_core::{LoggingMiddleware, NoticeBoard, Seed, Storefront, StorefrontConfig};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let _guard = match logging::init(args.log_file.as_deref(), &args.log_level) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: could not open log file: {}", e);
            std::process::exit(1);
        }
    };

    // Fail before entering TUI mode
    let config = match args.config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let seed = match &args.seed {
        Some(path) => Seed::from_path(path),
        None => Seed::bundled(),
    };
    let seed = match seed {
        Ok(seed) => seed,
        Err(e) => {
            eprintln!("Error: could not load seed data: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        menu = seed.menu.len(),
        delivery_fee = %config.pricing.delivery_fee,
        tax_rate = %config.pricing.tax_rate,
        "starting bistro"
    );

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, seed, config).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "terminal loop failed");
    }
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    seed: Seed,
    config: StorefrontConfig,
) -> io::Result<()> {
    let state = AppState::new(
        Storefront::from_seed(seed),
        config.pricing,
        chrono::Local::now().date_naive(),
    );
    let (notifier, board) = NoticeBoard::channel();
    let handler = EffectHandler::from_config(&config, notifier);

    let store = EffectStore::with_middleware(state, reducer, LoggingMiddleware::new());
    let mut runtime = EffectRuntime::from_store(store).with_notices(board, Action::NoticeShow);
    let ui = RefCell::new(BistroUi::new());

    runtime
        .run(
            terminal,
            |frame, area, state| ui.borrow_mut().render(frame, area, state),
            |event, state| {
                let mut outcome = ui.borrow_mut().map_event(event, state);
                if let Some(action) = date_change(state, chrono::Local::now().date_naive()) {
                    outcome.actions.insert(0, action);
                }
                outcome
            },
            |action| matches!(action, Action::Quit),
            |effect, ctx| handler.handle(effect, ctx),
        )
        .await
}
