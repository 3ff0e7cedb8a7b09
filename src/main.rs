use std::io;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::Result;
use crossterm::{
    cursor::Show,
    event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};

use wattscope::adapters::{DemoEnergyApi, OctopusApiClient};
use wattscope::app::{App, AppDestination, TariffsUiEvent, UiEvent, UsageUiEvent};
use wattscope::config::ConfigManager;
use wattscope::traits::{EnergyApi, EnglishStringProvider};
use wattscope::ui;
use wattscope::view_state::PlatformType;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--version") {
        println!("wattscope {}", VERSION);
        return Ok(());
    }

    color_eyre::install()?;
    setup_panic_hook();
    init_tracing();

    let config = ConfigManager::new()
        .map(|manager| manager.load())
        .unwrap_or_default()
        .with_env_overrides();

    // Without account details the app runs against synthetic data so every
    // screen still has something to show.
    let demo_mode = !config.is_account_configured();
    let api: Arc<dyn EnergyApi> = if demo_mode {
        tracing::info!("no account configured, running in demo mode");
        Arc::new(DemoEnergyApi)
    } else {
        Arc::new(OctopusApiClient::new(&config)?)
    };

    let mut app = App::new(
        api,
        Arc::new(EnglishStringProvider),
        demo_mode,
        PlatformType::detect(),
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let size = terminal.size()?;
    app.notify_screen_size_changed(size.width, size.height);

    let result = run(&mut terminal, &mut app).await;

    restore_terminal();
    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    // First frame before the initial loads so the loading screens show.
    terminal.draw(|frame| ui::draw(frame, app))?;
    app.dispatch(UiEvent::Usage(UsageUiEvent::InitialLoad)).await;
    app.dispatch(UiEvent::Tariffs(TariffsUiEvent::Refresh)).await;

    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_millis(250));

    loop {
        acknowledge_scroll_requests(app).await;
        terminal.draw(|frame| ui::draw(frame, app))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        handle_key(app, key.code, key.modifiers).await;
                    }
                    Some(Ok(Event::Resize(columns, rows))) => {
                        app.notify_screen_size_changed(columns, rows);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!("event stream error: {}", e);
                    }
                    None => break,
                }
            }
            _ = tick.tick() => {}
        }

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}

/// Our simple screens render from the top every frame, so a pending scroll
/// request is satisfied the moment it is drawn; acknowledge it right away.
async fn acknowledge_scroll_requests(app: &mut App) {
    if app.usage_view_state().request_scroll_to_top {
        app.dispatch(UiEvent::Usage(UsageUiEvent::ScrolledToTop)).await;
    }
    if app.tariffs_view_state().request_scroll_to_top {
        app.dispatch(UiEvent::Tariffs(TariffsUiEvent::ScrolledToTop))
            .await;
    }
}

async fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Tab => app.navigate_next(),
        KeyCode::Char('1') => app.navigate_to(AppDestination::Usage),
        KeyCode::Char('2') => app.navigate_to(AppDestination::Tariffs),
        KeyCode::Char('r') => match app.destination() {
            AppDestination::Usage => {
                app.dispatch(UiEvent::Usage(UsageUiEvent::InitialLoad)).await;
            }
            AppDestination::Tariffs => {
                app.dispatch(UiEvent::Tariffs(TariffsUiEvent::Refresh)).await;
            }
        },
        KeyCode::Char('d') => {
            let event = match app.destination() {
                AppDestination::Usage => UiEvent::Usage(UsageUiEvent::SpecialErrorScreenShown),
                AppDestination::Tariffs => {
                    UiEvent::Tariffs(TariffsUiEvent::SpecialErrorScreenShown)
                }
            };
            app.dispatch(event).await;
        }
        KeyCode::Char('e') => {
            let event = match app.destination() {
                AppDestination::Usage => app
                    .usage_view_state()
                    .error_messages
                    .first()
                    .map(|m| UiEvent::Usage(UsageUiEvent::ErrorShown(m.id))),
                AppDestination::Tariffs => app
                    .tariffs_view_state()
                    .error_messages
                    .first()
                    .map(|m| UiEvent::Tariffs(TariffsUiEvent::ErrorShown(m.id))),
            };
            if let Some(event) = event {
                app.dispatch(event).await;
            }
        }
        KeyCode::Left if app.destination() == AppDestination::Usage => {
            app.dispatch(UiEvent::Usage(UsageUiEvent::PreviousTimeFrame))
                .await;
        }
        KeyCode::Right if app.destination() == AppDestination::Usage => {
            app.dispatch(UiEvent::Usage(UsageUiEvent::NextTimeFrame)).await;
        }
        KeyCode::Char('p') if app.destination() == AppDestination::Usage => {
            let style = app
                .usage_view_state()
                .consumption_query_filter
                .map(|filter| filter.presentation_style)
                .unwrap_or(wattscope::models::ConsumptionPresentationStyle::DayHalfHourly)
                .next();
            app.dispatch(UiEvent::Usage(UsageUiEvent::SwitchPresentationStyle(style)))
                .await;
        }
        KeyCode::Up if app.destination() == AppDestination::Tariffs => app.move_selection_up(),
        KeyCode::Down if app.destination() == AppDestination::Tariffs => {
            app.move_selection_down();
        }
        KeyCode::Enter if app.destination() == AppDestination::Tariffs => {
            if let Some(event) = app.open_selected_product() {
                app.dispatch(event).await;
            }
        }
        KeyCode::Esc if app.destination() == AppDestination::Tariffs => {
            app.dispatch(UiEvent::Tariffs(TariffsUiEvent::ProductDetailsDismissed))
                .await;
        }
        _ => {}
    }
}

/// Setup panic hook to ensure terminal cleanup on panic.
fn setup_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        original(info);
    }));
}

fn restore_terminal() {
    let mut stdout = io::stdout();
    let _ = disable_raw_mode();
    let _ = execute!(stdout, LeaveAlternateScreen, Show);
}

/// Log to a file so the TUI output stays clean. Honors `RUST_LOG`.
fn init_tracing() {
    let Some(cache_dir) = dirs::cache_dir() else {
        return;
    };
    let log_dir = cache_dir.join("wattscope");
    if std::fs::create_dir_all(&log_dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::create(log_dir.join("wattscope.log")) else {
        return;
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("wattscope=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
}
