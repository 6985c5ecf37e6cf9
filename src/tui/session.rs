use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEventKind,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use civic_pulse::{
    app::{DashboardState, Mode},
    input::{agenda_mode, calendar_mode, command_mode, layers_menu, normal_mode, Action},
    storage::{
        config::Config,
        preferences::{PreferenceStore, Preferences, WatchPreferences},
    },
    sync::{loader::{EventLoader, LoadOutcome}, repository::EventRepository},
    ui::{locale::LocaleFormatter, map_view::MapSynchronizer, theme::Theme},
};

use crate::tui::{dialogs, map_canvas::CanvasMap, presentation::ui};

const FRAME_INTERVAL: Duration = Duration::from_millis(80);
const ANIMATION_FRAME_INTERVAL: Duration = Duration::from_millis(16);
const INPUT_POLL: Duration = Duration::from_millis(50);

enum Signal {
    Input(TermEvent),
    Loaded(LoadOutcome),
    PreferencesChanged,
    Tick,
}

pub async fn run_tui(config: Config) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_dashboard(&mut terminal, config).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!("Dashboard stopped with error: {:?}", err);
    }

    res
}

/// Reads terminal events on a plain thread so the async loop never blocks on input.
fn spawn_input_reader(stop: Arc<AtomicBool>) -> mpsc::UnboundedReceiver<TermEvent> {
    let (sender, receiver) = mpsc::unbounded_channel();

    thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            match event::poll(INPUT_POLL) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if sender.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    tracing::error!("Failed to poll terminal events: {}", e);
                    break;
                }
            }
        }
    });

    receiver
}

async fn run_dashboard<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: Config,
) -> anyhow::Result<()> {
    let preferences = WatchPreferences::new(Preferences::from_config(&config));
    let mut preference_updates = preferences.subscribe();
    let initial = preferences.get();

    let repository = EventRepository::from_config(&config)?;

    let today = Local::now().date_naive();
    let mut app = DashboardState::new(
        today,
        LocaleFormatter::new(&initial.language),
        initial.municipality.clone(),
    )
    .with_theme(Theme::get_by_name(&config.ui.theme))
    .with_offline(repository.offline());

    let mut loader = EventLoader::new(repository);
    let mut map: MapSynchronizer<CanvasMap> = MapSynchronizer::new();
    map.mount(|center, zoom| Ok(CanvasMap::new(center, zoom)))?;

    app.begin_loading();
    loader.request_when_idle(app.municipality.clone(), config.idle_timeout());

    let stop_input = Arc::new(AtomicBool::new(false));
    let mut input = spawn_input_reader(Arc::clone(&stop_input));
    let mut synced: Option<(u64, Vec<String>, String)> = None;

    let result = loop {
        let sync_key = (
            app.revision(),
            app.layers().active().to_vec(),
            app.formatter.tag().to_string(),
        );
        if synced.as_ref() != Some(&sync_key) {
            map.sync(app.filtered(), &app.formatter);
            synced = Some(sync_key);
        }

        let now = Instant::now();
        if let Err(e) = terminal.draw(|f| ui(f, &app, &map, today, now)) {
            break Err(e.into());
        }

        if app.should_quit {
            break Ok(());
        }

        let frame_interval = if map.surface().is_some_and(|surface| surface.is_animating(now)) {
            ANIMATION_FRAME_INTERVAL
        } else {
            FRAME_INTERVAL
        };

        let signal = tokio::select! {
            Some(ev) = input.recv() => Signal::Input(ev),
            Some(outcome) = loader.next() => Signal::Loaded(outcome),
            Ok(()) = preference_updates.changed() => Signal::PreferencesChanged,
            _ = tokio::time::sleep(frame_interval) => Signal::Tick,
        };

        match signal {
            Signal::Input(TermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                if let Some(action) = dispatch_key(key.code, &mut app) {
                    handle_action(action, &mut app, &mut loader, &preferences);
                }
            }
            Signal::Input(TermEvent::Mouse(mouse)) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                    match terminal.size() {
                        Ok(frame) => handle_click(&mut app, frame, mouse.column, mouse.row, today),
                        Err(e) => break Err(e.into()),
                    }
                }
            }
            Signal::Input(_) => {}
            Signal::Loaded(outcome) => {
                tracing::info!(
                    "Applying {} events for {:?}",
                    outcome.events.len(),
                    outcome.municipality
                );
                app.apply_outcome(outcome);
            }
            Signal::PreferencesChanged => {
                let prefs = preference_updates.borrow_and_update().clone();
                apply_preferences(prefs, &mut app, &mut loader);
            }
            Signal::Tick => {
                if loader.is_loading() {
                    loader.notify_idle();
                }
            }
        }
    };

    stop_input.store(true, Ordering::Relaxed);
    loader.cancel();
    map.teardown();
    result
}

fn dispatch_key(code: KeyCode, app: &mut DashboardState) -> Option<Action> {
    if app.mode == Mode::Command {
        return command_mode::handle_key(code, app);
    }

    if app.agenda.is_some() {
        agenda_mode::handle_key(code, app);
        None
    } else if app.calendar_open() {
        calendar_mode::handle_key(code, app);
        None
    } else if app.layers_menu_open {
        layers_menu::handle_key(code, app);
        None
    } else {
        normal_mode::handle_key(code, app)
    }
}

fn handle_action(
    action: Action,
    app: &mut DashboardState,
    loader: &mut EventLoader,
    preferences: &WatchPreferences,
) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::Reload => {
            app.begin_loading();
            loader.request(app.municipality.clone());
        }
        Action::SetMunicipality(municipality) => {
            preferences.update(&|prefs: &mut Preferences| prefs.municipality = municipality.clone());
        }
        Action::SetLocale(tag) => {
            preferences.update(&|prefs: &mut Preferences| prefs.language = tag.clone());
        }
    }
}

fn apply_preferences(prefs: Preferences, app: &mut DashboardState, loader: &mut EventLoader) {
    if prefs.language != app.formatter.tag() {
        tracing::info!("Locale changed to {}", prefs.language);
        app.set_locale(&prefs.language);
    }

    if prefs.municipality != app.municipality {
        tracing::info!("Municipality changed to {:?}", prefs.municipality);
        app.municipality = prefs.municipality;
        app.begin_loading();
        loader.request(app.municipality.clone());
    }
}

fn handle_click(app: &mut DashboardState, frame: ratatui::layout::Rect, column: u16, row: u16, today: chrono::NaiveDate) {
    if !app.calendar_open() {
        return;
    }

    let area = dialogs::calendar::dialog_area(frame);
    if !dialogs::contains(area, column, row) {
        app.click_outside_calendar();
        return;
    }

    let layout = app.calendar_layout(today);
    if let Some(date) = dialogs::calendar::date_at(area, &layout, column, row) {
        app.select_calendar_date(date);
    }
}
