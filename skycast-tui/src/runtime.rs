//! Event loop for the weather view.
//!
//! Terminal events and task results both arrive as actions; the store
//! reduces them, effects are turned into tasks, and the screen is redrawn
//! when state changed. Every background task is owned by a guard that
//! stops it when the loop exits.

use std::{collections::HashMap, future::Future, io, sync::Arc, time::Duration};

use chrono::Local;
use crossterm::{
    cursor,
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use skycast_core::{
    WeatherProvider,
    geo::{self, Geolocator, ReverseGeocoder},
    view::{Action, Effect, Store, ViewState, clock_text, date_text},
};
use tokio::{
    sync::mpsc,
    task::{AbortHandle, JoinHandle},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{input, ui};

const CLOCK_PERIOD: Duration = Duration::from_secs(1);
const POLL_TIMEOUT: Duration = Duration::from_millis(10);
const POLL_SLEEP: Duration = Duration::from_millis(16);

const WEATHER_TASK: &str = "weather";
const LOCATE_TASK: &str = "locate";

/// Outbound services used by effects.
#[derive(Debug, Clone)]
pub struct Services {
    pub provider: Arc<dyn WeatherProvider>,
    pub locator: Arc<dyn Geolocator>,
    pub geocoder: Arc<dyn ReverseGeocoder>,
}

/// Take over the terminal, run the view until quit, and always restore it.
pub async fn run(state: ViewState, services: Services) -> anyhow::Result<()> {
    install_panic_hook();
    let _terminal_guard = enter_terminal()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    let poller = spawn_event_poller(event_tx, cancel.clone());

    let result = run_view(&mut terminal, state, services, event_rx).await;

    cancel.cancel();
    let _ = poller.await;

    result
}

/// Runs `F` when dropped, including while unwinding.
struct OnDrop<F: FnMut()>(F);

impl<F: FnMut()> Drop for OnDrop<F> {
    fn drop(&mut self) {
        (self.0)()
    }
}

fn enter_terminal() -> io::Result<OnDrop<fn()>> {
    enable_raw_mode()?;
    let guard = OnDrop(restore_terminal as fn());
    execute!(io::stdout(), EnterAlternateScreen)?;
    Ok(guard)
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        warn!(error = %e, "failed to leave raw mode");
    }
    let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
}

/// Leave the alternate screen before the panic message is printed.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        previous(info);
    }));
}

async fn run_view<B: Backend>(
    terminal: &mut Terminal<B>,
    state: ViewState,
    services: Services,
    mut event_rx: mpsc::UnboundedReceiver<Event>,
) -> anyhow::Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let _clock = ClockSubscription::start(action_tx.clone(), CLOCK_PERIOD);
    let mut effects = EffectRunner::new(action_tx.clone(), services);

    let mut store = Store::new(state);

    // mount
    let _ = action_tx.send(Action::WeatherFetch(store.state().city.clone()));

    let mut dirty = true;
    let result = loop {
        if dirty {
            if let Err(e) = terminal.draw(|frame| ui::render(frame, store.state())) {
                break Err(e.into());
            }
            dirty = false;
        }

        let action = tokio::select! {
            Some(event) = event_rx.recv() => {
                if matches!(event, Event::Resize(..)) {
                    dirty = true;
                }
                match input::map_event(&event, store.state()) {
                    Some(action) => action,
                    None => continue,
                }
            }
            Some(action) = action_rx.recv() => action,
            else => break Ok(()),
        };

        if action == Action::Quit {
            info!("quit requested");
            break Ok(());
        }

        let dispatched = store.dispatch(action);
        dirty |= dispatched.changed;
        for effect in dispatched.effects {
            effects.handle(effect);
        }
    };

    effects.cancel_all();

    result
}

/// Runs effects as tokio tasks, one slot per task key.
///
/// Spawning into an occupied slot aborts the task already there, so only the
/// newest weather fetch can report back.
pub struct EffectRunner {
    tasks: HashMap<&'static str, AbortHandle>,
    action_tx: mpsc::UnboundedSender<Action>,
    services: Services,
}

impl EffectRunner {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>, services: Services) -> Self {
        Self {
            tasks: HashMap::new(),
            action_tx,
            services,
        }
    }

    pub fn handle(&mut self, effect: Effect) {
        match effect {
            Effect::FetchWeather { request, city } => {
                let provider = Arc::clone(&self.services.provider);
                self.spawn(WEATHER_TASK, async move {
                    match provider.forecast(&city).await {
                        Ok(snapshot) => Action::WeatherDidLoad {
                            request,
                            snapshot: Box::new(snapshot),
                        },
                        Err(e) => {
                            warn!(%city, error = %e, "weather fetch failed");
                            Action::WeatherDidError {
                                request,
                                message: e.user_message(),
                            }
                        }
                    }
                });
            }
            Effect::Locate => {
                let locator = Arc::clone(&self.services.locator);
                let geocoder = Arc::clone(&self.services.geocoder);
                self.spawn(LOCATE_TASK, async move {
                    match geo::current_city(locator.as_ref(), geocoder.as_ref()).await {
                        Ok(city) => Action::LocateDidResolve(city),
                        Err(e) => {
                            warn!(error = %e, "location lookup failed, using fallback city");
                            Action::LocateDidFail(e.to_string())
                        }
                    }
                });
            }
            Effect::CancelLocate => self.cancel(LOCATE_TASK),
        }
    }

    fn spawn<F>(&mut self, key: &'static str, future: F)
    where
        F: Future<Output = Action> + Send + 'static,
    {
        self.cancel(key);

        let tx = self.action_tx.clone();
        let handle: JoinHandle<()> = tokio::spawn(async move {
            let action = future.await;
            let _ = tx.send(action);
        });

        self.tasks.insert(key, handle.abort_handle());
    }

    pub fn cancel(&mut self, key: &str) {
        if let Some(handle) = self.tasks.remove(key) {
            debug!(task = key, "aborting superseded task");
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

impl Drop for EffectRunner {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Emits [`Action::ClockTick`] every period until dropped.
pub struct ClockSubscription {
    handle: JoinHandle<()>,
}

impl ClockSubscription {
    pub fn start(action_tx: mpsc::UnboundedSender<Action>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let now = Local::now();
                let tick = Action::ClockTick {
                    clock: clock_text(&now),
                    date: date_text(&now),
                };
                if action_tx.send(tick).is_err() {
                    break;
                }
            }
        });

        Self { handle }
    }
}

impl Drop for ClockSubscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn spawn_event_poller(
    tx: mpsc::UnboundedSender<Event>,
    cancel_token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    debug!("event poller cancelled");
                    break;
                }
                _ = tokio::time::sleep(POLL_SLEEP) => {
                    while event::poll(POLL_TIMEOUT).unwrap_or(false) {
                        let Ok(evt) = event::read() else { continue };
                        if tx.send(evt).is_err() {
                            return;
                        }
                    }
                }
            }
        }
    })
}
