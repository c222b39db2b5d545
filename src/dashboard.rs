use crate::aggregate::{apple_products, category_counts};
use crate::models::{DashboardSnapshot, Product};
use crate::product_service::{FetchError, ProductSource};
use chrono::Local;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoUpdate {
    Enabled,
    Paused,
}

impl AutoUpdate {
    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }

    fn toggled(self) -> Self {
        match self {
            Self::Enabled => Self::Paused,
            Self::Paused => Self::Enabled,
        }
    }
}

/// Clock, product totals and the Apple subset, kept fresh by a repeating
/// timer that can be paused and resumed.
///
/// State is published as whole [`DashboardSnapshot`]s; readers never see a
/// half-applied refresh. Dropping the dashboard tears it down.
pub struct TimeDashboard<S> {
    inner: Arc<Inner<S>>,
}

struct Inner<S> {
    source: S,
    period: Duration,
    snapshot: watch::Sender<Arc<DashboardSnapshot>>,
    control: Mutex<Control>,
    tickets: AtomicU64,
}

struct Control {
    mode: AutoUpdate,
    timer: Option<JoinHandle<()>>,
    alive: bool,
    applied_ticket: u64,
}

impl<S: ProductSource> TimeDashboard<S> {
    /// `period` must be non-zero.
    pub fn new(source: S, period: Duration) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(DashboardSnapshot::default()));
        Self {
            inner: Arc::new(Inner {
                source,
                period,
                snapshot,
                control: Mutex::new(Control {
                    mode: AutoUpdate::Enabled,
                    timer: None,
                    alive: true,
                    applied_ticket: 0,
                }),
                tickets: AtomicU64::new(0),
            }),
        }
    }

    /// Shows the time, kicks off the first refresh and arms the timer.
    /// Must be called from within a tokio runtime.
    pub fn start(&self) {
        self.inner.update_time();

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let _ = inner.refresh_data().await;
        });

        let mut control = self.inner.lock_control();
        if control.mode.is_enabled() {
            self.inner.start_timer(&mut control);
        }
    }

    pub fn update_time(&self) {
        self.inner.update_time();
    }

    /// Updates the clock, then fetches and applies a new product list.
    ///
    /// On failure the previous products stay on display.
    pub async fn refresh_data(&self) -> Result<Arc<DashboardSnapshot>, FetchError> {
        self.inner.refresh_data().await
    }

    pub fn toggle_automatic_update(&self) -> AutoUpdate {
        let mut control = self.inner.lock_control();
        let mode = control.mode.toggled();
        control.mode = mode;
        match mode {
            AutoUpdate::Enabled => self.inner.start_timer(&mut control),
            AutoUpdate::Paused => stop_timer(&mut control),
        }
        debug!(?mode, "automatic update toggled");
        mode
    }

    pub fn auto_update(&self) -> AutoUpdate {
        self.inner.lock_control().mode
    }

    pub fn is_timer_running(&self) -> bool {
        self.inner.lock_control().timer.is_some()
    }

    pub fn snapshot(&self) -> Arc<DashboardSnapshot> {
        self.inner.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardSnapshot>> {
        self.inner.snapshot.subscribe()
    }

    /// Cancels the timer and stops any in-flight fetch from being applied.
    pub fn shutdown(&self) {
        self.inner.shutdown();
    }
}

impl<S> Drop for TimeDashboard<S> {
    fn drop(&mut self) {
        self.inner.shutdown();
    }
}

impl<S> Inner<S> {
    fn lock_control(&self) -> MutexGuard<'_, Control> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_alive(&self) -> bool {
        self.lock_control().alive
    }

    fn shutdown(&self) {
        let mut control = self.lock_control();
        if control.alive {
            control.alive = false;
            stop_timer(&mut control);
            debug!("dashboard torn down");
        }
    }

    fn update_time(&self) {
        if !self.is_alive() {
            return;
        }
        let now = current_time();
        self.snapshot.send_modify(|current| {
            *current = Arc::new(DashboardSnapshot {
                current_time: now,
                ..DashboardSnapshot::clone(current)
            });
        });
    }

    fn apply(&self, ticket: u64, products: Vec<Product>) -> Arc<DashboardSnapshot> {
        let mut control = self.lock_control();
        if !control.alive {
            debug!(ticket, "discarding product list fetched after teardown");
            return self.snapshot.borrow().clone();
        }
        if ticket <= control.applied_ticket {
            debug!(ticket, applied = control.applied_ticket, "discarding stale product list");
            return self.snapshot.borrow().clone();
        }
        control.applied_ticket = ticket;

        let refreshed_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        self.snapshot.send_modify(|current| {
            *current = Arc::new(DashboardSnapshot {
                current_time: current.current_time.clone(),
                category_counts: category_counts(&products),
                apple_products: apple_products(&products),
                products,
                refreshed_at: Some(refreshed_at),
                revision: current.revision + 1,
            });
        });

        let snapshot = self.snapshot.borrow().clone();
        info!(
            total = snapshot.total_products(),
            categories = snapshot.category_counts.len(),
            apple = snapshot.apple_products.len(),
            "product data refreshed"
        );
        snapshot
    }
}

impl<S: ProductSource> Inner<S> {
    async fn refresh_data(&self) -> Result<Arc<DashboardSnapshot>, FetchError> {
        self.update_time();
        let ticket = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;

        match self.source.fetch_products().await {
            Ok(products) => Ok(self.apply(ticket, products)),
            Err(err) => {
                warn!("failed to refresh products: {err}");
                Err(err)
            }
        }
    }

    fn start_timer(self: &Arc<Self>, control: &mut Control) {
        if control.timer.is_some() || !control.alive {
            return;
        }
        control.timer = Some(tokio::spawn(run_timer(Arc::downgrade(self), self.period)));
    }
}

fn stop_timer(control: &mut Control) {
    if let Some(timer) = control.timer.take() {
        timer.abort();
    }
}

async fn run_timer<S: ProductSource>(inner: Weak<Inner<S>>, period: Duration) {
    let mut ticks = time::interval_at(Instant::now() + period, period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticks.tick().await;
        let Some(inner) = inner.upgrade() else {
            break;
        };

        let mode = {
            let control = inner.lock_control();
            if !control.alive {
                break;
            }
            control.mode
        };

        // The fetch runs in its own task so pausing only stops the ticking.
        if mode.is_enabled() {
            debug!("auto-update tick");
            tokio::spawn(async move {
                let _ = inner.refresh_data().await;
            });
        } else {
            debug!("auto-update paused, skipping tick");
        }
    }
}

fn current_time() -> String {
    Local::now().format("%H:%M:%S").to_string()
}
