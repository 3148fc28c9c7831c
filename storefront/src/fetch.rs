//! Generic cache-and-revalidate fetch engine.
//!
//! A [`Fetch`] owns one remotely-derived value: it runs a producer future to
//! load it, keeps the last good value across failed reloads, and revalidates
//! on demand, on a timer, or when the host application signals that focus
//! was regained. State is published through a [`tokio::sync::watch`] channel
//! so any number of observers can render or await it.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use futures::future::BoxFuture;
use payloads::{ApiError, error_message};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

/// Snapshot of a fetch in progress or at rest.
///
/// `data` holds the most recent successful value and survives later
/// failures, so a reload error renders next to stale data instead of
/// blanking the view.
#[derive(Debug, Clone)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub error: Option<Arc<ApiError>>,
    pub is_loading: bool,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            is_loading: false,
        }
    }
}

impl<T> FetchState<T> {
    /// True while the first load is still outstanding.
    pub fn is_initial_loading(&self) -> bool {
        self.is_loading && self.data.is_none() && self.error.is_none()
    }

    /// Displayable message for the current error, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_deref().map(error_message)
    }
}

/// Broadcast that the application regained focus. Fetches constructed with
/// a clone of this signal revalidate on every [`focus_regained`] call.
///
/// [`focus_regained`]: FocusSignal::focus_regained
#[derive(Debug, Clone)]
pub struct FocusSignal {
    tx: broadcast::Sender<()>,
}

impl FocusSignal {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    pub fn focus_regained(&self) {
        let _ = self.tx.send(());
    }

    fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }
}

impl Default for FocusSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Revalidation behavior for a [`Fetch`].
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// When false the producer is never invoked, not even by `refetch`.
    pub enabled: bool,
    pub focus: Option<FocusSignal>,
    pub refresh_interval: Option<Duration>,
}

impl FetchOptions {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }
}

type Producer<T, D> = dyn Fn(D) -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync;

struct Core<T, D> {
    tx: watch::Sender<FetchState<T>>,
    /// Monotone issuance counter. A settling fetch only applies if no newer
    /// fetch has been issued since it started.
    generation: AtomicU64,
    enabled: AtomicBool,
    deps: Mutex<D>,
    producer: Box<Producer<T, D>>,
}

impl<T, D> Core<T, D>
where
    T: Clone + Send + Sync + 'static,
    D: Clone + Send + 'static,
{
    /// Start a fetch. Marks the state loading, clears the previous error,
    /// and settles asynchronously unless superseded first.
    fn issue(self: &Arc<Self>) {
        if !self.enabled.load(Ordering::SeqCst) {
            return;
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.tx.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });

        let deps = self.deps.lock().unwrap_or_else(|e| e.into_inner()).clone();
        let future = (self.producer)(deps);
        let core = Arc::clone(self);
        tokio::spawn(async move {
            let result = future.await;
            core.tx.send_modify(|state| {
                // Checked inside the modify closure so a concurrent issue
                // cannot interleave between the check and the write.
                if core.generation.load(Ordering::SeqCst) != generation {
                    return;
                }
                state.is_loading = false;
                match result {
                    Ok(data) => {
                        state.data = Some(data);
                        state.error = None;
                    }
                    Err(e) => state.error = Some(Arc::new(e)),
                }
            });
        });
    }
}

/// A live remote value with refetch, dependency tracking, and optional
/// focus and interval revalidation. Dropping it stops all revalidation.
pub struct Fetch<T, D = ()> {
    core: Arc<Core<T, D>>,
    tasks: Vec<JoinHandle<()>>,
}

impl<T, D> Fetch<T, D>
where
    T: Clone + Send + Sync + 'static,
    D: Clone + PartialEq + Send + 'static,
{
    /// Construct the fetch and, when enabled, issue the initial load before
    /// returning.
    pub fn new<F, Fut>(deps: D, producer: F, options: FetchOptions) -> Self
    where
        F: Fn(D) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let (tx, _) = watch::channel(FetchState::default());
        let core = Arc::new(Core {
            tx,
            generation: AtomicU64::new(0),
            enabled: AtomicBool::new(options.enabled),
            deps: Mutex::new(deps),
            producer: Box::new(move |deps| Box::pin(producer(deps))),
        });

        let mut tasks = Vec::new();
        if let Some(signal) = &options.focus {
            let mut rx = signal.subscribe();
            let weak = Arc::downgrade(&core);
            tasks.push(tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(()) => {
                            let Some(core) = weak.upgrade() else { break };
                            core.issue();
                        }
                        // Dropped signals still mean focus came back at
                        // least once; keep listening and revalidate on
                        // the events that remain.
                        Err(broadcast::error::RecvError::Lagged(_)) => continue,
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
            }));
        }
        if let Some(period) = options.refresh_interval {
            let weak: Weak<Core<T, D>> = Arc::downgrade(&core);
            tasks.push(tokio::spawn(async move {
                let mut interval = tokio::time::interval(period);
                // The first tick fires immediately; the initial load
                // already covers it.
                interval.tick().await;
                loop {
                    interval.tick().await;
                    let Some(core) = weak.upgrade() else { break };
                    core.issue();
                }
            }));
        }

        core.issue();
        Self { core, tasks }
    }

    pub fn state(&self) -> FetchState<T> {
        self.core.tx.borrow().clone()
    }

    /// Subscribe to state changes. The receiver sees the current state
    /// immediately.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.core.tx.subscribe()
    }

    pub fn refetch(&self) {
        self.core.issue();
    }

    /// Replace the dependencies; refetches only when they actually changed.
    pub fn update_deps(&self, deps: D) {
        {
            let mut current = self.core.deps.lock().unwrap_or_else(|e| e.into_inner());
            if *current == deps {
                return;
            }
            *current = deps;
        }
        self.core.issue();
    }

    /// Toggle the fetch. Turning it on issues a load; turning it off stops
    /// future loads but keeps the current state.
    pub fn set_enabled(&self, enabled: bool) {
        let was = self.core.enabled.swap(enabled, Ordering::SeqCst);
        if enabled && !was {
            self.core.issue();
        }
    }

    /// Wait for the in-flight load (if any) to settle, returning the state.
    pub async fn settled(&self) -> FetchState<T> {
        let mut rx = self.subscribe();
        match rx.wait_for(|state| !state.is_loading).await {
            Ok(state) => state.clone(),
            // The sender lives in self, so this is unreachable in practice.
            Err(_) => self.state(),
        }
    }
}

impl<T, D> Drop for Fetch<T, D> {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
