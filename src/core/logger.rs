//! Main logger implementation

use super::{
    config::LoggerConfig,
    error::{LoggerError, Result},
    format::format_data,
    handler::{Handler, HandlerRef},
    log_event::LogEvent,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    mode::LoggerMode,
    registry::{DispatchReport, HandlerRegistry},
    worker::{Signal, Worker},
};
use parking_lot::{Mutex, RwLock};
use std::cell::Cell;
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

thread_local! {
    /// Address of the `Shared` whose queue this thread is currently
    /// delivering from (worker loop or drain), or 0
    static DELIVERING: Cell<usize> = const { Cell::new(0) };
}

/// State reachable from both the logger and its async worker
pub(crate) struct Shared {
    pub(crate) registry: HandlerRegistry,
    queue: Mutex<VecDeque<LogEvent>>,
    pub(crate) running: AtomicBool,
    pub(crate) signal: Signal,
    pub(crate) metrics: LoggerMetrics,
}

impl Shared {
    fn new() -> Self {
        Self {
            registry: HandlerRegistry::new(),
            queue: Mutex::new(VecDeque::new()),
            running: AtomicBool::new(false),
            signal: Signal::new(),
            metrics: LoggerMetrics::new(),
        }
    }

    /// Run one event through the registry and account for the outcome
    fn process_event(&self, event: &LogEvent) -> DispatchReport {
        let report = self.registry.dispatch(event);

        let panics = report.panics() as u64;
        if panics > 0 {
            self.metrics.record_handler_panics(panics);
        }
        if report.is_ok() {
            self.metrics.record_delivered();
        } else {
            self.metrics.record_failed();
        }

        report
    }

    /// Deliver an event that has no caller waiting on the outcome.
    ///
    /// Failures go to stderr since nobody is left to receive them.
    pub(crate) fn deliver_detached(&self, event: &LogEvent) {
        let previous = DELIVERING.with(|d| d.replace(self.address()));
        let report = self.process_event(event);
        DELIVERING.with(|d| d.set(previous));

        for failure in &report.failures {
            let severity = match failure.error {
                LoggerError::HandlerPanicked { .. } => "CRITICAL",
                _ => "ERROR",
            };
            eprintln!(
                "[LOGGER {}] Handler #{} ({}) failed (async): {}",
                severity, failure.index, failure.name, failure.error
            );
        }
    }

    fn address(&self) -> usize {
        self as *const Self as usize
    }

    /// True while this thread is inside a queue delivery of this logger
    fn is_delivering(&self) -> bool {
        DELIVERING.with(Cell::get) == self.address()
    }

    fn enqueue(&self, event: LogEvent) {
        self.queue.lock().push_back(event);
        self.metrics.record_queued();
        self.signal.notify();
    }

    /// Pop the oldest queued event; the queue lock is released on return
    pub(crate) fn pop_queued(&self) -> Option<LogEvent> {
        self.queue.lock().pop_front()
    }

    fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Process everything left in the queue on the calling thread, oldest first
    fn drain(&self) -> u64 {
        let mut drained = 0;
        while let Some(event) = self.pop_queued() {
            self.deliver_detached(&event);
            drained += 1;
        }
        if drained > 0 {
            self.metrics.record_drained(drained);
        }
        drained
    }
}

struct ModeState {
    mode: LoggerMode,
    /// Present iff `mode == Async`
    worker: Option<Worker>,
}

/// The event dispatcher.
///
/// Owns the handler registry and delivers each logged event to it, either
/// inline (`Sync`), through a background worker (`Async`), or not at all
/// (`Disabled`). All methods take `&self`; share the logger across threads
/// with an `Arc`.
///
/// Leaving `Async` (including on drop) stops the worker and drains the
/// queue on the calling thread before returning, so no queued event is lost
/// or delivered twice.
pub struct Logger {
    shared: Arc<Shared>,
    state: RwLock<ModeState>,
    /// Copy of `state.mode` readable without the lock
    mode: AtomicU8,
    min_level: AtomicU8,
    idle_poll: Duration,
}

impl Logger {
    /// Synchronous logger with no handlers
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(&LoggerConfig::default())
    }

    /// Logger starting in `mode`; fails only if the async worker cannot start
    pub fn with_mode(mode: LoggerMode) -> Result<Self> {
        let logger = Self::new();
        logger.set_mode(mode)?;
        Ok(logger)
    }

    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        config.validate()?;
        let logger = Self::from_parts(config);
        logger.set_mode(config.mode)?;
        Ok(logger)
    }

    /// Logger in `Sync` mode carrying the config's level and poll interval
    fn from_parts(config: &LoggerConfig) -> Self {
        Self {
            shared: Arc::new(Shared::new()),
            state: RwLock::new(ModeState {
                mode: LoggerMode::Sync,
                worker: None,
            }),
            mode: AtomicU8::new(LoggerMode::Sync as u8),
            min_level: AtomicU8::new(config.min_level as u8),
            idle_poll: config.idle_poll,
        }
    }

    /// Current mode. Lock-free, so handlers may call it while a transition
    /// is waiting on their delivery.
    pub fn mode(&self) -> LoggerMode {
        LoggerMode::from_u8(self.mode.load(Ordering::Acquire))
    }

    /// Switch delivery mode.
    ///
    /// Entering `Async` starts the worker with an empty queue. Leaving it
    /// stops the worker and drains the queue before returning. Setting the
    /// current mode again does nothing. Transitions are serialized.
    pub fn set_mode(&self, mode: LoggerMode) -> Result<()> {
        let mut state = self.state.write();
        if state.mode == mode {
            return Ok(());
        }

        if mode == LoggerMode::Async {
            let worker = Worker::spawn(Arc::clone(&self.shared), self.idle_poll)
                .map_err(|source| LoggerError::WorkerSpawn { source })?;
            state.worker = Some(worker);
        } else if let Some(worker) = state.worker.take() {
            worker.stop();
            self.shared.drain();
        }

        state.mode = mode;
        self.mode.store(mode as u8, Ordering::Release);
        Ok(())
    }

    pub fn min_level(&self) -> LogLevel {
        LogLevel::from_u8(self.min_level.load(Ordering::Relaxed))
    }

    /// Global pre-filter applied before any handler is consulted: events
    /// below `level` are discarded before an event is even built, whatever
    /// the individual handler thresholds are. Defaults to `Trace`, leaving
    /// the decision to the handlers.
    pub fn set_min_level(&self, level: LogLevel) {
        self.min_level.store(level as u8, Ordering::Relaxed);
    }

    /// Log one message.
    ///
    /// - `Disabled`: the message is dropped and `Ok(())` returned.
    /// - `Sync`: every handler runs before this returns; if any failed the
    ///   result is [`LoggerError::Dispatch`]
    ///   (the others still received the event).
    /// - `Async`: the event is queued and `Ok(())` returned at once.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) -> Result<()> {
        if level < self.min_level() {
            return Ok(());
        }

        // A handler logging back into us from the worker or a drain: the
        // mode lock may be held for the transition waiting on this very
        // delivery, so queue it for the loop that is already running
        if self.shared.is_delivering() {
            self.shared.enqueue(LogEvent::new(level, message));
            return Ok(());
        }

        // Recursive read: a handler may log through this logger while a
        // transition is waiting for the write lock
        let state = self.state.read_recursive();
        match state.mode {
            LoggerMode::Disabled => {
                self.shared.metrics.record_discarded();
                Ok(())
            }
            LoggerMode::Sync => {
                let event = LogEvent::new(level, message);
                self.shared.process_event(&event).into_result()
            }
            LoggerMode::Async => {
                self.shared.enqueue(LogEvent::new(level, message));
                Ok(())
            }
        }
    }

    /// Log preformatted arguments, usually from `format_args!`
    ///
    /// # Example
    ///
    /// ```
    /// use dispatch_logger::prelude::*;
    ///
    /// let logger = Logger::new();
    /// logger.log_fmt(LogLevel::Info, format_args!("listening on port {}", 8080)).unwrap();
    /// ```
    pub fn log_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>) -> Result<()> {
        if level < self.min_level() {
            return Ok(());
        }
        self.log(level, format_data(args))
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        let _ = self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        let _ = self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        let _ = self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        let _ = self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        let _ = self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        let _ = self.log(LogLevel::Fatal, message);
    }

    /// Register a handler. Registering the same instance twice fails with
    /// [`LoggerError::NotUnique`].
    pub fn add_handler(&self, handler: HandlerRef) -> Result<()> {
        self.shared.registry.add(handler)
    }

    /// Wrap `handler` in an `Arc`, register it and return the typed handle
    pub fn register<H: Handler + 'static>(&self, handler: H) -> Result<Arc<H>> {
        let handler = Arc::new(handler);
        self.shared.registry.add(handler.clone())?;
        Ok(handler)
    }

    pub fn remove_handler(&self, handler: &HandlerRef) -> Result<()> {
        self.shared.registry.remove(handler)
    }

    pub fn remove_handler_at(&self, index: usize) -> Result<HandlerRef> {
        self.shared.registry.remove_at(index)
    }

    pub fn handler_count(&self) -> usize {
        self.shared.registry.count()
    }

    pub fn handler_at(&self, index: usize) -> Option<HandlerRef> {
        self.shared.registry.get(index)
    }

    /// Events queued but not yet delivered (always 0 outside `Async`)
    pub fn pending(&self) -> usize {
        self.shared.pending()
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.shared.registry.flush_all()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use dispatch_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .min_level(LogLevel::Debug)
    ///     .mode(LoggerMode::Async)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(logger.mode(), LoggerMode::Async);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("mode", &self.mode())
            .field("min_level", &self.min_level())
            .field("handlers", &self.handler_count())
            .field("pending", &self.pending())
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        let mut joined = true;
        if let Some(worker) = state.worker.take() {
            joined = worker.stop();
            self.shared.drain();
        }
        state.mode = LoggerMode::Disabled;
        self.mode.store(LoggerMode::Disabled as u8, Ordering::Release);

        if let Err(e) = self.shared.registry.flush_all() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
        // Dropped on the worker inside a dispatch: the registry is still
        // borrowed, and goes away with the worker's reference to `Shared`
        if joined {
            self.shared.registry.clear();
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use dispatch_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Info)
///     .handler(StreamHandler::stderr())
///     .mode(LoggerMode::Sync)
///     .build()
///     .unwrap();
/// assert_eq!(logger.handler_count(), 1);
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    handlers: Vec<HandlerRef>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            handlers: Vec::new(),
        }
    }

    /// Replace the whole configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the initial mode (default `Sync`)
    #[must_use = "builder methods return a new value"]
    pub fn mode(mut self, mode: LoggerMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.min_level = level;
        self
    }

    /// Set the async worker's idle poll interval
    #[must_use = "builder methods return a new value"]
    pub fn idle_poll(mut self, interval: Duration) -> Self {
        self.config.idle_poll = interval;
        self
    }

    /// Add a handler
    #[must_use = "builder methods return a new value"]
    pub fn handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    /// Add an already shared handler
    #[must_use = "builder methods return a new value"]
    pub fn handler_ref(mut self, handler: HandlerRef) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Build the Logger
    ///
    /// Handlers are registered before the initial mode is entered.
    pub fn build(self) -> Result<Logger> {
        self.config.validate()?;

        let logger = Logger::from_parts(&self.config);
        for handler in self.handlers {
            logger.add_handler(handler)?;
        }
        logger.set_mode(self.config.mode)?;
        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
