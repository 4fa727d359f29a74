//! Handler trait for event output destinations

use super::{error::Result, log_event::LogEvent, log_level::LogLevel};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

/// Shared handle under which handlers are registered.
///
/// Identity (for duplicate detection and removal) is the allocation, so a
/// clone of the handle refers to the same handler.
pub type HandlerRef = Arc<dyn Handler>;

/// Filtering state every handler carries: a minimum level and an enable flag.
///
/// Both fields are atomics so they may be changed while a dispatch is in
/// flight on another thread.
#[derive(Debug)]
pub struct HandlerState {
    level: AtomicU8,
    enabled: AtomicBool,
}

impl HandlerState {
    pub const fn new(level: LogLevel) -> Self {
        Self {
            level: AtomicU8::new(level as u8),
            enabled: AtomicBool::new(true),
        }
    }

    #[inline]
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// True if an event at `level` passes both gates
    #[inline]
    pub fn accepts(&self, level: LogLevel) -> bool {
        self.is_enabled() && level >= self.level()
    }
}

impl Default for HandlerState {
    fn default() -> Self {
        Self::new(LogLevel::Trace)
    }
}

/// A registered sink that renders the events it is interested in.
///
/// Implementors provide [`render`](Handler::render) and expose their
/// [`HandlerState`]; the gating in [`handle_event`](Handler::handle_event)
/// and the accessors come for free.
///
/// # Example
///
/// ```
/// use dispatch_logger::core::{Handler, HandlerState, LogEvent, LogLevel, Result};
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// struct Counter {
///     state: HandlerState,
///     seen: AtomicUsize,
/// }
///
/// impl Handler for Counter {
///     fn render(&self, _event: &LogEvent) -> Result<()> {
///         self.seen.fetch_add(1, Ordering::Relaxed);
///         Ok(())
///     }
///
///     fn state(&self) -> &HandlerState {
///         &self.state
///     }
/// }
///
/// let counter = Counter { state: HandlerState::new(LogLevel::Warn), seen: AtomicUsize::new(0) };
/// counter.handle_event(&LogEvent::new(LogLevel::Info, "skipped")).unwrap();
/// counter.handle_event(&LogEvent::new(LogLevel::Error, "kept")).unwrap();
/// assert_eq!(counter.seen.load(Ordering::Relaxed), 1);
/// ```
pub trait Handler: Send + Sync {
    /// Write one event to the sink. The event must not be retained.
    fn render(&self, event: &LogEvent) -> Result<()>;

    fn state(&self) -> &HandlerState;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "handler"
    }

    /// Gate on the enable flag, then the level threshold, then render.
    ///
    /// A filtered event returns `Ok(())` without touching the sink.
    fn handle_event(&self, event: &LogEvent) -> Result<()> {
        if !self.state().accepts(event.level()) {
            return Ok(());
        }
        self.render(event)
    }

    fn level(&self) -> LogLevel {
        self.state().level()
    }

    fn set_level(&self, level: LogLevel) {
        self.state().set_level(level);
    }

    fn is_enabled(&self) -> bool {
        self.state().is_enabled()
    }

    fn enable(&self) {
        self.state().set_enabled(true);
    }

    fn disable(&self) {
        self.state().set_enabled(false);
    }
}

/// Identity comparison for registered handles
#[inline]
pub(crate) fn same_handler(a: &HandlerRef, b: &HandlerRef) -> bool {
    // Compare data pointers only; vtable pointers may differ across codegen units
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
