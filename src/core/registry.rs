//! Ordered, lock-guarded collection of registered handlers

use super::{
    error::{LoggerError, Result},
    handler::{same_handler, HandlerRef},
    log_event::LogEvent,
};
use parking_lot::RwLock;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// One handler's failure during a dispatch pass
#[derive(Debug)]
pub struct HandlerFailure {
    pub index: usize,
    pub name: String,
    pub error: LoggerError,
}

/// Outcome of delivering one event to every registered handler
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Handlers visited (including ones that filtered the event out)
    pub visited: usize,
    pub failures: Vec<HandlerFailure>,
}

impl DispatchReport {
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn panics(&self) -> usize {
        self.failures
            .iter()
            .filter(|f| matches!(f.error, LoggerError::HandlerPanicked { .. }))
            .count()
    }

    pub(crate) fn into_result(self) -> Result<()> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(LoggerError::Dispatch {
                failed: self.failures.len(),
                total: self.visited,
            })
        }
    }
}

/// Handlers in insertion order. Order only fixes iteration; every matching
/// handler fires.
///
/// Mutation takes the write lock, dispatch the read lock, so a handler is
/// never skipped or visited twice because of a concurrent add or remove.
/// Index-based accessors reflect the registry at the instant of the call.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: RwLock<Vec<HandlerRef>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Handler at `index`, or `None` past the end
    pub fn get(&self, index: usize) -> Option<HandlerRef> {
        self.handlers.read().get(index).cloned()
    }

    pub fn contains(&self, handler: &HandlerRef) -> bool {
        self.handlers
            .read()
            .iter()
            .any(|existing| same_handler(existing, handler))
    }

    /// Append a handler; the same instance may only be registered once
    pub fn add(&self, handler: HandlerRef) -> Result<()> {
        let mut handlers = self.handlers.write();
        if handlers.iter().any(|existing| same_handler(existing, &handler)) {
            return Err(LoggerError::not_unique(handler.name()));
        }
        handlers.push(handler);
        Ok(())
    }

    pub fn remove(&self, handler: &HandlerRef) -> Result<()> {
        let mut handlers = self.handlers.write();
        match handlers
            .iter()
            .position(|existing| same_handler(existing, handler))
        {
            Some(index) => {
                handlers.remove(index);
                Ok(())
            }
            None => Err(LoggerError::handler_not_found(handler.name())),
        }
    }

    /// Remove the handler at `index`, handing it back to the caller
    pub fn remove_at(&self, index: usize) -> Result<HandlerRef> {
        let mut handlers = self.handlers.write();
        if index >= handlers.len() {
            return Err(LoggerError::index_out_of_range(index, handlers.len()));
        }
        Ok(handlers.remove(index))
    }

    /// Deliver `event` to every handler in order.
    ///
    /// Each call is isolated: an error or a panic in one handler is recorded
    /// in the report and the pass continues with the next handler.
    pub fn dispatch(&self, event: &LogEvent) -> DispatchReport {
        // Recursive so a handler that logs back into its logger cannot
        // deadlock against a queued writer
        let handlers = self.handlers.read_recursive();
        let mut report = DispatchReport {
            visited: handlers.len(),
            failures: Vec::new(),
        };

        for (index, handler) in handlers.iter().enumerate() {
            let outcome = catch_unwind(AssertUnwindSafe(|| handler.handle_event(event)));
            let error = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e,
                Err(panic_info) => {
                    LoggerError::handler_panicked(handler.name(), panic_message(&*panic_info))
                }
            };
            report.failures.push(HandlerFailure {
                index,
                name: handler.name().to_string(),
                error,
            });
        }

        report
    }

    /// Flush every handler, returning the first error after trying them all
    pub fn flush_all(&self) -> Result<()> {
        // Recursive: the logger may be dropped from inside a dispatch
        let handlers = self.handlers.read_recursive();
        let mut first_error = None;
        for handler in handlers.iter() {
            if let Err(e) = handler.flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub(crate) fn clear(&self) {
        self.handlers.write().clear();
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Handler, HandlerState, LogLevel};
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct Recorder {
        state: HandlerState,
        name: &'static str,
        seen: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn new(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                state: HandlerState::default(),
                name,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl Handler for Recorder {
        fn render(&self, event: &LogEvent) -> Result<()> {
            self.seen.lock().push(event.message().to_string());
            Ok(())
        }

        fn state(&self) -> &HandlerState {
            &self.state
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    struct Failing {
        state: HandlerState,
        panic: bool,
    }

    impl Handler for Failing {
        fn render(&self, _event: &LogEvent) -> Result<()> {
            if self.panic {
                panic!("sink exploded");
            }
            Err(LoggerError::writer("sink closed"))
        }

        fn state(&self) -> &HandlerState {
            &self.state
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_add_and_count() {
        let registry = HandlerRegistry::new();
        assert_eq!(registry.count(), 0);

        registry.add(Recorder::new("a")).unwrap();
        registry.add(Recorder::new("b")).unwrap();
        assert_eq!(registry.count(), 2);
        assert_eq!(registry.get(1).unwrap().name(), "b");
        assert!(registry.get(2).is_none());
    }

    #[test]
    fn test_duplicate_rejected() {
        let registry = HandlerRegistry::new();
        let handler: HandlerRef = Recorder::new("dup");

        registry.add(Arc::clone(&handler)).unwrap();
        let err = registry.add(Arc::clone(&handler)).unwrap_err();
        assert!(matches!(err, LoggerError::NotUnique { .. }));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_remove_by_reference() {
        let registry = HandlerRegistry::new();
        let a: HandlerRef = Recorder::new("a");
        let b: HandlerRef = Recorder::new("b");
        registry.add(Arc::clone(&a)).unwrap();
        registry.add(Arc::clone(&b)).unwrap();

        registry.remove(&a).unwrap();
        assert_eq!(registry.count(), 1);
        assert!(!registry.contains(&a));
        assert!(registry.remove(&a).unwrap_err().is_not_found());

        // The caller's handle outlives removal
        assert_eq!(a.name(), "a");
    }

    #[test]
    fn test_remove_at() {
        let registry = HandlerRegistry::new();
        registry.add(Recorder::new("a")).unwrap();
        registry.add(Recorder::new("b")).unwrap();

        let removed = registry.remove_at(0).unwrap();
        assert_eq!(removed.name(), "a");
        assert_eq!(registry.get(0).unwrap().name(), "b");

        let err = registry.remove_at(5).err().unwrap();
        assert!(matches!(err, LoggerError::IndexOutOfRange { index: 5, count: 1 }));
    }

    #[test]
    fn test_dispatch_in_insertion_order() {
        let registry = HandlerRegistry::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for name in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            let handler = crate::handlers::CallbackHandler::new(move |_event| {
                order.lock().push(name);
                Ok(())
            });
            registry.add(Arc::new(handler)).unwrap();
        }

        assert!(registry.dispatch(&LogEvent::new(LogLevel::Info, "x")).is_ok());
        assert_eq!(*order.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_failure_isolation() {
        let registry = HandlerRegistry::new();
        let before = Recorder::new("before");
        let after = Recorder::new("after");

        registry.add(before.clone()).unwrap();
        registry
            .add(Arc::new(Failing {
                state: HandlerState::default(),
                panic: false,
            }))
            .unwrap();
        registry
            .add(Arc::new(Failing {
                state: HandlerState::default(),
                panic: true,
            }))
            .unwrap();
        registry.add(after.clone()).unwrap();

        let report = registry.dispatch(&LogEvent::new(LogLevel::Error, "still delivered"));
        assert_eq!(report.visited, 4);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.panics(), 1);
        assert_eq!(report.failures[0].index, 1);

        assert_eq!(*before.seen.lock(), vec!["still delivered"]);
        assert_eq!(*after.seen.lock(), vec!["still delivered"]);

        let err = report.into_result().unwrap_err();
        assert!(matches!(err, LoggerError::Dispatch { failed: 2, total: 4 }));
    }
}
