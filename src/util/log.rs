//! Ambient logging (spec §10.B).
//!
//! Not the `log` crate's global macros: the donor's own hand-rolled `Log`
//! trait, passed explicitly to the handful of call sites that want to
//! report progress (the adjacency builder, the reordering pass). Nothing
//! on a hot path (`get`/`set`/cursor iteration) logs anything; a
//! `&dyn Log` would cost a vtable call on every element.

/// A minimal logging sink: one-line progress and warning messages.
pub trait Log: Send + Sync {
    /// Logs an informational message.
    fn info(&self, message: &str);

    /// Logs a warning.
    fn warn(&self, message: &str);
}

/// A `Log` that discards everything. The default when no logger is
/// supplied.
pub struct NoOpLog;

impl Log for NoOpLog {
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
}

/// A `Log` that writes to stderr.
pub struct ConsoleLog;

impl Log for ConsoleLog {
    fn info(&self, message: &str) {
        eprintln!("[info] {}", message);
    }

    fn warn(&self, message: &str) {
        eprintln!("[warn] {}", message);
    }
}

/// Wraps another `Log`, prefixing every message with a fixed tag.
pub struct PrefixedLog<'a> {
    prefix: String,
    inner: &'a dyn Log,
}

impl<'a> PrefixedLog<'a> {
    /// Creates a logger that prefixes every message from `inner` with
    /// `prefix`.
    pub fn new(prefix: impl Into<String>, inner: &'a dyn Log) -> Self {
        Self {
            prefix: prefix.into(),
            inner,
        }
    }
}

impl<'a> Log for PrefixedLog<'a> {
    fn info(&self, message: &str) {
        self.inner.info(&format!("{}: {}", self.prefix, message));
    }

    fn warn(&self, message: &str) {
        self.inner.warn(&format!("{}: {}", self.prefix, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct CapturingLog {
        lines: Mutex<Vec<String>>,
    }

    impl CapturingLog {
        fn new() -> Self {
            Self {
                lines: Mutex::new(Vec::new()),
            }
        }
    }

    impl Log for CapturingLog {
        fn info(&self, message: &str) {
            self.lines.lock().unwrap().push(format!("info:{}", message));
        }

        fn warn(&self, message: &str) {
            self.lines.lock().unwrap().push(format!("warn:{}", message));
        }
    }

    #[test]
    fn noop_log_discards_everything() {
        let log = NoOpLog;
        log.info("hello");
        log.warn("world");
    }

    #[test]
    fn prefixed_log_prepends_tag() {
        let capturing = CapturingLog::new();
        let prefixed = PrefixedLog::new("builder", &capturing);
        prefixed.info("starting");
        prefixed.warn("slow page");

        let lines = capturing.lines.lock().unwrap();
        assert_eq!(lines[0], "info:builder: starting");
        assert_eq!(lines[1], "warn:builder: slow page");
    }
}
