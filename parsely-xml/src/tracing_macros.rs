//! Tracing macro that compiles to nothing when the tracing feature is disabled.

/// Emit a trace-level log message.
macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    };
}

pub(crate) use trace;
