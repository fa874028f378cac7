//! Error extension utilities
//!
//! Context extension methods for foreign errors and rendering of cause
//! chains for logs and aggregated configuration errors.

use std::error::Error as StdError;
use std::fmt;

use partwire_domain::error::{CompositionError, Error, Result};

/// Extension trait for adding context to errors
///
/// # Example
///
/// ```ignore
/// use partwire_infrastructure::error_ext::ErrorContext;
///
/// let text = std::fs::read_to_string(&path)
///     .config_context(format!("Failed to read {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Convert the error into a configuration error described by `context`
    ///
    /// The original error is kept as the source, so cause-chain rendering
    /// prints its message on its own line.
    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        Self: Sized;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        Self: Sized,
    {
        self.map_err(|err| Error::configuration_with_source(context.to_string(), err))
    }
}

/// Kind name of an error in a cause chain
pub fn error_kind(err: &(dyn StdError + 'static)) -> &'static str {
    if let Some(err) = err.downcast_ref::<Error>() {
        err.kind_name()
    } else if err.is::<CompositionError>() || err.is::<Box<CompositionError>>() {
        "CompositionError"
    } else {
        "Error"
    }
}

/// `{kind}: {message}` for the error and each of its sources, outermost first
pub fn describe_chain(err: &(dyn StdError + 'static)) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = Some(err);
    while let Some(err) = current {
        lines.push(format!("{}: {err}", error_kind(err)));
        current = err.source();
    }
    lines
}
