//! Handler trait for pluggable record processing

use super::{attr::Attr, error::Result, level::Level, record::Record};
use std::sync::Arc;

/// The capability set every handler offers to the `Logger` front-end.
///
/// `with_attrs` and `with_group` never mutate the receiver; they return a
/// derived handler that may share state with it.
pub trait Handler: Send + Sync {
    /// Whether records at `level` should be built and handed to `handle`.
    fn enabled(&self, level: Level) -> bool;

    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler>;

    fn with_group(&self, name: &str) -> Arc<dyn Handler>;

    fn handle(&self, record: &Record) -> Result<()>;
}
