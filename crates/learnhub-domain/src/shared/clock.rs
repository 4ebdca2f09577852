use chrono::NaiveDateTime;

/// Wall clock collaborator.
///
/// Returns the local wall-clock instant with no timezone attached; day
/// boundaries are taken from it as-is.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}
