//! Entity trait for store-owned records and the shared clock

use chrono::{Local, NaiveDateTime};

/// Base trait for records owned by a store.
///
/// Identity and `created_at` are assigned once; `updated_at` is advanced on
/// every mutation through [`Entity::touch`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "customers")
    fn resource_name() -> &'static str;

    /// Advance `updated_at` to the current time
    fn touch(&mut self);
}

/// Current local wall-clock time, the clock all entity timestamps use.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
