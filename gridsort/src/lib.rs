//! Shared component helpers for sortable tables
//!
//! The library provides the model/controller slice behind a sortable table
//! UI: a [`Slot`](state::Slot) the owning view publishes rows into, a
//! [`TableSorter`](sorter::TableSorter) that re-orders those rows in response
//! to sort events, and a [`bind`](binding::bind) utility that keeps component
//! methods callable after they have been extracted from their instance.

pub mod binding;
pub mod error;
pub mod event;
pub mod record;
pub mod sorter;
pub mod state;

pub mod prelude {
    pub use crate::binding::{Handler, HandlerRegistry, bind};
    pub use crate::error::{EventError, FieldError};
    pub use crate::event::{Direction, EventResult, SortDescriptor, SortEvent};
    pub use crate::record::{Record, Value};
    pub use crate::sorter::{Column, SortableRow, SorterId, TableSorter};
    pub use crate::state::Slot;
}
