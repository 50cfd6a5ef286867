//! Sort state and the stable sort dispatcher.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::{Arc, RwLock};

use log::{debug, warn};

use crate::binding::{Handler, HandlerRegistry, bind};
use crate::event::{Direction, EventResult, SortDescriptor, SortEvent};
use crate::record::{Record, Value};
use crate::state::Slot;

/// Trait for rows that can be sorted by a named field.
pub trait SortableRow: Clone + Send + Sync + 'static {
    /// Value of the named field, or `None` when the row does not carry it.
    ///
    /// Rows lacking the sort field compare equal to everything, so a stable
    /// sort keeps their relative input order.
    fn field(&self, name: &str) -> Option<Value>;
}

impl SortableRow for Record {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

/// Shared rows sort without copying the row data itself.
impl<R: SortableRow> SortableRow for Arc<R> {
    fn field(&self, name: &str) -> Option<Value> {
        (**self).field(name)
    }
}

/// Column configuration.
///
/// Columns describe the structure of the table: display label, the row field
/// they read, and whether the column is sortable.
///
/// # Examples
///
/// ```
/// use gridsort::sorter::Column;
///
/// let columns = vec![
///     Column::new("Id", "id"),
///     Column::new("Name", "name").sortable(),
///     Column::new("Age", "age").sortable(),
/// ];
/// ```
#[derive(Debug, Clone)]
pub struct Column {
    /// Column header label
    pub label: String,
    /// Row field this column displays and sorts by
    pub field: String,
    /// Whether this column is sortable
    pub sortable: bool,
}

impl Column {
    /// Create a new column reading the given row field.
    pub fn new(label: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            field: field.into(),
            sortable: false,
        }
    }

    /// Make the column sortable.
    ///
    /// Sort events for non-sortable columns are ignored.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}

/// Unique identifier for a TableSorter instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SorterId(usize);

impl SorterId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, AtomicOrdering::SeqCst))
    }
}

impl std::fmt::Display for SorterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__sorter_{}", self.0)
    }
}

/// Internal state for the TableSorter.
#[derive(Debug)]
struct SorterInner {
    /// Direction used for the first sort of a column.
    default_direction: Direction,
    /// Direction of the most recent sort.
    current_direction: Direction,
    /// Field of the most recent sort. `None` only before the first sort.
    current_field: Option<String>,
    /// Column metadata; empty means every field is sortable.
    columns: Vec<Column>,
}

/// Everything the sort entry point needs, minus the handler registry.
///
/// Bound handlers capture a clone of this core rather than the whole sorter.
/// The registry holds the handlers, so a handler that captured the registry
/// too would form a strong-reference cycle and pin the sorter (and its rows)
/// forever; keeping the registry out of the core lets the sorter drop once
/// external handles are gone.
struct SorterCore<R: SortableRow> {
    /// Unique identifier.
    id: SorterId,
    /// Handle to the externally owned row sequence.
    rows: Slot<Vec<R>>,
    /// Internal sort state.
    inner: Arc<RwLock<SorterInner>>,
}

impl<R: SortableRow> SorterCore<R> {
    fn columns(&self) -> Vec<Column> {
        self.inner
            .read()
            .map(|g| g.columns.clone())
            .unwrap_or_default()
    }

    fn default_sort_direction(&self) -> Direction {
        self.inner
            .read()
            .map(|g| g.default_direction)
            .unwrap_or_default()
    }

    fn sort_direction(&self) -> Direction {
        self.inner
            .read()
            .map(|g| g.current_direction)
            .unwrap_or_default()
    }

    fn sorted_by(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.current_field.clone())
    }

    fn is_sortable(&self, field: &str) -> bool {
        self.inner
            .read()
            .map(|g| {
                g.columns.is_empty()
                    || g.columns.iter().any(|c| c.field == field && c.sortable)
            })
            .unwrap_or(false)
    }

    fn handle_sort(&self, descriptor: &SortDescriptor) {
        // Shallow copy: new container, same rows.
        let mut rows = self.rows.get();
        rows.sort_by(|a, b| Self::compare(a, b, &descriptor.field, descriptor.direction));
        self.rows.set(rows);

        if let Ok(mut inner) = self.inner.write() {
            inner.current_direction = descriptor.direction;
            inner.current_field = Some(descriptor.field.clone());
        }
        debug!(
            "{}: sorted by '{}' {}",
            self.id, descriptor.field, descriptor.direction
        );
    }

    fn on_sort(&self, event: &SortEvent) -> EventResult {
        if !self.is_sortable(&event.field_name) {
            debug!("{}: field '{}' is not sortable", self.id, event.field_name);
            return EventResult::Ignored;
        }
        let descriptor = match SortDescriptor::try_from(event) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                warn!("{}: ignoring sort event: {}", self.id, err);
                return EventResult::Ignored;
            }
        };
        self.handle_sort(&descriptor);
        EventResult::Consumed
    }

    fn toggle_sort(&self, field: &str) -> Option<Direction> {
        if !self.is_sortable(field) {
            return None;
        }
        let direction = {
            let inner = self.inner.read().ok()?;
            if inner.current_field.as_deref() == Some(field) {
                inner.current_direction.toggled()
            } else {
                inner.default_direction
            }
        };
        self.handle_sort(&SortDescriptor::new(field, direction));
        Some(direction)
    }

    /// Stable three-way comparison over the named field.
    fn compare(a: &R, b: &R, field: &str, direction: Direction) -> Ordering {
        let ord = match (a.field(field), b.field(field)) {
            (Some(x), Some(y)) => x.compare(&y),
            // Absent fields compare equal; stability keeps their input order.
            _ => Ordering::Equal,
        };
        direction.apply(ord)
    }
}

impl<R: SortableRow> Clone for SorterCore<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            rows: self.rows.clone(),
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Sort controller for an externally owned row sequence.
///
/// The sorter holds a cloned [`Slot`] handle to rows owned by a view layer.
/// On each sort request it reads the current rows, sorts a fresh copy with a
/// stable comparator over the requested field, publishes the copy back to the
/// slot wholesale, and records the field and direction it sorted by. The
/// owner's previous sequence is never reordered in place.
///
/// Construction registers a bound `"on_sort"` handler, so the entry point can
/// be extracted and handed to an event dispatcher without losing its
/// instance.
///
/// # Example
///
/// ```
/// use gridsort::prelude::*;
///
/// let rows = Slot::new(vec![
///     Record::new().set("id", 1).set("age", 40),
///     Record::new().set("id", 2).set("age", 35),
/// ]);
/// let sorter = TableSorter::new(rows.clone());
///
/// // Extracted handler, invoked with no receiver.
/// let on_sort = sorter.handler("on_sort").unwrap();
/// assert_eq!(on_sort(&SortEvent::new("age", "asc")), EventResult::Consumed);
///
/// assert_eq!(rows.get()[0].get_int("id").unwrap(), Some(2));
/// assert_eq!(sorter.sorted_by().as_deref(), Some("age"));
/// ```
pub struct TableSorter<R: SortableRow> {
    /// Sort state and slot handle shared with the bound handlers.
    core: SorterCore<R>,
    /// Bound handlers registered at construction.
    handlers: HandlerRegistry<SortEvent>,
}

impl<R: SortableRow> TableSorter<R> {
    /// Create a sorter bound to the given row slot.
    ///
    /// Every field is treated as sortable; use
    /// [`with_columns`](TableSorter::with_columns) to restrict sorting to
    /// declared columns.
    pub fn new(rows: Slot<Vec<R>>) -> Self {
        Self::with_columns(rows, Vec::new())
    }

    /// Create a sorter with column metadata.
    ///
    /// Sort requests for fields without a matching sortable column are
    /// ignored.
    pub fn with_columns(rows: Slot<Vec<R>>, columns: Vec<Column>) -> Self {
        let core = SorterCore {
            id: SorterId::new(),
            rows,
            inner: Arc::new(RwLock::new(SorterInner {
                default_direction: Direction::Asc,
                current_direction: Direction::Asc,
                current_field: None,
                columns,
            })),
        };
        let handlers = HandlerRegistry::new();
        // Register the bound entry point so it survives extraction from the
        // instance. The handler captures the core only, never the registry.
        handlers.register("on_sort", bind(&core, SorterCore::on_sort));
        Self { core, handlers }
    }

    /// The sorter's unique id.
    pub fn id(&self) -> SorterId {
        self.core.id
    }

    /// The sorter's id as a string.
    pub fn id_string(&self) -> String {
        self.core.id.to_string()
    }

    /// Handle to the row slot this sorter publishes into.
    pub fn rows(&self) -> &Slot<Vec<R>> {
        &self.core.rows
    }

    /// Number of rows currently in the slot.
    pub fn len(&self) -> usize {
        self.core.rows.get().len()
    }

    /// Check if the slot currently holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column metadata, if any was declared.
    pub fn columns(&self) -> Vec<Column> {
        self.core.columns()
    }

    /// Direction used for the first sort of a column.
    pub fn default_sort_direction(&self) -> Direction {
        self.core.default_sort_direction()
    }

    /// Direction of the most recent sort, or the default before any sort.
    pub fn sort_direction(&self) -> Direction {
        self.core.sort_direction()
    }

    /// Field of the most recent sort, or `None` before any sort.
    pub fn sorted_by(&self) -> Option<String> {
        self.core.sorted_by()
    }

    /// Get the bound handler registered under a name.
    pub fn handler(&self, name: &str) -> Option<Handler<SortEvent>> {
        self.handlers.get(name)
    }

    /// Check whether a field may be sorted on.
    ///
    /// With no declared columns every field is sortable; otherwise a matching
    /// column marked sortable is required.
    pub fn is_sortable(&self, field: &str) -> bool {
        self.core.is_sortable(field)
    }

    /// Sort entry point.
    ///
    /// Reads the current rows, sorts a fresh copy by the descriptor's field,
    /// publishes the copy back to the slot, then updates the sorter's state.
    /// Missing fields compare equal; empty and single-row sequences are
    /// no-ops apart from the state update.
    pub fn handle_sort(&self, descriptor: &SortDescriptor) {
        self.core.handle_sort(descriptor);
    }

    /// Handle an external sort event.
    ///
    /// Maps the event into a [`SortDescriptor`] and dispatches it. Events for
    /// non-sortable fields or with an unknown direction string are ignored.
    /// This is the method bound as `"on_sort"` at construction.
    pub fn on_sort(&self, event: &SortEvent) -> EventResult {
        self.core.on_sort(event)
    }

    /// Sort by a field, toggling the direction on repeat sorts.
    ///
    /// The first sort of a field uses the default direction; sorting the
    /// current field again flips it. Returns the direction used, or `None`
    /// when the field is not sortable.
    pub fn toggle_sort(&self, field: &str) -> Option<Direction> {
        self.core.toggle_sort(field)
    }
}

impl<R: SortableRow> Clone for TableSorter<R> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
            handlers: self.handlers.clone(),
        }
    }
}

impl<R: SortableRow> std::fmt::Debug for TableSorter<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableSorter")
            .field("id", &self.core.id)
            .field("sorted_by", &self.sorted_by())
            .field("sort_direction", &self.sort_direction())
            .finish()
    }
}
