//! Bound handler utility.
//!
//! A method extracted from its instance and invoked bare loses access to the
//! instance's state. [`bind`] solves this by producing a closure that captures
//! a clone of the instance handle at creation time: the resulting [`Handler`]
//! can be stored, passed to an event dispatcher, or invoked with no receiver,
//! and still operates on the instance it was bound to.
//!
//! Components declare their behavior set explicitly by registering each bound
//! handler in a [`HandlerRegistry`] at construction, under well-known names
//! such as `"on_sort"`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::event::EventResult;

/// A bound handler closure for events of type `E`.
///
/// The closure captures its owning instance at creation time, so it remains
/// safe to invoke after being detached from that instance.
pub type Handler<E, R = EventResult> = Arc<dyn Fn(&E) -> R + Send + Sync>;

/// Bind a method to its owning instance.
///
/// Takes a handle to the instance and a method on it, and returns a closure
/// that forwards the event to the method with the captured instance as
/// receiver. Because the instance is captured by value (a clone of the
/// handle), the returned handler stays valid even after the original binding
/// goes out of scope.
///
/// Binding the same method twice yields two independent, equivalent handlers;
/// there is no wrapper nesting because each call captures the instance handle
/// directly.
///
/// # Example
///
/// ```
/// use gridsort::binding::bind;
/// use gridsort::event::EventResult;
///
/// #[derive(Clone)]
/// struct Greeter {
///     name: String,
/// }
///
/// impl Greeter {
///     fn greet(&self, whom: &String) -> EventResult {
///         println!("{} greets {}", self.name, whom);
///         EventResult::Consumed
///     }
/// }
///
/// let greeter = Greeter { name: "table".into() };
/// let handler = bind(&greeter, Greeter::greet);
/// drop(greeter);
///
/// // Still bound to the instance it was created from.
/// assert_eq!(handler(&"world".to_string()), EventResult::Consumed);
/// ```
pub fn bind<C, E, R, F>(instance: &C, method: F) -> Handler<E, R>
where
    C: Clone + Send + Sync + 'static,
    F: Fn(&C, &E) -> R + Send + Sync + 'static,
{
    let bound = instance.clone();
    Arc::new(move |event| method(&bound, event))
}

/// Registry of bound handlers keyed by name.
///
/// Standard handler names:
/// - `"on_sort"` - a sort was requested for a column
///
/// Registering under an existing name replaces the previous handler.
pub struct HandlerRegistry<E, R = EventResult> {
    handlers: Arc<RwLock<HashMap<String, Handler<E, R>>>>,
}

impl<E, R> HandlerRegistry<E, R> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a bound handler under a name.
    pub fn register(&self, name: &str, handler: Handler<E, R>) {
        if let Ok(mut handlers) = self.handlers.write() {
            handlers.insert(name.to_string(), handler);
        }
    }

    /// Get the handler registered under a name.
    pub fn get(&self, name: &str) -> Option<Handler<E, R>> {
        self.handlers.read().ok()?.get(name).cloned()
    }

    /// Clear all handlers.
    pub fn clear(&self) {
        if let Ok(mut handlers) = self.handlers.write() {
            handlers.clear();
        }
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers.read().map(|h| h.is_empty()).unwrap_or(true)
    }

    /// Get the number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.read().map(|h| h.len()).unwrap_or(0)
    }
}

impl<E, R> Default for HandlerRegistry<E, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, R> Clone for HandlerRegistry<E, R> {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
        }
    }
}

impl<E, R> std::fmt::Debug for HandlerRegistry<E, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handler_count", &self.len())
            .finish()
    }
}
