//! Sort events and event handling types.
//!
//! [`SortEvent`] is the external trigger surface: the payload a UI layer
//! dispatches when the user asks for a sort. It is mapped into the internal
//! [`SortDescriptor`] before the sorter acts on it.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::EventError;

/// Sort direction for ordering rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Wire representation (`"asc"` / `"desc"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }

    /// Apply this direction to a three-way comparison result.
    ///
    /// Descending reverses the ordering of unequal pairs only;
    /// `Ordering::Equal` is untouched, so ties keep their input order under
    /// either direction.
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    }
}

impl FromStr for Direction {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(EventError::InvalidDirection(other.to_string())),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External sort trigger as dispatched by a UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortEvent {
    /// Name of the field to sort by.
    #[serde(rename = "fieldName")]
    pub field_name: String,
    /// Requested direction, `"asc"` or `"desc"`.
    #[serde(rename = "sortDirection")]
    pub sort_direction: String,
}

impl SortEvent {
    /// Creates a new sort event.
    pub fn new(field_name: impl Into<String>, sort_direction: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            sort_direction: sort_direction.into(),
        }
    }
}

/// Internal sort request consumed by
/// [`TableSorter::handle_sort`](crate::sorter::TableSorter::handle_sort).
#[derive(Debug, Clone, PartialEq)]
pub struct SortDescriptor {
    /// Name of the field to sort by.
    pub field: String,
    /// Direction to sort in.
    pub direction: Direction,
}

impl SortDescriptor {
    /// Creates a new sort descriptor.
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

impl TryFrom<&SortEvent> for SortDescriptor {
    type Error = EventError;

    fn try_from(event: &SortEvent) -> Result<Self, Self::Error> {
        Ok(Self {
            field: event.field_name.clone(),
            direction: event.sort_direction.parse()?,
        })
    }
}

impl TryFrom<SortEvent> for SortDescriptor {
    type Error = EventError;

    fn try_from(event: SortEvent) -> Result<Self, Self::Error> {
        SortDescriptor::try_from(&event)
    }
}

/// Result of handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_event_uses_wire_field_names() {
        let event: SortEvent =
            serde_json::from_str(r#"{"fieldName":"age","sortDirection":"asc"}"#).unwrap();
        assert_eq!(event.field_name, "age");
        assert_eq!(event.sort_direction, "asc");
    }

    #[test]
    fn descriptor_from_event_parses_direction() {
        let event = SortEvent::new("age", "desc");
        let descriptor = SortDescriptor::try_from(&event).unwrap();
        assert_eq!(descriptor.field, "age");
        assert_eq!(descriptor.direction, Direction::Desc);
    }

    #[test]
    fn unknown_direction_is_rejected() {
        let event = SortEvent::new("age", "sideways");
        assert!(matches!(
            SortDescriptor::try_from(&event),
            Err(EventError::InvalidDirection(_))
        ));
    }

    #[test]
    fn direction_reversal_leaves_ties_alone() {
        assert_eq!(Direction::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Direction::Desc.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(Direction::Asc.apply(Ordering::Greater), Ordering::Greater);
    }

    #[test]
    fn direction_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Asc).unwrap(), r#""asc""#);
        let parsed: Direction = serde_json::from_str(r#""desc""#).unwrap();
        assert_eq!(parsed, Direction::Desc);
    }
}
