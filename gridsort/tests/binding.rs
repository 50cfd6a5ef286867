use std::sync::Arc;

use gridsort::prelude::*;

fn employees() -> Vec<Record> {
    vec![
        Record::new().set("id", 1).set("age", 40),
        Record::new().set("id", 2).set("age", 35),
        Record::new().set("id", 3).set("age", 50),
        Record::new().set("id", 4).set("age", 37),
    ]
}

fn ids(rows: &[Record]) -> Vec<i32> {
    rows.iter()
        .map(|r| r.get_int("id").unwrap().unwrap())
        .collect()
}

#[test]
fn test_detached_handler_matches_direct_call() {
    let event = SortEvent::new("age", "asc");

    // Direct method call on the instance.
    let rows_direct = Slot::new(employees());
    let sorter_direct = TableSorter::new(rows_direct.clone());
    let direct = sorter_direct.on_sort(&event);

    // Extracted handler invoked with no receiver.
    let rows_bound = Slot::new(employees());
    let sorter_bound = TableSorter::new(rows_bound.clone());
    let on_sort = sorter_bound.handler("on_sort").unwrap();
    let bound = on_sort(&event);

    assert_eq!(direct, bound);
    assert_eq!(ids(&rows_direct.get()), ids(&rows_bound.get()));
    assert_eq!(sorter_direct.sorted_by(), sorter_bound.sorted_by());
}

#[test]
fn test_handler_outlives_the_binding_that_created_it() {
    let rows = Slot::new(employees());
    let on_sort = {
        let sorter = TableSorter::new(rows.clone());
        sorter.handler("on_sort").unwrap()
        // sorter dropped here; the handler captured its own handle
    };

    assert_eq!(on_sort(&SortEvent::new("age", "asc")), EventResult::Consumed);
    assert_eq!(ids(&rows.get()), vec![2, 4, 1, 3]);
}

#[test]
fn test_handler_observes_instance_state_changes() {
    let rows = Slot::new(employees());
    let sorter = TableSorter::new(rows.clone());
    let on_sort = sorter.handler("on_sort").unwrap();

    on_sort(&SortEvent::new("age", "asc"));
    // The detached handler and the instance share state.
    assert_eq!(sorter.sorted_by().as_deref(), Some("age"));
    assert_eq!(sorter.sort_direction(), Direction::Asc);

    on_sort(&SortEvent::new("age", "desc"));
    assert_eq!(sorter.sort_direction(), Direction::Desc);
    assert_eq!(ids(&rows.get()), vec![3, 1, 4, 2]);
}

#[test]
fn test_double_bind_produces_equivalent_handlers() {
    let rows = Slot::new(employees());
    let sorter = TableSorter::new(rows.clone());

    let first = bind(&sorter, TableSorter::on_sort);
    let second = bind(&sorter, TableSorter::on_sort);

    assert_eq!(first(&SortEvent::new("age", "asc")), EventResult::Consumed);
    let after_first = ids(&rows.get());
    assert_eq!(second(&SortEvent::new("age", "asc")), EventResult::Consumed);
    assert_eq!(ids(&rows.get()), after_first);
}

#[test]
fn test_registry_register_get_and_clear() {
    let registry: HandlerRegistry<SortEvent> = HandlerRegistry::new();
    assert!(registry.is_empty());

    let rows = Slot::new(employees());
    let sorter = TableSorter::new(rows.clone());
    registry.register("on_sort", bind(&sorter, TableSorter::on_sort));
    assert_eq!(registry.len(), 1);
    assert!(registry.get("on_sort").is_some());
    assert!(registry.get("on_change").is_none());

    // Registering under the same name replaces, not nests.
    registry.register("on_sort", bind(&sorter, TableSorter::on_sort));
    assert_eq!(registry.len(), 1);

    registry.clear();
    assert!(registry.is_empty());
}

#[test]
fn test_dropping_all_handles_releases_sorter_and_rows() {
    #[derive(Clone)]
    struct Payload(Arc<i32>);

    impl SortableRow for Payload {
        fn field(&self, _name: &str) -> Option<Value> {
            Some(Value::Int(*self.0))
        }
    }

    let payload = Arc::new(7);
    let weak = Arc::downgrade(&payload);

    {
        let rows = Slot::new(vec![Payload(payload)]);
        let sorter = TableSorter::new(rows.clone());
        assert_eq!(
            sorter.on_sort(&SortEvent::new("value", "asc")),
            EventResult::Consumed
        );
        drop(rows);
    }

    // The registered handler captures the sorter's core, not its registry,
    // so dropping every external handle frees the sorter and its rows.
    assert!(weak.upgrade().is_none());
}

#[test]
fn test_extracted_handler_keeps_rows_alive_until_dropped() {
    #[derive(Clone)]
    struct Payload(Arc<i32>);

    impl SortableRow for Payload {
        fn field(&self, _name: &str) -> Option<Value> {
            Some(Value::Int(*self.0))
        }
    }

    let payload = Arc::new(7);
    let weak = Arc::downgrade(&payload);

    let on_sort = {
        let rows = Slot::new(vec![Payload(payload)]);
        let sorter = TableSorter::new(rows);
        sorter.handler("on_sort").unwrap()
    };

    // A live extracted handler still needs the rows it is bound to.
    assert!(weak.upgrade().is_some());
    assert_eq!(on_sort(&SortEvent::new("value", "desc")), EventResult::Consumed);

    drop(on_sort);
    assert!(weak.upgrade().is_none());
}

#[test]
fn test_bind_on_a_plain_component() {
    #[derive(Clone)]
    struct Tally {
        hits: Slot<u32>,
    }

    impl Tally {
        fn record(&self, _event: &SortEvent) -> EventResult {
            self.hits.update(|h| *h += 1);
            EventResult::Consumed
        }
    }

    let tally = Tally {
        hits: Slot::new(0),
    };
    let handler = bind(&tally, Tally::record);

    handler(&SortEvent::new("age", "asc"));
    handler(&SortEvent::new("age", "desc"));
    assert_eq!(tally.hits.get(), 2);
}
