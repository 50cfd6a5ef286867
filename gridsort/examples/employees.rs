use gridsort::prelude::*;
use simplelog::{Config, LevelFilter, SimpleLogger};

fn employee(id: i32, name: &str, age: i32) -> Record {
    Record::new().set("id", id).set("name", name).set("age", age)
}

fn print_rows(label: &str, rows: &[Record]) {
    println!("{label}");
    for row in rows {
        println!(
            "  {:>2}  {:<8} {}",
            row.get_int("id").unwrap().unwrap_or_default(),
            row.get_string("name").unwrap().unwrap_or_default(),
            row.get_int("age").unwrap().unwrap_or_default(),
        );
    }
}

fn main() {
    SimpleLogger::init(LevelFilter::Debug, Config::default())
        .expect("Failed to initialize logger");

    // The view layer owns the rows; the sorter gets a cloned handle.
    let rows = Slot::new(vec![
        employee(1, "Bennie", 40),
        employee(2, "Amy", 35),
        employee(3, "Carl", 50),
        employee(4, "Dana", 37),
    ]);
    let columns = vec![
        Column::new("Id", "id"),
        Column::new("Name", "name").sortable(),
        Column::new("Age", "age").sortable(),
    ];
    let sorter = TableSorter::with_columns(rows.clone(), columns);

    print_rows("initial:", &rows.get());

    // The handler stays bound to the sorter even when passed around bare,
    // the way an event dispatcher would hold it.
    let on_sort = sorter.handler("on_sort").expect("registered at construction");
    on_sort(&SortEvent::new("age", "asc"));
    print_rows("sorted by age asc:", &rows.get());

    // Header-click behavior: repeat sorts flip the direction.
    sorter.toggle_sort("age");
    print_rows("toggled to age desc:", &rows.get());

    sorter.toggle_sort("name");
    print_rows("sorted by name asc:", &rows.get());

    println!(
        "state: sorted_by={:?} direction={}",
        sorter.sorted_by(),
        sorter.sort_direction()
    );
}
