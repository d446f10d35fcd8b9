use std::path::Path;

use csv_search::{Table, TableOptions};

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    // generate it with `cargo run --bin data_generator`
    let path = Path::new("data/income_by_race.csv");
    let table = match Table::load_csv(path, TableOptions::with_header()) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("could not load {}: {}", path.display(), e);
            return;
        }
    };

    // Run a restricted search and a full-table search
    let _by_race = table.search("Multiracial", Some("Race"));
    let _anywhere = table.search("RI", None);

    println!("Memory benchmark finished. See dhat-heap.json for details");
}
