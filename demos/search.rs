use csv_search::{SearchOutcome, Table, TableOptions};
use std::path::PathBuf;

fn sample_csv_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("income_by_race.csv")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = sample_csv_path();

    let table = Table::load_csv(path.as_path(), TableOptions::with_header())?;

    // Rows whose Race column is 'Multiracial'
    match table.search("Multiracial", Some("Race"))? {
        SearchOutcome::Found { rows, .. } => {
            println!("{} rows with Race = Multiracial", rows.len());
            for row in rows.iter().take(5) {
                println!("  {}", row.join(","));
            }
        }
        SearchOutcome::FoundElsewhere(other) => println!("{other}"),
        SearchOutcome::NoMatch => println!("Value was not found"),
    }
    Ok(())
}
