use rand::Rng;
use std::fs::{self, File};
use std::io::{BufWriter, Write};

const STATES: [&str; 6] = ["RI", "MA", "CT", "NY", "NH", "VT"];
const RACES: [&str; 6] = [
    "White",
    "Black",
    "Native American/American Indian",
    "Asian-Pacific Islander",
    "Hispanic/Latino",
    "Multiracial",
];

fn main() -> std::io::Result<()> {
    let path = "data/income_by_race.csv";
    fs::create_dir_all("data")?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "State,Race,Income,Population,County")?;

    let mut rng = rand::rng();
    for i in 0..1_000_000 {
        let state = STATES[rng.random_range(0..STATES.len())];
        let race = RACES[rng.random_range(0..RACES.len())];
        let income: f64 = rng.random_range(300.0..1500.0);
        let population = rng.random_range(100..500_000);
        // quoted county names carry a comma, like the census exports
        writeln!(
            writer,
            "{},{},{:.2},{},\"County {}, {}\"",
            state,
            race,
            income,
            population,
            i % 40,
            state
        )?;
    }
    writer.flush()?;

    println!("Sample CSV generated: {}", path);
    Ok(())
}
