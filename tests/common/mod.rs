use rand::Rng;
use rand::seq::SliceRandom;
use std::fs::File;
use std::io::Error;
use std::path::Path;

const REGION_CODES: [&str; 8] = [
    "Czech Republic",
    "CZ",
    "Slovakia",
    "sk",
    "Poland",
    "PL",
    "Hungary",
    "hungary",
];

/// Writes `rows` valid intents with random regions and amounts.
pub fn generate_intents_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    let mut rng = rand::thread_rng();

    wtr.write_record(["region", "amount", "reference"])?;

    for i in 1..=rows {
        let region = REGION_CODES.choose(&mut rng).copied().unwrap_or("CZ");
        let cents: u32 = rng.gen_range(1..1_000_000);
        let amount = format!("{}.{:02}", cents / 100, cents % 100);
        wtr.write_record([region, amount.as_str(), &format!("gen-{i}")])?;
    }

    wtr.flush()?;
    Ok(())
}
