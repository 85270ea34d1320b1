use serde_json::Value;
use std::io;

use super::{flatten, payload};

/// Two-column `field,value` CSV of the result on stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    if let Err(e) = write_rows(&mut wtr, value) {
        eprintln!("CSV output error: {}", e);
    }
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (field, val) in flatten(payload(value)) {
        wtr.write_record([field, val])?;
    }
    wtr.flush()?;
    Ok(())
}
