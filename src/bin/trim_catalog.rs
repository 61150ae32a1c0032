//! One-shot batch edit: keep only the first half of a catalog's data rows.
//! Used to cut an oversized export down to a workable size; shares no logic
//! with the running server.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

const UTF8_BOM: &str = "\u{feff}";

#[derive(Parser)]
#[command(about = "Write a copy of a catalog file keeping the first half of its rows")]
struct Args {
    /// Source catalog file
    input: PathBuf,

    /// Where to write the reduced copy
    #[arg(long, default_value = "reduced_data.csv")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let content = raw.strip_prefix(UTF8_BOM).unwrap_or(&raw);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());
    let rows = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .context("parsing catalog rows")?;

    let data_rows = rows.len().saturating_sub(1);
    let keep = data_rows / 2;

    let mut file = File::create(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    file.write_all(UTF8_BOM.as_bytes())?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(file);

    for row in rows.iter().take(1 + keep) {
        writer.write_record(row)?;
    }
    writer.flush()?;

    println!(
        "Kept {} of {} rows; reduced data saved to {}",
        keep,
        data_rows,
        args.output.display()
    );
    Ok(())
}
