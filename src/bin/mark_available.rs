//! One-shot batch edit: rewrite a catalog file so every book reads as
//! available again. Operates positionally on the status column, so it works
//! on any export that keeps the column order, and shares no logic with the
//! running server.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

const STATUS_AVAILABLE: &str = "대출가능";
const UTF8_BOM: &str = "\u{feff}";

#[derive(Parser)]
#[command(about = "Reset the status column of a catalog file to available")]
struct Args {
    /// Catalog file to rewrite in place
    file: PathBuf,

    /// Zero-based index of the status column
    #[arg(long, default_value_t = 6)]
    column: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let content = raw.strip_prefix(UTF8_BOM).unwrap_or(&raw);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());
    let rows = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .context("parsing catalog rows")?;

    let mut file =
        File::create(&args.file).with_context(|| format!("rewriting {}", args.file.display()))?;
    file.write_all(UTF8_BOM.as_bytes())?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(file);

    let mut updated = 0usize;
    for (index, row) in rows.iter().enumerate() {
        if index == 0 {
            // header row stays untouched
            writer.write_record(row)?;
            continue;
        }
        anyhow::ensure!(
            row.len() > args.column,
            "row {} has only {} columns",
            index + 1,
            row.len()
        );
        let fields: Vec<&str> = row
            .iter()
            .enumerate()
            .map(|(i, field)| if i == args.column { STATUS_AVAILABLE } else { field })
            .collect();
        writer.write_record(fields)?;
        updated += 1;
    }
    writer.flush()?;

    println!(
        "Set column {} to \"{}\" on {} rows in {}",
        args.column,
        STATUS_AVAILABLE,
        updated,
        args.file.display()
    );
    Ok(())
}
