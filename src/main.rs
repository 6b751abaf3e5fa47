// Card id syntax checker
// Reads raw card ids from the command line or a file and reports which
// document kinds each one matches

use cardcheck::{
    models::{DocumentKind, FormatTables, STANDARD_TABLES},
    processing::{default_workers, verify_cards, BatchReport},
    utils::CardError,
    CardValidator,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cardcheck",
    version,
    about = "Check personal id, passport and driver license numbers by syntax"
)]
struct Cli {
    /// Card ids to check
    card_ids: Vec<String>,

    /// File with one card id per line; blank lines count as missing ids
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// JSON file overriding the built-in format tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Worker threads used for validation
    #[arg(short, long)]
    workers: Option<usize>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn read_records(cli: &Cli) -> Result<Vec<Option<String>>, CardError> {
    let mut records: Vec<Option<String>> = cli.card_ids.iter().cloned().map(Some).collect();

    if let Some(path) = &cli.input {
        let contents = std::fs::read_to_string(path)?;
        records.extend(contents.lines().map(|line| {
            if line.trim().is_empty() {
                None
            } else {
                Some(line.to_string())
            }
        }));
    }

    Ok(records)
}

fn status(flag: bool) -> &'static str {
    if flag {
        "PASSED"
    } else {
        "FAILED"
    }
}

// Print a detailed validation report for every record
fn print_detailed_report(report: &BatchReport) {
    println!("\n===============================================");
    println!("        CARD ID VALIDATION DETAILED REPORT");
    println!("===============================================\n");

    for record in &report.records {
        match &record.card_id {
            Some(card_id) => {
                println!("CARD ID: {}", card_id);
                for kind in DocumentKind::ALL {
                    println!("  {:<15} {}", kind.label(), status(record.result.is_kind(kind)));
                }
                println!(
                    "  Result: {}\n",
                    if record.result.is_valid { "VALID" } else { "INVALID" }
                );
            }
            None => println!("CARD ID: <missing>\n  Result: INVALID\n"),
        }
    }

    let summary = &report.summary;
    println!("SUMMARY:");
    println!("  Total:          {}", summary.total);
    println!("  Missing:        {}", summary.missing);
    println!("  With letters:   {}", summary.with_letters);
    println!("  Personal ID:    {}", summary.personal_id);
    println!("  Passport:       {}", summary.passport);
    println!("  Driver License: {}", summary.driver_license);
    println!("  Valid:          {}", summary.valid);
}

fn main() -> Result<(), CardError> {
    env_logger::init();
    let cli = Cli::parse();

    let custom_tables = match &cli.config {
        Some(path) => Some(FormatTables::from_json_file(path)?),
        None => None,
    };
    let tables = custom_tables.as_ref().unwrap_or(&*STANDARD_TABLES);
    let validator = CardValidator::new(tables);

    let records = read_records(&cli)?;
    if records.is_empty() {
        eprintln!("No card ids given. Pass ids as arguments or use --input <FILE>.");
        return Ok(());
    }

    let workers = cli.workers.unwrap_or_else(default_workers);
    log::info!("Validating {} card ids with {} workers", records.len(), workers);
    let report = verify_cards(&records, &validator, workers);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_detailed_report(&report);
    }

    Ok(())
}
