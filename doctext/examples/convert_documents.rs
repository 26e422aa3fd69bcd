// Example: Convert a folder of documents to plain text
//
// Converts every supported file under data/documents into
// data/processed_texts and prints the batch report as JSON.
//
// Usage:
//   cargo run --example convert_documents

use anyhow::Result;
use std::path::Path;

use doctext::document_processing::{find_supported_files, DocumentFormat};
use doctext::{Config, Converter};

fn main() -> Result<()> {
    println!("Document Conversion Example\n");

    println!("=== Example 1: Single file ===");
    example_single_file()?;

    println!("\n=== Example 2: Batch conversion ===");
    example_batch()?;

    println!("\n✓ All examples completed successfully!");
    Ok(())
}

fn example_single_file() -> Result<()> {
    let input = "data/documents/example.docx";

    if !Path::new(input).exists() {
        println!("⚠ File not found: {}", input);
        println!("  Skipping this example. Create the file to test.");
        return Ok(());
    }

    let output = doctext::process_file(input, "data/processed_texts")?;
    println!("✓ Wrote {}", output.display());

    Ok(())
}

fn example_batch() -> Result<()> {
    let input_dir = "data/documents";

    if !Path::new(input_dir).exists() {
        println!("⚠ Directory not found: {}", input_dir);
        println!("  Skipping this example. Create the directory with documents to test.");
        return Ok(());
    }

    let files = find_supported_files(input_dir, true);
    println!("Found {} files ({})", files.len(), supported_list());

    let config = Config::load_default()?;
    let report = Converter::from_config(&config).process_files(&files, "data/processed_texts")?;

    println!(
        "✓ {} converted, {} failed",
        report.succeeded().count(),
        report.failed().count()
    );
    println!("{}", report.to_json_pretty()?);

    Ok(())
}

fn supported_list() -> String {
    DocumentFormat::ALL
        .iter()
        .map(|format| format.extension())
        .collect::<Vec<_>>()
        .join(", ")
}
