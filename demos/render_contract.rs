//! Render a contract record to a PDF file
//! Run with: cargo run -p contract --example render_contract -- demos/sample_record.json [--preview] [out-dir]
//!
//! The record is the form's JSON (see `ContractRecord`). The file is named
//! by the same policy the browser download uses.

use contract::{generate_contract, ContractRecord, RenderMode};
use log::info;
use std::fs;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut record_path = None;
    let mut out_dir = PathBuf::from("output");
    let mut mode = RenderMode::Normal;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--preview" => mode = RenderMode::Preview,
            _ if record_path.is_none() => record_path = Some(PathBuf::from(arg)),
            _ => out_dir = PathBuf::from(arg),
        }
    }

    let record_path = record_path
        .ok_or("usage: render_contract <record.json> [--preview] [out-dir]")?;

    let json = fs::read_to_string(&record_path)?;
    let record = ContractRecord::from_json(&json)?;
    info!("Loaded record from {}", record_path.display());

    let generated = generate_contract(&record, mode)?;

    fs::create_dir_all(&out_dir)?;
    let output = out_dir.join(&generated.filename);
    fs::write(&output, &generated.bytes)?;

    println!(
        "Wrote {} ({} page(s), {} bytes)",
        output.display(),
        generated.page_count,
        generated.bytes.len()
    );
    Ok(())
}
