//! Run one recalculation from the command line
//!
//! Reads a recalculation request as JSON on stdin and prints the result.
//! Pass `--summary` to print only the display summary.

use std::io::Read;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tnt::config::env_filter())
        .with_writer(std::io::stderr)
        .init();

    let summary_only = std::env::args().skip(1).any(|a| a == "--summary");

    let mut raw = String::new();
    std::io::stdin().read_to_string(&mut raw)?;
    let input: tnt::models::RecalcInput = serde_json::from_str(&raw)?;

    let response = tnt::tools::recalc::recalculate(&input)?;
    let json = if summary_only {
        serde_json::to_string_pretty(&response.summary)?
    } else {
        serde_json::to_string_pretty(&response)?
    };
    println!("{}", json);

    for error in &response.result.errors {
        eprintln!("{}: {}", error.field.as_str(), error.message);
    }

    Ok(())
}
