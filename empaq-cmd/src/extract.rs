//! Local extraction command: run the pipeline on a payload from disk
//! or stdin and print the selection as JSON.

use anyhow::Context;
use log::info;
use std::io::Read;

/// Run extraction on a local payload file ("-" reads stdin).
pub fn run_extract(input: &str, now: Option<&str>) -> anyhow::Result<()> {
    let raw = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read payload from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("failed to read payload from {}", input))?
    };

    let now = crate::resolve_now(now)?;
    info!("extracting from {} ({} bytes, now = {})", input, raw.len(), now);

    let selection = empaq_extract::extract_value(&raw, now)?;
    println!("{}", serde_json::to_string_pretty(&selection)?);
    Ok(())
}
