//! Beam analysis from a JSON document
//!
//! Usage: `beam-analyze [input.json]`. Reads stdin when no path is given and
//! writes the results as JSON to stdout.

use std::io::Read;

use anyhow::{Context, Result};
use serde::Deserialize;

use beam_fem::prelude::*;

#[derive(Debug, Deserialize)]
struct AnalysisRequest {
    beam: BeamInput,
    #[serde(default)]
    options: Option<AnalysisOptions>,
}

fn read_request() -> Result<AnalysisRequest> {
    let text = match std::env::args().nth(1) {
        Some(path) => {
            std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    serde_json::from_str(&text).context("input is not a valid analysis request")
}

fn main() -> Result<()> {
    env_logger::init();

    let request = read_request()?;
    let options = request.options.unwrap_or_default();
    log::info!(
        "analyzing beam of length {} with {} supports",
        request.beam.length,
        request.beam.supports.len()
    );

    let results = analyze(&request.beam, &options).context("analysis failed")?;
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
