use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::sync::Arc;

use anyhow::Context;
use ledger_rpc_validator::shared::LoggingUtils;
use ledger_rpc_validator::{AppConfig, AppError, RequestEnvelope, ValidationService};
use serde_json::Value;
use tracing::{error, info};

fn main() {
    if let Err(e) = run() {
        error!("rpc-validate failed: {:#}", e);
        eprintln!("rpc-validate: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    LoggingUtils::initialize(&config.logging).context("Failed to initialize logging")?;

    info!(
        min_version = config.api.min_version,
        max_version = config.api.max_version,
        "Configuration loaded successfully"
    );

    let service = ValidationService::new(Arc::new(config));

    let input: Box<dyn BufRead> = match std::env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("Failed to open {}", path))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut processed = 0usize;

    for line in input.lines() {
        let line = line.context("Failed to read request")?;
        if line.trim().is_empty() {
            continue;
        }

        let response = respond(&service, &line);
        serde_json::to_writer(&mut out, &response)?;
        writeln!(out)?;
        processed += 1;
    }

    out.flush()?;
    info!(processed, "Finished validating requests");
    Ok(())
}

fn respond(service: &ValidationService, line: &str) -> Value {
    let request: Value = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => return AppError::from(e).to_jsonrpc_error(),
    };

    RequestEnvelope::from_value(request)
        .and_then(|envelope| service.validate_request(envelope))
        .map(|validated| validated.to_json())
        .unwrap_or_else(|status| AppError::from(status).to_jsonrpc_error())
}
