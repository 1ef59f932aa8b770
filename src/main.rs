use clap::Parser;
use miette::{IntoDiagnostic, Result};
use portcheck::application::engine::SubmissionEngine;
use portcheck::domain::form::Field;
use portcheck::domain::offer::SubmissionOutcome;
use portcheck::domain::ports::EvaluatorBox;
use portcheck::infrastructure::http::HttpEvaluator;
use portcheck::infrastructure::rules::RulesEvaluator;
use portcheck::interfaces::console::ConsolePresenter;
use portcheck::interfaces::csv::offer_writer::OfferWriter;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file with the application record (wire field names to raw values)
    input: PathBuf,

    /// Remote evaluator endpoint (optional). Without it, the built-in rule
    /// book answers in-process.
    #[arg(long)]
    endpoint: Option<String>,

    /// Write the offer rows to this CSV file on success.
    #[arg(long)]
    export_csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let file = File::open(&cli.input).into_diagnostic()?;
    let raw: BTreeMap<String, String> = serde_json::from_reader(file).into_diagnostic()?;

    let evaluator: EvaluatorBox = match &cli.endpoint {
        Some(endpoint) => Box::new(HttpEvaluator::new(endpoint.clone())),
        None => Box::new(RulesEvaluator::new()),
    };
    let engine = SubmissionEngine::new(evaluator, Box::new(ConsolePresenter::new()));

    // Feed every value through the change event so the masks run exactly as
    // they would on keystrokes.
    for (key, value) in &raw {
        match Field::from_key(key) {
            Some(field) => {
                engine.field_changed(field, value);
            }
            None => eprintln!("ignoring unknown field: {key}"),
        }
    }

    match engine.submit().await {
        Some(SubmissionOutcome::Success { offers, .. }) => {
            if let Some(path) = &cli.export_csv {
                let file = File::create(path).into_diagnostic()?;
                OfferWriter::new(file).write_offers(&offers).into_diagnostic()?;
            }
            Ok(())
        }
        Some(SubmissionOutcome::Rejected { .. }) | Some(SubmissionOutcome::TransportFailure { .. }) => {
            std::process::exit(1);
        }
        None => {
            // Client-side validation already printed the field messages.
            std::process::exit(1);
        }
    }
}
