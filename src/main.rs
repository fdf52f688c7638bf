use std::io::{self, Read};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use trellis_connect::{ConnectorKind, ConnectorPayload};
use trellis_form::FieldValues;
use trellis_wizard::{NextOutcome, SubmitFailure, SubmitResult, WizardController};

/// Trellis - headless driver for the console's connector create wizards
#[derive(Parser)]
#[command(name = "trellis")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Connector kind: external, internal-user, or two-factor
  #[arg(long, global = true, default_value = "external")]
  kind: String,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Validate wizard field values (JSON object on stdin), page by page
  Validate,

  /// Drive the wizard end to end and print the assembled create payload
  Assemble,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();
  let kind = parse_kind(&cli.kind)?;

  match cli.command {
    Some(Commands::Validate) => {
      let values = read_values_from_stdin()?;
      validate(kind, &values)?;
    }
    Some(Commands::Assemble) => {
      let values = read_values_from_stdin()?;
      let rt = tokio::runtime::Runtime::new()?;
      rt.block_on(assemble(kind, values))?;
    }
    None => {
      println!("trellis - use --help to see available commands");
    }
  }

  Ok(())
}

fn parse_kind(kind: &str) -> Result<ConnectorKind> {
  match kind {
    "external" => Ok(ConnectorKind::External),
    "internal-user" => Ok(ConnectorKind::InternalUser),
    "two-factor" => Ok(ConnectorKind::TwoFactor),
    other => {
      bail!("unknown connector kind '{other}' (expected external, internal-user, or two-factor)")
    }
  }
}

/// Run every page validator against the values and report the findings.
fn validate(kind: ConnectorKind, values: &FieldValues) -> Result<()> {
  let mut failed = false;
  for (index, page) in kind.pages().iter().enumerate() {
    let errors = page.validate(values);
    if errors.is_empty() {
      eprintln!("page {} ({}): ok", index, page.name());
    } else {
      failed = true;
      eprintln!("page {} ({}): {} error(s)", index, page.name(), errors.len());
      println!("{}", serde_json::to_string_pretty(&errors)?);
    }
  }

  if failed {
    bail!("validation failed");
  }
  Ok(())
}

/// Drive the flow controller through every page and print the payload
/// the terminal submit would send.
async fn assemble(kind: ConnectorKind, values: FieldValues) -> Result<()> {
  let controller =
    WizardController::new(kind.pages(), values).context("failed to configure the wizard")?;
  let cancel = CancellationToken::new();
  let assembled: Arc<Mutex<Option<ConnectorPayload>>> = Arc::new(Mutex::new(None));

  loop {
    let sink = Arc::clone(&assembled);
    let outcome = controller
      .next(
        move |snapshot| {
          let result = kind.assemble(&snapshot);
          async move {
            match result {
              Ok(payload) => {
                *sink.lock().unwrap() = Some(payload);
                Ok(SubmitResult::empty())
              }
              Err(e) => Err(SubmitFailure::Generic {
                detail: Some(e.to_string()),
              }),
            }
          }
        },
        &cancel,
      )
      .await?;

    match outcome {
      NextOutcome::Advanced { .. } => continue,
      NextOutcome::Rejected { errors } => {
        eprintln!(
          "page {} rejected the values:",
          controller.current_page_index()
        );
        println!("{}", serde_json::to_string_pretty(&errors)?);
        bail!("validation failed");
      }
      NextOutcome::Submitted(_) => break,
    }
  }

  let payload = assembled
    .lock()
    .unwrap()
    .take()
    .context("wizard completed without assembling a payload")?;
  println!("{}", serde_json::to_string_pretty(&payload)?);
  Ok(())
}

fn read_values_from_stdin() -> Result<FieldValues> {
  let mut buffer = String::new();
  io::stdin()
    .read_to_string(&mut buffer)
    .context("failed to read field values from stdin")?;

  if buffer.trim().is_empty() {
    return Ok(FieldValues::new());
  }

  serde_json::from_str(&buffer).context("failed to parse field values as a JSON object")
}
