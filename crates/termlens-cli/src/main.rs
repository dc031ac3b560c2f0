mod display;
mod session;

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::error;

use session::SessionStore;
use termlens_api::{ApiClient, ApiError};
use termlens_export::{ExportArtifact, generate_document_report, generate_spreadsheet_report};

#[derive(Parser)]
#[command(name = "termlens", version, about = "Contract comparison client")]
struct Cli {
    /// Backend API base URL.
    #[arg(
        long,
        global = true,
        env = "TERMLENS_API_URL",
        default_value = "http://localhost:5000/api"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload the expected-terms document.
    UploadExpected {
        /// Path to a .pdf, .doc, .docx, or .txt file.
        file: PathBuf,
    },
    /// Upload up to five contract documents.
    UploadContracts {
        /// Paths to contract files.
        files: Vec<PathBuf>,
    },
    /// Compare expected terms against one or more contracts.
    Compare {
        /// Expected-terms document id.
        #[arg(long)]
        expected: String,
        /// Contract document ids (1-5).
        #[arg(long, num_args = 1.., required = true)]
        contracts: Vec<String>,
    },
    /// Fetch and display a comparison. Defaults to the most recent one.
    Show { id: Option<String> },
    /// List extracted clauses for a stored document.
    Clauses { document_id: String },
    /// Show backend statistics, recent activity, and high-risk contracts.
    Dashboard,
    /// Export a comparison as a PDF report or XLSX workbook.
    Export {
        /// Comparison id. Defaults to the most recent one.
        id: Option<String>,
        #[arg(long, value_enum)]
        format: ExportFormat,
        /// Document name used for the report header and filename.
        #[arg(long)]
        name: String,
        /// Directory to write the artifact into.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Forget the stored last-comparison id.
    Forget,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Pdf,
    Xlsx,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let client = ApiClient::new(cli.api_url.clone());

    match cli.command {
        Command::UploadExpected { file } => {
            let doc = surface(client.upload_expected_terms(&file).await)?;
            display::print_document(&doc);
        }
        Command::UploadContracts { files } => {
            let docs = surface(client.upload_contracts(&files).await)?;
            for doc in &docs {
                display::print_document(doc);
            }
        }
        Command::Compare {
            expected,
            contracts,
        } => {
            let results = surface(client.compare(&expected, &contracts).await)?;
            for result in &results {
                display::print_result_card(result);
            }
            if let Some(first) = results.first() {
                SessionStore::open_default()?.set_last_comparison_id(&first.id)?;
            }
        }
        Command::Show { id } => {
            let id = resolve_comparison_id(id)?;
            let result = surface(client.comparison(&id).await)?;
            display::print_result_card(&result);
            SessionStore::open_default()?.set_last_comparison_id(&result.id)?;
        }
        Command::Clauses { document_id } => {
            let clauses = surface(client.document_clauses(&document_id).await)?;
            if clauses.is_empty() {
                println!("No clauses extracted for document {document_id}.");
            } else {
                display::print_clauses(&clauses);
            }
        }
        Command::Dashboard => {
            if !surface(client.health().await)? {
                bail!("backend is not healthy, please retry later");
            }
            let stats = surface(client.statistics().await)?;
            display::print_statistics(&stats);
            let activity = surface(client.recent_activity().await)?;
            display::print_recent_activity(&activity);
            let high_risk = surface(client.high_risk_contracts().await)?;
            display::print_high_risk(&high_risk);
        }
        Command::Export {
            id,
            format,
            name,
            out,
        } => {
            let id = resolve_comparison_id(id)?;
            let result = surface(client.comparison(&id).await)?;
            let artifact = match format {
                ExportFormat::Pdf => generate_document_report(&result, &name)?,
                ExportFormat::Xlsx => generate_spreadsheet_report(&result, &name)?,
            };
            let path = write_artifact(&artifact, &out)?;
            println!("Wrote {}", path.display());
        }
        Command::Forget => {
            SessionStore::open_default()?.clear()?;
            println!("Cleared stored comparison id.");
        }
    }

    Ok(())
}

/// Use the given id, falling back to the persisted last comparison.
fn resolve_comparison_id(id: Option<String>) -> anyhow::Result<String> {
    if let Some(id) = id {
        return Ok(id);
    }
    let store = SessionStore::open_default()?;
    match store.last_comparison_id() {
        Some(id) => Ok(id.to_string()),
        None => bail!("no comparison id given and no previous comparison recorded"),
    }
}

fn write_artifact(artifact: &ExportArtifact, out: &std::path::Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    let path = out.join(&artifact.filename);
    std::fs::write(&path, &artifact.bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Collapse backend errors to the user-facing message; full details go to
/// the log only.
fn surface<T>(result: Result<T, ApiError>) -> anyhow::Result<T> {
    result.map_err(|err| {
        error!(error = %err, "backend request failed");
        anyhow::anyhow!("{}", user_message(&err))
    })
}

fn user_message(err: &ApiError) -> String {
    match err {
        ApiError::Validation(msg) => msg.clone(),
        ApiError::Http(_) | ApiError::Server { .. } => {
            "request failed, please retry".to_string()
        }
        ApiError::Json(_) | ApiError::Malformed(_) | ApiError::Unexpected(_) => {
            "comparison results are unavailable".to_string()
        }
        ApiError::Io(io) => format!("could not read file: {io}"),
    }
}
