//! Command-line front end: a thin presentation layer over `CoreState`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config;
use crate::core_state::CoreState;
use crate::models::{self, DiagnosisModel};

#[derive(Parser, Debug)]
#[command(name = "mindshield", version, about = "Parkinson's screening from gait and hand videos")]
pub struct Cli {
    /// Settings database holding the diagnosis history
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload a video and print the screening verdict
    Diagnose {
        /// Local video file (recorded or picked from the gallery)
        file: PathBuf,

        /// Which model to ask: gait or hand
        #[arg(long, default_value = "gait")]
        model: DiagnosisModel,

        /// Send to this URL instead of the model's configured endpoint
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,

        /// Save the verdict to the history under this patient name
        #[arg(long, value_name = "NAME")]
        save: Option<String>,
    },

    /// List saved verdicts, oldest first
    History {
        /// Delete every saved verdict instead
        #[arg(long)]
        clear: bool,
    },

    /// List the built-in exercise library
    Training,

    /// List the available models and their endpoints
    Models,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Diagnose {
            file,
            model,
            endpoint,
            save,
        } => {
            let state = open_state(cli.db)?;
            let endpoint = endpoint.unwrap_or_else(|| model.endpoint());
            println!("Uploading {} to the {} model...", file.display(), model.label());

            let verdict = match state.pipeline().run(&file, &endpoint).await {
                Ok(verdict) => verdict,
                Err(e) => anyhow::bail!("Upload Error [{}]: {e}", e.kind()),
            };

            let band = verdict.band();
            println!(
                "Probability of Parkinson's: {}% ({}, {})",
                verdict.display_percent(),
                band.label(),
                band.color()
            );
            println!("Diagnosis: {}", verdict.diagnosis_label);
            println!("The result may be inaccurate.");

            if let Some(name) = save {
                let record = state
                    .pipeline()
                    .save(&verdict, &name)
                    .context("Failed to save diagnosis")?;
                println!("Diagnosis saved for {}.", record.patient_name);
            }
        }
        Command::History { clear } => {
            let state = open_state(cli.db)?;
            if clear {
                state.clear_history().context("Failed to clear history")?;
                println!("History cleared.");
            } else {
                let records = state.history().context("Failed to read history")?;
                if records.is_empty() {
                    println!("No saved diagnoses.");
                }
                for record in &records {
                    println!("{}", record.summary());
                }
            }
        }
        Command::Training => {
            for section in models::training::sections() {
                println!("{}", section.title_key);
                for item in section.items {
                    println!("  {} ({})", item.title_key, item.video_name);
                }
            }
        }
        Command::Models => {
            for (index, model) in DiagnosisModel::ALL.iter().enumerate() {
                println!("{index}: {} ({}) -> {}", model.label(), model, model.endpoint());
            }
        }
    }
    Ok(())
}

fn open_state(db: Option<PathBuf>) -> anyhow::Result<CoreState> {
    let path = db.unwrap_or_else(config::database_path);
    CoreState::open(&path).with_context(|| format!("Cannot start {}", config::APP_NAME))
}
