use std::path::PathBuf;

use anyhow::Context;
use api_client::{HttpClient, ScribeApi};
use clap::{Parser, Subcommand};
use oasis::{Catalog, ItemCode};
use scribe_core::constants::API_URL_ENV;
use scribe_core::pages::{CreateOutcome, NewNoteModal, NoteDetailsState, NotesListPage, SaveOutcome};
use scribe_core::{render, App, AudioFile, CoreConfig, NoteField};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scribe")]
#[command(about = "Scribe clinical notes CLI")]
struct Cli {
    /// API base URL (overrides SCRIBE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all notes
    Notes,
    /// List all patients
    Patients,
    /// Show a note with its patient and assessment
    Note {
        /// Note ID
        id: String,
    },
    /// Create a note from an audio recording
    NewNote {
        /// Patient ID
        #[arg(long)]
        patient: String,
        /// Path to the audio file
        #[arg(long)]
        audio: PathBuf,
    },
    /// Edit a note; fields not given keep their current value
    UpdateNote {
        /// Note ID
        id: String,
        #[arg(long)]
        transcription: Option<String>,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long)]
        m1800: Option<String>,
        #[arg(long)]
        m1810: Option<String>,
        #[arg(long)]
        m1820: Option<String>,
        #[arg(long)]
        m1830: Option<String>,
        #[arg(long)]
        m1840: Option<String>,
        #[arg(long)]
        m1850: Option<String>,
        #[arg(long)]
        m1860: Option<String>,
    },
    /// Render the page at a path, e.g. `/note/abc`
    Open {
        /// Page path
        path: String,
    },
    /// List the OASIS Section G items and their answers
    Items,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("scribe=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let catalog = Catalog::section_g().context("failed to load the OASIS catalog")?;

    let Some(command) = cli.command else {
        println!("Use 'scribe --help' for commands");
        return Ok(());
    };

    if let Commands::Items = command {
        for item in catalog.items() {
            println!("{}", item.heading());
            for option in &item.options {
                println!("  {} - {}", option.value, option.text);
            }
        }
        return Ok(());
    }

    let config = CoreConfig::resolve(cli.api_url, std::env::var(API_URL_ENV).ok())?;
    let client = HttpClient::new(config.api_base_url().clone())?;
    tracing::debug!("using API at {}", config.api_base_url());

    match command {
        Commands::Notes => {
            let page = NotesListPage::load(&client).await?;
            print!("{}", render::notes_list(&page));
        }
        Commands::Patients => {
            let patients = client.fetch_patients().await?;
            if patients.is_empty() {
                println!("No patients found.");
            }
            for patient in patients {
                println!(
                    "ID: {}, Name: {}, Identification number: {}",
                    patient.id, patient.name, patient.patient_id
                );
            }
        }
        Commands::Note { id } => match NoteDetailsState::load(&client, Some(id.as_str())).await? {
            NoteDetailsState::Ready(details) => print!("{}", render::note_details(&details, &catalog)),
            NoteDetailsState::Redirect { notification, .. } => anyhow::bail!(notification.message),
            NoteDetailsState::Loading => {}
        },
        Commands::NewNote { patient, audio } => {
            let audio = AudioFile::load(&audio)?;
            tracing::info!("uploading {} ({:?})", audio.file_name(), audio.media_type());
            let mut modal = NewNoteModal::default();
            modal.open(&client).await?;
            modal.select_patient(&patient)?;
            modal.attach_audio(audio);

            match modal.submit(&client).await {
                CreateOutcome::Created {
                    notification,
                    navigation,
                } => {
                    println!("{notification}");
                    if let scribe_core::Navigation::To(route) = navigation {
                        println!("{route}");
                    }
                }
                CreateOutcome::Invalid => {
                    for (field, message) in modal.errors().iter() {
                        eprintln!("{}: {}", field.label(), message);
                    }
                    anyhow::bail!("note not created");
                }
                CreateOutcome::Failed(notification) => anyhow::bail!(notification.message),
            }
        }
        Commands::UpdateNote {
            id,
            transcription,
            summary,
            m1800,
            m1810,
            m1820,
            m1830,
            m1840,
            m1850,
            m1860,
        } => {
            let mut details = match NoteDetailsState::load(&client, Some(id.as_str())).await? {
                NoteDetailsState::Ready(details) => details,
                NoteDetailsState::Redirect { notification, .. } => {
                    anyhow::bail!(notification.message)
                }
                NoteDetailsState::Loading => return Ok(()),
            };

            if let Some(value) = transcription {
                details.set_text(NoteField::Transcription, value)?;
            }
            if let Some(value) = summary {
                details.set_text(NoteField::Summary, value)?;
            }
            let answers = [m1800, m1810, m1820, m1830, m1840, m1850, m1860];
            for (code, value) in ItemCode::ALL.into_iter().zip(answers) {
                if let Some(value) = value {
                    details.select(&catalog, code, &value)?;
                }
            }

            match details.save(&client).await {
                SaveOutcome::Saved(notification) => println!("{notification}"),
                SaveOutcome::Invalid => {
                    for (field, message) in details.errors().iter() {
                        eprintln!("{field}: {message}");
                    }
                    anyhow::bail!("note not updated");
                }
                SaveOutcome::Failed(notification) => anyhow::bail!(notification.message),
            }
        }
        Commands::Open { path } => {
            let mut app = App::new(client, catalog);
            app.open(&path).await?;
            let body = render::page(app.page(), app.catalog());
            print!("{}", render::layout(&body, &app.take_notifications()));
        }
        Commands::Items => {}
    }

    Ok(())
}
