use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_client::{HttpClient, ScribeApi};
use oasis::{Catalog, ItemCode};
use scribe_core::constants::API_URL_ENV;
use scribe_core::{render, App, AudioFile, CoreConfig, NoteField, ScribeResult};

#[derive(Parser)]
#[command(name = "scribe-run")]
#[command(about = "Interactive Scribe session")]
struct Args {
    /// API base URL (overrides SCRIBE_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Path to open first
    #[arg(default_value = "/")]
    path: String,
}

/// One line typed at the prompt.
#[derive(Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Go to a path, e.g. `/note/abc`
    Open { path: String },
    /// Open a row of the notes table (1-based)
    Row { number: usize },
    /// Open the New Note form
    New,
    /// Close the New Note form
    Close,
    /// Pick the patient for the new note
    Patient { id: String },
    /// Attach an audio file to the new note
    Audio { path: PathBuf },
    /// Submit the New Note form
    Create,
    /// Set the transcription or the summary; `\n` in the text starts a new line
    Set {
        field: NoteField,
        /// Taken verbatim from the line, spacing included
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Answer an assessment item, e.g. `select m1800 2`
    Select { item: ItemCode, value: String },
    /// Save the open note
    Save,
    /// Go back
    Back,
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

/// Interactive session over the notes API.
///
/// Each line is a command; the active page is printed after every command that changes it.
///
/// # Environment Variables
/// - `SCRIBE_API_URL`: API base URL (default: "http://localhost:3333")
/// - `RUST_LOG`: log filter, on top of the default `scribe=info`
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("scribe=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = CoreConfig::resolve(args.api_url, std::env::var(API_URL_ENV).ok())?;
    let catalog = Catalog::section_g().context("failed to load the OASIS catalog")?;
    let client = HttpClient::new(config.api_base_url().clone())?;

    tracing::info!("++ Starting Scribe against {}", config.api_base_url());

    let mut app = App::new(client, catalog);
    app.open(&args.path).await?;
    show(&mut app);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }

        let command = match Line::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        if let Command::Quit = command {
            break;
        }

        match run(&mut app, command, &line).await {
            Ok(()) => show(&mut app),
            Err(e) => eprintln!("[error] {e}"),
        }
    }

    Ok(())
}

async fn run<A: ScribeApi>(app: &mut App<A>, command: Command, line: &str) -> ScribeResult<()> {
    match command {
        Command::Open { path } => app.open(&path).await,
        Command::Row { number } => app.select_row(number.saturating_sub(1)).await,
        Command::New => app.open_new_note().await,
        Command::Close => {
            if !app.close_new_note()? {
                eprintln!("a note is being created");
            }
            Ok(())
        }
        Command::Patient { id } => app.select_patient(&id),
        Command::Audio { path } => app.attach_audio(AudioFile::load(&path)?),
        Command::Create => app.submit_new_note().await.map(|_| ()),
        Command::Set { field, .. } => app.set_text(field, free_text(line, 2)),
        Command::Select { item, value } => app.select(item, &value),
        Command::Save => app.save_note().await.map(|_| ()),
        Command::Back => app.back().await,
        Command::Quit => Ok(()),
    }
}

fn show<A: ScribeApi>(app: &mut App<A>) {
    let notifications = app.take_notifications();
    let body = render::page(app.page(), app.catalog());
    println!("{}", render::layout(&body, &notifications));
}

/// The rest of `line` after its first `skip` words, inner spacing untouched.
fn free_text(line: &str, skip: usize) -> String {
    let mut rest = line.trim_start();
    for _ in 0..skip {
        rest = match rest.find(char::is_whitespace) {
            Some(end) => rest[end..].trim_start(),
            None => "",
        };
    }
    rest.trim_end().replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_keeps_the_spacing_of_the_text() {
        let line = "set  summary   Walks  with a cane;   needs help on stairs ";
        assert_eq!(free_text(line, 2), "Walks  with a cane;   needs help on stairs");
    }

    #[test]
    fn escaped_newlines_start_new_lines() {
        assert_eq!(
            free_text("set transcription Line one\\nLine two", 2),
            "Line one\nLine two"
        );
    }

    #[test]
    fn set_without_text_clears_the_field() {
        assert_eq!(free_text("set summary", 2), "");
        assert_eq!(free_text("set summary   ", 2), "");
    }

    #[test]
    fn set_line_still_parses_as_a_command() {
        let line = "set summary Uses a  cane";
        let parsed = Line::try_parse_from(line.split_whitespace()).unwrap();
        assert!(matches!(parsed.command, Command::Set { field: NoteField::Summary, .. }));
        assert_eq!(free_text(line, 2), "Uses a  cane");
    }
}
