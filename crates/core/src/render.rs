//! Plain-text rendering of pages inside the layout shell.

use crate::app::Page;
use crate::constants::{APP_NAME, NO_NOTES};
use crate::forms::{CreateNoteField, NoteField};
use crate::notification::Notification;
use crate::pages::{NewNoteModal, NoteDetails, NotesListPage};
use oasis::Catalog;
use std::fmt::Write;

/// Header, page body and notification area.
pub fn layout(body: &str, notifications: &[Notification]) -> String {
    let mut out = String::new();
    let rule = "=".repeat(APP_NAME.len() + 4);
    let _ = writeln!(out, "{rule}\n  {APP_NAME}\n{rule}\n");
    out.push_str(body.trim_end());
    out.push('\n');
    if !notifications.is_empty() {
        out.push('\n');
        for notification in notifications {
            let _ = writeln!(out, "{notification}");
        }
    }
    out
}

pub fn page(page: &Page, catalog: &Catalog) -> String {
    match page {
        Page::Loading => "Loading...\n".to_owned(),
        Page::NotesList(list) => notes_list(list),
        Page::NoteDetails(details) => note_details(details, catalog),
        Page::NotFound { path } => not_found(path),
    }
}

pub fn notes_list(list: &NotesListPage) -> String {
    let mut out = String::from("Patient Notes                                  [New Note]\n\n");

    if list.is_empty() {
        let _ = writeln!(out, "{NO_NOTES}");
    } else {
        let header = ["#", "Patient", "Preview", "Created At"];
        let numbers: Vec<String> = (1..=list.rows().len()).map(|n| n.to_string()).collect();
        let rows: Vec<[&str; 4]> = list
            .rows()
            .iter()
            .zip(&numbers)
            .map(|(row, number)| {
                [
                    number.as_str(),
                    row.patient_name.as_str(),
                    row.preview.as_str(),
                    row.created_at.as_str(),
                ]
            })
            .collect();

        let mut widths = header.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        table_line(&mut out, &header, &widths);
        let separator = widths.map(|w| "-".repeat(w));
        table_line(&mut out, &separator.each_ref().map(String::as_str), &widths);
        for row in &rows {
            table_line(&mut out, row, &widths);
        }
    }

    if list.modal().is_open() {
        out.push('\n');
        out.push_str(&new_note_modal(list.modal()));
    }
    out
}

fn table_line(out: &mut String, cells: &[&str; 4], widths: &[usize; 4]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

pub fn new_note_modal(modal: &NewNoteModal) -> String {
    let mut out = String::from("--- New Note ---\n");
    let selected = modal.form().patient_id();

    out.push_str("Patient:\n");
    if modal.patients().is_empty() {
        out.push_str("  (no patients)\n");
    }
    for patient in modal.patients() {
        let marker = if selected == Some(&patient.id) { "(x)" } else { "( )" };
        let _ = writeln!(
            out,
            "  {marker} {}  {} ({})",
            patient.id, patient.name, patient.patient_id
        );
    }
    field_error(&mut out, modal.errors().get(CreateNoteField::PatientId));

    match modal.form().audio() {
        Some(audio) => {
            let _ = writeln!(
                out,
                "Upload audio file: {} ({})",
                audio.file_name(),
                audio.media_type().unwrap_or("unknown type")
            );
        }
        None => out.push_str("Upload audio file: (none)\n"),
    }
    field_error(&mut out, modal.errors().get(CreateNoteField::Audio));

    let _ = writeln!(out, "[{}]", modal.submit_label());
    out
}

pub fn note_details(details: &NoteDetails, catalog: &Catalog) -> String {
    let mut out = String::new();
    let card = details.patient();
    let _ = writeln!(out, "{}", card.name);
    let _ = writeln!(out, "  Date of birth: {}", card.date_of_birth);
    let _ = writeln!(out, "  Identification number: {}\n", card.identification_number);

    let _ = writeln!(out, "{}", details.heading());
    let _ = writeln!(out, "{}\n", details.created_on());

    for field in [NoteField::Transcription, NoteField::Summary] {
        let _ = writeln!(out, "{}:", field.label());
        let value = details.form().value(field);
        for line in value.lines() {
            let _ = writeln!(out, "  {line}");
        }
        field_error(&mut out, details.errors().get(field));
        out.push('\n');
    }

    let _ = writeln!(out, "{}\n", catalog.title);
    for item in catalog.items() {
        let field = NoteField::Assessment(item.code);
        let current = details.form().value(field);
        let _ = writeln!(out, "{}", item.heading());
        if !item.description.is_empty() {
            let _ = writeln!(out, "  {}", item.description);
        }
        for option in &item.options {
            let marker = if option.value == current { "(x)" } else { "( )" };
            let _ = writeln!(out, "  {marker} {} - {}", option.value, option.text);
        }
        field_error(&mut out, details.errors().get(field));
        out.push('\n');
    }

    let _ = writeln!(out, "[Return]  [{}]", details.save_label());
    out
}

pub fn not_found(path: &str) -> String {
    format!("Page not found: {path}\n")
}

fn field_error(out: &mut String, message: Option<&str>) {
    if let Some(message) = message {
        let _ = writeln!(out, "  ! {message}");
    }
}
