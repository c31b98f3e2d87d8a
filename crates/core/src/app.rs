//! The navigation session: history, the active page and pending notifications.
//!
//! Every user action goes through [`App`], which forwards it to the active page and applies the
//! resulting notification and navigation.

use crate::audio::AudioFile;
use crate::forms::NoteField;
use crate::notification::Notification;
use crate::pages::{CreateOutcome, NoteDetails, NoteDetailsState, NotesListPage, SaveOutcome};
use crate::router::{Navigation, Route};
use crate::{ScribeError, ScribeResult};
use api_client::ScribeApi;
use oasis::{Catalog, ItemCode};

/// The page currently shown.
#[derive(Clone, Debug)]
pub enum Page {
    Loading,
    NotesList(NotesListPage),
    NoteDetails(Box<NoteDetails>),
    NotFound { path: String },
}

pub struct App<A: ScribeApi> {
    api: A,
    catalog: Catalog,
    history: Vec<Route>,
    page: Page,
    notifications: Vec<Notification>,
}

impl<A: ScribeApi> App<A> {
    pub fn new(api: A, catalog: Catalog) -> Self {
        Self {
            api,
            catalog,
            history: Vec::new(),
            page: Page::Loading,
            notifications: Vec::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn history(&self) -> &[Route] {
        &self.history
    }

    /// Route of the page currently shown.
    pub fn route(&self) -> Option<&Route> {
        self.history.last()
    }

    /// Notifications raised since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Opens a path as if typed into the address bar.
    pub async fn open(&mut self, path: &str) -> ScribeResult<()> {
        self.navigate(Navigation::To(Route::parse(path))).await
    }

    pub async fn navigate(&mut self, navigation: Navigation) -> ScribeResult<()> {
        match navigation {
            Navigation::To(route) => {
                tracing::info!("navigate to {}", route);
                self.history.push(route.clone());
                if let Err(e) = self.enter(route).await {
                    self.history.pop();
                    return Err(e);
                }
                Ok(())
            }
            Navigation::Back => {
                if self.history.len() <= 1 {
                    return Ok(());
                }
                let left = self.history.pop();
                let route = self.history.last().cloned().unwrap_or(Route::NotesList);
                tracing::info!("back to {}", route);
                if let Err(e) = self.enter(route).await {
                    self.history.extend(left);
                    return Err(e);
                }
                Ok(())
            }
        }
    }

    async fn enter(&mut self, route: Route) -> ScribeResult<()> {
        self.page = match route {
            Route::NotesList => Page::NotesList(self.load_notes().await),
            Route::NoteDetails { note_id } => {
                match NoteDetailsState::load(&self.api, Some(note_id.as_str())).await? {
                    NoteDetailsState::Ready(details) => Page::NoteDetails(details),
                    NoteDetailsState::Loading => Page::Loading,
                    NoteDetailsState::Redirect { notification, .. } => {
                        self.notifications.push(notification);
                        self.replace_current(Route::NotesList);
                        Page::NotesList(self.load_notes().await)
                    }
                }
            }
            Route::NotFound { path } => Page::NotFound { path },
        };
        Ok(())
    }

    /// A failed list query shows an empty list.
    async fn load_notes(&self) -> NotesListPage {
        match NotesListPage::load(&self.api).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("failed to load notes: {}", e);
                NotesListPage::default()
            }
        }
    }

    fn replace_current(&mut self, route: Route) {
        self.history.pop();
        self.history.push(route);
    }

    fn notes_list_mut(&mut self) -> ScribeResult<&mut NotesListPage> {
        match &mut self.page {
            Page::NotesList(page) => Ok(page),
            _ => Err(ScribeError::InvalidInput(
                "the notes list is not open".to_owned(),
            )),
        }
    }

    fn note_details_mut(&mut self) -> ScribeResult<&mut NoteDetails> {
        match &mut self.page {
            Page::NoteDetails(details) => Ok(details.as_mut()),
            _ => Err(ScribeError::InvalidInput("no note is open".to_owned())),
        }
    }

    /// Clicks the row at `index` (zero-based) of the notes table.
    pub async fn select_row(&mut self, index: usize) -> ScribeResult<()> {
        let navigation = self
            .notes_list_mut()?
            .open_row(index)
            .ok_or_else(|| ScribeError::InvalidInput(format!("no row {}", index + 1)))?;
        self.navigate(navigation).await
    }

    pub async fn open_new_note(&mut self) -> ScribeResult<()> {
        let Page::NotesList(page) = &mut self.page else {
            return Err(ScribeError::InvalidInput(
                "the notes list is not open".to_owned(),
            ));
        };
        if let Err(e) = page.modal_mut().open(&self.api).await {
            tracing::warn!("failed to load patients: {}", e);
        }
        Ok(())
    }

    pub fn close_new_note(&mut self) -> ScribeResult<bool> {
        Ok(self.notes_list_mut()?.modal_mut().close())
    }

    pub fn select_patient(&mut self, patient_id: &str) -> ScribeResult<()> {
        let modal = self.notes_list_mut()?.modal_mut();
        if !modal.is_open() {
            return Err(ScribeError::InvalidInput("the New Note form is not open".to_owned()));
        }
        modal.select_patient(patient_id)
    }

    pub fn attach_audio(&mut self, audio: AudioFile) -> ScribeResult<()> {
        let modal = self.notes_list_mut()?.modal_mut();
        if !modal.is_open() {
            return Err(ScribeError::InvalidInput("the New Note form is not open".to_owned()));
        }
        modal.attach_audio(audio);
        Ok(())
    }

    pub async fn submit_new_note(&mut self) -> ScribeResult<CreateOutcome> {
        let Page::NotesList(page) = &mut self.page else {
            return Err(ScribeError::InvalidInput(
                "the notes list is not open".to_owned(),
            ));
        };
        let outcome = page.modal_mut().submit(&self.api).await;

        match &outcome {
            CreateOutcome::Created {
                notification,
                navigation,
            } => {
                self.notifications.push(notification.clone());
                self.navigate(navigation.clone()).await?;
            }
            CreateOutcome::Failed(notification) => self.notifications.push(notification.clone()),
            CreateOutcome::Invalid => {}
        }
        Ok(outcome)
    }

    pub fn set_text(&mut self, field: NoteField, value: impl Into<String>) -> ScribeResult<()> {
        self.note_details_mut()?.set_text(field, value)
    }

    pub fn select(&mut self, code: ItemCode, value: &str) -> ScribeResult<()> {
        let Page::NoteDetails(details) = &mut self.page else {
            return Err(ScribeError::InvalidInput("no note is open".to_owned()));
        };
        details.select(&self.catalog, code, value)
    }

    pub async fn save_note(&mut self) -> ScribeResult<SaveOutcome> {
        let Page::NoteDetails(details) = &mut self.page else {
            return Err(ScribeError::InvalidInput("no note is open".to_owned()));
        };
        let outcome = details.save(&self.api).await;

        if let SaveOutcome::Saved(notification) | SaveOutcome::Failed(notification) = &outcome {
            self.notifications.push(notification.clone());
        }
        Ok(outcome)
    }

    /// The note page's "Return" button, or plain history back elsewhere.
    pub async fn back(&mut self) -> ScribeResult<()> {
        let navigation = match &self.page {
            Page::NoteDetails(details) => details.go_back(),
            _ => Navigation::Back,
        };
        self.navigate(navigation).await
    }
}
