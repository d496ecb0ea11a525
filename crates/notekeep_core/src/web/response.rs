//! Outgoing response model.
//!
//! A response is a status outcome plus the render context the host
//! templating layer would need. Authorization failures are expressed as
//! `NotFound`, never as a distinct forbidden signal.

use crate::model::note::Note;
use crate::service::note_service::FieldError;

/// Render context for the add/edit note form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFormView {
    pub title: String,
    pub text: String,
    pub slug: String,
    pub errors: Vec<FieldError>,
}

impl NoteFormView {
    /// Empty form for the add page.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Form prefilled from an existing note (edit page).
    pub fn prefilled(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            text: note.text.clone(),
            slug: note.slug.clone(),
            errors: Vec::new(),
        }
    }

    /// First error message for `field`, if any.
    pub fn error_on(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|err| err.field == field)
            .map(|err| err.message.as_str())
    }
}

/// Render context handed to the host templating layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    Login,
    Signup,
    LoggedOut,
    NoteList { notes: Vec<Note> },
    NoteForm { form: NoteFormView },
    NoteDetail { note: Note },
    ConfirmDelete { note: Note },
    Success,
}

/// Per-request outcome with an HTTP status projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// 200 with a rendered page.
    Ok(Page),
    /// 302 redirect.
    Found { location: String },
    /// 404; also the shape of every authorization failure.
    NotFound,
    /// 405, e.g. GET on the logout endpoint.
    MethodNotAllowed,
    /// 500; storage or consistency fault. Never panics the process.
    ServerError,
}

impl Response {
    pub fn found(location: impl Into<String>) -> Self {
        Self::Found {
            location: location.into(),
        }
    }

    /// HTTP status code of this outcome.
    pub fn status(&self) -> u16 {
        match self {
            Self::Ok(_) => 200,
            Self::Found { .. } => 302,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::ServerError => 500,
        }
    }

    /// Redirect target for `Found` responses.
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Found { location } => Some(location.as_str()),
            _ => None,
        }
    }

    /// Render context for `Ok` responses.
    pub fn page(&self) -> Option<&Page> {
        match self {
            Self::Ok(page) => Some(page),
            _ => None,
        }
    }
}
