//! Route table with forward and reverse lookup.
//!
//! # Invariants
//! - `Route::resolve(route.path())` round-trips for every route.
//! - Static segments win over slug captures, so `/notes/add/` is never
//!   parsed as a detail page for a note named `add`.

/// Public home page.
pub const HOME_PATH: &str = "/";
/// Login form; private pages redirect here with `?next=`.
pub const LOGIN_PATH: &str = "/auth/login/";
pub const LOGOUT_PATH: &str = "/auth/logout/";
pub const SIGNUP_PATH: &str = "/auth/signup/";
pub const NOTE_LIST_PATH: &str = "/notes/";
pub const NOTE_ADD_PATH: &str = "/notes/add/";
pub const NOTE_SUCCESS_PATH: &str = "/notes/success/";

/// Resolved request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Logout,
    Signup,
    NoteList,
    NoteAdd,
    NoteSuccess,
    NoteDetail(String),
    NoteEdit(String),
    NoteDelete(String),
}

impl Route {
    /// Maps a request path to a route. Unknown paths yield `None`.
    pub fn resolve(path: &str) -> Option<Self> {
        match path {
            HOME_PATH => return Some(Self::Home),
            LOGIN_PATH => return Some(Self::Login),
            LOGOUT_PATH => return Some(Self::Logout),
            SIGNUP_PATH => return Some(Self::Signup),
            NOTE_LIST_PATH => return Some(Self::NoteList),
            NOTE_ADD_PATH => return Some(Self::NoteAdd),
            NOTE_SUCCESS_PATH => return Some(Self::NoteSuccess),
            _ => {}
        }

        let rest = path
            .strip_prefix(NOTE_LIST_PATH)?
            .strip_suffix('/')?;
        match rest.split_once('/') {
            None if !rest.is_empty() => Some(Self::NoteDetail(rest.to_string())),
            Some((slug, "edit")) if !slug.is_empty() => Some(Self::NoteEdit(slug.to_string())),
            Some((slug, "delete")) if !slug.is_empty() => Some(Self::NoteDelete(slug.to_string())),
            _ => None,
        }
    }

    /// Reverse lookup: the canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Self::Home => HOME_PATH.to_string(),
            Self::Login => LOGIN_PATH.to_string(),
            Self::Logout => LOGOUT_PATH.to_string(),
            Self::Signup => SIGNUP_PATH.to_string(),
            Self::NoteList => NOTE_LIST_PATH.to_string(),
            Self::NoteAdd => NOTE_ADD_PATH.to_string(),
            Self::NoteSuccess => NOTE_SUCCESS_PATH.to_string(),
            Self::NoteDetail(slug) => format!("{NOTE_LIST_PATH}{slug}/"),
            Self::NoteEdit(slug) => format!("{NOTE_LIST_PATH}{slug}/edit/"),
            Self::NoteDelete(slug) => format!("{NOTE_LIST_PATH}{slug}/delete/"),
        }
    }

    /// Whether the route is gated behind authentication.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Home | Self::Login | Self::Logout | Self::Signup)
    }
}
