//! HTTP-surface model: routes, session gate, request dispatch.
//!
//! # Responsibility
//! - Map URL paths to handlers and enforce the anonymous/authenticated
//!   gate with `?next=` login redirects.
//! - Express responses as status-bearing values (200/302/404/405/500)
//!   plus a render context, so the contract is testable without a
//!   server.
//!
//! # Invariants
//! - Session state is request-scoped and passed explicitly; there is no
//!   ambient global user.
//! - Non-author access to a note is indistinguishable from absence.
//!
//! The concrete HTTP server, templating, CSRF and cookie handling are
//! the host framework's concern and stay outside this crate.
//!
//! # See also
//! - docs/architecture/web-surface.md

pub mod app;
pub mod request;
pub mod response;
pub mod router;
pub mod session;

pub use app::App;
pub use request::{Method, Request};
pub use response::{NoteFormView, Page, Response};
pub use router::Route;
pub use session::Session;
