//! Request dispatcher composing the session gate and the note service.
//!
//! # Responsibility
//! - Resolve the route, apply the auth gate, run the matching handler.
//! - Translate service outcomes into status-bearing responses.
//!
//! # Invariants
//! - Anonymous requests to private routes redirect before any handler
//!   runs, so they can never mutate state.
//! - Validation failures re-render the form with 200 and leave storage
//!   untouched.
//!
//! # See also
//! - docs/architecture/web-surface.md

use crate::model::user::{User, UserId};
use crate::repo::note_repo::SqliteNoteRepository;
use crate::repo::user_repo::{SqliteUserRepository, UserRepository};
use crate::repo::RepoError;
use crate::service::note_service::{NoteInput, NoteService, NoteServiceError};
use crate::web::request::{Method, Request};
use crate::web::response::{NoteFormView, Page, Response};
use crate::web::router::{Route, HOME_PATH, NOTE_LIST_PATH, NOTE_SUCCESS_PATH};
use crate::web::session::{login_redirect_target, Session};
use log::{error, info};
use rusqlite::Connection;

/// The note application behind the host framework's server loop.
///
/// Holds one connection; requests are handled to completion one at a
/// time, matching the synchronous request/response model.
pub struct App<'conn> {
    conn: &'conn Connection,
}

impl<'conn> App<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Handles one request against the given request-scoped session.
    pub fn handle(&self, session: &mut Session, request: &Request) -> Response {
        let response = self.dispatch(session, request);
        info!(
            "event=http_request module=web method={} path={} status={}",
            request.method.as_str(),
            request.path,
            response.status()
        );
        response
    }

    fn dispatch(&self, session: &mut Session, request: &Request) -> Response {
        let Some(route) = Route::resolve(&request.path) else {
            return Response::NotFound;
        };

        if route.requires_auth() {
            let Some(user) = session.current_user() else {
                return Response::found(login_redirect_target(&request.path));
            };
            return self.dispatch_notes(user, &route, request);
        }

        match (&route, request.method) {
            (Route::Home, Method::Get) => Response::Ok(Page::Home),
            (Route::Login, Method::Get) => Response::Ok(Page::Login),
            (Route::Login, Method::Post) => self.login(session, request),
            (Route::Signup, Method::Get) => Response::Ok(Page::Signup),
            (Route::Signup, Method::Post) => self.signup(session, request),
            // Logout changes state, so a safe GET is not accepted.
            (Route::Logout, Method::Post) => {
                session.log_out();
                Response::Ok(Page::LoggedOut)
            }
            _ => Response::MethodNotAllowed,
        }
    }

    fn dispatch_notes(&self, user: UserId, route: &Route, request: &Request) -> Response {
        let service = NoteService::new(SqliteNoteRepository::new(self.conn));

        match (route, request.method) {
            (Route::NoteList, Method::Get) => match service.list(user) {
                Ok(notes) => Response::Ok(Page::NoteList { notes }),
                Err(err) => storage_failure(&err),
            },
            (Route::NoteSuccess, Method::Get) => Response::Ok(Page::Success),
            (Route::NoteAdd, Method::Get) => Response::Ok(Page::NoteForm {
                form: NoteFormView::empty(),
            }),
            (Route::NoteAdd, Method::Post) => {
                let input = note_input(request);
                match service.create(user, input.clone()) {
                    Ok(_) => Response::found(NOTE_SUCCESS_PATH),
                    Err(err) => form_failure(input, err),
                }
            }
            (Route::NoteDetail(slug), Method::Get) => match service.retrieve(user, slug) {
                Ok(note) => Response::Ok(Page::NoteDetail { note }),
                Err(err) => lookup_failure(err),
            },
            (Route::NoteEdit(slug), Method::Get) => match service.retrieve(user, slug) {
                Ok(note) => Response::Ok(Page::NoteForm {
                    form: NoteFormView::prefilled(&note),
                }),
                Err(err) => lookup_failure(err),
            },
            (Route::NoteEdit(slug), Method::Post) => {
                let input = note_input(request);
                match service.edit(user, slug, input.clone()) {
                    Ok(_) => Response::found(NOTE_SUCCESS_PATH),
                    Err(err) => form_failure(input, err),
                }
            }
            (Route::NoteDelete(slug), Method::Get) => match service.retrieve(user, slug) {
                Ok(note) => Response::Ok(Page::ConfirmDelete { note }),
                Err(err) => lookup_failure(err),
            },
            (Route::NoteDelete(slug), Method::Post | Method::Delete) => {
                match service.delete(user, slug) {
                    Ok(()) => Response::found(NOTE_SUCCESS_PATH),
                    Err(err) => lookup_failure(err),
                }
            }
            _ => Response::MethodNotAllowed,
        }
    }

    fn login(&self, session: &mut Session, request: &Request) -> Response {
        let users = SqliteUserRepository::new(self.conn);
        let Some(username) = request.field("username") else {
            return Response::Ok(Page::Login);
        };

        match users.find_by_username(username) {
            Ok(Some(user)) => {
                session.log_in(user.id);
                info!(
                    "event=login module=web status=ok username={}",
                    user.username
                );
                let target = request.field("next").unwrap_or(NOTE_LIST_PATH);
                Response::found(target)
            }
            Ok(None) => {
                info!("event=login module=web status=rejected username={username}");
                Response::Ok(Page::Login)
            }
            Err(err) => storage_failure(&err),
        }
    }

    fn signup(&self, session: &mut Session, request: &Request) -> Response {
        let users = SqliteUserRepository::new(self.conn);
        let Some(username) = request.field("username") else {
            return Response::Ok(Page::Signup);
        };

        let user = match User::new(username) {
            Ok(user) => user,
            Err(_) => return Response::Ok(Page::Signup),
        };

        match users.insert(&user) {
            Ok(_) => {
                session.log_in(user.id);
                info!(
                    "event=signup module=web status=ok username={}",
                    user.username
                );
                Response::found(HOME_PATH)
            }
            Err(RepoError::DuplicateUsername(name)) => {
                info!("event=signup module=web status=rejected username={name}");
                Response::Ok(Page::Signup)
            }
            Err(err) => storage_failure(&err),
        }
    }
}

fn note_input(request: &Request) -> NoteInput {
    NoteInput {
        title: request.field("title").unwrap_or_default().to_string(),
        text: request.field("text").unwrap_or_default().to_string(),
        slug: request.field("slug").map(str::to_string),
    }
}

/// Re-renders the submitted form with the field error, or maps the rest.
fn form_failure(input: NoteInput, err: NoteServiceError) -> Response {
    match err {
        NoteServiceError::Invalid(field_error) => Response::Ok(Page::NoteForm {
            form: NoteFormView {
                title: input.title,
                text: input.text,
                slug: input.slug.unwrap_or_default(),
                errors: vec![field_error],
            },
        }),
        other => lookup_failure(other),
    }
}

fn lookup_failure(err: NoteServiceError) -> Response {
    match err {
        NoteServiceError::NotFound => Response::NotFound,
        NoteServiceError::Invalid(field_error) => {
            // Lookup paths carry no form to re-render; treat as absent.
            info!(
                "event=note_lookup module=web status=invalid field={}",
                field_error.field
            );
            Response::NotFound
        }
        NoteServiceError::Repo(err) => storage_failure(&err),
    }
}

fn storage_failure(err: &dyn std::error::Error) -> Response {
    error!("event=storage_failure module=web status=error error={err}");
    Response::ServerError
}
