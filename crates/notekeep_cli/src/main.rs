//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `notekeep_core` wiring.
//! - Walk the signup -> create -> list -> ownership path against an
//!   in-memory database with deterministic output.

use notekeep_core::db::open_db_in_memory;
use notekeep_core::web::router::Route;
use notekeep_core::{
    App, NoteInput, NoteService, Request, Session, SqliteNoteRepository, SqliteUserRepository,
    User, UserRepository,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("notekeep smoke run failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    println!("notekeep_core version={}", notekeep_core::core_version());

    let conn = open_db_in_memory()?;
    let users = SqliteUserRepository::new(&conn);
    let author = User::new("author")?;
    let reader = User::new("reader")?;
    users.insert(&author)?;
    users.insert(&reader)?;

    let service = NoteService::new(SqliteNoteRepository::new(&conn));
    let note = service.create(
        author.id,
        NoteInput {
            title: "First note".to_string(),
            text: "Body".to_string(),
            slug: None,
        },
    )?;
    println!("created slug={}", note.slug);

    let listed = service.list(author.id)?;
    println!("author list len={}", listed.len());
    let listed_for_reader = service.list(reader.id)?;
    println!("reader list len={}", listed_for_reader.len());

    let app = App::new(&conn);
    let mut anonymous = Session::anonymous();
    let response = app.handle(
        &mut anonymous,
        &Request::get(Route::NoteDetail(note.slug.clone()).path()),
    );
    println!("anonymous detail status={}", response.status());

    let mut reader_session = Session::authenticated(reader.id);
    let response = app.handle(
        &mut reader_session,
        &Request::get(Route::NoteDetail(note.slug).path()),
    );
    println!("reader detail status={}", response.status());

    Ok(())
}
