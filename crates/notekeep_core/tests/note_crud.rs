use notekeep_core::db::open_db_in_memory;
use notekeep_core::{
    NoteInput, NoteService, NoteServiceError, SqliteNoteRepository, SqliteUserRepository, User,
    UserRepository,
};
use rusqlite::Connection;

fn create_user(conn: &Connection, username: &str) -> User {
    let user = User::new(username).unwrap();
    SqliteUserRepository::new(conn).insert(&user).unwrap();
    user
}

fn input(title: &str, text: &str, slug: Option<&str>) -> NoteInput {
    NoteInput {
        title: title.to_string(),
        text: text.to_string(),
        slug: slug.map(str::to_string),
    }
}

fn note_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn create_persists_and_retrieve_returns_the_note() {
    let conn = open_db_in_memory().unwrap();
    let author = create_user(&conn, "author");
    let service = NoteService::new(SqliteNoteRepository::new(&conn));

    let created = service
        .create(author.id, input("Заголовок", "Текст", Some("slug")))
        .unwrap();
    assert_eq!(created.title, "Заголовок");
    assert_eq!(created.text, "Текст");
    assert_eq!(created.slug, "slug");
    assert_eq!(created.author, author.id);
    assert_eq!(note_count(&conn), 1);

    let fetched = service.retrieve(author.id, "slug").unwrap();
    assert_eq!(fetched, created);
}

#[test]
fn retrieve_of_unknown_slug_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let author = create_user(&conn, "author");
    let service = NoteService::new(SqliteNoteRepository::new(&conn));

    let err = service.retrieve(author.id, "missing").unwrap_err();
    assert!(matches!(err, NoteServiceError::NotFound));
}

#[test]
fn edit_replaces_title_text_and_slug() {
    let conn = open_db_in_memory().unwrap();
    let author = create_user(&conn, "author");
    let service = NoteService::new(SqliteNoteRepository::new(&conn));
    service
        .create(author.id, input("Заголовок", "Текст", Some("slug")))
        .unwrap();

    let updated = service
        .edit(
            author.id,
            "slug",
            input("Новый заголовок", "Новый текст", Some("new-slug")),
        )
        .unwrap();
    assert_eq!(updated.title, "Новый заголовок");
    assert_eq!(updated.text, "Новый текст");
    assert_eq!(updated.slug, "new-slug");
    assert_eq!(updated.author, author.id);

    // Old slug is gone, new slug resolves.
    assert!(matches!(
        service.retrieve(author.id, "slug").unwrap_err(),
        NoteServiceError::NotFound
    ));
    assert_eq!(service.retrieve(author.id, "new-slug").unwrap(), updated);
    assert_eq!(note_count(&conn), 1);
}

#[test]
fn edit_keeping_the_same_slug_is_not_a_collision() {
    let conn = open_db_in_memory().unwrap();
    let author = create_user(&conn, "author");
    let service = NoteService::new(SqliteNoteRepository::new(&conn));
    service
        .create(author.id, input("Заголовок", "Текст", Some("slug")))
        .unwrap();

    let updated = service
        .edit(author.id, "slug", input("Заголовок", "Другой текст", Some("slug")))
        .unwrap();
    assert_eq!(updated.slug, "slug");
    assert_eq!(updated.text, "Другой текст");
}

#[test]
fn delete_removes_the_note_and_repeat_delete_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let author = create_user(&conn, "author");
    let service = NoteService::new(SqliteNoteRepository::new(&conn));
    service
        .create(author.id, input("Заголовок", "Текст", Some("slug")))
        .unwrap();

    service.delete(author.id, "slug").unwrap();
    assert_eq!(note_count(&conn), 0);

    let err = service.delete(author.id, "slug").unwrap_err();
    assert!(matches!(err, NoteServiceError::NotFound));
}

#[test]
fn create_requires_title_and_text() {
    let conn = open_db_in_memory().unwrap();
    let author = create_user(&conn, "author");
    let service = NoteService::new(SqliteNoteRepository::new(&conn));

    let err = service
        .create(author.id, input("", "Текст", Some("slug")))
        .unwrap_err();
    match err {
        NoteServiceError::Invalid(field_error) => assert_eq!(field_error.field, "title"),
        other => panic!("unexpected error: {other}"),
    }

    let err = service
        .create(author.id, input("Заголовок", "   ", Some("slug")))
        .unwrap_err();
    match err {
        NoteServiceError::Invalid(field_error) => assert_eq!(field_error.field, "text"),
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(note_count(&conn), 0);
}

#[test]
fn list_returns_notes_in_creation_order() {
    let conn = open_db_in_memory().unwrap();
    let author = create_user(&conn, "author");
    let service = NoteService::new(SqliteNoteRepository::new(&conn));

    let first = service
        .create(author.id, input("Первая", "Текст", Some("first")))
        .unwrap();
    let second = service
        .create(author.id, input("Вторая", "Текст", Some("second")))
        .unwrap();

    let listed = service.list(author.id).unwrap();
    assert_eq!(listed, vec![first, second]);
}
