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
fn list_never_contains_another_users_note() {
    let conn = open_db_in_memory().unwrap();
    let author = create_user(&conn, "Автор");
    let reader = create_user(&conn, "Читатель");
    let service = NoteService::new(SqliteNoteRepository::new(&conn));

    let own = service
        .create(author.id, input("Заголовок", "Текст", Some("slug")))
        .unwrap();
    let foreign = service
        .create(
            reader.id,
            input("Чужая заметка", "Текст чужой заметки", Some("other-note-slug")),
        )
        .unwrap();

    let author_list = service.list(author.id).unwrap();
    assert_eq!(author_list, vec![own]);
    assert!(!author_list.iter().any(|note| note.slug == foreign.slug));

    let reader_list = service.list(reader.id).unwrap();
    assert_eq!(reader_list, vec![foreign]);
}

#[test]
fn non_author_retrieve_is_indistinguishable_from_absence() {
    let conn = open_db_in_memory().unwrap();
    let author = create_user(&conn, "Автор");
    let reader = create_user(&conn, "Читатель");
    let service = NoteService::new(SqliteNoteRepository::new(&conn));
    service
        .create(author.id, input("Заголовок", "Текст", Some("slug")))
        .unwrap();

    let err = service.retrieve(reader.id, "slug").unwrap_err();
    assert!(matches!(err, NoteServiceError::NotFound));
    let err = service.retrieve(reader.id, "missing").unwrap_err();
    assert!(matches!(err, NoteServiceError::NotFound));
}

#[test]
fn non_author_edit_fails_and_leaves_the_note_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let author = create_user(&conn, "Автор");
    let reader = create_user(&conn, "Читатель");
    let service = NoteService::new(SqliteNoteRepository::new(&conn));
    service
        .create(author.id, input("Заголовок", "Текст", Some("slug")))
        .unwrap();

    let err = service
        .edit(reader.id, "slug", input("Взлом", "Взлом", Some("hacked")))
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::NotFound));

    let untouched = service.retrieve(author.id, "slug").unwrap();
    assert_eq!(untouched.title, "Заголовок");
    assert_eq!(untouched.text, "Текст");
    assert_eq!(untouched.slug, "slug");
}

#[test]
fn non_author_delete_fails_and_keeps_the_note() {
    let conn = open_db_in_memory().unwrap();
    let author = create_user(&conn, "Автор");
    let reader = create_user(&conn, "Читатель");
    let service = NoteService::new(SqliteNoteRepository::new(&conn));
    service
        .create(author.id, input("Заголовок", "Текст", Some("slug")))
        .unwrap();

    let err = service.delete(reader.id, "slug").unwrap_err();
    assert!(matches!(err, NoteServiceError::NotFound));
    assert_eq!(note_count(&conn), 1);

    service.delete(author.id, "slug").unwrap();
    assert_eq!(note_count(&conn), 0);
}
