use blog_core::db::open_db_in_memory;
use blog_core::{
    AuthorService, AuthorValidationError, Category, Page, PostDraft, PostListQuery, PostService,
    PostValidationError, RegisterAuthorRequest, RepoError, SqliteAuthorRepository,
    SqlitePostRepository,
};

fn register(name: &str, phone_number: &str) -> RegisterAuthorRequest {
    RegisterAuthorRequest {
        name: name.to_string(),
        phone_number: Some(phone_number.to_string()),
    }
}

fn draft(title: &str) -> PostDraft {
    PostDraft {
        title: title.to_string(),
        content: Some("x".repeat(260)),
        summary: Some("short".to_string()),
        category: Some("Fiction".to_string()),
    }
}

#[test]
fn registering_same_name_twice_fails_uniqueness() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn).unwrap());

    let jane = service
        .register_author(&register("Jane", "5551234567"))
        .unwrap();
    assert!(jane.id().is_some());
    assert_eq!(jane.phone_number(), Some("5551234567"));

    let err = service
        .register_author(&register("Jane", "5551234568"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Name must be unique.");
    assert_eq!(service.count_authors().unwrap(), 1);
}

#[test]
fn register_without_phone_number_is_allowed() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn).unwrap());

    let author = service
        .register_author(&RegisterAuthorRequest {
            name: "Jane".to_string(),
            phone_number: None,
        })
        .unwrap();
    assert_eq!(author.phone_number(), None);
}

#[test]
fn register_rejects_invalid_fields_before_storage() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn).unwrap());

    let err = service.register_author(&register("", "5551234567")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::AuthorValidation(AuthorValidationError::NameMissing)
    ));

    let err = service.register_author(&register("Jane", "555")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::AuthorValidation(AuthorValidationError::InvalidPhoneNumber)
    ));
    assert!(service.list_authors(Page::default()).unwrap().is_empty());
}

#[test]
fn rename_and_phone_change_touch_only_that_field() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn).unwrap());

    let id = service
        .register_author(&register("Jane", "5551234567"))
        .unwrap()
        .id()
        .unwrap();

    let renamed = service.rename_author(id, "Janet").unwrap();
    assert_eq!(renamed.name(), "Janet");
    assert_eq!(renamed.phone_number(), Some("5551234567"));
    assert!(renamed.updated_at().is_some());

    let err = service.change_phone_number(id, "555 123 4567").unwrap_err();
    assert!(matches!(
        err,
        RepoError::AuthorValidation(AuthorValidationError::InvalidPhoneNumber)
    ));
    let stored = service.get_author(id).unwrap().unwrap();
    assert_eq!(stored.phone_number(), Some("5551234567"));

    let changed = service.change_phone_number(id, "5559876543").unwrap();
    assert_eq!(changed.phone_number(), Some("5559876543"));
    assert_eq!(
        service.find_author_by_name("Janet").unwrap().unwrap().id(),
        Some(id)
    );
}

#[test]
fn mutating_missing_author_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn).unwrap());

    let err = service.rename_author(42, "Nobody").unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "author", id: 42 }));
    let err = service.remove_author(42).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "author", id: 42 }));
}

#[test]
fn publish_accepts_clickbait_title() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());

    let post = service.publish_post(draft("Top 10 Facts")).unwrap();
    assert!(post.id().is_some());
    assert_eq!(post.category(), Some(Category::Fiction));
}

#[test]
fn publish_rejects_title_without_marker() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());

    let err = service.publish_post(draft("A Report")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::PostValidation(PostValidationError::MissingClickbaitMarker)
    ));
    assert_eq!(service.count_posts().unwrap(), 0);
}

#[test]
fn publish_reports_first_invalid_field() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());

    let mut short = draft("Secret Recipe");
    short.content = Some("tiny".to_string());
    let err = service.publish_post(short).unwrap_err();
    assert_eq!(err.to_string(), "Post must be at least 250 characters long.");

    let mut verbose = draft("Secret Recipe");
    verbose.summary = Some("s".repeat(251));
    let err = service.publish_post(verbose).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Post summary may be a maximum of 250 characters."
    );

    let mut uncategorized = draft("Secret Recipe");
    uncategorized.category = Some("Memoir".to_string());
    let err = service.publish_post(uncategorized).unwrap_err();
    assert_eq!(err.to_string(), "Category must be Fiction or Non-Fiction.");
}

#[test]
fn revisions_apply_one_field_at_a_time() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());

    let id = service.publish_post(draft("Top Tips")).unwrap().id().unwrap();

    let err = service.retitle_post(id, "Plain Tips").unwrap_err();
    assert!(matches!(
        err,
        RepoError::PostValidation(PostValidationError::MissingClickbaitMarker)
    ));
    assert_eq!(service.get_post(id).unwrap().unwrap().title(), "Top Tips");

    let retitled = service.retitle_post(id, "Guess These Tips").unwrap();
    assert_eq!(retitled.title(), "Guess These Tips");

    let revised = service.revise_content(id, "c".repeat(300)).unwrap();
    assert_eq!(revised.content().map(str::len), Some(300));

    let summarized = service.revise_summary(id, "").unwrap();
    assert_eq!(summarized.summary(), Some(""));

    let recategorized = service.recategorize_post(id, "Non-Fiction").unwrap();
    assert_eq!(recategorized.category(), Some(Category::NonFiction));
    assert_eq!(recategorized.title(), "Guess These Tips");

    let non_fiction = service
        .list_posts(&PostListQuery {
            category: Some(Category::NonFiction),
            ..PostListQuery::default()
        })
        .unwrap();
    assert_eq!(non_fiction.len(), 1);

    service.remove_post(id).unwrap();
    assert!(service.get_post(id).unwrap().is_none());
}
