use categories_core::{
    open_db_in_memory, seed_default_categories, CategoryRepository, CategoryService,
    CategoryToCreate, InMemoryCategoryRepository, RepoError, ServiceError,
    SqliteCategoryRepository,
};
use serde_json::json;

#[test]
fn service_runs_full_lifecycle_over_sqlite() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    assert!(service.list_all().unwrap().is_empty());

    let created = service
        .create_from_value(&json!({ "title": "Rust Lang" }))
        .unwrap();
    assert_eq!(created.slug, "rust-lang");

    let updated = service
        .update_from_value("rust-lang", &json!({ "title": "Rust" }))
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.slug, "rust");

    let removed = service.remove("rust").unwrap();
    assert_eq!(removed, updated);
    assert!(service.get_by_slug("rust").unwrap().is_none());
}

#[test]
fn service_reports_not_found_for_update_and_remove() {
    let conn = open_db_in_memory().unwrap();
    seed_default_categories(&conn).unwrap();
    let service = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    let input = CategoryToCreate::new("Missing").unwrap();
    let update_err = service.update("nope", &input).unwrap_err();
    assert!(matches!(update_err, ServiceError::NotFound(slug) if slug == "nope"));

    service.remove("css").unwrap();
    let remove_err = service.remove("css").unwrap_err();
    assert!(matches!(remove_err, ServiceError::NotFound(slug) if slug == "css"));
}

#[test]
fn invalid_value_never_reaches_repository() {
    let service = CategoryService::new(InMemoryCategoryRepository::new());

    let err = service
        .create_from_value(&json!({ "title": "no" }))
        .unwrap_err();
    match err {
        ServiceError::Invalid(issues) => {
            assert_eq!(issues[0].message, "title must be at least three letters");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(service.list_all().unwrap().is_empty());

    let err = service
        .update_from_value("html", &json!({ "title": 3 }))
        .unwrap_err();
    assert!(err.to_string().contains("title: expected string"));
}

#[test]
fn validate_is_pure_data() {
    let service = CategoryService::new(InMemoryCategoryRepository::with_defaults());

    assert!(service.validate(&json!({ "title": "HTML" })).is_valid());
    assert!(!service.validate(&json!(null)).is_valid());
    assert_eq!(service.list_all().unwrap().len(), 3);
}

#[test]
fn duplicate_slug_stays_a_repository_error() {
    let service = CategoryService::new(InMemoryCategoryRepository::with_defaults());

    let err = service
        .create(&CategoryToCreate::new("JS").unwrap())
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepoError::DuplicateSlug(ref slug)) if slug == "js"
    ));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn in_memory_repository_matches_sqlite_behaviour() {
    let conn = open_db_in_memory().unwrap();
    seed_default_categories(&conn).unwrap();
    let sqlite = SqliteCategoryRepository::try_new(&conn).unwrap();
    let memory = InMemoryCategoryRepository::with_defaults();

    assert_same_behaviour(&sqlite);
    assert_same_behaviour(&memory);
    assert_eq!(
        sqlite.list_categories().unwrap(),
        memory.list_categories().unwrap()
    );
}

fn assert_same_behaviour(repo: &dyn CategoryRepository) {
    assert_eq!(repo.get_category("html").unwrap().unwrap().title, "HTML");
    assert!(repo.get_category("nonexistent").unwrap().is_none());

    let created = repo
        .create_category(&CategoryToCreate::new("A B C").unwrap())
        .unwrap();
    assert_eq!(created.id, 4);
    assert_eq!(created.slug, "a-b c");

    let updated = repo
        .update_category("html", &CategoryToCreate::new("HTML5").unwrap())
        .unwrap();
    assert_eq!((updated.id, updated.slug.as_str()), (1, "html5"));
    assert!(matches!(
        repo.update_category("html", &CategoryToCreate::new("HTML").unwrap()),
        Err(RepoError::NotFound(_))
    ));
    assert!(matches!(
        repo.update_category("html5", &CategoryToCreate::new("JS").unwrap()),
        Err(RepoError::DuplicateSlug(slug)) if slug == "js"
    ));
    assert_eq!(repo.get_category("html5").unwrap().unwrap().title, "HTML5");

    let deleted = repo.delete_category("css").unwrap();
    assert_eq!(deleted.title, "CSS");
    assert!(matches!(
        repo.delete_category("css"),
        Err(RepoError::NotFound(_))
    ));
}
