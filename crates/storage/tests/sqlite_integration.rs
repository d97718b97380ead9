use storage::repository::{ELIGIBILITY_KEY, KeyValueRepository};
use storage::sqlite::SqliteRepository;

async fn memory_repo(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_persists_eligibility_value() {
    let repo = memory_repo("memdb_kv_roundtrip").await;

    assert!(repo.get_value(ELIGIBILITY_KEY).await.unwrap().is_none());

    repo.put_value(ELIGIBILITY_KEY, r#"["1","2"]"#).await.unwrap();
    repo.put_value(ELIGIBILITY_KEY, r#"["2"]"#).await.unwrap();

    let stored = repo.get_value(ELIGIBILITY_KEY).await.expect("fetch");
    assert_eq!(stored.as_deref(), Some(r#"["2"]"#));
}

#[tokio::test]
async fn sqlite_keys_are_independent() {
    let repo = memory_repo("memdb_kv_keys").await;

    repo.put_value("other", "x").await.unwrap();
    assert!(repo.get_value(ELIGIBILITY_KEY).await.unwrap().is_none());
    repo.put_value(ELIGIBILITY_KEY, "[]").await.unwrap();
    assert_eq!(repo.get_value("other").await.unwrap().as_deref(), Some("x"));
}

#[tokio::test]
async fn sqlite_migrations_can_rerun() {
    let repo = memory_repo("memdb_kv_migrate_twice").await;
    repo.put_value("k", "v").await.unwrap();
    repo.migrate().await.expect("second migrate");
    assert_eq!(repo.get_value("k").await.unwrap().as_deref(), Some("v"));
}
