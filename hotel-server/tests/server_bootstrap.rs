//! Server state bootstrap: database creation and migrations

use hotel_server::{Config, ServerState};

#[tokio::test]
async fn initialize_creates_database_and_applies_migrations() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(dir.path().to_str().unwrap(), 0);

    let state = ServerState::initialize(&config).await.unwrap();

    // schema is in place
    let rooms = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM room")
        .fetch_one(state.pool())
        .await
        .unwrap();
    assert_eq!(rooms, 0);

    // reopening the same directory is idempotent
    drop(state);
    ServerState::initialize(&config).await.unwrap();
}
