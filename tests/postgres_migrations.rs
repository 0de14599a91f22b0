use activity_hub::db::database_service::DatabaseService;
use activity_hub::types::activity::RActivityCreate;
use activity_hub::types::user::DBUserCreate;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::postgres::Postgres;

/// Needs a Docker daemon: `cargo test -- --ignored`.
#[tokio::test]
#[ignore]
async fn test_migrations_run_against_postgres() {
    let container = Postgres::default()
        .start()
        .await
        .expect("Failed to start postgres container");
    let host = container.get_host().await.expect("Failed to get host");
    let port = container.get_host_port_ipv4(5432).await.expect("Failed to get port");
    let db_url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

    let db = DatabaseService::new(&db_url, 5)
        .await
        .expect("Failed to initialize DatabaseService");

    let user = db
        .create_user(DBUserCreate {
            name: "Pg User".to_string(),
            email: "pg@example.com".to_string(),
            password_hash: "not-a-real-hash".to_string(),
        })
        .await
        .expect("Failed to create user");

    let activity = db
        .create_activity(
            user.id,
            RActivityCreate {
                name: "Postgres trip".to_string(),
                description: None,
                location: None,
                start_date: None,
                end_date: None,
            },
        )
        .await
        .expect("Failed to create activity");

    let participants = db.participant_ids(activity.id).await.unwrap();
    assert_eq!(participants, vec![user.id]);

    // migrations are idempotent across restarts
    DatabaseService::new(&db_url, 5)
        .await
        .expect("Second startup failed");
}
