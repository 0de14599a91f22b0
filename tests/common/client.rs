use activity_hub::{
    config::EnvConfig,
    db::database_service::DatabaseService,
    types::activity::RActivityCreate,
    types::task::RTaskCreate,
    types::user::DBUserCreate,
    utils::{jwt::JwtService, token::hash_secret},
};
use actix_web::{web, App};
use std::sync::Arc;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "correct horse battery";

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub access_token: String,
    pub refresh_token: String,
}

pub struct TestClient {
    pub db: Arc<DatabaseService>,
    pub jwt: JwtService,
    pub config: EnvConfig,
}

impl TestClient {
    pub fn new(db: Arc<DatabaseService>, config: EnvConfig) -> Self {
        TestClient { db, jwt: JwtService::new(&config.jwt), config }
    }

    pub fn create_app(&self) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .app_data(web::Data::new(self.jwt.clone()))
            .app_data(web::Data::new(self.config.clone()))
            .configure(activity_hub::routes::configure_routes)
    }

    /// Inserts a user directly and hands out a token pair for it.
    #[allow(dead_code)]
    pub async fn create_test_user(&self, name: &str) -> TestUser {
        let email = format!("{}-{}@test.com", name.to_lowercase(), Uuid::new_v4());

        let user = self
            .db
            .create_user(DBUserCreate {
                name: name.to_string(),
                email: email.clone(),
                password_hash: hash_secret(TEST_PASSWORD).expect("Failed to hash password"),
            })
            .await
            .expect("Failed to create user");

        let (access_token, _) = self.jwt.issue(user.id, &user.email).expect("Failed to issue token");
        let refresh_token = self
            .db
            .issue_refresh_token(user.id, self.jwt.refresh_ttl())
            .await
            .expect("Failed to issue refresh token");

        TestUser { id: user.id, email, access_token, refresh_token }
    }

    /// Creates an activity owned by `owner` and adds `members` as plain participants.
    #[allow(dead_code)]
    pub async fn create_activity_with(&self, owner: &TestUser, members: &[&TestUser]) -> Uuid {
        let activity = self
            .db
            .create_activity(
                owner.id,
                RActivityCreate {
                    name: "Weekend trip".to_string(),
                    description: None,
                    location: Some("Lisbon".to_string()),
                    start_date: None,
                    end_date: None,
                },
            )
            .await
            .expect("Failed to create activity");

        for member in members {
            let invite = self
                .db
                .create_invitation(activity.id, member.id, owner.id, chrono::Utc::now() + chrono::Duration::days(1))
                .await
                .expect("Failed to invite member");
            self.db
                .accept_invitation(&invite.id, member.id)
                .await
                .expect("Failed to accept invitation");
        }

        activity.id
    }

    #[allow(dead_code)]
    pub async fn create_task(&self, activity_id: Uuid, created_by: Uuid) -> Uuid {
        self.db
            .create_task(
                created_by,
                RTaskCreate {
                    activity_id,
                    title: "Shared costs".to_string(),
                    description: None,
                    status: None,
                    priority: None,
                    assigned_to: None,
                    due_date: None,
                },
            )
            .await
            .expect("Failed to create task")
            .id
    }
}
