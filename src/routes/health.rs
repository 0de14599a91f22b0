use std::sync::Arc;

use actix_web::{get, web};
use serde::{Deserialize, Serialize};

use crate::db::database_service::DatabaseService;
use crate::types::response::{ApiResponse, ApiResult};

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub status: String,
}

#[get("")]
pub async fn health(db: web::Data<Arc<DatabaseService>>) -> ApiResult<Response> {
    db.connection().ping().await?;
    Ok(ApiResponse::Ok(Response { status: "ok".to_string() }))
}
