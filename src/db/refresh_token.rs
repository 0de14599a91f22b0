use crate::db::database_service::DatabaseService;
use crate::types::{error::AppError, token::{construct_token, extract_token_parts}};
use crate::utils::token::{hash_secret, new_nanoid, new_secret, verify_secret};
use chrono::{Duration, Utc};
use entity::refresh_token::{
    ActiveModel as RefreshActive, Column, Entity as RefreshToken, Model as RefreshModel,
};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};
use tracing::warn;
use uuid::Uuid;

const REFRESH_ID_LEN: usize = 21;

impl DatabaseService {
    /// Stores a new refresh token and returns the value handed to the client.
    pub async fn issue_refresh_token(&self, user_id: Uuid, ttl: Duration) -> Result<String, AppError> {
        insert_refresh_token(&self.database_connection, user_id, ttl).await
    }

    /// Single use: the presented token is revoked and a fresh one is issued in the same transaction.
    /// Of two concurrent rotations of one token only the first to revoke it gets a new pair.
    pub async fn rotate_refresh_token(&self, raw: &str, ttl: Duration) -> Result<(Uuid, String), AppError> {
        let txn = self.database_connection.begin().await?;

        let claimed = match find_valid(&txn, raw).await {
            Ok(current) => claim(&txn, &current).await.map(|_| current),
            Err(err) => Err(err),
        };
        let current = match claimed {
            Ok(current) => current,
            Err(err) => {
                txn.rollback().await?;
                return Err(err);
            }
        };

        let token = insert_refresh_token(&txn, current.user_id, ttl).await?;
        txn.commit().await?;
        Ok((current.user_id, token))
    }

    /// Logout. Unknown or already revoked tokens are not an error.
    pub async fn revoke_refresh_token(&self, raw: &str) -> Result<(), AppError> {
        let Some((id, _)) = extract_token_parts(raw) else {
            return Ok(());
        };
        RefreshToken::update_many()
            .col_expr(Column::Revoked, Expr::value(true))
            .filter(Column::Id.eq(id))
            .exec(&self.database_connection)
            .await?;
        Ok(())
    }

    pub async fn revoke_all_refresh_tokens(&self, user_id: Uuid) -> Result<u64, AppError> {
        let res = RefreshToken::update_many()
            .col_expr(Column::Revoked, Expr::value(true))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Revoked.eq(false))
            .exec(&self.database_connection)
            .await?;
        Ok(res.rows_affected)
    }
}

async fn insert_refresh_token<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    ttl: Duration,
) -> Result<String, AppError> {
    let id = new_nanoid(REFRESH_ID_LEN);
    let secret = new_secret();
    let now = Utc::now();

    RefreshActive {
        id: Set(id.clone()),
        user_id: Set(user_id),
        token_hash: Set(hash_secret(&secret)?),
        expires_at: Set(now + ttl),
        revoked: Set(false),
        created_at: Set(now),
    }
    .insert(conn)
    .await?;

    Ok(construct_token(&id, &secret))
}

/// Revokes the row only if it is still live. Zero affected rows means another rotation won.
async fn claim<C: ConnectionTrait>(conn: &C, row: &RefreshModel) -> Result<(), AppError> {
    let res = RefreshToken::update_many()
        .col_expr(Column::Revoked, Expr::value(true))
        .filter(Column::Id.eq(row.id.as_str()))
        .filter(Column::Revoked.eq(false))
        .exec(conn)
        .await?;

    if res.rows_affected == 0 {
        warn!("refresh token for user {} was rotated concurrently", row.user_id);
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

async fn find_valid<C: ConnectionTrait>(conn: &C, raw: &str) -> Result<RefreshModel, AppError> {
    let (id, secret) = extract_token_parts(raw).ok_or(AppError::Unauthorized)?;

    let row = RefreshToken::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if row.revoked {
        warn!("revoked refresh token presented for user {}", row.user_id);
        return Err(AppError::Unauthorized);
    }
    if row.expires_at <= Utc::now() {
        return Err(AppError::Unauthorized);
    }
    if !verify_secret(&secret, &row.token_hash)? {
        return Err(AppError::Unauthorized);
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service() -> DatabaseService {
        DatabaseService::new("sqlite::memory:", 1).await.unwrap()
    }

    async fn user(db: &DatabaseService) -> Uuid {
        db.create_user(crate::types::user::DBUserCreate {
            name: "Rotating".to_string(),
            email: format!("{}@test.com", Uuid::new_v4()),
            password_hash: "unused".to_string(),
        })
        .await
        .unwrap()
        .id
    }

    #[actix_web::test]
    async fn second_claim_on_a_row_is_unauthorized() {
        let db = service().await;
        let user_id = user(&db).await;
        let raw = db.issue_refresh_token(user_id, Duration::days(1)).await.unwrap();

        // both rotations read the row while it was still live
        let row = find_valid(&db.database_connection, &raw).await.unwrap();
        let stale = row.clone();

        claim(&db.database_connection, &row).await.unwrap();
        assert!(matches!(
            claim(&db.database_connection, &stale).await,
            Err(AppError::Unauthorized)
        ));
    }

    #[actix_web::test]
    async fn rotation_is_single_use() {
        let db = service().await;
        let user_id = user(&db).await;
        let raw = db.issue_refresh_token(user_id, Duration::days(1)).await.unwrap();

        let (owner, next) = db.rotate_refresh_token(&raw, Duration::days(1)).await.unwrap();
        assert_eq!(owner, user_id);
        assert!(matches!(
            db.rotate_refresh_token(&raw, Duration::days(1)).await,
            Err(AppError::Unauthorized)
        ));
        assert!(db.rotate_refresh_token(&next, Duration::days(1)).await.is_ok());
    }
}
