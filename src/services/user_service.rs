//! User Service - accounts and development sign-in

use sea_orm::*;

use crate::domain::DomainError;
use crate::models::user::{self, Entity as User};
use crate::models::UserRole;

pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>, DomainError> {
    let users = User::find()
        .order_by_asc(user::Column::Name)
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?;
    Ok(users)
}

pub async fn get_user(db: &DatabaseConnection, id: i32) -> Result<user::Model, DomainError> {
    User::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::not_found("User"))
}

/// Create the account on first sign-in, otherwise refresh name, role and sign-in time
pub async fn sign_in_dev_user(
    db: &DatabaseConnection,
    open_id: &str,
    name: &str,
    role: UserRole,
) -> Result<user::Model, DomainError> {
    if open_id.trim().is_empty() || name.trim().is_empty() {
        return Err(DomainError::Validation(
            "Name and open id are required".to_string(),
        ));
    }

    let now = chrono::Utc::now().to_rfc3339();

    let existing = User::find()
        .filter(user::Column::OpenId.eq(open_id))
        .one(db)
        .await?;

    let account = match existing {
        Some(account) => {
            let mut active: user::ActiveModel = account.into();
            active.name = Set(Some(name.to_string()));
            active.role = Set(role);
            active.last_signed_in = Set(now.clone());
            active.updated_at = Set(now);
            active.update(db).await?
        }
        None => {
            user::ActiveModel {
                open_id: Set(open_id.to_string()),
                name: Set(Some(name.to_string())),
                email: Set(None),
                login_method: Set(Some("dev".to_string())),
                role: Set(role),
                created_at: Set(now.clone()),
                updated_at: Set(now.clone()),
                last_signed_in: Set(now),
                ..Default::default()
            }
            .insert(db)
            .await?
        }
    };

    tracing::info!("Dev sign-in for {} as {}", account.open_id, account.role);
    Ok(account)
}
