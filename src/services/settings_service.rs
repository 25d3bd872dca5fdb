//! Settings Service - key/value application settings

use sea_orm::*;
use serde::Deserialize;

use crate::domain::DomainError;
use crate::models::app_setting::{self, Entity as AppSetting};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingInput {
    pub value: Option<String>,
    pub description: Option<String>,
}

pub async fn list_settings(db: &DatabaseConnection) -> Result<Vec<app_setting::Model>, DomainError> {
    let settings = AppSetting::find()
        .order_by_asc(app_setting::Column::Key)
        .all(db)
        .await?;
    Ok(settings)
}

pub async fn get_setting(db: &DatabaseConnection, key: &str) -> Result<app_setting::Model, DomainError> {
    AppSetting::find()
        .filter(app_setting::Column::Key.eq(key))
        .one(db)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Setting '{}' not found", key)))
}

/// Insert or overwrite a setting. A missing description keeps the stored one.
pub async fn set_setting(
    db: &DatabaseConnection,
    key: &str,
    input: SettingInput,
) -> Result<app_setting::Model, DomainError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(DomainError::Validation("Setting key is required".to_string()));
    }

    let now = chrono::Utc::now().to_rfc3339();

    let existing = AppSetting::find()
        .filter(app_setting::Column::Key.eq(key))
        .one(db)
        .await?;

    let saved = match existing {
        Some(setting) => {
            let mut active: app_setting::ActiveModel = setting.into();
            active.value = Set(input.value);
            if input.description.is_some() {
                active.description = Set(input.description);
            }
            active.updated_at = Set(now);
            active.update(db).await?
        }
        None => {
            app_setting::ActiveModel {
                key: Set(key.to_string()),
                value: Set(input.value),
                description: Set(input.description),
                created_at: Set(now.clone()),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(db)
            .await?
        }
    };

    tracing::info!("Setting '{}' saved", saved.key);
    Ok(saved)
}
