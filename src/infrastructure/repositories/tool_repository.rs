//! SeaORM implementation of ToolRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{CreateToolInput, DomainError, ToolRepository, UpdateToolInput};
use crate::models::tool::{ActiveModel, Column, Entity as ToolEntity, Model as Tool};
use crate::models::user::Entity as UserEntity;
use crate::models::ToolStatus;

/// SeaORM-based implementation of ToolRepository
pub struct SeaOrmToolRepository {
    db: DatabaseConnection,
}

impl SeaOrmToolRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn date_string(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

#[async_trait]
impl ToolRepository for SeaOrmToolRepository {
    async fn find_all(&self) -> Result<Vec<Tool>, DomainError> {
        let tools = ToolEntity::find()
            .order_by_asc(Column::ToolId)
            .all(&self.db)
            .await?;
        Ok(tools)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tool>, DomainError> {
        Ok(ToolEntity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_code(&self, tool_id: &str) -> Result<Option<Tool>, DomainError> {
        let tool = ToolEntity::find()
            .filter(Column::ToolId.eq(tool_id))
            .one(&self.db)
            .await?;
        Ok(tool)
    }

    async fn find_by_status(&self, status: ToolStatus) -> Result<Vec<Tool>, DomainError> {
        let tools = ToolEntity::find()
            .filter(Column::Status.eq(status))
            .order_by_asc(Column::ToolId)
            .all(&self.db)
            .await?;
        Ok(tools)
    }

    async fn find_calibration_due(&self, today: NaiveDate) -> Result<Vec<Tool>, DomainError> {
        let today = today.format("%Y-%m-%d").to_string();

        let tools = ToolEntity::find()
            .filter(
                Condition::any()
                    .add(Column::Status.eq(ToolStatus::NeedsCalibration))
                    .add(Column::NextCalibrationDate.lt(today)),
            )
            .order_by_asc(Column::NextCalibrationDate)
            .all(&self.db)
            .await?;
        Ok(tools)
    }

    async fn create(
        &self,
        input: CreateToolInput,
        assigned_to: Option<i32>,
    ) -> Result<Tool, DomainError> {
        let code = input.tool_id.trim().to_string();
        if code.is_empty() || input.name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Tool ID and name are required".to_string(),
            ));
        }

        if self.find_by_code(&code).await?.is_some() {
            return Err(DomainError::Conflict("Tool ID already exists".to_string()));
        }

        // Drop a dangling responsible user rather than failing the foreign key
        let assigned_to = match assigned_to {
            Some(user_id) => UserEntity::find_by_id(user_id)
                .one(&self.db)
                .await?
                .map(|u| u.id),
            None => None,
        };

        let now = chrono::Utc::now().to_rfc3339();

        let new_tool = ActiveModel {
            tool_id: Set(code),
            name: Set(input.name),
            serial_no: Set(input.serial_no.filter(|s| !s.trim().is_empty())),
            brand: Set(input.brand),
            model: Set(input.model),
            specification: Set(input.specification),
            last_calibration_date: Set(date_string(input.last_calibration_date)),
            next_calibration_date: Set(date_string(input.next_calibration_date)),
            calibration_certificate_url: Set(input
                .calibration_certificate_url
                .filter(|s| !s.is_empty())),
            usage_procedure_url: Set(input.usage_procedure_url.filter(|s| !s.is_empty())),
            status: Set(input.status.unwrap_or_default()),
            location: Set(input.location),
            assigned_to: Set(assigned_to),
            barcode_data: Set(input.barcode_data),
            notes: Set(input.notes),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let tool = new_tool.insert(&self.db).await?;
        tracing::info!("Tool {} registered (id {})", tool.tool_id, tool.id);

        Ok(tool)
    }

    async fn update(&self, id: i32, input: UpdateToolInput) -> Result<Tool, DomainError> {
        let existing = ToolEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Tool"))?;

        let mut active: ActiveModel = existing.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(serial_no) = input.serial_no {
            active.serial_no = Set(Some(serial_no).filter(|s| !s.trim().is_empty()));
        }
        if let Some(brand) = input.brand {
            active.brand = Set(Some(brand));
        }
        if let Some(model) = input.model {
            active.model = Set(Some(model));
        }
        if let Some(specification) = input.specification {
            active.specification = Set(Some(specification));
        }
        if input.last_calibration_date.is_some() {
            active.last_calibration_date = Set(date_string(input.last_calibration_date));
        }
        if input.next_calibration_date.is_some() {
            active.next_calibration_date = Set(date_string(input.next_calibration_date));
        }
        if let Some(url) = input.calibration_certificate_url {
            active.calibration_certificate_url = Set(Some(url).filter(|s| !s.is_empty()));
        }
        if let Some(url) = input.usage_procedure_url {
            active.usage_procedure_url = Set(Some(url).filter(|s| !s.is_empty()));
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(location) = input.location {
            active.location = Set(Some(location));
        }
        if let Some(notes) = input.notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = ToolEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Tool"));
        }

        tracing::info!("Tool {} deleted", id);
        Ok(())
    }
}
