use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    entities::program::Program,
    errors::AppError,
    repositories::sqlx_repo::SqlxProgramRepo,
};

#[async_trait]
pub trait ProgramRepository: Send + Sync {
    async fn insert_program(&self, name: &str) -> Result<Program, AppError>;
    async fn update_program(&self, id: Uuid, name: &str) -> Result<Program, AppError>;
    /// Returns false when no row matched.
    async fn delete_program(&self, id: Uuid) -> Result<bool, AppError>;
    async fn list_programs(&self) -> Result<Vec<Program>, AppError>;
    async fn program_exists(&self, id: Uuid) -> Result<bool, AppError>;
    async fn find_program_by_name(&self, name: &str) -> Result<Option<Program>, AppError>;
}

impl SqlxProgramRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProgramRepo { pool }
    }
}

#[async_trait]
impl ProgramRepository for SqlxProgramRepo {
    async fn insert_program(&self, name: &str) -> Result<Program, AppError> {
        let program = sqlx::query_as::<_, Program>(
            "INSERT INTO programs (name, created_at) VALUES ($1, NOW()) RETURNING *",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(program)
    }

    async fn update_program(&self, id: Uuid, name: &str) -> Result<Program, AppError> {
        let program = sqlx::query_as::<_, Program>(
            "UPDATE programs SET name = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Program not found.".into()))?;

        Ok(program)
    }

    async fn delete_program(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM programs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_programs(&self) -> Result<Vec<Program>, AppError> {
        let programs = sqlx::query_as::<_, Program>(
            "SELECT * FROM programs ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(programs)
    }

    async fn program_exists(&self, id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM programs WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_program_by_name(&self, name: &str) -> Result<Option<Program>, AppError> {
        let program = sqlx::query_as::<_, Program>(
            "SELECT * FROM programs WHERE name = $1 LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(program)
    }
}
