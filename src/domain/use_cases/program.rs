use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::program::{Program, ProgramRequest},
    errors::AppError,
    repositories::program::ProgramRepository,
};

pub struct ProgramHandler<P>
where
    P: ProgramRepository,
{
    pub program_repo: P,
}

impl<P> ProgramHandler<P>
where
    P: ProgramRepository,
{
    pub fn new(program_repo: P) -> Self {
        ProgramHandler { program_repo }
    }

    pub async fn list(&self) -> Result<Vec<Program>, AppError> {
        self.program_repo.list_programs().await
    }

    pub async fn create(&self, request: ProgramRequest) -> Result<Program, AppError> {
        request.validate()?;
        self.program_repo.insert_program(request.name.trim()).await
    }

    pub async fn update(&self, id: Uuid, request: ProgramRequest) -> Result<Program, AppError> {
        request.validate()?;
        self.program_repo.update_program(id, request.name.trim()).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.program_repo.delete_program(id).await?;
        if deleted {
            Ok(())
        } else {
            Err(AppError::NotFound("Program not found.".into()))
        }
    }
}
