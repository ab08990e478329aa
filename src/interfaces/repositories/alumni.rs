use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    entities::{
        alumni::{AlumniInsert, AlumniRecord},
        chart::{BreakdownField, CategoryCount},
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxAlumniRepo,
};

#[async_trait]
pub trait AlumniRepository: Send + Sync {
    async fn insert_alumni(&self, record: &AlumniInsert) -> Result<AlumniRecord, AppError>;
    async fn update_alumni(&self, student_number: &str, record: &AlumniInsert) -> Result<AlumniRecord, AppError>;
    async fn find_by_student_number(&self, student_number: &str) -> Result<Option<AlumniRecord>, AppError>;
    async fn list_alumni(&self) -> Result<Vec<AlumniRecord>, AppError>;
    /// Hard delete. Returns false when no row matched.
    async fn delete_alumni(&self, student_number: &str) -> Result<bool, AppError>;
    async fn student_number_taken<'a>(&self, student_number: &'a str, exclude: Option<&'a str>) -> Result<bool, AppError>;
    async fn active_email_taken<'a>(&self, email: &'a str, exclude: Option<&'a str>) -> Result<bool, AppError>;
    async fn count_by_category(&self, field: BreakdownField) -> Result<Vec<CategoryCount>, AppError>;
    /// Records whose owners agreed to be contacted, for the bulk mailer.
    async fn consenting_alumni(&self) -> Result<Vec<AlumniRecord>, AppError>;
    async fn check_connection(&self) -> Result<(), AppError>;
}

impl SqlxAlumniRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxAlumniRepo { pool }
    }
}

#[async_trait]
impl AlumniRepository for SqlxAlumniRepo {
    async fn insert_alumni(&self, record: &AlumniInsert) -> Result<AlumniRecord, AppError> {
        let inserted = sqlx::query_as::<_, AlumniRecord>(
            r#"
            INSERT INTO alumni (
                student_number, email, program_id, last_name, given_name,
                middle_initial, present_address, active_email, contact_number,
                graduation_year, employment_status, company_name, further_studies,
                sector, work_location, employer_classification, related_to_course,
                consent, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(&record.student_number)
        .bind(&record.email)
        .bind(record.program_id)
        .bind(&record.last_name)
        .bind(&record.given_name)
        .bind(&record.middle_initial)
        .bind(&record.present_address)
        .bind(&record.active_email)
        .bind(&record.contact_number)
        .bind(record.graduation_year)
        .bind(record.employment_status)
        .bind(&record.company_name)
        .bind(record.further_studies)
        .bind(record.sector)
        .bind(record.work_location)
        .bind(record.employer_classification)
        .bind(record.related_to_course)
        .bind(record.consent)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn update_alumni(&self, student_number: &str, record: &AlumniInsert) -> Result<AlumniRecord, AppError> {
        let updated = sqlx::query_as::<_, AlumniRecord>(
            r#"
            UPDATE alumni SET
                email = $2,
                program_id = $3,
                last_name = $4,
                given_name = $5,
                middle_initial = $6,
                present_address = $7,
                active_email = $8,
                contact_number = $9,
                graduation_year = $10,
                employment_status = $11,
                company_name = $12,
                further_studies = $13,
                sector = $14,
                work_location = $15,
                employer_classification = $16,
                related_to_course = $17,
                consent = $18,
                updated_at = NOW()
            WHERE student_number = $1
            RETURNING *
            "#,
        )
        .bind(student_number)
        .bind(&record.email)
        .bind(record.program_id)
        .bind(&record.last_name)
        .bind(&record.given_name)
        .bind(&record.middle_initial)
        .bind(&record.present_address)
        .bind(&record.active_email)
        .bind(&record.contact_number)
        .bind(record.graduation_year)
        .bind(record.employment_status)
        .bind(&record.company_name)
        .bind(record.further_studies)
        .bind(record.sector)
        .bind(record.work_location)
        .bind(record.employer_classification)
        .bind(record.related_to_course)
        .bind(record.consent)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Alumni not found.".into()))?;

        Ok(updated)
    }

    async fn find_by_student_number(&self, student_number: &str) -> Result<Option<AlumniRecord>, AppError> {
        let record = sqlx::query_as::<_, AlumniRecord>(
            "SELECT * FROM alumni WHERE student_number = $1",
        )
        .bind(student_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list_alumni(&self) -> Result<Vec<AlumniRecord>, AppError> {
        let records = sqlx::query_as::<_, AlumniRecord>(
            "SELECT * FROM alumni ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn delete_alumni(&self, student_number: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM alumni WHERE student_number = $1")
            .bind(student_number)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn student_number_taken<'a>(&self, student_number: &'a str, exclude: Option<&'a str>) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM alumni
                WHERE student_number = $1
                  AND ($2::text IS NULL OR student_number <> $2)
            )
            "#,
        )
        .bind(student_number)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }

    async fn active_email_taken<'a>(&self, email: &'a str, exclude: Option<&'a str>) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM alumni
                WHERE active_email = $1
                  AND ($2::text IS NULL OR student_number <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }

    async fn count_by_category(&self, field: BreakdownField) -> Result<Vec<CategoryCount>, AppError> {
        // Column name comes from a closed enum, never from caller input.
        let sql = format!(
            "SELECT {col}::text AS category, COUNT(*) AS count FROM alumni GROUP BY {col}",
            col = field.column()
        );

        let counts = sqlx::query_as::<_, CategoryCount>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(counts)
    }

    async fn consenting_alumni(&self) -> Result<Vec<AlumniRecord>, AppError> {
        let records = sqlx::query_as::<_, AlumniRecord>(
            "SELECT * FROM alumni WHERE consent = TRUE ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
