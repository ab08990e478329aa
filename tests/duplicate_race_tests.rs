
use async_trait::async_trait;
use mockall::mock;

use alumni_tracker::{
    entities::{
        alumni::{AlumniInsert, AlumniRecord},
        chart::{BreakdownField, CategoryCount},
    },
    errors::AppError,
    repositories::alumni::AlumniRepository,
    use_cases::alumni::AlumniHandler,
};
use test_utils::{submission_json, InMemoryProgramRepo};

mock! {
    AlumniRepo {}

    #[async_trait]
    impl AlumniRepository for AlumniRepo {
        async fn insert_alumni(&self, record: &AlumniInsert) -> Result<AlumniRecord, AppError>;
        async fn update_alumni(&self, student_number: &str, record: &AlumniInsert) -> Result<AlumniRecord, AppError>;
        async fn find_by_student_number(&self, student_number: &str) -> Result<Option<AlumniRecord>, AppError>;
        async fn list_alumni(&self) -> Result<Vec<AlumniRecord>, AppError>;
        async fn delete_alumni(&self, student_number: &str) -> Result<bool, AppError>;
        async fn student_number_taken<'a>(&self, student_number: &'a str, exclude: Option<&'a str>) -> Result<bool, AppError>;
        async fn active_email_taken<'a>(&self, email: &'a str, exclude: Option<&'a str>) -> Result<bool, AppError>;
        async fn count_by_category(&self, field: BreakdownField) -> Result<Vec<CategoryCount>, AppError>;
        async fn consenting_alumni(&self) -> Result<Vec<AlumniRecord>, AppError>;
        async fn check_connection(&self) -> Result<(), AppError>;
    }
}

/// Two clients racing past the advisory probes: both see the key as free,
/// but the storage constraint stops the second insert. The service must
/// surface that as a duplicate, not an internal error.
#[actix_rt::test]
async fn storage_level_duplicate_wins_over_a_stale_probe() {
    let mut repo = MockAlumniRepo::new();
    repo.expect_student_number_taken().returning(|_, _| Ok(false));
    repo.expect_active_email_taken().returning(|_, _| Ok(false));
    repo.expect_insert_alumni()
        .times(1)
        .returning(|_| Err(AppError::DuplicateKey { field: "student_number" }));

    let programs = InMemoryProgramRepo::new();
    let program = programs.seed("BS Information Technology");
    let handler = AlumniHandler::new(repo, programs);

    let err = handler
        .create(submission_json(program.id, serde_json::json!({})))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::DuplicateKey { field: "student_number" }));
}
