
use alumni_tracker::{entities::program::ProgramRequest, errors::AppError};
use test_utils::*;

#[actix_rt::test]
async fn programs_support_full_crud() {
    let svc = test_service();

    let created = svc
        .programs
        .create(ProgramRequest { name: "BS Computer Science".into() })
        .await
        .unwrap();
    assert_eq!(created.name, "BS Computer Science");

    let renamed = svc
        .programs
        .update(created.id, ProgramRequest { name: "BS Data Science".into() })
        .await
        .unwrap();
    assert_eq!(renamed.name, "BS Data Science");

    // seed program from the fixture plus this one
    assert_eq!(svc.programs.list().await.unwrap().len(), 2);

    svc.programs.delete(created.id).await.unwrap();
    assert_eq!(svc.programs.list().await.unwrap().len(), 1);
}

#[actix_rt::test]
async fn blank_program_name_fails_validation() {
    let svc = test_service();

    let err = svc
        .programs
        .create(ProgramRequest { name: "".into() })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ValidationFailed(_)));
}

#[actix_rt::test]
async fn deleting_a_missing_program_is_not_found() {
    let svc = test_service();

    let err = svc.programs.delete(uuid::Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
