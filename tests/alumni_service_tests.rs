
use alumni_tracker::{
    entities::alumni::EmploymentStatus,
    errors::AppError,
};
use test_utils::*;

#[actix_rt::test]
async fn create_persists_a_valid_submission() {
    let svc = test_service();

    let record = svc.alumni.create(valid_submission(svc.program_id)).await.unwrap();

    assert_eq!(record.student_number, "2023-00001");
    assert_eq!(record.employment_status, EmploymentStatus::Employed);
    assert_eq!(record.company_name.as_deref(), Some("Acme Corp"));
    assert_eq!(record.graduation_year, 2023);
    assert_eq!(svc.alumni_repo.all().len(), 1);
}

#[actix_rt::test]
async fn company_name_is_cleared_when_not_employed() {
    let svc = test_service();
    let submission = submission_json(
        svc.program_id,
        serde_json::json!({ "employment_status": "unemployed", "company_name": "Ghost Corp" }),
    );

    let record = svc.alumni.create(submission).await.unwrap();

    assert_eq!(record.employment_status, EmploymentStatus::Unemployed);
    assert_eq!(record.company_name, None);
}

#[actix_rt::test]
async fn company_name_is_required_when_employed() {
    let svc = test_service();
    let submission = submission_json(
        svc.program_id,
        serde_json::json!({ "company_name": null }),
    );

    let err = svc.alumni.create(submission).await.unwrap_err();

    match err {
        AppError::ValidationFailed(errors) => assert!(errors.contains_key("company_name")),
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert!(svc.alumni_repo.all().is_empty());
}

#[actix_rt::test]
async fn duplicate_student_number_fails_and_leaves_storage_unchanged() {
    let svc = test_service();
    svc.alumni.create(valid_submission(svc.program_id)).await.unwrap();

    let duplicate = submission_json(
        svc.program_id,
        serde_json::json!({ "active_email": "other@example.com" }),
    );
    let err = svc.alumni.create(duplicate).await.unwrap_err();

    match err {
        AppError::ValidationFailed(errors) => assert!(errors.contains_key("student_number")),
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert_eq!(svc.alumni_repo.all().len(), 1);
}

#[actix_rt::test]
async fn duplicate_active_email_fails_validation() {
    let svc = test_service();
    svc.alumni.create(valid_submission(svc.program_id)).await.unwrap();

    let duplicate = submission_json(
        svc.program_id,
        serde_json::json!({ "student_number": "2023-00002" }),
    );
    let err = svc.alumni.create(duplicate).await.unwrap_err();

    match err {
        AppError::ValidationFailed(errors) => assert!(errors.contains_key("active_email")),
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[actix_rt::test]
async fn blank_optional_fields_are_stored_as_missing() {
    let svc = test_service();
    let submission = submission_json(
        svc.program_id,
        serde_json::json!({ "further_studies": "", "sector": "", "related_to_course": "" }),
    );

    let record = svc.alumni.create(submission).await.unwrap();

    assert_eq!(record.further_studies, None);
    assert_eq!(record.sector, None);
    assert_eq!(record.related_to_course, None);
}

#[actix_rt::test]
async fn all_invalid_fields_are_reported_together() {
    let svc = test_service();
    let submission = submission_json(
        svc.program_id,
        serde_json::json!({
            "email": "not-an-email",
            "graduation_year": "21",
            "employment_status": "retired",
            "related_to_course": "maybe",
            "consent": false
        }),
    );

    let err = svc.alumni.create(submission).await.unwrap_err();

    match err {
        AppError::ValidationFailed(errors) => {
            for field in ["email", "graduation_year", "employment_status", "related_to_course", "consent"] {
                assert!(errors.contains_key(field), "missing error for {field}: {errors:?}");
            }
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[actix_rt::test]
async fn update_rejects_invalid_related_to_course_and_keeps_record() {
    let svc = test_service();
    let created = svc.alumni.create(valid_submission(svc.program_id)).await.unwrap();

    let bad_update = submission_json(
        svc.program_id,
        serde_json::json!({ "related_to_course": "definitely" }),
    );
    let err = svc.alumni.update("2023-00001", bad_update).await.unwrap_err();

    match err {
        AppError::ValidationFailed(errors) => assert!(errors.contains_key("related_to_course")),
        other => panic!("expected validation failure, got {other:?}"),
    }

    let stored = svc.alumni.get("2023-00001").await.unwrap();
    assert_eq!(stored.related_to_course, created.related_to_course);
    assert_eq!(stored.updated_at, created.updated_at);
}

#[actix_rt::test]
async fn update_allows_keeping_own_unique_values() {
    let svc = test_service();
    svc.alumni.create(valid_submission(svc.program_id)).await.unwrap();

    let same_identity = submission_json(
        svc.program_id,
        serde_json::json!({ "present_address": "456 Rizal Ave, Quezon City" }),
    );
    let updated = svc.alumni.update("2023-00001", same_identity).await.unwrap();

    assert_eq!(updated.present_address, "456 Rizal Ave, Quezon City");
    assert_eq!(updated.active_email, "juan.delacruz@example.com");
}

#[actix_rt::test]
async fn update_rejects_a_changed_student_number() {
    let svc = test_service();
    svc.alumni.create(valid_submission(svc.program_id)).await.unwrap();

    let renamed = submission_json(
        svc.program_id,
        serde_json::json!({ "student_number": "2023-99999" }),
    );
    let err = svc.alumni.update("2023-00001", renamed).await.unwrap_err();

    match err {
        AppError::ValidationFailed(errors) => assert!(errors.contains_key("student_number")),
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[actix_rt::test]
async fn update_of_missing_record_is_not_found() {
    let svc = test_service();

    let err = svc
        .alumni
        .update("2023-40404", valid_submission(svc.program_id))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn delete_is_not_found_twice_in_a_row() {
    let svc = test_service();
    svc.alumni.create(valid_submission(svc.program_id)).await.unwrap();

    svc.alumni.delete("2023-00001").await.unwrap();

    let first_retry = svc.alumni.delete("2023-00001").await.unwrap_err();
    assert!(matches!(first_retry, AppError::NotFound(_)));

    let second_retry = svc.alumni.delete("2023-00001").await.unwrap_err();
    assert!(matches!(second_retry, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn check_email_exists_reflects_created_records() {
    let svc = test_service();

    assert!(!svc.alumni.check_email_exists("juan.delacruz@example.com").await.unwrap());

    svc.alumni.create(valid_submission(svc.program_id)).await.unwrap();

    assert!(svc.alumni.check_email_exists("juan.delacruz@example.com").await.unwrap());
    assert!(!svc.alumni.check_email_exists("never.used@example.com").await.unwrap());
}

#[actix_rt::test]
async fn unknown_program_reference_fails_validation() {
    let svc = test_service();
    let submission = submission_json(
        svc.program_id,
        serde_json::json!({ "program_id": uuid::Uuid::new_v4() }),
    );

    let err = svc.alumni.create(submission).await.unwrap_err();

    match err {
        AppError::ValidationFailed(errors) => assert!(errors.contains_key("program_id")),
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[actix_rt::test]
async fn legacy_free_text_program_resolves_by_name() {
    let svc = test_service();
    let submission = submission_json(
        svc.program_id,
        serde_json::json!({ "program_id": null, "program": "BS Information Technology" }),
    );

    let record = svc.alumni.create(submission).await.unwrap();
    assert_eq!(record.program_id, svc.program_id);
}

#[actix_rt::test]
async fn unknown_free_text_program_is_rejected() {
    let svc = test_service();
    let submission = submission_json(
        svc.program_id,
        serde_json::json!({ "program_id": null, "program": "BS Underwater Basket Weaving" }),
    );

    let err = svc.alumni.create(submission).await.unwrap_err();

    match err {
        AppError::ValidationFailed(errors) => assert!(errors.contains_key("program")),
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[actix_rt::test]
async fn consenting_recipients_exclude_non_consenting_records() {
    let svc = test_service();
    svc.alumni.create(valid_submission(svc.program_id)).await.unwrap();

    // Consent is required at intake, so a non-consenting row can only exist
    // from pre-consent data; seed one directly.
    let mut opted_out = svc.alumni_repo.all()[0].clone();
    opted_out.id = uuid::Uuid::new_v4();
    opted_out.student_number = "2022-11111".into();
    opted_out.active_email = "optout@example.com".into();
    opted_out.consent = false;
    svc.alumni_repo.seed(opted_out);

    let recipients = svc.alumni.consenting().await.unwrap();
    assert_eq!(recipients.len(), 1);
    assert_eq!(recipients[0].student_number, "2023-00001");
}

#[actix_rt::test]
async fn graduation_year_accepts_numeric_json_values() {
    let svc = test_service();
    let submission = submission_json(
        svc.program_id,
        serde_json::json!({ "graduation_year": 2024 }),
    );

    let record = svc.alumni.create(submission).await.unwrap();
    assert_eq!(record.graduation_year, 2024);
}
