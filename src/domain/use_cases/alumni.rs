use std::str::FromStr;

use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::alumni::{
        AlumniInsert, AlumniRecord, AlumniSubmission, EmployerClassification,
        EmploymentStatus, FurtherStudies, RelatedToCourse, Sector, WorkLocation,
    },
    errors::{collect_field_errors, AppError, FieldErrors},
    repositories::{alumni::AlumniRepository, program::ProgramRepository},
};

/// Whether the submission creates a new record or replaces an existing one.
/// On update, uniqueness checks exclude the record itself and the student
/// number is pinned to the existing identity.
enum ValidationMode<'a> {
    Create,
    Update { current: &'a AlumniRecord },
}

pub struct AlumniHandler<R, P>
where
    R: AlumniRepository,
    P: ProgramRepository,
{
    pub alumni_repo: R,
    pub program_repo: P,
}

impl<R, P> AlumniHandler<R, P>
where
    R: AlumniRepository,
    P: ProgramRepository,
{
    pub fn new(alumni_repo: R, program_repo: P) -> Self {
        AlumniHandler { alumni_repo, program_repo }
    }

    /// Validates and inserts a new record. The uniqueness probes here are
    /// advisory; the storage constraints stay authoritative and a race that
    /// slips past the probe still surfaces as a duplicate-key error.
    pub async fn create(&self, submission: AlumniSubmission) -> Result<AlumniRecord, AppError> {
        let draft = self.validate(&submission, ValidationMode::Create).await?;
        self.alumni_repo.insert_alumni(&draft).await
    }

    pub async fn update(&self, student_number: &str, submission: AlumniSubmission) -> Result<AlumniRecord, AppError> {
        let current = self
            .alumni_repo
            .find_by_student_number(student_number)
            .await?
            .ok_or_else(|| AppError::NotFound("Alumni not found.".into()))?;

        let draft = self
            .validate(&submission, ValidationMode::Update { current: &current })
            .await?;

        self.alumni_repo.update_alumni(student_number, &draft).await
    }

    pub async fn get(&self, student_number: &str) -> Result<AlumniRecord, AppError> {
        self.alumni_repo
            .find_by_student_number(student_number)
            .await?
            .ok_or_else(|| AppError::NotFound("Alumni not found.".into()))
    }

    pub async fn list(&self) -> Result<Vec<AlumniRecord>, AppError> {
        self.alumni_repo.list_alumni().await
    }

    /// Hard delete. Repeated deletes of the same identity keep reporting
    /// `NotFound`; there is no tombstone state.
    pub async fn delete(&self, student_number: &str) -> Result<(), AppError> {
        let deleted = self.alumni_repo.delete_alumni(student_number).await?;
        if deleted {
            Ok(())
        } else {
            Err(AppError::NotFound("Alumni not found.".into()))
        }
    }

    /// Advisory existence probe for early form feedback. Never a substitute
    /// for the unique constraint on the actual write.
    pub async fn check_email_exists(&self, email: &str) -> Result<bool, AppError> {
        self.alumni_repo.active_email_taken(email, None).await
    }

    /// Consenting records with an active email, the set the external bulk
    /// mailer iterates.
    pub async fn consenting(&self) -> Result<Vec<AlumniRecord>, AppError> {
        self.alumni_repo.consenting_alumni().await
    }

    // ───── Validation engine ─────────────────────────────────────────

    /// One canonical rule set for every entry path (admin CRUD, public
    /// intake, email-link update). Accumulates every failure before
    /// returning so the caller can surface the full field map at once.
    async fn validate(
        &self,
        submission: &AlumniSubmission,
        mode: ValidationMode<'_>,
    ) -> Result<AlumniInsert, AppError> {
        let mut errors = match submission.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => collect_field_errors(&e),
        };

        let student_number = self.resolve_identity(submission, &mode, &mut errors);
        let program_id = self.resolve_program(submission, &mut errors).await?;

        // Company name is required when employed; cleared otherwise.
        if submission.is_employed() && !submission.has_company_name() {
            push_error(&mut errors, "company_name", "The company name field is required when employed.");
        }

        let exclude = match &mode {
            ValidationMode::Create => None,
            ValidationMode::Update { current } => Some(current.student_number.as_str()),
        };

        if let Some(sn) = &student_number {
            if matches!(mode, ValidationMode::Create)
                && self.alumni_repo.student_number_taken(sn, exclude).await?
            {
                push_error(&mut errors, "student_number", "The student number has already been taken.");
            }
        }

        if !submission.active_email.is_empty()
            && self.alumni_repo.active_email_taken(&submission.active_email, exclude).await?
        {
            push_error(&mut errors, "active_email", "The active email has already been taken.");
        }

        if !errors.is_empty() {
            return Err(AppError::ValidationFailed(errors));
        }

        self.build_draft(submission, student_number, program_id)
    }

    /// Create requires a student number in the submission; update pins it to
    /// the existing record and rejects attempts to change it.
    fn resolve_identity(
        &self,
        submission: &AlumniSubmission,
        mode: &ValidationMode<'_>,
        errors: &mut FieldErrors,
    ) -> Option<String> {
        match mode {
            ValidationMode::Create => match submission.student_number.as_deref() {
                Some(sn) if !sn.trim().is_empty() => Some(sn.trim().to_string()),
                _ => {
                    push_error(errors, "student_number", "The student number field is required.");
                    None
                }
            },
            ValidationMode::Update { current } => {
                if let Some(submitted) = submission.student_number.as_deref() {
                    if submitted != current.student_number {
                        push_error(errors, "student_number", "The student number cannot be changed.");
                    }
                }
                Some(current.student_number.clone())
            }
        }
    }

    /// Referential program selection is authoritative; a legacy free-text
    /// label is accepted and resolved against the catalog by name.
    async fn resolve_program(
        &self,
        submission: &AlumniSubmission,
        errors: &mut FieldErrors,
    ) -> Result<Option<Uuid>, AppError> {
        match (submission.program_id, submission.program.as_deref()) {
            (Some(id), _) => {
                if self.program_repo.program_exists(id).await? {
                    Ok(Some(id))
                } else {
                    push_error(errors, "program_id", "The selected program is invalid.");
                    Ok(None)
                }
            }
            (None, Some(name)) if !name.trim().is_empty() => {
                match self.program_repo.find_program_by_name(name.trim()).await? {
                    Some(program) => Ok(Some(program.id)),
                    None => {
                        push_error(errors, "program", "The program is not in the catalog.");
                        Ok(None)
                    }
                }
            }
            _ => {
                push_error(errors, "program_id", "The program field is required.");
                Ok(None)
            }
        }
    }

    /// Builds the typed draft once every rule has passed. Enum parses cannot
    /// fail here because membership was already validated; a failure means
    /// the engine and the rules drifted apart, which is reported rather than
    /// panicked on.
    fn build_draft(
        &self,
        submission: &AlumniSubmission,
        student_number: Option<String>,
        program_id: Option<Uuid>,
    ) -> Result<AlumniInsert, AppError> {
        let student_number = student_number
            .ok_or_else(|| AppError::InternalError("validated submission missing student number".into()))?;
        let program_id = program_id
            .ok_or_else(|| AppError::InternalError("validated submission missing program".into()))?;

        let employment_status = parse_enum::<EmploymentStatus>(&submission.employment_status, "employment_status")?;
        let work_location = parse_enum::<WorkLocation>(&submission.work_location, "work_location")?;
        let employer_classification =
            parse_enum::<EmployerClassification>(&submission.employer_classification, "employer_classification")?;
        let further_studies = parse_opt_enum::<FurtherStudies>(&submission.further_studies, "further_studies")?;
        let sector = parse_opt_enum::<Sector>(&submission.sector, "sector")?;
        let related_to_course = parse_opt_enum::<RelatedToCourse>(&submission.related_to_course, "related_to_course")?;

        let graduation_year: i32 = submission
            .graduation_year
            .as_deref()
            .and_then(|y| y.parse().ok())
            .ok_or_else(|| AppError::InternalError("validated submission missing graduation year".into()))?;

        // Normalization: the employed-only invariant holds no matter what
        // was submitted.
        let company_name = if employment_status == EmploymentStatus::Employed {
            submission.company_name.as_deref().map(|c| c.trim().to_string())
        } else {
            None
        };

        Ok(AlumniInsert {
            student_number,
            email: submission.email.clone(),
            program_id,
            last_name: submission.last_name.clone(),
            given_name: submission.given_name.clone(),
            middle_initial: submission.middle_initial.clone().filter(|m| !m.trim().is_empty()),
            present_address: submission.present_address.clone(),
            active_email: submission.active_email.clone(),
            contact_number: submission.contact_number.clone(),
            graduation_year,
            employment_status,
            company_name,
            further_studies,
            sector,
            work_location,
            employer_classification,
            related_to_course,
            consent: submission.consent.unwrap_or(false),
        })
    }
}

fn push_error(errors: &mut FieldErrors, field: &str, message: &str) {
    errors.entry(field.to_string()).or_default().push(message.to_string());
}

fn parse_enum<T: FromStr>(value: &str, field: &'static str) -> Result<T, AppError> {
    T::from_str(value)
        .map_err(|_| AppError::InternalError(format!("validated submission holds invalid {field}")))
}

fn parse_opt_enum<T: FromStr>(value: &Option<String>, field: &'static str) -> Result<Option<T>, AppError> {
    match value.as_deref().filter(|v| !v.is_empty()) {
        Some(v) => parse_enum(v, field).map(Some),
        None => Ok(None),
    }
}
