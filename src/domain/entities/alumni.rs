use std::borrow::Cow;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

// ───── Constants ──────────────────────────────────────────────────────
pub const MIN_GRADUATION_YEAR: i32 = 2022;
const MAX_COMPANY_NAME_LENGTH: u64 = 255;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").expect("valid year regex"));

// ───── Categorical fields ────────────────────────────────────────────
// Stored as Postgres enum types; the kebab-case strings are the wire and
// storage representation.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "employment_status", rename_all = "kebab-case")]
pub enum EmploymentStatus {
    Employed,
    UnderEmployed,
    Unemployed,
    SelfEmployed,
    CurrentlyLooking,
}

impl EmploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentStatus::Employed => "employed",
            EmploymentStatus::UnderEmployed => "under-employed",
            EmploymentStatus::Unemployed => "unemployed",
            EmploymentStatus::SelfEmployed => "self-employed",
            EmploymentStatus::CurrentlyLooking => "currently-looking",
        }
    }
}

impl FromStr for EmploymentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employed" => Ok(EmploymentStatus::Employed),
            "under-employed" => Ok(EmploymentStatus::UnderEmployed),
            "unemployed" => Ok(EmploymentStatus::Unemployed),
            "self-employed" => Ok(EmploymentStatus::SelfEmployed),
            "currently-looking" => Ok(EmploymentStatus::CurrentlyLooking),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "further_studies", rename_all = "kebab-case")]
pub enum FurtherStudies {
    No,
    Ma,
    Mba,
    Mit,
    Mce,
    Phd,
}

impl FromStr for FurtherStudies {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no" => Ok(FurtherStudies::No),
            "ma" => Ok(FurtherStudies::Ma),
            "mba" => Ok(FurtherStudies::Mba),
            "mit" => Ok(FurtherStudies::Mit),
            "mce" => Ok(FurtherStudies::Mce),
            "phd" => Ok(FurtherStudies::Phd),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "sector", rename_all = "kebab-case")]
pub enum Sector {
    Government,
    Private,
    SelfEmployed,
}

impl FromStr for Sector {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "government" => Ok(Sector::Government),
            "private" => Ok(Sector::Private),
            "self-employed" => Ok(Sector::SelfEmployed),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "work_location", rename_all = "kebab-case")]
pub enum WorkLocation {
    Local,
    Abroad,
}

impl WorkLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkLocation::Local => "local",
            WorkLocation::Abroad => "abroad",
        }
    }
}

impl FromStr for WorkLocation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(WorkLocation::Local),
            "abroad" => Ok(WorkLocation::Abroad),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "employer_classification", rename_all = "kebab-case")]
pub enum EmployerClassification {
    Local,
    ForeignPh,
    ForeignAbroad,
    SelfEmployed,
}

impl FromStr for EmployerClassification {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(EmployerClassification::Local),
            "foreign-ph" => Ok(EmployerClassification::ForeignPh),
            "foreign-abroad" => Ok(EmployerClassification::ForeignAbroad),
            "self-employed" => Ok(EmployerClassification::SelfEmployed),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "related_to_course", rename_all = "kebab-case")]
pub enum RelatedToCourse {
    Yes,
    No,
    Unsure,
}

impl RelatedToCourse {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelatedToCourse::Yes => "yes",
            RelatedToCourse::No => "no",
            RelatedToCourse::Unsure => "unsure",
        }
    }
}

impl FromStr for RelatedToCourse {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(RelatedToCourse::Yes),
            "no" => Ok(RelatedToCourse::No),
            "unsure" => Ok(RelatedToCourse::Unsure),
            _ => Err(()),
        }
    }
}

// ───── Database model ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AlumniRecord {
    pub id: Uuid,
    pub student_number: String,
    pub email: String,
    pub program_id: Uuid,
    pub last_name: String,
    pub given_name: String,
    pub middle_initial: Option<String>,
    pub present_address: String,
    pub active_email: String,
    pub contact_number: String,
    pub graduation_year: i32,
    pub employment_status: EmploymentStatus,
    pub company_name: Option<String>,
    pub further_studies: Option<FurtherStudies>,
    pub sector: Option<Sector>,
    pub work_location: WorkLocation,
    pub employer_classification: EmployerClassification,
    pub related_to_course: Option<RelatedToCourse>,
    pub consent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ───── Incoming submission ───────────────────────────────────────────

/// Raw form/API submission. Categorical fields stay as strings here so a bad
/// value produces a field-level validation error instead of a deserialization
/// failure, and every invalid field can be reported in one pass.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AlumniSubmission {
    /// Required on create; immutable afterwards (requiredness is mode-aware
    /// and checked by the validation engine).
    pub student_number: Option<String>,

    #[validate(email(message = "The email must be a valid email address."))]
    #[serde(default)]
    pub email: String,

    /// Referential program selection. Authoritative form of the program field.
    pub program_id: Option<Uuid>,

    /// Legacy free-text program label, resolved against the catalog by name.
    pub program: Option<String>,

    #[validate(length(min = 1, message = "The last name field is required."))]
    #[serde(default)]
    pub last_name: String,

    #[validate(length(min = 1, message = "The given name field is required."))]
    #[serde(default)]
    pub given_name: String,

    pub middle_initial: Option<String>,

    #[validate(length(min = 1, message = "The present address field is required."))]
    #[serde(default)]
    pub present_address: String,

    #[validate(email(message = "The active email must be a valid email address."))]
    #[serde(default)]
    pub active_email: String,

    #[validate(length(min = 1, message = "The contact number field is required."))]
    #[serde(default)]
    pub contact_number: String,

    /// Accepted as a JSON number or numeric string; always held as a string
    /// so the 4-digit rule applies uniformly to both intake paths.
    #[serde(default, deserialize_with = "de_year")]
    #[validate(
        required(message = "The graduation year field is required."),
        custom(function = "validate_graduation_year")
    )]
    pub graduation_year: Option<String>,

    #[validate(custom(function = "validate_employment_status"))]
    #[serde(default)]
    pub employment_status: String,

    #[validate(length(max = MAX_COMPANY_NAME_LENGTH, message = "The company name may not be greater than 255 characters."))]
    pub company_name: Option<String>,

    #[validate(custom(function = "validate_further_studies"))]
    #[serde(default, deserialize_with = "de_opt_text")]
    pub further_studies: Option<String>,

    #[validate(custom(function = "validate_sector"))]
    #[serde(default, deserialize_with = "de_opt_text")]
    pub sector: Option<String>,

    #[validate(custom(function = "validate_work_location"))]
    #[serde(default)]
    pub work_location: String,

    #[validate(custom(function = "validate_employer_classification"))]
    #[serde(default)]
    pub employer_classification: String,

    #[validate(custom(function = "validate_related_to_course"))]
    #[serde(default, deserialize_with = "de_opt_text")]
    pub related_to_course: Option<String>,

    #[validate(
        required(message = "The consent field is required."),
        custom(function = "validate_consent")
    )]
    pub consent: Option<bool>,
}

fn de_year<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "graduation_year must be a number or string, got {}",
            other
        ))),
    }
}

/// Blank strings on optional selects mean "not answered" and become `None`,
/// so an unselected dropdown posting `""` is never a membership failure.
fn de_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn validate_graduation_year(year: &str) -> Result<(), ValidationError> {
    if !YEAR_RE.is_match(year) {
        return Err(invalid("digits", "The graduation year must be exactly 4 digits."));
    }
    // 4 digits always parse
    let value: i32 = year
        .parse()
        .map_err(|_| invalid("digits", "The graduation year must be exactly 4 digits."))?;
    if value < MIN_GRADUATION_YEAR {
        return Err(invalid("min", "The graduation year must be 2022 or later."));
    }
    Ok(())
}

fn validate_consent(consent: &bool) -> Result<(), ValidationError> {
    if !*consent {
        return Err(invalid("accepted", "The consent field must be accepted."));
    }
    Ok(())
}

fn validate_employment_status(value: &str) -> Result<(), ValidationError> {
    EmploymentStatus::from_str(value).map(|_| ()).map_err(|_| {
        invalid("in", "The employment status must be one of: employed, under-employed, unemployed, self-employed, currently-looking.")
    })
}

fn validate_further_studies(value: &str) -> Result<(), ValidationError> {
    FurtherStudies::from_str(value).map(|_| ()).map_err(|_| {
        invalid("in", "The further studies must be one of: no, ma, mba, mit, mce, phd.")
    })
}

fn validate_sector(value: &str) -> Result<(), ValidationError> {
    Sector::from_str(value).map(|_| ()).map_err(|_| {
        invalid("in", "The sector must be one of: government, private, self-employed.")
    })
}

fn validate_work_location(value: &str) -> Result<(), ValidationError> {
    WorkLocation::from_str(value).map(|_| ()).map_err(|_| {
        invalid("in", "The work location must be either local or abroad.")
    })
}

fn validate_employer_classification(value: &str) -> Result<(), ValidationError> {
    EmployerClassification::from_str(value).map(|_| ()).map_err(|_| {
        invalid("in", "The employer classification must be one of: local, foreign-ph, foreign-abroad, self-employed.")
    })
}

fn validate_related_to_course(value: &str) -> Result<(), ValidationError> {
    RelatedToCourse::from_str(value).map(|_| ()).map_err(|_| {
        invalid("in", "The related to course must be one of: yes, no, unsure.")
    })
}

impl AlumniSubmission {
    pub fn is_employed(&self) -> bool {
        self.employment_status == "employed"
    }

    pub fn has_company_name(&self) -> bool {
        self.company_name
            .as_deref()
            .map(|c| !c.trim().is_empty())
            .unwrap_or(false)
    }
}

// ───── Normalized insert draft ───────────────────────────────────────

/// Fully typed draft produced by the validation engine. By the time one of
/// these exists, every field rule has passed and `company_name` honors the
/// employed-only invariant.
#[derive(Debug, Clone)]
pub struct AlumniInsert {
    pub student_number: String,
    pub email: String,
    pub program_id: Uuid,
    pub last_name: String,
    pub given_name: String,
    pub middle_initial: Option<String>,
    pub present_address: String,
    pub active_email: String,
    pub contact_number: String,
    pub graduation_year: i32,
    pub employment_status: EmploymentStatus,
    pub company_name: Option<String>,
    pub further_studies: Option<FurtherStudies>,
    pub sector: Option<Sector>,
    pub work_location: WorkLocation,
    pub employer_classification: EmployerClassification,
    pub related_to_course: Option<RelatedToCourse>,
    pub consent: bool,
}
