use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

const MAX_NAME_LENGTH: u64 = 255;

/// Catalog entry an alumni record points at. Names are free text; uniqueness
/// is not enforced, matching the catalog's informal usage.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Program {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProgramRequest {
    #[validate(length(
        min = 1,
        max = MAX_NAME_LENGTH,
        message = "The name field is required and may not be greater than 255 characters."
    ))]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_fails_validation() {
        let req = ProgramRequest { name: "".into() };
        assert!(req.validate().is_err());
    }

    #[test]
    fn reasonable_name_passes() {
        let req = ProgramRequest { name: "BS Information Technology".into() };
        assert!(req.validate().is_ok());
    }
}
