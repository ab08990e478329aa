use crate::{
    entities::chart::{
        employment_color, location_color, related_color, BreakdownField, ChartSlice,
    },
    errors::AppError,
    repositories::alumni::AlumniRepository,
};

/// Read-only aggregation over the alumni table. Each breakdown groups on one
/// categorical column and yields a handful of pie-chart slices; NULLs land in
/// an explicit `unknown` bucket.
pub struct ReportsHandler<R>
where
    R: AlumniRepository,
{
    pub alumni_repo: R,
}

impl<R> ReportsHandler<R>
where
    R: AlumniRepository,
{
    pub fn new(alumni_repo: R) -> Self {
        ReportsHandler { alumni_repo }
    }

    pub async fn employment_breakdown(&self) -> Result<Vec<ChartSlice>, AppError> {
        self.breakdown(BreakdownField::EmploymentStatus, employment_color).await
    }

    pub async fn location_breakdown(&self) -> Result<Vec<ChartSlice>, AppError> {
        self.breakdown(BreakdownField::WorkLocation, location_color).await
    }

    pub async fn course_relevance_breakdown(&self) -> Result<Vec<ChartSlice>, AppError> {
        self.breakdown(BreakdownField::RelatedToCourse, related_color).await
    }

    async fn breakdown(
        &self,
        field: BreakdownField,
        color: fn(&str) -> &'static str,
    ) -> Result<Vec<ChartSlice>, AppError> {
        let counts = self.alumni_repo.count_by_category(field).await?;
        Ok(counts
            .into_iter()
            .map(|row| ChartSlice::from_count(row, color))
            .collect())
    }
}
