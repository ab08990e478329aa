use serde::Serialize;

/// Bucket label used for rows where the grouped column is NULL.
pub const UNKNOWN_BUCKET: &str = "unknown";

/// Which categorical column a breakdown groups on. Keeping this closed keeps
/// the grouping column out of caller hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownField {
    EmploymentStatus,
    WorkLocation,
    RelatedToCourse,
}

impl BreakdownField {
    pub fn column(&self) -> &'static str {
        match self {
            BreakdownField::EmploymentStatus => "employment_status",
            BreakdownField::WorkLocation => "work_location",
            BreakdownField::RelatedToCourse => "related_to_course",
        }
    }
}

/// One `(category, count)` pair straight out of a GROUP BY. `None` means the
/// column was NULL for those rows.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryCount {
    pub category: Option<String>,
    pub count: i64,
}

/// One pie-chart slice. The wire names (`browser`/`visitors`) are leftovers
/// from the chart component the frontend reuses; the semantic fields are
/// category and count.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartSlice {
    #[serde(rename = "browser")]
    pub category: String,
    #[serde(rename = "visitors")]
    pub count: i64,
    pub fill: String,
}

impl ChartSlice {
    pub fn from_count(row: CategoryCount, color: fn(&str) -> &'static str) -> Self {
        let category = row.category.unwrap_or_else(|| UNKNOWN_BUCKET.to_string());
        let fill = color(&category).to_string();
        ChartSlice { category, count: row.count, fill }
    }
}

pub fn employment_color(category: &str) -> &'static str {
    match category {
        "employed" => "var(--chart-1)",
        "unemployed" => "var(--chart-2)",
        "self-employed" => "var(--chart-3)",
        "under-employed" => "var(--chart-4)",
        _ => "var(--chart-5)",
    }
}

pub fn location_color(category: &str) -> &'static str {
    match category {
        "local" => "var(--chart-1)",
        "abroad" => "var(--chart-2)",
        _ => "var(--chart-5)",
    }
}

pub fn related_color(category: &str) -> &'static str {
    match category {
        "yes" => "var(--chart-1)",
        "no" => "var(--chart-2)",
        "unsure" => "var(--chart-3)",
        _ => "var(--chart-4)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_category_falls_into_unknown_bucket() {
        let slice = ChartSlice::from_count(CategoryCount { category: None, count: 3 }, employment_color);
        assert_eq!(slice.category, "unknown");
        assert_eq!(slice.fill, "var(--chart-5)");
    }

    #[test]
    fn employment_colors_follow_fixed_mapping() {
        assert_eq!(employment_color("employed"), "var(--chart-1)");
        assert_eq!(employment_color("unemployed"), "var(--chart-2)");
        assert_eq!(employment_color("self-employed"), "var(--chart-3)");
        assert_eq!(employment_color("under-employed"), "var(--chart-4)");
        assert_eq!(employment_color("currently-looking"), "var(--chart-5)");
    }

    #[test]
    fn slices_serialize_with_legacy_wire_names() {
        let slice = ChartSlice::from_count(
            CategoryCount { category: Some("local".into()), count: 7 },
            location_color,
        );
        let json = serde_json::to_value(&slice).unwrap();
        assert_eq!(json["browser"], "local");
        assert_eq!(json["visitors"], 7);
        assert_eq!(json["fill"], "var(--chart-1)");
    }
}
