//! Category counting and metric ranking.
//!
//! The aggregator turns an arbitrary number of labeled counts into at most
//! [`MAX_METRICS`] colored metrics, ordered by value. Output is a pure
//! function of the input and the configured catalog.

use std::cmp::Ordering;

use crate::render::{Color, ColorSpec};
use crate::style::Palette;

/// Upper bound on the number of metrics a chart shows.
pub const MAX_METRICS: usize = 5;

/// Number of occurrences of a category label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCategoryCount {
    /// Category label.
    pub label: String,
    /// Occurrence count.
    pub count: u64,
}

impl RawCategoryCount {
    /// Create a new count.
    pub fn new(label: impl Into<String>, count: u64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// A labeled, colored data point rendered as one bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    /// Category label.
    pub label: String,
    /// Non-negative value.
    pub value: f64,
    /// Bar color.
    pub color: ColorSpec,
}

/// A record tagged with a category, such as a target company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    /// Display name of the record.
    pub name: String,
    /// Category the record belongs to.
    pub category: String,
}

impl CategoryRecord {
    /// Create a new record.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }
}

/// A pre-aggregated value supplied directly by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledValue {
    /// Category label.
    pub label: String,
    /// Value; negative and NaN inputs count as zero.
    pub value: f64,
    /// Explicit color, or `None` for the palette color.
    pub color: Option<ColorSpec>,
}

impl LabeledValue {
    /// Create a value that takes its color from the palette.
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            color: None,
        }
    }

    /// Attach an explicit color.
    pub fn with_color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Ordered list of known category labels.
///
/// A category's position in the catalog decides its palette color.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryCatalog {
    entries: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, PartialEq)]
struct CatalogEntry {
    label: String,
    color: Option<Color>,
}

const JOB_CATEGORIES: [(&str, &str); 8] = [
    ("프론트엔드", "#4f46e5"),
    ("백엔드", "#8b5cf6"),
    ("풀스택", "#10b981"),
    ("데이터 분석", "#f59e0b"),
    ("DevOps", "#ef4444"),
    ("모바일 앱", "#ec4899"),
    ("UI/UX", "#06b6d4"),
    ("AI/ML", "#14b8a6"),
];

/// Color for categories that have no brand color.
pub const FALLBACK_COLOR: Color = Color::new(136.0 / 255.0, 136.0 / 255.0, 136.0 / 255.0, 1.0);

impl CategoryCatalog {
    /// Build a catalog from labels; duplicates keep their first position.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self::default();
        for label in labels {
            catalog.insert(label.into(), None);
        }
        catalog
    }

    /// The dashboard's job categories with their brand colors.
    pub fn job_categories() -> Self {
        let mut catalog = Self::default();
        for (label, hex) in JOB_CATEGORIES {
            catalog.insert(label.to_string(), Color::from_hex(hex).ok());
        }
        catalog
    }

    fn insert(&mut self, label: String, color: Option<Color>) {
        if self.position(&label).is_none() {
            self.entries.push(CatalogEntry { label, color });
        }
    }

    /// Number of known categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over labels in catalog order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.label.as_str())
    }

    /// Position of a label.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.label == label)
    }

    /// Brand color of a label, falling back to gray for unknown or uncolored
    /// categories.
    pub fn brand_color(&self, label: &str) -> Color {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .and_then(|entry| entry.color)
            .unwrap_or(FALLBACK_COLOR)
    }

    /// Pre-aggregated values for the counts, colored with brand colors.
    pub fn branded_values(&self, counts: &[RawCategoryCount]) -> Vec<LabeledValue> {
        counts
            .iter()
            .map(|count| {
                LabeledValue::new(count.label.clone(), count.count as f64)
                    .with_color(self.brand_color(&count.label))
            })
            .collect()
    }
}

/// Count records per catalog category.
///
/// Every catalog category appears, in catalog order, even with zero records.
/// Records in unknown categories are skipped.
pub fn count_by_category<'a, I>(records: I, catalog: &CategoryCatalog) -> Vec<RawCategoryCount>
where
    I: IntoIterator<Item = &'a CategoryRecord>,
{
    let mut counts: Vec<RawCategoryCount> = catalog
        .labels()
        .map(|label| RawCategoryCount::new(label, 0))
        .collect();
    for record in records {
        match catalog.position(&record.category) {
            Some(index) => counts[index].count += 1,
            None => tracing::debug!(
                name = %record.name,
                category = %record.category,
                "record category not in catalog, skipping"
            ),
        }
    }
    counts
}

/// Turns labeled counts into a ranked, capped, colored metric list.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    catalog: Option<CategoryCatalog>,
    palette: Palette,
    limit: Option<usize>,
}

impl Aggregator {
    /// Create an aggregator that treats the input labels as the known
    /// categories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the known categories and their color order.
    pub fn with_catalog(mut self, catalog: CategoryCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Override the hue palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Keep fewer than [`MAX_METRICS`] metrics.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Access the configured catalog.
    pub fn catalog(&self) -> Option<&CategoryCatalog> {
        self.catalog.as_ref()
    }

    fn limit(&self) -> usize {
        self.limit.unwrap_or(MAX_METRICS).min(MAX_METRICS)
    }

    fn palette_color(&self, index: usize) -> ColorSpec {
        ColorSpec::hue(
            self.palette.hue_for(index),
            self.palette.saturation,
            self.palette.lightness,
        )
    }

    /// Rank category counts.
    ///
    /// Known categories missing from the input count as zero. Duplicate
    /// labels are summed. Ties keep input order.
    pub fn aggregate(&self, raw: &[RawCategoryCount]) -> Vec<Metric> {
        let mut totals: Vec<(String, u64)> = match &self.catalog {
            Some(catalog) => catalog.labels().map(|label| (label.to_string(), 0)).collect(),
            None => Vec::new(),
        };
        for entry in raw {
            match totals.iter().position(|(label, _)| *label == entry.label) {
                Some(index) => totals[index].1 = totals[index].1.saturating_add(entry.count),
                None if self.catalog.is_none() => totals.push((entry.label.clone(), entry.count)),
                None => tracing::debug!(label = %entry.label, "label not in catalog, skipping"),
            }
        }

        let mut metrics: Vec<Metric> = totals
            .into_iter()
            .enumerate()
            .map(|(index, (label, count))| Metric {
                label,
                value: count as f64,
                color: self.palette_color(index),
            })
            .collect();
        rank_in_place(&mut metrics, self.limit());
        tracing::trace!(count = metrics.len(), "aggregated metrics");
        metrics
    }

    /// Rank pre-aggregated values.
    pub fn rank(&self, values: &[LabeledValue]) -> Vec<Metric> {
        let mut metrics: Vec<Metric> = values
            .iter()
            .enumerate()
            .map(|(index, value)| Metric {
                label: value.label.clone(),
                value: sanitize(value.value),
                color: value.color.unwrap_or_else(|| self.palette_color(index)),
            })
            .collect();
        rank_in_place(&mut metrics, self.limit());
        metrics
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

// `sort_by` is stable, so equal values keep their input order.
fn rank_in_place(metrics: &mut Vec<Metric>, limit: usize) {
    metrics.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    metrics.truncate(limit);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_categories_keep_hue_by_position() {
        let raw = [
            RawCategoryCount::new("프론트엔드", 3),
            RawCategoryCount::new("백엔드", 1),
        ];
        let metrics = Aggregator::new().aggregate(&raw);
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].label, "프론트엔드");
        assert_eq!(metrics[0].value, 3.0);
        assert_eq!(metrics[0].color, ColorSpec::hue(0.0, 0.8, 0.65));
        assert_eq!(metrics[1].color, ColorSpec::hue(40.0, 0.8, 0.65));
    }

    #[test]
    fn catalog_fills_missing_categories_with_zero() {
        let catalog = CategoryCatalog::new(["a", "b", "c"]);
        let metrics = Aggregator::new()
            .with_catalog(catalog)
            .aggregate(&[RawCategoryCount::new("c", 2)]);
        let labels: Vec<&str> = metrics.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["c", "a", "b"]);
        assert_eq!(metrics[0].color, ColorSpec::hue(80.0, 0.8, 0.65));
        assert_eq!(metrics[1].value, 0.0);
    }

    #[test]
    fn catalog_drops_unknown_labels() {
        let catalog = CategoryCatalog::new(["a"]);
        let metrics = Aggregator::new()
            .with_catalog(catalog)
            .aggregate(&[RawCategoryCount::new("zzz", 9)]);
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].label, "a");
    }

    #[test]
    fn caps_at_five_and_keeps_tie_order() {
        let raw: Vec<RawCategoryCount> = ["a", "b", "c", "d", "e", "f", "g"]
            .iter()
            .map(|label| RawCategoryCount::new(*label, 1))
            .chain([RawCategoryCount::new("h", 2)])
            .collect();
        let metrics = Aggregator::new().aggregate(&raw);
        let labels: Vec<&str> = metrics.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["h", "a", "b", "c", "d"]);
    }

    #[test]
    fn duplicate_labels_are_summed() {
        let raw = [
            RawCategoryCount::new("x", 1),
            RawCategoryCount::new("y", 3),
            RawCategoryCount::new("x", 4),
        ];
        let metrics = Aggregator::new().aggregate(&raw);
        assert_eq!(metrics[0].label, "x");
        assert_eq!(metrics[0].value, 5.0);
    }

    #[test]
    fn limit_never_exceeds_cap() {
        let raw: Vec<RawCategoryCount> = (0..10)
            .map(|i| RawCategoryCount::new(format!("c{i}"), i))
            .collect();
        assert_eq!(Aggregator::new().with_limit(50).aggregate(&raw).len(), 5);
        assert_eq!(Aggregator::new().with_limit(2).aggregate(&raw).len(), 2);
    }

    #[test]
    fn counts_records_per_catalog_category() {
        let catalog = CategoryCatalog::job_categories();
        let records = [
            CategoryRecord::new("네이버", "프론트엔드"),
            CategoryRecord::new("카카오", "백엔드"),
            CategoryRecord::new("라인", "프론트엔드"),
            CategoryRecord::new("unknown co", "Sales"),
        ];
        let counts = count_by_category(&records, &catalog);
        assert_eq!(counts.len(), 8);
        assert_eq!(counts[0], RawCategoryCount::new("프론트엔드", 2));
        assert_eq!(counts[1], RawCategoryCount::new("백엔드", 1));
        assert!(counts[2..].iter().all(|count| count.count == 0));
    }

    #[test]
    fn rank_keeps_explicit_colors_and_clamps_values() {
        let catalog = CategoryCatalog::job_categories();
        let values = catalog.branded_values(&[
            RawCategoryCount::new("백엔드", 2),
            RawCategoryCount::new("Sales", 5),
        ]);
        let mut with_negative = values.clone();
        with_negative.push(LabeledValue::new("neg", -3.0));
        let metrics = Aggregator::new().rank(&with_negative);
        assert_eq!(metrics[0].label, "Sales");
        assert_eq!(metrics[0].color, ColorSpec::Rgba(FALLBACK_COLOR));
        assert_eq!(
            metrics[1].color,
            ColorSpec::Rgba(Color::from_hex("#8b5cf6").expect("valid literal"))
        );
        assert_eq!(metrics[2].value, 0.0);
        assert_eq!(metrics[2].color, ColorSpec::hue(80.0, 0.8, 0.65));
    }

    #[test]
    fn rank_zeroes_non_finite_values() {
        let values = [
            LabeledValue::new("inf", f64::INFINITY),
            LabeledValue::new("nan", f64::NAN),
            LabeledValue::new("two", 2.0),
        ];
        let metrics = Aggregator::new().rank(&values);
        assert_eq!(metrics[0].label, "two");
        assert!(metrics.iter().all(|metric| metric.value.is_finite()));
        assert_eq!(metrics[1].value, 0.0);
        assert_eq!(metrics[2].value, 0.0);
    }

    #[test]
    fn empty_input_yields_empty_list() {
        assert!(Aggregator::new().aggregate(&[]).is_empty());
        assert!(Aggregator::new().rank(&[]).is_empty());
    }
}
