use indexmap::{IndexMap, IndexSet};

use super::bins::HistogramBins;
use super::model::{ExperienceLevel, Record, RemoteStatus};

// ---------------------------------------------------------------------------
// Proportions
// ---------------------------------------------------------------------------

/// Count of records for one remote status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProportionSlice {
    pub status: RemoteStatus,
    pub count: usize,
}

/// Group by remote status, keeping the order in which statuses first appear.
pub fn compute_proportions(records: &[Record]) -> Vec<ProportionSlice> {
    let mut counts: IndexMap<RemoteStatus, usize> = IndexMap::new();
    for r in records {
        *counts.entry(r.remote_status).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(status, count)| ProportionSlice { status, count })
        .collect()
}

// ---------------------------------------------------------------------------
// Top-N job titles
// ---------------------------------------------------------------------------

/// The most frequent job titles, most frequent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopCategorySet {
    titles: IndexSet<String>,
}

impl TopCategorySet {
    pub fn contains(&self, title: &str) -> bool {
        self.titles.contains(title)
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.titles.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }
}

/// Count job titles, sort by descending count (ties keep first-seen order)
/// and keep the first `n`.
pub fn compute_top_categories(records: &[Record], n: usize) -> TopCategorySet {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for r in records {
        *counts.entry(r.job_title.as_str()).or_default() += 1;
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    // `sort_by` is stable, so equal counts stay in encounter order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    TopCategorySet {
        titles: ranked
            .into_iter()
            .take(n)
            .map(|(title, _)| title.to_string())
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Linked-view points
// ---------------------------------------------------------------------------

/// Stable join key of a point: its index in the immutable point list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub usize);

/// How the linked view turns records into points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub enum PointMode {
    /// One point per (job title, level) holding the mean USD salary.
    Averaged,
    /// One point per qualifying record.
    #[default]
    PerRecord,
}

impl PointMode {
    pub fn label(self) -> &'static str {
        match self {
            PointMode::Averaged => "Average per level",
            PointMode::PerRecord => "Every record",
        }
    }
}

/// One polyline of the linked view.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedPoint {
    pub id: PointId,
    pub category: String,
    pub level: ExperienceLevel,
    /// Mean salary for averaged points, the record's salary otherwise.
    pub salary: f64,
    /// Number of records behind the point.
    pub support: usize,
    /// Only per-record points have a single remote status.
    pub remote_status: Option<RemoteStatus>,
    /// Index into the dataset for per-record points.
    pub record: Option<usize>,
}

/// A record qualifies for the linked view when its title is in the top set
/// and its USD salary is a usable number.
fn qualifies(record: &Record, top: &TopCategorySet) -> bool {
    top.contains(&record.job_title) && record.has_valid_salary()
}

pub fn compute_points(records: &[Record], top: &TopCategorySet, mode: PointMode) -> Vec<LinkedPoint> {
    match mode {
        PointMode::Averaged => averaged_points(records, top),
        PointMode::PerRecord => per_record_points(records, top),
    }
}

fn averaged_points(records: &[Record], top: &TopCategorySet) -> Vec<LinkedPoint> {
    let mut groups: IndexMap<(&str, &ExperienceLevel), (f64, usize)> = IndexMap::new();
    for r in records.iter().filter(|r| qualifies(r, top)) {
        let entry = groups
            .entry((r.job_title.as_str(), &r.experience))
            .or_insert((0.0, 0));
        entry.0 += r.salary_in_usd;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .enumerate()
        .map(|(i, ((category, level), (sum, count)))| LinkedPoint {
            id: PointId(i),
            category: category.to_string(),
            level: level.clone(),
            salary: sum / count as f64,
            support: count,
            remote_status: None,
            record: None,
        })
        .collect()
}

fn per_record_points(records: &[Record], top: &TopCategorySet) -> Vec<LinkedPoint> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| qualifies(r, top))
        .enumerate()
        .map(|(i, (record_idx, r))| LinkedPoint {
            id: PointId(i),
            category: r.job_title.clone(),
            level: r.experience.clone(),
            salary: r.salary_in_usd,
            support: 1,
            remote_status: Some(r.remote_status),
            record: Some(record_idx),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Axis domains
// ---------------------------------------------------------------------------

/// Finite `(min, max)` or `None` when there is no usable value.
pub fn salary_extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Domains of the three parallel axes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkedAxes {
    /// Job titles in order of first appearance among the points.
    pub categories: Vec<String>,
    /// Levels present among the points, most senior first.
    pub levels: Vec<ExperienceLevel>,
    pub salary: Option<(f64, f64)>,
}

impl LinkedAxes {
    pub fn from_points(points: &[LinkedPoint]) -> Self {
        let categories: IndexSet<&str> = points.iter().map(|p| p.category.as_str()).collect();
        let mut levels: Vec<ExperienceLevel> = points
            .iter()
            .map(|p| &p.level)
            .collect::<IndexSet<_>>()
            .into_iter()
            .cloned()
            .collect();
        // Stable: unmapped codes keep first-seen order after the known ones.
        levels.sort_by_key(ExperienceLevel::rank);

        LinkedAxes {
            categories: categories.into_iter().map(str::to_string).collect(),
            levels,
            salary: salary_extent(points.iter().map(|p| p.salary)),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregates – everything derived once per load
// ---------------------------------------------------------------------------

/// Points and axes for one [`PointMode`].
#[derive(Debug, Clone, Default)]
pub struct LinkedLayer {
    pub points: Vec<LinkedPoint>,
    pub axes: LinkedAxes,
}

impl LinkedLayer {
    fn build(records: &[Record], top: &TopCategorySet, mode: PointMode) -> Self {
        let points = compute_points(records, top, mode);
        let axes = LinkedAxes::from_points(&points);
        LinkedLayer { points, axes }
    }
}

/// Immutable derived data shared by all views.
#[derive(Debug, Clone, Default)]
pub struct Aggregates {
    pub proportions: Vec<ProportionSlice>,
    pub top_categories: TopCategorySet,
    pub averaged: LinkedLayer,
    pub per_record: LinkedLayer,
    pub bins: HistogramBins,
}

impl Aggregates {
    pub fn compute(records: &[Record], top_n: usize, histogram_ticks: usize) -> Self {
        let top_categories = compute_top_categories(records, top_n);
        Aggregates {
            proportions: compute_proportions(records),
            averaged: LinkedLayer::build(records, &top_categories, PointMode::Averaged),
            per_record: LinkedLayer::build(records, &top_categories, PointMode::PerRecord),
            top_categories,
            bins: HistogramBins::from_values(records.iter().map(|r| r.salary_in_usd), histogram_ticks),
        }
    }

    pub fn layer(&self, mode: PointMode) -> &LinkedLayer {
        match mode {
            PointMode::Averaged => &self.averaged,
            PointMode::PerRecord => &self.per_record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{raw, SalaryDataset};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn scenario() -> SalaryDataset {
        SalaryDataset::from_raw_rows(vec![
            raw("Engineer", "SE", "100000", "100"),
            raw("Engineer", "MI", "80000", "0"),
            raw("Analyst", "SE", "60000", "50"),
        ])
    }

    #[test]
    fn scenario_proportions_and_top_set() {
        let ds = scenario();
        let props = compute_proportions(&ds.records);
        assert_eq!(
            props,
            vec![
                ProportionSlice { status: RemoteStatus::Remote, count: 1 },
                ProportionSlice { status: RemoteStatus::InPerson, count: 1 },
                ProportionSlice { status: RemoteStatus::Hybrid, count: 1 },
            ]
        );

        let top = compute_top_categories(&ds.records, 10);
        assert_eq!(top.iter().collect::<Vec<_>>(), vec!["Engineer", "Analyst"]);
    }

    #[test]
    fn top_categories_break_ties_by_first_seen() {
        let ds = SalaryDataset::from_raw_rows(vec![
            raw("C", "SE", "1", "0"),
            raw("B", "SE", "1", "0"),
            raw("A", "SE", "1", "0"),
            raw("A", "SE", "1", "0"),
            raw("B", "SE", "1", "0"),
            raw("D", "SE", "1", "0"),
        ]);
        let top = compute_top_categories(&ds.records, 3);
        assert_eq!(top.iter().collect::<Vec<_>>(), vec!["B", "A", "C"]);
        assert!(!top.contains("D"));
    }

    #[test]
    fn averaged_points_take_the_mean_per_pair() {
        let ds = SalaryDataset::from_raw_rows(vec![
            raw("Engineer", "SE", "100000", "100"),
            raw("Engineer", "SE", "50000", "0"),
            raw("Engineer", "MI", "80000", "0"),
            raw("Engineer", "MI", "bad", "0"),
            raw("Rare", "SE", "999999", "0"),
        ]);
        let top = compute_top_categories(&ds.records, 1);
        let points = compute_points(&ds.records, &top, PointMode::Averaged);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].level, ExperienceLevel::Senior);
        assert_relative_eq!(points[0].salary, 75000.0);
        assert_eq!(points[0].support, 2);
        assert_relative_eq!(points[1].salary, 80000.0);
        assert_eq!(points[1].support, 1);
        assert!(points.iter().all(|p| top.contains(&p.category)));
    }

    #[test]
    fn per_record_points_skip_invalid_salaries() {
        let ds = SalaryDataset::from_raw_rows(vec![
            raw("Engineer", "SE", "100000", "100"),
            raw("Engineer", "MI", "n/a", "0"),
            raw("Analyst", "SE", "60000", "50"),
        ]);
        let top = compute_top_categories(&ds.records, 10);
        let points = compute_points(&ds.records, &top, PointMode::PerRecord);

        assert_eq!(points.len(), 2);
        assert_eq!(points[1].id, PointId(1));
        assert_eq!(points[1].record, Some(2));
        assert_eq!(points[1].remote_status, Some(RemoteStatus::Hybrid));
    }

    #[test]
    fn only_group_with_invalid_salaries_yields_no_point() {
        let ds = SalaryDataset::from_raw_rows(vec![raw("Engineer", "SE", "x", "100")]);
        let top = compute_top_categories(&ds.records, 10);
        assert!(compute_points(&ds.records, &top, PointMode::Averaged).is_empty());
    }

    #[test]
    fn axes_order_levels_by_seniority() {
        let ds = SalaryDataset::from_raw_rows(vec![
            raw("B", "EN", "10", "0"),
            raw("A", "ZZ", "30", "0"),
            raw("A", "EX", "20", "0"),
            raw("B", "MI", "f", "0"),
        ]);
        let agg = Aggregates::compute(&ds.records, 10, 20);
        let axes = &agg.layer(PointMode::PerRecord).axes;
        assert_eq!(axes.categories, vec!["B".to_string(), "A".to_string()]);
        assert_eq!(
            axes.levels,
            vec![
                ExperienceLevel::Executive,
                ExperienceLevel::Entry,
                ExperienceLevel::Other("ZZ".into()),
            ]
        );
        assert_eq!(axes.salary, Some((10.0, 30.0)));
    }

    #[test]
    fn extent_ignores_nan() {
        assert_eq!(salary_extent([f64::NAN, 3.0, 1.0]), Some((1.0, 3.0)));
        assert_eq!(salary_extent([f64::NAN]), None);
    }

    fn arb_rows() -> impl Strategy<Value = Vec<(u8, u8, u32, u8)>> {
        prop::collection::vec((0u8..15, 0u8..5, 0u32..500_000, 0u8..3), 0..80)
    }

    fn build(rows: &[(u8, u8, u32, u8)]) -> SalaryDataset {
        const LEVELS: [&str; 5] = ["EN", "MI", "SE", "EX", "??"];
        const RATIOS: [&str; 3] = ["0", "50", "100"];
        SalaryDataset::from_raw_rows(
            rows.iter()
                .map(|&(t, l, s, r)| {
                    raw(&format!("title-{t}"), LEVELS[l as usize], &s.to_string(), RATIOS[r as usize])
                })
                .collect(),
        )
    }

    proptest! {
        #[test]
        fn proportions_sum_to_total(rows in arb_rows()) {
            let ds = build(&rows);
            let total: usize = compute_proportions(&ds.records).iter().map(|s| s.count).sum();
            prop_assert_eq!(total, ds.len());
        }

        #[test]
        fn top_set_holds_the_most_frequent_titles(rows in arb_rows(), n in 1usize..12) {
            let ds = build(&rows);
            let mut counts: IndexMap<&str, usize> = IndexMap::new();
            for r in &ds.records {
                *counts.entry(r.job_title.as_str()).or_default() += 1;
            }
            let top = compute_top_categories(&ds.records, n);
            prop_assert_eq!(top.len(), n.min(counts.len()));

            let mut sorted: Vec<usize> = counts.values().copied().collect();
            sorted.sort_unstable_by(|a, b| b.cmp(a));
            if let Some(&nth) = sorted.get(top.len().saturating_sub(1)) {
                for title in top.iter() {
                    prop_assert!(counts[title] >= nth);
                }
            }
        }

        #[test]
        fn averages_match_their_records(rows in arb_rows()) {
            let ds = build(&rows);
            let top = compute_top_categories(&ds.records, 10);
            for p in compute_points(&ds.records, &top, PointMode::Averaged) {
                let matching: Vec<f64> = ds.records.iter()
                    .filter(|r| r.job_title == p.category && r.experience == p.level)
                    .map(|r| r.salary_in_usd)
                    .collect();
                prop_assert_eq!(matching.len(), p.support);
                let mean = matching.iter().sum::<f64>() / matching.len() as f64;
                prop_assert!((mean - p.salary).abs() <= 1e-6 * mean.abs().max(1.0));
            }
        }
    }
}
