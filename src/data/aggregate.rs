use std::collections::HashMap;
use std::fmt;

use super::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Filter parameters supplied by the controls
// ---------------------------------------------------------------------------

/// Sentinel value the site dropdown uses for "every site".
pub const ALL_SITES: &str = "All";

/// Which launch site(s) the charts are restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// `"All"` selects every site; any other value names a single site.
    pub fn parse(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// The raw dropdown value.
    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(s) => s,
        }
    }

    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => s == site,
        }
    }
}

/// Dropdown label.
impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "All Sites"),
            SiteSelection::Site(s) => write!(f, "{s}"),
        }
    }
}

/// Current state of the dropdown and the payload slider.
///
/// `payload_range.0 <= payload_range.1` is expected but not enforced; an
/// inverted range simply selects nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParams {
    pub site: SiteSelection,
    pub payload_range: (f64, f64),
}

impl FilterParams {
    /// All sites over the dataset's full payload span.
    pub fn for_dataset(dataset: &LaunchDataset) -> Self {
        FilterParams {
            site: SiteSelection::All,
            payload_range: dataset.payload_bounds().unwrap_or((0.0, 0.0)),
        }
    }
}

// ---------------------------------------------------------------------------
// Pie: success rate per site / outcome split for one site
// ---------------------------------------------------------------------------

/// Labels and values for the pie chart. `labels[i]` pairs with `values[i]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PieData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub title: String,
}

impl PieData {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn slices(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Build the pie for the given site selection.
///
/// * `All` → one slice per site, valued at the site's mean outcome class
///   (its success rate), in order of first appearance.
/// * `Site(s)` → one slice per outcome class present at `s`, valued at its
///   relative frequency, in order of first appearance. An unknown site
///   yields no slices.
pub fn compute_pie_data(dataset: &LaunchDataset, site: &SiteSelection) -> PieData {
    match site {
        SiteSelection::All => {
            let groups = group_in_order(
                dataset
                    .records()
                    .iter()
                    .map(|r| (r.launch_site.as_str(), r.outcome_class)),
            );
            let (labels, values) = groups
                .into_iter()
                .map(|g| (g.key.to_string(), g.sum as f64 / g.count as f64))
                .unzip();
            PieData {
                labels,
                values,
                title: "Total Success Launch by Sites".to_string(),
            }
        }
        SiteSelection::Site(name) => {
            let classes: Vec<u8> = dataset
                .records()
                .iter()
                .filter(|r| r.launch_site == *name)
                .map(|r| r.outcome_class)
                .collect();
            let total = classes.len() as f64;
            let groups = group_in_order(classes.iter().map(|&c| (c, c)));
            let (labels, values) = groups
                .into_iter()
                .map(|g| (g.key.to_string(), g.count as f64 / total))
                .unzip();
            PieData {
                labels,
                values,
                title: format!("Total Success Launch by {name}"),
            }
        }
    }
}

struct Group<K> {
    key: K,
    sum: u64,
    count: u64,
}

/// Sum and count outcome classes per key, keeping first-appearance order.
fn group_in_order<K, I>(items: I) -> Vec<Group<K>>
where
    K: Copy + Eq + std::hash::Hash,
    I: IntoIterator<Item = (K, u8)>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Group<K>> = Vec::new();
    for (key, class) in items {
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(Group {
                key,
                sum: 0,
                count: 0,
            });
            groups.len() - 1
        });
        groups[slot].sum += u64::from(class);
        groups[slot].count += 1;
    }
    groups
}

// ---------------------------------------------------------------------------
// Scatter: payload vs. outcome
// ---------------------------------------------------------------------------

/// One point of the payload/outcome scatter chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterRow {
    pub payload_mass_kg: f64,
    pub outcome_class: u8,
    /// Drives point colour.
    pub booster_version_category: String,
    /// Shown on hover.
    pub launch_site: String,
}

/// Rows with `payload_min <= payload <= payload_max` at the selected site(s),
/// in dataset order. An inverted range yields no rows.
pub fn compute_scatter_rows(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    payload_min: f64,
    payload_max: f64,
) -> Vec<ScatterRow> {
    dataset
        .records()
        .iter()
        .filter(|r| payload_min <= r.payload_mass_kg && r.payload_mass_kg <= payload_max)
        .filter(|r| site.matches(&r.launch_site))
        .map(|r| ScatterRow {
            payload_mass_kg: r.payload_mass_kg,
            outcome_class: r.outcome_class,
            booster_version_category: r.booster_version_category.clone(),
            launch_site: r.launch_site.clone(),
        })
        .collect()
}

pub fn scatter_title(site: &SiteSelection) -> String {
    match site {
        SiteSelection::All => "Correlation between Payload and Success for all sites".to_string(),
        SiteSelection::Site(s) => format!("Correlation between Payload and Success for {s}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    fn abc() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("A", 2000.0, 1, "FT"),
            LaunchRecord::new("A", 8000.0, 0, "B4"),
            LaunchRecord::new("B", 3000.0, 1, "FT"),
        ])
        .unwrap()
    }

    fn launches() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("CCAFS LC-40", 0.0, 0, "v1.0"),
            LaunchRecord::new("CCAFS LC-40", 525.0, 0, "v1.0"),
            LaunchRecord::new("VAFB SLC-4E", 500.0, 0, "v1.1"),
            LaunchRecord::new("CCAFS LC-40", 2296.0, 1, "FT"),
            LaunchRecord::new("KSC LC-39A", 5300.0, 1, "FT"),
            LaunchRecord::new("KSC LC-39A", 3136.0, 1, "FT"),
            LaunchRecord::new("VAFB SLC-4E", 9600.0, 1, "B4"),
            LaunchRecord::new("CCAFS SLC-40", 3600.0, 1, "B5"),
            LaunchRecord::new("KSC LC-39A", 6070.0, 0, "B4"),
            LaunchRecord::new("CCAFS LC-40", 4428.0, 1, "FT"),
        ])
        .unwrap()
    }

    #[test]
    fn site_selection_parses_sentinel() {
        assert_eq!(SiteSelection::parse("All"), SiteSelection::All);
        assert_eq!(
            SiteSelection::parse("KSC LC-39A"),
            SiteSelection::Site("KSC LC-39A".into())
        );
        // Case matters: only the exact sentinel means every site.
        assert_eq!(SiteSelection::parse("all"), SiteSelection::Site("all".into()));
        assert_eq!(SiteSelection::All.value(), "All");
        assert_eq!(SiteSelection::All.to_string(), "All Sites");
    }

    #[test]
    fn pie_all_sites_is_mean_class_per_site() {
        let pie = compute_pie_data(&abc(), &SiteSelection::All);
        assert_eq!(pie.labels, ["A", "B"]);
        assert_eq!(pie.values, [0.5, 1.0]);
        assert_eq!(pie.title, "Total Success Launch by Sites");
    }

    #[test]
    fn pie_all_sites_has_one_slice_per_distinct_site() {
        let ds = launches();
        let pie = compute_pie_data(&ds, &SiteSelection::All);
        assert_eq!(pie.labels, ds.sites());
        assert!(pie.values.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn pie_single_site_frequencies_sum_to_one() {
        let ds = launches();
        for site in ds.sites() {
            let pie = compute_pie_data(&ds, &SiteSelection::Site(site.clone()));
            assert!((pie.total() - 1.0).abs() < 1e-9, "{site}: {:?}", pie.values);
        }
    }

    #[test]
    fn pie_single_site_pairs_labels_with_their_own_frequency() {
        // CCAFS LC-40: classes 0, 0, 1, 1 → first seen 0.
        let pie = compute_pie_data(&launches(), &SiteSelection::parse("CCAFS LC-40"));
        assert_eq!(pie.labels, ["0", "1"]);
        assert_eq!(pie.values, [0.5, 0.5]);

        // KSC LC-39A: classes 1, 1, 0 → first seen 1 with 2/3.
        let pie = compute_pie_data(&launches(), &SiteSelection::parse("KSC LC-39A"));
        assert_eq!(pie.labels, ["1", "0"]);
        assert!((pie.values[0] - 2.0 / 3.0).abs() < 1e-12);
        assert!((pie.values[1] - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(pie.title, "Total Success Launch by KSC LC-39A");
    }

    #[test]
    fn pie_unknown_site_is_empty() {
        let pie = compute_pie_data(&abc(), &SiteSelection::parse("Z"));
        assert!(pie.is_empty());
        assert!(pie.values.is_empty());
        assert_eq!(pie.slices().count(), 0);
    }

    #[test]
    fn scatter_filters_inclusive_range_in_order() {
        let rows = compute_scatter_rows(&abc(), &SiteSelection::All, 0.0, 5000.0);
        let got: Vec<(&str, f64, u8)> = rows
            .iter()
            .map(|r| (r.launch_site.as_str(), r.payload_mass_kg, r.outcome_class))
            .collect();
        assert_eq!(got, [("A", 2000.0, 1), ("B", 3000.0, 1)]);

        let edges = compute_scatter_rows(&abc(), &SiteSelection::All, 2000.0, 3000.0);
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn scatter_restricts_to_site() {
        let ds = launches();
        let site = SiteSelection::parse("KSC LC-39A");
        let rows = compute_scatter_rows(&ds, &site, 3000.0, 6000.0);
        assert_eq!(rows.len(), 2);
        for r in &rows {
            assert_eq!(r.launch_site, "KSC LC-39A");
            assert!((3000.0..=6000.0).contains(&r.payload_mass_kg));
        }
        assert_eq!(rows[0].payload_mass_kg, 5300.0);
        assert_eq!(rows[1].booster_version_category, "FT");
    }

    #[test]
    fn scatter_inverted_range_is_empty() {
        let ds = launches();
        for site in [SiteSelection::All, SiteSelection::parse("CCAFS LC-40")] {
            assert!(compute_scatter_rows(&ds, &site, 5000.0, 1000.0).is_empty());
        }
        assert!(compute_scatter_rows(&ds, &SiteSelection::All, f64::NAN, 1e9).is_empty());
    }

    #[test]
    fn scatter_unknown_site_is_empty() {
        assert!(compute_scatter_rows(&abc(), &SiteSelection::parse("Z"), 0.0, 1e9).is_empty());
    }

    #[test]
    fn repeated_calls_are_identical() {
        let ds = launches();
        let before = ds.clone();
        let site = SiteSelection::parse("VAFB SLC-4E");
        assert_eq!(compute_pie_data(&ds, &site), compute_pie_data(&ds, &site));
        assert_eq!(
            compute_scatter_rows(&ds, &site, 0.0, 10_000.0),
            compute_scatter_rows(&ds, &site, 0.0, 10_000.0)
        );
        assert_eq!(ds, before);
    }

    #[test]
    fn scatter_titles() {
        assert_eq!(
            scatter_title(&SiteSelection::All),
            "Correlation between Payload and Success for all sites"
        );
        assert_eq!(
            scatter_title(&SiteSelection::parse("VAFB SLC-4E")),
            "Correlation between Payload and Success for VAFB SLC-4E"
        );
    }

    #[test]
    fn default_params_span_dataset() {
        let params = FilterParams::for_dataset(&launches());
        assert_eq!(params.site, SiteSelection::All);
        assert_eq!(params.payload_range, (0.0, 9600.0));
    }
}
