use std::collections::{BTreeSet, HashMap};

use super::model::{Gender, NameDataset, NameRecord};

// ---------------------------------------------------------------------------
// Filter predicate: the sidebar selections
// ---------------------------------------------------------------------------

/// The user's current filter selections.
///
/// Ranges are inclusive and taken literally: an inverted range (min > max)
/// matches nothing rather than being swapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub gender: Gender,
    /// Initial letters to keep. Empty means "no letter filter".
    pub letters: BTreeSet<char>,
    pub year_min: u16,
    pub year_max: u16,
    pub rank_min: u32,
    pub rank_max: u32,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            gender: Gender::Male,
            letters: BTreeSet::new(),
            year_min: 1880,
            year_max: 2020,
            rank_min: 1,
            rank_max: 1000,
        }
    }
}

impl FilterSpec {
    /// Default selections spanning the whole of `dataset`.
    pub fn for_dataset(dataset: &NameDataset, gender: Gender) -> Self {
        let mut spec = FilterSpec {
            gender,
            ..FilterSpec::default()
        };
        if let Some((lo, hi)) = dataset.year_span {
            spec.year_min = lo;
            spec.year_max = hi;
        }
        if dataset.max_rank > 0 {
            spec.rank_max = dataset.max_rank;
        }
        spec
    }

    /// Whether a single record passes every predicate.
    pub fn matches(&self, rec: &NameRecord) -> bool {
        rec.gender == self.gender
            && (self.year_min..=self.year_max).contains(&rec.year)
            && (self.rank_min..=self.rank_max).contains(&rec.rank)
            && self.matches_letter(rec)
    }

    fn matches_letter(&self, rec: &NameRecord) -> bool {
        if self.letters.is_empty() {
            return true;
        }
        rec.initial().is_some_and(|c| self.letters.contains(&c))
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Per-name summary of the records that survived the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedRow {
    pub name: String,
    pub total_births: u64,
    /// Mean rank rounded to the nearest integer, halves away from zero.
    pub mean_rank: u32,
}

/// Records passing `spec`, in file order.
pub fn matching_records<'a>(
    dataset: &'a NameDataset,
    spec: &'a FilterSpec,
) -> impl Iterator<Item = &'a NameRecord> + 'a {
    dataset.records.iter().filter(move |rec| spec.matches(rec))
}

/// Group matching records by name and return the `top_n` names by total births.
///
/// Groups are created in the order their first record appears; the sort is
/// stable, so names with equal totals keep that order.
pub fn top_names(dataset: &NameDataset, spec: &FilterSpec, top_n: usize) -> Vec<AggregatedRow> {
    struct Group<'a> {
        name: &'a str,
        births: u64,
        rank_sum: u64,
        count: u64,
    }

    let mut groups: Vec<Group<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for rec in matching_records(dataset, spec) {
        let slot = *index.entry(rec.name.as_str()).or_insert_with(|| {
            groups.push(Group {
                name: &rec.name,
                births: 0,
                rank_sum: 0,
                count: 0,
            });
            groups.len() - 1
        });
        let g = &mut groups[slot];
        g.births += rec.births;
        g.rank_sum += u64::from(rec.rank);
        g.count += 1;
    }

    let mut rows: Vec<AggregatedRow> = groups
        .into_iter()
        .map(|g| AggregatedRow {
            name: g.name.to_string(),
            total_births: g.births,
            mean_rank: (g.rank_sum as f64 / g.count as f64).round() as u32,
        })
        .collect();

    rows.sort_by(|a, b| b.total_births.cmp(&a.total_births));
    rows.truncate(top_n);

    log::debug!(
        "top_names: gender={} letters={:?} years={}..={} ranks={}..={} -> {} rows",
        spec.gender,
        spec.letters,
        spec.year_min,
        spec.year_max,
        spec.rank_min,
        spec.rank_max,
        rows.len()
    );
    rows
}
