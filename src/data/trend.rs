use std::collections::BTreeMap;

use super::model::{Gender, NameDataset};

/// Yearly totals for one name/gender, keyed and therefore ordered by year.
///
/// Duplicate rows for the same year are merged: births add up and the best
/// (lowest) rank wins.
fn yearly(dataset: &NameDataset, name: &str, gender: Gender) -> BTreeMap<u16, (u32, u64)> {
    let mut years: BTreeMap<u16, (u32, u64)> = BTreeMap::new();
    for rec in dataset
        .records
        .iter()
        .filter(|r| r.gender == gender && r.name == name)
    {
        let entry = years.entry(rec.year).or_insert((rec.rank, 0));
        entry.0 = entry.0.min(rec.rank);
        entry.1 += rec.births;
    }
    years
}

/// `(year, rank)` pairs in year order. Lower rank is more popular, so charts
/// should draw this on a reversed axis.
pub fn rank_series(dataset: &NameDataset, name: &str, gender: Gender) -> Vec<(u16, u32)> {
    yearly(dataset, name, gender)
        .into_iter()
        .map(|(year, (rank, _))| (year, rank))
        .collect()
}

/// `(year, births)` pairs in year order.
pub fn births_series(dataset: &NameDataset, name: &str, gender: Gender) -> Vec<(u16, u64)> {
    yearly(dataset, name, gender)
        .into_iter()
        .map(|(year, (_, births))| (year, births))
        .collect()
}

/// One labelled births-over-time line of the comparison chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSeries {
    pub name: String,
    pub points: Vec<(u16, u64)>,
}

/// Births series for every selected name, in selection order.
///
/// An empty selection gives an empty chart. Names with no records for
/// `gender` still get an (empty) series so the legend matches the selection.
pub fn comparison_series<S: AsRef<str>>(
    dataset: &NameDataset,
    names: &[S],
    gender: Gender,
) -> Vec<NameSeries> {
    names
        .iter()
        .map(|name| NameSeries {
            name: name.as_ref().to_string(),
            points: births_series(dataset, name.as_ref(), gender),
        })
        .collect()
}
