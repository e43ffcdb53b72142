//! Count tables and cross tabulations over classified units.
//!
//! Percentages are always relative to the number of respondents in scope,
//! not to the number of units: a multi-select field produces more units than
//! respondents and its percentages may add up to more than 100%.

use log::{debug, warn};
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::config::*;

/// The attribute table of the respondents, keyed by row id.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Respondents {
    by_id: HashMap<RowId, RespondentAttributes>,
    order: Vec<RowId>,
}

impl Respondents {
    pub fn new(attrs: Vec<RespondentAttributes>) -> Respondents {
        let mut by_id: HashMap<RowId, RespondentAttributes> = HashMap::new();
        let mut order: Vec<RowId> = Vec::new();
        for a in attrs {
            if by_id.contains_key(&a.row_id) {
                warn!("Respondents::new: duplicate row id {}, keeping the first one", a.row_id);
                continue;
            }
            order.push(a.row_id);
            by_id.insert(a.row_id, a);
        }
        Respondents { by_id, order }
    }

    pub fn get(&self, row_id: RowId) -> Option<&RespondentAttributes> {
        self.by_id.get(&row_id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The respondents, in reading order.
    pub fn iter(&self) -> impl Iterator<Item = &RespondentAttributes> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }
}

/// The attribute used to split a cross tabulation.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum GroupBy {
    AgeGroup,
    Gender,
}

impl GroupBy {
    pub fn value<'a>(&self, attrs: &'a RespondentAttributes) -> &'a str {
        match self {
            GroupBy::AgeGroup => &attrs.age_group,
            GroupBy::Gender => &attrs.gender,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GroupBy::AgeGroup => "ageGroup",
            GroupBy::Gender => "gender",
        }
    }
}

/// Restrictions on the respondents. `None` means no restriction.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ScopeFilter {
    pub age_groups: Option<HashSet<String>>,
    pub genders: Option<HashSet<String>>,
}

impl ScopeFilter {
    pub fn accepts(&self, attrs: &RespondentAttributes) -> bool {
        let ok_age = self
            .age_groups
            .as_ref()
            .map_or(true, |s| s.contains(&attrs.age_group));
        let ok_gender = self
            .genders
            .as_ref()
            .map_or(true, |s| s.contains(&attrs.gender));
        ok_age && ok_gender
    }
}

/// The respondents that pass the current filters.
///
/// Filtering happens here, before aggregation: the tables only ever see the
/// units of in-scope respondents.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Scope {
    row_ids: HashSet<RowId>,
}

impl Scope {
    pub fn new(respondents: &Respondents, filter: &ScopeFilter) -> Scope {
        let row_ids: HashSet<RowId> = respondents
            .iter()
            .filter(|a| filter.accepts(a))
            .map(|a| a.row_id)
            .collect();
        debug!(
            "Scope::new: {} of {} respondents in scope",
            row_ids.len(),
            respondents.len()
        );
        Scope { row_ids }
    }

    pub fn all(respondents: &Respondents) -> Scope {
        Scope::new(respondents, &ScopeFilter::default())
    }

    pub fn respondent_count(&self) -> usize {
        self.row_ids.len()
    }

    pub fn contains(&self, row_id: RowId) -> bool {
        self.row_ids.contains(&row_id)
    }

    pub fn restrict(&self, units: &[ClassifiedUnit]) -> Vec<ClassifiedUnit> {
        units
            .iter()
            .filter(|u| self.contains(u.row_id))
            .cloned()
            .collect()
    }
}

/// One line of a count table.
#[derive(PartialEq, Debug, Clone)]
pub struct CountRow {
    pub label: String,
    pub count: u64,
    pub percent: f64,
}

/// Number of units per canonical label.
#[derive(PartialEq, Debug, Clone)]
pub struct CountTable {
    pub rows: Vec<CountRow>,
    pub respondents_in_scope: usize,
}

impl CountTable {
    /// No data to show. Renderers must display this state explicitly.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_units(&self) -> u64 {
        self.rows.iter().map(|r| r.count).sum()
    }

    pub fn percent_total(&self) -> f64 {
        self.rows.iter().map(|r| r.percent).sum()
    }

    /// True when the labels add up to more than the respondents, which happens
    /// with multi-select answers.
    pub fn exceeds_total(&self) -> bool {
        self.total_units() > self.respondents_in_scope as u64
    }

    pub fn get(&self, label: &str) -> Option<&CountRow> {
        self.rows.iter().find(|r| r.label == label)
    }
}

pub fn percent(count: u64, respondents_in_scope: usize) -> f64 {
    if respondents_in_scope == 0 {
        0.0
    } else {
        (count as f64) / (respondents_in_scope as f64) * 100.0
    }
}

/// Counts the units per label. Every unit counts, including several units of
/// the same respondent carrying the same label.
pub fn count_table(units: &[ClassifiedUnit], respondents_in_scope: usize) -> CountTable {
    build_count_table(
        units.iter().map(|u| u.canonical_label.as_str()),
        respondents_in_scope,
    )
}

/// Counts each (respondent, label) pair at most once.
pub fn count_table_distinct(units: &[ClassifiedUnit], respondents_in_scope: usize) -> CountTable {
    let mut seen: HashSet<(RowId, &str)> = HashSet::new();
    let labels = units
        .iter()
        .filter(|u| seen.insert((u.row_id, u.canonical_label.as_str())))
        .map(|u| u.canonical_label.as_str())
        .collect::<Vec<&str>>();
    build_count_table(labels.into_iter(), respondents_in_scope)
}

fn build_count_table<'a>(
    labels: impl Iterator<Item = &'a str>,
    respondents_in_scope: usize,
) -> CountTable {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for l in labels {
        *counts.entry(l).or_insert(0) += 1;
    }
    let mut rows: Vec<CountRow> = counts
        .into_iter()
        .map(|(label, count)| CountRow {
            label: label.to_string(),
            count,
            percent: percent(count, respondents_in_scope),
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    CountTable {
        rows,
        respondents_in_scope,
    }
}

/// Counts per (group value, label).
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CrossTabTable {
    pub group_by: GroupBy,
    cells: HashMap<(String, String), u64>,
    rows: Vec<String>,
    columns: Vec<String>,
}

impl CrossTabTable {
    pub fn get(&self, group: &str, label: &str) -> u64 {
        self.cells
            .get(&(group.to_string(), label.to_string()))
            .cloned()
            .unwrap_or(0)
    }

    /// The group values, sorted.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// The labels, most frequent first.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn percent(&self, group: &str, label: &str, respondents_in_scope: usize) -> f64 {
        percent(self.get(group, label), respondents_in_scope)
    }
}

/// Joins the units to the respondents and counts them per group and label.
///
/// Units whose respondent is unknown are skipped.
pub fn cross_tab(
    units: &[ClassifiedUnit],
    respondents: &Respondents,
    group_by: GroupBy,
) -> CrossTabTable {
    let mut cells: HashMap<(String, String), u64> = HashMap::new();
    let mut groups: BTreeSet<String> = BTreeSet::new();
    let mut label_totals: HashMap<String, u64> = HashMap::new();
    for u in units.iter() {
        let attrs = match respondents.get(u.row_id) {
            Some(a) => a,
            None => {
                warn!(
                    "cross_tab: field {:?}: no respondent for row {}, skipping",
                    u.field_name, u.row_id
                );
                continue;
            }
        };
        let group = group_by.value(attrs).to_string();
        groups.insert(group.clone());
        *label_totals.entry(u.canonical_label.clone()).or_insert(0) += 1;
        *cells.entry((group, u.canonical_label.clone())).or_insert(0) += 1;
    }
    let mut columns: Vec<(String, u64)> = label_totals.into_iter().collect();
    columns.sort_by(|(l1, c1), (l2, c2)| c2.cmp(c1).then_with(|| l1.cmp(l2)));
    CrossTabTable {
        group_by,
        cells,
        rows: groups.into_iter().collect(),
        columns: columns.into_iter().map(|p| p.0).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(id: u64, age: &str, gender: &str) -> RespondentAttributes {
        RespondentAttributes {
            row_id: RowId(id),
            age_group: age.to_string(),
            gender: gender.to_string(),
            respondent: None,
        }
    }

    fn unit(id: u64, idx: u32, label: &str) -> ClassifiedUnit {
        ClassifiedUnit {
            row_id: RowId(id),
            field_name: "discovery".to_string(),
            unit_index: idx,
            canonical_label: label.to_string(),
        }
    }

    #[test]
    fn percentages_use_respondents_as_base() {
        // 10 respondents, 3 of them give two answers with different labels.
        let respondents = Respondents::new((1..=10).map(|i| attrs(i, "25-34", "F")).collect());
        let units = vec![
            unit(1, 0, "Social Media"),
            unit(1, 1, "Word of Mouth"),
            unit(2, 0, "Social Media"),
            unit(2, 1, "Word of Mouth"),
            unit(3, 0, "Social Media"),
            unit(3, 1, "E-commerce"),
        ];
        let scope = Scope::all(&respondents);
        let table = count_table(&scope.restrict(&units), scope.respondent_count());
        assert_eq!(table.total_units(), 6);
        assert_eq!(table.respondents_in_scope, 10);
        let sm = table.get("Social Media").unwrap();
        assert_eq!(sm.count, 3);
        assert!((sm.percent - 30.0).abs() < 1e-9);
        assert!((table.percent_total() - 60.0).abs() < 1e-9);
        assert!(!table.exceeds_total());
        // Ordered by count, then label.
        let labels: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Social Media", "Word of Mouth", "E-commerce"]);
    }

    #[test]
    fn multiselect_totals_can_exceed_100_percent() {
        let respondents = Respondents::new(vec![attrs(1, "18-24", "M"), attrs(2, "18-24", "F")]);
        let units = vec![
            unit(1, 0, "A"),
            unit(1, 1, "B"),
            unit(2, 0, "A"),
            unit(2, 1, "C"),
        ];
        let table = count_table(&units, respondents.len());
        assert!((table.percent_total() - 200.0).abs() < 1e-9);
        assert!(table.exceeds_total());
    }

    #[test]
    fn same_label_twice_counts_twice_unless_distinct() {
        let units = vec![unit(1, 0, "Haldiram"), unit(1, 1, "Haldiram")];
        assert_eq!(count_table(&units, 1).get("Haldiram").unwrap().count, 2);
        assert_eq!(
            count_table_distinct(&units, 1).get("Haldiram").unwrap().count,
            1
        );
    }

    #[test]
    fn empty_scope_gives_explicit_empty_table() {
        let table = count_table(&[], 0);
        assert!(table.is_empty());
        assert_eq!(table.percent_total(), 0.0);
        assert_eq!(percent(3, 0), 0.0);
    }

    #[test]
    fn filters_restrict_the_respondents() {
        let respondents = Respondents::new(vec![
            attrs(1, "18-24", "M"),
            attrs(2, "25-34", "F"),
            attrs(3, "25-34", "M"),
        ]);
        let filter = ScopeFilter {
            age_groups: Some(["25-34".to_string()].into_iter().collect()),
            genders: None,
        };
        let scope = Scope::new(&respondents, &filter);
        assert_eq!(scope.respondent_count(), 2);
        let units = vec![unit(1, 0, "A"), unit(2, 0, "A"), unit(3, 0, "B")];
        let table = count_table(&scope.restrict(&units), scope.respondent_count());
        assert_eq!(table.get("A").unwrap().count, 1);
        assert!((table.get("A").unwrap().percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn cross_tab_joins_on_row_id() {
        let respondents = Respondents::new(vec![attrs(7, "25-34", "F"), attrs(8, "18-24", "M")]);
        let before = cross_tab(&[unit(8, 0, "Social Media")], &respondents, GroupBy::AgeGroup);
        assert_eq!(before.get("25-34", "Social Media"), 0);
        let units = vec![unit(8, 0, "Social Media"), unit(7, 0, "Social Media")];
        let after = cross_tab(&units, &respondents, GroupBy::AgeGroup);
        assert_eq!(after.get("25-34", "Social Media"), 1);
        assert_eq!(after.get("18-24", "Social Media"), 1);
        assert_eq!(after.rows(), &["18-24".to_string(), "25-34".to_string()]);
        assert_eq!(after.columns(), &["Social Media".to_string()]);
        assert!((after.percent("25-34", "Social Media", 2) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn cross_tab_skips_unknown_respondents() {
        let respondents = Respondents::new(vec![attrs(1, "25-34", "F")]);
        let units = vec![unit(1, 0, "A"), unit(99, 0, "A")];
        let t = cross_tab(&units, &respondents, GroupBy::Gender);
        assert_eq!(t.get("F", "A"), 1);
        assert_eq!(t.rows().len(), 1);
    }
}
