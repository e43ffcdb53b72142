//! Reporting of the answers that no rule could classify.
//!
//! The audit is the channel through which a catalog gets maintained: every
//! unmapped answer is kept, counted and exported with enough context to be
//! traced back to its respondent.

use log::{debug, info};
use std::collections::HashMap;

use crate::aggregate::Respondents;
use crate::config::*;
use crate::FieldRun;

/// A row of the audit, one per unmapped response unit.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct UnmappedRow {
    pub row_id: RowId,
    pub unit_index: u32,
    pub respondent: Option<String>,
    pub age_group: Option<String>,
    pub gender: Option<String>,
    pub raw_value: String,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct UnmappedReport {
    pub field_name: String,
    pub total_unmapped: usize,
    /// Distinct folded answers, most frequent first.
    pub top_values: Vec<(String, u64)>,
    pub sample_rows: Vec<UnmappedRow>,
    pub full_export: Vec<UnmappedRow>,
}

/// The result of auditing a field.
///
/// "Nothing to report" is its own state: a catalog that covers every answer
/// is not the same thing as a report that lost its rows.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum AuditOutcome {
    NoUnmapped { field_name: String },
    Unmapped(UnmappedReport),
}

impl AuditOutcome {
    pub fn field_name(&self) -> &str {
        match self {
            AuditOutcome::NoUnmapped { field_name } => field_name,
            AuditOutcome::Unmapped(r) => &r.field_name,
        }
    }

    pub fn total_unmapped(&self) -> usize {
        match self {
            AuditOutcome::NoUnmapped { .. } => 0,
            AuditOutcome::Unmapped(r) => r.total_unmapped,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct UnmappedAuditor {
    pub top_n: usize,
    pub sample_size: usize,
}

impl Default for UnmappedAuditor {
    fn default() -> Self {
        UnmappedAuditor {
            top_n: 20,
            sample_size: 50,
        }
    }
}

impl UnmappedAuditor {
    pub fn new(top_n: usize, sample_size: usize) -> UnmappedAuditor {
        UnmappedAuditor { top_n, sample_size }
    }

    /// Collects the unmapped units of a field run.
    ///
    /// Rejected units are not part of the audit. The field run is left untouched.
    pub fn audit(&self, run: &FieldRun, respondents: &Respondents) -> AuditOutcome {
        let unmapped: Vec<&ResponseUnit> = run.unmapped_units().collect();
        debug!(
            "audit: field {:?}: {} units, {} unmapped",
            run.field_name,
            run.units.len(),
            unmapped.len()
        );
        if unmapped.is_empty() {
            info!("audit: [{}] no unmapped responses", run.field_name);
            return AuditOutcome::NoUnmapped {
                field_name: run.field_name.clone(),
            };
        }

        // Counts, keeping the order of first appearance to break ties.
        let mut counts: HashMap<&str, (u64, usize)> = HashMap::new();
        for (pos, u) in unmapped.iter().enumerate() {
            let e = counts.entry(u.token.as_str()).or_insert((0, pos));
            e.0 += 1;
        }
        let mut top_values: Vec<(&str, (u64, usize))> = counts.into_iter().collect();
        top_values.sort_by(|(_, (c1, p1)), (_, (c2, p2))| c2.cmp(c1).then(p1.cmp(p2)));
        let top_values: Vec<(String, u64)> = top_values
            .into_iter()
            .take(self.top_n)
            .map(|(s, (c, _))| (s.to_string(), c))
            .collect();

        let full_export: Vec<UnmappedRow> = unmapped
            .iter()
            .map(|u| {
                let attrs = respondents.get(u.row_id);
                UnmappedRow {
                    row_id: u.row_id,
                    unit_index: u.unit_index,
                    respondent: attrs.and_then(|a| a.respondent.clone()),
                    age_group: attrs.map(|a| a.age_group.clone()),
                    gender: attrs.map(|a| a.gender.clone()),
                    raw_value: u.value.clone(),
                }
            })
            .collect();
        let sample_rows: Vec<UnmappedRow> =
            full_export.iter().take(self.sample_size).cloned().collect();

        AuditOutcome::Unmapped(UnmappedReport {
            field_name: run.field_name.clone(),
            total_unmapped: full_export.len(),
            top_values,
            sample_rows,
            full_export,
        })
    }
}
