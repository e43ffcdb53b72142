pub mod aggregate;
pub mod audit;
pub mod builder;
pub mod catalog;
mod config;
pub mod manual;
pub mod text;

use log::{debug, info};

use std::collections::HashMap;

pub use crate::aggregate::{
    count_table, count_table_distinct, cross_tab, CountRow, CountTable, CrossTabTable, GroupBy,
    Respondents, Scope, ScopeFilter,
};
pub use crate::audit::{AuditOutcome, UnmappedAuditor, UnmappedReport, UnmappedRow};
pub use crate::catalog::{CatalogSet, RuleCatalog, SurveyField};
pub use crate::config::*;

/// The result of running one field through the pipeline.
///
/// `units` and `outcomes` are parallel: `outcomes[i]` is the classification
/// of `units[i]`.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FieldRun {
    pub field_name: String,
    pub units: Vec<ResponseUnit>,
    pub outcomes: Vec<UnitOutcome>,
    pub classified: Vec<ClassifiedUnit>,
    pub rejected: usize,
}

impl FieldRun {
    pub fn unmapped_units(&self) -> impl Iterator<Item = &ResponseUnit> {
        self.units
            .iter()
            .zip(self.outcomes.iter())
            .filter(|(_, o)| matches!(o, UnitOutcome::Unmapped))
            .map(|(u, _)| u)
    }

    pub fn unmapped_count(&self) -> usize {
        self.unmapped_units().count()
    }
}

/// Runs the split -> classify sequence for every field of a catalog set.
///
/// Classification is a pure function of (field, answer): outcomes are
/// memoized per field for the lifetime of the pipeline.
pub struct Pipeline {
    catalogs: CatalogSet,
    cache: HashMap<String, HashMap<String, UnitOutcome>>,
}

impl Pipeline {
    pub fn new(catalogs: CatalogSet) -> Pipeline {
        Pipeline {
            catalogs,
            cache: HashMap::new(),
        }
    }

    pub fn catalogs(&self) -> &CatalogSet {
        &self.catalogs
    }

    /// Runs a single field, without any memoization.
    pub fn run_field_once(field: &SurveyField, responses: &[RawResponse]) -> FieldRun {
        let mut cache: HashMap<String, UnitOutcome> = HashMap::new();
        run_field_cached(field, responses, &mut cache)
    }

    /// Runs the field with the given name over the responses that belong to it.
    /// Responses of other fields are ignored.
    pub fn run_field(
        &mut self,
        field_name: &str,
        responses: &[RawResponse],
    ) -> Result<FieldRun, NormalizeError> {
        let field = self
            .catalogs
            .get(field_name)
            .ok_or_else(|| NormalizeError::UnknownField {
                field: field_name.to_string(),
            })?;
        let cache = self.cache.entry(field_name.to_string()).or_default();
        let own: Vec<RawResponse> = responses
            .iter()
            .filter(|r| r.field_name == field_name)
            .cloned()
            .collect();
        Ok(run_field_cached(field, &own, cache))
    }

    /// Runs all the fields, in declaration order.
    ///
    /// Every response must belong to a declared field.
    pub fn run(&mut self, responses: &[RawResponse]) -> Result<Vec<FieldRun>, NormalizeError> {
        if let Some(r) = responses
            .iter()
            .find(|r| self.catalogs.get(&r.field_name).is_none())
        {
            return Err(NormalizeError::UnknownField {
                field: r.field_name.clone(),
            });
        }
        info!(
            "Pipeline::run: processing {} responses over {} fields",
            responses.len(),
            self.catalogs.fields().len()
        );
        let names: Vec<String> = self
            .catalogs
            .fields()
            .iter()
            .map(|f| f.name().to_string())
            .collect();
        let mut runs: Vec<FieldRun> = Vec::new();
        for name in names {
            runs.push(self.run_field(&name, responses)?);
        }
        Ok(runs)
    }
}

fn run_field_cached(
    field: &SurveyField,
    responses: &[RawResponse],
    cache: &mut HashMap<String, UnitOutcome>,
) -> FieldRun {
    let field_name = field.name().to_string();
    let mut units: Vec<ResponseUnit> = Vec::new();
    let mut outcomes: Vec<UnitOutcome> = Vec::new();
    let mut classified: Vec<ClassifiedUnit> = Vec::new();
    let mut rejected: usize = 0;

    for r in responses.iter() {
        let pieces = text::split_response(r.raw_value.as_deref(), &field.descriptor);
        for (idx, value) in pieces.into_iter().enumerate() {
            let unit_index = idx as u32;
            let outcome = cache
                .entry(value.clone())
                .or_insert_with(|| field.classify(&value))
                .clone();
            debug!(
                "run_field: field {:?} row {} unit {}: {:?} -> {:?}",
                field_name, r.row_id, unit_index, value, outcome
            );
            match &outcome {
                UnitOutcome::Labels(labels) => {
                    for l in labels.iter() {
                        classified.push(ClassifiedUnit {
                            row_id: r.row_id,
                            field_name: field_name.clone(),
                            unit_index,
                            canonical_label: l.clone(),
                        });
                    }
                }
                UnitOutcome::Rejected => {
                    rejected += 1;
                }
                UnitOutcome::Unmapped => {}
            }
            units.push(ResponseUnit {
                row_id: r.row_id,
                field_name: field_name.clone(),
                unit_index,
                token: text::fold_case(&value),
                value,
            });
            outcomes.push(outcome);
        }
    }

    let run = FieldRun {
        field_name,
        units,
        outcomes,
        classified,
        rejected,
    };
    info!(
        "run_field: field {:?}: {} units, {} classified, {} rejected, {} unmapped",
        run.field_name,
        run.units.len(),
        run.classified.len(),
        run.rejected,
        run.unmapped_count()
    );
    run
}
