// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The identity of a respondent (one row of the survey).
///
/// Row ids are assigned by the reader, starting at 1, in reading order across
/// all the sheets of a survey.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct RowId(pub u64);

impl Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One cell of the survey, as read by the ingestion layer.
///
/// The raw value may be missing (empty cell) or contain several answers
/// separated by a delimiter.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawResponse {
    pub row_id: RowId,
    pub field_name: String,
    pub raw_value: Option<String>,
}

impl RawResponse {
    pub fn new(row_id: RowId, field_name: &str, raw_value: Option<&str>) -> RawResponse {
        RawResponse {
            row_id,
            field_name: field_name.to_string(),
            raw_value: raw_value.map(|s| s.to_string()),
        }
    }
}

/// The attributes of a respondent that the answers get joined to.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RespondentAttributes {
    pub row_id: RowId,
    pub age_group: String,
    pub gender: String,
    /// An identifying label (customer name, email...). Only used for audits.
    pub respondent: Option<String>,
}

/// An atomic answer extracted from a raw cell after multi-select splitting.
///
/// Invariant: `value` is normalized and non-empty, `token` is its folded form.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResponseUnit {
    pub row_id: RowId,
    pub field_name: String,
    pub unit_index: u32,
    pub value: String,
    pub token: String,
}

// ******** Output data structures *********

/// The outcome of applying a rule catalog to a single answer.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Classification {
    /// The canonical label of the first matching rule (or the fallback bucket).
    Label(String),
    /// A real answer that no rule knows about. Kept for the audit.
    Unmapped,
    /// Not an answer: blank, explicitly invalid, or excluded.
    Rejected,
}

/// The outcome of classifying a response unit for a given field.
///
/// Compared to [Classification], a unit may resolve to several labels when
/// the field declares an expansion rule for it.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum UnitOutcome {
    Labels(Vec<String>),
    Unmapped,
    Rejected,
}

impl From<Classification> for UnitOutcome {
    fn from(c: Classification) -> UnitOutcome {
        match c {
            Classification::Label(l) => UnitOutcome::Labels(vec![l]),
            Classification::Unmapped => UnitOutcome::Unmapped,
            Classification::Rejected => UnitOutcome::Rejected,
        }
    }
}

/// A response unit that received a canonical label.
///
/// Rejected and unmapped units never become classified units.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ClassifiedUnit {
    pub row_id: RowId,
    pub field_name: String,
    pub unit_index: u32,
    pub canonical_label: String,
}

/// Errors in the configuration of the catalogs. They are fatal: no partial
/// result makes sense with a broken catalog.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NormalizeError {
    EmptyFieldName,
    DuplicateField { field: String },
    UnknownField { field: String },
    EmptyDelimiter { field: String },
    EmptyKeyword { field: String, position: usize },
    EmptyLabel { field: String, keyword: String },
    EmptyExclusionKeyword { field: String },
    EmptyFallbackKeyword { field: String },
    MissingFallbackLabel { field: String },
    InvalidExpansion { field: String, value: String },
    CatalogFieldMismatch { field: String, catalog_field: String },
}

impl Error for NormalizeError {}

impl Display for NormalizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizeError::EmptyFieldName => write!(f, "a field has an empty name"),
            NormalizeError::DuplicateField { field } => {
                write!(f, "field {:?} is declared more than once", field)
            }
            NormalizeError::UnknownField { field } => {
                write!(f, "no field {:?} is declared in the catalogs", field)
            }
            NormalizeError::EmptyDelimiter { field } => {
                write!(f, "field {:?}: multiselect delimiter is empty", field)
            }
            NormalizeError::EmptyKeyword { field, position } => {
                write!(f, "field {:?}: rule #{} has an empty keyword", field, position)
            }
            NormalizeError::EmptyLabel { field, keyword } => {
                write!(f, "field {:?}: rule {:?} has an empty label", field, keyword)
            }
            NormalizeError::EmptyExclusionKeyword { field } => {
                write!(f, "field {:?}: empty exclusion keyword", field)
            }
            NormalizeError::EmptyFallbackKeyword { field } => {
                write!(f, "field {:?}: empty fallback keyword", field)
            }
            NormalizeError::MissingFallbackLabel { field } => {
                write!(
                    f,
                    "field {:?}: fallback keywords are declared without a fallback label",
                    field
                )
            }
            NormalizeError::InvalidExpansion { field, value } => {
                write!(
                    f,
                    "field {:?}: expansion {:?} needs a value and at least one label",
                    field, value
                )
            }
            NormalizeError::CatalogFieldMismatch {
                field,
                catalog_field,
            } => {
                write!(
                    f,
                    "field {:?} is given the catalog of field {:?}",
                    field, catalog_field
                )
            }
        }
    }
}

// ********* Configuration **********

/// How the keywords of a catalog are compared to an answer.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum MatchMode {
    /// The keyword appears anywhere in the answer. Handles plurals and
    /// small spelling variants that share a stem.
    Substring,
    /// The keyword is the whole answer.
    Exact,
}

/// A (keyword -> canonical label) pair. Keywords are stored folded.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Rule {
    pub keyword: String,
    pub label: String,
}

/// A literal answer that stands for several canonical labels at once
/// (for example "both").
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Expansion {
    pub value: String,
    pub labels: Vec<String>,
}

/// How the answers of a field are turned into response units.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub multiselect: bool,
    pub delimiter: String,
    pub expansions: Vec<Expansion>,
}

impl FieldDescriptor {
    pub const DEFAULT_DELIMITER: &'static str = ",";

    pub fn single(name: &str) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            multiselect: false,
            delimiter: FieldDescriptor::DEFAULT_DELIMITER.to_string(),
            expansions: Vec::new(),
        }
    }

    pub fn multiselect(name: &str) -> FieldDescriptor {
        FieldDescriptor {
            multiselect: true,
            ..FieldDescriptor::single(name)
        }
    }

    pub fn with_expansion(mut self, value: &str, labels: &[&str]) -> FieldDescriptor {
        self.expansions.push(Expansion {
            value: value.to_string(),
            labels: labels.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    pub(crate) fn validate(&self) -> Result<(), NormalizeError> {
        if self.name.trim().is_empty() {
            return Err(NormalizeError::EmptyFieldName);
        }
        if self.multiselect && self.delimiter.is_empty() {
            return Err(NormalizeError::EmptyDelimiter {
                field: self.name.clone(),
            });
        }
        for e in self.expansions.iter() {
            if e.value.is_empty() || e.labels.is_empty() || e.labels.iter().any(|l| l.is_empty())
            {
                return Err(NormalizeError::InvalidExpansion {
                    field: self.name.clone(),
                    value: e.value.clone(),
                });
            }
        }
        Ok(())
    }
}
