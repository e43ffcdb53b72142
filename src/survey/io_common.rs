// Primitives shared by the spreadsheet readers.

use std::path::Path;

use response_normalizer::text;

use crate::survey::*;

/// A worksheet (or a CSV file) as it was read: a header row and the data rows.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Sheet {
    pub name: String,
    /// Normalized, case-folded header names.
    pub header: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Sheet {
    pub fn new(name: &str, raw_header: &[Option<String>], rows: Vec<Vec<Option<String>>>) -> Sheet {
        Sheet {
            name: name.to_string(),
            header: raw_header
                .iter()
                .map(|h| text::token(h.as_deref().unwrap_or("")))
                .collect(),
            rows,
        }
    }
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Blank cells are missing values.
pub fn cell_value(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn positions(header: &[String], pred: impl Fn(&str) -> bool) -> Vec<usize> {
    header
        .iter()
        .enumerate()
        .filter(|(_, h)| pred(h.as_str()))
        .map(|(idx, _)| idx)
        .collect()
}

/// Finds the index of a configured column in a header.
///
/// A header equal to the folded name wins. Otherwise exactly one header must
/// contain the name.
pub fn resolve_column(sheet: &Sheet, column: &str) -> SurveyResult<usize> {
    let wanted = text::token(column);
    if wanted.is_empty() {
        whatever!("Empty column name in the configuration")
    }
    let mut found = positions(&sheet.header, |h| h == wanted);
    if found.is_empty() {
        found = positions(&sheet.header, |h| h.contains(wanted.as_str()));
    }
    debug!(
        "resolve_column: {:?} in sheet {:?}: {:?}",
        column, sheet.name, found
    );
    match found.as_slice() {
        [idx] => Ok(*idx),
        [] => CannotFindColumnSnafu {
            column,
            sheet: sheet.name.clone(),
        }
        .fail(),
        _ => AmbiguousColumnSnafu {
            column,
            sheet: sheet.name.clone(),
            candidates: found
                .iter()
                .map(|idx| sheet.header[*idx].clone())
                .collect::<Vec<String>>(),
        }
        .fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(header: &[&str]) -> Sheet {
        let h: Vec<Option<String>> = header.iter().map(|s| cell_value(s)).collect();
        Sheet::new("Master Sheet", &h, vec![])
    }

    #[test]
    fn headers_are_normalized() {
        let s = sheet(&["  Age ", "GENDER", "", "How did the   customer hear?"]);
        assert_eq!(s.header, vec!["age", "gender", "", "how did the customer hear?"]);
    }

    #[test]
    fn exact_match_wins_over_containment() {
        let s = sheet(&["Age", "Age group of the parent"]);
        assert_eq!(resolve_column(&s, "age").unwrap(), 0);
        assert_eq!(resolve_column(&s, "group of").unwrap(), 1);
    }

    #[test]
    fn missing_and_ambiguous_columns() {
        let s = sheet(&["Brand 1", "Brand 2", "Gender"]);
        match resolve_column(&s, "motivation") {
            Err(SurveyError::CannotFindColumn { column, sheet }) => {
                assert_eq!(column, "motivation");
                assert_eq!(sheet, "Master Sheet");
            }
            x => panic!("unexpected {:?}", x),
        }
        match resolve_column(&s, "brand") {
            Err(SurveyError::AmbiguousColumn { candidates, .. }) => {
                assert_eq!(candidates, vec!["brand 1", "brand 2"]);
            }
            x => panic!("unexpected {:?}", x),
        }
        assert!(resolve_column(&s, "   ").is_err());
    }

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("/tmp/data/survey.xlsx"), "survey.xlsx");
        assert_eq!(simplify_file_name("survey.csv"), "survey.csv");
    }
}
