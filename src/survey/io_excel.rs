// Reading survey answers from Excel workbooks.

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};

use crate::survey::{io_common::Sheet, *};

/// The worksheets to read from a workbook.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SheetSelection {
    Named(Vec<String>),
    NameContains(Vec<String>),
    Single,
}

impl SheetSelection {
    pub fn from_source(cfs: &FileSource) -> SheetSelection {
        match (&cfs.excel_worksheet_name, &cfs.sheet_name_contains) {
            (Some(names), _) if !names.is_empty() => SheetSelection::Named(names.clone()),
            (_, Some(parts)) if !parts.is_empty() => SheetSelection::NameContains(parts.clone()),
            _ => SheetSelection::Single,
        }
    }

    /// The names to read, in workbook order for the pattern selection.
    pub fn select(&self, path: &str, available: &[String]) -> SurveyResult<Vec<String>> {
        match self {
            SheetSelection::Named(names) => {
                for n in names.iter() {
                    if !available.contains(n) {
                        return MissingWorksheetSnafu {
                            name: n.clone(),
                            path,
                        }
                        .fail();
                    }
                }
                Ok(names.clone())
            }
            SheetSelection::NameContains(parts) => {
                let folded: Vec<String> = parts.iter().map(|p| p.to_lowercase()).collect();
                let selected: Vec<String> = available
                    .iter()
                    .filter(|n| {
                        let n = n.to_lowercase();
                        folded.iter().any(|p| n.contains(p.as_str()))
                    })
                    .cloned()
                    .collect();
                if selected.is_empty() {
                    return MissingWorksheetSnafu {
                        name: format!("*{}*", parts.join("*|*")),
                        path,
                    }
                    .fail();
                }
                Ok(selected)
            }
            SheetSelection::Single => match available {
                [name] => Ok(vec![name.clone()]),
                _ => whatever!(
                    "{} has {} worksheets, the worksheet to read must be configured",
                    path,
                    available.len()
                ),
            },
        }
    }
}

pub fn read_excel_file(path: &str, cfs: &FileSource) -> SurveyResult<Vec<Sheet>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let available: Vec<String> = workbook.sheet_names().to_vec();
    debug!("read_excel_file: {:?}: worksheets {:?}", path, available);
    let names = SheetSelection::from_source(cfs).select(path, &available)?;

    let mut sheets: Vec<Sheet> = Vec::new();
    for name in names.iter() {
        let wrange = workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path })?
            .context(OpeningExcelSnafu { path })?;
        let sheet = read_range(name, &wrange)?;
        info!(
            "read_excel_file: {:?}: worksheet {:?}: {} rows",
            path,
            name,
            sheet.rows.len()
        );
        sheets.push(sheet);
    }
    Ok(sheets)
}

fn read_range(name: &str, wrange: &Range<DataType>) -> SurveyResult<Sheet> {
    let mut iter = wrange.rows();
    let header: Vec<Option<String>> = iter
        .next()
        .context(EmptySheetSnafu { sheet: name })?
        .iter()
        .map(read_cell)
        .collect();
    debug!("read_range: header: {:?}", header);
    let rows: Vec<Vec<Option<String>>> = iter
        .map(|row| row.iter().map(read_cell).collect())
        .collect();
    Ok(Sheet::new(name, &header, rows))
}

/// The text of a cell, as a respondent would have typed it.
pub fn read_cell(cell: &DataType) -> Option<String> {
    match cell {
        DataType::String(s) => io_common::cell_value(s),
        DataType::Int(i) => Some(i.to_string()),
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        DataType::Float(f) => Some(f.to_string()),
        DataType::Bool(b) => Some(b.to_string()),
        DataType::Empty => None,
        x => {
            warn!("read_cell: ignoring cell {:?}", x);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn numbers_read_like_text() {
        assert_eq!(read_cell(&DataType::Float(25.0)), Some("25".to_string()));
        assert_eq!(read_cell(&DataType::Float(2.5)), Some("2.5".to_string()));
        assert_eq!(read_cell(&DataType::Int(3)), Some("3".to_string()));
        assert_eq!(read_cell(&DataType::String("  ".to_string())), None);
        assert_eq!(read_cell(&DataType::Empty), None);
    }

    #[test]
    fn sheets_by_name_fragment() {
        let available = names(&["Master Sheet", "Summary", "master sheet 2"]);
        let sel = SheetSelection::NameContains(names(&["MASTER"]));
        assert_eq!(
            sel.select("x.xlsx", &available).unwrap(),
            names(&["Master Sheet", "master sheet 2"])
        );
        let sel = SheetSelection::NameContains(names(&["pivot"]));
        assert!(sel.select("x.xlsx", &available).is_err());
    }

    #[test]
    fn named_and_single_sheets() {
        let available = names(&["Master Sheet", "Summary"]);
        let sel = SheetSelection::Named(names(&["Summary"]));
        assert_eq!(sel.select("x.xlsx", &available).unwrap(), names(&["Summary"]));
        match SheetSelection::Named(names(&["Other"])).select("x.xlsx", &available) {
            Err(SurveyError::MissingWorksheet { name, .. }) => assert_eq!(name, "Other"),
            x => panic!("unexpected {:?}", x),
        }
        assert!(SheetSelection::Single.select("x.xlsx", &available).is_err());
        assert_eq!(
            SheetSelection::Single
                .select("x.xlsx", &names(&["Only"]))
                .unwrap(),
            names(&["Only"])
        );
    }

    const SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/sample_survey.xlsx");

    fn sample_source(named: Option<&[&str]>, contains: Option<&[&str]>) -> FileSource {
        FileSource {
            provider: "excel".to_string(),
            file_path: SAMPLE.to_string(),
            excel_worksheet_name: named.map(names),
            sheet_name_contains: contains.map(names),
        }
    }

    #[test]
    fn master_sheets_are_read_in_workbook_order() {
        let sheets = read_excel_file(SAMPLE, &sample_source(None, Some(&["master"]))).unwrap();
        let read: Vec<&str> = sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(read, vec!["Master Sheet 1", "master sheet 2"]);

        let first = &sheets[0];
        assert_eq!(
            first.header,
            vec!["customer name", "age", "gender", "which other brands do you buy?"]
        );
        assert_eq!(first.rows.len(), 2);
        assert_eq!(first.rows[0][3], Some("Haldirams, Bikano".to_string()));
        // The age of the second respondent is stored as a number.
        assert_eq!(first.rows[1][1], Some("25".to_string()));
        assert_eq!(sheets[1].header[0], "which other brands do you buy?");
        assert_eq!(sheets[1].rows.len(), 1);

        let columns = names(&["Customer Name", "Age", "Gender", "brands"]);
        let rows = assemble_rows(&sheets, &columns).unwrap();
        assert_eq!(rows.len(), 3);
        let ids: Vec<u64> = rows.iter().map(|r| r.row_id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(rows[1].get("Age"), Some("25"));
        assert_eq!(rows[2].get("Customer Name"), Some("Dev"));
        assert_eq!(rows[2].get("Age"), Some("18-24"));
        assert_eq!(rows[2].get("brands"), Some("Tiwari sweets"));
    }

    #[test]
    fn named_worksheet_from_workbook() {
        let sheets = read_excel_file(SAMPLE, &sample_source(Some(&["Summary"]), None)).unwrap();
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].header, vec!["total"]);
        assert_eq!(sheets[0].rows, vec![vec![Some("3".to_string())]]);

        match read_excel_file(SAMPLE, &sample_source(Some(&["Pivot"]), None)) {
            Err(SurveyError::MissingWorksheet { name, .. }) => assert_eq!(name, "Pivot"),
            x => panic!("unexpected {:?}", x),
        }
        assert!(read_excel_file(SAMPLE, &sample_source(None, None)).is_err());
    }
}
