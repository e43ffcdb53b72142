// Primitives for reading and writing CSV files.

use response_normalizer::{UnmappedReport, UnmappedRow};

use crate::survey::{
    io_common::{cell_value, simplify_file_name, Sheet},
    *,
};

/// Reads a CSV file with its header on the first line.
pub fn read_csv_file(path: &str) -> SurveyResult<Vec<Sheet>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut records = rdr.into_records();
    let header: Vec<Option<String>> = match records.next() {
        Some(line_r) => line_r
            .context(CsvLineParseSnafu { path, lineno: 1_usize })?
            .iter()
            .map(cell_value)
            .collect(),
        None => {
            return EmptySheetSnafu {
                sheet: simplify_file_name(path),
            }
            .fail();
        }
    };
    debug!("read_csv_file: header: {:?}", header);

    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { path, lineno })?;
        let row: Vec<Option<String>> = line.iter().map(cell_value).collect();
        debug!("read_csv_file: lineno: {:?} row: {:?}", lineno, &row);
        rows.push(row);
    }
    info!("read_csv_file: {:?}: {} rows", path, rows.len());
    Ok(vec![Sheet::new(&simplify_file_name(path), &header, rows)])
}

pub fn unmapped_file_name(field_name: &str) -> String {
    format!("unmapped_{}.csv", field_name)
}

fn unmapped_record(r: &UnmappedRow) -> Vec<String> {
    vec![
        r.row_id.to_string(),
        r.unit_index.to_string(),
        r.respondent.clone().unwrap_or_default(),
        r.age_group.clone().unwrap_or_default(),
        r.gender.clone().unwrap_or_default(),
        r.raw_value.clone(),
    ]
}

/// Writes every unmapped unit of a field.
pub fn write_unmapped_csv(path: &str, report: &UnmappedReport) -> SurveyResult<()> {
    let mut wtr = csv::Writer::from_path(path).context(CsvWriteSnafu { path })?;
    wtr.write_record(["row_id", "unit_index", "respondent", "age_group", "gender", "value"])
        .context(CsvWriteSnafu { path })?;
    for r in report.full_export.iter() {
        wtr.write_record(unmapped_record(r))
            .context(CsvWriteSnafu { path })?;
    }
    wtr.flush().context(WritingOutputSnafu { path })?;
    info!(
        "write_unmapped_csv: [{}] {} rows written to {:?}",
        report.field_name,
        report.full_export.len(),
        path
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use response_normalizer::RowId;
    use std::fs;

    #[test]
    fn reads_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("answers.csv");
        fs::write(&p, "Age,Gender,Brands\n25-34,F,\"Haldiram, Bikano\"\n18-24,M\n").unwrap();
        let sheets = read_csv_file(p.to_str().unwrap()).unwrap();
        assert_eq!(sheets.len(), 1);
        let s = &sheets[0];
        assert_eq!(s.name, "answers.csv");
        assert_eq!(s.header, vec!["age", "gender", "brands"]);
        assert_eq!(s.rows.len(), 2);
        assert_eq!(s.rows[0][2], Some("Haldiram, Bikano".to_string()));
        assert_eq!(s.rows[1].len(), 2);
    }

    #[test]
    fn empty_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("empty.csv");
        fs::write(&p, "").unwrap();
        assert!(read_csv_file(p.to_str().unwrap()).is_err());
        assert!(read_csv_file(dir.path().join("missing.csv").to_str().unwrap()).is_err());
    }

    #[test]
    fn writes_unmapped_rows() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join(unmapped_file_name("brands"));
        let row = UnmappedRow {
            row_id: RowId(7),
            unit_index: 1,
            respondent: Some("Asha".to_string()),
            age_group: Some("25-34".to_string()),
            gender: None,
            raw_value: "Tiwari, the corner shop".to_string(),
        };
        let report = UnmappedReport {
            field_name: "brands".to_string(),
            total_unmapped: 1,
            top_values: vec![("tiwari, the corner shop".to_string(), 1)],
            sample_rows: vec![row.clone()],
            full_export: vec![row],
        };
        write_unmapped_csv(p.to_str().unwrap(), &report).unwrap();
        let contents = fs::read_to_string(&p).unwrap();
        assert_eq!(
            contents,
            "row_id,unit_index,respondent,age_group,gender,value\n7,1,Asha,25-34,,\"Tiwari, the corner shop\"\n"
        );
    }
}
