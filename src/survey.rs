use log::{debug, info, warn};

use response_normalizer::*;
use snafu::{prelude::*, Snafu};

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::survey::config_reader::*;
use crate::survey::io_common::{resolve_column, Sheet};

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;

#[derive(Debug, Snafu)]
pub enum SurveyError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Worksheet {name} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Worksheet {sheet} is empty"))]
    EmptySheet { sheet: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Could not find column {column:?} in {sheet}"))]
    CannotFindColumn { column: String, sheet: String },
    #[snafu(display("Column {column:?} matches several headers in {sheet}: {candidates:?}"))]
    AmbiguousColumn {
        column: String,
        sheet: String,
        candidates: Vec<String>,
    },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error writing CSV file {path}"))]
    CsvWrite { source: csv::Error, path: String },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Invalid catalog: {source}"))]
    InvalidCatalog { source: NormalizeError },
    #[snafu(display("Provider not implemented {provider:?}"))]
    UnknownProvider { provider: String },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Difference detected between calculated summary and reference summary {reference}"))]
    SummaryMismatch { reference: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SurveyResult<T> = Result<T, SurveyError>;

/// Everything a run needs beyond the configuration file.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RunOptions {
    pub config_path: String,
    pub input: Option<String>,
    pub input_type: Option<String>,
    pub excel_worksheet_name: Option<Vec<String>>,
    pub filter: ScopeFilter,
    pub out: Option<String>,
    pub export_dir: Option<String>,
    pub reference: Option<String>,
}

/// A data row, restricted to the configured columns.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyRow {
    pub row_id: RowId,
    cells: HashMap<String, Option<String>>,
}

impl SurveyRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).and_then(|c| c.as_deref())
    }
}

fn read_source(path: &str, cfs: &FileSource) -> SurveyResult<Vec<Sheet>> {
    info!("Attempting to read survey file {:?}", path);
    match cfs.provider.as_str() {
        "xlsx" | "excel" => io_excel::read_excel_file(path, cfs),
        "csv" => io_csv::read_csv_file(path),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }
}

fn required_columns(config: &SurveyConfig) -> Vec<String> {
    let rc = &config.respondent;
    let mut columns: Vec<String> = vec![rc.age_column.clone(), rc.gender_column.clone()];
    columns.extend(rc.id_column.iter().cloned());
    columns.extend(rc.screening.iter().map(|s| s.column.clone()));
    columns.extend(config.fields.iter().map(|f| f.column.clone()));
    let mut res: Vec<String> = Vec::new();
    for c in columns {
        if !res.contains(&c) {
            res.push(c);
        }
    }
    res
}

/// Concatenates the rows of all the sheets. Columns are resolved per sheet,
/// row ids keep counting across sheets.
pub fn assemble_rows(sheets: &[Sheet], columns: &[String]) -> SurveyResult<Vec<SurveyRow>> {
    let mut res: Vec<SurveyRow> = Vec::new();
    let mut next_id: u64 = 1;
    for sheet in sheets.iter() {
        let mut indexes: Vec<(String, usize)> = Vec::new();
        for c in columns.iter() {
            indexes.push((c.clone(), resolve_column(sheet, c)?));
        }
        debug!("assemble_rows: sheet {:?}: {:?}", sheet.name, indexes);
        for row in sheet.rows.iter() {
            let cells: HashMap<String, Option<String>> = indexes
                .iter()
                .map(|(c, idx)| (c.clone(), row.get(*idx).cloned().flatten()))
                .collect();
            res.push(SurveyRow {
                row_id: RowId(next_id),
                cells,
            });
            next_id += 1;
        }
    }
    Ok(res)
}

/// Keeps the rows that count as respondents.
pub fn screen_respondents(rows: &[SurveyRow], rc: &RespondentColumns) -> Respondents {
    let mut attrs: Vec<RespondentAttributes> = Vec::new();
    'rows: for row in rows.iter() {
        let age_group = text::normalize(row.get(&rc.age_column));
        let gender = text::normalize(row.get(&rc.gender_column));
        if age_group.is_empty() || gender.is_empty() {
            debug!("screen_respondents: row {}: missing age or gender", row.row_id);
            continue;
        }
        for s in rc.screening.iter() {
            let v = text::token(row.get(&s.column).unwrap_or(""));
            if v.is_empty() || s.invalid_values.iter().any(|x| text::token(x) == v) {
                debug!(
                    "screen_respondents: row {}: screened out on {:?}",
                    row.row_id, s.column
                );
                continue 'rows;
            }
        }
        let respondent = rc
            .id_column
            .as_ref()
            .map(|c| text::normalize(row.get(c)))
            .filter(|s| !s.is_empty());
        attrs.push(RespondentAttributes {
            row_id: row.row_id,
            age_group,
            gender,
            respondent,
        });
    }
    info!(
        "screen_respondents: {} respondents out of {} rows",
        attrs.len(),
        rows.len()
    );
    Respondents::new(attrs)
}

fn build_responses(
    rows: &[SurveyRow],
    respondents: &Respondents,
    fields: &[FieldConfig],
) -> Vec<RawResponse> {
    let mut res: Vec<RawResponse> = Vec::new();
    for row in rows.iter().filter(|r| respondents.get(r.row_id).is_some()) {
        for fc in fields.iter() {
            res.push(RawResponse::new(row.row_id, &fc.name, row.get(&fc.column)));
        }
    }
    res
}

/// The tables and the audit of one field.
#[derive(PartialEq, Debug, Clone)]
pub struct FieldSummary {
    pub name: String,
    pub table: CountTable,
    pub cross_tab: Option<CrossTabTable>,
    pub audit: AuditOutcome,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn cross_tab_to_json(ct: &CrossTabTable) -> JSValue {
    let cells: Vec<Vec<u64>> = ct
        .rows()
        .iter()
        .map(|g| ct.columns().iter().map(|l| ct.get(g, l)).collect())
        .collect();
    json!({
        "groupBy": ct.group_by.name(),
        "rows": ct.rows(),
        "columns": ct.columns(),
        "cells": cells
    })
}

fn audit_to_json(audit: &AuditOutcome) -> JSValue {
    match audit {
        AuditOutcome::NoUnmapped { .. } => json!({ "status": "none" }),
        AuditOutcome::Unmapped(r) => {
            let top: Vec<JSValue> = r
                .top_values
                .iter()
                .map(|(value, count)| json!({ "value": value, "count": count }))
                .collect();
            let sample: Vec<JSValue> = r
                .sample_rows
                .iter()
                .map(|u| {
                    json!({
                        "rowId": u.row_id.0,
                        "unitIndex": u.unit_index,
                        "respondent": u.respondent,
                        "ageGroup": u.age_group,
                        "gender": u.gender,
                        "value": u.raw_value
                    })
                })
                .collect();
            json!({
                "status": "present",
                "total": r.total_unmapped,
                "topValues": top,
                "sample": sample
            })
        }
    }
}

fn field_to_json(summary: &FieldSummary) -> JSValue {
    let mut m: JSMap<String, JSValue> = JSMap::new();
    m.insert("name".to_string(), json!(summary.name));
    let status = if summary.table.is_empty() { "noData" } else { "ok" };
    m.insert("status".to_string(), json!(status));
    let counts: Vec<JSValue> = summary
        .table
        .rows
        .iter()
        .map(|r| json!({ "label": r.label, "count": r.count, "percent": round2(r.percent) }))
        .collect();
    m.insert("counts".to_string(), json!(counts));
    m.insert("totalUnits".to_string(), json!(summary.table.total_units()));
    m.insert(
        "percentTotal".to_string(),
        json!(round2(summary.table.percent_total())),
    );
    m.insert("exceedsTotal".to_string(), json!(summary.table.exceeds_total()));
    if let Some(ct) = &summary.cross_tab {
        m.insert("crossTab".to_string(), cross_tab_to_json(ct));
    }
    m.insert("unmapped".to_string(), audit_to_json(&summary.audit));
    JSValue::Object(m)
}

fn filter_to_json(values: &Option<HashSet<String>>) -> JSValue {
    match values {
        Some(s) => {
            let mut v: Vec<&String> = s.iter().collect();
            v.sort();
            json!(v)
        }
        None => JSValue::Null,
    }
}

fn build_summary_js(
    config: &SurveyConfig,
    respondents: &Respondents,
    scope: &Scope,
    filter: &ScopeFilter,
    fields: &[FieldSummary],
) -> JSValue {
    let fields_js: Vec<JSValue> = fields.iter().map(field_to_json).collect();
    json!({
        "survey": {
            "name": config.output_settings.survey_name,
            "totalRespondents": respondents.len(),
            "respondentsInScope": scope.respondent_count(),
            "filters": {
                "ageGroups": filter_to_json(&filter.age_groups),
                "genders": filter_to_json(&filter.genders)
            }
        },
        "fields": fields_js
    })
}

fn log_field_summary(summary: &FieldSummary) {
    if summary.table.is_empty() {
        info!("[{}] no data", summary.name);
    } else {
        info!("[{}] {} labels", summary.name, summary.table.rows.len());
        for r in summary.table.rows.iter() {
            info!("  {:>6} {:>7.2}%  {}", r.count, r.percent, r.label);
        }
    }
    match &summary.audit {
        AuditOutcome::NoUnmapped { .. } => {}
        AuditOutcome::Unmapped(r) => {
            warn!(
                "[{}] {} unmapped responses, most frequent:",
                r.field_name, r.total_unmapped
            );
            for (value, count) in r.top_values.iter() {
                warn!("  {:>6}  {}", count, value);
            }
        }
    }
}

pub fn read_summary(path: &str) -> SurveyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_summary: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

fn write_summary(out: &Option<String>, pretty_js: &str) -> SurveyResult<()> {
    match out.as_deref() {
        None | Some("") | Some("stdout") => {
            println!("{}", pretty_js);
        }
        Some(path) => {
            fs::write(path, pretty_js).context(WritingOutputSnafu { path })?;
            info!("Summary written to {:?}", path);
        }
    }
    Ok(())
}

fn check_reference(reference: &str, pretty_js_stats: &str) -> SurveyResult<()> {
    let summary_ref = read_summary(reference)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        return SummaryMismatchSnafu { reference }.fail();
    }
    info!("The summary matches the reference {:?}", reference);
    Ok(())
}

fn export_unmapped(dir: &Path, audits: &[&AuditOutcome]) -> SurveyResult<()> {
    fs::create_dir_all(dir).context(WritingOutputSnafu {
        path: dir.display().to_string(),
    })?;
    for audit in audits.iter() {
        if let AuditOutcome::Unmapped(r) = audit {
            let p = dir.join(io_csv::unmapped_file_name(&r.field_name));
            io_csv::write_unmapped_csv(&p.display().to_string(), r)?;
        }
    }
    Ok(())
}

/// Reads the survey, classifies every field and writes the summary and the
/// unmapped exports. Returns the summary.
pub fn run_survey(opts: &RunOptions) -> SurveyResult<JSValue> {
    let config = read_config(&opts.config_path)?;
    info!("config: {:?}", config.output_settings);
    let catalogs = build_catalogs(&config)?;

    let config_p = Path::new(opts.config_path.as_str());
    let root_p = config_p.parent().context(MissingParentDirSnafu {})?;

    let sources: Vec<(String, FileSource)> = match &opts.input {
        Some(input) => {
            let cfs = FileSource {
                provider: opts
                    .input_type
                    .clone()
                    .unwrap_or_else(|| "xlsx".to_string()),
                file_path: input.clone(),
                excel_worksheet_name: opts.excel_worksheet_name.clone(),
                sheet_name_contains: None,
            };
            vec![(input.clone(), cfs)]
        }
        None => config
            .sources
            .iter()
            .map(|cfs| {
                let p: PathBuf = root_p.join(&cfs.file_path);
                (p.display().to_string(), cfs.clone())
            })
            .collect(),
    };
    if sources.is_empty() {
        whatever!("No survey file: the configuration has no source and no input was given")
    }

    let mut sheets: Vec<Sheet> = Vec::new();
    for (path, cfs) in sources.iter() {
        sheets.append(&mut read_source(path, cfs)?);
    }

    let rows = assemble_rows(&sheets, &required_columns(&config))?;
    let respondents = screen_respondents(&rows, &config.respondent);
    let responses = build_responses(&rows, &respondents, &config.fields);

    let mut pipeline = Pipeline::new(catalogs);
    let runs = pipeline.run(&responses).context(InvalidCatalogSnafu {})?;

    let scope = Scope::new(&respondents, &opts.filter);
    let auditor = UnmappedAuditor::new(
        config.output_settings.top_unmapped.unwrap_or(20),
        config.output_settings.sample_size.unwrap_or(50),
    );

    let mut summaries: Vec<FieldSummary> = Vec::new();
    for (run, fc) in runs.iter().zip(config.fields.iter()) {
        let in_scope = scope.restrict(&run.classified);
        let table = count_table(&in_scope, scope.respondent_count());
        let cross = fc
            .group_by()?
            .map(|g| cross_tab(&in_scope, &respondents, g));
        let summary = FieldSummary {
            name: run.field_name.clone(),
            table,
            cross_tab: cross,
            audit: auditor.audit(run, &respondents),
        };
        log_field_summary(&summary);
        summaries.push(summary);
    }

    let export_dir: Option<PathBuf> = match (
        &opts.export_dir,
        &config.output_settings.output_directory,
    ) {
        (Some(d), _) => Some(PathBuf::from(d)),
        (None, Some(d)) => Some(root_p.join(d)),
        (None, None) => None,
    };
    if let Some(dir) = export_dir {
        let audits: Vec<&AuditOutcome> = summaries.iter().map(|s| &s.audit).collect();
        export_unmapped(&dir, &audits)?;
    }

    let result_js = build_summary_js(&config, &respondents, &scope, &opts.filter, &summaries);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    write_summary(&opts.out, &pretty_js_stats)?;

    // The reference summary, if provided for comparison
    if let Some(reference) = &opts.reference {
        check_reference(reference, &pretty_js_stats)?;
    }

    Ok(result_js)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ANSWERS: &str = "\
Customer Name,Age,Gender,First here about Go Desi,How did the customer hear about Desi Popz?,Which other brands do you buy?
Asha,25-34,F,Yes,\"Instagram, Friend recommendation\",\"Haldirams, Tiwari sweets\"
Ravi,18-24,M,Yes,Not sure,Bikanervala
Meera,25-34,F,Not Responded,Instagram,Haldiram
Kiran,,M,Yes,Instagram,Haldiram
Dev,35-44,M,Yes,Billboard,kaju katli from haldiram
";

    const CONFIG: &str = r#"{
        "outputSettings": { "surveyName": "test survey" },
        "sources": [ { "provider": "csv", "filePath": "answers.csv" } ],
        "respondent": {
            "ageColumn": "age",
            "genderColumn": "gender",
            "idColumn": "customer name",
            "screening": [ { "column": "first here about go desi", "invalidValues": ["not responded"] } ]
        },
        "fields": [
            { "name": "discovery", "column": "how did the customer hear", "multiselect": true,
              "groupBy": "ageGroup",
              "rejectValues": ["not sure"],
              "rules": [ { "keyword": "instagram", "label": "Social Media" },
                         { "keyword": "friend", "label": "Word of Mouth" } ] },
            { "name": "brands", "column": "other brands", "multiselect": true,
              "exclusionKeywords": ["kaju katli"],
              "rules": [ { "keyword": "haldiram", "label": "Haldiram" },
                         { "keyword": "bikaner", "label": "Bikanervala" } ],
              "fallbackKeywords": ["sweets"],
              "fallbackLabel": "Local / Unbranded Sweets" }
        ]
    }"#;

    fn setup(config: &str) -> (TempDir, RunOptions) {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("answers.csv"), ANSWERS).unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, config).unwrap();
        let opts = RunOptions {
            config_path: config_path.display().to_string(),
            out: Some(dir.path().join("summary.json").display().to_string()),
            ..RunOptions::default()
        };
        (dir, opts)
    }

    fn labels(field: &JSValue) -> Vec<(String, u64)> {
        field["counts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| {
                (
                    c["label"].as_str().unwrap().to_string(),
                    c["count"].as_u64().unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn full_run_over_csv() {
        let (_dir, opts) = setup(CONFIG);
        let js = run_survey(&opts).unwrap();

        assert_eq!(js["survey"]["totalRespondents"], json!(3));
        assert_eq!(js["survey"]["respondentsInScope"], json!(3));
        assert_eq!(js["survey"]["filters"]["ageGroups"], JSValue::Null);

        let discovery = &js["fields"][0];
        assert_eq!(discovery["status"], json!("ok"));
        assert_eq!(
            labels(discovery),
            vec![
                ("Social Media".to_string(), 1),
                ("Word of Mouth".to_string(), 1)
            ]
        );
        assert_eq!(discovery["counts"][0]["percent"], json!(33.33));
        assert_eq!(discovery["percentTotal"], json!(66.67));
        assert_eq!(discovery["exceedsTotal"], json!(false));
        assert_eq!(discovery["crossTab"]["rows"], json!(["25-34"]));
        assert_eq!(discovery["crossTab"]["cells"], json!([[1, 1]]));
        assert_eq!(discovery["unmapped"]["total"], json!(1));
        assert_eq!(
            discovery["unmapped"]["topValues"],
            json!([{ "value": "billboard", "count": 1 }])
        );
        assert_eq!(discovery["unmapped"]["sample"][0]["rowId"], json!(5));
        assert_eq!(discovery["unmapped"]["sample"][0]["respondent"], json!("Dev"));

        let brands = &js["fields"][1];
        assert_eq!(
            labels(brands),
            vec![
                ("Bikanervala".to_string(), 1),
                ("Haldiram".to_string(), 1),
                ("Local / Unbranded Sweets".to_string(), 1)
            ]
        );
        assert!(brands.get("crossTab").is_none());
        assert_eq!(brands["unmapped"], json!({ "status": "none" }));

        let written = read_summary(opts.out.as_ref().unwrap()).unwrap();
        assert_eq!(written, js);
    }

    #[test]
    fn filters_restrict_the_tables_not_the_audit() {
        let (_dir, mut opts) = setup(CONFIG);
        opts.filter = ScopeFilter {
            age_groups: Some(HashSet::from(["25-34".to_string()])),
            genders: None,
        };
        let js = run_survey(&opts).unwrap();
        assert_eq!(js["survey"]["respondentsInScope"], json!(1));
        assert_eq!(js["survey"]["filters"]["ageGroups"], json!(["25-34"]));
        let discovery = &js["fields"][0];
        assert_eq!(discovery["counts"][0]["percent"], json!(100.0));
        assert_eq!(discovery["percentTotal"], json!(200.0));
        assert_eq!(discovery["exceedsTotal"], json!(true));
        assert_eq!(discovery["unmapped"]["total"], json!(1));

        opts.filter = ScopeFilter {
            age_groups: Some(HashSet::from(["65+".to_string()])),
            genders: None,
        };
        let js = run_survey(&opts).unwrap();
        assert_eq!(js["fields"][0]["status"], json!("noData"));
        assert_eq!(js["fields"][0]["counts"], json!([]));
    }

    #[test]
    fn unmapped_answers_are_exported() {
        let (dir, mut opts) = setup(CONFIG);
        let export = dir.path().join("exports");
        opts.export_dir = Some(export.display().to_string());
        run_survey(&opts).unwrap();
        let contents = fs::read_to_string(export.join("unmapped_discovery.csv")).unwrap();
        assert_eq!(
            contents,
            "row_id,unit_index,respondent,age_group,gender,value\n5,0,Dev,35-44,M,Billboard\n"
        );
        assert!(!export.join("unmapped_brands.csv").exists());
    }

    #[test]
    fn reference_summary_check() {
        let (dir, mut opts) = setup(CONFIG);
        run_survey(&opts).unwrap();
        let reference = dir.path().join("reference.json");
        fs::copy(opts.out.as_ref().unwrap(), &reference).unwrap();
        opts.reference = Some(reference.display().to_string());
        assert!(run_survey(&opts).is_ok());

        let changed = fs::read_to_string(&reference)
            .unwrap()
            .replace("test survey", "another survey");
        fs::write(&reference, changed).unwrap();
        match run_survey(&opts) {
            Err(SurveyError::SummaryMismatch { .. }) => {}
            x => panic!("expected a mismatch, got {:?}", x),
        }
    }

    #[test]
    fn configuration_errors_abort_the_run() {
        let (_dir, opts) = setup(&CONFIG.replace("other brands", "favourite colour"));
        match run_survey(&opts) {
            Err(SurveyError::CannotFindColumn { column, .. }) => {
                assert_eq!(column, "favourite colour")
            }
            x => panic!("unexpected {:?}", x),
        }
        let (_dir, opts) = setup(&CONFIG.replace("\"csv\"", "\"sav\""));
        assert!(matches!(
            run_survey(&opts),
            Err(SurveyError::UnknownProvider { .. })
        ));
    }

    #[test]
    fn rows_keep_their_ids_across_sheets() {
        let s1 = Sheet::new(
            "a",
            &[Some("Age".to_string()), Some("Brand".to_string())],
            vec![vec![Some("25-34".to_string()), Some("x".to_string())]],
        );
        let s2 = Sheet::new(
            "b",
            &[Some("Brand".to_string()), Some("Age".to_string())],
            vec![
                vec![Some("y".to_string()), Some("18-24".to_string())],
                vec![Some("z".to_string())],
            ],
        );
        let rows = assemble_rows(&[s1, s2], &["age".to_string(), "brand".to_string()]).unwrap();
        let got: Vec<(u64, Option<&str>, Option<&str>)> = rows
            .iter()
            .map(|r| (r.row_id.0, r.get("age"), r.get("brand")))
            .collect();
        assert_eq!(
            got,
            vec![
                (1, Some("25-34"), Some("x")),
                (2, Some("18-24"), Some("y")),
                (3, None, Some("z")),
            ]
        );
    }
}
