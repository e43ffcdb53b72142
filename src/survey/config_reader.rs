use crate::survey::*;

use response_normalizer::{
    CatalogSet, Expansion, FieldDescriptor, GroupBy, MatchMode, RuleCatalog, SurveyField,
};
use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "surveyName")]
    pub survey_name: String,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "topUnmapped")]
    pub top_unmapped: Option<usize>,
    #[serde(rename = "sampleSize")]
    pub sample_size: Option<usize>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<Vec<String>>,
    #[serde(rename = "sheetNameContains")]
    pub sheet_name_contains: Option<Vec<String>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Screening {
    pub column: String,
    #[serde(rename = "invalidValues", default)]
    pub invalid_values: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RespondentColumns {
    #[serde(rename = "ageColumn")]
    pub age_column: String,
    #[serde(rename = "genderColumn")]
    pub gender_column: String,
    #[serde(rename = "idColumn")]
    pub id_column: Option<String>,
    #[serde(default)]
    pub screening: Vec<Screening>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RuleEntry {
    pub keyword: String,
    pub label: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ExpansionEntry {
    pub value: String,
    pub labels: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    pub column: String,
    pub multiselect: Option<bool>,
    pub delimiter: Option<String>,
    #[serde(rename = "matchMode")]
    pub _match_mode: Option<String>,
    #[serde(rename = "groupBy")]
    pub _group_by: Option<String>,
    #[serde(rename = "rejectValues", default)]
    pub reject_values: Vec<String>,
    #[serde(rename = "exclusionKeywords", default)]
    pub exclusion_keywords: Vec<String>,
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
    #[serde(rename = "fallbackKeywords", default)]
    pub fallback_keywords: Vec<String>,
    #[serde(rename = "fallbackLabel")]
    pub fallback_label: Option<String>,
    #[serde(default)]
    pub expansions: Vec<ExpansionEntry>,
    #[serde(rename = "passThrough")]
    pub pass_through: Option<bool>,
}

impl FieldConfig {
    pub fn match_mode(&self) -> SurveyResult<MatchMode> {
        match self._match_mode.as_deref() {
            None | Some("substring") => Ok(MatchMode::Substring),
            Some("exact") => Ok(MatchMode::Exact),
            Some(x) => whatever!("field {}: unknown match mode {:?}", self.name, x),
        }
    }

    pub fn group_by(&self) -> SurveyResult<Option<GroupBy>> {
        match self._group_by.as_deref() {
            None => Ok(None),
            Some("ageGroup") | Some("age") => Ok(Some(GroupBy::AgeGroup)),
            Some("gender") => Ok(Some(GroupBy::Gender)),
            Some(x) => whatever!("field {}: unknown groupBy {:?}", self.name, x),
        }
    }

    /// A field without any rule is counted as it is.
    pub fn is_pass_through(&self) -> bool {
        self.pass_through.unwrap_or(false)
            || (self.rules.is_empty()
                && self.reject_values.is_empty()
                && self.exclusion_keywords.is_empty()
                && self.fallback_keywords.is_empty())
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SurveyConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(default)]
    pub sources: Vec<FileSource>,
    pub respondent: RespondentColumns,
    pub fields: Vec<FieldConfig>,
}

pub fn read_config(path: &str) -> SurveyResult<SurveyConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> SurveyResult<SurveyConfig> {
    let config: SurveyConfig = serde_json::from_str(contents).context(ParsingJsonSnafu {})?;
    debug!("parse_config: {:?}", config);
    Ok(config)
}

fn build_field(fc: &FieldConfig) -> SurveyResult<SurveyField> {
    let descriptor = FieldDescriptor {
        name: fc.name.clone(),
        multiselect: fc.multiselect.unwrap_or(false),
        delimiter: fc
            .delimiter
            .clone()
            .unwrap_or_else(|| FieldDescriptor::DEFAULT_DELIMITER.to_string()),
        expansions: fc
            .expansions
            .iter()
            .map(|e| Expansion {
                value: e.value.clone(),
                labels: e.labels.clone(),
            })
            .collect(),
    };
    let catalog = if fc.is_pass_through() {
        None
    } else {
        let rules: Vec<(String, String)> = fc
            .rules
            .iter()
            .map(|r| (r.keyword.clone(), r.label.clone()))
            .collect();
        let c = RuleCatalog::new(
            &fc.name,
            &fc.reject_values,
            &fc.exclusion_keywords,
            &rules,
            &fc.fallback_keywords,
            fc.fallback_label.clone(),
            fc.match_mode()?,
        )
        .context(InvalidCatalogSnafu {})?;
        Some(c)
    };
    SurveyField::new(descriptor, catalog).context(InvalidCatalogSnafu {})
}

/// Builds and checks all the catalogs. Any error aborts the run.
pub fn build_catalogs(config: &SurveyConfig) -> SurveyResult<CatalogSet> {
    let mut fields: Vec<SurveyField> = Vec::new();
    for fc in config.fields.iter() {
        fc.group_by()?;
        fields.push(build_field(fc)?);
    }
    CatalogSet::new(fields).context(InvalidCatalogSnafu {})
}
