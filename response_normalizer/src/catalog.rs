use log::debug;
use std::collections::HashSet;

use crate::config::*;
use crate::text::{normalize_str, token};

/// The classification rules of one survey field.
///
/// A catalog is immutable once built. All its strings are stored in their
/// folded form. The order of `rules` is significant: the first matching rule
/// wins, so more specific keywords must be declared before general ones.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RuleCatalog {
    field_name: String,
    reject_values: HashSet<String>,
    exclusion_keywords: Vec<String>,
    rules: Vec<Rule>,
    fallback_keywords: Vec<String>,
    fallback_label: Option<String>,
    match_mode: MatchMode,
}

impl RuleCatalog {
    pub fn new(
        field_name: &str,
        reject_values: &[String],
        exclusion_keywords: &[String],
        rules: &[(String, String)],
        fallback_keywords: &[String],
        fallback_label: Option<String>,
        match_mode: MatchMode,
    ) -> Result<RuleCatalog, NormalizeError> {
        let field = field_name.trim().to_string();
        if field.is_empty() {
            return Err(NormalizeError::EmptyFieldName);
        }

        let mut checked_rules: Vec<Rule> = Vec::new();
        for (position, (keyword, label)) in rules.iter().enumerate() {
            let keyword = token(keyword);
            if keyword.is_empty() {
                return Err(NormalizeError::EmptyKeyword {
                    field,
                    position: position + 1,
                });
            }
            let label = normalize_str(label);
            if label.is_empty() {
                return Err(NormalizeError::EmptyLabel { field, keyword });
            }
            checked_rules.push(Rule { keyword, label });
        }

        let exclusions: Vec<String> = exclusion_keywords.iter().map(|s| token(s)).collect();
        if exclusions.iter().any(|s| s.is_empty()) {
            return Err(NormalizeError::EmptyExclusionKeyword { field });
        }

        let fallbacks: Vec<String> = fallback_keywords.iter().map(|s| token(s)).collect();
        if fallbacks.iter().any(|s| s.is_empty()) {
            return Err(NormalizeError::EmptyFallbackKeyword { field });
        }
        let fallback_label = fallback_label
            .map(|l| normalize_str(&l))
            .filter(|l| !l.is_empty());
        if !fallbacks.is_empty() && fallback_label.is_none() {
            return Err(NormalizeError::MissingFallbackLabel { field });
        }

        // The empty string is always a non-answer, it does not need to be listed.
        let rejects: HashSet<String> = reject_values
            .iter()
            .map(|s| token(s))
            .filter(|s| !s.is_empty())
            .collect();

        debug!(
            "RuleCatalog::new: field {:?}: {} rules, {} rejects, {} exclusions, {} fallbacks",
            field,
            checked_rules.len(),
            rejects.len(),
            exclusions.len(),
            fallbacks.len()
        );

        Ok(RuleCatalog {
            field_name: field,
            reject_values: rejects,
            exclusion_keywords: exclusions,
            rules: checked_rules,
            fallback_keywords: fallbacks,
            fallback_label,
            match_mode,
        })
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    pub fn fallback_label(&self) -> Option<&str> {
        self.fallback_label.as_deref()
    }

    /// True if this folded answer must be dropped before any rule is tried.
    pub fn is_rejected(&self, folded: &str) -> bool {
        folded.is_empty()
            || self.reject_values.contains(folded)
            || self
                .exclusion_keywords
                .iter()
                .any(|kw| folded.contains(kw.as_str()))
    }

    /// Classifies one answer.
    ///
    /// The steps are applied in this order, and the first one that decides wins:
    /// 1. blank answers are rejected
    /// 2. answers equal to a reject value are rejected
    /// 3. answers containing an exclusion keyword are rejected
    /// 4. the rules, in declared order
    /// 5. the fallback keywords, in declared order
    ///
    /// Anything else is unmapped.
    pub fn classify(&self, unit: &str) -> Classification {
        let folded = token(unit);
        if self.is_rejected(&folded) {
            return Classification::Rejected;
        }

        if let Some(rule) = self
            .rules
            .iter()
            .find(|r| self.keyword_matches(&r.keyword, &folded))
        {
            return Classification::Label(rule.label.clone());
        }

        if let Some(fallback_label) = self.fallback_label.as_ref() {
            if self
                .fallback_keywords
                .iter()
                .any(|kw| self.keyword_matches(kw, &folded))
            {
                return Classification::Label(fallback_label.clone());
            }
        }

        Classification::Unmapped
    }

    fn keyword_matches(&self, keyword: &str, folded: &str) -> bool {
        match self.match_mode {
            MatchMode::Substring => folded.contains(keyword),
            MatchMode::Exact => folded == keyword,
        }
    }
}

/// A survey field: how to split its answers and, optionally, how to classify them.
///
/// Fields without a catalog are passed through: each answer is its own label.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyField {
    pub descriptor: FieldDescriptor,
    pub catalog: Option<RuleCatalog>,
}

impl SurveyField {
    pub fn new(
        mut descriptor: FieldDescriptor,
        catalog: Option<RuleCatalog>,
    ) -> Result<SurveyField, NormalizeError> {
        for e in descriptor.expansions.iter_mut() {
            e.value = token(&e.value);
            e.labels = e.labels.iter().map(|l| normalize_str(l)).collect();
        }
        descriptor.validate()?;
        if let Some(c) = catalog.as_ref() {
            if c.field_name() != descriptor.name.trim() {
                return Err(NormalizeError::CatalogFieldMismatch {
                    field: descriptor.name.clone(),
                    catalog_field: c.field_name().to_string(),
                });
            }
        }
        Ok(SurveyField {
            descriptor,
            catalog,
        })
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn is_pass_through(&self) -> bool {
        self.catalog.is_none()
    }

    /// Classifies one (already split) answer of this field.
    pub fn classify(&self, unit: &str) -> UnitOutcome {
        let value = normalize_str(unit);
        let folded = token(&value);
        if folded.is_empty() {
            return UnitOutcome::Rejected;
        }
        if let Some(catalog) = self.catalog.as_ref() {
            if catalog.is_rejected(&folded) {
                return UnitOutcome::Rejected;
            }
        }
        if let Some(exp) = self
            .descriptor
            .expansions
            .iter()
            .find(|e| e.value == folded)
        {
            return UnitOutcome::Labels(exp.labels.clone());
        }
        match self.catalog.as_ref() {
            Some(catalog) => catalog.classify(&value).into(),
            None => UnitOutcome::Labels(vec![value]),
        }
    }
}

/// All the fields of a survey, in declaration order.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct CatalogSet {
    fields: Vec<SurveyField>,
}

impl CatalogSet {
    pub fn new(fields: Vec<SurveyField>) -> Result<CatalogSet, NormalizeError> {
        let mut seen: HashSet<String> = HashSet::new();
        for f in fields.iter() {
            if !seen.insert(f.name().to_string()) {
                return Err(NormalizeError::DuplicateField {
                    field: f.name().to_string(),
                });
            }
        }
        Ok(CatalogSet { fields })
    }

    pub fn fields(&self) -> &[SurveyField] {
        &self.fields
    }

    pub fn get(&self, field_name: &str) -> Option<&SurveyField> {
        self.fields.iter().find(|f| f.name() == field_name)
    }

    /// The catalog of a field. `None` either when the field is unknown or
    /// when it is a pass-through field.
    pub fn catalog_for(&self, field_name: &str) -> Option<&RuleCatalog> {
        self.get(field_name).and_then(|f| f.catalog.as_ref())
    }
}
