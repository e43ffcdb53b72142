pub use crate::catalog::RuleCatalog;
pub use crate::config::*;

/// A builder for rule catalogs.
///
/// Rules are kept in the order they are added: the first matching rule wins.
///
/// ```
/// pub use response_normalizer::builder::RuleCatalogBuilder;
/// pub use response_normalizer::Classification;
/// # use response_normalizer::NormalizeError;
///
/// let catalog = RuleCatalogBuilder::new("discovery")
///     .reject("not sure")
///     .rule("instagram", "Social Media")
///     .rule("friend", "Word of Mouth")
///     .build()?;
///
/// assert_eq!(catalog.classify("Instagram"), Classification::Label("Social Media".to_string()));
/// assert_eq!(catalog.classify("Not sure"), Classification::Rejected);
///
/// # Ok::<(), NormalizeError>(())
/// ```
pub struct RuleCatalogBuilder {
    pub(crate) _field_name: String,
    pub(crate) _rejects: Vec<String>,
    pub(crate) _exclusions: Vec<String>,
    pub(crate) _rules: Vec<(String, String)>,
    pub(crate) _fallbacks: Vec<String>,
    pub(crate) _fallback_label: Option<String>,
    pub(crate) _match_mode: MatchMode,
}

impl RuleCatalogBuilder {
    pub fn new(field_name: &str) -> RuleCatalogBuilder {
        RuleCatalogBuilder {
            _field_name: field_name.to_string(),
            _rejects: Vec::new(),
            _exclusions: Vec::new(),
            _rules: Vec::new(),
            _fallbacks: Vec::new(),
            _fallback_label: None,
            _match_mode: MatchMode::Substring,
        }
    }

    /// An answer that is not an answer ("not responded", "n/a"...).
    /// Compared to the whole answer.
    pub fn reject(mut self, value: &str) -> RuleCatalogBuilder {
        self._rejects.push(value.to_string());
        self
    }

    pub fn rejects(mut self, values: &[&str]) -> RuleCatalogBuilder {
        self._rejects.extend(values.iter().map(|s| s.to_string()));
        self
    }

    /// Answers containing this keyword are dropped before any rule is tried.
    pub fn exclude(mut self, keyword: &str) -> RuleCatalogBuilder {
        self._exclusions.push(keyword.to_string());
        self
    }

    pub fn rule(mut self, keyword: &str, label: &str) -> RuleCatalogBuilder {
        self._rules.push((keyword.to_string(), label.to_string()));
        self
    }

    /// Several keywords sharing the same label, tried in order.
    pub fn rules(mut self, keywords: &[&str], label: &str) -> RuleCatalogBuilder {
        for kw in keywords {
            self._rules.push((kw.to_string(), label.to_string()));
        }
        self
    }

    /// The bucket for answers that match no rule but one of the keywords.
    pub fn fallback(mut self, keywords: &[&str], label: &str) -> RuleCatalogBuilder {
        self._fallbacks.extend(keywords.iter().map(|s| s.to_string()));
        self._fallback_label = Some(label.to_string());
        self
    }

    pub fn match_mode(mut self, mode: MatchMode) -> RuleCatalogBuilder {
        self._match_mode = mode;
        self
    }

    pub fn build(self) -> Result<RuleCatalog, NormalizeError> {
        RuleCatalog::new(
            &self._field_name,
            &self._rejects,
            &self._exclusions,
            &self._rules,
            &self._fallbacks,
            self._fallback_label,
            self._match_mode,
        )
    }
}
