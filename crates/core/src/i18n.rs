//! Localization tables for the presentation stylesheet.
//!
//! The base tables are loaded once and shared read-only. Every conversion
//! gets its own [`LabelSet`] copy; order documents then swap a fixed set of
//! labels for their `_order` variants on that copy.

use crate::error::LocalizationError;
use crate::subtype::DocumentSubtype;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::sync::Arc;
use transform2pdf_traits::ResourceProvider;

/// Labels that differ between invoices and orders.
pub const ORDER_OVERRIDE_KEYS: [&str; 7] = ["bt1", "bt2", "bt3", "bg22", "bt25", "bt26", "details"];

pub const ORDER_SUFFIX: &str = "_order";

pub const DEFAULT_LANGUAGE: &str = "de";

const EMBEDDED_TRANSLATIONS: &str = include_str!("../resources/translation.json");

static EMBEDDED: Lazy<Result<Arc<LocalizationTable>, LocalizationError>> =
    Lazy::new(|| LocalizationTable::from_json(EMBEDDED_TRANSLATIONS).map(Arc::new));

type BaseTable = BTreeMap<String, String>;

fn order_key(key: &str) -> String {
    format!("{key}{ORDER_SUFFIX}")
}

/// The resolved labels for one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    language: String,
    subtype: DocumentSubtype,
    labels: BTreeMap<String, String>,
}

impl LabelSet {
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The subtype this set was built for.
    pub fn subtype(&self) -> DocumentSubtype {
        self.subtype
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.labels.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.labels
    }
}

/// Base label tables keyed by language code.
#[derive(Debug, Clone)]
pub struct LocalizationTable {
    tables: BTreeMap<String, Arc<BaseTable>>,
    default_language: String,
}

impl LocalizationTable {
    /// The tables compiled into the binary (`de`, `en`).
    pub fn embedded() -> Result<Arc<Self>, LocalizationError> {
        (*EMBEDDED).clone()
    }

    /// Parses a `{ "<lang>": { "<key>": "<label>", ... }, ... }` document.
    pub fn from_json(json: &str) -> Result<Self, LocalizationError> {
        let raw: BTreeMap<String, BaseTable> =
            serde_json::from_str(json).map_err(|e| LocalizationError::InvalidData(e.to_string()))?;
        Self::from_tables(raw)
    }

    pub fn from_provider(
        provider: &dyn ResourceProvider,
        path: &str,
    ) -> Result<Self, LocalizationError> {
        let json = provider.load_string(path)?;
        log::info!("Loading translation tables from '{}' via {}.", path, provider.name());
        Self::from_json(&json)
    }

    /// Validates and wraps already parsed tables.
    ///
    /// Every language must carry each override key and its `_order` variant.
    pub fn from_tables(raw: BTreeMap<String, BaseTable>) -> Result<Self, LocalizationError> {
        if raw.is_empty() {
            return Err(LocalizationError::InvalidData(
                "no languages defined".to_string(),
            ));
        }

        for (language, table) in &raw {
            for key in ORDER_OVERRIDE_KEYS {
                for required in [key.to_string(), order_key(key)] {
                    if !table.contains_key(&required) {
                        return Err(LocalizationError::MissingKey {
                            language: language.clone(),
                            key: required,
                        });
                    }
                }
            }
        }

        let default_language = if raw.contains_key(DEFAULT_LANGUAGE) {
            DEFAULT_LANGUAGE.to_string()
        } else {
            // Non-empty, checked above.
            raw.keys().next().cloned().unwrap_or_default()
        };

        Ok(Self {
            tables: raw.into_iter().map(|(k, v)| (k, Arc::new(v))).collect(),
            default_language,
        })
    }

    pub fn with_default_language(mut self, language: &str) -> Result<Self, LocalizationError> {
        if !self.contains(language) {
            return Err(LocalizationError::UnknownLanguage(language.to_string()));
        }
        self.default_language = language.to_string();
        Ok(self)
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn contains(&self, language: &str) -> bool {
        self.tables.contains_key(language)
    }

    /// Read-only view of a base table.
    pub fn base(&self, language: &str) -> Option<&BTreeMap<String, String>> {
        self.tables.get(language).map(|t| t.as_ref())
    }

    /// Builds a fresh label set for `language` and `subtype`.
    pub fn label_set(
        &self,
        language: &str,
        subtype: DocumentSubtype,
    ) -> Result<LabelSet, LocalizationError> {
        let base = self
            .tables
            .get(language)
            .ok_or_else(|| LocalizationError::UnknownLanguage(language.to_string()))?;

        let mut labels = BaseTable::clone(base);
        if subtype.is_order() {
            for key in ORDER_OVERRIDE_KEYS {
                let variant = order_key(key);
                let value = labels.get(&variant).cloned().ok_or_else(|| {
                    LocalizationError::MissingKey {
                        language: language.to_string(),
                        key: variant.clone(),
                    }
                })?;
                labels.insert(key.to_string(), value);
            }
        }

        Ok(LabelSet {
            language: language.to_string(),
            subtype,
            labels,
        })
    }
}
