//! Locale-keyed text values

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A locale code such as `en` or `pt_BR`
pub type LocaleCode = String;

/// Text keyed by locale (title, subtitle, abstract, representation name)
///
/// Iteration is ordered by locale code so serialized output is stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<LocaleCode, String>);

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a value holding a single locale
    pub fn single(locale: impl Into<LocaleCode>, value: impl Into<String>) -> Self {
        let mut text = Self::new();
        text.set(locale, value);
        text
    }

    /// Set the value for a locale, replacing any previous value
    pub fn set(&mut self, locale: impl Into<LocaleCode>, value: impl Into<String>) {
        self.0.insert(locale.into(), value.into());
    }

    pub fn get(&self, locale: &str) -> Option<&str> {
        self.0.get(locale).map(String::as_str)
    }

    pub fn contains_locale(&self, locale: &str) -> bool {
        self.0.contains_key(locale)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if at least one locale holds non-blank text
    pub fn has_text(&self) -> bool {
        self.0.values().any(|v| !v.trim().is_empty())
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(LocaleCode, String)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (LocaleCode, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// ISO 639-1 language code of a locale (`pt_BR` → `pt`)
pub fn iso1_from_locale(locale: &str) -> String {
    locale
        .split(['_', '-', '@', '.'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}
