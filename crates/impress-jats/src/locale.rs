//! Language tag → locale code resolution

use std::collections::BTreeMap;

use impress_domain::LocaleCode;

use crate::config::ImportConfig;

/// Maps `xml:lang` values to the locale codes used for localized fields
pub trait LocaleResolver {
    /// Locale for a language tag; `None` or a blank tag means the current locale
    fn resolve(&self, language_tag: Option<&str>) -> LocaleCode;

    /// Locale used for fields the document does not tag (copyright, galley)
    fn current_locale(&self) -> LocaleCode;
}

/// Table-driven resolver: explicit aliases first, then tag normalization
///
/// Without an alias, `en` stays `en` and `pt-br` becomes `pt_BR`.
#[derive(Debug, Clone)]
pub struct LocaleTable {
    default_locale: LocaleCode,
    aliases: BTreeMap<String, LocaleCode>,
}

impl LocaleTable {
    pub fn new(default_locale: impl Into<LocaleCode>) -> Self {
        Self {
            default_locale: default_locale.into(),
            aliases: BTreeMap::new(),
        }
    }

    pub fn from_config(config: &ImportConfig) -> Self {
        let mut table = Self::new(config.default_locale.clone());
        for (tag, locale) in &config.locale_aliases {
            table = table.with_alias(tag, locale.clone());
        }
        table
    }

    /// Map a language tag (matched case-insensitively) to a locale
    pub fn with_alias(mut self, tag: &str, locale: impl Into<LocaleCode>) -> Self {
        self.aliases.insert(tag.to_lowercase(), locale.into());
        self
    }
}

impl LocaleResolver for LocaleTable {
    fn resolve(&self, language_tag: Option<&str>) -> LocaleCode {
        let tag = match language_tag.map(str::trim).filter(|t| !t.is_empty()) {
            Some(tag) => tag,
            None => return self.default_locale.clone(),
        };
        if let Some(locale) = self.aliases.get(&tag.to_lowercase()) {
            return locale.clone();
        }
        normalize_tag(tag)
    }

    fn current_locale(&self) -> LocaleCode {
        self.default_locale.clone()
    }
}

/// `pt-br` → `pt_BR`, `EN` → `en`, `sr-Latn-RS` → `sr_Latn_RS`
pub fn normalize_tag(tag: &str) -> LocaleCode {
    let mut parts = tag.split(['-', '_']).filter(|p| !p.is_empty());
    let mut out = match parts.next() {
        Some(language) => language.to_lowercase(),
        None => return LocaleCode::new(),
    };
    for part in parts {
        out.push('_');
        if part.len() == 2 {
            out.push_str(&part.to_uppercase());
        } else if part.len() == 4 {
            // script subtag: Latn, Cyrl
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(&chars.as_str().to_lowercase());
            }
        } else {
            out.push_str(part);
        }
    }
    out
}
