//! Label lookup with a fallback language.
//!
//! Built-in tables for `en-us` and `de-de` are compiled in; a `lang/`
//! directory next to the executable may override or add languages.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::paths::resource_dir;

pub const DEFAULT_LANGUAGE: &str = "en-us";
pub const FALLBACK_LANGUAGE: &str = "de-de";

const BUILTIN_TABLES: &[(&str, &str)] = &[
    ("en-us", include_str!("../../lang/en-us.json")),
    ("de-de", include_str!("../../lang/de-de.json")),
];

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse language table {language}: {source}")]
    Parse {
        language: String,
        source: serde_json::Error,
    },
}

/// Key → text tables for one primary and one fallback language.
#[derive(Debug, Clone, PartialEq)]
pub struct Translator {
    language: String,
    fallback_language: String,
    entries: HashMap<String, String>,
    fallback: HashMap<String, String>,
    lang_dir: Option<PathBuf>,
}

impl Translator {
    /// Load `language` with `de-de` as fallback from built-ins plus the
    /// optional `lang/` resource directory.
    pub fn new(language: &str) -> Self {
        Self::with_dir(language, FALLBACK_LANGUAGE, resource_dir("lang"))
    }

    pub fn with_dir(language: &str, fallback_language: &str, lang_dir: Option<PathBuf>) -> Self {
        let mut translator = Self {
            language: language.to_lowercase(),
            fallback_language: fallback_language.to_lowercase(),
            entries: HashMap::new(),
            fallback: HashMap::new(),
            lang_dir,
        };
        translator.reload();
        translator
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn change_language(&mut self, language: &str) {
        let language = language.to_lowercase();
        if language != self.language {
            self.language = language;
            self.reload();
        }
    }

    /// Text for `key`: primary, then fallback, then the key itself.
    pub fn tr(&self, key: &str) -> String {
        match self.entries.get(key).or_else(|| self.fallback.get(key)) {
            Some(text) => text.clone(),
            None => {
                log::debug!("translation missing: {}", key);
                key.to_string()
            }
        }
    }

    /// Like [`tr`](Self::tr), substituting `{name}` placeholders.
    pub fn tr_with(&self, key: &str, args: &[(&str, String)]) -> String {
        let mut text = self.tr(key);
        for (name, value) in args {
            text = text.replace(&format!("{{{}}}", name), value);
        }
        text
    }

    /// Built-in languages plus any `*.json` in the override directory.
    pub fn available_languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = BUILTIN_TABLES.iter().map(|(code, _)| code.to_string()).collect();
        if let Some(dir) = &self.lang_dir {
            if let Ok(read_dir) = fs::read_dir(dir) {
                for entry in read_dir.flatten() {
                    let path = entry.path();
                    if path.extension().and_then(|e| e.to_str()) == Some("json") {
                        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                            languages.push(stem.to_lowercase());
                        }
                    }
                }
            }
        }
        languages.sort();
        languages.dedup();
        languages
    }

    fn reload(&mut self) {
        self.entries = self.load_table(&self.language);
        self.fallback = if self.language != self.fallback_language {
            self.load_table(&self.fallback_language)
        } else {
            HashMap::new()
        };
    }

    fn load_table(&self, language: &str) -> HashMap<String, String> {
        let mut table = HashMap::new();
        if let Some((_, raw)) = BUILTIN_TABLES.iter().find(|(code, _)| *code == language) {
            match parse_table(language, raw) {
                Ok(builtin) => table.extend(builtin),
                Err(err) => log::error!("{}", err),
            }
        }
        if let Some(dir) = &self.lang_dir {
            let path = dir.join(format!("{}.json", language));
            if path.exists() {
                match load_table_file(language, &path) {
                    Ok(overrides) => table.extend(overrides),
                    Err(err) => log::warn!("{}", err),
                }
            }
        }
        if table.is_empty() {
            log::warn!("no translations found for {}", language);
        } else {
            log::debug!("loaded {} translations for {}", table.len(), language);
        }
        table
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

/// Human-readable name for a language code.
pub fn language_display_name(code: &str) -> String {
    match code {
        "de-de" => "Deutsch (Deutschland)".to_string(),
        "en-us" => "English (United States)".to_string(),
        "en-gb" => "English (United Kingdom)".to_string(),
        "fr-fr" => "Français (France)".to_string(),
        "es-es" => "Español (España)".to_string(),
        "it-it" => "Italiano (Italia)".to_string(),
        "nl-nl" => "Nederlands (Nederland)".to_string(),
        "pt-pt" => "Português (Portugal)".to_string(),
        other => other.to_uppercase(),
    }
}

fn parse_table(language: &str, raw: &str) -> Result<HashMap<String, String>, TranslationError> {
    serde_json::from_str(raw).map_err(|source| TranslationError::Parse {
        language: language.to_string(),
        source,
    })
}

fn load_table_file(language: &str, path: &Path) -> Result<HashMap<String, String>, TranslationError> {
    let raw = fs::read_to_string(path).map_err(|source| TranslationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(language, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_parse_and_share_keys() {
        let en = parse_table("en-us", BUILTIN_TABLES[0].1).unwrap();
        let de = parse_table("de-de", BUILTIN_TABLES[1].1).unwrap();
        let mut en_keys: Vec<_> = en.keys().collect();
        let mut de_keys: Vec<_> = de.keys().collect();
        en_keys.sort();
        de_keys.sort();
        assert_eq!(en_keys, de_keys);
    }

    #[test]
    fn test_lookup_falls_back_then_returns_key() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("xx-xx.json"), r#"{"app_title": "Planner X"}"#).unwrap();
        let translator = Translator::with_dir("xx-xx", "en-us", Some(dir.path().to_path_buf()));
        assert_eq!(translator.tr("app_title"), "Planner X");
        assert_eq!(translator.tr("menu_file"), "File");
        assert_eq!(translator.tr("definitely_missing"), "definitely_missing");
        assert!(translator.available_languages().contains(&"xx-xx".to_string()));
    }

    #[test]
    fn test_formatting_arguments() {
        let translator = Translator::with_dir("en-us", "de-de", None);
        let text = translator.tr_with(
            "info_duration",
            &[("hours", "2".to_string()), ("minutes", "30".to_string()), ("total", "150".to_string())],
        );
        assert_eq!(text, "Total duration: 2h 30min (150 minutes)");
    }

    #[test]
    fn test_change_language_reloads() {
        let mut translator = Translator::with_dir("en-us", "en-us", None);
        assert_eq!(translator.tr("menu_file"), "File");
        translator.change_language("DE-DE");
        assert_eq!(translator.language(), "de-de");
        assert_eq!(translator.tr("menu_file"), "Datei");
    }

    #[test]
    fn test_broken_override_keeps_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en-us.json"), "{ not json").unwrap();
        let translator = Translator::with_dir("en-us", "en-us", Some(dir.path().to_path_buf()));
        assert_eq!(translator.tr("menu_file"), "File");
        assert_eq!(language_display_name("fr-fr"), "Français (France)");
        assert_eq!(language_display_name("sv-se"), "SV-SE");
    }
}
