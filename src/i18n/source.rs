//! Translation sources

use std::path::{Path, PathBuf};

use super::{I18nError, Language, TranslationTable};

const BUNDLED_EN: &str = include_str!("../../locales/en.json");
const BUNDLED_DE: &str = include_str!("../../locales/de.json");

/// Somewhere translation tables can be fetched from.
pub trait TranslationSource {
    /// Fetch the table for a language code.
    ///
    /// # Errors
    ///
    /// Returns an [`I18nError`] if the code is unsupported or the table cannot
    /// be read or parsed.
    async fn load(&self, language: &str) -> Result<TranslationTable, I18nError>;
}

/// Reads `<root>/<code>.json` files.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Create a source reading from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the directory tables are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the table file for `language`.
    pub fn path_for(&self, language: Language) -> PathBuf {
        self.root.join(format!("{language}.json"))
    }
}

impl TranslationSource for DirectorySource {
    async fn load(&self, language: &str) -> Result<TranslationTable, I18nError> {
        let language: Language = language.parse()?;
        let path = self.path_for(language);

        let json = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| I18nError::Io { path, source })?;

        TranslationTable::from_json(&json)
    }
}

/// Tables compiled into the crate from `locales/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

impl TranslationSource for BundledSource {
    async fn load(&self, language: &str) -> Result<TranslationTable, I18nError> {
        let json = match language.parse::<Language>()? {
            Language::En => BUNDLED_EN,
            Language::De => BUNDLED_DE,
        };

        TranslationTable::from_json(json)
    }
}
