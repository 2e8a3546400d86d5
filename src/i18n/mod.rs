//! Internationalization
//!
//! English and German translation tables addressed by dotted key paths, with
//! ICU-style plural blocks and `{name}` interpolation.
//!
//! Lookups never fail: a missing key resolves to the key itself, and a table
//! that cannot be loaded degrades to English and then to an empty table.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod format;
pub mod loader;
pub mod source;
pub mod state;
pub mod table;
pub mod translator;

pub use format::{TranslationValue, TranslationVars, format_string};
pub use loader::load_translations;
pub use source::{BundledSource, DirectorySource, TranslationSource};
pub use state::{I18n, I18nState, LoadOutcome};
pub use table::{TranslationNode, TranslationTable};
pub use translator::Translator;

/// Errors raised while loading translation tables.
#[derive(Debug, Error)]
pub enum I18nError {
    /// The language code is not one the storefront ships.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The translation file could not be read.
    #[error("failed to read translations from {path}: {source}")]
    Io {
        /// File that was read
        path: std::path::PathBuf,

        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The translation file is not a JSON object of strings and sections.
    #[error("failed to parse translations: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storefront language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,

    /// German
    De,
}

impl Language {
    /// Every supported language, default first.
    pub const ALL: [Language; 2] = [Language::En, Language::De];

    /// Two-letter language code.
    pub const fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
        }
    }

    /// Parse an exact two-letter language code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|language| language.code() == code)
    }

    /// Route parameter matcher: only supported codes match, anything else is a 404.
    pub fn matches_param(param: &str) -> bool {
        Self::from_code(param).is_some()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = I18nError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Self::from_code(code).ok_or_else(|| I18nError::UnsupportedLanguage(code.to_string()))
    }
}
