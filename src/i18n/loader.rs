//! Loading with fallback

use tracing::{error, warn};

use super::{Language, TranslationSource, TranslationTable};

/// Load the table for `language`, never failing.
///
/// A failed load is logged and replaced by the English table. If English
/// cannot be loaded either, the result is an empty table, so every lookup
/// returns its key.
pub async fn load_translations<S: TranslationSource>(source: &S, language: &str) -> TranslationTable {
    let error = match source.load(language).await {
        Ok(table) => return table,
        Err(error) => error,
    };

    error!(%language, %error, "failed to load translations");

    let fallback = Language::En.code();

    if language == fallback {
        return TranslationTable::new();
    }

    match source.load(fallback).await {
        Ok(table) => {
            warn!(%language, "using English translations instead");
            table
        }
        Err(error) => {
            error!(%error, "failed to load English fallback translations");
            TranslationTable::new()
        }
    }
}
