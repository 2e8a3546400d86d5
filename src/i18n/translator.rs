//! Translation functions

use std::sync::Arc;

use super::{TranslationTable, TranslationVars, format_string};

/// Translation function bound to one table.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    table: Arc<TranslationTable>,
}

impl Translator {
    /// Bind a translator to `table`.
    pub fn new(table: Arc<TranslationTable>) -> Self {
        Self { table }
    }

    /// Translate `key`, formatting the message with `vars`.
    ///
    /// Missing keys come back unchanged so they stay visible in the UI.
    pub fn t(&self, key: &str, vars: Option<&TranslationVars>) -> String {
        format_string(self.table.get_nested_value(key), vars)
    }

    /// Returns the bound table.
    pub fn table(&self) -> &TranslationTable {
        &self.table
    }
}

impl From<TranslationTable> for Translator {
    fn from(table: TranslationTable) -> Self {
        Self::new(Arc::new(table))
    }
}
