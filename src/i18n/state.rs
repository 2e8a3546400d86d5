//! Language selection state
//!
//! The active language and its table change together, and only once the new
//! table has finished loading. Every load takes a ticket from a monotonic
//! counter; when a load completes after a newer one was issued, its result is
//! dropped so a slow first switch cannot overwrite a later one.

use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicU64, Ordering},
};

use tracing::{debug, warn};

use crate::store::{Store, SubscriptionKey};

use super::{Language, TranslationSource, TranslationTable, Translator, load_translations};

/// Language selection state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum I18nState {
    /// Nothing has been loaded yet.
    #[default]
    Unset,

    /// The first table is being loaded.
    Loading(Language),

    /// A table is active.
    Ready {
        /// Active language
        language: Language,

        /// Table for the active language, or its fallback
        table: Arc<TranslationTable>,
    },
}

impl I18nState {
    /// Returns the active language, if a table is loaded.
    pub fn language(&self) -> Option<Language> {
        match self {
            I18nState::Ready { language, .. } => Some(*language),
            I18nState::Unset | I18nState::Loading(_) => None,
        }
    }

    /// Returns a translator for the active table. Before a table is loaded the
    /// translator echoes keys.
    pub fn translator(&self) -> Translator {
        match self {
            I18nState::Ready { table, .. } => Translator::new(Arc::clone(table)),
            I18nState::Unset | I18nState::Loading(_) => Translator::default(),
        }
    }

    /// Whether a table is active.
    pub fn is_ready(&self) -> bool {
        matches!(self, I18nState::Ready { .. })
    }
}

/// Result of a language switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The loaded table is now active.
    Applied(Language),

    /// A newer switch was issued while this one was loading; nothing changed.
    Superseded,
}

/// Language selection for one session.
#[derive(Debug)]
pub struct I18n<S> {
    source: S,
    state: Mutex<Store<I18nState>>,
    issued: AtomicU64,
}

impl<S: TranslationSource> I18n<S> {
    /// Create an unset selection backed by `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: Mutex::new(Store::new(I18nState::Unset)),
            issued: AtomicU64::new(0),
        }
    }

    /// Returns the translation source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load the first language.
    pub async fn initialize(&self, language: &str) -> LoadOutcome {
        self.switch_language(language).await
    }

    /// Load `language` and make it active.
    ///
    /// Unsupported codes select English. Load failures fall back as described
    /// in [`load_translations`].
    pub async fn switch_language(&self, language: &str) -> LoadOutcome {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        let selected = Language::from_code(language).unwrap_or_else(|| {
            warn!(%language, "unsupported language requested, selecting English");
            Language::En
        });

        {
            let mut state = self.lock();

            if *state.get() == I18nState::Unset {
                state.set(I18nState::Loading(selected));
            }
        }

        let table = Arc::new(load_translations(&self.source, selected.code()).await);

        let mut state = self.lock();

        if ticket != self.issued.load(Ordering::SeqCst) {
            debug!(language = selected.code(), ticket, "discarding superseded translation load");
            return LoadOutcome::Superseded;
        }

        state.set(I18nState::Ready {
            language: selected,
            table,
        });

        LoadOutcome::Applied(selected)
    }

    /// Returns a copy of the current state.
    pub fn state(&self) -> I18nState {
        self.lock().get().clone()
    }

    /// Returns the active language, if a table is loaded.
    pub fn language(&self) -> Option<Language> {
        self.lock().get().language()
    }

    /// Returns a translator for the active table.
    pub fn translator(&self) -> Translator {
        self.lock().get().translator()
    }

    /// Subscribe to state changes.
    ///
    /// Subscribers run while the state is locked and must not call back into
    /// this `I18n`.
    pub fn subscribe<F>(&self, subscriber: F) -> SubscriptionKey
    where
        F: FnMut(&I18nState) + Send + 'static,
    {
        self.lock().subscribe(subscriber)
    }

    /// Subscribe to a translator rebuilt on every state change.
    pub fn subscribe_translator<F>(&self, mut subscriber: F) -> SubscriptionKey
    where
        F: FnMut(&Translator) + Send + 'static,
    {
        self.subscribe(move |state| subscriber(&state.translator()))
    }

    /// Remove a subscriber.
    pub fn unsubscribe(&self, key: SubscriptionKey) -> bool {
        self.lock().unsubscribe(key)
    }

    fn lock(&self) -> MutexGuard<'_, Store<I18nState>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
