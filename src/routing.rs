//! Language routing
//!
//! Decisions a request handler makes before rendering: redirecting the bare
//! root to the visitor's language, and remembering the language of a
//! language-prefixed path in a cookie.

use crate::i18n::Language;

/// Name of the language preference cookie.
pub const LANGUAGE_COOKIE: &str = "lang";

/// Language cookie lifetime: one year.
pub const LANGUAGE_COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 365;

/// Status used when redirecting the root path.
pub const ROOT_REDIRECT_STATUS: u16 = 302;

/// The parts of a request that routing looks at.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteRequest<'a> {
    /// Request path
    pub path: &'a str,

    /// `Accept-Language` header value
    pub accept_language: Option<&'a str>,

    /// Value of the `lang` cookie
    pub language_cookie: Option<&'a str>,
}

/// What the handler should do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Redirect to `location`.
    Redirect {
        /// Target path
        location: String,

        /// HTTP status code
        status: u16,
    },

    /// Handle the request, optionally setting the language cookie.
    Continue {
        /// Language taken from the path, if any
        language: Option<Language>,

        /// Cookie to set on the response
        set_cookie: Option<LanguageCookie>,
    },
}

/// The language preference cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageCookie {
    language: Language,
}

impl LanguageCookie {
    /// Create a cookie remembering `language`.
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Returns the remembered language.
    pub fn language(&self) -> Language {
        self.language
    }

    /// `Set-Cookie` header value: site-wide, one year, HTTP only, secure, lax.
    pub fn header_value(&self) -> String {
        format!(
            "{LANGUAGE_COOKIE}={}; Path=/; Max-Age={LANGUAGE_COOKIE_MAX_AGE_SECS}; HttpOnly; Secure; SameSite=Lax",
            self.language
        )
    }
}

/// Route a request.
pub fn route(request: &RouteRequest<'_>) -> RouteDecision {
    if request.path == "/" {
        let language = preferred_language(request.accept_language, request.language_cookie);

        return RouteDecision::Redirect {
            location: format!("/{language}"),
            status: ROOT_REDIRECT_STATUS,
        };
    }

    let language = language_from_path(request.path);

    RouteDecision::Continue {
        language,
        set_cookie: language.map(LanguageCookie::new),
    }
}

/// Language of a `/en` or `/de` prefixed path.
pub fn language_from_path(path: &str) -> Option<Language> {
    let rest = path.strip_prefix('/')?;
    let segment = rest.split_once('/').map_or(rest, |(segment, _)| segment);

    Language::from_code(segment)
}

/// The visitor's language: a valid cookie wins, then the header, then English.
pub fn preferred_language(accept_language: Option<&str>, cookie: Option<&str>) -> Language {
    cookie
        .and_then(Language::from_code)
        .or_else(|| accept_language.and_then(accept_language_preference))
        .unwrap_or_default()
}

/// Highest-weighted supported language in an `Accept-Language` header.
///
/// Ranges are matched on their primary subtag, so `de-AT` selects German.
/// Ties keep header order. Ranges with `q=0` or a `q` that is not a number
/// between 0 and 1 are ignored.
pub fn accept_language_preference(header: &str) -> Option<Language> {
    let mut best: Option<(Language, f32)> = None;

    for range in header.split(',') {
        let mut parts = range.split(';');
        let tag = parts.next().unwrap_or_default().trim().to_ascii_lowercase();
        let primary = tag.split('-').next().unwrap_or_default();

        let Some(language) = Language::from_code(primary) else {
            continue;
        };

        let weight = match parts.find_map(|param| param.trim().strip_prefix("q=")) {
            Some(q) => match q.trim().parse::<f32>() {
                Ok(weight) if (0.0..=1.0).contains(&weight) => weight,
                _ => continue,
            },
            None => 1.0,
        };

        if weight <= 0.0 {
            continue;
        }

        if best.is_none_or(|(_, best_weight)| weight > best_weight) {
            best = Some((language, weight));
        }
    }

    best.map(|(language, _)| language)
}

/// Language for a layout from its optional route parameter, defaulting to English.
pub fn layout_language(param: Option<&str>) -> Language {
    param.and_then(Language::from_code).unwrap_or_default()
}
