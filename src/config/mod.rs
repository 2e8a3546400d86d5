//! Storefront configuration
//!
//! Values come from CLI flags or environment variables, with a `.env` file
//! loaded first if present. Parsing never rejects a value; checks happen in
//! [`StorefrontConfig::environment`] so every bad field is reported at once.

use std::{fmt, path::PathBuf};

use clap::Parser;
use thiserror::Error;
use tracing::warn;

pub use logging::{LogFormat, LoggingConfig};
pub use public::{PublicEnv, PublicEnvArgs};
pub use server::{FeatureFlags, ServerEnv, ServerEnvArgs};

mod logging;
mod public;
mod server;

/// Deployment mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RuntimeMode {
    /// Local development: missing public values get placeholders.
    Development,

    /// Everything must be valid.
    #[default]
    Production,
}

/// Vitrine storefront configuration
#[derive(Debug, Parser)]
#[command(name = "vitrine", about = "Vitrine storefront", long_about = None)]
pub struct StorefrontConfig {
    /// Deployment mode (development, production)
    #[arg(long, env = "APP_ENV", value_enum, default_value_t = RuntimeMode::Production)]
    pub mode: RuntimeMode,

    /// Directory holding `<lang>.json` translation tables
    #[arg(long, env = "LOCALES_DIR")]
    pub locales_dir: Option<PathBuf>,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Browser-visible settings.
    #[command(flatten)]
    pub public: PublicEnvArgs,

    /// Server-only settings.
    #[command(flatten)]
    pub server: ServerEnvArgs,
}

impl StorefrontConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Ok(Self::try_parse()?)
    }

    /// Validate the raw values for the configured mode.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvironment`] listing every bad field.
    /// Public fields only count in production.
    pub fn environment(&self) -> Result<StorefrontEnv, ConfigError> {
        let mut errors = FieldErrors::default();

        let public = match self.public.validate() {
            Ok(public) => Some(public),
            Err(public_errors) if self.mode == RuntimeMode::Development => {
                warn!(
                    "invalid public environment variables, using placeholders:\n{public_errors}"
                );
                Some(self.public.with_placeholders())
            }
            Err(public_errors) => {
                errors.extend(public_errors);
                None
            }
        };

        let server = match self.server.validate() {
            Ok(server) => Some(server),
            Err(server_errors) => {
                errors.extend(server_errors);
                None
            }
        };

        match (public, server) {
            (Some(public), Some((server, features))) if errors.is_empty() => Ok(StorefrontEnv {
                public,
                server,
                features,
            }),
            _ => Err(ConfigError::InvalidEnvironment(errors)),
        }
    }
}

/// Validated environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontEnv {
    /// Browser-visible settings
    pub public: PublicEnv,

    /// Server-only settings
    pub server: ServerEnv,

    /// Feature toggles
    pub features: FeatureFlags,
}

/// One rejected variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Environment variable name
    pub field: &'static str,

    /// What is wrong with it
    pub message: String,
}

/// Every rejected variable, displayed as `FIELD: message` lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Record an error for `field`.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Whether nothing was rejected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the recorded errors.
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Whether `field` was rejected.
    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|error| error.field == field)
    }

    /// `Ok(value)` if nothing was rejected.
    pub(crate) fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl Extend<FieldError> for FieldErrors {
    fn extend<I: IntoIterator<Item = FieldError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }

            write!(f, "{}: {}", error.field, error.message)?;
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Arguments or environment could not be parsed.
    #[error(transparent)]
    Parse(#[from] clap::Error),

    /// One or more variables failed validation.
    #[error("invalid environment variables:\n{0}\n\nPlease check your .env file.")]
    InvalidEnvironment(FieldErrors),
}

/// Reads an optional `true`/`false` flag.
pub(crate) fn parse_flag(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<&str>,
    default: bool,
) -> bool {
    match value {
        None => default,
        Some("true") => true,
        Some("false") => false,
        Some(other) => {
            errors.push(field, format!("expected 'true' or 'false', received '{other}'"));
            default
        }
    }
}
