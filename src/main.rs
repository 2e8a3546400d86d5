//! Vitrine startup check
//!
//! Validates the environment for the configured mode and preloads every
//! translation table, exiting non-zero if either fails.

use std::process::ExitCode;

use tracing::{error, info, warn};

use vitrine::{
    config::{ConfigError, StorefrontConfig},
    i18n::{BundledSource, DirectorySource, Language, TranslationSource},
    observability::init_logging,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = match StorefrontConfig::load() {
        Ok(config) => config,
        Err(ConfigError::Parse(parse_error)) => parse_error.exit(),
        Err(config_error) => {
            #[expect(
                clippy::print_stderr,
                reason = "logging not initialized yet, must use eprintln for config errors"
            )]
            {
                eprintln!("Configuration error: {config_error}");
            }

            return ExitCode::FAILURE;
        }
    };

    if let Err(init_error) = init_logging(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("{init_error}");
        }

        return ExitCode::FAILURE;
    }

    let env = match config.environment() {
        Ok(env) => env,
        Err(env_error) => {
            error!(mode = ?config.mode, "{env_error}");

            return ExitCode::FAILURE;
        }
    };

    info!(
        mode = ?config.mode,
        strapi_url = %env.public.strapi_url,
        features = ?env.features,
        "environment validated"
    );

    let loaded = match &config.locales_dir {
        Some(dir) => preload(&DirectorySource::new(dir)).await,
        None => preload(&BundledSource).await,
    };

    if loaded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Load every language and report keys missing against English.
///
/// Returns whether every table loaded.
async fn preload<S: TranslationSource>(source: &S) -> bool {
    let mut tables = Vec::new();
    let mut complete = true;

    for language in Language::ALL {
        match source.load(language.code()).await {
            Ok(table) => {
                info!(%language, keys = table.leaf_keys().len(), "translations loaded");
                tables.push((language, table));
            }
            Err(load_error) => {
                error!(%language, %load_error, "failed to load translations");
                complete = false;
            }
        }
    }

    let Some((_, reference)) = tables
        .iter()
        .find(|(language, _)| *language == Language::En)
    else {
        return false;
    };

    for (language, table) in &tables {
        let missing = table.missing_keys(reference);

        if !missing.is_empty() {
            warn!(%language, ?missing, "translations missing keys");
        }
    }

    complete
}
