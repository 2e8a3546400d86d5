//! Server Config
//!
//! Secrets and switches that never leave the server.

use clap::Args;
use url::Url;

use super::{FieldErrors, parse_flag};

const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 60;

/// Raw server-only settings.
#[derive(Debug, Clone, Default, Args)]
pub struct ServerEnvArgs {
    /// Database connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Stripe secret key
    #[arg(long, env = "STRIPE_SECRET_KEY", hide_env_values = true)]
    pub stripe_secret_key: Option<String>,

    /// Stripe webhook signing secret
    #[arg(long, env = "STRIPE_WEBHOOK_SECRET", hide_env_values = true)]
    pub stripe_webhook_secret: Option<String>,

    /// Brevo email API key
    #[arg(long, env = "BREVO_API_KEY", hide_env_values = true)]
    pub brevo_api_key: Option<String>,

    /// Image CDN API key
    #[arg(long, env = "CLOUDINARY_API_KEY", hide_env_values = true)]
    pub cloudinary_api_key: Option<String>,

    /// Image CDN API secret
    #[arg(long, env = "CLOUDINARY_API_SECRET", hide_env_values = true)]
    pub cloudinary_api_secret: Option<String>,

    /// Debug mode (true, false)
    #[arg(long, env = "DEBUG")]
    pub debug: Option<String>,

    /// Requests allowed per client per minute
    #[arg(long, env = "RATE_LIMIT_PER_MINUTE")]
    pub rate_limit_per_minute: Option<String>,

    /// Newsletter signup (true, false)
    #[arg(long, env = "FEATURE_NEWSLETTER")]
    pub feature_newsletter: Option<String>,

    /// Product reviews (true, false)
    #[arg(long, env = "FEATURE_REVIEWS")]
    pub feature_reviews: Option<String>,

    /// Wishlist (true, false)
    #[arg(long, env = "FEATURE_WISHLIST")]
    pub feature_wishlist: Option<String>,
}

/// Server-only settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEnv {
    /// Database connection string
    pub database_url: Option<String>,

    /// Stripe secret key
    pub stripe_secret_key: Option<String>,

    /// Stripe webhook signing secret
    pub stripe_webhook_secret: Option<String>,

    /// Brevo email API key
    pub brevo_api_key: Option<String>,

    /// Image CDN API key
    pub cloudinary_api_key: Option<String>,

    /// Image CDN API secret
    pub cloudinary_api_secret: Option<String>,

    /// Debug mode
    pub debug: bool,

    /// Requests allowed per client per minute
    pub rate_limit_per_minute: u32,
}

/// Optional storefront features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "independent boolean feature toggles from CLI/env."
)]
pub struct FeatureFlags {
    /// Newsletter signup
    pub newsletter: bool,

    /// Product reviews
    pub reviews: bool,

    /// Wishlist
    pub wishlist: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            newsletter: true,
            reviews: false,
            wishlist: false,
        }
    }
}

impl ServerEnvArgs {
    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns every rejected field.
    pub fn validate(&self) -> Result<(ServerEnv, FeatureFlags), FieldErrors> {
        let mut errors = FieldErrors::default();

        if let Some(url) = self.database_url.as_deref()
            && Url::parse(url).is_err()
        {
            errors.push("DATABASE_URL", "must be a valid URL");
        }

        check_prefix(&mut errors, "STRIPE_SECRET_KEY", self.stripe_secret_key.as_deref(), "sk_");
        check_prefix(
            &mut errors,
            "STRIPE_WEBHOOK_SECRET",
            self.stripe_webhook_secret.as_deref(),
            "whsec_",
        );
        check_non_empty(&mut errors, "BREVO_API_KEY", self.brevo_api_key.as_deref());
        check_non_empty(&mut errors, "CLOUDINARY_API_KEY", self.cloudinary_api_key.as_deref());
        check_non_empty(
            &mut errors,
            "CLOUDINARY_API_SECRET",
            self.cloudinary_api_secret.as_deref(),
        );

        let debug = parse_flag(&mut errors, "DEBUG", self.debug.as_deref(), false);
        let rate_limit_per_minute = self.rate_limit(&mut errors);

        let defaults = FeatureFlags::default();
        let features = FeatureFlags {
            newsletter: parse_flag(
                &mut errors,
                "FEATURE_NEWSLETTER",
                self.feature_newsletter.as_deref(),
                defaults.newsletter,
            ),
            reviews: parse_flag(
                &mut errors,
                "FEATURE_REVIEWS",
                self.feature_reviews.as_deref(),
                defaults.reviews,
            ),
            wishlist: parse_flag(
                &mut errors,
                "FEATURE_WISHLIST",
                self.feature_wishlist.as_deref(),
                defaults.wishlist,
            ),
        };

        let server = ServerEnv {
            database_url: self.database_url.clone(),
            stripe_secret_key: self.stripe_secret_key.clone(),
            stripe_webhook_secret: self.stripe_webhook_secret.clone(),
            brevo_api_key: self.brevo_api_key.clone(),
            cloudinary_api_key: self.cloudinary_api_key.clone(),
            cloudinary_api_secret: self.cloudinary_api_secret.clone(),
            debug,
            rate_limit_per_minute,
        };

        errors.into_result((server, features))
    }

    fn rate_limit(&self, errors: &mut FieldErrors) -> u32 {
        let Some(raw) = self.rate_limit_per_minute.as_deref() else {
            return DEFAULT_RATE_LIMIT_PER_MINUTE;
        };

        match raw.trim().parse::<u32>() {
            Ok(limit) if limit > 0 => limit,
            Ok(_) => {
                errors.push("RATE_LIMIT_PER_MINUTE", "must be greater than 0");
                DEFAULT_RATE_LIMIT_PER_MINUTE
            }
            Err(_) => {
                errors.push("RATE_LIMIT_PER_MINUTE", format!("expected a number, received '{raw}'"));
                DEFAULT_RATE_LIMIT_PER_MINUTE
            }
        }
    }
}

fn check_prefix(errors: &mut FieldErrors, field: &'static str, value: Option<&str>, prefix: &str) {
    if let Some(value) = value
        && !value.starts_with(prefix)
    {
        errors.push(field, format!("must start with '{prefix}'"));
    }
}

fn check_non_empty(errors: &mut FieldErrors, field: &'static str, value: Option<&str>) {
    if value.is_some_and(str::is_empty) {
        errors.push(field, "must not be empty");
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn empty_environment_uses_defaults() -> TestResult {
        let (server, features) = ServerEnvArgs::default().validate()?;

        assert!(!server.debug);
        assert_eq!(server.rate_limit_per_minute, 60);
        assert_eq!(server.database_url, None);
        assert_eq!(features, FeatureFlags::default());
        assert!(features.newsletter);
        assert!(!features.reviews);
        assert!(!features.wishlist);

        Ok(())
    }

    #[test]
    fn reads_flags_and_limits() -> TestResult {
        let args = ServerEnvArgs {
            database_url: Some("postgres://localhost/vitrine".to_string()),
            stripe_secret_key: Some("sk_test_123".to_string()),
            stripe_webhook_secret: Some("whsec_abc".to_string()),
            debug: Some("true".to_string()),
            rate_limit_per_minute: Some("120".to_string()),
            feature_newsletter: Some("false".to_string()),
            feature_wishlist: Some("true".to_string()),
            ..ServerEnvArgs::default()
        };

        let (server, features) = args.validate()?;

        assert!(server.debug);
        assert_eq!(server.rate_limit_per_minute, 120);
        assert_eq!(server.stripe_secret_key.as_deref(), Some("sk_test_123"));
        assert!(!features.newsletter);
        assert!(features.wishlist);

        Ok(())
    }

    #[test]
    fn collects_every_error() {
        let args = ServerEnvArgs {
            database_url: Some("nope".to_string()),
            stripe_secret_key: Some("pk_test_123".to_string()),
            stripe_webhook_secret: Some("secret".to_string()),
            brevo_api_key: Some(String::new()),
            rate_limit_per_minute: Some("0".to_string()),
            feature_reviews: Some("maybe".to_string()),
            ..ServerEnvArgs::default()
        };

        let result = args.validate();

        let Err(errors) = result else {
            panic!("expected field errors, got {result:?}");
        };

        for field in [
            "DATABASE_URL",
            "STRIPE_SECRET_KEY",
            "STRIPE_WEBHOOK_SECRET",
            "BREVO_API_KEY",
            "RATE_LIMIT_PER_MINUTE",
            "FEATURE_REVIEWS",
        ] {
            assert!(errors.contains(field), "{field} should be rejected");
        }

        assert_eq!(errors.errors().len(), 6);
    }

    #[test]
    fn rejects_non_numeric_rate_limit() {
        let args = ServerEnvArgs {
            rate_limit_per_minute: Some("fast".to_string()),
            ..ServerEnvArgs::default()
        };

        let result = args.validate();

        assert!(
            matches!(&result, Err(errors) if errors.to_string() == "RATE_LIMIT_PER_MINUTE: expected a number, received 'fast'"),
            "unexpected result {result:?}"
        );
    }
}
