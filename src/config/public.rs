//! Public Config
//!
//! Values that end up in the browser bundle.

use clap::Args;
use url::Url;

use super::FieldErrors;

const PLACEHOLDER_STRAPI_URL: &str = "http://localhost:1337";
const PLACEHOLDER_STRIPE_PUBLISHABLE_KEY: &str = "pk_test_placeholder";
const PLACEHOLDER_CLOUDINARY_CLOUD_NAME: &str = "placeholder";

/// Raw browser-visible settings.
#[derive(Debug, Clone, Default, Args)]
pub struct PublicEnvArgs {
    /// CMS base URL
    #[arg(long, env = "PUBLIC_STRAPI_URL")]
    pub strapi_url: Option<String>,

    /// Stripe publishable key
    #[arg(long, env = "PUBLIC_STRIPE_PUBLISHABLE_KEY")]
    pub stripe_publishable_key: Option<String>,

    /// Image CDN cloud name
    #[arg(long, env = "PUBLIC_CLOUDINARY_CLOUD_NAME")]
    pub cloudinary_cloud_name: Option<String>,

    /// Plausible analytics domain
    #[arg(long, env = "PUBLIC_PLAUSIBLE_DOMAIN")]
    pub plausible_domain: Option<String>,

    /// Google Tag Manager container id
    #[arg(long, env = "PUBLIC_GTM_ID")]
    pub gtm_id: Option<String>,

    /// Facebook pixel id
    #[arg(long, env = "PUBLIC_FB_PIXEL_ID")]
    pub fb_pixel_id: Option<String>,
}

/// Browser-visible settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicEnv {
    /// CMS base URL
    pub strapi_url: String,

    /// Stripe publishable key
    pub stripe_publishable_key: String,

    /// Image CDN cloud name
    pub cloudinary_cloud_name: String,

    /// Plausible analytics domain
    pub plausible_domain: Option<String>,

    /// Google Tag Manager container id
    pub gtm_id: Option<String>,

    /// Facebook pixel id
    pub fb_pixel_id: Option<String>,
}

impl PublicEnvArgs {
    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns every rejected field.
    pub fn validate(&self) -> Result<PublicEnv, FieldErrors> {
        let mut errors = FieldErrors::default();

        let strapi_url = required(&mut errors, "PUBLIC_STRAPI_URL", self.strapi_url.as_deref());
        if let Some(url) = strapi_url
            && Url::parse(url).is_err()
        {
            errors.push("PUBLIC_STRAPI_URL", "must be a valid URL");
        }

        let stripe_key = required(
            &mut errors,
            "PUBLIC_STRIPE_PUBLISHABLE_KEY",
            self.stripe_publishable_key.as_deref(),
        );
        if let Some(key) = stripe_key
            && !key.starts_with("pk_")
        {
            errors.push("PUBLIC_STRIPE_PUBLISHABLE_KEY", "must start with 'pk_'");
        }

        required(
            &mut errors,
            "PUBLIC_CLOUDINARY_CLOUD_NAME",
            self.cloudinary_cloud_name.as_deref(),
        );

        errors.into_result(())?;

        Ok(self.with_placeholders())
    }

    /// The raw values, with placeholders for missing required ones.
    pub fn with_placeholders(&self) -> PublicEnv {
        PublicEnv {
            strapi_url: or_placeholder(self.strapi_url.as_deref(), PLACEHOLDER_STRAPI_URL),
            stripe_publishable_key: or_placeholder(
                self.stripe_publishable_key.as_deref(),
                PLACEHOLDER_STRIPE_PUBLISHABLE_KEY,
            ),
            cloudinary_cloud_name: or_placeholder(
                self.cloudinary_cloud_name.as_deref(),
                PLACEHOLDER_CLOUDINARY_CLOUD_NAME,
            ),
            plausible_domain: self.plausible_domain.clone(),
            gtm_id: self.gtm_id.clone(),
            fb_pixel_id: self.fb_pixel_id.clone(),
        }
    }
}

fn required<'a>(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<&'a str>,
) -> Option<&'a str> {
    match value {
        Some(value) if !value.is_empty() => Some(value),
        _ => {
            errors.push(field, "required");
            None
        }
    }
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    value
        .filter(|value| !value.is_empty())
        .unwrap_or(placeholder)
        .to_string()
}
