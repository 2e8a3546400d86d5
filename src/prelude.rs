//! Vitrine prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartItem, CartStore, Selection},
    config::{ConfigError, RuntimeMode, StorefrontConfig, StorefrontEnv},
    currency::{DEFAULT_CURRENCY, NumberLocale, format_currency, parse_currency},
    i18n::{
        BundledSource, DirectorySource, I18n, I18nError, I18nState, Language, LoadOutcome,
        TranslationSource, TranslationTable, TranslationVars, Translator,
    },
    images::{ImageCdn, ImageTransform},
    pricing::calculate_item_price,
    products::{
        ArtworkProduct, BasicProduct, ExclusiveProduct, Product, ProductError, ProductId,
        PurchasableProduct,
    },
    routing::{RouteDecision, RouteRequest, route},
    store::{Store, SubscriptionKey},
};
