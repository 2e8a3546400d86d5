//! Vitrine
//!
//! Storefront core for a bilingual (English/German) shop: an observable cart
//! priced in minor currency units, a translation resolver with plural and
//! interpolation support, and the routing, currency, image and configuration
//! helpers around them.

pub mod cart;
pub mod config;
pub mod currency;
pub mod i18n;
pub mod images;
pub mod observability;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod routing;
pub mod store;
