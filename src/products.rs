//! Products
//!
//! Catalog entries as supplied by the CMS. Products are immutable here; the
//! crate never fetches or caches them.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::i18n::Language;

/// Product identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    /// Create a product id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Errors raised when narrowing products.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    /// Exclusive products are sold by inquiry only.
    #[error("product {0} is exclusive and cannot be purchased")]
    NotPurchasable(ProductId),
}

/// Fields shared by every product type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    /// Product id
    pub id: ProductId,

    /// URL slug
    pub slug: String,

    /// Display name
    pub name: String,

    /// Description
    pub description: String,

    /// Image URLs or CDN public ids
    #[serde(default)]
    pub images: Vec<String>,
}

/// Colors an artwork can be ordered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LuxuryColor {
    /// Black
    Black,

    /// White
    White,

    /// Gray
    Gray,
}

/// Directly purchasable product with a fixed price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkProduct {
    /// Shared product fields
    #[serde(flatten)]
    pub details: ProductDetails,

    /// Unit price in minor units
    pub price: i64,

    /// Units in stock
    pub stock: u32,

    /// Colors on offer, if the artwork comes in several
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_colors: Option<Vec<LuxuryColor>>,
}

/// Inquiry-only product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusiveProduct {
    /// Shared product fields
    #[serde(flatten)]
    pub details: ProductDetails,

    /// Email address or phone number for inquiries
    pub inquiry_contact: String,

    /// Display-only price range, e.g. `€10,000 - €25,000`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_price_range: Option<String>,
}

/// A named choice dimension on a made-to-measure product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationAxis {
    /// Axis name, e.g. `Size`
    pub name: String,

    /// Allowed values, e.g. `S`, `M`, `L`
    pub options: Vec<String>,

    /// Surcharge in minor units when any value is chosen on this axis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_modifier: Option<i64>,
}

/// Made-to-measure product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicProduct {
    /// Shared product fields
    #[serde(flatten)]
    pub details: ProductDetails,

    /// Price before customizations, in minor units
    pub base_price: i64,

    /// Customization axes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization_options: Option<Vec<CustomizationAxis>>,

    /// Display-only lead time, e.g. `4-6 weeks`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_time: Option<String>,
}

/// Product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Product {
    /// Direct purchase
    Artwork(ArtworkProduct),

    /// Lead funnel only
    Exclusive(ExclusiveProduct),

    /// Made to measure
    Basic(BasicProduct),
}

impl Product {
    /// Returns the shared product fields.
    pub fn details(&self) -> &ProductDetails {
        match self {
            Product::Artwork(product) => &product.details,
            Product::Exclusive(product) => &product.details,
            Product::Basic(product) => &product.details,
        }
    }

    /// Returns the product id.
    pub fn id(&self) -> &ProductId {
        &self.details().id
    }

    /// Whether the product can be added to a cart.
    pub fn is_purchasable(&self) -> bool {
        !self.is_exclusive()
    }

    /// Whether the product is inquiry-only.
    pub fn is_exclusive(&self) -> bool {
        matches!(self, Product::Exclusive(_))
    }

    /// Whether the product is an artwork.
    pub fn is_artwork(&self) -> bool {
        matches!(self, Product::Artwork(_))
    }

    /// Whether the product is a made-to-measure basic.
    pub fn is_basic(&self) -> bool {
        matches!(self, Product::Basic(_))
    }

    /// Storefront path of the product page for `language`.
    pub fn url(&self, language: Language) -> String {
        let section = match self {
            Product::Exclusive(_) => "exclusives",
            Product::Artwork(_) | Product::Basic(_) => "products",
        };

        format!("/{language}/{section}/{}", self.details().slug)
    }
}

/// A product that can be put in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PurchasableProduct {
    /// Direct purchase
    Artwork(ArtworkProduct),

    /// Made to measure
    Basic(BasicProduct),
}

impl PurchasableProduct {
    /// Returns the shared product fields.
    pub fn details(&self) -> &ProductDetails {
        match self {
            PurchasableProduct::Artwork(product) => &product.details,
            PurchasableProduct::Basic(product) => &product.details,
        }
    }

    /// Returns the product id.
    pub fn id(&self) -> &ProductId {
        &self.details().id
    }
}

impl TryFrom<Product> for PurchasableProduct {
    type Error = ProductError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        match product {
            Product::Artwork(product) => Ok(PurchasableProduct::Artwork(product)),
            Product::Basic(product) => Ok(PurchasableProduct::Basic(product)),
            Product::Exclusive(product) => Err(ProductError::NotPurchasable(product.details.id)),
        }
    }
}

impl From<PurchasableProduct> for Product {
    fn from(product: PurchasableProduct) -> Self {
        match product {
            PurchasableProduct::Artwork(product) => Product::Artwork(product),
            PurchasableProduct::Basic(product) => Product::Basic(product),
        }
    }
}

impl From<ArtworkProduct> for PurchasableProduct {
    fn from(product: ArtworkProduct) -> Self {
        PurchasableProduct::Artwork(product)
    }
}

impl From<BasicProduct> for PurchasableProduct {
    fn from(product: BasicProduct) -> Self {
        PurchasableProduct::Basic(product)
    }
}
