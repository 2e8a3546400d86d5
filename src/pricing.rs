//! Pricing

use crate::{
    cart::Selection,
    products::{BasicProduct, PurchasableProduct},
};

/// Calculates the unit price of a product with the given selection, in minor units.
///
/// Artworks have a fixed price and ignore the selection. Basics add the
/// modifier of every customization axis that has a non-empty selected value;
/// the modifier is per axis, so it does not depend on which value was chosen.
pub fn calculate_item_price(product: &PurchasableProduct, selection: &Selection) -> i64 {
    match product {
        PurchasableProduct::Artwork(artwork) => artwork.price,
        PurchasableProduct::Basic(basic) => basic_price(basic, selection),
    }
}

fn basic_price(product: &BasicProduct, selection: &Selection) -> i64 {
    let Some(axes) = &product.customization_options else {
        return product.base_price;
    };

    axes.iter()
        .filter(|axis| selection.get(&axis.name).is_some_and(|value| !value.is_empty()))
        .filter_map(|axis| axis.price_modifier)
        .fold(product.base_price, i64::saturating_add)
}

#[cfg(test)]
mod tests {
    use crate::products::{ArtworkProduct, CustomizationAxis, ProductDetails, ProductId};

    use super::*;

    fn details(id: &str) -> ProductDetails {
        ProductDetails {
            id: ProductId::new(id),
            slug: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            images: Vec::new(),
        }
    }

    fn shirt() -> PurchasableProduct {
        PurchasableProduct::Basic(BasicProduct {
            details: details("shirt"),
            base_price: 1000,
            customization_options: Some(vec![
                CustomizationAxis {
                    name: "Size".to_string(),
                    options: vec!["S".to_string(), "M".to_string()],
                    price_modifier: None,
                },
                CustomizationAxis {
                    name: "Material".to_string(),
                    options: vec!["Cotton".to_string(), "Silk".to_string()],
                    price_modifier: Some(200),
                },
            ]),
            lead_time: None,
        })
    }

    #[test]
    fn basic_adds_modifier_when_axis_selected() {
        let selection = Selection::new().with("Material", "Silk");

        assert_eq!(calculate_item_price(&shirt(), &selection), 1200);
    }

    #[test]
    fn basic_modifier_is_per_axis_not_per_value() {
        let cotton = Selection::new().with("Material", "Cotton");
        let silk = Selection::new().with("Material", "Silk");

        assert_eq!(
            calculate_item_price(&shirt(), &cotton),
            calculate_item_price(&shirt(), &silk)
        );
    }

    #[test]
    fn basic_without_selection_costs_base_price() {
        assert_eq!(calculate_item_price(&shirt(), &Selection::new()), 1000);

        let size_only = Selection::new().with("Size", "M");
        assert_eq!(calculate_item_price(&shirt(), &size_only), 1000);

        let blank = Selection::new().with("Material", "");
        assert_eq!(calculate_item_price(&shirt(), &blank), 1000);
    }

    #[test]
    fn basic_without_axes_costs_base_price() {
        let plain = PurchasableProduct::Basic(BasicProduct {
            details: details("plain"),
            base_price: 4500,
            customization_options: None,
            lead_time: Some("2 weeks".to_string()),
        });

        let selection = Selection::new().with("Material", "Silk");

        assert_eq!(calculate_item_price(&plain, &selection), 4500);
    }

    #[test]
    fn artwork_ignores_selection() {
        let artwork = PurchasableProduct::Artwork(ArtworkProduct {
            details: details("nocturne"),
            price: 120_000,
            stock: 1,
            available_colors: None,
        });

        let selection = Selection::new().with("Material", "Silk").with("Color", "black");

        assert_eq!(calculate_item_price(&artwork, &Selection::new()), 120_000);
        assert_eq!(calculate_item_price(&artwork, &selection), 120_000);
    }
}
