//! Cart
//!
//! The session cart: an observable list of line items whose `item_count` and
//! `total_price` are recomputed from the lines after every mutation.

use rusty_money::{Money, iso::Currency};
use serde::Serialize;
use tracing::debug;

use crate::{
    pricing::calculate_item_price,
    products::{ProductId, PurchasableProduct},
    store::{Store, SubscriptionKey},
};

mod selection;

pub use selection::Selection;

/// One line in the cart.
///
/// Lines are identified by product id and selection together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    product_id: ProductId,
    product: PurchasableProduct,
    quantity: u32,
    selected_options: Selection,
    item_price: i64,
}

impl CartItem {
    /// Returns the product id.
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Returns the product as it was when added.
    pub fn product(&self) -> &PurchasableProduct {
        &self.product
    }

    /// Returns the quantity, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the customization selection.
    pub fn selection(&self) -> &Selection {
        &self.selected_options
    }

    /// Returns the unit price in minor units, resolved when the line was added.
    pub fn item_price(&self) -> i64 {
        self.item_price
    }

    /// Returns `quantity × item_price` in minor units.
    pub fn line_total(&self) -> i64 {
        self.item_price.saturating_mul(i64::from(self.quantity))
    }

    /// Whether this is the line for `product_id` with exactly `selection`.
    pub fn is_line(&self, product_id: &ProductId, selection: &Selection) -> bool {
        &self.product_id == product_id && &self.selected_options == selection
    }
}

/// Cart contents with derived totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartItem>,
    item_count: u64,
    total_price: i64,
}

impl Cart {
    /// Line items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of all line quantities.
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Sum of all line totals, in minor units.
    pub fn total_price(&self) -> i64 {
        self.total_price
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the line for `product_id` with exactly `selection`.
    pub fn line(&self, product_id: &ProductId, selection: &Selection) -> Option<&CartItem> {
        self.items
            .iter()
            .find(|item| item.is_line(product_id, selection))
    }

    fn recalculate(&mut self) {
        self.items.retain(|item| item.quantity > 0);

        self.item_count = self
            .items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum();

        self.total_price = self
            .items
            .iter()
            .map(CartItem::line_total)
            .fold(0, i64::saturating_add);
    }
}

/// Observable cart for one session.
#[derive(Debug)]
pub struct CartStore {
    store: Store<Cart>,
    currency: &'static Currency,
}

impl CartStore {
    /// Create an empty cart priced in `currency`.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            store: Store::new(Cart::default()),
            currency,
        }
    }

    /// Returns the current cart.
    pub fn cart(&self) -> &Cart {
        self.store.get()
    }

    /// Returns an owned copy of the current cart, e.g. for checkout.
    pub fn snapshot(&self) -> Cart {
        self.store.get().clone()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.cart().is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Cart total as money in the cart currency.
    pub fn subtotal(&self) -> Money<'static, Currency> {
        Money::from_minor(self.cart().total_price(), self.currency)
    }

    /// Add `quantity` units of `product` with `selection`.
    ///
    /// Merges into an existing line with the same product id and selection,
    /// otherwise appends a new line. Adding zero units does nothing.
    pub fn add_item(&mut self, product: &PurchasableProduct, quantity: u32, selection: Selection) {
        if quantity == 0 {
            debug!(product = %product.id(), "ignoring add of zero units");
            return;
        }

        let item_price = calculate_item_price(product, &selection);

        debug!(product = %product.id(), quantity, item_price, "adding to cart");

        self.store.update(|cart| {
            if let Some(item) = cart
                .items
                .iter_mut()
                .find(|item| item.is_line(product.id(), &selection))
            {
                item.quantity = item.quantity.saturating_add(quantity);
            } else {
                cart.items.push(CartItem {
                    product_id: product.id().clone(),
                    product: product.clone(),
                    quantity,
                    selected_options: selection,
                    item_price,
                });
            }

            cart.recalculate();
        });
    }

    /// Remove every line for `product_id`, whatever its selection.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        debug!(product = %product_id, "removing all lines from cart");

        self.store.update(|cart| {
            cart.items.retain(|item| &item.product_id != product_id);
            cart.recalculate();
        });
    }

    /// Remove the line for `product_id` with exactly `selection`.
    pub fn remove_line(&mut self, product_id: &ProductId, selection: &Selection) {
        debug!(product = %product_id, "removing line from cart");

        self.store.update(|cart| {
            cart.items.retain(|item| !item.is_line(product_id, selection));
            cart.recalculate();
        });
    }

    /// Set the quantity of the line for `product_id` with exactly `selection`.
    ///
    /// Negative quantities clamp to zero and a zero quantity removes the line.
    /// Unknown lines are left alone.
    pub fn update_quantity(&mut self, product_id: &ProductId, selection: &Selection, quantity: i64) {
        let quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);

        debug!(product = %product_id, quantity, "updating cart quantity");

        self.store.update(|cart| {
            if let Some(item) = cart
                .items
                .iter_mut()
                .find(|item| item.is_line(product_id, selection))
            {
                item.quantity = quantity;
            }

            cart.recalculate();
        });
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        debug!("clearing cart");

        self.store.set(Cart::default());
    }

    /// Subscribe to cart changes.
    ///
    /// The subscriber is called with the current cart straight away and after
    /// every mutation.
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionKey
    where
        F: FnMut(&Cart) + Send + 'static,
    {
        self.store.subscribe(subscriber)
    }

    /// Subscribe to whether the cart is empty.
    ///
    /// Called with the current state straight away and then only when it flips.
    pub fn subscribe_is_empty<F>(&mut self, subscriber: F) -> SubscriptionKey
    where
        F: FnMut(&bool) + Send + 'static,
    {
        self.store.derive(Cart::is_empty, subscriber)
    }

    /// Remove a subscriber registered with either subscribe method.
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> bool {
        self.store.unsubscribe(key)
    }
}
