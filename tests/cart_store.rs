//! Cart totals under arbitrary sequences of mutations.
//!
//! A subscriber checks the cached `item_count` and `total_price` against the
//! lines on every notification, so the invariant is checked after each
//! mutation rather than only at the end.

use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use rusty_money::iso::EUR;
use testresult::TestResult;

use vitrine::{
    cart::{Cart, CartStore, Selection},
    products::{
        ArtworkProduct, BasicProduct, CustomizationAxis, Product, ProductDetails, ProductId,
        PurchasableProduct,
    },
};

fn details(id: &str) -> ProductDetails {
    ProductDetails {
        id: ProductId::new(id),
        slug: id.to_string(),
        name: id.to_string(),
        description: String::new(),
        images: Vec::new(),
    }
}

fn artwork(id: &str, price: i64) -> PurchasableProduct {
    PurchasableProduct::Artwork(ArtworkProduct {
        details: details(id),
        price,
        stock: 10,
        available_colors: None,
    })
}

fn basic(id: &str, base_price: i64) -> PurchasableProduct {
    PurchasableProduct::Basic(BasicProduct {
        details: details(id),
        base_price,
        customization_options: Some(vec![
            CustomizationAxis {
                name: "Size".to_string(),
                options: vec!["S".to_string(), "M".to_string(), "L".to_string()],
                price_modifier: Some(200),
            },
            CustomizationAxis {
                name: "Finish".to_string(),
                options: vec!["Matte".to_string(), "Gloss".to_string()],
                price_modifier: None,
            },
        ]),
        lead_time: Some("4-6 weeks".to_string()),
    })
}

fn catalog() -> Vec<PurchasableProduct> {
    vec![
        artwork("nocturne", 45_000),
        artwork("aubade", 1_299),
        basic("linen-shirt", 8_900),
    ]
}

fn selections() -> Vec<Selection> {
    vec![
        Selection::new(),
        Selection::new().with("Size", "M"),
        Selection::new().with("Size", "L").with("Finish", "Gloss"),
        Selection::new().with("Finish", "Matte"),
    ]
}

fn totals_match(cart: &Cart) -> bool {
    let count: u64 = cart.items().iter().map(|item| u64::from(item.quantity())).sum();
    let total: i64 = cart
        .items()
        .iter()
        .map(|item| i64::from(item.quantity()) * item.item_price())
        .sum();

    cart.item_count() == count
        && cart.total_price() == total
        && cart.items().iter().all(|item| item.quantity() > 0)
}

#[derive(Debug, Clone)]
enum Op {
    Add {
        product: usize,
        selection: usize,
        quantity: u32,
    },
    Remove {
        product: usize,
    },
    RemoveLine {
        product: usize,
        selection: usize,
    },
    Update {
        product: usize,
        selection: usize,
        quantity: i64,
    },
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..3usize, 0..4usize, 0..5u32).prop_map(|(product, selection, quantity)| Op::Add {
            product,
            selection,
            quantity,
        }),
        1 => (0..3usize).prop_map(|product| Op::Remove { product }),
        1 => (0..3usize, 0..4usize)
            .prop_map(|(product, selection)| Op::RemoveLine { product, selection }),
        2 => (0..3usize, 0..4usize, -3..8i64).prop_map(|(product, selection, quantity)| {
            Op::Update {
                product,
                selection,
                quantity,
            }
        }),
        1 => Just(Op::Clear),
    ]
}

fn apply(store: &mut CartStore, op: &Op, catalog: &[PurchasableProduct], selections: &[Selection]) {
    let product = |index: usize| catalog.get(index % catalog.len());
    let selection = |index: usize| selections.get(index % selections.len()).cloned().unwrap_or_default();

    match *op {
        Op::Add {
            product: p,
            selection: s,
            quantity,
        } => {
            if let Some(product) = product(p) {
                store.add_item(product, quantity, selection(s));
            }
        }
        Op::Remove { product: p } => {
            if let Some(product) = product(p) {
                store.remove_item(product.id());
            }
        }
        Op::RemoveLine {
            product: p,
            selection: s,
        } => {
            if let Some(product) = product(p) {
                store.remove_line(product.id(), &selection(s));
            }
        }
        Op::Update {
            product: p,
            selection: s,
            quantity,
        } => {
            if let Some(product) = product(p) {
                store.update_quantity(product.id(), &selection(s), quantity);
            }
        }
        Op::Clear => store.clear(),
    }
}

proptest! {
    #[test]
    fn totals_hold_after_every_mutation(ops in prop::collection::vec(op(), 0..40)) {
        let catalog = catalog();
        let selections = selections();
        let mut store = CartStore::new(EUR);

        let checks = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&checks);

        store.subscribe(move |cart| {
            if let Ok(mut checks) = sink.lock() {
                checks.push(totals_match(cart));
            }
        });

        for op in &ops {
            apply(&mut store, op, &catalog, &selections);
        }

        let checks = checks.lock().map(|checks| checks.clone()).unwrap_or_default();

        prop_assert!(!checks.is_empty());
        prop_assert!(checks.iter().all(|ok| *ok), "totals diverged from lines: {checks:?}");
        prop_assert!(totals_match(store.cart()));
    }

    #[test]
    fn lines_stay_unique(ops in prop::collection::vec(op(), 0..40)) {
        let catalog = catalog();
        let selections = selections();
        let mut store = CartStore::new(EUR);

        for op in &ops {
            apply(&mut store, op, &catalog, &selections);
        }

        let items = store.cart().items();

        for (index, item) in items.iter().enumerate() {
            let duplicates = items
                .iter()
                .skip(index + 1)
                .filter(|other| other.is_line(item.product_id(), item.selection()))
                .count();

            prop_assert_eq!(duplicates, 0);
        }
    }
}

#[test]
fn same_selection_merges_and_different_selection_splits() {
    let shirt = basic("linen-shirt", 8_900);
    let mut store = CartStore::new(EUR);

    store.add_item(&shirt, 1, Selection::new().with("Size", "M"));
    store.add_item(&shirt, 2, Selection::new().with("Size", "M"));
    store.add_item(&shirt, 1, Selection::new().with("Size", "L"));

    let cart = store.cart();

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.item_count(), 4);
    assert_eq!(cart.total_price(), 4 * 9_100);
}

#[test]
fn zero_and_negative_updates_remove_the_line() {
    let print = artwork("aubade", 1_299);
    let shirt = basic("linen-shirt", 8_900);
    let mut store = CartStore::new(EUR);

    store.add_item(&print, 2, Selection::new());
    store.add_item(&shirt, 1, Selection::new());

    store.update_quantity(print.id(), &Selection::new(), 0);
    assert_eq!(store.cart().len(), 1);

    store.update_quantity(shirt.id(), &Selection::new(), -4);
    assert!(store.is_empty());
    assert_eq!(store.cart().total_price(), 0);
}

#[test]
fn checkout_reads_a_snapshot() -> TestResult {
    let catalog: Vec<Product> = serde_json::from_str(
        r#"[
            {
                "type": "artwork",
                "id": "nocturne",
                "slug": "nocturne",
                "name": "Nocturne",
                "description": "Oil on linen",
                "price": 45000,
                "stock": 1
            },
            {
                "type": "exclusive",
                "id": "atelier",
                "slug": "atelier",
                "name": "Atelier commission",
                "description": "By appointment",
                "inquiryContact": "studio@example.com"
            }
        ]"#,
    )?;

    let purchasable: Vec<PurchasableProduct> = catalog
        .into_iter()
        .filter_map(|product| PurchasableProduct::try_from(product).ok())
        .collect();

    assert_eq!(purchasable.len(), 1, "exclusive products cannot be carted");

    let mut store = CartStore::new(EUR);

    for product in &purchasable {
        store.add_item(product, 1, Selection::new());
    }

    let snapshot = store.snapshot();
    store.clear();

    assert_eq!(snapshot.total_price(), 45_000);
    assert_eq!(snapshot.item_count(), 1);
    assert!(store.is_empty());

    Ok(())
}
