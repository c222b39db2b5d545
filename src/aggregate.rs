use crate::models::Product;
use std::collections::BTreeMap;

pub const APPLE_BRAND: &str = "Apple";

/// Number of products per category name.
pub type CategoryCounts = BTreeMap<String, usize>;

pub fn category_counts(products: &[Product]) -> CategoryCounts {
    products.iter().fold(CategoryCounts::new(), |mut counts, product| {
        *counts.entry(product.category.clone()).or_default() += 1;
        counts
    })
}

/// Products whose brand matches exactly, in their original order.
pub fn filter_brand(products: &[Product], brand: &str) -> Vec<Product> {
    products
        .iter()
        .filter(|product| product.brand == brand)
        .cloned()
        .collect()
}

pub fn apple_products(products: &[Product]) -> Vec<Product> {
    filter_brand(products, APPLE_BRAND)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn sample() -> Vec<Product> {
        vec![
            Product::new("Phone", "Apple"),
            Product::new("Phone", "Samsung"),
            Product::new("Laptop", "Apple"),
        ]
    }

    #[test]
    fn counts_group_by_category() {
        let counts = category_counts(&sample());
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["Phone"], 2);
        assert_eq!(counts["Laptop"], 1);
    }

    #[test]
    fn apple_subset_keeps_order() {
        let apple = apple_products(&sample());
        assert_eq!(apple.len(), 2);
        assert_eq!(apple[0].category, "Phone");
        assert_eq!(apple[1].category, "Laptop");
    }

    #[test]
    fn brand_match_is_exact() {
        let products = vec![Product::new("Phone", "apple"), Product::new("Phone", "Apple ")];
        assert!(apple_products(&products).is_empty());
    }

    #[test]
    fn empty_list_yields_empty_views() {
        assert!(category_counts(&[]).is_empty());
        assert!(apple_products(&[]).is_empty());
    }

    fn products_strategy() -> impl Strategy<Value = Vec<Product>> {
        let category = prop::sample::select(vec!["Phone", "Laptop", "Tablet", ""]);
        let brand = prop::sample::select(vec!["Apple", "Samsung", "Dell", ""]);
        prop::collection::vec((category, brand), 0..40).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(category, brand)| Product::new(category, brand))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn counts_cover_every_product(products in products_strategy()) {
            let counts = category_counts(&products);
            let distinct: BTreeSet<&str> = products.iter().map(|p| p.category.as_str()).collect();
            let keys: BTreeSet<&str> = counts.keys().map(String::as_str).collect();
            prop_assert_eq!(keys, distinct);
            prop_assert_eq!(counts.values().sum::<usize>(), products.len());
        }

        #[test]
        fn apple_subset_is_ordered_sublist(products in products_strategy()) {
            let expected: Vec<Product> = products
                .iter()
                .filter(|p| p.brand == "Apple")
                .cloned()
                .collect();
            prop_assert_eq!(apple_products(&products), expected);
        }
    }
}
