use proptest::prelude::*;

use crate::catalog::sample::sample_catalog;
use crate::catalog::CatalogItem;
use crate::search::engine::SearchEngine;
use crate::search::filters::{FilterSet, SortMode};
use crate::search::similarity::{distance, similarity};

fn word() -> impl Strategy<Value = String> {
    "[a-z]{2,8}"
}

fn title() -> impl Strategy<Value = String> {
    proptest::collection::vec(word(), 1..4).prop_map(|words| words.join(" "))
}

fn priced_items() -> impl Strategy<Value = Vec<CatalogItem>> {
    proptest::collection::vec((0.0f64..500.0, 0.0f64..5.0, any::<bool>()), 0..30).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (price, rating, in_stock))| CatalogItem {
                id: i.to_string(),
                title: format!("Item {}", i),
                price,
                rating,
                in_stock,
                ..Default::default()
            })
            .collect()
    })
}

// Similarity stays a normalized, symmetric measure
proptest! {
    #[test]
    fn similarity_of_string_with_itself_is_one(s in "\\PC{0,40}") {
        prop_assert_eq!(similarity(&s, &s), 1.0);
    }

    #[test]
    fn similarity_is_symmetric_and_bounded(a in "\\PC{0,30}", b in "\\PC{0,30}") {
        let ab = similarity(&a, &b);
        let ba = similarity(&b, &a);
        prop_assert_eq!(ab, ba);
        prop_assert!((0.0..=1.0).contains(&ab));
    }

    #[test]
    fn distance_obeys_triangle_inequality(a in "[a-d]{0,12}", b in "[a-d]{0,12}", c in "[a-d]{0,12}") {
        prop_assert!(distance(&a, &c) <= distance(&a, &b) + distance(&b, &c));
    }
}

// Pipeline-level guarantees
proptest! {
    #[test]
    fn blank_query_never_returns_items(blank in "[ \t]{0,6}") {
        let engine = SearchEngine::new();
        prop_assert!(engine.search(&blank, sample_catalog(), &FilterSet::default()).is_empty());
    }

    #[test]
    fn exact_title_is_always_admitted(title in title()) {
        let mut catalog = sample_catalog();
        catalog.push(CatalogItem {
            id: "generated".to_string(),
            title: title.clone(),
            ..Default::default()
        });

        let engine = SearchEngine::new();
        let results = engine.search(&title, catalog, &FilterSet::default());
        prop_assert!(results.iter().any(|i| i.id == "generated"));
    }

    #[test]
    fn filters_only_remove_and_sort_by_price_ascends(items in priced_items(), in_stock_only in any::<bool>()) {
        let filters = FilterSet {
            in_stock_only,
            sort_by: Some(SortMode::Price),
            ..Default::default()
        };
        let result = filters.apply(items.clone());

        prop_assert!(result.len() <= items.len());
        prop_assert!(result.iter().all(|i| items.contains(i)));
        prop_assert!(result.iter().all(|i| !in_stock_only || i.in_stock));
        prop_assert!(result.windows(2).all(|w| w[0].price <= w[1].price));
    }

    #[test]
    fn rating_sort_descends(items in priced_items()) {
        let filters = FilterSet {
            sort_by: Some(SortMode::Rating),
            ..Default::default()
        };
        let result = filters.apply(items);
        prop_assert!(result.windows(2).all(|w| w[0].rating >= w[1].rating));
    }
}
