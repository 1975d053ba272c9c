use proptest::prelude::*;
use toystore::query::{PAGE_SIZE, max_page_count};
use toystore::toy::{Toy, ToyFilter};
use toystore::{Backend, Config};

fn toy(name: &str, price: f64) -> Toy {
    Toy {
        id: None,
        name: name.to_string(),
        img_urls: vec![],
        price,
        brands: vec![],
        product_types: vec![],
        companies: vec![],
        in_stock: true,
        description: "d".to_string(),
        msgs: vec![],
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_pages_partition_the_catalog(prices in proptest::collection::vec(1u32..1000, 0..30)) {
        let b = Backend::new(&Config::new("prop_page_db", "test-secret")).unwrap();
        for (i, p) in prices.iter().enumerate() {
            b.toys.add(&toy(&format!("Toy {i}"), f64::from(*p))).unwrap();
        }

        let all = b.toys.query(&ToyFilter::default()).unwrap();
        prop_assert_eq!(all.toys.len(), prices.len());
        prop_assert_eq!(all.max_page_count, max_page_count(prices.len()));

        let mut collected = Vec::new();
        for page_idx in 0..all.max_page_count {
            let page = b
                .toys
                .query(&ToyFilter { page_idx: Some(page_idx), ..Default::default() })
                .unwrap();
            prop_assert!(page.toys.len() <= PAGE_SIZE);
            // Only the last page may run short.
            if page_idx + 1 < all.max_page_count {
                prop_assert_eq!(page.toys.len(), PAGE_SIZE);
            }
            collected.extend(page.toys);
        }
        // Pages concatenate to exactly the unpaginated result, order included.
        prop_assert_eq!(collected, all.toys);

        // A page index at or past the page count yields an empty page.
        let past = b
            .toys
            .query(&ToyFilter { page_idx: Some(all.max_page_count), ..Default::default() })
            .unwrap();
        prop_assert!(past.toys.is_empty());
    }

    #[test]
    fn prop_price_sort_is_non_decreasing_and_stable(prices in proptest::collection::vec(1u32..10, 0..40)) {
        let b = Backend::new(&Config::new("prop_sort_db", "test-secret")).unwrap();
        for (i, p) in prices.iter().enumerate() {
            b.toys.add(&toy(&format!("Toy {i}"), f64::from(*p))).unwrap();
        }

        let filter = ToyFilter {
            sort_type: Some("price".to_string()),
            dir: Some(1),
            ..Default::default()
        };
        let sorted = b.toys.query(&filter).unwrap().toys;
        for w in sorted.windows(2) {
            prop_assert!(w[0].price <= w[1].price);
            // Equal prices keep insertion order.
            if w[0].price == w[1].price {
                prop_assert!(w[0].id.unwrap().bytes() < w[1].id.unwrap().bytes());
            }
        }
    }
}
