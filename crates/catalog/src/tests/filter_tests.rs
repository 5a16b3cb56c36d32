use super::*;
use shared::{domain::ProductId, error::ErrorCode};

fn product(id: i64, title: &str, category: &str, price: f64, created_at: Option<&str>) -> Product {
    let mut raw = serde_json::json!({
        "id": id,
        "title": title,
        "category": category,
        "price": price,
    });
    if let Some(created_at) = created_at {
        raw["meta"] = serde_json::json!({ "createdAt": created_at });
    }
    serde_json::from_value(raw).expect("fixture product")
}

fn catalog() -> Vec<Product> {
    vec![
        product(1, "iPhone 9", "smartphones", 549.0, Some("2024-05-20T10:00:00Z")),
        product(2, "iPhone X", "smartphones", 899.0, Some("2024-05-23T08:56:21Z")),
        product(3, "Samsung Universe 9", "Smartphones", 1249.0, Some("2024-06-01T00:00:00Z")),
        product(4, "Essence Mascara", "beauty", 9.99, None),
        product(5, "Phone Stand", "accessories", 19.5, Some("2024-05-23T23:30:00Z")),
    ]
}

fn ids(products: &[Product]) -> Vec<i64> {
    products.iter().map(|product| product.id.0).collect()
}

fn params() -> ProductListParams {
    ProductListParams::default()
}

#[test]
fn no_parameters_keep_everything_in_upstream_order() {
    let filter = ProductFilter::from_params(&params()).expect("filter");
    assert!(filter.is_empty());
    assert_eq!(ids(&filter.apply(catalog())), vec![1, 2, 3, 4, 5]);
}

#[test]
fn price_range_is_inclusive_and_needs_both_bounds() {
    let filter = ProductFilter::from_params(&ProductListParams {
        min_price: Some("19.5".into()),
        max_price: Some("899".into()),
        ..params()
    })
    .expect("filter");
    assert_eq!(ids(&filter.apply(catalog())), vec![1, 2, 5]);

    let only_min = ProductFilter::from_params(&ProductListParams {
        min_price: Some("500".into()),
        ..params()
    })
    .expect("filter");
    assert_eq!(only_min.price, None);
    assert_eq!(only_min.apply(catalog()).len(), 5);
}

#[test]
fn inverted_price_range_matches_nothing() {
    let filter = ProductFilter::from_params(&ProductListParams {
        min_price: Some("100".into()),
        max_price: Some("10".into()),
        ..params()
    })
    .expect("filter");
    assert!(filter.apply(catalog()).is_empty());
}

#[test]
fn name_is_a_case_insensitive_title_substring() {
    let filter = ProductFilter::from_params(&ProductListParams {
        name: Some("  PHONE ".into()),
        ..params()
    })
    .expect("filter");
    assert_eq!(ids(&filter.apply(catalog())), vec![1, 2, 5]);
}

#[test]
fn search_alias_fills_the_name_filter() {
    let query: ProductListParams =
        serde_json::from_value(serde_json::json!({ "search": "mascara" })).expect("params");
    let filter = ProductFilter::from_params(&query).expect("filter");
    assert_eq!(ids(&filter.apply(catalog())), vec![4]);
}

#[test]
fn category_is_an_exact_case_insensitive_match() {
    let filter = ProductFilter::from_params(&ProductListParams {
        category: Some("SmartPhones".into()),
        ..params()
    })
    .expect("filter");
    assert_eq!(ids(&filter.apply(catalog())), vec![1, 2, 3]);

    let partial = ProductFilter::from_params(&ProductListParams {
        category: Some("smart".into()),
        ..params()
    })
    .expect("filter");
    assert!(partial.apply(catalog()).is_empty());
}

#[test]
fn date_window_includes_the_whole_end_day_and_skips_undated_products() {
    let filter = ProductFilter::from_params(&ProductListParams {
        start_date: Some("2024-05-21".into()),
        end_date: Some("2024-05-23".into()),
        ..params()
    })
    .expect("filter");
    assert_eq!(ids(&filter.apply(catalog())), vec![2, 5]);

    let open_ended = ProductFilter::from_params(&ProductListParams {
        start_date: Some("2024-05-23".into()),
        ..params()
    })
    .expect("filter");
    assert_eq!(ids(&open_ended.apply(catalog())), vec![2, 3, 5]);
}

#[test]
fn placeholders_and_blanks_are_ignored() {
    let filter = ProductFilter::from_params(&ProductListParams {
        min_price: Some(String::new()),
        max_price: Some("100".into()),
        category: Some("   ".into()),
        start_date: Some("null".into()),
        end_date: Some("undefined".into()),
        ..params()
    })
    .expect("filter");
    assert!(filter.is_empty());
}

#[test]
fn filters_compose() {
    let filter = ProductFilter::from_params(&ProductListParams {
        min_price: Some("500".into()),
        max_price: Some("1000".into()),
        name: Some("iphone".into()),
        category: Some("smartphones".into()),
        end_date: Some("2024-05-22".into()),
        ..params()
    })
    .expect("filter");
    let matched = filter.apply(catalog());
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, ProductId(1));
}

#[test]
fn malformed_inputs_are_validation_errors() {
    let bad_date = ProductFilter::from_params(&ProductListParams {
        start_date: Some("23.05.2024".into()),
        ..params()
    })
    .expect_err("bad date");
    assert_eq!(bad_date.code, ErrorCode::Validation);
    assert!(bad_date.message.contains("start_date"));

    let bad_price = ProductFilter::from_params(&ProductListParams {
        min_price: Some("cheap".into()),
        max_price: Some("10".into()),
        ..params()
    })
    .expect_err("bad price");
    assert_eq!(bad_price.code, ErrorCode::Validation);

    let infinite = ProductFilter::from_params(&ProductListParams {
        min_price: Some("inf".into()),
        max_price: Some("10".into()),
        ..params()
    })
    .expect_err("infinite price");
    assert_eq!(infinite.code, ErrorCode::Validation);
}

#[test]
fn zero_price_bound_switches_the_range_off() {
    for (min, max) in [("0", "1000"), ("10", "0"), ("0.0", "0")] {
        let filter = ProductFilter::from_params(&ProductListParams {
            min_price: Some(min.into()),
            max_price: Some(max.into()),
            ..params()
        })
        .expect("filter");
        assert_eq!(filter.price, None, "{min}..{max}");
        assert_eq!(filter.apply(catalog()).len(), 5);
    }
}
