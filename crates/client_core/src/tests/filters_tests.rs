use super::*;

fn day(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("date")
}

#[test]
fn defaults_match_the_initial_form() {
    let state = FilterState::default();
    assert_eq!(state.min_price, 0.0);
    assert_eq!(state.max_price, 1000.0);
    assert!(state.category.is_empty());
    assert_eq!(state.start_date, None);
}

#[test]
fn patch_merges_only_supplied_fields() {
    let mut state = FilterState::default();
    assert!(state.apply(FilterPatch::category(" beauty ")));
    assert!(state.apply(FilterPatch::price(10.0, 100.0)));
    assert_eq!(state.category, "beauty");
    assert_eq!(state.min_price, 10.0);
    assert_eq!(state.max_price, 100.0);
    assert_eq!(state.name, "");
}

#[test]
fn identical_patch_reports_no_change() {
    let mut state = FilterState::default();
    state.apply(FilterPatch::name("phone"));
    assert!(!state.apply(FilterPatch::name("phone ")));
    assert!(!state.apply(FilterPatch::default()));
}

#[test]
fn dates_can_be_set_and_cleared() {
    let mut state = FilterState::default();
    state.apply(FilterPatch::dates(Some(day("2024-05-01")), Some(day("2024-05-31"))));
    assert_eq!(state.end_date, Some(day("2024-05-31")));

    assert!(state.apply(FilterPatch {
        end_date: Some(None),
        ..FilterPatch::default()
    }));
    assert_eq!(state.start_date, Some(day("2024-05-01")));
    assert_eq!(state.end_date, None);
}

#[test]
fn default_state_sends_no_price_range() {
    let state = FilterState::default();
    assert_eq!(
        state.query_pairs(1, 10),
        vec![
            ("page", "1".to_string()),
            ("per_page", "10".to_string()),
        ]
    );
}

#[test]
fn query_carries_every_active_filter() {
    let mut state = FilterState::default();
    state.apply(FilterPatch {
        min_price: Some(9.5),
        max_price: Some(50.0),
        category: Some("beauty".into()),
        name: Some("mascara".into()),
        start_date: Some(Some(day("2024-05-01"))),
        end_date: Some(Some(day("2024-05-31"))),
    });
    let pairs = state.query_pairs(3, 20);
    assert_eq!(
        pairs,
        vec![
            ("min_price", "9.5".to_string()),
            ("max_price", "50".to_string()),
            ("name", "mascara".to_string()),
            ("category", "beauty".to_string()),
            ("start_date", "2024-05-01".to_string()),
            ("end_date", "2024-05-31".to_string()),
            ("page", "3".to_string()),
            ("per_page", "20".to_string()),
        ]
    );
}

#[test]
fn cleared_max_price_disables_the_range() {
    let mut state = FilterState::default();
    state.apply(FilterPatch {
        max_price: Some(f64::NAN),
        ..FilterPatch::default()
    });
    assert_eq!(state.max_price, 0.0);
    assert_eq!(state.price_range(), None);
    assert!(state
        .query_pairs(1, 10)
        .iter()
        .all(|(key, _)| *key != "min_price" && *key != "max_price"));
}

#[test]
fn zero_minimum_leaves_the_range_out() {
    let mut state = FilterState::default();
    state.apply(FilterPatch::price(0.0, 250.0));
    assert_eq!(state.price_range(), None);

    state.apply(FilterPatch::price(5.0, 250.0));
    assert_eq!(state.price_range(), Some((5.0, 250.0)));
}
