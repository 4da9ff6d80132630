use container_core::{compute_view, filter_records, ContainerRecord, QueryState, SortOrder};
use proptest::prelude::*;

fn sample() -> Vec<ContainerRecord> {
    vec![
        ContainerRecord::new("Alpha").with_created_time("2023-01-02T00:00:00Z"),
        ContainerRecord::new("beta").with_created_time("2023-01-01T00:00:00Z"),
    ]
}

fn names(records: &[ContainerRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.name.clone().unwrap_or_default())
        .collect()
}

#[test]
fn name_ascending_orders_case_insensitively() {
    let view = compute_view(Some(sample().as_slice()), &QueryState::default());
    assert_eq!(names(&view), vec!["Alpha", "beta"]);
}

#[test]
fn time_ascending_puts_earliest_first() {
    let query = QueryState::new("", SortOrder::TimeAscending);
    let view = compute_view(Some(sample().as_slice()), &query);
    assert_eq!(names(&view), vec!["beta", "Alpha"]);
}

#[test]
fn search_is_case_insensitive_substring() {
    let query = QueryState::new("al", SortOrder::NameAscending);
    let view = compute_view(Some(sample().as_slice()), &query);
    assert_eq!(names(&view), vec!["Alpha"]);
}

#[test]
fn nameless_records_never_appear() {
    let mut records = sample();
    records.insert(1, ContainerRecord::default().with_created_time("2020-01-01T00:00:00Z"));
    records.push(ContainerRecord::new(""));

    for order in SortOrder::SELECTABLE {
        for term in ["", "a", "zzz"] {
            let view = compute_view(Some(records.as_slice()), &QueryState::new(term, order));
            assert!(view.iter().all(|record| record.validate().is_ok()));
        }
    }
}

#[test]
fn whitespace_only_names_are_still_names() {
    let records = vec![ContainerRecord::new(" "), ContainerRecord::new("a")];
    let view = compute_view(Some(records.as_slice()), &QueryState::default());
    assert_eq!(names(&view), vec![" ", "a"]);
}

#[test]
fn accented_names_sort_beside_their_base_letter() {
    let records = vec![
        ContainerRecord::new("fig"),
        ContainerRecord::new("Éclair"),
        ContainerRecord::new("zeta"),
    ];

    let ascending = compute_view(Some(records.as_slice()), &QueryState::default());
    assert_eq!(names(&ascending), vec!["Éclair", "fig", "zeta"]);

    let descending = compute_view(
        Some(records.as_slice()),
        &QueryState::new("", SortOrder::NameDescending),
    );
    assert_eq!(names(&descending), vec!["zeta", "fig", "Éclair"]);
}

#[test]
fn wire_records_with_missing_fields_still_derive() {
    let records: Vec<ContainerRecord> = serde_json::from_str(
        r#"[
            {"name": "web-ide", "type": "node", "createdTime": "2023-03-01T10:00:00"},
            {"type": "java"},
            {"name": null, "description": "orphan"},
            {"name": "api", "createdTime": "garbage"}
        ]"#,
    )
    .unwrap();

    let view = compute_view(
        Some(records.as_slice()),
        &QueryState::new("", SortOrder::TimeDescending),
    );
    assert_eq!(names(&view), vec!["web-ide", "api"]);
    assert_eq!(view[0].kind.as_deref(), Some("node"));
}

fn record_strategy() -> impl Strategy<Value = ContainerRecord> {
    (
        proptest::option::of("[a-zA-Z ]{0,8}"),
        proptest::option::of(0i64..2_000_000_000),
    )
        .prop_map(|(name, seconds)| ContainerRecord {
            name,
            created_time: seconds.map(|seconds| {
                time::OffsetDateTime::from_unix_timestamp(seconds)
                    .map(|instant| {
                        instant
                            .format(&time::format_description::well_known::Rfc3339)
                            .unwrap()
                    })
                    .unwrap()
            }),
            ..ContainerRecord::default()
        })
}

fn order_strategy() -> impl Strategy<Value = SortOrder> {
    prop_oneof![
        Just(SortOrder::NameAscending),
        Just(SortOrder::NameDescending),
        Just(SortOrder::TimeAscending),
        Just(SortOrder::TimeDescending),
        Just(SortOrder::Unrecognized),
    ]
}

proptest! {
    #[test]
    fn derived_views_only_hold_usable_records(
        records in proptest::collection::vec(record_strategy(), 0..24),
        term in "[a-zA-Z]{0,3}",
        order in order_strategy(),
    ) {
        let view = compute_view(Some(records.as_slice()), &QueryState::new(term, order));
        prop_assert!(view.iter().all(|record| record.usable_name().is_some()));
    }

    #[test]
    fn empty_collection_always_derives_empty_view(
        term in "[a-zA-Z]{0,3}",
        order in order_strategy(),
    ) {
        let query = QueryState::new(term, order);
        prop_assert!(compute_view(Some(&[][..]), &query).is_empty());
        prop_assert!(compute_view(None, &query).is_empty());
    }

    #[test]
    fn filtering_is_idempotent_and_order_preserving(
        records in proptest::collection::vec(record_strategy(), 0..24),
        term in "[a-zA-Z]{0,2}",
    ) {
        let once = filter_records(&records, &term);
        let twice = filter_records(&once, &term);
        prop_assert_eq!(&once, &twice);

        let needle = term.to_lowercase();
        let expected = records
            .iter()
            .filter(|record| {
                record
                    .usable_name()
                    .is_some_and(|name| name.to_lowercase().contains(needle.as_str()))
            })
            .cloned()
            .collect::<Vec<_>>();
        prop_assert_eq!(once, expected);
    }

    #[test]
    fn name_descending_reverses_ascending_for_distinct_names(
        raw_names in proptest::collection::btree_set("[a-zA-Z]{1,6}", 0..16),
    ) {
        let records = raw_names
            .iter()
            .rev()
            .map(ContainerRecord::new)
            .collect::<Vec<_>>();

        let ascending = compute_view(Some(records.as_slice()), &QueryState::new("", SortOrder::NameAscending));
        let mut descending =
            compute_view(Some(ascending.as_slice()), &QueryState::new("", SortOrder::NameDescending));
        descending.reverse();
        prop_assert_eq!(ascending, descending);
    }

    #[test]
    fn toggling_direction_twice_restores_order(
        raw_names in proptest::collection::btree_set("[a-z]{1,6}", 0..16),
        base in 0i64..1_000_000,
    ) {
        let records = raw_names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let instant = time::OffsetDateTime::from_unix_timestamp(base + index as i64 * 60)
                    .unwrap()
                    .format(&time::format_description::well_known::Rfc3339)
                    .unwrap();
                ContainerRecord::new(name.as_str()).with_created_time(instant)
            })
            .collect::<Vec<_>>();

        for order in [SortOrder::NameAscending, SortOrder::TimeAscending] {
            let first = compute_view(Some(records.as_slice()), &QueryState::new("", order));
            let flipped = compute_view(Some(first.as_slice()), &QueryState::new("", order.reversed()));
            let restored = compute_view(Some(flipped.as_slice()), &QueryState::new("", order));
            prop_assert_eq!(first, restored);
        }
    }
}
