use proptest::prelude::*;
use trade_scatter::TradeError;
use trade_scatter::api::ViewState;
use trade_scatter::core::{TradeRecord, build_indexes};

fn records_strategy() -> impl Strategy<Value = Vec<TradeRecord>> {
    prop::collection::vec(
        (2000i32..2006, 0u8..4, 0u32..5, 0.0f64..1_000_000.0),
        1..64,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(index, (year, continent, imports_bucket, exports))| {
                // Coarse import values force ties so ordering stability is exercised.
                let imports = f64::from(imports_bucket) * 250.0;
                TradeRecord::new(
                    format!("country-{index}"),
                    format!("continent-{continent}"),
                    year,
                    exports,
                    imports,
                )
                .expect("generated record is valid")
            })
            .collect()
    })
}

fn load_position(record: &TradeRecord) -> usize {
    record
        .country()
        .trim_start_matches("country-")
        .parse()
        .expect("generated country name")
}

proptest! {
    #[test]
    fn year_index_groups_every_record_exactly_once(records in records_strategy()) {
        let (years, _) = build_indexes(&records).expect("build indexes");

        prop_assert_eq!(years.record_count(), records.len());
        for (year, bucket) in years.iter() {
            prop_assert!(!bucket.is_empty());
            prop_assert!(bucket.iter().all(|record| record.year() == year));
            let expected = records.iter().filter(|record| record.year() == year).count();
            prop_assert_eq!(bucket.len(), expected);
        }
        for record in &records {
            prop_assert!(years.contains(record.year()));
        }
    }

    #[test]
    fn buckets_sort_by_imports_descending_and_keep_load_order_on_ties(
        records in records_strategy()
    ) {
        let (years, _) = build_indexes(&records).expect("build indexes");

        for (_, bucket) in years.iter() {
            for pair in bucket.windows(2) {
                prop_assert!(pair[0].imports() >= pair[1].imports());
                if pair[0].imports() == pair[1].imports() {
                    prop_assert!(load_position(&pair[0]) < load_position(&pair[1]));
                }
            }
        }
    }

    #[test]
    fn deficit_magnitude_is_absolute_sum_of_balances(records in records_strategy()) {
        let (years, deficits) = build_indexes(&records).expect("build indexes");

        prop_assert_eq!(deficits.len(), years.len());
        for pair in deficits.entries().windows(2) {
            prop_assert!(pair[0].year > pair[1].year);
        }
        for entry in deficits.entries() {
            let expected: f64 = records
                .iter()
                .filter(|record| record.year() == entry.year)
                .map(TradeRecord::balance)
                .sum::<f64>()
                .abs();
            prop_assert!(entry.magnitude >= 0.0);
            prop_assert!((entry.magnitude - expected).abs() <= 1e-6 * expected.max(1.0));
        }
    }

    #[test]
    fn visible_records_are_bucket_prefix_after_any_selection(
        records in records_strategy(),
        top_k in prop::option::of(1usize..10),
        selections in prop::collection::vec(1995i32..2010, 1..8)
    ) {
        let (years, _) = build_indexes(&records).expect("build indexes");
        let initial = years.latest_year().expect("non-empty index");
        let mut view = ViewState::new(&years, initial, top_k).expect("initial view");

        for year in selections {
            let before = view.clone();
            match view.select_year(&years, year) {
                Ok(()) => {
                    let bucket = years.get(year).expect("selected bucket");
                    let len = top_k.map_or(bucket.len(), |limit| limit.min(bucket.len()));
                    prop_assert_eq!(view.selected_year(), year);
                    prop_assert_eq!(view.visible_records(), &bucket[..len]);
                }
                Err(err) => {
                    prop_assert!(!years.contains(year));
                    prop_assert!(matches!(err, TradeError::UnknownYear { year: rejected } if rejected == year), "expected UnknownYear for {}, got {:?}", year, err);
                    prop_assert_eq!(&view, &before);
                }
            }
        }
    }

    #[test]
    fn negative_or_non_finite_amounts_are_rejected(
        exports in prop_oneof![
            (-1_000_000.0f64..-0.001),
            Just(f64::NAN),
            Just(f64::INFINITY)
        ]
    ) {
        prop_assert!(TradeRecord::new("A", "X", 2017, exports, 1.0).is_err());
        prop_assert!(TradeRecord::new("A", "X", 2017, 1.0, exports).is_err());
    }
}
