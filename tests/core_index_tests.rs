use trade_scatter::TradeError;
use trade_scatter::core::{DatasetIndex, DeficitIndex, TradeRecord, YearIndex, build_indexes};

fn scenario_records() -> Vec<TradeRecord> {
    vec![
        TradeRecord::new("A", "X", 2017, 10.0, 5.0).expect("record A"),
        TradeRecord::new("B", "Y", 2017, 3.0, 8.0).expect("record B"),
        TradeRecord::new("C", "X", 2018, 1.0, 1.0).expect("record C"),
    ]
}

fn countries(records: &[TradeRecord]) -> Vec<&str> {
    records.iter().map(TradeRecord::country).collect()
}

#[test]
fn record_derives_balance_from_exports_and_imports() {
    let record = TradeRecord::new("A", "X", 2017, 10.0, 5.0).expect("valid record");
    assert_eq!(record.balance(), 5.0);
    assert_eq!(record.exports(), 10.0);
    assert_eq!(record.imports(), 5.0);
}

#[test]
fn record_rejects_negative_amounts() {
    let err = TradeRecord::new("A", "X", 2017, -1.0, 5.0).expect_err("negative exports");
    assert!(matches!(err, TradeError::MalformedRecord { ref column, .. } if column == "Exports"));
    assert!(TradeRecord::new("A", "X", 2017, 1.0, f64::NAN).is_err());
}

#[test]
fn year_index_sorts_each_year_by_imports_descending() {
    let (years, _) = build_indexes(&scenario_records()).expect("build indexes");

    let bucket_2017 = years.get(2017).expect("2017 bucket");
    assert_eq!(countries(bucket_2017), vec!["B", "A"]);
    assert_eq!(bucket_2017[0].imports(), 8.0);
    assert_eq!(bucket_2017[1].imports(), 5.0);
    assert_eq!(countries(years.get(2018).expect("2018 bucket")), vec!["C"]);
    assert_eq!(years.record_count(), 3);
}

#[test]
fn deficit_index_is_year_descending_absolute_sum() {
    let (_, deficits) = build_indexes(&scenario_records()).expect("build indexes");

    let years: Vec<i32> = deficits.entries().iter().map(|entry| entry.year).collect();
    assert_eq!(years, vec![2018, 2017]);
    assert_eq!(deficits.get(2017), Some(0.0));
    assert_eq!(deficits.get(2018), Some(0.0));
    assert_eq!(deficits.get(1999), None);
}

#[test]
fn deficit_magnitude_drops_sign() {
    let records = vec![
        TradeRecord::new("A", "X", 2020, 1.0, 11.0).expect("record"),
        TradeRecord::new("B", "X", 2020, 2.0, 4.0).expect("record"),
        TradeRecord::new("C", "X", 2021, 9.0, 1.0).expect("record"),
    ];
    let deficits = DeficitIndex::build(&records).expect("deficits");

    assert_eq!(deficits.get(2020), Some(12.0));
    assert_eq!(deficits.get(2021), Some(8.0));
    assert_eq!(deficits.max_magnitude(), 12.0);
}

#[test]
fn empty_input_is_rejected() {
    assert!(matches!(build_indexes(&[]), Err(TradeError::EmptyDataset)));
    assert!(matches!(YearIndex::build(&[]), Err(TradeError::EmptyDataset)));
    assert!(matches!(
        DatasetIndex::build(Vec::new()),
        Err(TradeError::EmptyDataset)
    ));
}

#[test]
fn dataset_keeps_continents_in_first_appearance_order() {
    let records = vec![
        TradeRecord::new("A", "Europe", 2017, 1.0, 1.0).expect("record"),
        TradeRecord::new("B", "Asia", 2018, 1.0, 1.0).expect("record"),
        TradeRecord::new("C", "Europe", 2018, 1.0, 1.0).expect("record"),
        TradeRecord::new("D", "Africa", 2016, 1.0, 1.0).expect("record"),
    ];
    let dataset = DatasetIndex::build(records.clone()).expect("dataset");

    let continents: Vec<&str> = dataset.continents().iter().map(String::as_str).collect();
    assert_eq!(continents, vec!["Europe", "Asia", "Africa"]);
    assert_eq!(dataset.records(), records.as_slice());
    assert_eq!(dataset.years().latest_year(), Some(2018));
}
