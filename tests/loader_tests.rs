use std::io::Write;

use trade_scatter::TradeError;
use trade_scatter::core::{load_records_from_path, load_records_from_reader, parse_records_str};

#[test]
fn parses_required_columns_in_any_order() {
    let input = "\
Imports,Year,Country,Extra,Continent,Exports
5,2017,A,ignored,X,10
8,2017,B,ignored,Y,3
";
    let records = parse_records_str(input).expect("parse");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].country(), "A");
    assert_eq!(records[0].continent(), "X");
    assert_eq!(records[0].year(), 2017);
    assert_eq!(records[0].exports(), 10.0);
    assert_eq!(records[0].imports(), 5.0);
    assert_eq!(records[0].balance(), 5.0);
    assert_eq!(records[1].balance(), -5.0);
}

#[test]
fn trims_whitespace_around_fields() {
    let input = "Country,Continent,Year,Exports,Imports\n United States , North America , 2018 , 1.5 , 2.25 \n";
    let records = parse_records_str(input).expect("parse");

    assert_eq!(records[0].country(), "United States");
    assert_eq!(records[0].continent(), "North America");
    assert_eq!(records[0].imports(), 2.25);
}

#[test]
fn column_names_are_case_sensitive() {
    let input = "country,Continent,Year,Exports,Imports\nA,X,2017,1,1\n";
    let err = parse_records_str(input).expect_err("lowercase country header");
    assert!(matches!(err, TradeError::MissingColumn(ref name) if name == "Country"));
}

#[test]
fn non_numeric_amount_aborts_the_whole_load() {
    let input = "\
Country,Continent,Year,Exports,Imports
A,X,2017,10,5
B,Y,2017,lots,8
";
    let err = parse_records_str(input).expect_err("malformed exports");
    match err {
        TradeError::MalformedRecord {
            line,
            column,
            value,
        } => {
            assert_eq!(line, 3);
            assert_eq!(column, "Exports");
            assert_eq!(value, "lots");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_numeric_year_is_malformed() {
    let input = "Country,Continent,Year,Exports,Imports\nA,X,last year,1,1\n";
    let err = parse_records_str(input).expect_err("malformed year");
    assert!(matches!(err, TradeError::MalformedRecord { ref column, .. } if column == "Year"));
}

#[test]
fn header_only_table_is_empty_dataset() {
    let input = "Country,Continent,Year,Exports,Imports\n";
    let err = load_records_from_reader(input.as_bytes()).expect_err("no rows");
    assert!(matches!(err, TradeError::EmptyDataset));
}

#[test]
fn ragged_row_surfaces_csv_error() {
    let input = "Country,Continent,Year,Exports,Imports\nA,X,2017,1\n";
    let err = parse_records_str(input).expect_err("short row");
    assert!(matches!(err, TradeError::Csv(_)));
}

#[test]
fn loads_from_path() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "Country,Continent,Year,Exports,Imports").expect("write header");
    writeln!(file, "A,X,2017,10,5").expect("write row");
    writeln!(file, "C,X,2018,1,1").expect("write row");

    let records = load_records_from_path(file.path()).expect("load");
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].year(), 2018);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = load_records_from_path(dir.path().join("missing.csv")).expect_err("missing file");
    assert!(matches!(err, TradeError::Io(_)));
}
