//! Tests for command-line parsing.

use clap::Parser;
use placekey_normalizer::Opt;
use std::path::PathBuf;

#[test]
fn test_four_positionals() {
    let opt = Opt::try_parse_from([
        "placekey_normalizer",
        "stores.csv",
        "stores_placekey.csv",
        "Address",
        "Name",
    ])
    .expect("four positionals should parse");

    assert_eq!(opt.csv, PathBuf::from("stores.csv"));
    assert_eq!(opt.output, PathBuf::from("stores_placekey.csv"));
    assert_eq!(opt.address, "Address");
    assert_eq!(opt.location, "Name");
}

#[test]
fn test_column_names_keep_spaces() {
    let opt = Opt::try_parse_from([
        "placekey_normalizer",
        "in.csv",
        "out.csv",
        "Street Address",
        "Store Name",
    ])
    .unwrap();

    assert_eq!(opt.address, "Street Address");
    assert_eq!(opt.location, "Store Name");
}

#[test]
fn test_missing_positional_is_rejected() {
    let result = Opt::try_parse_from(["placekey_normalizer", "in.csv", "out.csv", "Address"]);
    assert!(result.is_err());
}

#[test]
fn test_extra_positional_is_rejected() {
    let result = Opt::try_parse_from([
        "placekey_normalizer",
        "in.csv",
        "out.csv",
        "Address",
        "Name",
        "Extra",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_no_arguments_is_rejected() {
    assert!(Opt::try_parse_from(["placekey_normalizer"]).is_err());
}
