use crate::error::{Error, ProcessingError};
use crate::protocol::primitive::split_fields;
use crate::protocol::row::{DataRow, zip_row};

#[test]
fn zip_skips_placeholders() {
    let columns = split_fields("\tListingID\tListPrice\t", b'\t');
    let row = zip_row(&columns, split_fields("\t123\t500000\t", b'\t')).unwrap();

    assert_eq!(row.len(), 2);
    assert_eq!(row.get("ListingID"), Some("123"));
    assert_eq!(row.get("ListPrice"), Some("500000"));
    assert_eq!(row.columns().collect::<Vec<_>>(), vec!["ListingID", "ListPrice"]);
}

#[test]
fn zip_keeps_empty_values() {
    let columns = split_fields("\tA\tB\tC\t", b'\t');
    let row = zip_row(&columns, split_fields("\t1\t\t3\t", b'\t')).unwrap();
    assert_eq!(row, DataRow::from_iter([("A", "1"), ("B", ""), ("C", "3")]));
}

#[test]
fn zip_length_mismatch() {
    let columns = split_fields("\tA\tB\t", b'\t');
    let err = zip_row(&columns, split_fields("\t1\t2\t3\t", b'\t')).unwrap_err();
    assert!(matches!(
        err,
        Error::Processing(ProcessingError::MalformedRow { columns: 2, fields: 3 })
    ));
    assert!(!err.is_fatal());
}

#[test]
fn zip_without_columns() {
    let err = zip_row(&[], split_fields("\t1\t", b'\t')).unwrap_err();
    assert!(matches!(
        err,
        Error::Processing(ProcessingError::MalformedRow { columns: 0, fields: 1 })
    ));
}

#[test]
fn row_into_map() {
    let row = DataRow::from_iter([("A", "1"), ("B", "2")]);
    let map = row.clone().into_map();
    assert_eq!(map.get("B").map(String::as_str), Some("2"));
    assert_eq!(row.into_iter().count(), 2);
}
