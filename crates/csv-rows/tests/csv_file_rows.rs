//! Reading typed values out of CSV files on disk.

use csv_rows::{CsvRowSource, RowSource};
use row_access::RecordExt;
use std::io::Write;
use tempfile::NamedTempFile;

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_typed_reads_from_csv_file() {
    let file = csv_file(
        "Id,UserName,Active,Score,Joined\n\
         1,ada,Enabled,9.5,2024-01-02\n\
         two,,maybe,,not a date\n",
    );
    let rows = CsvRowSource::new(file.path()).read_rows().unwrap();
    assert_eq!(rows.len(), 2);

    let first = &rows[0];
    assert_eq!(first.read_as::<i32>("id", -1), 1);
    assert_eq!(first.read_as("USERNAME", String::new()), "ada");
    assert!(first.read_as::<bool>("Active", false));
    assert_eq!(first.read_as::<f64>("Score", -1.0), 9.5);

    let second = &rows[1];
    assert_eq!(second.read_as::<i32>("Id", -1), -1);
    assert_eq!(second.read_as("UserName", "anonymous".to_string()), "anonymous");
    assert!(second.read_as::<bool>("Active", true));
    assert_eq!(second.read_or_builtin::<f64>("Score"), -1.0);
    assert_eq!(second.read_or_builtin::<Option<i32>>("Nickname"), None);
}

#[test]
fn test_rows_of_an_empty_file() {
    let file = csv_file("Id,Name\n");
    let rows = CsvRowSource::new(file.path()).read_rows().unwrap();
    assert!(rows.is_empty());
}
