//! Replay of the fixture submissions through a form session.

use std::path::PathBuf;

use intake_core::FormField;
use intake_directory::LocalDirectory;
use intake_cli::replay::{read_entries, replay};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/submissions.json")
}

#[tokio::test]
async fn fixture_replays_with_one_rejection_per_bad_entry() {
    let entries = read_entries(&fixture()).unwrap();
    assert_eq!(entries.len(), 4);

    let report = replay(LocalDirectory::builtin(), &entries).await.unwrap();
    assert_eq!(report.accepted.len(), 2);
    assert_eq!(report.rejected.len(), 2);
    assert_eq!(report.exit_code(), 2);

    let bad_email = &report.rejected[0];
    assert_eq!(bad_email.index, 1);
    assert_eq!(bad_email.errors.len(), 1);
    assert!(bad_email.errors.contains(FormField::Email));

    let sparse = &report.rejected[1];
    assert_eq!(sparse.index, 3);
    let fields: Vec<_> = sparse.errors.fields().collect();
    assert_eq!(
        fields,
        vec![FormField::Name, FormField::PhoneNumber, FormField::Address, FormField::Zipcode]
    );
}

#[tokio::test]
async fn table_uses_display_names() {
    let entries = read_entries(&fixture()).unwrap();
    let report = replay(LocalDirectory::builtin(), &entries).await.unwrap();

    assert_eq!(report.headers[4], "Country");
    assert_eq!(report.table.len(), 2);
    assert_eq!(report.table[0][4], "United States");
    assert_eq!(report.table[1][4], "India");
    assert_eq!(report.table[1][5], "Maharashtra");
    assert_eq!(report.table[1][6], "Pune");
    // Stored values keep the codes.
    assert_eq!(report.accepted[1].get(FormField::State), "MH");
}

#[tokio::test]
async fn all_valid_entries_exit_zero() {
    let entries = read_entries(&fixture()).unwrap();
    let valid = vec![entries[0].clone(), entries[2].clone()];
    let report = replay(LocalDirectory::builtin(), &valid).await.unwrap();
    assert_eq!(report.exit_code(), 0);
    assert!(report.rejected.is_empty());
}

#[test]
fn missing_file_is_an_error() {
    let err = read_entries(&PathBuf::from("/nonexistent/submissions.json")).unwrap_err();
    assert!(err.to_string().contains("reading"));
}
