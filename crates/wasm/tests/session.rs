use rust_xlsxwriter::Workbook;
use vlookup_wasm::VlookupSession;

/// Builds an in-memory workbook with one sheet of strings.
fn xlsx_bytes(rows: &[&[&str]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            sheet.write_string(r as u32, c as u16, *value).expect("write cell");
        }
    }
    workbook.save_to_buffer().expect("xlsx encode")
}

fn ready_session() -> VlookupSession {
    let session = VlookupSession::new();
    session
        .load_text_str("left", "ID,Name\n1,A\n2,B\n3,C")
        .expect("left");
    session
        .load_file_bytes(
            "right",
            "scores.xlsx",
            &xlsx_bytes(&[&["ID", "Score"], &["2", "90"], &["1", "80"]]),
        )
        .expect("right");
    session.set_lookup_column("ID");
    session.set_match_column("ID");
    session.set_return_column("Score");
    session
}

/// Verifies the summary handed back after a load.
#[test]
fn test_load_summary() {
    let session = VlookupSession::new();
    let summary = session
        .load_text_str("left", "ID,Name\n1,A\n2,B")
        .expect("load");

    assert_eq!(summary.name, "Pasted Data");
    assert_eq!(summary.headers, ["ID", "Name"]);
    assert_eq!(summary.row_count, 2);
    assert_eq!(session.headers_of("left").unwrap(), ["ID", "Name"]);
    assert!(session.headers_of("right").unwrap().is_empty());
}

/// Verifies side names are checked at the boundary.
#[test]
fn test_unknown_side() {
    let session = VlookupSession::new();
    assert!(session.load_text_str("middle", "ID\n1").is_err());
    assert!(session.clear_side("").is_err());
}

/// Verifies merge and export through the session.
#[test]
fn test_merge_and_export() {
    let session = ready_session();
    assert!(session.can_merge());

    let merged = session.merge_now().expect("merge");
    assert_eq!(merged.headers(), ["ID", "Name", "Score"]);
    assert_eq!(session.merged_data(), Some(merged));

    let export = session.export_payload().expect("export");
    assert_eq!(export.file_name, "merged_data.csv");
    assert_eq!(export.content_type, "text/csv;charset=utf-8");
    assert_eq!(export.contents, "ID,Name,Score\n1,A,80\n2,B,90\n3,C,N/A");
}

/// Verifies failures surface as the session's current message.
#[test]
fn test_error_message_lifecycle() {
    let session = ready_session();

    let err = session
        .load_file_bytes("right", "notes.pdf", b"%PDF")
        .unwrap_err();
    assert_eq!(err, "Unsupported file format: 'pdf'. Supported: csv, xlsx, xls");
    assert_eq!(session.current_error().as_deref(), Some(err.as_str()));
    assert!(session.table_data("right").unwrap().is_none());

    session.clear_side("right").unwrap();
    assert!(session.current_error().is_none());
}

/// Verifies nothing can be exported before a merge.
#[test]
fn test_export_before_merge() {
    let session = ready_session();
    assert!(session.export_payload().is_err());
    assert!(session.current_error().is_some());
}
