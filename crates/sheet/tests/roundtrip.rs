use proptest::prelude::*;
use vlookup_sheet::{JoinSpec, TableData, NOT_FOUND};

/// Cells drawn from characters that exercise quoting.
fn cell() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9 ,\"\n\r]{0,8}").unwrap()
}

/// Tables of any shape, all-empty rows included, except single-column rows
/// holding only whitespace: those read back as empty lines.
fn table() -> impl Strategy<Value = TableData> {
    (1usize..5).prop_flat_map(|width| {
        (row(width), prop::collection::vec(row(width), 0..6))
            .prop_map(|(headers, rows)| TableData::new(headers, rows))
    })
}

fn row(width: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(cell(), width).prop_filter(
        "single blank cell reads as an empty line",
        |r| r.len() > 1 || !r[0].trim().is_empty(),
    )
}

proptest! {
    #[test]
    fn serialize_then_parse_is_identity(t in table()) {
        let text = t.to_csv_string().unwrap();
        prop_assert_eq!(TableData::from_csv_str(&text), t);
    }

    #[test]
    fn output_never_ends_with_line_break(t in table()) {
        let text = t.to_csv_string().unwrap();
        prop_assert!(!text.ends_with('\n'));
    }

    #[test]
    fn parsed_rows_match_header_width(text in "[a-c,\"\r\n ]{0,40}") {
        let t = TableData::from_csv_str(&text);
        prop_assert!(t.rows().iter().all(|r| r.len() == t.col_count()));
    }

    #[test]
    fn join_preserves_left_rows(
        keys in prop::collection::vec("[a-d]", 0..20),
        right_keys in prop::collection::vec("[a-d]", 0..10),
    ) {
        let mut left = vec![vec!["k".to_string(), "n".to_string()]];
        left.extend(keys.iter().enumerate().map(|(i, k)| vec![k.clone(), i.to_string()]));
        let mut right = vec![vec!["k".to_string(), "v".to_string()]];
        right.extend(right_keys.iter().enumerate().map(|(i, k)| vec![k.clone(), i.to_string()]));

        let left = TableData::from_data(left);
        let right = TableData::from_data(right);
        let merged = left.vlookup(&right, &JoinSpec::new("k", "k", "v")).unwrap();

        prop_assert_eq!(merged.row_count(), left.row_count());
        for (out, key) in merged.rows().iter().zip(&keys) {
            // last right row with this key, if any
            let expected = right_keys
                .iter()
                .rposition(|k| k == key)
                .map_or_else(|| NOT_FOUND.to_string(), |i| i.to_string());
            prop_assert_eq!(&out[2], &expected);
        }
    }
}
