//! Text coercion for spreadsheet cell values.
//!
//! Tables only ever hold text, so every workbook value is rendered to its
//! string form as soon as it is read.

use calamine::Data;

/// Render a float the way a spreadsheet user expects to see it typed:
/// integral values without a fractional part, others in shortest round-trip form.
pub(crate) fn number_text(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Convert a calamine value to cell text
pub(crate) fn data_to_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::Bool(b) => b.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => number_text(*f),
        Data::String(s) => s.clone(),
        // Excel stores dates as days since 1899-12-30
        Data::DateTime(dt) => number_text(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::approx_constant)]
    use super::*;

    #[test]
    fn test_number_text() {
        assert_eq!(number_text(42.0), "42");
        assert_eq!(number_text(-3.0), "-3");
        assert_eq!(number_text(3.14), "3.14");
        assert_eq!(number_text(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(number_text(f64::NAN), "NaN");
    }

    #[test]
    fn test_data_to_text() {
        assert_eq!(data_to_text(&Data::Empty), "");
        assert_eq!(data_to_text(&Data::Bool(true)), "true");
        assert_eq!(data_to_text(&Data::Int(7)), "7");
        assert_eq!(data_to_text(&Data::Float(90.0)), "90");
        assert_eq!(data_to_text(&Data::Float(2.5)), "2.5");
        assert_eq!(data_to_text(&Data::String(" padded ".to_string())), " padded ");
        assert_eq!(
            data_to_text(&Data::DateTimeIso("2024-01-31T00:00:00".to_string())),
            "2024-01-31T00:00:00"
        );
        assert_eq!(
            data_to_text(&Data::Error(calamine::CellErrorType::Div0)),
            "#DIV/0!"
        );
    }
}
