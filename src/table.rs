//! In-memory table model and cell normalization.
//!
//! Spreadsheet parsing libraries hand back dynamically typed cells; this
//! module pins them down into the closed [`Cell`] variant so that nothing
//! downstream ever sees a library-specific value. Missingness is an explicit
//! [`Cell::Null`] — no NaN sentinel or empty-string convention leaks past
//! the parser boundary.
//!
//! A [`Table`] is created fresh for each request, owned by that pipeline
//! invocation, and dropped once the response is written. Nothing is retained
//! across requests.

use serde_json::Value;

/// A single spreadsheet value, normalized to a JSON-safe taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing, blank, or NaN.
    Null,
    /// Boolean values (true/false).
    Bool(bool),
    /// Any numeric value. Integer-ness is recovered at serialisation time.
    Number(f64),
    /// Date, datetime, or duration, already rendered to a fixed ISO 8601
    /// string by the parser.
    Date(String),
    /// Everything else, as text.
    Text(String),
}

impl Cell {
    /// Normalize this cell to a `serde_json::Value`.
    ///
    /// Total over every variant:
    /// * `Null` → JSON null
    /// * `Bool` → JSON boolean
    /// * `Number` → JSON integer when the value is integral and exactly
    ///   representable, otherwise a float; non-finite values collapse to
    ///   null (JSON has no NaN/Inf)
    /// * `Date` / `Text` → JSON string
    pub fn into_json(self) -> Value {
        match self {
            Cell::Null => Value::Null,
            Cell::Bool(b) => Value::Bool(b),
            Cell::Number(n) => {
                if !n.is_finite() {
                    return Value::Null;
                }
                // 2^53 bound: beyond it f64 cannot distinguish neighbouring
                // integers, so emitting an integer would fabricate precision.
                const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;
                if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INT {
                    Value::from(n as i64)
                } else {
                    Value::from(n)
                }
            }
            Cell::Date(s) => Value::String(s),
            Cell::Text(s) => Value::String(s),
        }
    }
}

/// Parsed representation of one spreadsheet: ordered column names plus
/// ordered rows of positional cells.
///
/// Column order is first-seen source order. Rows are always exactly
/// `columns.len()` cells wide — the parsers pad or clip ragged input before
/// constructing a `Table`. Duplicate column names are kept positionally here
/// and collapse to a single key (first position, last value) when a row is
/// serialized as a JSON object.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    /// Total number of data rows (the header is not a row).
    pub fn total_rows(&self) -> u64 {
        self.rows.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_bool_normalize_directly() {
        assert_eq!(Cell::Null.into_json(), Value::Null);
        assert_eq!(Cell::Bool(true).into_json(), json!(true));
    }

    #[test]
    fn integral_numbers_have_no_fractional_part() {
        assert_eq!(Cell::Number(42.0).into_json(), json!(42));
        assert_eq!(Cell::Number(-7.0).into_json(), json!(-7));
        assert_eq!(Cell::Number(42.0).into_json().to_string(), "42");
    }

    #[test]
    fn fractional_numbers_stay_floats() {
        assert_eq!(Cell::Number(2.5).into_json(), json!(2.5));
    }

    #[test]
    fn huge_integral_floats_stay_floats() {
        // 1e300 is integral but far beyond exact i64 representation.
        let v = Cell::Number(1e300).into_json();
        assert!(v.as_f64().is_some());
        assert!(v.as_i64().is_none());
    }

    #[test]
    fn non_finite_numbers_become_null() {
        assert_eq!(Cell::Number(f64::NAN).into_json(), Value::Null);
        assert_eq!(Cell::Number(f64::INFINITY).into_json(), Value::Null);
    }

    #[test]
    fn dates_and_text_become_strings() {
        assert_eq!(
            Cell::Date("2024-01-15T00:00:00".into()).into_json(),
            json!("2024-01-15T00:00:00")
        );
        assert_eq!(Cell::Text("hello".into()).into_json(), json!("hello"));
    }

    #[test]
    fn empty_table_has_zero_rows() {
        let t = Table::new(vec!["a".into(), "b".into()], vec![]);
        assert_eq!(t.total_rows(), 0);
    }
}
