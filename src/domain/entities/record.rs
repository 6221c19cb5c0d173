use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// A single cell value read out of a row.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            CellValue::Bool(_) => 0,
            CellValue::Integer(_) | CellValue::Float(_) => 1,
            CellValue::Date(_) | CellValue::DateTime(_) => 2,
            CellValue::Text(_) => 3,
        }
    }

    /// Total order used for sorting.
    ///
    /// Numbers compare exactly across `Integer` and `Float` (NaN last), dates compare
    /// chronologically across `Date` and `DateTime`, text compares ignoring
    /// ASCII case first and falls back to a case-sensitive comparison. Values of
    /// different kinds order Bool < numbers < dates < Text.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => compare_text(a, b),
            (CellValue::Integer(a), CellValue::Integer(b)) => a.cmp(b),
            (CellValue::Integer(a), CellValue::Float(b)) => compare_integer_float(*a, *b),
            (CellValue::Float(a), CellValue::Integer(b)) => compare_integer_float(*b, *a).reverse(),
            (CellValue::Float(a), CellValue::Float(b)) => compare_floats(*a, *b),
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a.cmp(b),
            (CellValue::Date(a), CellValue::DateTime(b)) => a.and_time(NaiveTime::MIN).cmp(b),
            (CellValue::DateTime(a), CellValue::Date(b)) => a.cmp(&b.and_time(NaiveTime::MIN)),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

/// NaN sorts above every other number and equal to itself. `-0.0 == 0.0`.
fn compare_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Exact comparison of an integer with a float, without rounding the integer.
fn compare_integer_float(integer: i64, float: f64) -> Ordering {
    // 2^63, the first float past `i64::MAX`.
    const I64_END: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() || float >= I64_END {
        return Ordering::Less;
    }
    if float < -I64_END {
        return Ordering::Greater;
    }

    let whole = float.trunc();
    i128::from(integer)
        .cmp(&(whole as i128))
        .then_with(|| compare_floats(0.0, float - whole))
}

fn compare_text(a: &str, b: &str) -> Ordering {
    let folded_a = a.bytes().map(|byte| byte.to_ascii_lowercase());
    let folded_b = b.bytes().map(|byte| byte.to_ascii_lowercase());
    folded_a.cmp(folded_b).then_with(|| a.cmp(b))
}

/// Orders optional values with a missing value before any present one.
pub fn compare_optional(a: Option<&CellValue>, b: Option<&CellValue>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.compare(b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(text) => write!(f, "{text}"),
            CellValue::Integer(value) => write!(f, "{value}"),
            CellValue::Float(value) => write!(f, "{value}"),
            CellValue::Bool(value) => write!(f, "{value}"),
            CellValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            CellValue::DateTime(moment) => write!(f, "{}", moment.format("%Y-%m-%d %H:%M")),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::DateTime(value)
    }
}

/// String-keyed access to the fields of a row.
///
/// Returns `None` for keys the row does not have; the table renders those as
/// empty cells and never treats them as an error.
pub trait Record {
    fn field(&self, key: &str) -> Option<CellValue>;

    /// The category of this row under `category_field`. Only text counts.
    fn category(&self, category_field: &str) -> Option<String> {
        self.field(category_field)
            .and_then(|value| value.as_text().map(str::to_string))
    }
}

impl Record for BTreeMap<String, CellValue> {
    fn field(&self, key: &str) -> Option<CellValue> {
        self.get(key).cloned()
    }
}

impl Record for HashMap<String, CellValue> {
    fn field(&self, key: &str) -> Option<CellValue> {
        self.get(key).cloned()
    }
}
