use chrono::NaiveDate;

/// Generated value for a column.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedValue {
    Null,
    Int(i64),
    /// Monetary amount, exported with two decimals.
    Money(f64),
    Text(String),
    Date(NaiveDate),
}

impl GeneratedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, GeneratedValue::Null)
    }

    /// Render for CSV export. `Null` becomes `null_marker` so that absent
    /// values stay distinguishable from empty text.
    pub fn to_csv(&self, null_marker: &str) -> String {
        match self {
            GeneratedValue::Null => null_marker.to_string(),
            GeneratedValue::Int(value) => value.to_string(),
            GeneratedValue::Money(value) => format!("{value:.2}"),
            GeneratedValue::Text(value) => value.clone(),
            GeneratedValue::Date(value) => value.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            GeneratedValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

impl From<&str> for GeneratedValue {
    fn from(value: &str) -> Self {
        GeneratedValue::Text(value.to_string())
    }
}

impl From<String> for GeneratedValue {
    fn from(value: String) -> Self {
        GeneratedValue::Text(value)
    }
}

impl From<i64> for GeneratedValue {
    fn from(value: i64) -> Self {
        GeneratedValue::Int(value)
    }
}

impl From<NaiveDate> for GeneratedValue {
    fn from(value: NaiveDate) -> Self {
        GeneratedValue::Date(value)
    }
}

impl<T: Into<GeneratedValue>> From<Option<T>> for GeneratedValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(GeneratedValue::Null)
    }
}
