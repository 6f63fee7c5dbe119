use serde::{Deserialize, Serialize};

/// A stored shoe attribute. Bodies are not schema-checked, so any JSON value
/// is kept as sent; only strings and numbers take part in search.
///
/// Search filters arrive as query strings, so comparisons coerce: a stored
/// string must equal the query text exactly, a stored number must equal the
/// query parsed as a float. Anything else never matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Case-insensitive substring test; non-text values never match.
    pub fn contains_ci(&self, needle: &str) -> bool {
        self.as_text()
            .is_some_and(|s| s.to_lowercase().contains(&needle.to_lowercase()))
    }

    pub fn loose_eq(&self, query: &str) -> bool {
        match self {
            FieldValue::Text(s) => s == query,
            FieldValue::Number(n) => match (n.as_f64(), query.trim().parse::<f64>()) {
                (Some(stored), Ok(wanted)) => stored == wanted,
                _ => false,
            },
            FieldValue::Other(_) => false,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Number(v.into())
    }
}

impl From<f64> for FieldValue {
    /// Non-finite floats have no JSON form and degrade to their text.
    fn from(v: f64) -> Self {
        serde_json::Number::from_f64(v)
            .map(FieldValue::Number)
            .unwrap_or_else(|| FieldValue::Text(v.to_string()))
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_matches_numeric_text() {
        let ten = FieldValue::from(10i64);
        assert!(ten.loose_eq("10"));
        assert!(ten.loose_eq("10.0"));
        assert!(ten.loose_eq(" 10 "));
        assert!(!ten.loose_eq("10.5"));
        assert!(!ten.loose_eq("ten"));
    }

    #[test]
    fn fractional_price_matches() {
        assert!(FieldValue::from(99.5).loose_eq("99.5"));
    }

    #[test]
    fn text_is_compared_verbatim() {
        let size = FieldValue::from("9.5 EU");
        assert!(size.loose_eq("9.5 EU"));
        assert!(!size.loose_eq("9.5 eu"));
        assert!(!FieldValue::from("10").loose_eq("10.0"));
    }

    #[test]
    fn substring_search_only_sees_text() {
        assert!(FieldValue::from("Nike").contains_ci("NIK"));
        assert!(!FieldValue::from(123i64).contains_ci("12"));
    }

    #[test]
    fn any_json_value_is_accepted() -> Result<(), serde_json::Error> {
        let n: FieldValue = serde_json::from_str("42")?;
        let s: FieldValue = serde_json::from_str("\"42\"")?;
        let b: FieldValue = serde_json::from_str("true")?;
        let o: FieldValue = serde_json::from_str(r#"{"eu": 42}"#)?;
        assert_eq!(n, FieldValue::from(42i64));
        assert_eq!(s, FieldValue::from("42"));
        assert_eq!(b, FieldValue::Other(serde_json::Value::Bool(true)));
        assert!(!b.loose_eq("true"));
        assert!(!o.loose_eq("42"));
        assert_eq!(serde_json::to_string(&o)?, r#"{"eu":42}"#);
        Ok(())
    }
}
