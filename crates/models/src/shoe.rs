use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::value::FieldValue;

/// Catalog entry. Fields other than `id` stay absent when the creating
/// request left them out, and hold whatever JSON value the client sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shoe {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<FieldValue>,
    /// Keys found in the store file that this service does not manage.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a create request. Keys other than the five attributes are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewShoe {
    #[serde(default)]
    pub brand: Option<FieldValue>,
    #[serde(default)]
    pub model: Option<FieldValue>,
    #[serde(default)]
    pub size: Option<FieldValue>,
    #[serde(default)]
    pub color: Option<FieldValue>,
    #[serde(default)]
    pub price: Option<FieldValue>,
}

impl NewShoe {
    pub fn into_shoe(self, id: String) -> Shoe {
        Shoe {
            id,
            brand: self.brand,
            model: self.model,
            size: self.size,
            color: self.color,
            price: self.price,
            extra: Map::new(),
        }
    }
}

/// Partial update. Outer `None`: key absent, keep the stored value.
/// `Some(None)`: key sent as `null`, clear it. `Some(Some(v))`: overwrite.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ShoePatch {
    #[serde(default, deserialize_with = "present")]
    pub brand: Option<Option<FieldValue>>,
    #[serde(default, deserialize_with = "present")]
    pub model: Option<Option<FieldValue>>,
    #[serde(default, deserialize_with = "present")]
    pub size: Option<Option<FieldValue>>,
    #[serde(default, deserialize_with = "present")]
    pub color: Option<Option<FieldValue>>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Option<FieldValue>>,
}

fn present<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

impl ShoePatch {
    pub fn apply(self, shoe: &mut Shoe) {
        if let Some(v) = self.brand {
            shoe.brand = v;
        }
        if let Some(v) = self.model {
            shoe.model = v;
        }
        if let Some(v) = self.size {
            shoe.size = v;
        }
        if let Some(v) = self.color {
            shoe.color = v;
        }
        if let Some(v) = self.price {
            shoe.price = v;
        }
    }
}

/// Search filters from the query string. Empty values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ShoeQuery {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub price: Option<String>,
}

fn filter(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

fn contains_ci(stored: &Option<FieldValue>, needle: &str) -> bool {
    stored.as_ref().is_some_and(|v| v.contains_ci(needle))
}

fn loose_eq(stored: &Option<FieldValue>, wanted: &str) -> bool {
    stored.as_ref().is_some_and(|v| v.loose_eq(wanted))
}

impl ShoeQuery {
    pub fn is_empty(&self) -> bool {
        [&self.brand, &self.model, &self.size, &self.color, &self.price]
            .into_iter()
            .all(|f| filter(f).is_none())
    }

    /// All provided filters must hold. A shoe lacking a filtered field, or
    /// holding a non-text value under a text filter, never matches.
    pub fn matches(&self, shoe: &Shoe) -> bool {
        filter(&self.brand).map_or(true, |q| contains_ci(&shoe.brand, q))
            && filter(&self.model).map_or(true, |q| contains_ci(&shoe.model, q))
            && filter(&self.size).map_or(true, |q| loose_eq(&shoe.size, q))
            && filter(&self.color).map_or(true, |q| contains_ci(&shoe.color, q))
            && filter(&self.price).map_or(true, |q| loose_eq(&shoe.price, q))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nike() -> Shoe {
        NewShoe {
            brand: Some("Nike".into()),
            model: Some("Air Max".into()),
            size: Some(10i64.into()),
            color: Some("Red".into()),
            price: Some(120i64.into()),
        }
        .into_shoe("abc".into())
    }

    #[test]
    fn patch_keeps_absent_fields() -> Result<(), serde_json::Error> {
        let mut shoe = nike();
        let patch: ShoePatch = serde_json::from_str(r#"{"price": 99}"#)?;
        patch.apply(&mut shoe);
        assert_eq!(shoe.price, Some(99i64.into()));
        assert_eq!(shoe.brand, Some("Nike".into()));
        assert_eq!(shoe.model, Some("Air Max".into()));
        assert_eq!(shoe.size, Some(10i64.into()));
        assert_eq!(shoe.color, Some("Red".into()));
        Ok(())
    }

    #[test]
    fn patch_null_clears_field() -> Result<(), serde_json::Error> {
        let mut shoe = nike();
        let patch: ShoePatch = serde_json::from_str(r#"{"color": null}"#)?;
        assert_eq!(patch.color, Some(None));
        assert_eq!(patch.brand, None);
        patch.apply(&mut shoe);
        assert_eq!(shoe.color, None);
        Ok(())
    }

    #[test]
    fn absent_fields_are_not_serialized() -> Result<(), serde_json::Error> {
        let shoe = NewShoe { brand: Some("Vans".into()), ..Default::default() }.into_shoe("x".into());
        let v = serde_json::to_value(&shoe)?;
        assert_eq!(v, serde_json::json!({"id": "x", "brand": "Vans"}));
        Ok(())
    }

    #[test]
    fn query_text_filters_are_case_insensitive_substrings() {
        let shoe = nike();
        let q = ShoeQuery { color: Some("red".into()), ..Default::default() };
        assert!(q.matches(&shoe));
        let q = ShoeQuery { model: Some("AIR".into()), brand: Some("nik".into()), ..Default::default() };
        assert!(q.matches(&shoe));
        let q = ShoeQuery { brand: Some("adidas".into()), ..Default::default() };
        assert!(!q.matches(&shoe));
    }

    #[test]
    fn query_scalar_filters_coerce() {
        let shoe = nike();
        let q = ShoeQuery { size: Some("10".into()), price: Some("120".into()), ..Default::default() };
        assert!(q.matches(&shoe));
        let q = ShoeQuery { size: Some("11".into()), ..Default::default() };
        assert!(!q.matches(&shoe));
    }

    #[test]
    fn empty_query_matches_everything_and_missing_fields_fail_filters() {
        let bare = NewShoe::default().into_shoe("bare".into());
        let empty = ShoeQuery { brand: Some(String::new()), ..Default::default() };
        assert!(empty.is_empty());
        assert!(empty.matches(&bare));
        let q = ShoeQuery { color: Some("red".into()), ..Default::default() };
        assert!(!q.matches(&bare));
    }

    #[test]
    fn non_text_values_are_stored_but_skip_text_filters() -> Result<(), serde_json::Error> {
        let input: NewShoe = serde_json::from_str(r#"{"brand": 123, "price": true, "size": "10"}"#)?;
        let shoe = input.into_shoe("n".into());
        assert_eq!(
            serde_json::to_value(&shoe)?,
            serde_json::json!({"id": "n", "brand": 123, "price": true, "size": "10"})
        );
        let q = ShoeQuery { brand: Some("12".into()), ..Default::default() };
        assert!(!q.matches(&shoe));
        let q = ShoeQuery { price: Some("1".into()), ..Default::default() };
        assert!(!q.matches(&shoe));
        let q = ShoeQuery { size: Some("10".into()), ..Default::default() };
        assert!(q.matches(&shoe));
        Ok(())
    }

    #[test]
    fn unknown_stored_keys_survive_a_round_trip() -> Result<(), serde_json::Error> {
        let raw = serde_json::json!({"id": "a", "brand": "Puma", "stock": 4});
        let mut shoe: Shoe = serde_json::from_value(raw.clone())?;
        assert_eq!(shoe.extra.get("stock"), Some(&serde_json::json!(4)));
        serde_json::from_str::<ShoePatch>(r#"{"model": "Suede"}"#)?.apply(&mut shoe);
        assert_eq!(
            serde_json::to_value(&shoe)?,
            serde_json::json!({"id": "a", "brand": "Puma", "model": "Suede", "stock": 4})
        );
        Ok(())
    }
}
