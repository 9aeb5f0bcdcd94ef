use serde::{Deserialize, Deserializer, Serialize};

/// One category's clues exactly as the API returned them.
pub type RawClueList = Vec<Clue>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub answer: String,
    #[serde(default)]
    pub value: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: CategoryRef,
    /// Not part of the wire format; assigned once by the normalizer.
    #[serde(default, skip_serializing)]
    pub daily_double: bool,
}

impl Clue {
    /// Null and zero values make a clue unplayable.
    pub fn has_value(&self) -> bool {
        self.value.is_some_and(|v| v != 0)
    }

    /// Text shown on the board tile. Daily doubles hide their value.
    pub fn tile_label(&self) -> String {
        match (self.daily_double, self.value) {
            (true, _) | (false, None) => String::new(),
            (false, Some(v)) => v.to_string(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_api_record_ignoring_extra_fields() {
        let json = r#"{
            "id": 87,
            "answer": "the Nile",
            "question": "Longest river in Africa",
            "value": 200,
            "airdate": "1985-02-08T12:00:00.000Z",
            "category_id": 11,
            "category": { "id": 11, "title": "rivers", "clues_count": 30 }
        }"#;
        let clue: Clue = serde_json::from_str(json).unwrap();
        assert_eq!(clue.id, 87);
        assert_eq!(clue.value, Some(200));
        assert_eq!(clue.category.title, "rivers");
        assert!(!clue.daily_double);
    }

    #[test]
    fn test_null_fields_become_defaults() {
        let json = r#"{ "id": 3, "question": null, "answer": null, "value": null, "category": null }"#;
        let clue: Clue = serde_json::from_str(json).unwrap();
        assert_eq!(clue.question, "");
        assert_eq!(clue.answer, "");
        assert_eq!(clue.value, None);
        assert_eq!(clue.category.title, "");
    }

    #[test]
    fn test_has_value_rejects_null_and_zero() {
        let mut clue: Clue = serde_json::from_str(r#"{ "id": 1, "value": 0 }"#).unwrap();
        assert!(!clue.has_value());
        clue.value = None;
        assert!(!clue.has_value());
        clue.value = Some(400);
        assert!(clue.has_value());
    }

    #[test]
    fn test_daily_double_hides_tile_label() {
        let mut clue: Clue = serde_json::from_str(r#"{ "id": 1, "value": 800 }"#).unwrap();
        assert_eq!(clue.tile_label(), "800");
        clue.daily_double = true;
        assert_eq!(clue.tile_label(), "");
    }
}
