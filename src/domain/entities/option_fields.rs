use serde::{Deserialize, Deserializer, Serialize};

/// Represents optional field semantics in PATCH requests.
///
/// - `Unchanged` → field absent from the payload
/// - `SetToNull` → explicitly `null`
/// - `SetToValue` → set to provided value
///
/// Structs using it must carry `#[serde(default)]` so that absent fields
/// fall back to `Unchanged`.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub enum OptionField<T> {
    #[default]
    Unchanged,
    SetToNull,
    SetToValue(T),
}

impl<'de, T> Deserialize<'de> for OptionField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => OptionField::SetToValue(value),
            None => OptionField::SetToNull,
        })
    }
}

impl<T> OptionField<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// If `SetToValue`, returns a reference to inner value.
    pub fn value_ref(&self) -> Option<&T> {
        if let Self::SetToValue(v) = self {
            Some(v)
        } else {
            None
        }
    }

    /// Applies the patch to the current value of a nullable column.
    pub fn apply_to(self, current: Option<T>) -> Option<T> {
        match self {
            OptionField::Unchanged => current,
            OptionField::SetToNull => None,
            OptionField::SetToValue(v) => Some(v),
        }
    }
}

impl OptionField<String> {
    /// Like [`OptionField::apply_to`], but an empty string clears the column.
    pub fn apply_to_text(self, current: Option<String>) -> Option<String> {
        self.apply_to(current).filter(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Default)]
    #[serde(default)]
    struct Patch {
        live_url: OptionField<String>,
        order: OptionField<i32>,
    }

    #[test]
    fn absent_null_and_value_are_distinguished() {
        let patch: Patch = serde_json::from_str(r#"{"live_url": null, "order": 4}"#).unwrap();
        assert_eq!(patch.live_url, OptionField::SetToNull);
        assert_eq!(patch.order, OptionField::SetToValue(4));

        let empty: Patch = serde_json::from_str("{}").unwrap();
        assert!(empty.live_url.is_unchanged());
    }

    #[test]
    fn apply_to_keeps_or_replaces_current_value() {
        let current = Some("https://old.example".to_string());

        assert_eq!(OptionField::Unchanged.apply_to(current.clone()), current);
        assert_eq!(OptionField::<String>::SetToNull.apply_to(current.clone()), None);
        assert_eq!(
            OptionField::SetToValue("https://new.example".to_string()).apply_to(current),
            Some("https://new.example".to_string())
        );
    }

    #[test]
    fn patch_values_serialize_for_validation_params() {
        let value = serde_json::to_value(OptionField::SetToValue("suncore".to_string())).unwrap();
        assert_eq!(value, serde_json::json!({"SetToValue": "suncore"}));
        assert_eq!(
            serde_json::to_value(OptionField::<String>::Unchanged).unwrap(),
            serde_json::json!("Unchanged")
        );
    }

    #[test]
    fn empty_text_clears_the_column() {
        let current = Some("fab fa-python".to_string());
        assert_eq!(OptionField::SetToValue(String::new()).apply_to_text(current), None);
    }
}
