//! The item record and the validated inputs that create and modify it.
//!
//! Request bodies are never handed to the store as loose JSON. They are
//! parsed into [`NewItem`] or [`ItemPatch`] first, and a body that fails to
//! parse is rejected as [`ApiError::InvalidInput`] before any store state is
//! touched.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

/// A stored item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
}

/// Input for creating an item: a non-empty name and an optional description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewItem {
    name: String,
    description: Option<String>,
}

#[derive(Deserialize)]
struct CreateBody {
    name: Option<String>,
    description: Option<String>,
}

impl NewItem {
    /// Builds a create input directly, rejecting an empty name.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, ApiError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ApiError::InvalidInput("`name` must not be empty".into()));
        }
        Ok(Self { name, description })
    }

    /// Parses a JSON request body.
    ///
    /// The body must be an object with a non-empty string `name`.
    /// `description` may be absent, `null`, or a string.
    pub fn from_json(body: &[u8]) -> Result<Self, ApiError> {
        let body: CreateBody = parse_object(body)?;
        let name = body
            .name
            .ok_or_else(|| ApiError::InvalidInput("missing field `name`".into()))?;
        Self::new(name, body.description)
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn description(&self) -> Option<&str> { self.description.as_deref() }

    pub(crate) fn into_item(self, id: u64) -> Item {
        Item { id, name: self.name, description: self.description }
    }
}

/// A partial update. Fields left as `None` are not touched.
///
/// `description: Some(None)` clears the description; this is what an
/// explicit `"description": null` in the body means.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
}

impl ItemPatch {
    /// Parses a JSON request body. A `name`, when given, must be non-empty.
    pub fn from_json(body: &[u8]) -> Result<Self, ApiError> {
        let patch: Self = parse_object(body)?;
        if patch.name.as_deref() == Some("") {
            return Err(ApiError::InvalidInput("`name` must not be empty".into()));
        }
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    pub(crate) fn apply(self, item: &mut Item) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
    }
}

/// Marks a field that was present in the input, even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Deserializes a body that must be a JSON object.
fn parse_object<T: for<'de> Deserialize<'de>>(body: &[u8]) -> Result<T, ApiError> {
    if body.is_empty() {
        return Err(ApiError::InvalidInput("request body must be a JSON object".into()));
    }
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::InvalidInput(e.to_string()))?;
    if !value.is_object() {
        return Err(ApiError::InvalidInput("request body must be a JSON object".into()));
    }
    serde_json::from_value(value).map_err(|e| ApiError::InvalidInput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid(res: Result<impl std::fmt::Debug, ApiError>) -> String {
        match res {
            Err(ApiError::InvalidInput(msg)) => msg,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn create_with_name_and_description() {
        let item = NewItem::from_json(br#"{"name":"Item 3","description":"x"}"#).unwrap();
        assert_eq!(item.name(), "Item 3");
        assert_eq!(item.description(), Some("x"));
    }

    #[test]
    fn create_description_is_optional() {
        let item = NewItem::from_json(br#"{"name":"bare"}"#).unwrap();
        assert_eq!(item.description(), None);

        let item = NewItem::from_json(br#"{"name":"bare","description":null}"#).unwrap();
        assert_eq!(item.description(), None);
    }

    #[test]
    fn create_ignores_unknown_keys() {
        let item = NewItem::from_json(br#"{"name":"n","id":99,"extra":true}"#).unwrap();
        assert_eq!(item.into_item(3).id, 3);
    }

    #[test]
    fn create_rejects_missing_or_empty_name() {
        assert!(invalid(NewItem::from_json(br#"{"description":"x"}"#)).contains("name"));
        assert!(invalid(NewItem::from_json(br#"{"name":""}"#)).contains("empty"));
        invalid(NewItem::from_json(br#"{"name":null}"#));
        invalid(NewItem::from_json(br#"{"name":5}"#));
    }

    #[test]
    fn create_rejects_malformed_bodies() {
        invalid(NewItem::from_json(b""));
        invalid(NewItem::from_json(b"{not json"));
        invalid(NewItem::from_json(br#"["name"]"#));
        invalid(NewItem::from_json(br#""name""#));
    }

    #[test]
    fn patch_distinguishes_null_from_absent() {
        let patch = ItemPatch::from_json(br#"{"name":"n"}"#).unwrap();
        assert_eq!(patch.description, None);

        let patch = ItemPatch::from_json(br#"{"description":null}"#).unwrap();
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.name, None);
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(ItemPatch::from_json(b"{}").unwrap().is_empty());
    }

    #[test]
    fn patch_rejects_empty_name_and_non_objects() {
        invalid(ItemPatch::from_json(br#"{"name":""}"#));
        invalid(ItemPatch::from_json(b"[]"));
        invalid(ItemPatch::from_json(b""));
    }

    #[test]
    fn apply_overwrites_only_supplied_fields() {
        let mut item = Item { id: 1, name: "a".into(), description: Some("d".into()) };

        ItemPatch { name: Some("b".into()), description: None }.apply(&mut item);
        assert_eq!(item.name, "b");
        assert_eq!(item.description.as_deref(), Some("d"));

        ItemPatch { name: None, description: Some(None) }.apply(&mut item);
        assert_eq!(item.name, "b");
        assert_eq!(item.description, None);
    }

    #[test]
    fn item_serializes_absent_description_as_null() {
        let item = Item { id: 1, name: "a".into(), description: None };
        assert_eq!(
            serde_json::to_string(&item).unwrap(),
            r#"{"id":1,"name":"a","description":null}"#
        );
    }
}
