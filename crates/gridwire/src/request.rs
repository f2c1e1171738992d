use crate::error::GridError;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::collections::BTreeMap;

///
/// ReadRequest
///
/// Decoded grid read parameters. `page` is 1-based; `rows` is the page
/// size. When `search` is set, `filters` (a serialized filter tree) takes
/// precedence over the single-rule `search_*` shorthand whenever it is
/// non-empty.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ReadRequest {
    pub page: u64,
    pub rows: u64,

    #[serde(default)]
    pub sidx: String,

    #[serde(default)]
    pub sord: String,

    #[serde(rename = "_search", default, deserialize_with = "wire_flag")]
    pub search: bool,

    #[serde(rename = "searchField", default)]
    pub search_field: String,

    #[serde(rename = "searchOper", default)]
    pub search_oper: String,

    #[serde(rename = "searchString", default)]
    pub search_string: String,

    #[serde(default)]
    pub filters: String,
}

impl ReadRequest {
    #[must_use]
    pub fn page(page: u64, rows: u64) -> Self {
        Self {
            page,
            rows,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn sorted(mut self, sidx: impl Into<String>, sord: impl Into<String>) -> Self {
        self.sidx = sidx.into();
        self.sord = sord.into();
        self
    }

    /// Single-rule search shorthand.
    #[must_use]
    pub fn searching(
        mut self,
        field: impl Into<String>,
        oper: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.search = true;
        self.search_field = field.into();
        self.search_oper = oper.into();
        self.search_string = value.into();
        self
    }

    /// Full filter-tree search payload.
    #[must_use]
    pub fn filtered(mut self, filters: impl Into<String>) -> Self {
        self.search = true;
        self.filters = filters.into();
        self
    }
}

// The grid protocol carries `_search` as the strings "true"/"false";
// accept a native bool as well.
fn wire_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    struct FlagVisitor;

    impl de::Visitor<'_> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a boolean or the strings \"true\"/\"false\"")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            Ok(v == "true")
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}

///
/// WriteRequest
///
/// Flat field-name → raw-value map for create/update, or the `id` list
/// for delete. The `id` parameter is a protocol invariant on every write:
/// its presence is mandatory even where its value is ignored.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct WriteRequest {
    #[serde(flatten)]
    values: BTreeMap<String, String>,
}

impl WriteRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// The mandatory `id` parameter.
    pub fn require_id(&self) -> Result<&str, GridError> {
        self.field("id")
            .ok_or_else(|| GridError::MissingRequiredParameter {
                name: "id".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_flag_accepts_wire_strings() {
        let decoded: ReadRequest = serde_json::from_str(
            r#"{"page": 2, "rows": 25, "sidx": "name", "sord": "desc", "_search": "true"}"#,
        )
        .unwrap();

        assert!(decoded.search);
        assert_eq!(decoded.page, 2);
        assert_eq!(decoded.rows, 25);

        let decoded: ReadRequest =
            serde_json::from_str(r#"{"page": 1, "rows": 10, "_search": false}"#).unwrap();
        assert!(!decoded.search);
    }

    #[test]
    fn write_request_requires_id() {
        let request = WriteRequest::new().with("name", "test");
        assert_eq!(
            request.require_id().unwrap_err(),
            GridError::MissingRequiredParameter {
                name: "id".to_string()
            }
        );

        let request = request.with("id", "1");
        assert_eq!(request.require_id().unwrap(), "1");
    }
}
