//! Query string schemas and validated query parameters

use crate::error::QueryViolation;
use chrono::NaiveDate;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::HashSet;
use url::form_urlencoded;

/// Accepted shape of a single query parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// One of a fixed set of values
    Enum(Vec<String>),
    /// Whole number within an inclusive range
    Integer { min: i64, max: i64 },
    /// Free text up to a maximum number of characters
    Text { max_len: usize },
    /// Calendar date in `YYYY-MM-DD` form
    Date,
    /// Boolean flag: `true`, `false`, `1` or `0`
    Flag,
}

impl FieldKind {
    /// Build an enum kind from any list of string-like values
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldKind::Enum(values.into_iter().map(Into::into).collect())
    }

    fn describe(&self) -> String {
        match self {
            FieldKind::Enum(values) => values.join("|"),
            FieldKind::Integer { min, max } => format!("{}..={}", min, max),
            FieldKind::Text { max_len } => format!("text<={}", max_len),
            FieldKind::Date => "YYYY-MM-DD".to_string(),
            FieldKind::Flag => "true|false".to_string(),
        }
    }
}

/// Declaration of one accepted query parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryField {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

/// A typed, validated query value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    Text(String),
    Integer(i64),
    Date(NaiveDate),
    Flag(bool),
}

/// Query parameters handed to a mounted page, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: Vec<(String, QueryValue)>,
}

impl Serialize for QueryParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in &self.values {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept any query string as-is, keeping the first value of each key
    pub fn raw(query: &str) -> Self {
        let mut params = Self::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if params.get(&key).is_none() {
                params.push(key.into_owned(), QueryValue::Text(value.into_owned()));
            }
        }
        params
    }

    fn push(&mut self, name: String, value: QueryValue) {
        self.values.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&QueryValue> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            QueryValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            QueryValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        match self.get(name)? {
            QueryValue::Date(value) => Some(*value),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            QueryValue::Flag(value) => Some(*value),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Validation rule for a route's query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySchema {
    fields: Vec<QueryField>,
    allow_unknown: bool,
}

impl QuerySchema {
    /// Create an empty schema that rejects every parameter
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an optional field
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(QueryField {
            name: name.into(),
            kind,
            required: false,
        });
        self
    }

    /// Add a field that must be present
    pub fn required(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(QueryField {
            name: name.into(),
            kind,
            required: true,
        });
        self
    }

    /// Let undeclared parameters through untouched
    pub fn allow_unknown(mut self) -> Self {
        self.allow_unknown = true;
        self
    }

    pub fn fields(&self) -> &[QueryField] {
        &self.fields
    }

    /// One-line summary of accepted keys, e.g. `status=a|b page=1..=1000`
    pub fn summary(&self) -> String {
        self.fields
            .iter()
            .map(|f| {
                let marker = if f.required { "!" } else { "" };
                format!("{}{}={}", f.name, marker, f.kind.describe())
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Validate a raw query string (without the leading `?`)
    ///
    /// Empty values count as absent. The first violation found is returned.
    pub fn validate(&self, query: &str) -> Result<QueryParams, QueryViolation> {
        let mut seen = HashSet::new();
        let mut accepted: Vec<(usize, QueryValue)> = Vec::new();
        let mut extra = Vec::new();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if !seen.insert(key.to_string()) {
                return Err(QueryViolation::Repeated {
                    name: key.into_owned(),
                });
            }

            let Some(index) = self.fields.iter().position(|f| f.name == key) else {
                if self.allow_unknown {
                    extra.push((key.into_owned(), QueryValue::Text(value.into_owned())));
                    continue;
                }
                return Err(QueryViolation::UnknownParam {
                    name: key.into_owned(),
                });
            };

            if value.is_empty() {
                continue;
            }

            let field = &self.fields[index];
            accepted.push((index, parse_value(field, &value)?));
        }

        if let Some(missing) = self
            .fields
            .iter()
            .enumerate()
            .find(|(index, f)| f.required && !accepted.iter().any(|(i, _)| i == index))
        {
            return Err(QueryViolation::Missing {
                name: missing.1.name.clone(),
            });
        }

        accepted.sort_by_key(|(index, _)| *index);

        let mut params = QueryParams::new();
        for (index, value) in accepted {
            params.push(self.fields[index].name.clone(), value);
        }
        for (name, value) in extra {
            params.push(name, value);
        }
        Ok(params)
    }
}

fn parse_value(field: &QueryField, value: &str) -> Result<QueryValue, QueryViolation> {
    let name = || field.name.clone();
    match &field.kind {
        FieldKind::Enum(allowed) => {
            if allowed.iter().any(|a| a == value) {
                Ok(QueryValue::Text(value.to_string()))
            } else {
                Err(QueryViolation::NotInEnum {
                    name: name(),
                    value: value.to_string(),
                    allowed: allowed.clone(),
                })
            }
        }
        FieldKind::Integer { min, max } => {
            let parsed: i64 = value.parse().map_err(|_| QueryViolation::Malformed {
                name: name(),
                value: value.to_string(),
                expected: "integer",
            })?;
            if parsed < *min || parsed > *max {
                return Err(QueryViolation::OutOfRange {
                    name: name(),
                    value: parsed,
                    min: *min,
                    max: *max,
                });
            }
            Ok(QueryValue::Integer(parsed))
        }
        FieldKind::Text { max_len } => {
            if value.chars().count() > *max_len {
                return Err(QueryViolation::TooLong {
                    name: name(),
                    max_len: *max_len,
                });
            }
            Ok(QueryValue::Text(value.to_string()))
        }
        FieldKind::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(QueryValue::Date)
            .map_err(|_| QueryViolation::Malformed {
                name: name(),
                value: value.to_string(),
                expected: "date",
            }),
        FieldKind::Flag => match value {
            "true" | "1" => Ok(QueryValue::Flag(true)),
            "false" | "0" => Ok(QueryValue::Flag(false)),
            _ => Err(QueryViolation::Malformed {
                name: name(),
                value: value.to_string(),
                expected: "flag",
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review_schema() -> QuerySchema {
        QuerySchema::new()
            .field("status", FieldKind::one_of(["approved", "pending", "rejected"]))
            .field("rating", FieldKind::Integer { min: 1, max: 5 })
            .field("search", FieldKind::Text { max_len: 10 })
            .field("from", FieldKind::Date)
            .field("flagged", FieldKind::Flag)
    }

    #[test]
    fn test_valid_query_is_typed_and_ordered() {
        let params = review_schema()
            .validate("rating=4&status=approved&from=2024-03-01&flagged=1")
            .unwrap();

        assert_eq!(params.text("status"), Some("approved"));
        assert_eq!(params.integer("rating"), Some(4));
        assert_eq!(
            params.date("from"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(params.flag("flagged"), Some(true));

        let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["status", "rating", "from", "flagged"]);
    }

    #[test]
    fn test_empty_query_is_valid() {
        let params = review_schema().validate("").unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_enum_violation() {
        let err = review_schema().validate("status=bogus").unwrap_err();
        assert!(matches!(err, QueryViolation::NotInEnum { ref value, .. } if value == "bogus"));
    }

    #[test]
    fn test_unknown_and_repeated_params() {
        assert_eq!(
            review_schema().validate("sort=asc").unwrap_err(),
            QueryViolation::UnknownParam {
                name: "sort".into()
            }
        );
        assert_eq!(
            review_schema()
                .validate("status=approved&status=pending")
                .unwrap_err(),
            QueryViolation::Repeated {
                name: "status".into()
            }
        );

        let lenient = review_schema().allow_unknown();
        let params = lenient.validate("sort=asc").unwrap();
        assert_eq!(params.text("sort"), Some("asc"));
    }

    #[test]
    fn test_integer_and_text_bounds() {
        assert!(matches!(
            review_schema().validate("rating=9").unwrap_err(),
            QueryViolation::OutOfRange { value: 9, .. }
        ));
        assert!(matches!(
            review_schema().validate("rating=many").unwrap_err(),
            QueryViolation::Malformed { expected: "integer", .. }
        ));
        assert!(matches!(
            review_schema().validate("search=far+too+long+text").unwrap_err(),
            QueryViolation::TooLong { max_len: 10, .. }
        ));
        assert!(matches!(
            review_schema().validate("from=2024-13-01").unwrap_err(),
            QueryViolation::Malformed { expected: "date", .. }
        ));
    }

    #[test]
    fn test_required_fields() {
        let schema = QuerySchema::new().required("year", FieldKind::Integer { min: 1900, max: 2100 });
        assert_eq!(
            schema.validate("").unwrap_err(),
            QueryViolation::Missing {
                name: "year".into()
            }
        );
        assert_eq!(
            schema.validate("year=").unwrap_err(),
            QueryViolation::Missing {
                name: "year".into()
            }
        );
        assert_eq!(schema.validate("year=2024").unwrap().integer("year"), Some(2024));
    }

    #[test]
    fn test_raw_params_keep_first_value() {
        let params = QueryParams::raw("a=1&b=two&a=3");
        assert_eq!(params.text("a"), Some("1"));
        assert_eq!(params.text("b"), Some("two"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_serializes_as_object() {
        let params = review_schema().validate("status=pending&rating=2").unwrap();
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"status":"pending","rating":2}"#);
    }
}
