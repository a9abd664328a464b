//! Request descriptor types.
//!
//! A request to Canvas is described by a verb, a relative endpoint path,
//! an ordered query, and an optional JSON body. Descriptors are built
//! fresh per tool invocation and never reused.

use std::fmt;
use std::str::FromStr;

use super::error::CanvasError;

/// The HTTP verbs the Canvas client supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Whether a JSON body is transmitted for this verb.
    pub fn sends_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = CanvasError;

    /// Parse a verb, case-insensitively. Anything outside the four
    /// supported verbs fails before any network activity.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(CanvasError::UnsupportedMethod(s.to_string())),
        }
    }
}

/// A single query parameter value: one scalar or a list of scalars.
///
/// List values encode as repeated keys (`include[]=a&include[]=b`), the
/// convention Canvas uses for `include[]`-style filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

/// An ordered set of query parameters for one request.
#[derive(Debug, Clone, Default)]
pub struct Query {
    params: Vec<(String, QueryValue)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter. Insertion order is preserved on the wire.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.params.push((key.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Flatten into (key, value) pairs, repeating the key for each item
    /// of a list value.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::with_capacity(self.params.len());
        for (key, value) in &self.params {
            match value {
                QueryValue::One(v) => pairs.push((key.as_str(), v.as_str())),
                QueryValue::Many(vs) => {
                    pairs.extend(vs.iter().map(|v| (key.as_str(), v.as_str())));
                }
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse_case_insensitive() {
        assert_eq!("get".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("Post".parse::<Method>().unwrap(), Method::Post);
        assert_eq!("PUT".parse::<Method>().unwrap(), Method::Put);
        assert_eq!("delete".parse::<Method>().unwrap(), Method::Delete);
    }

    #[test]
    fn test_method_parse_rejects_unsupported_verb() {
        let err = "PATCH".parse::<Method>().unwrap_err();
        assert!(matches!(err, CanvasError::UnsupportedMethod(v) if v == "PATCH"));
        assert!("HEAD".parse::<Method>().is_err());
        assert!("".parse::<Method>().is_err());
    }

    #[test]
    fn test_body_only_for_post_and_put() {
        assert!(!Method::Get.sends_body());
        assert!(Method::Post.sends_body());
        assert!(Method::Put.sends_body());
        assert!(!Method::Delete.sends_body());
    }

    #[test]
    fn test_query_pairs_preserve_order() {
        let mut query = Query::new();
        query.push("order_by", "due_at");
        query.push("search_term", "homework");
        assert_eq!(
            query.pairs(),
            vec![("order_by", "due_at"), ("search_term", "homework")]
        );
    }

    #[test]
    fn test_query_list_value_repeats_key() {
        let mut query = Query::new();
        query.push("enrollment_state", "active");
        query.push(
            "include[]",
            vec!["syllabus_body".to_string(), "term".to_string()],
        );
        assert_eq!(
            query.pairs(),
            vec![
                ("enrollment_state", "active"),
                ("include[]", "syllabus_body"),
                ("include[]", "term"),
            ]
        );
    }

    #[test]
    fn test_empty_query() {
        let query = Query::new();
        assert!(query.is_empty());
        assert!(query.pairs().is_empty());
    }
}
