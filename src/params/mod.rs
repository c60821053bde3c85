//! Typed request parameter extraction

pub mod extract;
pub mod num;
pub mod time;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use std::collections::{BTreeMap, HashMap};
use std::convert::Infallible;

pub use extract::{
    param_float, param_float_or_value, param_int, param_int_or_value, param_time,
    param_time_or_value, param_uint, param_uint_or_value, param_uuid, param_uuid_or_nil,
    param_uuid_or_value,
};
pub use num::NumError;
pub use time::{DATE, RFC3339};

/// Source of raw, named request parameters.
///
/// A missing parameter and an empty one are treated the same by the
/// extractors.
pub trait ParamSource {
    fn param(&self, key: &str) -> Option<&str>;
}

impl ParamSource for HashMap<String, String> {
    fn param(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl ParamSource for BTreeMap<String, String> {
    fn param(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// Path and query string parameters of a request.
///
/// Path parameters take precedence over query parameters of the same name.
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    values: HashMap<String, String>,
}

impl RequestParams {
    pub fn new(path: HashMap<String, String>, query: HashMap<String, String>) -> Self {
        let mut values = query;
        values.extend(path);
        Self { values }
    }
}

impl ParamSource for RequestParams {
    fn param(&self, key: &str) -> Option<&str> {
        self.values.param(key)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Routes without captures have no path parameters
        let path = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map(|Path(path)| path)
            .unwrap_or_default();

        let query = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map(|Query(query)| query)
            .unwrap_or_default();

        Ok(Self::new(path, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(uri: &str) -> Parts {
        let (parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_path_wins_over_query() {
        let path = HashMap::from([("id".to_string(), "path".to_string())]);
        let query = HashMap::from([
            ("id".to_string(), "query".to_string()),
            ("page".to_string(), "2".to_string()),
        ]);
        let params = RequestParams::new(path, query);

        assert_eq!(params.param("id"), Some("path"));
        assert_eq!(params.param("page"), Some("2"));
        assert_eq!(params.param("missing"), None);
    }

    #[test]
    fn test_from_request_parts_reads_query() {
        let mut parts = parts("http://example.com/items?limit=10&at=2024-01-31");
        let params = tokio_test::block_on(RequestParams::from_request_parts(&mut parts, &()))
            .unwrap();

        assert_eq!(params.param("limit"), Some("10"));
        assert_eq!(param_int(&params, "limit", 10, 64).unwrap(), 10);
        assert!(param_time(&params, "at", DATE).is_ok());
    }

    #[test]
    fn test_from_request_parts_without_params() {
        let mut parts = parts("http://example.com/");
        let params = tokio_test::block_on(RequestParams::from_request_parts(&mut parts, &()))
            .unwrap();

        assert_eq!(params.param("id"), None);
        assert_eq!(param_uint_or_value(&params, "id", 10, 64, 3), 3);
    }

    #[test]
    fn test_btree_map_source() {
        let src = BTreeMap::from([("f".to_string(), "1.25".to_string())]);
        assert_eq!(param_float(&src, "f", 64).unwrap(), 1.25);
    }
}
