//! Café listing endpoint
//!
//! Implements `GET /cafe`: validates the `city`, `count` and `search` query
//! parameters, filters the directory and writes the matching café names as a
//! comma-separated plain-text body.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use url::form_urlencoded;

use crate::directory::CafeDirectory;
use crate::http;

/// Validation failures surfaced to the client as 400 Bad Request
///
/// The Display output is the exact response body consumers match on.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("unknown city")]
    UnknownCity,
    #[error("incorrect count")]
    IncorrectCount,
}

/// Raw query parameters of one `/cafe` request
///
/// Values are kept as received; validation happens in [`list_cafes`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CafeQuery {
    pub city: Option<String>,
    pub count: Option<String>,
    pub search: Option<String>,
}

impl CafeQuery {
    /// Parse the raw query string (percent-decoding included)
    ///
    /// Unknown parameters are ignored; repeated parameters keep the last
    /// occurrence.
    pub fn parse(query: Option<&str>) -> Self {
        let mut parsed = Self::default();
        for (key, value) in form_urlencoded::parse(query.unwrap_or("").as_bytes()) {
            match key.as_ref() {
                "city" => parsed.city = Some(value.into_owned()),
                "count" => parsed.count = Some(value.into_owned()),
                "search" => parsed.search = Some(value.into_owned()),
                _ => {}
            }
        }
        parsed
    }
}

/// Resolve a `/cafe` query against the directory
///
/// Order of operations is fixed: validate city, validate count, filter by
/// search, then truncate to count. Search never fails; an unmatched term
/// yields an empty result.
pub fn list_cafes(query: &CafeQuery, directory: &CafeDirectory) -> Result<String, QueryError> {
    let city = query.city.as_deref().unwrap_or("");
    let cafes = directory.get(city).ok_or(QueryError::UnknownCity)?;

    let count = match &query.count {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| QueryError::IncorrectCount)?,
        None => cafes.len(),
    };

    let matched: Vec<&str> = match query.search.as_deref() {
        Some(term) if !term.is_empty() => {
            let needle = term.to_lowercase();
            cafes
                .iter()
                .filter(|name| name.to_lowercase().contains(&needle))
                .map(String::as_str)
                .collect()
        }
        _ => cafes.iter().map(String::as_str).collect(),
    };

    let limit = matched.len().min(count);
    Ok(matched[..limit].join(","))
}

/// Handle one `/cafe` request
pub fn handle(
    query: Option<&str>,
    directory: &CafeDirectory,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let parsed = CafeQuery::parse(query);
    match list_cafes(&parsed, directory) {
        Ok(body) => http::build_text_response(body, is_head),
        Err(err) => http::build_400_response(&err.to_string()),
    }
}
