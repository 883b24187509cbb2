//! Search response decoding.
//!
//! Turns the host's `WebRequestResult` payload (status code and raw body) into
//! either the result set or a typed error.

use serde::{Deserialize, Serialize};

use crate::domain::error::{CinesearchError, Result};
use crate::domain::Movie;

/// Paged envelope returned by TMDB search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub page: i64,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: i64,
    #[serde(default)]
    pub total_results: i64,
}

/// Classifies a completed request and decodes its movie records.
///
/// - 2xx with a paged envelope or a bare JSON array: `Ok(movies)`.
/// - non-2xx with a JSON body: [`CinesearchError::Api`] (TMDB error document).
/// - non-2xx with any other body: [`CinesearchError::Request`], which is how the
///   host reports transport failures.
///
/// # Errors
///
/// See above; decoding failures yield [`CinesearchError::Json`] with the path
/// of the offending value.
///
/// ```
/// use cinesearch::api::handle_response;
///
/// let body = br#"{"page":1,"results":[{"id":603,"title":"The Matrix"}],"total_pages":1,"total_results":1}"#;
/// let movies = handle_response(200, body)?;
/// assert_eq!(movies[0].id, 603);
/// # Ok::<(), cinesearch::CinesearchError>(())
/// ```
pub fn handle_response(status: u16, body: &[u8]) -> Result<Vec<Movie>> {
    let text = String::from_utf8_lossy(body);

    if !(200..300).contains(&status) {
        return if serde_json::from_str::<serde_json::Value>(&text).is_ok() {
            Err(CinesearchError::Api {
                status_code: status,
                message: text.into_owned(),
            })
        } else {
            Err(CinesearchError::Request(format!("status {status}: {text}")))
        };
    }

    let value: serde_json::Value = serde_json::from_str(&text).map_err(|e| CinesearchError::Json {
        path: ".".to_string(),
        source: e,
    })?;

    if value.is_array() {
        decode::<Vec<Movie>>(value)
    } else {
        decode::<PaginatedResponse<Movie>>(value).map(|page| page.results)
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|e| CinesearchError::Json {
        path: e.path().to_string(),
        source: e.into_inner(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_paged_envelope() {
        let body = br#"{
            "page": 1,
            "results": [
                {"id": 268, "title": "Batman", "original_title": "Batman",
                 "poster_path": "/cij4dd21v2Rk2YtUQbV5kW69WB2.jpg", "release_date": "1989-06-21",
                 "vote_average": 7.2},
                {"id": 1, "title": null, "poster_path": null, "release_date": null}
            ],
            "total_pages": 1,
            "total_results": 2
        }"#;

        let movies = handle_response(200, body).unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title.as_deref(), Some("Batman"));
        assert_eq!(movies[1].poster_path, None);
    }

    #[test]
    fn decodes_bare_array() {
        let movies = handle_response(200, br#"[{"id": 5}]"#).unwrap();
        assert_eq!(movies, vec![Movie {
            id: 5,
            title: None,
            original_title: None,
            poster_path: None,
            release_date: None,
        }]);
    }

    #[test]
    fn empty_result_list_is_ok() {
        let movies = handle_response(200, br#"{"page":1,"results":[],"total_pages":0,"total_results":0}"#).unwrap();
        assert!(movies.is_empty());
    }

    #[test]
    fn api_error_document_is_api_error() {
        let body = br#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;
        match handle_response(401, body) {
            Err(CinesearchError::Api { status_code, message }) => {
                assert_eq!(status_code, 401);
                assert!(message.contains("Invalid API key"));
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn non_json_failure_is_request_error() {
        assert!(matches!(
            handle_response(400, b"error sending request: dns error"),
            Err(CinesearchError::Request(_))
        ));
    }

    #[test]
    fn wrong_shape_reports_path() {
        match handle_response(200, br#"{"results":[{"id":"abc"}]}"#) {
            Err(CinesearchError::Json { path, .. }) => assert_eq!(path, "results[0].id"),
            other => panic!("expected json error, got {other:?}"),
        }
    }

    #[test]
    fn garbage_body_is_json_error() {
        assert!(matches!(
            handle_response(200, b"<html>"),
            Err(CinesearchError::Json { .. })
        ));
    }
}
