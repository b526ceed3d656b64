//! Bearer credential extraction

use axum::http::{HeaderMap, header};

/// Reasons an `Authorization` header does not carry a usable bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BearerError {
    #[error("Authorization header is missing")]
    Missing,

    #[error("Authorization header is not valid ASCII")]
    NotAscii,

    #[error("Authorization scheme is not Bearer")]
    WrongScheme,

    #[error("Bearer token is empty")]
    Empty,
}

/// Extract the token from `Authorization: Bearer <token>`
///
/// The scheme is matched case-insensitively; surrounding whitespace of the
/// credential is ignored.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::NotAscii)?;

    let (scheme, token) = value
        .trim_start()
        .split_once(' ')
        .ok_or(BearerError::WrongScheme)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(BearerError::WrongScheme);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(BearerError::Empty);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(extract_bearer(&headers("bearer  abc ")), Ok("abc"));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(extract_bearer(&HeaderMap::new()), Err(BearerError::Missing));
    }

    #[test]
    fn test_wrong_scheme() {
        assert_eq!(
            extract_bearer(&headers("Basic dXNlcjpwYXNz")),
            Err(BearerError::WrongScheme)
        );
        assert_eq!(extract_bearer(&headers("abc.def.ghi")), Err(BearerError::WrongScheme));
    }

    #[test]
    fn test_empty_token() {
        assert_eq!(extract_bearer(&headers("Bearer    ")), Err(BearerError::Empty));
    }
}
