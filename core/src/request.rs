use std::mem;
use std::str::FromStr;

use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use http::Uri;

use crate::{Error, Result};

/// Signing view of an outgoing request.
///
/// Built from [`http::request::Parts`], mutated while the mandatory headers
/// are attached, and applied back once the `Authorization` header is in place.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority, also the value of the `host` header.
    pub authority: Authority,
    /// Percent-encoded request path.
    pub path: String,
    /// Raw query string, exactly as the caller encoded it.
    ///
    /// The canonical request writes this verbatim. AWS expects query
    /// parameters sorted by key, so callers attaching more than one parameter
    /// must pre-sort them.
    pub query: String,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing view from request parts.
    ///
    /// Headers and URI are taken out of `parts` to avoid copies; `apply`
    /// returns them.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let uri = mem::take(&mut parts.uri).into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: uri.scheme.unwrap_or(Scheme::HTTP),
            authority: uri
                .authority
                .ok_or_else(|| Error::request_invalid("request without authority cannot be signed"))?,
            path: paq.path().to_string(),
            query: paq.query().unwrap_or_default().to_string(),
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Apply the signing view back to request parts.
    pub fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        mem::swap(&mut parts.headers, &mut self.headers);
        parts.method = self.method;

        let paq = if self.query.is_empty() {
            self.path
        } else {
            let mut s = self.path;
            s.reserve(self.query.len() + 1);
            s.push('?');
            s.push_str(&self.query);
            s
        };

        let mut uri_parts = mem::take(&mut parts.uri).into_parts();
        uri_parts.scheme = Some(self.scheme);
        uri_parts.authority = Some(self.authority);
        uri_parts.path_and_query = Some(PathAndQuery::from_str(&paq)?);
        parts.uri = Uri::from_parts(uri_parts)?;

        Ok(())
    }

    /// Get header names as a sorted vector.
    ///
    /// `http` keeps header names lower-cased, so this is exactly the
    /// `SignedHeaders` list.
    pub fn header_name_to_vec_sorted(&self) -> Vec<&str> {
        let mut h = self
            .headers
            .keys()
            .map(|k| k.as_str())
            .collect::<Vec<&str>>();
        h.sort_unstable();

        h
    }

    /// Trim surrounding spaces off a header value.
    pub fn header_value_normalize(v: &mut HeaderValue) {
        let bs = v.as_bytes();

        let start = bs.iter().position(|b| *b != b' ').unwrap_or(0);
        let end = bs.len() - bs.iter().rev().position(|b| *b != b' ').unwrap_or(0);

        // This can't fail because we started with a valid HeaderValue and then only trimmed spaces
        *v = HeaderValue::from_bytes(&bs[start..end]).expect("invalid header value")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts_for(uri: &str) -> http::request::Parts {
        let req = http::Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(())
            .expect("request must build");
        req.into_parts().0
    }

    #[test]
    fn test_build_defaults_path_to_root() {
        let mut parts = parts_for("https://s3.us-east-1.amazonaws.com");
        let ctx = SigningRequest::build(&mut parts).expect("must build");

        assert_eq!(ctx.path, "/");
        assert_eq!(ctx.query, "");
        assert_eq!(ctx.authority.as_str(), "s3.us-east-1.amazonaws.com");
    }

    #[test]
    fn test_build_rejects_relative_uri() {
        let mut parts = parts_for("/no-authority");
        assert!(SigningRequest::build(&mut parts).is_err());
    }

    #[test]
    fn test_query_preserved_verbatim() {
        // Caller ordering survives the round trip untouched.
        let mut parts = parts_for("http://h:4566/p?b=2&a=1");
        let ctx = SigningRequest::build(&mut parts).expect("must build");
        assert_eq!(ctx.query, "b=2&a=1");

        ctx.apply(&mut parts).expect("must apply");
        assert_eq!(parts.uri.to_string(), "http://h:4566/p?b=2&a=1");
    }

    #[test]
    fn test_header_names_sorted() {
        let mut parts = parts_for("https://example.com/");
        parts.headers.insert("x-amz-date", "d".parse().unwrap());
        parts.headers.insert("host", "example.com".parse().unwrap());
        parts.headers.insert("content-length", "0".parse().unwrap());

        let ctx = SigningRequest::build(&mut parts).expect("must build");
        assert_eq!(
            ctx.header_name_to_vec_sorted(),
            vec!["content-length", "host", "x-amz-date"]
        );
    }

    #[test]
    fn test_header_value_normalize() {
        let mut v = HeaderValue::from_static("  spaced out  ");
        SigningRequest::header_value_normalize(&mut v);
        assert_eq!(v, "spaced out");
    }
}
