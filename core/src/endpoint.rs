use http::uri::Authority;
use http::uri::Scheme;
use http::Uri;

use crate::{Error, Result};

/// Builds the absolute URL for a request from a base service endpoint.
///
/// The authority of the built URL is also the `host` header the signer signs,
/// so the transport and the signature always observe the same host, port
/// included.
#[derive(Debug, Clone)]
pub struct EndpointBuilder {
    scheme: Scheme,
    authority: Authority,
    base_path: String,
}

impl EndpointBuilder {
    /// Parse and validate a base endpoint like `https://s3.us-east-1.amazonaws.com`.
    ///
    /// Fails with [`ErrorKind::EndpointInvalid`](crate::ErrorKind::EndpointInvalid)
    /// when `base` is not an absolute URL with scheme and host. Trailing
    /// slashes are ignored.
    pub fn new(base: &str) -> Result<Self> {
        let uri: Uri = base
            .parse()
            .map_err(|e| Error::endpoint_invalid(format!("failed to parse endpoint {base}")).with_source(e))?;
        let parts = uri.into_parts();

        let scheme = parts
            .scheme
            .ok_or_else(|| Error::endpoint_invalid(format!("endpoint {base} has no scheme")))?;
        let authority = parts
            .authority
            .ok_or_else(|| Error::endpoint_invalid(format!("endpoint {base} has no host")))?;
        let base_path = parts
            .path_and_query
            .map(|paq| paq.path().trim_end_matches('/').to_string())
            .unwrap_or_default();

        Ok(Self {
            scheme,
            authority,
            base_path,
        })
    }

    /// Build the absolute URL for a request.
    ///
    /// A non-empty `subdomain` is prepended as a host label (virtual-hosted
    /// addressing: `bucket.host`); a non-empty `path` is joined onto the base
    /// path with exactly one `/`.
    pub fn build(&self, subdomain: &str, path: &str) -> String {
        let path = path.trim_start_matches('/');

        let mut url = String::with_capacity(
            self.scheme.as_str().len()
                + 3
                + subdomain.len()
                + 1
                + self.authority.as_str().len()
                + self.base_path.len()
                + 1
                + path.len(),
        );
        url.push_str(self.scheme.as_str());
        url.push_str("://");
        if !subdomain.is_empty() {
            url.push_str(subdomain);
            url.push('.');
        }
        url.push_str(self.authority.as_str());
        url.push_str(&self.base_path);
        if !path.is_empty() {
            url.push('/');
            url.push_str(path);
        }

        url
    }
}
