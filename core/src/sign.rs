use std::fmt::Write;

use log::debug;
use percent_encoding::percent_decode_str;
use percent_encoding::utf8_percent_encode;

use crate::constants::AWS_URI_ENCODE_SET;
use crate::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use crate::time::{format_date, format_iso8601, DateTime};
use crate::{Credential, Error, Result, SigningRequest};

/// RequestSigner that implements AWS SigV4.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// The signer only reads request state: it computes the `Authorization`
/// header value and leaves attaching it to the caller.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    service: String,
    region: String,
}

impl RequestSigner {
    /// Create a new signer for a service and region.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),
        }
    }

    /// Compute the `Authorization` header value for a request.
    ///
    /// Every header present on `req` is signed; the mandatory AWS headers
    /// must already be attached. `now` must be the same instant the caller
    /// wrote into `x-amz-date`, or the remote verifier will derive a
    /// different signature.
    pub fn sign(
        &self,
        req: &SigningRequest,
        cred: &Credential,
        payload_hash: &str,
        now: DateTime,
    ) -> Result<String> {
        let creq = canonical_request_string(req, payload_hash)?;
        debug!("calculated canonical request:\n{creq}");

        // Scope: "20240701/<region>/<service>/aws4_request"
        let scope = format!(
            "{}/{}/{}/aws4_request",
            format_date(now),
            self.region,
            self.service
        );
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20240701T000000Z
        // 20240701/<region>/<service>/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "AWS4-HMAC-SHA256")?;
            writeln!(f, "{}", format_iso8601(now))?;
            writeln!(f, "{}", &scope)?;
            write!(f, "{}", hex_sha256(creq.as_bytes()))?;
            f
        };
        debug!("calculated string to sign:\n{string_to_sign}");

        let key = signing_key(&cred.secret_access_key, now, &self.region, &self.service);
        let signature = hex_hmac_sha256(&key, string_to_sign.as_bytes());

        Ok(format!(
            "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
            cred.access_key_id,
            scope,
            req.header_name_to_vec_sorted().join(";"),
            signature
        ))
    }
}

/// Build the canonical request string.
///
/// Newline-joined: method, encoded path, raw query, one `name:value` line per
/// header in sorted order, blank line, the signed-header list, and the
/// payload hash. The query is written exactly as the caller encoded it.
fn canonical_request_string(ctx: &SigningRequest, payload_hash: &str) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    writeln!(f, "{}", ctx.method)?;

    // Normalize the path through decode + AWS UriEncode; the path must start
    // with "/".
    let path = percent_decode_str(&ctx.path)
        .decode_utf8()
        .map_err(|e| Error::request_invalid("failed to decode path").with_source(e))?;
    let path = utf8_percent_encode(&path, &AWS_URI_ENCODE_SET);
    if ctx.path.starts_with('/') {
        writeln!(f, "{path}")?;
    } else {
        writeln!(f, "/{path}")?;
    }

    writeln!(f, "{}", ctx.query)?;

    let signed_headers = ctx.header_name_to_vec_sorted();
    for name in signed_headers.iter() {
        writeln!(f, "{}:{}", name, ctx.headers[*name].to_str()?)?;
    }
    writeln!(f)?;
    writeln!(f, "{}", signed_headers.join(";"))?;

    write!(f, "{payload_hash}")?;

    Ok(f)
}

/// Derive the scoped signing key.
///
/// Four chained HMAC-SHA256 steps over the prefixed secret, the date, the
/// region, the service, and the literal `aws4_request`. Always 32 bytes.
pub(crate) fn signing_key(secret: &str, now: DateTime, region: &str, service: &str) -> Vec<u8> {
    let secret = format!("AWS4{secret}");
    let sign_date = hmac_sha256(secret.as_bytes(), format_date(now).as_bytes());
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());

    hmac_sha256(sign_service.as_slice(), "aws4_request".as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::hex_sha256;
    use crate::time::parse_rfc3339;
    use http::uri::{Authority, Scheme};
    use http::{HeaderMap, Method};
    use pretty_assertions::assert_eq;

    const PAYLOAD: &[u8] = b"Hello, S3!";

    fn fixture_time() -> DateTime {
        parse_rfc3339("2024-07-01T00:00:00Z").expect("time must parse")
    }

    fn fixture_credential() -> Credential {
        Credential::new("accesskey", "secretaccesskey").with_session_token("sessiontoken")
    }

    /// PUT https://example-bucket.s3.us-west-2.amazonaws.com/test with every
    /// mandatory header attached.
    fn fixture_request(payload_hash: &str) -> SigningRequest {
        let mut headers = HeaderMap::new();
        let entries: [(&'static str, &str); 6] = [
            ("host", "example-bucket.s3.us-west-2.amazonaws.com"),
            ("content-length", "10"),
            ("x-amz-content-sha256", payload_hash),
            ("x-amz-date", "20240701T000000Z"),
            ("x-amz-security-token", "sessiontoken"),
            ("user-agent", "awslite-s3"),
        ];
        for (name, value) in entries {
            headers.insert(name, value.parse().expect("header value must parse"));
        }

        SigningRequest {
            method: Method::PUT,
            scheme: Scheme::HTTPS,
            authority: Authority::from_static("example-bucket.s3.us-west-2.amazonaws.com"),
            path: "/test".to_string(),
            query: String::new(),
            headers,
        }
    }

    #[test]
    fn test_canonical_request_golden() {
        let payload_hash = hex_sha256(PAYLOAD);
        let req = fixture_request(&payload_hash);

        let got = canonical_request_string(&req, &payload_hash).expect("must build");
        let want = "PUT\n\
                    /test\n\
                    \n\
                    content-length:10\n\
                    host:example-bucket.s3.us-west-2.amazonaws.com\n\
                    user-agent:awslite-s3\n\
                    x-amz-content-sha256:c9ad25d0e9aa0413bd60f3afd33a35844fca35c99ae4ebcf0f8cdc8df27372ab\n\
                    x-amz-date:20240701T000000Z\n\
                    x-amz-security-token:sessiontoken\n\
                    \n\
                    content-length;host;user-agent;x-amz-content-sha256;x-amz-date;x-amz-security-token\n\
                    c9ad25d0e9aa0413bd60f3afd33a35844fca35c99ae4ebcf0f8cdc8df27372ab";
        assert_eq!(got, want);
    }

    #[test]
    fn test_sign_golden_vector() {
        let payload_hash = hex_sha256(PAYLOAD);
        let req = fixture_request(&payload_hash);
        let signer = RequestSigner::new("s3", "us-east-1");

        let got = signer
            .sign(&req, &fixture_credential(), &payload_hash, fixture_time())
            .expect("must sign");
        assert_eq!(
            got,
            "AWS4-HMAC-SHA256 \
             Credential=accesskey/20240701/us-east-1/s3/aws4_request, \
             SignedHeaders=content-length;host;user-agent;x-amz-content-sha256;x-amz-date;x-amz-security-token, \
             Signature=189d2431d08ffbf26f9eb7e9794ef77ccd68c1ac64889fdf1fe23799775d948a"
        );
    }

    #[test]
    fn test_sign_is_deterministic() {
        let payload_hash = hex_sha256(PAYLOAD);
        let req = fixture_request(&payload_hash);
        let cred = fixture_credential();
        let signer = RequestSigner::new("s3", "us-east-1");

        let first = signer
            .sign(&req, &cred, &payload_hash, fixture_time())
            .expect("must sign");
        let second = signer
            .sign(&req, &cred, &payload_hash, fixture_time())
            .expect("must sign");
        assert_eq!(first, second);
    }

    #[test]
    fn test_signed_headers_match_attached_headers() {
        let payload_hash = hex_sha256(PAYLOAD);
        let mut req = fixture_request(&payload_hash);
        // An extra caller header must enter the signed set; nothing may be
        // dropped or added.
        req.headers
            .insert("x-amz-target", "AmazonSQS.SendMessage".parse().unwrap());

        let auth = RequestSigner::new("sqs", "us-east-1")
            .sign(&req, &fixture_credential(), &payload_hash, fixture_time())
            .expect("must sign");

        let want = req.header_name_to_vec_sorted().join(";");
        let signed = auth
            .split("SignedHeaders=")
            .nth(1)
            .and_then(|s| s.split(',').next())
            .expect("authorization must list signed headers");
        assert_eq!(signed, want);
        assert!(signed.contains("x-amz-target"));
    }

    #[test]
    fn test_credential_scope_round_trip() {
        let payload_hash = hex_sha256(PAYLOAD);
        let req = fixture_request(&payload_hash);
        let now = fixture_time();

        let auth = RequestSigner::new("s3", "us-east-1")
            .sign(&req, &fixture_credential(), &payload_hash, now)
            .expect("must sign");

        let scope = format!("{}/us-east-1/s3/aws4_request", format_date(now));
        assert!(auth.contains(&format!("Credential=accesskey/{scope},")));
    }

    #[test]
    fn test_signing_key_is_32_bytes() {
        let now = fixture_time();
        for secret in ["s", "secretaccesskey", &"x".repeat(512)] {
            assert_eq!(signing_key(secret, now, "us-east-1", "s3").len(), 32);
        }
    }

    #[test]
    fn test_canonical_request_inserts_leading_slash() {
        let payload_hash = hex_sha256(b"");
        let mut req = fixture_request(&payload_hash);
        req.path = "test".to_string();

        let creq = canonical_request_string(&req, &payload_hash).expect("must build");
        assert!(creq.starts_with("PUT\n/test\n"));
    }
}
