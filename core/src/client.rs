use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, Method};
use log::debug;
use serde::Deserialize;

use crate::constants::{X_AMZ_CONTENT_SHA_256, X_AMZ_DATE, X_AMZ_SECURITY_TOKEN};
use crate::endpoint::EndpointBuilder;
use crate::hash::hex_sha256;
use crate::sign::RequestSigner;
use crate::time::{format_iso8601, now, DateTime};
use crate::{Context, Credential, Error, Result, SigningRequest};

/// Assembles, signs and dispatches requests for one AWS service.
///
/// The client owns the endpoint, the credential and the signer; service
/// adapters only decide method, path and body. Cheap to clone, safe to share
/// across tasks: signing keeps no cross-call state.
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    endpoint: EndpointBuilder,
    signer: RequestSigner,
    credential: Credential,
    user_agent: String,

    time: Option<DateTime>,
}

impl Client {
    /// Create a new client.
    ///
    /// Fails with `EndpointInvalid` when `endpoint` is not an absolute URL,
    /// and with `ConfigInvalid` when region, service or the credential key
    /// pair are missing. Signing itself has no fallible branch, so all input
    /// validation happens here.
    pub fn new(
        ctx: Context,
        endpoint: &str,
        region: &str,
        service: &str,
        credential: Credential,
        user_agent: &str,
    ) -> Result<Self> {
        if region.is_empty() || service.is_empty() {
            return Err(Error::config_invalid("region and service must be set"));
        }
        if !credential.is_valid() {
            return Err(Error::config_invalid(
                "access key id and secret access key must be set",
            ));
        }

        Ok(Self {
            ctx,
            endpoint: EndpointBuilder::new(endpoint)?,
            signer: RequestSigner::new(service, region),
            credential,
            user_agent: user_agent.to_string(),
            time: None,
        })
    }

    /// Pin the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Build a fully headered, signed request without sending it.
    ///
    /// Attaches `host`, `content-length`, `x-amz-content-sha256` (the body
    /// hash, empty bodies included), `x-amz-date`, `x-amz-security-token`
    /// (whenever a session token is configured) and the service user agent,
    /// then signs and attaches `authorization` last.
    pub fn build_request(
        &self,
        method: Method,
        subdomain: &str,
        path: &str,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<http::Request<Bytes>> {
        let url = self.endpoint.build(subdomain, path);
        let now = self.time.unwrap_or_else(now);
        let payload_hash = hex_sha256(&body);

        let req = http::Request::builder()
            .method(method)
            .uri(url.as_str())
            .body(body)?;
        let (mut parts, body) = req.into_parts();
        parts.headers = headers;

        let mut signed_req = SigningRequest::build(&mut parts)?;
        for (_, value) in signed_req.headers.iter_mut() {
            SigningRequest::header_value_normalize(value);
        }

        signed_req
            .headers
            .insert(header::HOST, signed_req.authority.as_str().parse()?);
        signed_req
            .headers
            .insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));
        signed_req
            .headers
            .insert(X_AMZ_CONTENT_SHA_256, payload_hash.parse()?);
        signed_req
            .headers
            .insert(X_AMZ_DATE, format_iso8601(now).parse()?);
        if let Some(token) = &self.credential.session_token {
            let mut value: HeaderValue = token.parse()?;
            // Set token value sensitive to avoid leaking.
            value.set_sensitive(true);
            signed_req.headers.insert(X_AMZ_SECURITY_TOKEN, value);
        }
        if !signed_req.headers.contains_key(header::USER_AGENT) {
            signed_req
                .headers
                .insert(header::USER_AGENT, self.user_agent.parse()?);
        }

        let authorization =
            self.signer
                .sign(&signed_req, &self.credential, &payload_hash, now)?;
        let mut authorization: HeaderValue = authorization.parse()?;
        authorization.set_sensitive(true);
        signed_req
            .headers
            .insert(header::AUTHORIZATION, authorization);

        signed_req.apply(&mut parts)?;
        Ok(http::Request::from_parts(parts, body))
    }

    /// Build, sign and send a request.
    ///
    /// Non-2xx responses are decoded into the service error shape and
    /// returned as errors; the response is never retried here.
    pub async fn send(
        &self,
        method: Method,
        subdomain: &str,
        path: &str,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<http::Response<Bytes>> {
        let req = self.build_request(method, subdomain, path, headers, body)?;
        debug!("sending {} {}", req.method(), req.uri());

        let resp = self.ctx.http_send(req).await?;
        debug!("response status: {}", resp.status());

        if !resp.status().is_success() {
            return Err(decode_error_response(&resp));
        }
        Ok(resp)
    }
}

/// Structured error body AWS services return on rejected requests.
///
/// - [REST error responses](https://docs.aws.amazon.com/AmazonS3/latest/API/ErrorResponses.html)
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "PascalCase")]
pub struct ErrorResponse {
    /// Service error code, e.g. `NoSuchBucket`.
    pub code: String,
    /// Human readable description.
    pub message: String,
    /// The resource the request addressed.
    pub resource: String,
    /// Request id for support correlation.
    pub request_id: String,
}

fn decode_error_response(resp: &http::Response<Bytes>) -> Error {
    let body = String::from_utf8_lossy(resp.body());
    match quick_xml::de::from_str::<ErrorResponse>(&body) {
        Ok(decoded) => Error::service(format!(
            "{}: {} (resource: {}, request id: {})",
            decoded.code, decoded.message, decoded.resource, decoded.request_id
        )),
        Err(e) => Error::unexpected(format!(
            "service returned {} with undecodable body",
            resp.status()
        ))
        .with_source(e),
    }
}
