use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;

use awslite_core::hash::hex_sha256;
use awslite_core::time::now;
use awslite_core::{Credential, RequestSigner, SigningRequest};
use http::uri::{Authority, Scheme};
use http::{HeaderMap, Method};

criterion_group!(benches, bench);
criterion_main!(benches);

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("sigv4");

    group.bench_function("sign", |b| {
        let cred = Credential::new("access_key_id", "secret_access_key");
        let signer = RequestSigner::new("s3", "us-east-1");
        let payload_hash = hex_sha256(b"Hello, S3!");
        let time = now();

        let mut headers = HeaderMap::new();
        headers.insert("host", "hello.s3.us-east-1.amazonaws.com".parse().unwrap());
        headers.insert("x-amz-date", "20240701T000000Z".parse().unwrap());
        headers.insert("x-amz-content-sha256", payload_hash.parse().unwrap());

        b.iter(|| {
            let req = SigningRequest {
                method: Method::PUT,
                scheme: Scheme::HTTPS,
                authority: Authority::from_static("hello.s3.us-east-1.amazonaws.com"),
                path: "/hello".to_string(),
                query: String::new(),
                headers: headers.clone(),
            };
            signer
                .sign(&req, &cred, &payload_hash, time)
                .expect("must sign")
        })
    });

    group.finish();
}
