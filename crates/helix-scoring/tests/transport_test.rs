//! Transport failure classification without a live model service.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::time::Duration;

use helix_core::errors::ScoringError;
use helix_core::models::FeatureVector;
use helix_core::traits::RiskScorer;
use helix_scoring::HttpScorer;

fn features() -> FeatureVector {
    FeatureVector::new(
        vec!["variant_count".to_string(), "pass_filter_count".to_string()],
        vec![120.0, 80.0],
    )
}

#[test]
fn unreachable_endpoint_is_unavailable_not_inference() {
    // Nothing listens on port 9; the connection is refused immediately.
    let scorer = HttpScorer::new(
        "diabetes",
        "http://127.0.0.1:9/score",
        Duration::from_millis(500),
    )
    .unwrap();

    let err = scorer.score(&features()).unwrap_err();
    match err {
        ScoringError::Unavailable { disease_id, .. } => {
            assert_eq!(disease_id, "diabetes");
        }
        other => panic!("expected Unavailable, got {other:?}"),
    }
}

/// Serve exactly one canned HTTP response on an ephemeral port, then
/// shut down. Returns the endpoint URL.
fn serve_once(status_line: &str, content_type: &str, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status_line}\r\n\
         content-type: {content_type}\r\n\
         content-length: {}\r\n\
         connection: close\r\n\r\n{body}",
        body.len()
    );
    std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 8192];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{addr}/score")
}

#[test]
fn plain_text_client_rejection_is_inference() {
    // A 4xx whose body is not a protocol envelope is still a rejection of
    // the request, not a transport failure — it must not be retried.
    let endpoint = serve_once("400 Bad Request", "text/plain", "Bad Request");
    let scorer = HttpScorer::new("diabetes", endpoint, Duration::from_secs(2)).unwrap();

    let err = scorer.score(&features()).unwrap_err();
    assert!(matches!(err, ScoringError::Inference { .. }));
}

#[test]
fn server_error_is_unavailable_even_with_an_envelope_body() {
    let body = r#"{"version":"1.0","request_id":"r-1","success":false,"error":"overloaded","risk_score":null,"model_version":null}"#;
    let endpoint = serve_once("503 Service Unavailable", "application/json", body);
    let scorer = HttpScorer::new("diabetes", endpoint, Duration::from_secs(2)).unwrap();

    let err = scorer.score(&features()).unwrap_err();
    assert!(matches!(err, ScoringError::Unavailable { .. }));
}

#[test]
fn malformed_success_body_is_unavailable() {
    let endpoint = serve_once("200 OK", "application/json", "not json");
    let scorer = HttpScorer::new("diabetes", endpoint, Duration::from_secs(2)).unwrap();

    let err = scorer.score(&features()).unwrap_err();
    assert!(matches!(err, ScoringError::Unavailable { .. }));
}

#[test]
fn scorer_reports_its_disease() {
    let scorer = HttpScorer::new(
        "tumor",
        "http://127.0.0.1:9/score",
        Duration::from_millis(500),
    )
    .unwrap();
    assert_eq!(scorer.disease_id(), "tumor");
}
