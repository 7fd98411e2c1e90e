use std::net::SocketAddr;
use std::time::Duration;

use campaign_tracker::api::feed::{FeedClient, FeedError, FeedSource};
use campaign_tracker::display::{
    AnimationTiming, MemorySurface, MetricDisplay, PresentationController, VerificationDisplay,
};
use campaign_tracker::models::{ContributionQuery, Metric, Tally, VerificationOutcome};
use campaign_tracker::services::{stats_service, verify_service};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Serve the same canned response to every connection
async fn serve(status_line: &'static str, body: String) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let body = body.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

fn fast_timing() -> AnimationTiming {
    AnimationTiming {
        duration: Duration::from_millis(10),
        tick: Duration::from_millis(2),
    }
}

#[tokio::test]
async fn stats_flow_over_http() {
    let body = serde_json::json!([
        { "amount": "100", "direction": "IN", "onChain": "true" },
        { "amount": "50", "direction": "OUT", "onChain": "1" },
        { "amount": "30", "direction": "IN", "onChain": "false" }
    ])
    .to_string();
    let addr = serve("200 OK", body).await;
    let client = FeedClient::new(format!("http://{}/exec", addr));

    let mut controller = PresentationController::new();
    let mut surface = MemorySurface::new();
    let snapshot = stats_service::refresh_stats(&client, &mut controller, fast_timing(), &mut surface)
        .await
        .expect("refresh");

    assert_eq!(snapshot.total_count, 2);
    assert_eq!(snapshot.donations, Tally { count: 1, sum: 100.0 });
    assert_eq!(snapshot.expenses, Tally { count: 1, sum: 50.0 });
    assert_eq!(surface.metric(Metric::TotalCount), Some(MetricDisplay::Frame(2)));
    assert_eq!(surface.metric(Metric::ExpenseAmount), Some(MetricDisplay::Frame(50)));
}

#[tokio::test]
async fn wrapped_envelope_over_http() {
    let body = serde_json::json!({
        "values": [
            { "amount": 20, "direction": "in", "onChain": true, "date": "2024-01-01", "time": "09:15" }
        ]
    })
    .to_string();
    let addr = serve("200 OK", body).await;
    let client = FeedClient::new(format!("http://{}/exec", addr));

    let records = client.fetch_records().await.expect("records");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].amount.positive(), Some(20.0));
}

#[tokio::test]
async fn server_error_is_a_fetch_failure() {
    let addr = serve("500 Internal Server Error", "{\"error\":\"boom\"}".to_string()).await;
    let client = FeedClient::new(format!("http://{}/exec", addr));

    let mut controller = PresentationController::new();
    let mut surface = MemorySurface::new();
    let result = stats_service::refresh_stats(&client, &mut controller, fast_timing(), &mut surface).await;

    assert!(matches!(result, Err(FeedError::ServerError(500, _))));
    for metric in Metric::ALL {
        assert_eq!(surface.metric(metric), Some(MetricDisplay::Error));
    }
}

#[tokio::test]
async fn not_found_status_is_http_error() {
    let addr = serve("404 Not Found", "missing".to_string()).await;
    let client = FeedClient::new(format!("http://{}/exec", addr));

    let result = client.fetch_records().await;
    assert!(matches!(result, Err(FeedError::HttpError(404, body)) if body == "missing"));
}

#[tokio::test]
async fn non_json_body_is_a_fetch_failure() {
    let addr = serve("200 OK", "<html>sign in</html>".to_string()).await;
    let client = FeedClient::new(format!("http://{}/exec", addr));

    let result = client.fetch_records().await;
    assert!(matches!(result, Err(FeedError::DeserializationError(_))));
}

#[tokio::test]
async fn unreachable_feed_is_a_request_error() {
    // Bind and drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = FeedClient::new(format!("http://{}/exec", addr));
    let result = client.fetch_records().await;
    assert!(matches!(result, Err(FeedError::RequestError(_))));
}

#[tokio::test]
async fn verify_flow_over_http() {
    let body = serde_json::json!({
        "data": [
            { "amount": "500", "direction": "IN", "onChain": "no", "date": "2024-01-01", "time": "14:00" },
            { "amount": "750", "direction": "IN", "onChain": "TRUE", "date": "2024-01-02", "time": "10:00:00" }
        ]
    })
    .to_string();
    let addr = serve("200 OK", body).await;
    let client = FeedClient::new(format!("http://{}/exec", addr));

    let cases = [
        (ContributionQuery::new("2024-01-01", "14:30", "500"), VerificationOutcome::Pending),
        (ContributionQuery::new("2024-01-02", "09:30", "750.0"), VerificationOutcome::Confirmed),
        (ContributionQuery::new("2024-01-01", "16:00", "500"), VerificationOutcome::NotFound),
    ];

    for (query, expected) in cases {
        let mut surface = MemorySurface::new();
        let outcome = verify_service::verify_contribution(&client, &query, Duration::ZERO, &mut surface)
            .await
            .expect("verify");
        assert_eq!(outcome, expected, "query {:?}", query);
        assert_eq!(surface.last_verification(), Some(VerificationDisplay::Outcome(expected)));
    }
}
