use axum::http::{StatusCode, Uri};
use axum::Router;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thermowatch::{
    error::MonitorError, stop_channel, Controller, Event, Notifier, ThresholdStrategy,
    UrlPathNotifier, Watcher,
};
use tokio::net::TcpListener;
use tokio_test::{assert_err, assert_ok};

/// Start a local endpoint that answers every request with `status` after
/// `delay`, recording the raw request paths.
async fn spawn_endpoint(status: StatusCode, delay: Duration) -> (String, Arc<Mutex<Vec<String>>>) {
    let paths = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&paths);

    let app = Router::new().fallback(move |uri: Uri| {
        let recorded = Arc::clone(&recorded);
        async move {
            recorded.lock().unwrap().push(uri.path().to_string());
            tokio::time::sleep(delay).await;
            status
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api/push", addr), paths)
}

/// Test the payload lands URL-escaped in the request path
#[tokio::test]
async fn test_notify_sends_escaped_payload() {
    let (endpoint, paths) = spawn_endpoint(StatusCode::OK, Duration::ZERO).await;
    let notifier = UrlPathNotifier::new(&endpoint, Duration::from_secs(5)).unwrap();

    assert_ok!(notifier.notify("34.600 C").await);

    assert_eq!(*paths.lock().unwrap(), vec!["/api/push/34.600%20C"]);
}

/// Test non-200 answers are reported with their status
#[tokio::test]
async fn test_unexpected_status() {
    for status in [StatusCode::NO_CONTENT, StatusCode::NOT_FOUND, StatusCode::INTERNAL_SERVER_ERROR] {
        let (endpoint, _) = spawn_endpoint(status, Duration::ZERO).await;
        let notifier = UrlPathNotifier::new(&endpoint, Duration::from_secs(5)).unwrap();

        let err = assert_err!(notifier.notify("33.000 C").await);
        match err {
            MonitorError::UnexpectedStatus(code) => assert_eq!(code, status.as_u16()),
            other => panic!("expected UnexpectedStatus, got {:?}", other),
        }
    }
}

/// Test an unreachable endpoint is a transport error
#[tokio::test]
async fn test_unreachable_endpoint() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let notifier =
        UrlPathNotifier::new(&format!("http://{}/push", addr), Duration::from_secs(5)).unwrap();

    let err = assert_err!(notifier.notify("33.000 C").await);
    assert!(matches!(err, MonitorError::Transport { .. }));
}

/// Test a hanging endpoint is cut off by the request timeout
#[tokio::test]
async fn test_request_timeout() {
    let (endpoint, _) = spawn_endpoint(StatusCode::OK, Duration::from_secs(5)).await;
    let notifier = UrlPathNotifier::new(&endpoint, Duration::from_millis(100)).unwrap();

    let started = std::time::Instant::now();
    let err = assert_err!(notifier.notify("33.000 C").await);

    assert!(matches!(err, MonitorError::Transport { .. }));
    assert!(started.elapsed() < Duration::from_secs(4));
}

/// Events from a fixed list; the stream ends when the list runs out
struct ListWatcher(std::vec::IntoIter<Event>);

#[async_trait::async_trait]
impl Watcher for ListWatcher {
    fn watch(&mut self) -> thermowatch::Result<()> {
        Ok(())
    }

    async fn next_event(&mut self) -> Option<Event> {
        self.0.next()
    }
}

/// Test a rejecting endpoint does not stop the controller
#[tokio::test]
async fn test_controller_survives_rejecting_endpoint() {
    let (endpoint, paths) = spawn_endpoint(StatusCode::SERVICE_UNAVAILABLE, Duration::ZERO).await;
    let notifier = UrlPathNotifier::new(&endpoint, Duration::from_secs(5)).unwrap();

    let events = ["30.0", "33.0", "34.0", "31.0", "33.1"]
        .into_iter()
        .map(Event::from)
        .collect::<Vec<_>>();

    let (_stop, signal) = stop_channel();
    let mut controller = Controller::new(
        signal,
        ListWatcher(events.into_iter()),
        ThresholdStrategy::celsius(32.5),
        notifier,
    );

    let summary = assert_ok!(controller.start().await);

    assert_eq!(summary.events_seen, 5);
    assert_eq!(summary.notify_failures, 2);
    assert_eq!(
        *paths.lock().unwrap(),
        vec!["/api/push/33.000%20C", "/api/push/33.100%20C"]
    );
}
