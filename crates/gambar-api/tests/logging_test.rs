//! Request logging never carries an edit token.
//!
//! Kept in its own test binary: it installs a thread-local subscriber and must
//! not share callsite state with other tests.

mod helpers;

use std::io::Write;
use std::sync::{Arc, Mutex};

use helpers::fixtures::{amir, amir_with};
use helpers::setup_test_app;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_edit_token_stays_out_of_request_logs() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = setup_test_app().await;
    let registered = app.register(&amir()).await;
    let token = registered.edit_token.clone();

    let response = app.client().get(&registered.edit_url).await;
    assert_eq!(response.status_code(), 200);
    let response = app
        .client()
        .post(&registered.edit_url)
        .form(&amir_with("name", "Amir H."))
        .await;
    assert_eq!(response.status_code(), 303);
    let response = app
        .client()
        .get(&format!("/edit/{}/extra", token))
        .await;
    assert_eq!(response.status_code(), 404);

    let output = logs.contents();
    assert!(output.contains("/edit/{token}"), "{}", output);
    assert!(!output.contains(&token), "token leaked into logs:\n{}", output);
    assert!(!output.contains(&token.to_uppercase()));
}
