use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use mailform::config::Config;
use mailform::email::Mailer;
use mailform::models::Contact;

static NEXT_DB: AtomicUsize = AtomicUsize::new(0);

/// A running test server instance with a dedicated temporary database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: SqlitePool,
    pub client: Client,
    pub db_path: PathBuf,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Submit a JSON contact payload, return (body, status).
    pub async fn submit(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/contact"))
            .json(data)
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit form-urlencoded contact data, return (body, status).
    pub async fn submit_form(&self, data: &[(&str, &str)]) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/contact"))
            .form(data)
            .send()
            .await
            .expect("submit form failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Fetch the admin listing, return the contacts array.
    pub async fn list_contacts(&self) -> Vec<Value> {
        let resp = self
            .client
            .get(self.url("/api/contacts"))
            .send()
            .await
            .expect("list request failed");
        assert_eq!(resp.status(), StatusCode::OK, "list contacts non-200");
        let body: Value = resp.json().await.unwrap();
        body["contacts"].as_array().cloned().unwrap_or_default()
    }
}

/// Mailer double that records every attempt and optionally fails them all.
pub struct MockMailer {
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl MockMailer {
    pub fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            fail,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, _contact: &Contact) -> Result<(), String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err("relay rejected the message".to_string())
        } else {
            Ok(())
        }
    }
}

/// Poll until the mailer has seen `expected` attempts or the timeout passes.
pub async fn wait_for_calls(mailer: &MockMailer, expected: usize, timeout: Duration) -> bool {
    let deadline = std::time::Instant::now() + timeout;
    while std::time::Instant::now() < deadline {
        if mailer.calls() >= expected {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    mailer.calls() >= expected
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(None, 1000).await
}

/// Spawn a test app on a random port with a fresh temporary database, an
/// optional injected mailer, and the given contact rate limit.
pub async fn spawn_app_with(mailer: Option<Arc<MockMailer>>, rate_limit: u32) -> TestApp {
    let db_path = std::env::temp_dir().join(format!(
        "mailform_test_{}_{}.db",
        std::process::id(),
        NEXT_DB.fetch_add(1, Ordering::SeqCst),
    ));
    let database_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to open test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let config = Config {
        database_url,
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to a random port
        static_dir: "public".to_string(),
        max_body_size: 65536,
        trusted_proxies: vec![],
        rate_limit,
        rate_limit_window_secs: 60,
        smtp_retries: 1,
        log_level: "warn".to_string(),
        smtp: None,
    };

    let mailer = mailer.map(|m| m as Arc<dyn Mailer>);
    let (app, _state) = mailform::build_app_with_mailer(pool.clone(), config, mailer);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        pool,
        client,
        db_path,
    }
}

/// Close the pool and remove the temporary database files.
pub async fn cleanup(app: TestApp) {
    app.pool.close().await;

    let _ = std::fs::remove_file(&app.db_path);
    for suffix in ["-wal", "-shm"] {
        let mut side = app.db_path.as_os_str().to_owned();
        side.push(suffix);
        let _ = std::fs::remove_file(PathBuf::from(side));
    }
}

/// A valid baseline payload; tests override individual fields.
pub fn valid_payload() -> Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "+1 (555) 123-4567",
        "message": "Hi",
    })
}
