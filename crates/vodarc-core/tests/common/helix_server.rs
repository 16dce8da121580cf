//! Minimal HTTP/1.1 server standing in for the Helix API in integration tests.
//!
//! Answers `GET /users?login=..` and `GET /videos?user_id=..&type=..[&after=..]`
//! from canned JSON. Every request line is recorded so tests can assert on
//! pagination and on which types were queried.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct HelixFixture {
    /// login -> user id
    pub users: HashMap<String, String>,
    /// (type, after-cursor) -> response body
    pub pages: HashMap<(String, Option<String>), String>,
    /// Types that answer 500.
    pub failing_types: Vec<String>,
    /// Every request answers 401.
    pub unauthorized: bool,
}

impl HelixFixture {
    pub fn with_user(mut self, login: &str, id: &str) -> Self {
        self.users.insert(login.to_string(), id.to_string());
        self
    }

    pub fn with_page(mut self, video_type: &str, after: Option<&str>, body: String) -> Self {
        self.pages
            .insert((video_type.to_string(), after.map(str::to_string)), body);
        self
    }

    pub fn failing(mut self, video_type: &str) -> Self {
        self.failing_types.push(video_type.to_string());
        self
    }
}

pub struct HelixServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl HelixServer {
    /// Path-and-query of every request received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts the server on an ephemeral port. It runs until the process exits.
pub fn start(fixture: HelixFixture) -> HelixServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let fixture = Arc::new(fixture);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let fixture = Arc::clone(&fixture);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &fixture, &log));
        }
    });
    HelixServer {
        base_url: format!("http://127.0.0.1:{}/helix", port),
        requests,
    }
}

fn handle(mut stream: TcpStream, fixture: &HelixFixture, log: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let target = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    log.lock().unwrap().push(target.clone());

    let (status, body) = route(&target, fixture);
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}

fn route(target: &str, fixture: &HelixFixture) -> (&'static str, String) {
    if fixture.unauthorized {
        return (
            "401 Unauthorized",
            r#"{"error":"Unauthorized","status":401,"message":"Invalid OAuth token"}"#.to_string(),
        );
    }
    let url = match url::Url::parse(&format!("http://localhost{}", target)) {
        Ok(u) => u,
        Err(_) => return ("400 Bad Request", "{}".to_string()),
    };
    let query: HashMap<String, String> = url.query_pairs().into_owned().collect();

    if url.path().ends_with("/users") {
        let login = query.get("login").cloned().unwrap_or_default();
        let data = match fixture.users.get(&login) {
            Some(id) => format!(r#"[{{"id":"{}","login":"{}"}}]"#, id, login),
            None => "[]".to_string(),
        };
        return ("200 OK", format!(r#"{{"data":{}}}"#, data));
    }

    if url.path().ends_with("/videos") {
        let video_type = query.get("type").cloned().unwrap_or_default();
        if fixture.failing_types.contains(&video_type) {
            return ("500 Internal Server Error", r#"{"error":"boom"}"#.to_string());
        }
        let key = (video_type, query.get("after").cloned());
        return match fixture.pages.get(&key) {
            Some(body) => ("200 OK", body.clone()),
            None => ("200 OK", r#"{"data":[],"pagination":{}}"#.to_string()),
        };
    }

    ("404 Not Found", "{}".to_string())
}
