//! Mock day-off server for testing
//!
//! This module provides a mock HTTP server that simulates the day-off
//! backend, allowing for comprehensive adapter testing without a real
//! deployment.
//!
//! The mock server implements the same contract as the real backend:
//! - POST /auth/login returns { token, user }
//! - POST /auth/reset-password returns { success: true }
//! - GET /dayoffs and GET /dayoffs/{userId} return day-off arrays
//! - POST /dayoffs echoes the created pending request
//! - DELETE and PATCH on /dayoffs/{id} return { success: true }
//! - GET /users returns the user directory

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value as JsonValue;

/// Mock day-off server for testing
pub struct MockDayOffServer {
    port: u16,
    running: Arc<AtomicBool>,
    accept_thread: Option<thread::JoinHandle<()>>,
}

/// Configuration for mock behavior
#[derive(Debug, Clone, Default)]
pub struct MockServerConfig {
    /// Respond 401 to everything (bad credentials / expired token)
    pub fail_auth: bool,
    /// Respond 403 to authenticated routes (missing superuser role)
    pub forbid: bool,
    /// Respond 409 to mutations (duplicate date / non-pending decision)
    pub conflict: bool,
    /// Respond 404 to id-addressed operations
    pub missing: bool,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
    /// Serve dates as full RFC 3339 datetimes instead of plain days
    pub datetime_dates: bool,
}

// Response structures matching the real API

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MockDayOff {
    id: String,
    user_id: String,
    date: String,
    status: String,
    created_at: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MockUser {
    id: String,
    email: String,
    name: String,
    super_user: bool,
}

#[derive(Serialize)]
struct MockLoginResponse {
    token: String,
    user: MockUser,
}

impl MockDayOffServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockServerConfig) -> std::io::Result<Self> {
        Self::start_on_port(0, config)
    }

    /// Start mock server on a specific port (0 for random)
    pub fn start_on_port(port: u16, config: MockServerConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", port))?;
        let actual_port = listener.local_addr()?.port();

        // Non-blocking accept so the loop can notice the stop flag
        listener.set_nonblocking(true)?;

        let running = Arc::new(AtomicBool::new(true));
        let accept_thread = {
            let running = running.clone();
            thread::spawn(move || {
                while running.load(Ordering::SeqCst) {
                    match listener.accept() {
                        Ok((stream, _)) => {
                            let cfg = config.clone();
                            thread::spawn(move || handle_connection(stream, &cfg));
                        }
                        Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                            thread::sleep(Duration::from_millis(10));
                        }
                        Err(_) => break,
                    }
                }
            })
        };

        Ok(Self {
            port: actual_port,
            running,
            accept_thread: Some(accept_thread),
        })
    }

    /// Get the port the server is listening on
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get the base URL for this mock server
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.accept_thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockDayOffServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockServerConfig) {
    let mut buffer = [0; 4096];
    let n = match stream.read(&mut buffer) {
        Ok(n) => n,
        Err(_) => return,
    };
    let request = String::from_utf8_lossy(&buffer[..n]);

    if config.delay_ms > 0 {
        thread::sleep(Duration::from_millis(config.delay_ms));
    }

    let first_line = request.lines().next().unwrap_or("");
    let parts: Vec<&str> = first_line.split_whitespace().collect();

    if parts.len() < 2 {
        send_response(&mut stream, 400, "Bad Request", r#"{"error": "Invalid request"}"#);
        return;
    }

    let method = parts[0];
    let path = parts[1].split('?').next().unwrap_or(parts[1]);
    let body = request
        .split_once("\r\n\r\n")
        .map(|(_, b)| b.trim_end_matches('\0'))
        .unwrap_or("");

    // Auth routes are open; everything else wants a bearer token
    let is_auth_route = path.starts_with("/auth/");
    let request_lower = request.to_lowercase();
    let has_bearer = request_lower.contains("authorization: bearer ");

    if config.fail_auth {
        let message = if is_auth_route {
            r#"{"error": "Invalid credentials"}"#
        } else {
            r#"{"error": "Invalid or expired token"}"#
        };
        send_response(&mut stream, 401, "Unauthorized", message);
        return;
    }

    if !is_auth_route && !has_bearer {
        send_response(
            &mut stream,
            401,
            "Unauthorized",
            r#"{"error": "Invalid or expired token"}"#,
        );
        return;
    }

    if !is_auth_route && config.forbid {
        send_response(
            &mut stream,
            403,
            "Forbidden",
            r#"{"error": "Superuser required"}"#,
        );
        return;
    }

    match (method, path) {
        ("POST", "/auth/login") => {
            let email = json_str_field(body, "email").unwrap_or("dev@example.com".to_string());
            let super_user = email.contains("admin");
            let response = MockLoginResponse {
                token: "mock-token".to_string(),
                user: MockUser {
                    id: if super_user { "2" } else { "1" }.to_string(),
                    name: if super_user { "Jane Doe" } else { "John Doe" }.to_string(),
                    email,
                    super_user,
                },
            };
            let json = serde_json::to_string(&response).unwrap();
            send_response(&mut stream, 200, "OK", &json);
        }
        ("POST", "/auth/reset-password") => {
            send_response(&mut stream, 200, "OK", r#"{"success": true}"#);
        }
        ("GET", "/dayoffs") => {
            let json = serde_json::to_string(&seed_day_offs("1", config)).unwrap();
            send_response(&mut stream, 200, "OK", &json);
        }
        ("GET", _) if path.starts_with("/dayoffs/") => {
            let user_id = path.trim_start_matches("/dayoffs/");
            if config.missing {
                send_response(&mut stream, 404, "Not Found", r#"{"error": "User not found"}"#);
                return;
            }
            let json = serde_json::to_string(&seed_day_offs(user_id, config)).unwrap();
            send_response(&mut stream, 200, "OK", &json);
        }
        ("POST", "/dayoffs") => {
            if config.conflict {
                send_response(
                    &mut stream,
                    409,
                    "Conflict",
                    r#"{"error": "a request already exists for this date"}"#,
                );
                return;
            }
            let date = match json_str_field(body, "date") {
                Some(d) => d,
                None => {
                    send_response(
                        &mut stream,
                        400,
                        "Bad Request",
                        r#"{"error": "date is required"}"#,
                    );
                    return;
                }
            };
            let created = MockDayOff {
                id: "100".to_string(),
                user_id: "1".to_string(),
                date: format_date(&date, config),
                status: "pending".to_string(),
                created_at: "2024-04-20T09:00:00Z".to_string(),
            };
            let json = serde_json::to_string(&created).unwrap();
            send_response(&mut stream, 201, "Created", &json);
        }
        ("DELETE", _) if path.starts_with("/dayoffs/") => {
            if config.missing {
                send_response(
                    &mut stream,
                    404,
                    "Not Found",
                    r#"{"error": "Request not found"}"#,
                );
                return;
            }
            send_response(&mut stream, 200, "OK", r#"{"success": true}"#);
        }
        ("PATCH", _) if path.starts_with("/dayoffs/") => {
            if config.missing {
                send_response(
                    &mut stream,
                    404,
                    "Not Found",
                    r#"{"error": "Request not found"}"#,
                );
                return;
            }
            if config.conflict {
                send_response(
                    &mut stream,
                    409,
                    "Conflict",
                    r#"{"error": "only pending requests can be decided"}"#,
                );
                return;
            }
            send_response(&mut stream, 200, "OK", r#"{"success": true}"#);
        }
        ("GET", "/users") => {
            let users = vec![
                MockUser {
                    id: "1".to_string(),
                    email: "dev@example.com".to_string(),
                    name: "John Doe".to_string(),
                    super_user: false,
                },
                MockUser {
                    id: "2".to_string(),
                    email: "admin@example.com".to_string(),
                    name: "Jane Doe".to_string(),
                    super_user: true,
                },
            ];
            let json = serde_json::to_string(&users).unwrap();
            send_response(&mut stream, 200, "OK", &json);
        }
        _ => {
            send_response(&mut stream, 404, "Not Found", r#"{"error": "Not found"}"#);
        }
    }
}

/// The two canned requests every listing starts from
fn seed_day_offs(user_id: &str, config: &MockServerConfig) -> Vec<MockDayOff> {
    vec![
        MockDayOff {
            id: "1".to_string(),
            user_id: user_id.to_string(),
            date: format_date("2024-04-15", config),
            status: "approved".to_string(),
            created_at: "2024-04-01T10:00:00Z".to_string(),
        },
        MockDayOff {
            id: "2".to_string(),
            user_id: user_id.to_string(),
            date: format_date("2024-04-16", config),
            status: "pending".to_string(),
            created_at: "2024-04-01T10:00:00Z".to_string(),
        },
    ]
}

fn format_date(date: &str, config: &MockServerConfig) -> String {
    if config.datetime_dates {
        format!("{}T00:00:00Z", date)
    } else {
        date.to_string()
    }
}

/// Pull a string field out of a JSON request body
fn json_str_field(body: &str, field: &str) -> Option<String> {
    let value: JsonValue = serde_json::from_str(body).ok()?;
    value.get(field)?.as_str().map(|s| s.to_string())
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
