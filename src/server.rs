//! # Report HTTP Endpoint
//!
//! A deliberately tiny HTTP/1.1 responder with a single route:
//!
//! | Request        | Response                                  |
//! |----------------|-------------------------------------------|
//! | `GET /`        | 200 with the current report file          |
//! | other method   | 405                                       |
//! | other path     | 404                                       |
//! | garbage        | 400                                       |
//!
//! The report is re-read from disk on every request, so a new pipeline run is
//! picked up without restarting. If the file is missing the request gets a
//! 500 and the server keeps accepting connections. Every connection is
//! answered once and closed.

use crate::config::ServerConfig;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

/// Upper bound on header lines read from a single request
const MAX_HEADER_LINES: usize = 100;

/// A fully buffered HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub reason: &'static str,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Response {
    fn html(body: Vec<u8>) -> Self {
        Response {
            status: 200,
            reason: "OK",
            content_type: "text/html; charset=utf-8",
            body,
        }
    }

    fn error(status: u16, reason: &'static str) -> Self {
        Response {
            status,
            reason,
            content_type: "text/plain; charset=utf-8",
            body: reason.as_bytes().to_vec(),
        }
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut out = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status,
            self.reason,
            self.content_type,
            self.body.len()
        )
        .into_bytes();
        out.extend_from_slice(&self.body);
        out
    }
}

/// Bind the configured address and serve `report_path` until the process ends.
pub async fn serve(config: &ServerConfig, report_path: PathBuf) -> io::Result<()> {
    let listener = TcpListener::bind((config.bind_address.as_str(), config.port)).await?;
    info!("Server is listening on port {}", config.port);
    run(listener, report_path).await
}

/// Accept connections on an already bound listener.
pub async fn run(listener: TcpListener, report_path: PathBuf) -> io::Result<()> {
    let report_path = Arc::new(report_path);
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Failed to accept connection: {}", e);
                continue;
            }
        };

        let report_path = Arc::clone(&report_path);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, &report_path).await {
                debug!("Connection from {} ended with error: {}", peer, e);
            }
        });
    }
}

async fn handle_connection(mut stream: TcpStream, report_path: &Path) -> io::Result<()> {
    let (reader, mut writer) = stream.split();
    let mut reader = BufReader::new(reader);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;

    // Drain headers; the route does not depend on them
    let mut line = String::new();
    for _ in 0..MAX_HEADER_LINES {
        line.clear();
        if reader.read_line(&mut line).await? == 0 || line.trim_end().is_empty() {
            break;
        }
    }

    let response = respond(request_line.trim_end(), report_path).await;
    info!(
        "{} -> {} {}",
        request_line.trim_end(),
        response.status,
        response.reason
    );

    writer.write_all(&response.to_bytes()).await?;
    writer.shutdown().await
}

/// Build the response for a raw request line such as `GET / HTTP/1.1`.
pub async fn respond(request_line: &str, report_path: &Path) -> Response {
    let mut parts = request_line.split_whitespace();
    let (method, target) = match (parts.next(), parts.next()) {
        (Some(method), Some(target)) => (method, target),
        _ => return Response::error(400, "Bad Request"),
    };

    let path = target.split('?').next().unwrap_or(target);
    if path != "/" {
        return Response::error(404, "Not Found");
    }
    if method != "GET" {
        return Response::error(405, "Method Not Allowed");
    }

    match tokio::fs::read(report_path).await {
        Ok(body) => Response::html(body),
        Err(e) => {
            warn!("Cannot read report {}: {}", report_path.display(), e);
            Response::error(500, "Internal Server Error")
        }
    }
}
