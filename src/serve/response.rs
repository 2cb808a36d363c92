//! HTTP response handlers.

use anyhow::Result;
use tiny_http::{Header, Request, Response, StatusCode};

const HTML: &str = "text/html; charset=utf-8";
const PLAIN: &str = "text/plain; charset=utf-8";

/// Respond with an HTML body.
pub fn respond_html(request: Request, status: u16, body: String) -> Result<()> {
    let response = Response::from_string(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", HTML));
    request.respond(response)?;
    Ok(())
}

/// Respond with a 301 permanent redirect to `location`.
pub fn respond_redirect(request: Request, location: &str) -> Result<()> {
    let header = Header::from_bytes("Location", location)
        .map_err(|()| anyhow::anyhow!("invalid redirect location `{location}`"))?;
    let response = Response::empty(StatusCode(301)).with_header(header);
    request.respond(response)?;
    Ok(())
}

/// Respond with 404.
pub fn respond_not_found(request: Request) -> Result<()> {
    let response = Response::from_string("404 Not Found")
        .with_status_code(StatusCode(404))
        .with_header(make_header("Content-Type", PLAIN));
    request.respond(response)?;
    Ok(())
}

/// Respond with 500 and the error message.
pub fn respond_error(request: Request, error: &anyhow::Error) -> Result<()> {
    let msg = super::render::escape(&format!("{error:#}"));
    let body = format!("<html><body><h1>Server Error</h1><pre>{msg}</pre></body></html>");
    respond_html(request, 500, body)
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    let response = Response::from_string("503 Service Unavailable")
        .with_status_code(StatusCode(503))
        .with_header(make_header("Content-Type", PLAIN));
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).unwrap()
}
