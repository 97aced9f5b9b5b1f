use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::handlers::walkthrough::{self, Move};
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn response(status: u16, content_type: &[u8], body: Vec<u8>) -> Response<Cursor<Vec<u8>>> {
    let len = body.len();
    Response::new(
        StatusCode(status),
        vec![Header::from_bytes(b"Content-Type", content_type).unwrap()],
        Cursor::new(body),
        Some(len),
        None,
    )
}

pub fn html_response(body: String) -> Response<Cursor<Vec<u8>>> {
    response(200, b"text/html; charset=utf-8", body.into_bytes())
}

pub fn json_response(body: String) -> Response<Cursor<Vec<u8>>> {
    response(200, b"application/json", body.into_bytes())
}

pub fn redirect(location: &str) -> Response<Cursor<Vec<u8>>> {
    Response::new(
        StatusCode(303),
        vec![
            Header::from_bytes(b"Location", location.as_bytes()).unwrap(),
            Header::from_bytes(b"Content-Length", b"0").unwrap(),
        ],
        Cursor::new(Vec::new()),
        Some(0),
        None,
    )
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    response(404, b"text/plain", b"404 Not Found".to_vec())
}

pub fn server_error() -> Response<Cursor<Vec<u8>>> {
    response(500, b"text/plain", b"500 Internal Server Error".to_vec())
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches incoming requests to the walkthrough handlers.
///
/// Navigation is POST-then-redirect so a browser refresh never repeats a move.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url    = request.url().to_owned();
    let path   = url.split('?').next().unwrap_or("").to_owned();

    log::debug!("{method} {path}");

    let response = match (method, path.as_str()) {
        (Method::Get,  "/")             => walkthrough::handle_get(state),
        (Method::Post, "/next")         => walkthrough::handle_move(Move::Next, &mut request, state),
        (Method::Post, "/previous")     => walkthrough::handle_move(Move::Previous, &mut request, state),
        (Method::Post, "/reset")        => walkthrough::handle_move(Move::Reset, &mut request, state),
        (Method::Post, "/jump")         => walkthrough::handle_move(Move::Jump, &mut request, state),
        (Method::Get,  "/state.json")   => walkthrough::handle_state_json(state),
        (Method::Get,  "/catalog.json") => walkthrough::handle_catalog_json(),
        _ => not_found(),
    };

    if let Err(e) = request.respond(response) {
        log::warn!("failed to send response for {path}: {e}");
    }
}
