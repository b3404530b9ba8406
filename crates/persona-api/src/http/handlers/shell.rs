//! GET / -- the browser shell that renders page updates.

use axum::response::Html;

const SHELL_HTML: &str = include_str!("shell.html");

pub async fn index() -> Html<&'static str> {
    Html(SHELL_HTML)
}
