//! Raw document preview handler.
//!
//! ```text
//! GET /preview/{id}
//! ```
//!
//! This surface backs the play iframe, so every outcome is a text/html
//! document rather than a JSON error envelope.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, web};
use tracing::error;
use uuid::Uuid;

use crate::domain::ports::{GalleryQuery, PreviewDocument};
use crate::inbound::http::state::HttpState;

const NOT_FOUND_DOCUMENT: &str = r#"<!DOCTYPE html>
<html>
<head><title>Not Found</title></head>
<body style="display:flex;align-items:center;justify-content:center;height:100vh;font-family:sans-serif;background:linear-gradient(135deg,#667eea,#764ba2);color:white;">
<h1>🔍 Oops! Creation not found!</h1>
</body>
</html>"#;

const ERROR_DOCUMENT: &str = r#"<!DOCTYPE html>
<html>
<head><title>Error</title></head>
<body style="display:flex;align-items:center;justify-content:center;height:100vh;font-family:sans-serif;background:linear-gradient(135deg,#f093fb,#f5576c);color:white;">
<h1>😵 Something went wrong!</h1>
</body>
</html>"#;

const EMPTY_DOCUMENT: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Ready to Create!</title>
  <style>
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body {
      min-height: 100vh;
      display: flex;
      align-items: center;
      justify-content: center;
      font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
      background: linear-gradient(135deg, #a8edea 0%, #fed6e3 100%);
    }
    .container {
      text-align: center;
      padding: 40px;
      background: white;
      border-radius: 30px;
      box-shadow: 0 20px 60px rgba(0,0,0,0.1);
    }
    .emoji { font-size: 80px; margin-bottom: 20px; animation: bounce 2s infinite; }
    h1 { color: #6c5ce7; font-size: 2.5rem; margin-bottom: 10px; }
    p { color: #a29bfe; font-size: 1.2rem; }
    @keyframes bounce {
      0%, 100% { transform: translateY(0); }
      50% { transform: translateY(-20px); }
    }
  </style>
</head>
<body>
  <div class="container">
    <div class="emoji">🎨</div>
    <h1>Ready to Create Magic!</h1>
    <p>Click the microphone and tell me what you want to build! ✨</p>
  </div>
</body>
</html>"#;

fn html_response(status: StatusCode, document: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(document)
}

/// Serve an artifact's current document for the play iframe.
///
/// Malformed ids read as missing artifacts; an iframe cannot do anything
/// useful with a JSON validation error.
#[utoipa::path(
    get,
    path = "/preview/{id}",
    params(
        ("id" = String, Path, description = "Artifact id")
    ),
    responses(
        (status = 200, description = "The artifact's document, or a placeholder when empty", body = String, content_type = "text/html"),
        (status = 404, description = "Styled not-found document", body = String, content_type = "text/html"),
        (status = 500, description = "Styled error document", body = String, content_type = "text/html")
    ),
    tags = ["preview"],
    operation_id = "preview"
)]
#[get("/preview/{id}")]
pub async fn preview(state: web::Data<HttpState>, path: web::Path<String>) -> HttpResponse {
    let Ok(project_id) = Uuid::parse_str(&path) else {
        return html_response(StatusCode::NOT_FOUND, NOT_FOUND_DOCUMENT.to_owned());
    };
    match state.gallery.preview_document(&project_id).await {
        Ok(PreviewDocument::Document(html)) => html_response(StatusCode::OK, html),
        Ok(PreviewDocument::Empty) => html_response(StatusCode::OK, EMPTY_DOCUMENT.to_owned()),
        Ok(PreviewDocument::Missing) => {
            html_response(StatusCode::NOT_FOUND, NOT_FOUND_DOCUMENT.to_owned())
        }
        Err(err) => {
            error!(%err, "preview lookup failed");
            html_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ERROR_DOCUMENT.to_owned(),
            )
        }
    }
}
