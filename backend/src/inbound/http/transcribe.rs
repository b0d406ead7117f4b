//! Speech transcription handler.
//!
//! ```text
//! POST /api/v1/transcribe (multipart/form-data, field "audio")
//! ```

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{post, web};
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{AudioUpload, Transcriber, TranscriberError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

const AUDIO_FIELD: &str = "audio";
const FALLBACK_FILENAME: &str = "recording.webm";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Response body for `POST /api/v1/transcribe`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TranscriptionBody {
    pub text: String,
}

fn malformed_multipart(error: MultipartError) -> Error {
    Error::invalid_request(format!("malformed multipart payload: {error}"))
}

fn map_transcriber_error(error: TranscriberError) -> Error {
    Error::upstream(format!("transcription failed: {error}"))
}

async fn read_audio_field(mut field: Field) -> Result<AudioUpload, Error> {
    let filename = field
        .content_disposition()
        .and_then(|disposition| disposition.get_filename())
        .unwrap_or(FALLBACK_FILENAME)
        .to_owned();
    let content_type = field
        .content_type()
        .map(|mime| mime.to_string())
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_owned());
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed_multipart)? {
        bytes.extend_from_slice(&chunk);
    }
    Ok(AudioUpload {
        bytes,
        filename,
        content_type,
    })
}

async fn collect_audio_upload(mut payload: Multipart) -> Result<AudioUpload, Error> {
    while let Some(field) = payload.try_next().await.map_err(malformed_multipart)? {
        if field.name() == Some(AUDIO_FIELD) {
            return read_audio_field(field).await;
        }
        // Unknown parts are skipped; the stream drains them on its own.
    }
    Err(missing_field_error(FieldName::new(AUDIO_FIELD)))
}

/// Turn a recorded clip into instruction text.
///
/// Accepts whatever the browser's recorder produced; the collaborator
/// works out the codec from the part's content type and filename.
#[utoipa::path(
    post,
    path = "/api/v1/transcribe",
    responses(
        (status = 200, description = "Transcribed text", body = TranscriptionBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 502, description = "Transcription failure", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["transcribe"],
    operation_id = "transcribe"
)]
#[post("/transcribe")]
pub async fn transcribe(
    state: web::Data<HttpState>,
    payload: Multipart,
) -> ApiResult<web::Json<TranscriptionBody>> {
    let audio = collect_audio_upload(payload).await?;
    let text = state
        .transcriber
        .transcribe(audio)
        .await
        .map_err(map_transcriber_error)?;
    Ok(web::Json(TranscriptionBody { text }))
}
