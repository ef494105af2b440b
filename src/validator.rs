use anyhow::anyhow;
use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, StatusCode, header},
};
use serde_json::{Map, Value};
use validator::Validate;

use ozp_core::json::type_name;
use ozp_core::{AppError, FieldErrors};
use ozp_models::FromPayload;

/// Extracts a JSON object body into `T`, collecting per-field errors.
///
/// An empty body is read as `{}`. Malformed JSON is rejected with a
/// `detail` message; a body that is valid JSON but not an object, or whose
/// fields fail [`FromPayload`] or [`Validate`], is rejected with a
/// field-keyed error map.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPayload<T>(pub T);

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

impl<T, S> FromRequest<S> for ValidatedPayload<T>
where
    T: FromPayload + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json_body = is_json_content_type(req.headers());
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(anyhow!("{}", rejection.body_text())))?;

        let object = if bytes.is_empty() {
            Map::new()
        } else {
            if !json_body {
                return Err(AppError::new(
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    anyhow!("Unsupported media type \"{}\" in request.", content_type),
                ));
            }

            let Json(value) = Json::<Value>::from_bytes(&bytes).map_err(|rejection| {
                AppError::bad_request(anyhow!("JSON parse error - {}", rejection.body_text()))
            })?;

            match value {
                Value::Object(object) => object,
                other => {
                    return Err(AppError::validation(FieldErrors::non_field(format!(
                        "Invalid data. Expected a dictionary, but got {}.",
                        type_name(&other)
                    ))));
                }
            }
        };

        let value = T::from_payload(&object).map_err(AppError::validation)?;

        value
            .validate()
            .map_err(|errors| AppError::validation(FieldErrors::from(&errors)))?;

        Ok(ValidatedPayload(value))
    }
}
