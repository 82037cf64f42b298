use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::{error, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::INTERNAL_ERROR_MESSAGE;

use super::MintError;

/// Body of every non-2xx response of the transaction-request endpoints.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Internal Server Error: {0}")]
    InternalError(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Internal causes are logged where the error is raised, never echoed.
        let error = match self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::MethodNotAllowed => "Method not allowed".to_string(),
            ApiError::InternalError(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse { error })
    }
}

impl From<MintError> for ApiError {
    fn from(err: MintError) -> Self {
        if err.is_client_error() {
            warn!("Rejected mint request: {}", err);
            ApiError::BadRequest(err.to_string())
        } else {
            error!("Failed to create mint transaction: {}", err);
            ApiError::InternalError(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, ErrorResponse) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_bad_request_echoes_message() {
        let (status, body) = body_of(ApiError::BadRequest("No account provided".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "No account provided");
    }

    #[actix_web::test]
    async fn test_internal_error_hides_cause() {
        let (status, body) =
            body_of(ApiError::InternalError("rpc node 10.0.0.3 refused".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, INTERNAL_ERROR_MESSAGE);
    }

    #[actix_web::test]
    async fn test_method_not_allowed() {
        let (status, body) = body_of(ApiError::MethodNotAllowed).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body.error, "Method not allowed");
    }

    #[test]
    fn test_mint_error_mapping() {
        let client: ApiError = MintError::InvalidQuantity { max: 3 }.into();
        assert!(matches!(client, ApiError::BadRequest(_)));

        let internal: ApiError = MintError::TemplateNotFound("gone".into()).into();
        assert!(matches!(internal, ApiError::InternalError(_)));
    }
}
