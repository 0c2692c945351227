use crate::error::ProofError;
use axum::{
    Json,
    http::StatusCode,
    response::{
        IntoResponse,
        Response,
    },
};
use proof_gen_core::ErrorResponse;
use tracing::error;

const FATAL_MESSAGE: &str = "Something went wrong while computing";

/// Error half of every handler's result.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse::new(None, message),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: ErrorResponse::new(None, message),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.body.message
    }
}

impl From<ProofError> for ApiError {
    fn from(err: ProofError) -> Self {
        match err {
            ProofError::Info { kind, message } => {
                Self {
                    status: StatusCode::NOT_FOUND,
                    body: ErrorResponse::new(Some(kind), message),
                }
            }
            ProofError::Fatal { .. } => {
                error!(target = "proof_gen::api", error = %err, "Request failed");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: ErrorResponse::new(None, FATAL_MESSAGE),
                }
            }
            ProofError::InvalidProof => {
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: ErrorResponse::new(None, err.to_string()),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::B256;
    use proof_gen_core::{
        ChainError,
        ErrorKind,
    };
    use std::time::Duration;

    #[test]
    fn info_is_not_found_with_kind() {
        let err = ApiError::from(ProofError::info(
            ErrorKind::IncorrectTx,
            &ChainError::IncorrectTx(B256::ZERO),
        ));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.body.kind, Some(ErrorKind::IncorrectTx));
        assert_eq!(err.message(), "Incorrect burn transaction");
    }

    #[test]
    fn fatal_hides_the_cause() {
        let err = ApiError::from(ProofError::Fatal {
            attempts: 4,
            last: ChainError::Rpc("http://10.0.0.4:8545 connection refused".into()),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), FATAL_MESSAGE);
        assert_eq!(err.body.kind, None);

        let err = ApiError::from(ProofError::Fatal {
            attempts: 2,
            last: ChainError::Timeout(Duration::from_secs(1)),
        });
        assert!(!err.message().contains("attempts"));
    }

    #[test]
    fn invalid_proof_is_internal() {
        let err = ApiError::from(ProofError::InvalidProof);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Invalid merkle proof created");
    }
}
