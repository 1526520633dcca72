use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::core::Product;
use crate::index::QueryError;

/// 统一响应信封：三种查询成功与失败都用同一形状
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub message: String,
    pub data: Option<Vec<Product>>,
    pub error: bool,
}

impl Envelope {
    pub fn success(data: Vec<Product>) -> Self {
        Self {
            message: "success".to_string(),
            data: Some(data),
            error: false,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            error: true,
        }
    }
}

impl QueryError {
    pub fn status(&self) -> StatusCode {
        match self {
            QueryError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            QueryError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// 面向调用方的说明（不含原始输入以外的内部细节）
    pub fn client_message(&self) -> String {
        match self {
            QueryError::InvalidArgument { param: "id", .. } => "error converting id to int".into(),
            QueryError::InvalidArgument { param, .. } => {
                format!("error converting {} to float64", param)
            }
            QueryError::NotFound(_) => "error product not found".into(),
        }
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        tracing::debug!("query rejected: {}", self);
        (self.status(), Json(Envelope::failure(self.client_message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_mapping() {
        let bad = QueryError::InvalidArgument {
            param: "id",
            value: "abc".into(),
        };
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
        assert_eq!(bad.client_message(), "error converting id to int");

        let bad_price = QueryError::InvalidArgument {
            param: "priceGt",
            value: "x".into(),
        };
        assert_eq!(bad_price.client_message(), "error converting priceGt to float64");

        let missing = QueryError::NotFound(99);
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(missing.client_message(), "error product not found");
    }

    #[test]
    fn failure_envelope_has_null_data() {
        let v = serde_json::to_value(Envelope::failure("boom")).unwrap();
        assert_eq!(v["error"], true);
        assert!(v["data"].is_null());
        assert_eq!(v["message"], "boom");
    }
}
