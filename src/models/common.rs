use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Success envelope for every handler response; error responses are shaped
/// by `AppError::error_response` with the matching `ApiError` body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let response = ApiResponse::success(json!({"value": 42}));
        let serialized = serde_json::to_value(&response).unwrap();
        assert_eq!(
            serialized,
            json!({"success": true, "data": {"value": 42}})
        );
    }

    #[test]
    fn test_empty_data_is_omitted() {
        let response = ApiResponse::<i64> {
            success: true,
            data: None,
        };
        let serialized = serde_json::to_value(&response).unwrap();
        assert_eq!(serialized, json!({"success": true}));
    }
}
