use serde::Serialize;

/// Uniform envelope returned by every business operation. Failures never
/// cross the service boundary as errors; they are reported here with
/// `success = false` and a human-readable message.
#[derive(Debug, Serialize)]
pub struct ServiceResult<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ServiceResult<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        ServiceResult {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        ServiceResult {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_serializes_without_data_field() {
        let result: ServiceResult<i32> = ServiceResult::fail("nope");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "nope");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn ok_carries_data() {
        let result = ServiceResult::ok(7, "done");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 7);
    }
}
