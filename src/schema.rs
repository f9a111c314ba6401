//! JSON Schemas for the wire contract, for clients that generate bindings.

use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::calculator::{ZakatRequest, ZakatResponse};

pub fn request_schema() -> RootSchema {
    schema_for!(ZakatRequest)
}

pub fn response_schema() -> RootSchema {
    schema_for!(ZakatResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_schema_uses_wire_names() {
        let json = serde_json::to_value(request_schema()).unwrap();
        let props = &json["properties"];
        assert!(props.get("goldPricePerGram").is_some());
        assert!(props.get("silverPricePerGram").is_some());
        assert!(props.get("assets").is_some());
    }

    #[test]
    fn test_response_schema_includes_assessment() {
        let json = serde_json::to_string(&response_schema()).unwrap();
        assert!(json.contains("zakatableAmount"));
        assert!(json.contains("isObligatory"));
        assert!(json.contains("derivedPrices"));
    }
}
