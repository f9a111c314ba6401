//! Serializable record of one calculation, for callers that keep an audit
//! trail or issue certificates. The engine writes these and never reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculator::{ZakatRequest, ZakatResponse, calculate};
use crate::types::ZakatError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub request: ZakatRequest,
    pub response: ZakatResponse,
}

impl AssessmentRecord {
    pub fn new(request: ZakatRequest, response: ZakatResponse) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            request,
            response,
        }
    }

    /// Runs the calculation and wraps the result in a fresh record.
    pub fn capture(request: ZakatRequest) -> Result<Self, ZakatError> {
        let response = calculate(&request)?;
        Ok(Self::new(request, response))
    }

    pub fn to_json(&self) -> Result<String, ZakatError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ZakatError::configuration(format!("Failed to serialize record: {}", e)))
    }
}
