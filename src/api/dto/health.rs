//! Bodies for the `/health` family.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Ordered from best to worst so `max` picks the overall status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// Serving, but some feature will fail (for example no catalog credential).
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    pub message: String,
    /// Set for checks that make a round trip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "degraded",
    "version": "0.1.0",
    "timestamp": "2025-04-01T09:00:00+00:00",
    "checks": {
        "cache_store": {"status": "healthy", "message": "sqlite reachable", "response_time_ms": 2},
        "catalog": {"status": "degraded", "message": "API key not configured"}
    }
}))]
pub struct HealthResponse {
    /// Worst status among `checks`
    pub status: HealthStatus,
    pub version: String,
    /// RFC 3339
    pub timestamp: String,
    pub checks: BTreeMap<String, ComponentHealth>,
}

impl HealthResponse {
    pub fn from_checks(checks: BTreeMap<String, ComponentHealth>) -> Self {
        let status = checks
            .values()
            .map(|check| check.status)
            .max()
            .unwrap_or(HealthStatus::Healthy);
        Self {
            status,
            version: crate::pkg_version().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            checks,
        }
    }
}
