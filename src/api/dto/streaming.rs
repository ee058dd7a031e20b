use serde::Serialize;
use utoipa::ToSchema;

use crate::services::{ServiceSource, StreamingServices};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StreamingServicesResponse {
    /// Preferred services first, then those discovered in cached provider data
    pub services: Vec<String>,
    pub preferred: Vec<String>,
    pub region: String,
    pub source: ServiceSource,
}

impl From<StreamingServices> for StreamingServicesResponse {
    fn from(services: StreamingServices) -> Self {
        Self {
            services: services.services,
            preferred: services.preferred,
            region: services.region,
            source: services.source,
        }
    }
}
