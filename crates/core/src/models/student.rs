use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-student price overrides; `None` falls back to the global prices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPricing {
    pub usual_cost: Option<i32>,
    pub high_cost: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub pricing: StudentPricing,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStudentRequest {
    pub name: String,
    pub alias: Option<String>,
    #[serde(default)]
    pub usual_cost: Option<i32>,
    #[serde(default)]
    pub high_cost: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePricingRequest {
    pub usual_cost: Option<i32>,
    pub high_cost: Option<i32>,
}

impl From<UpdatePricingRequest> for StudentPricing {
    fn from(request: UpdatePricingRequest) -> Self {
        Self {
            usual_cost: request.usual_cost,
            high_cost: request.high_cost,
        }
    }
}
