//! Room category DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::RoomCategory;

/// Room category in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Nightly base price, decimal string
    pub base_price: String,
    pub max_occupancy: i32,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<RoomCategory> for CategoryDto {
    fn from(c: RoomCategory) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            base_price: c.base_price.to_string(),
            max_occupancy: c.max_occupancy,
            amenities: c.amenities,
            images: c.images,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

/// Request to create a room category
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
    /// Nightly base price, decimal string ("150.00")
    pub base_price: String,
    pub max_occupancy: i32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Partial category update; only supplied fields change
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub base_price: Option<String>,
    pub max_occupancy: Option<i32>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
}
