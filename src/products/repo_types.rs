use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Product record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64, // non-negative, enforced on input and by a table check
    pub category: String,
    pub stock: i32, // non-negative integer
    pub created_at: OffsetDateTime,
}
