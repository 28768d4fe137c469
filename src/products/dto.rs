use serde::Deserialize;

/// Request body for product creation. Numeric fields are optional at the
/// serde level so a missing value reports a field error, not a body error.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub stock: Option<i32>,
}

/// Request body for product update. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub stock: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let p: Pagination = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(p.limit, 20);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn create_request_tolerates_missing_fields() {
        let req: CreateProductRequest =
            serde_json::from_str(r#"{"name":"Mouse"}"#).expect("deserialize");
        assert_eq!(req.name, "Mouse");
        assert!(req.price.is_none());
        assert!(req.stock.is_none());
    }

    #[test]
    fn update_request_distinguishes_absent_fields() {
        let req: UpdateProductRequest =
            serde_json::from_str(r#"{"price":19.9}"#).expect("deserialize");
        assert_eq!(req.price, Some(19.9));
        assert!(req.name.is_none());
        assert!(req.stock.is_none());
    }
}
