use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::extractors::AdminUser,
    error::{ApiError, FieldError},
    products::{
        dto::{CreateProductRequest, Pagination, UpdateProductRequest},
        repo_types::Product,
    },
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(create_product))
        .route("/products/:id", put(update_product).delete(delete_product))
}

fn validate_create(payload: &CreateProductRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if payload.name.trim().is_empty() {
        errors.push(FieldError {
            field: "name",
            message: "nome é obrigatório",
        });
    }
    match payload.price {
        Some(p) if p.is_finite() && p >= 0.0 => {}
        _ => errors.push(FieldError {
            field: "price",
            message: "preço deve ser um número >= 0",
        }),
    }
    if payload.category.trim().is_empty() {
        errors.push(FieldError {
            field: "category",
            message: "categoria é obrigatória",
        });
    }
    match payload.stock {
        Some(s) if s >= 0 => {}
        _ => errors.push(FieldError {
            field: "stock",
            message: "estoque deve ser um inteiro >= 0",
        }),
    }
    errors
}

fn validate_update(payload: &UpdateProductRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if let Some(name) = &payload.name {
        if name.trim().is_empty() {
            errors.push(FieldError {
                field: "name",
                message: "nome deve ser uma string não vazia",
            });
        }
    }
    if let Some(price) = payload.price {
        if !price.is_finite() || price < 0.0 {
            errors.push(FieldError {
                field: "price",
                message: "preço deve ser um número >= 0",
            });
        }
    }
    if let Some(category) = &payload.category {
        if category.trim().is_empty() {
            errors.push(FieldError {
                field: "category",
                message: "categoria deve ser uma string não vazia",
            });
        }
    }
    if let Some(stock) = payload.stock {
        if stock < 0 {
            errors.push(FieldError {
                field: "stock",
                message: "estoque deve ser um inteiro >= 0",
            });
        }
    }
    errors
}

#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = Product::list(&state.db, p.limit, p.offset).await?;
    Ok(Json(products))
}

#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, ApiError> {
    let product = Product::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Produto não encontrado".into()))?;
    Ok(Json(product))
}

#[instrument(skip(state, admin, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let errors = validate_create(&payload);
    if !errors.is_empty() {
        warn!("create product payload failed validation");
        return Err(ApiError::Fields(errors));
    }

    let product = Product::create(
        &state.db,
        &payload.name,
        payload.description.as_deref(),
        payload.price.unwrap_or(0.0),
        &payload.category,
        payload.stock.unwrap_or(0),
    )
    .await?;

    info!(product_id = %product.id, admin_id = %admin.user_id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

#[instrument(skip(state, admin, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    let errors = validate_update(&payload);
    if !errors.is_empty() {
        warn!(%id, "update product payload failed validation");
        return Err(ApiError::Fields(errors));
    }

    let existing = Product::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Produto não encontrado".into()))?;

    // Absent fields keep their stored value.
    let name = payload.name.unwrap_or(existing.name);
    let description = payload.description.or(existing.description);
    let price = payload.price.unwrap_or(existing.price);
    let category = payload.category.unwrap_or(existing.category);
    let stock = payload.stock.unwrap_or(existing.stock);

    let updated = Product::update(
        &state.db,
        id,
        &name,
        description.as_deref(),
        price,
        &category,
        stock,
    )
    .await?;

    info!(product_id = %id, admin_id = %admin.user_id, "product updated");
    Ok(Json(updated))
}

#[instrument(skip(state, admin))]
pub async fn delete_product(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let removed = Product::delete(&state.db, id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Produto não encontrado".into()));
    }
    info!(product_id = %id, admin_id = %admin.user_id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_payload() -> CreateProductRequest {
        CreateProductRequest {
            name: "Mouse".into(),
            description: None,
            price: Some(19.9),
            category: "peripherals".into(),
            stock: Some(5),
        }
    }

    #[test]
    fn valid_create_payload_has_no_field_errors() {
        assert!(validate_create(&create_payload()).is_empty());
    }

    #[test]
    fn create_rejects_missing_price_and_stock() {
        let mut payload = create_payload();
        payload.price = None;
        payload.stock = None;
        let errors = validate_create(&payload);
        assert!(errors.iter().any(|e| e.field == "price"));
        assert!(errors.iter().any(|e| e.field == "stock"));
    }

    #[test]
    fn create_rejects_negative_and_non_finite_price() {
        let mut payload = create_payload();
        payload.price = Some(-1.0);
        assert!(validate_create(&payload)
            .iter()
            .any(|e| e.field == "price"));
        payload.price = Some(f64::NAN);
        assert!(validate_create(&payload)
            .iter()
            .any(|e| e.field == "price"));
    }

    #[test]
    fn create_rejects_negative_stock() {
        let mut payload = create_payload();
        payload.stock = Some(-3);
        assert!(validate_create(&payload)
            .iter()
            .any(|e| e.field == "stock"));
    }

    #[test]
    fn zero_price_and_zero_stock_are_valid() {
        let mut payload = create_payload();
        payload.price = Some(0.0);
        payload.stock = Some(0);
        assert!(validate_create(&payload).is_empty());
    }

    #[test]
    fn update_accepts_empty_payload() {
        let payload = UpdateProductRequest {
            name: None,
            description: None,
            price: None,
            category: None,
            stock: None,
        };
        assert!(validate_update(&payload).is_empty());
    }

    #[test]
    fn update_rejects_provided_but_invalid_fields() {
        let payload = UpdateProductRequest {
            name: Some("".into()),
            description: None,
            price: Some(-0.5),
            category: Some("  ".into()),
            stock: Some(-1),
        };
        let errors = validate_update(&payload);
        assert_eq!(errors.len(), 4);
    }
}
