use sqlx::PgPool;
use uuid::Uuid;

use crate::products::repo_types::Product;

impl Product {
    pub async fn list(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<Product>> {
        let rows = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, category, stock, created_at
            FROM products
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, category, stock, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(product)
    }

    pub async fn create(
        db: &PgPool,
        name: &str,
        description: Option<&str>,
        price: f64,
        category: &str,
        stock: i32,
    ) -> anyhow::Result<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, price, category, stock)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, price, category, stock, created_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(stock)
        .fetch_one(db)
        .await?;
        Ok(product)
    }

    /// Full-row update; the handler merges unchanged fields beforehand.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        price: f64,
        category: &str,
        stock: i32,
    ) -> anyhow::Result<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2, description = $3, price = $4, category = $5, stock = $6
            WHERE id = $1
            RETURNING id, name, description, price, category, stock, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(stock)
        .fetch_one(db)
        .await?;
        Ok(product)
    }

    /// Returns the number of rows removed (0 when the id does not exist).
    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<u64> {
        let result = sqlx::query(r#"DELETE FROM products WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
