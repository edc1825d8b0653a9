use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Product, ProductPayload},
};

const PRODUCT_COLUMNS: &str = "id, name, price, purchase_price";

pub async fn find_all(pool: &PgPool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {} FROM products ORDER BY id",
        PRODUCT_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(products)
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {} FROM products WHERE id = $1",
        PRODUCT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

pub async fn find_by_price_greater_than(pool: &PgPool, threshold: i32) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {} FROM products WHERE price > $1 ORDER BY id",
        PRODUCT_COLUMNS
    ))
    .bind(threshold)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

/// `pattern` is a raw LIKE pattern; callers supply the `%` wildcards.
pub async fn find_by_name_like(pool: &PgPool, pattern: &str) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {} FROM products WHERE name LIKE $1 ORDER BY id",
        PRODUCT_COLUMNS
    ))
    .bind(pattern)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

pub async fn insert(pool: &PgPool, req: &ProductPayload) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!(
        r#"
        INSERT INTO products (name, price, purchase_price)
        VALUES ($1, $2, $3)
        RETURNING {}
        "#,
        PRODUCT_COLUMNS
    ))
    .bind(&req.name)
    .bind(req.price)
    .bind(req.purchase_price)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

/// Full replacement keyed by `id`: every column is overwritten. The id
/// sequence is moved past any explicitly inserted id in the same transaction.
pub async fn upsert(pool: &PgPool, id: i32, req: &ProductPayload) -> Result<Option<Product>> {
    let mut tx = pool.begin().await?;

    let product = sqlx::query_as::<_, Product>(&format!(
        r#"
        INSERT INTO products (id, name, price, purchase_price)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO UPDATE
        SET
            name = EXCLUDED.name,
            price = EXCLUDED.price,
            purchase_price = EXCLUDED.purchase_price
        RETURNING {}
        "#,
        PRODUCT_COLUMNS
    ))
    .bind(id)
    .bind(&req.name)
    .bind(req.price)
    .bind(req.purchase_price)
    .fetch_optional(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        SELECT setval(
            pg_get_serial_sequence('products', 'id'),
            GREATEST((SELECT MAX(id) FROM products), 1)
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(product)
}

pub async fn delete_by_id(pool: &PgPool, id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
