use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::ApiError;

/// Raw ingredient requirement pulled from the cart join, one row per
/// ingredient line of every recipe in the cart.
#[derive(Debug, Clone, FromRow)]
pub struct CartIngredientRow {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// The `(user_id, recipe_id)` primary key turns a concurrent duplicate
/// add into a unique violation, so exactly one of two racing adds wins.
pub async fn add(db: &PgPool, user_id: Uuid, recipe_id: Uuid) -> Result<(), ApiError> {
    sqlx::query("INSERT INTO cart_entries (user_id, recipe_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(recipe_id)
        .execute(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return ApiError::DuplicateCartEntry;
                }
            }
            ApiError::Database(e)
        })?;
    Ok(())
}

pub async fn remove(db: &PgPool, user_id: Uuid, recipe_id: Uuid) -> Result<(), ApiError> {
    let result = sqlx::query("DELETE FROM cart_entries WHERE user_id = $1 AND recipe_id = $2")
        .bind(user_id)
        .bind(recipe_id)
        .execute(db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::MissingCartEntry);
    }
    Ok(())
}

/// Expands the user's cart into its ingredient requirements with a single
/// statement, so a concurrent add or remove can never produce a
/// partially-mixed view of cart entries and their lines.
pub async fn ingredient_rows(db: &PgPool, user_id: Uuid) -> Result<Vec<CartIngredientRow>, ApiError> {
    let rows = sqlx::query_as::<_, CartIngredientRow>(
        r#"
        SELECT i.name, i.measurement_unit, ri.amount
        FROM cart_entries c
        JOIN recipe_ingredients ri ON ri.recipe_id = c.recipe_id
        JOIN ingredients i ON i.id = ri.ingredient_id
        WHERE c.user_id = $1
        ORDER BY i.name, i.measurement_unit
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
