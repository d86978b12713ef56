use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ApiError;
use crate::recipes::dto::{CreateRecipeRequest, RecipeIngredientLine};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub author_id: Uuid,
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: i32,
    pub created_at: OffsetDateTime,
}

impl Recipe {
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Recipe>> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, author_id, name, text, image, cooking_time, created_at
            FROM recipes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(recipe)
    }
}

/// Inserts the recipe, its tag links and its ingredient lines in one
/// transaction, so a failed reference never leaves a half-created recipe.
pub async fn create(
    db: &PgPool,
    author_id: Uuid,
    req: &CreateRecipeRequest,
) -> Result<Recipe, ApiError> {
    let mut tx = db.begin().await?;

    let recipe = sqlx::query_as::<_, Recipe>(
        r#"
        INSERT INTO recipes (author_id, name, text, image, cooking_time)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, author_id, name, text, image, cooking_time, created_at
        "#,
    )
    .bind(author_id)
    .bind(&req.name)
    .bind(&req.text)
    .bind(&req.image)
    .bind(req.cooking_time)
    .fetch_one(&mut *tx)
    .await?;

    for tag_id in &req.tags {
        sqlx::query("INSERT INTO recipe_tags (recipe_id, tag_id) VALUES ($1, $2)")
            .bind(recipe.id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return ApiError::TagNotFound;
                    }
                }
                ApiError::Database(e)
            })?;
    }

    for line in &req.ingredients {
        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) VALUES ($1, $2, $3)",
        )
        .bind(recipe.id)
        .bind(line.id)
        .bind(line.amount)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return ApiError::IngredientNotFound;
                }
            }
            ApiError::Database(e)
        })?;
    }

    tx.commit().await?;
    Ok(recipe)
}

pub async fn ingredient_lines(
    db: &PgPool,
    recipe_id: Uuid,
) -> anyhow::Result<Vec<RecipeIngredientLine>> {
    let lines = sqlx::query_as::<_, RecipeIngredientLine>(
        r#"
        SELECT i.id, i.name, i.measurement_unit, ri.amount
        FROM recipe_ingredients ri
        JOIN ingredients i ON i.id = ri.ingredient_id
        WHERE ri.recipe_id = $1
        ORDER BY i.name, i.measurement_unit
        "#,
    )
    .bind(recipe_id)
    .fetch_all(db)
    .await?;
    Ok(lines)
}

/// Cascades take the tag links, ingredient lines, favorites and cart
/// entries with the recipe.
pub async fn delete(db: &PgPool, recipe_id: Uuid) -> Result<(), ApiError> {
    let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
        .bind(recipe_id)
        .execute(db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::RecipeNotFound);
    }
    Ok(())
}
