use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Catalog entry. `(name, measurement_unit)` is unique, so the same name
/// can appear under two units as two distinct entries.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub measurement_unit: String,
}

impl Ingredient {
    /// Name search ranks exact (case-insensitive) matches ahead of
    /// substring matches, then sorts by name.
    pub async fn search(db: &PgPool, name: Option<&str>) -> anyhow::Result<Vec<Ingredient>> {
        let ingredients = match name {
            Some(needle) => {
                sqlx::query_as::<_, Ingredient>(
                    r#"
                    SELECT id, name, measurement_unit
                    FROM ingredients
                    WHERE name ILIKE '%' || $1 || '%'
                    ORDER BY (LOWER(name) = LOWER($1)) DESC, name
                    "#,
                )
                .bind(needle)
                .fetch_all(db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Ingredient>(
                    "SELECT id, name, measurement_unit FROM ingredients ORDER BY name",
                )
                .fetch_all(db)
                .await?
            }
        };
        Ok(ingredients)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Ingredient>> {
        let ingredient = sqlx::query_as::<_, Ingredient>(
            "SELECT id, name, measurement_unit FROM ingredients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(ingredient)
    }
}
