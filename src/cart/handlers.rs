use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{jwt::AuthUser, repo::User},
    cart::{repo, shopping_list},
    error::ApiError,
    recipes::{dto::RecipeSummary, repo::Recipe},
    state::AppState,
};

#[instrument(skip(state))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<RecipeSummary>), ApiError> {
    let recipe = Recipe::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::RecipeNotFound)?;

    repo::add(&state.db, user_id, recipe.id).await?;
    info!(%user_id, recipe_id = %recipe.id, "recipe added to cart");

    Ok((
        StatusCode::CREATED,
        Json(RecipeSummary {
            id: recipe.id,
            name: recipe.name,
            image: recipe.image,
            cooking_time: recipe.cooking_time,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let recipe = Recipe::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::RecipeNotFound)?;

    repo::remove(&state.db, user_id, recipe.id).await?;
    info!(%user_id, recipe_id = %recipe.id, "recipe removed from cart");

    Ok(StatusCode::NO_CONTENT)
}

/// Builds the downloadable shopping list for the caller's cart. Pure
/// read: one join query, an in-memory aggregation, a rendered text body.
/// An empty cart downloads as 200 with an empty body.
#[instrument(skip(state))]
pub async fn download_shopping_cart(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Response, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    let rows = repo::ingredient_rows(&state.db, user_id).await?;
    let lines = shopping_list::aggregate(rows, state.config.shopping_list_order);
    let body = shopping_list::render(&lines);

    let filename = format!("{}_shop_list.txt", sanitize_filename(&user.username));
    let headers = [
        (
            header::CONTENT_TYPE,
            "text/plain; charset=utf-8".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", filename),
        ),
    ];

    Ok((headers, body).into_response())
}

/// Usernames go into a Content-Disposition header; anything outside the
/// header-safe set becomes an underscore.
fn sanitize_filename(username: &str) -> String {
    username
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_plain_usernames_through() {
        assert_eq!(sanitize_filename("alice"), "alice");
        assert_eq!(sanitize_filename("bob-99"), "bob-99");
    }

    #[test]
    fn replaces_header_breaking_characters() {
        assert_eq!(sanitize_filename("a b\"c"), "a_b_c");
        assert_eq!(sanitize_filename("semi;colon\r\n"), "semi_colon__");
    }
}
