use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{jwt::AuthUser, repo::User},
    error::ApiError,
    membership::{CartMembership, FavoriteMembership, FollowMembership, MembershipChecker},
    recipes::{
        dto::{CreateRecipeRequest, RecipeAuthor, RecipeDetails},
        repo::{self, Recipe},
    },
    state::AppState,
    tags::repo::Tag,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/recipes/:id", get(get_recipe))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", post(create_recipe))
        .route("/recipes/:id", axum::routing::delete(delete_recipe))
}

#[instrument(skip(state, payload))]
pub async fn create_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeDetails>), ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let recipe = repo::create(&state.db, user_id, &payload).await?;
    info!(recipe_id = %recipe.id, author_id = %user_id, "recipe created");

    let details = build_details(&state, user_id, recipe).await?;
    Ok((StatusCode::CREATED, Json(details)))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeDetails>, ApiError> {
    let recipe = Recipe::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::RecipeNotFound)?;
    let details = build_details(&state, user_id, recipe).await?;
    Ok(Json(details))
}

#[instrument(skip(state))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let recipe = Recipe::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::RecipeNotFound)?;
    if recipe.author_id != user_id {
        return Err(ApiError::Forbidden);
    }
    repo::delete(&state.db, recipe.id).await?;
    info!(recipe_id = %id, author_id = %user_id, "recipe deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Assembles the full recipe representation for one viewer. Each
/// viewer-dependent flag goes through its own membership checker.
async fn build_details(
    state: &AppState,
    viewer_id: Uuid,
    recipe: Recipe,
) -> Result<RecipeDetails, ApiError> {
    let author = User::find_by_id(&state.db, recipe.author_id)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    let tags = Tag::list_for_recipe(&state.db, recipe.id).await?;
    let ingredients = repo::ingredient_lines(&state.db, recipe.id).await?;

    let is_subscribed = FollowMembership
        .exists(&state.db, viewer_id, recipe.author_id)
        .await?;
    let is_favorited = FavoriteMembership
        .exists(&state.db, viewer_id, recipe.id)
        .await?;
    let is_in_shopping_cart = CartMembership
        .exists(&state.db, viewer_id, recipe.id)
        .await?;

    Ok(RecipeDetails {
        id: recipe.id,
        tags,
        author: RecipeAuthor {
            id: author.id,
            email: author.email,
            username: author.username,
            first_name: author.first_name,
            last_name: author.last_name,
            is_subscribed,
        },
        ingredients,
        is_favorited,
        is_in_shopping_cart,
        name: recipe.name,
        text: recipe.text,
        image: recipe.image,
        cooking_time: recipe.cooking_time,
    })
}
