use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::tags::repo::Tag;

/// One ingredient requirement inside a recipe submission.
#[derive(Debug, Deserialize)]
pub struct IngredientLineInput {
    pub id: Uuid,
    pub amount: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub text: String,
    /// Opaque reference to the dish image (URL or storage key).
    pub image: String,
    pub cooking_time: i32,
    #[serde(default)]
    pub tags: Vec<Uuid>,
    pub ingredients: Vec<IngredientLineInput>,
}

impl CreateRecipeRequest {
    /// A recipe lists a given ingredient at most once; duplicates in one
    /// submission are rejected here, before anything touches the database.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("recipe name must not be empty".into());
        }
        if self.cooking_time < 1 {
            return Err("cooking time must be at least 1".into());
        }
        if self.ingredients.is_empty() {
            return Err("at least one ingredient is required".into());
        }
        let mut seen = HashSet::new();
        for line in &self.ingredients {
            if line.amount < 1 {
                return Err("ingredient amount must be at least 1".into());
            }
            if !seen.insert(line.id) {
                return Err("recipe lists the same ingredient twice".into());
            }
        }
        Ok(())
    }
}

/// Recipe author as shown inside a recipe, with the viewer-dependent
/// follow flag.
#[derive(Debug, Serialize)]
pub struct RecipeAuthor {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_subscribed: bool,
}

/// One (ingredient, amount) row of a recipe, flattened with catalog data.
#[derive(Debug, Serialize, FromRow)]
pub struct RecipeIngredientLine {
    pub id: Uuid,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

#[derive(Debug, Serialize)]
pub struct RecipeDetails {
    pub id: Uuid,
    pub tags: Vec<Tag>,
    pub author: RecipeAuthor,
    pub ingredients: Vec<RecipeIngredientLine>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: i32,
}

/// Compact summary returned by the cart toggle.
#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub id: Uuid,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateRecipeRequest {
        CreateRecipeRequest {
            name: "Pancakes".into(),
            text: "Mix and fry.".into(),
            image: "recipes/images/pancakes.png".into(),
            cooking_time: 20,
            tags: vec![],
            ingredients: vec![
                IngredientLineInput {
                    id: Uuid::new_v4(),
                    amount: 200,
                },
                IngredientLineInput {
                    id: Uuid::new_v4(),
                    amount: 2,
                },
            ],
        }
    }

    #[test]
    fn accepts_well_formed_submission() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn rejects_duplicate_ingredient() {
        let mut req = request();
        let id = req.ingredients[0].id;
        req.ingredients.push(IngredientLineInput { id, amount: 50 });
        let err = req.validate().unwrap_err();
        assert!(err.contains("same ingredient twice"));
    }

    #[test]
    fn rejects_non_positive_amount() {
        let mut req = request();
        req.ingredients[0].amount = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_cooking_time() {
        let mut req = request();
        req.cooking_time = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_empty_ingredient_list() {
        let mut req = request();
        req.ingredients.clear();
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_blank_name() {
        let mut req = request();
        req.name = "   ".into();
        assert!(req.validate().is_err());
    }
}
