use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Existence check for one user↔target relation.
///
/// Each relation gets its own implementation and callers pick the checker
/// they need; no shared helper branches on entity type.
#[async_trait]
pub trait MembershipChecker: Send + Sync {
    async fn exists(&self, db: &PgPool, user_id: Uuid, target_id: Uuid) -> anyhow::Result<bool>;
}

/// The target recipe is in the user's shopping cart.
pub struct CartMembership;

#[async_trait]
impl MembershipChecker for CartMembership {
    async fn exists(&self, db: &PgPool, user_id: Uuid, target_id: Uuid) -> anyhow::Result<bool> {
        let present = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM cart_entries WHERE user_id = $1 AND recipe_id = $2)",
        )
        .bind(user_id)
        .bind(target_id)
        .fetch_one(db)
        .await?;
        Ok(present)
    }
}

/// The target recipe is among the user's favorites.
pub struct FavoriteMembership;

#[async_trait]
impl MembershipChecker for FavoriteMembership {
    async fn exists(&self, db: &PgPool, user_id: Uuid, target_id: Uuid) -> anyhow::Result<bool> {
        let present = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM favorites WHERE user_id = $1 AND recipe_id = $2)",
        )
        .bind(user_id)
        .bind(target_id)
        .fetch_one(db)
        .await?;
        Ok(present)
    }
}

/// The user follows the target author.
pub struct FollowMembership;

#[async_trait]
impl MembershipChecker for FollowMembership {
    async fn exists(&self, db: &PgPool, user_id: Uuid, target_id: Uuid) -> anyhow::Result<bool> {
        let present = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM follows WHERE follower_id = $1 AND author_id = $2)",
        )
        .bind(user_id)
        .bind(target_id)
        .fetch_one(db)
        .await?;
        Ok(present)
    }
}
