use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// Ordering applied to the rendered shopping list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShoppingListOrder {
    /// Ascending by ingredient name (the default contract).
    Name,
    /// Descending by summed amount, name as tie-break.
    Amount,
}

impl ShoppingListOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(ShoppingListOrder::Name),
            "amount" => Some(ShoppingListOrder::Amount),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub shopping_list_order: ShoppingListOrder,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "cookshare".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "cookshare-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
            refresh_ttl_minutes: std::env::var("JWT_REFRESH_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 14),
        };
        let shopping_list_order = std::env::var("SHOPPING_LIST_ORDER")
            .ok()
            .and_then(|v| ShoppingListOrder::parse(&v))
            .unwrap_or(ShoppingListOrder::Name);
        Ok(Self {
            database_url,
            jwt,
            shopping_list_order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_order_values() {
        assert_eq!(ShoppingListOrder::parse("name"), Some(ShoppingListOrder::Name));
        assert_eq!(
            ShoppingListOrder::parse("amount"),
            Some(ShoppingListOrder::Amount)
        );
    }

    #[test]
    fn rejects_unknown_order_values() {
        assert_eq!(ShoppingListOrder::parse("alphabetical"), None);
        assert_eq!(ShoppingListOrder::parse(""), None);
    }
}
