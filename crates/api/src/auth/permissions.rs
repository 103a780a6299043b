use crate::auth::Claims;
use async_graphql::{Context, Error, Result};

/// Require a logged-in administrator and return their claims.
pub fn require_admin(ctx: &Context<'_>) -> Result<Claims> {
    let claims = ctx
        .data::<Claims>()
        .map_err(|_| Error::new("You must be logged in to perform this action"))?;

    if !claims.is_admin() {
        return Err(Error::new(format!(
            "Access denied: Administrator privileges required. Your current role is {}",
            claims.role
        )));
    }

    Ok(claims.clone())
}
