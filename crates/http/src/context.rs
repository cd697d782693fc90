//! Request access to the shared site context.

use anyhow::anyhow;
use axum::{extract::FromRequestParts, http::request::Parts};
use wrp_kernel::SharedContext;

use crate::error::AppError;

/// Extracts the [`SharedContext`] installed by
/// [`RouterBuilder::with_context`](crate::router::RouterBuilder::with_context).
///
/// A handler mounted on a router without the context is a wiring bug; the
/// request fails with a 500 and an error log instead of falling back to
/// default content.
pub struct Site(pub SharedContext);

impl<S> FromRequestParts<S> for Site
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<SharedContext>() {
            Some(ctx) => Ok(Site(ctx.clone())),
            None => {
                tracing::error!(
                    path = %parts.uri.path(),
                    "site context read outside the router that provides it"
                );
                Err(AppError::Internal(anyhow!(
                    "site context is not installed on this router"
                )))
            }
        }
    }
}
