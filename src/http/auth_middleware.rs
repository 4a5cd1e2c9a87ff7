use std::sync::Arc;

use http::Extensions;
use reqwest::{header::AUTHORIZATION, header::HeaderValue, Request, Response};
use reqwest_middleware::{Middleware, Next, Result};

/// Attaches `Authorization: bearer <token>` whenever a token is available.
pub struct AuthHeaderMiddleware {
    pub token_fn: Arc<dyn Fn() -> Option<String> + Send + Sync>,
}

#[async_trait::async_trait]
impl Middleware for AuthHeaderMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        if let Some(token) = (self.token_fn)() {
            if let Ok(value) = HeaderValue::from_str(&format!("bearer {}", token)) {
                req.headers_mut().insert(AUTHORIZATION, value);
            }
        }
        next.run(req, extensions).await
    }
}
