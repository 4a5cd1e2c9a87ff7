use http::Extensions;
use log::{debug, warn};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};

// Reddit reports its per-client budget on every OAuth response.
const REMAINING: &str = "x-ratelimit-remaining";
const RESET: &str = "x-ratelimit-reset";

/// Below this many remaining requests a warning is logged.
const LOW_WATERMARK: f64 = 10.0;

fn header_number(response: &Response, name: &str) -> Option<f64> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Logs the rate limit headers. Pacing itself stays with the fixed pauses of
/// the run loop.
pub struct RateLimitLogMiddleware;

#[async_trait::async_trait]
impl Middleware for RateLimitLogMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let response = next.run(req, extensions).await?;

        let Some(remaining) = header_number(&response, REMAINING) else {
            return Ok(response);
        };
        let reset = header_number(&response, RESET).unwrap_or_default();

        if remaining < LOW_WATERMARK {
            warn!(
                "Reddit rate limit nearly used up: {} requests left, resets in {}s ({})",
                remaining,
                reset,
                response.url()
            );
        } else {
            debug!("Reddit rate limit: {} requests left, resets in {}s", remaining, reset);
        }

        Ok(response)
    }
}
