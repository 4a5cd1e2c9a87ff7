pub mod auth_middleware;
pub mod ratelimit_middleware;
