use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Restrictive CORS: only the configured origins
pub fn create_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.trim().parse::<HeaderValue>().ok())
        .collect();

    let origins = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("x-request-id"),
        ])
        .max_age(std::time::Duration::from_secs(86400))
}

/// CORS configuration for development (more permissive)
pub fn create_development_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(AllowMethods::any())
        .allow_headers(AllowHeaders::any())
}

/// Select the CORS layer for the deployment environment
pub fn create_cors_layer_for_environment(environment: &str, allowed_origins: &[String]) -> CorsLayer {
    if environment.eq_ignore_ascii_case("development") {
        create_development_cors_layer()
    } else {
        create_cors_layer(allowed_origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt;

    async fn preflight_origin(layer: CorsLayer, origin: &str) -> Option<String> {
        let app = Router::new()
            .route("/products", get(|| async { "ok" }))
            .layer(layer);

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/products")
                    .header("origin", origin)
                    .header("access-control-request-method", "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    #[tokio::test]
    async fn test_production_allows_listed_origin() {
        let origins = vec!["https://shop.example.com".to_string()];
        let layer = create_cors_layer_for_environment("production", &origins);

        let allowed = preflight_origin(layer, "https://shop.example.com").await;

        assert_eq!(allowed.as_deref(), Some("https://shop.example.com"));
    }

    #[tokio::test]
    async fn test_production_rejects_unlisted_origin() {
        let origins = vec!["https://shop.example.com".to_string()];
        let layer = create_cors_layer_for_environment("production", &origins);

        assert!(preflight_origin(layer, "https://evil.example.com").await.is_none());
    }

    #[tokio::test]
    async fn test_invalid_origins_fall_back_to_any() {
        let origins = vec!["\u{7f}bad".to_string()];
        let layer = create_cors_layer(&origins);

        let allowed = preflight_origin(layer, "https://anyone.example.com").await;

        assert_eq!(allowed.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn test_development_is_permissive() {
        let layer = create_cors_layer_for_environment("Development", &[]);

        assert_eq!(
            preflight_origin(layer, "http://localhost:5173").await.as_deref(),
            Some("*")
        );
    }
}
