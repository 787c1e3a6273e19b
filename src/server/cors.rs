//! Origin allow-list applied to browser requests and the websocket handshake.

use actix_cors::Cors;
use actix_web::http::header::{self, HeaderMap};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AllowedOrigins {
    origins: Vec<String>,
}

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self { origins }
    }

    /// Parse a comma-separated list; blank entries are skipped.
    pub fn from_csv(value: &str) -> Self {
        Self::new(
            value
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(|origin| origin.trim_end_matches('/').to_string())
                .collect(),
        )
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        let origin = origin.trim_end_matches('/');
        self.origins.iter().any(|allowed| allowed == "*" || allowed == origin)
    }

    /// Requests without an `Origin` header are not browser cross-origin calls and pass.
    pub fn permits(&self, headers: &HeaderMap) -> bool {
        match headers.get(header::ORIGIN).and_then(|value| value.to_str().ok()) {
            Some(origin) => self.is_allowed(origin),
            None => true,
        }
    }

    /// CORS middleware for the HTTP endpoints: GET/POST, `Content-Type`, credentials.
    pub fn cors(&self) -> Cors {
        let cors = Cors::default()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_header(header::CONTENT_TYPE)
            .supports_credentials();
        if self.origins.iter().any(|origin| origin == "*") {
            return cors.allow_any_origin();
        }
        self.origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{header::HeaderValue, Method};
    use actix_web::{test, web, App, HttpResponse};

    #[::core::prelude::v1::test]
    fn test_from_csv_and_matching() {
        let origins = AllowedOrigins::from_csv(" https://a.example/ ,,http://localhost:3000");
        assert!(origins.is_allowed("https://a.example"));
        assert!(origins.is_allowed("http://localhost:3000/"));
        assert!(!origins.is_allowed("https://b.example"));
    }

    #[::core::prelude::v1::test]
    fn test_permits_missing_origin() {
        let origins = AllowedOrigins::from_csv("https://a.example");
        let mut headers = HeaderMap::new();
        assert!(origins.permits(&headers));
        headers.insert(header::ORIGIN, HeaderValue::from_static("https://b.example"));
        assert!(!origins.permits(&headers));
    }

    #[actix_web::test]
    async fn test_preflight_from_allowed_origin() {
        let origins = AllowedOrigins::from_csv("https://a.example");
        let app = test::init_service(
            App::new()
                .wrap(origins.cors())
                .route("/health", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/health")
            .insert_header((header::ORIGIN, "https://a.example"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        let headers = resp.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://a.example"
        );
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(), "true");
    }

    #[actix_web::test]
    async fn test_simple_request_from_allowed_origin() {
        let origins = AllowedOrigins::from_csv("https://a.example");
        let app = test::init_service(
            App::new()
                .wrap(origins.cors())
                .route("/health", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/health")
            .insert_header((header::ORIGIN, "https://a.example"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://a.example"
        );
    }
}
