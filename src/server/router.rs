//! HTTP and WebSocket routing configuration.
//!
//! Defines the liveness endpoints and the matchmaking websocket endpoint.

use actix_web::{web, HttpResponse, Responder};
use crate::server::matchmaking::session::ws_matchmaking;

/// Body of the root endpoint.
pub const ROOT_GREETING: &str = "Video chat backend running";

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(root)))
        .service(web::resource("/health").route(web::get().to(health)))
        .service(web::resource("/ws").to(ws_matchmaking));
}

async fn root() -> impl Responder {
    HttpResponse::Ok().body(ROOT_GREETING)
}

async fn health() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix::Actor;
    use actix_web::{http::header, test, App};

    use crate::server::cors::AllowedOrigins;
    use crate::server::matchmaking::server::MatchmakingServer;
    use crate::server::state::AppState;

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new(
            MatchmakingServer::new().start(),
            AllowedOrigins::from_csv("https://allowed.example"),
        ))
    }

    #[actix_web::test]
    async fn test_root_and_health() {
        let app = test::init_service(App::new().app_data(state()).configure(config)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert!(resp.status().is_success());
        assert_eq!(test::read_body(resp).await, ROOT_GREETING);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert!(resp.status().is_success());
        assert_eq!(test::read_body(resp).await, "OK");
    }

    #[actix_web::test]
    async fn test_ws_rejects_disallowed_origin() {
        let app = test::init_service(App::new().app_data(state()).configure(config)).await;

        let req = test::TestRequest::get()
            .uri("/ws")
            .insert_header((header::ORIGIN, "https://evil.example"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);
    }
}
