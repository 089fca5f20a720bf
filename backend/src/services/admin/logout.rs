use crate::services::admin::bearer_token;
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse};
use log::info;

/// Handler for `POST /api/admin/logout`. Always `204`; unknown tokens are
/// ignored.
pub async fn process(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    if let Some(token) = bearer_token(&req) {
        if state.sessions.revoke(token).await {
            info!("Admin logged out");
        }
    }
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use crate::services::{configure, test_support};
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};

    #[actix_web::test]
    async fn logout_revokes_the_token() {
        let (state, _dir) = test_support::state();
        let token = state.sessions.issue().await;
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, &state))).await;

        let req = test::TestRequest::post()
            .uri("/api/admin/logout")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(!state.sessions.is_valid(&token).await);

        let req = test::TestRequest::post().uri("/api/admin/logout").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }
}
