//! API router.
//!
//! Returns a composable `Router` with all endpoints nested under `/api/`.
//! The dashboard pages are served separately, so the router runs with a
//! permissive CORS layer.

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the API router around a pre-constructed context.
pub fn api_router(ctx: ApiContext) -> Router {
    let api = Router::new()
        .route(
            "/patients",
            get(endpoints::patients::list).post(endpoints::patients::create),
        )
        .route(
            "/patients/:id",
            put(endpoints::patients::update).delete(endpoints::patients::remove),
        )
        .route("/auth/login", post(endpoints::auth::login))
        .route("/clinic/config/:clinic_id", get(endpoints::clinic::config))
        .route("/webhook/appointments", post(endpoints::webhook::ingest))
        .route("/health", get(endpoints::health::check))
        .with_state(ctx);

    Router::new().nest("/api", api).layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::config::ClinicConfig;
    use crate::db;

    /// Context backed by a file database in a temp dir, so every request's
    /// own connection sees the same data. The tempdir guard must be kept
    /// alive for the duration of the test.
    fn test_context() -> (ApiContext, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let config = ClinicConfig {
            clinic_id: "clinic42".into(),
            clinic_name: "Clinic 42".into(),
            username: "front-desk".into(),
            password: "secret".into(),
            port: 0,
            db_path: tmp.path().join("clinicdesk.db"),
        };
        let ctx = ApiContext::new(config.clone());
        // Seed the clinic account the way startup does
        let conn = ctx.open_db().unwrap();
        db::clinics::ensure_clinic(&conn, &config).unwrap();
        (ctx, tmp)
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn listing_without_tenant_is_400() {
        let (ctx, _tmp) = test_context();
        let app = api_router(ctx);

        let response = app.oneshot(get_request("/api/patients")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Clinic ID required");
    }

    #[tokio::test]
    async fn create_then_list_round_trips() {
        let (ctx, _tmp) = test_context();
        let app = api_router(ctx);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/patients",
                serde_json::json!({
                    "clinicId": "c1",
                    "name": "Asha",
                    "phone": "555",
                    "price": "200",
                    "status": "Complete"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = body_json(response).await;
        assert_eq!(created["price"], 200.0);
        assert_eq!(created["source"], "dashboard");

        let response = app
            .oneshot(get_request("/api/patients?clinicId=c1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed = body_json(response).await;
        let records = listed.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["status"], "Complete");
        assert_eq!(records[0]["clinicId"], "c1");
    }

    #[tokio::test]
    async fn update_unknown_id_is_404() {
        let (ctx, _tmp) = test_context();
        let app = api_router(ctx);

        let response = app
            .oneshot(json_request(
                "PUT",
                "/api/patients/ghost",
                serde_json::json!({"name": "Nobody"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Record not found");
    }

    #[tokio::test]
    async fn delete_responds_with_confirmation_message() {
        let (ctx, _tmp) = test_context();
        let app = api_router(ctx);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/patients",
                serde_json::json!({"clinicId": "c1", "name": "Asha", "phone": "555"}),
            ))
            .await
            .unwrap();
        let created = body_json(response).await;
        let id = created["id"].as_str().unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/patients/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Deleted");

        let response = app
            .oneshot(get_request("/api/patients?clinicId=c1"))
            .await
            .unwrap();
        let listed = body_json(response).await;
        assert!(listed.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn login_checks_credentials() {
        let (ctx, _tmp) = test_context();
        let app = api_router(ctx);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                serde_json::json!({"username": "front-desk", "password": "secret"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["clinicId"], "clinic42");
        assert_eq!(json["name"], "Clinic 42");

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                serde_json::json!({"username": "front-desk", "password": "wrong"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn clinic_config_lookup() {
        let (ctx, _tmp) = test_context();
        let app = api_router(ctx);

        let response = app
            .clone()
            .oneshot(get_request("/api/clinic/config/clinic42"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["username"], "front-desk");

        let response = app
            .oneshot(get_request("/api/clinic/config/nope"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn webhook_rows_show_up_in_tenant_listing() {
        let (ctx, _tmp) = test_context();
        let app = api_router(ctx);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/webhook/appointments",
                serde_json::json!({
                    "clinic_name": "c1",
                    "patient_name": "Ravi",
                    "phone": "777",
                    "appointment_date": "2024-03-02",
                    "appointment_time": "09:30"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let stored = body_json(response).await;
        assert_eq!(stored["source"], "whatsapp");
        assert_eq!(stored["name"], "Ravi");

        let response = app
            .oneshot(get_request("/api/patients?clinicId=c1"))
            .await
            .unwrap();
        let listed = body_json(response).await;
        let records = listed.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["date"], "2024-03-02");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (ctx, _tmp) = test_context();
        let app = api_router(ctx);

        let response = app.oneshot(get_request("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let (ctx, _tmp) = test_context();
        let app = api_router(ctx);

        let response = app.oneshot(get_request("/nonexistent")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
