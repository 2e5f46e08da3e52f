use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::{amounts, expenses};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/amounts", post(amounts::create).get(amounts::list))
        .route("/amounts/status", get(amounts::statuses))
        .route(
            "/amounts/{id}",
            patch(amounts::update).delete(amounts::remove),
        )
        .route(
            "/amounts/{id}/expenses",
            post(expenses::create)
                .get(expenses::list_for_amount)
                .delete(expenses::remove_all_for_amount),
        )
        .route(
            "/expenses/{id}",
            patch(expenses::update).delete(expenses::remove),
        )
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use migration::MigratorTrait;
    use sea_orm::Database;
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        let engine = Engine::builder().database(db).build();
        router(ServerState {
            engine: Arc::new(engine),
        })
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn amount_lifecycle_over_http() {
        let app = test_router().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/amounts",
                serde_json::json!({
                    "description": "Rent",
                    "value": "1000.00",
                    "date": "01-Jan-2025"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let amount_id = json_body(response).await["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/amounts/{amount_id}/expenses"),
                serde_json::json!({
                    "description": "Jan rent",
                    "value": "1000.00",
                    "date": "01-Jan-2025"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(empty_request("GET", "/amounts/status"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["amounts"][0]["status"], "finished");

        let response = app
            .clone()
            .oneshot(empty_request("GET", &format!("/amounts/{amount_id}/expenses")))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["total_spent"], "1000.00");
        assert_eq!(body["remaining"], "0.00");
    }

    #[tokio::test]
    async fn over_budget_is_403_with_max_allowed() {
        let app = test_router().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/amounts",
                serde_json::json!({
                    "description": "Trip",
                    "value": "500.00",
                    "date": "10-Jun-2025"
                }),
            ))
            .await
            .unwrap();
        let amount_id = json_body(response).await["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/amounts/{amount_id}/expenses"),
                serde_json::json!({
                    "description": "Hotel",
                    "value": "500.01",
                    "date": "10-Jun-2025"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = json_body(response).await;
        assert_eq!(body["error"], "can only add expense of 500.00");
    }

    #[tokio::test]
    async fn missing_amount_is_404() {
        let app = test_router().await;

        let response = app
            .clone()
            .oneshot(empty_request("GET", "/amounts/nope/expenses"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/amounts/nope/expenses",
                serde_json::json!({
                    "description": "Lunch",
                    "value": "10.00",
                    "date": "01-Jan-2025"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bad_inputs_are_400() {
        let app = test_router().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/amounts",
                serde_json::json!({
                    "description": "Rent",
                    "value": "1000.00",
                    "date": "2025-01-01"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/amounts",
                serde_json::json!({
                    "description": "Rent",
                    "value": "0.00",
                    "date": "01-Jan-2025"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/amounts",
                serde_json::json!({
                    "description": "   ",
                    "value": "10.00",
                    "date": "01-Jan-2025"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn bulk_expense_delete_reports_count_and_keeps_amount() {
        let app = test_router().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/amounts",
                serde_json::json!({
                    "description": "Household",
                    "value": "300.00",
                    "date": "01-Apr-2025"
                }),
            ))
            .await
            .unwrap();
        let amount_id = json_body(response).await["id"].as_str().unwrap().to_string();

        for description in ["Soap", "Bulbs", "Batteries"] {
            let response = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    &format!("/amounts/{amount_id}/expenses"),
                    serde_json::json!({
                        "description": description,
                        "value": "10.00",
                        "date": "02-Apr-2025"
                    }),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .clone()
            .oneshot(empty_request(
                "DELETE",
                &format!("/amounts/{amount_id}/expenses"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["removed"], 3);

        let response = app
            .clone()
            .oneshot(empty_request("GET", "/amounts"))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["amounts"][0]["value"], "300.00");
        assert_eq!(body["amounts"][0]["expense_count"], 0);
    }
}
