//! Route definitions

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{handlers, AppState};

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(handlers::list_products).post(handlers::add_product),
        )
        .route("/products/:id", delete(handlers::delete_product))
        .route("/purchases", post(handlers::record_purchase))
        .route("/sales", post(handlers::record_sale))
        .route("/sales/:id/invoice", post(handlers::reissue_invoice))
        .route("/invoices/:token", get(handlers::download_invoice))
        .nest("/reports", report_routes())
}

fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/movements", get(handlers::movement_report))
        .route("/inventory", get(handlers::inventory_report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use tower::ServiceExt;

    fn form(method: Method, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_health() {
        let (state, _dir) = test_state().await;
        let response = create_app(state)
            .oneshot(empty(Method::GET, "/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json(response).await;
        assert_eq!(body["database"], "connected");
        assert_eq!(body["migrations"]["applied"], body["migrations"]["total"]);
    }

    #[tokio::test]
    async fn test_sale_and_invoice_download() {
        let (state, _dir) = test_state().await;
        let app = create_app(state);

        let response = app
            .clone()
            .oneshot(form(
                Method::POST,
                "/api/products",
                "name=Gadget&stock=15&price=6.00",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let product = json(response).await;
        let id = product["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(form(
                Method::POST,
                "/api/sales",
                &format!("product_id={id}&quantity=20"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(json(response).await["error"]["available"], 15);

        let response = app
            .clone()
            .oneshot(form(
                Method::POST,
                "/api/sales",
                &format!("product_id={id}&quantity=15"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let sale = json(response).await;
        assert_eq!(sale["product"]["stock"], 0);
        let url = sale["invoice"]["download_url"].as_str().unwrap().to_string();

        let response = app.oneshot(empty(Method::GET, &url)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .starts_with("attachment; filename=\"Factura_"));
        assert!(bytes(response).await.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_malformed_form_is_invalid_input() {
        let (state, _dir) = test_state().await;
        let response = create_app(state)
            .oneshot(form(
                Method::POST,
                "/api/products",
                "name=Gadget&stock=muchos&price=6.00",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
        assert_eq!(body["error"]["field"], "stock");
    }

    #[tokio::test]
    async fn test_missing_field_is_invalid_input() {
        let (state, _dir) = test_state().await;
        let response = create_app(state)
            .oneshot(form(Method::POST, "/api/purchases", "quantity=3"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json(response).await["error"]["field"], "product_id");
    }

    #[tokio::test]
    async fn test_purchase_unknown_product() {
        let (state, _dir) = test_state().await;
        let response = create_app(state)
            .oneshot(form(Method::POST, "/api/purchases", "product_id=7&quantity=3"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_missing_product_succeeds() {
        let (state, _dir) = test_state().await;
        let response = create_app(state)
            .oneshot(empty(Method::DELETE, "/api/products/42"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(response).await["deleted"], false);
    }

    #[tokio::test]
    async fn test_tampered_token_rejected() {
        let (state, _dir) = test_state().await;
        let response = create_app(state)
            .oneshot(empty(Method::GET, "/api/invoices/not.a.token"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reports_download() {
        let (state, _dir) = test_state().await;
        let app = create_app(state);

        let response = app
            .clone()
            .oneshot(empty(Method::GET, "/api/reports/inventory"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"reporte_inv.xlsx\""
        );
        assert!(bytes(response).await.starts_with(b"PK"));

        let response = app
            .oneshot(empty(Method::GET, "/api/reports/movements"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"informe_HZ_movimientos.pdf\""
        );
        assert!(bytes(response).await.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_reissue_unknown_sale() {
        let (state, _dir) = test_state().await;
        let response = create_app(state)
            .oneshot(empty(Method::POST, "/api/sales/5/invoice"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
