//! Common test utilities for the TruValue HTTP service

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use truvalue::{
    config::ServiceConfig, create_app, model::ModelSlot, pipeline::ForestParams,
    server::state::ServerState,
};

/// Ten listings across four locations, prices between 650k and 4.8M AED.
pub const TRAINING_CSV: &str = "\
Area_sqft,Bedrooms,Bathrooms,Location,Age_years,Price_AED
1000,2,2,Dubai Marina,5,1200000
1500,3,2,Dubai Marina,3,1850000
800,1,1,JVC,8,650000
1200,2,2,JVC,4,900000
2500,4,4,Palm Jumeirah,2,4800000
2100,3,3,Palm Jumeirah,6,3900000
950,1,1,Downtown Dubai,10,1300000
1400,2,2,Downtown Dubai,1,2100000
1100,2,1,JVC,12,720000
1800,3,3,Dubai Marina,7,2050000
";

pub const MIN_TRAINING_PRICE: f64 = 650_000.0;
pub const MAX_TRAINING_PRICE: f64 = 4_800_000.0;

/// `n` generated listings with prices multiplied by `price_scale`.
pub fn synthetic_csv(n: usize, price_scale: f64) -> String {
    const LOCATIONS: [&str; 4] = ["Dubai Marina", "JVC", "Palm Jumeirah", "Downtown Dubai"];

    let mut csv = String::from("Area_sqft,Bedrooms,Bathrooms,Location,Age_years,Price_AED\n");
    for i in 0..n {
        let area = 600 + (i * 37) % 2400;
        let bedrooms = 1 + i % 5;
        let bathrooms = 1 + (i / 3) % 4;
        let location = i % LOCATIONS.len();
        let age = (i * 7) % 20;
        let price = (area as f64 * 1_100.0 * (1.0 + location as f64 * 0.4)
            - age as f64 * 9_000.0
            + bedrooms as f64 * 25_000.0)
            * price_scale;
        csv.push_str(&format!(
            "{area},{bedrooms},{bathrooms},{},{age},{price:.0}\n",
            LOCATIONS[location]
        ));
    }
    csv
}

pub const MULTIPART_BOUNDARY: &str = "truvalue-test-boundary";

/// A router over a fresh artifact directory.
pub struct TestApp {
    pub router: Router,
    pub state: ServerState,
    pub slot: Arc<ModelSlot>,
    pub dir: TempDir,
}

impl TestApp {
    /// Start with no model loaded.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        let slot = Arc::new(ModelSlot::empty());
        let state = ServerState::with_slot(config, slot.clone());
        let router = create_app(state.clone());

        Self {
            router,
            state,
            slot,
            dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Upload `csv` to `/retrain` with the given part content type.
    pub async fn retrain(&self, csv: &str, content_type: &str) -> Response<Body> {
        self.send(retrain_request(csv, content_type)).await
    }

    pub async fn predict(&self, payload: serde_json::Value) -> Response<Body> {
        self.send(predict_request(&payload.to_string())).await
    }
}

/// Configuration writing artifacts under `dir` and using a small forest.
pub fn test_config(dir: &TempDir) -> ServiceConfig {
    ServiceConfig {
        model_path: dir.path().join("truvalue_model.pkl"),
        preprocessor_path: dir.path().join("preprocessor.pkl"),
        forest: ForestParams {
            n_estimators: 25,
            ..ForestParams::default()
        },
        ..ServiceConfig::default()
    }
}

pub fn predict_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn retrain_request(csv: &str, content_type: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/retrain")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(multipart_body(
            "file",
            "data.csv",
            content_type,
            csv,
        )))
        .unwrap()
}

/// Build a single-part `multipart/form-data` body.
pub fn multipart_body(field: &str, filename: &str, content_type: &str, content: &str) -> Vec<u8> {
    let content = content.trim_end();
    format!(
        "--{MULTIPART_BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: {content_type}\r\n\
         \r\n\
         {content}\r\n\
         --{MULTIPART_BOUNDARY}--\r\n"
    )
    .into_bytes()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn marina_listing() -> serde_json::Value {
    serde_json::json!({
        "Area_sqft": 1000.0,
        "Bedrooms": 2,
        "Bathrooms": 2,
        "Location": "Dubai Marina",
        "Age_years": 5.0
    })
}
