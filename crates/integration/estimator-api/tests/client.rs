use estimator_api::{ApiClient, ApiError};
use estimator_core::{BaseInput, CurveRequest, Feature};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_json() -> Value {
    json!({
        "med_inc": 4.0,
        "house_age": 20.0,
        "ave_rooms": 5.0,
        "ave_bedrooms": 1.0,
        "population": 1000.0,
        "ave_occup": 3.0,
        "latitude": 34.0,
        "longitude": -118.0,
    })
}

fn client_for(server: &MockServer) -> ApiClient {
    match ApiClient::new(&server.uri()) {
        Ok(client) => client,
        Err(e) => panic!("failed to build client: {e}"),
    }
}

#[tokio::test]
async fn predict_posts_input_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict_price"))
        .and(body_json(sample_json()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predicted_price": 250000.0,
            "predicted_price_formatted": "$250,000",
            "details": {"y_100k": 2.5},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let prediction = client_for(&server)
        .predict_price(&BaseInput::sample())
        .await
        .unwrap();

    assert_eq!(prediction.predicted_price_formatted, "$250,000");
    assert_eq!(prediction.predicted_price, Some(250000.0));
}

#[tokio::test]
async fn predict_tolerates_null_and_non_numeric_extras() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict_price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predicted_price": null,
            "predicted_price_formatted": "$250,000",
            "details": null,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let prediction = client_for(&server)
        .predict_price(&BaseInput::sample())
        .await
        .unwrap();

    assert_eq!(prediction.predicted_price_formatted, "$250,000");
    assert_eq!(prediction.predicted_price, None);
    assert!(prediction.details.is_empty());
}

#[tokio::test]
async fn predict_forwards_non_numeric_as_null() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict_price"))
        .respond_with(ResponseTemplate::new(422).set_body_string("med_inc must be a number"))
        .expect(1)
        .mount(&server)
        .await;

    let mut input = BaseInput::sample();
    input.set(Feature::MedInc, f64::NAN);
    let err = client_for(&server).predict_price(&input).await.unwrap_err();
    assert_eq!(err.to_string(), "med_inc must be a number");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body["med_inc"].is_null());
    assert_eq!(body["population"], json!(1000.0));
}

#[tokio::test]
async fn status_error_shows_body_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict_price"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad input"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .predict_price(&BaseInput::sample())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "bad input");
}

#[tokio::test]
async fn status_error_with_empty_body_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/feature_curve"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let request = CurveRequest {
        feature_name: "med_inc".to_string(),
        base: BaseInput::sample(),
        min_value: 1.0,
        max_value: 10.0,
        num_points: Some(20),
    };
    let err = client_for(&server).feature_curve(&request).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Error al calcular la curva");
}

#[tokio::test]
async fn malformed_json_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict_price"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .predict_price(&BaseInput::sample())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn missing_formatted_price_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict_price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"predicted_price": 1.0})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .predict_price(&BaseInput::sample())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
    assert!(err.to_string().contains("predicted_price_formatted"));
}

#[tokio::test]
async fn curve_request_body_and_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/feature_curve"))
        .and(body_json(json!({
            "feature_name": "house_age",
            "base": sample_json(),
            "min_value": 5.0,
            "max_value": 50.0,
            "num_points": null,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "feature_name": "house_age",
            "x_values": [5.0, 50.0],
            "prices": [180000.0, 210000.0],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = CurveRequest {
        feature_name: "house_age".to_string(),
        base: BaseInput::sample(),
        min_value: 5.0,
        max_value: 50.0,
        num_points: None,
    };
    let curve = client_for(&server).feature_curve(&request).await.unwrap();
    assert_eq!(curve.feature_name, "house_age");
    assert_eq!(curve.prices, vec![180000.0, 210000.0]);
}

#[tokio::test]
async fn curve_with_uneven_lengths_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/feature_curve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "feature_name": "med_inc",
            "x_values": [1.0, 2.0],
            "prices": [100000.0],
        })))
        .mount(&server)
        .await;

    let request = CurveRequest {
        feature_name: "med_inc".to_string(),
        base: BaseInput::sample(),
        min_value: 1.0,
        max_value: 2.0,
        num_points: Some(2),
    };
    let err = client_for(&server).feature_curve(&request).await.unwrap_err();
    assert!(matches!(err, ApiError::Malformed(_)));
}

#[tokio::test]
async fn health_under_path_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "model_metrics": {"mae_100k": 0.327, "r2": 0.805},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&format!("{}/api", server.uri())).unwrap();
    let health = client.health().await.unwrap();
    assert!(health.is_ok());
    assert_eq!(health.model_metrics.get("r2"), Some(&0.805));
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    // Bind and release a port so nothing is listening on it
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = ApiClient::new(&format!("http://127.0.0.1:{port}")).unwrap();

    let err = client.predict_price(&BaseInput::sample()).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert!(!err.to_string().is_empty());
}
