use estimator_api::ApiClient;
use estimator_core::Feature;
use estimator_form::{ChartConfig, ChartInstance, ChartSurface, FormState, Page};
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Tracks how many charts are alive and the order of create/destroy calls
#[derive(Default)]
struct Ledger {
    live: Cell<usize>,
    max_live: Cell<usize>,
    events: RefCell<Vec<String>>,
}

struct CanvasChart {
    id: usize,
    config: ChartConfig,
    ledger: Rc<Ledger>,
}

impl ChartInstance for CanvasChart {
    fn config(&self) -> &ChartConfig {
        &self.config
    }

    fn destroy(self) {
        self.ledger.live.set(self.ledger.live.get() - 1);
        self.ledger.events.borrow_mut().push(format!("destroy {}", self.id));
    }
}

#[derive(Default)]
struct Canvas {
    created: usize,
    ledger: Rc<Ledger>,
}

impl ChartSurface for Canvas {
    type Chart = CanvasChart;

    fn create(&mut self, config: ChartConfig) -> CanvasChart {
        self.created += 1;
        let live = self.ledger.live.get() + 1;
        self.ledger.live.set(live);
        self.ledger.max_live.set(self.ledger.max_live.get().max(live));
        self.ledger.events.borrow_mut().push(format!("create {}", self.created));
        CanvasChart {
            id: self.created,
            config,
            ledger: self.ledger.clone(),
        }
    }
}

fn client_for(server: &MockServer) -> ApiClient {
    match ApiClient::new(&server.uri()) {
        Ok(client) => client,
        Err(e) => panic!("failed to build client: {e}"),
    }
}

async fn posted_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

#[tokio::test]
async fn submit_shows_formatted_price() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict_price"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"predicted_price_formatted": "$250,000"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut page = Page::new(FormState::default(), Canvas::default());
    page.submit_prediction(&client_for(&server)).await;

    assert_eq!(page.view.result.shown(), Some("Precio estimado: $250,000"));
    assert!(!page.view.error.is_visible());

    let bodies = posted_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["med_inc"], json!(4.0));
    assert_eq!(bodies[0]["longitude"], json!(-118.0));
}

#[tokio::test]
async fn submit_shows_backend_error_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict_price"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad input"))
        .mount(&server)
        .await;

    let mut page = Page::new(FormState::default(), Canvas::default());
    page.submit_prediction(&client_for(&server)).await;

    assert_eq!(page.view.error.shown(), Some("bad input"));
    assert!(!page.view.result.is_visible());
}

#[tokio::test]
async fn submit_shows_price_when_details_are_null() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict_price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predicted_price_formatted": "$250,000",
            "details": {"model": "ridge", "version": null},
        })))
        .mount(&server)
        .await;

    let mut page = Page::new(FormState::default(), Canvas::default());
    page.submit_prediction(&client_for(&server)).await;
    assert_eq!(page.view.result.shown(), Some("Precio estimado: $250,000"));

    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/predict_price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predicted_price_formatted": "$180,000",
            "details": null,
        })))
        .mount(&server)
        .await;

    page.submit_prediction(&client_for(&server)).await;
    assert_eq!(page.view.result.shown(), Some("Precio estimado: $180,000"));
    assert!(!page.view.error.is_visible());
}

#[tokio::test]
async fn submit_with_empty_error_body_shows_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict_price"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut page = Page::new(FormState::default(), Canvas::default());
    page.submit_prediction(&client_for(&server)).await;

    assert_eq!(page.view.error.shown(), Some("Error al calcular la predicción"));
    assert!(!page.view.result.is_visible());
}

#[tokio::test]
async fn empty_field_is_sent_as_null() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict_price"))
        .respond_with(ResponseTemplate::new(422).set_body_string("Input should be a valid number"))
        .expect(1)
        .mount(&server)
        .await;

    let mut page = Page::new(FormState::default(), Canvas::default());
    page.form.set_field(Feature::MedInc, "");
    page.submit_prediction(&client_for(&server)).await;

    let bodies = posted_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert!(bodies[0]["med_inc"].is_null());
    assert_eq!(page.view.error.shown(), Some("Input should be a valid number"));
}

#[tokio::test]
async fn unreachable_backend_shows_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = ApiClient::new(&format!("http://127.0.0.1:{port}")).unwrap();

    let mut page = Page::new(FormState::default(), Canvas::default());
    page.submit_prediction(&client).await;

    assert!(page.view.error.is_visible());
    assert!(!page.view.error.text().is_empty());
    assert!(!page.view.result.is_visible());

    // The page stays usable: a curve attempt reports its own failure
    page.request_curve(&client).await;
    assert!(page.view.error.is_visible());
    assert!(page.chart().is_none());
}

#[tokio::test]
async fn repeated_curves_release_previous_chart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/feature_curve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "feature_name": "med_inc",
            "x_values": [1, 2],
            "prices": [100000, 200000],
        })))
        .expect(2)
        .mount(&server)
        .await;

    let canvas = Canvas::default();
    let ledger = canvas.ledger.clone();
    let mut page = Page::new(FormState::default(), canvas);
    let client = client_for(&server);

    page.request_curve(&client).await;
    page.request_curve(&client).await;

    assert_eq!(
        *ledger.events.borrow(),
        vec!["create 1", "destroy 1", "create 2"]
    );
    assert_eq!(ledger.max_live.get(), 1);
    assert_eq!(ledger.live.get(), 1);

    let chart = page.chart().unwrap();
    assert_eq!(chart.config().labels(), ["1.00", "2.00"]);
    assert_eq!(chart.config().series(), [100.0, 200.0]);

    let bodies = posted_bodies(&server).await;
    assert_eq!(bodies[0]["feature_name"], json!("med_inc"));
    assert_eq!(bodies[0]["num_points"], json!(20));
    assert_eq!(bodies[0]["base"]["population"], json!(1000.0));

    drop(page);
    assert_eq!(ledger.live.get(), 0);
}
