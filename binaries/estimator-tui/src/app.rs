//! Application state and key handling for the estimator TUI

use crate::chart::TerminalSurface;
use crate::theme::ThemePalette;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use estimator_api::{ApiClient, ApiError};
use estimator_core::{CurveResponse, HealthStatus, Prediction};
use estimator_form::{Control, FormState, Page};
use std::future::Future;
use tokio::sync::mpsc;

/// A finished request, applied on the next tick in arrival order
#[derive(Debug)]
pub enum Outcome {
    Prediction(Result<Prediction, ApiError>),
    Curve(Result<CurveResponse, ApiError>),
    Health(Result<HealthStatus, ApiError>),
}

#[derive(Debug, Clone, Default)]
pub enum HealthState {
    #[default]
    Unknown,
    Checking,
    Up(HealthStatus),
    Down(String),
}

pub struct App {
    pub page: Page<TerminalSurface>,
    pub focus: Control,
    pub health: HealthState,
    pub palette: ThemePalette,
    /// Requests sent whose outcome has not been applied yet
    pub in_flight: usize,
    client: ApiClient,
    tx: mpsc::UnboundedSender<Outcome>,
    rx: mpsc::UnboundedReceiver<Outcome>,
}

impl App {
    pub fn new(client: ApiClient, form: FormState) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            page: Page::new(form, TerminalSurface::default()),
            focus: Control::ORDER[0],
            health: HealthState::default(),
            palette: ThemePalette::default(),
            in_flight: 0,
            client,
            tx,
            rx,
        }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url().as_str()
    }

    fn spawn<F>(&mut self, request: F)
    where
        F: Future<Output = Outcome> + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            // Receiver is gone only when the app is shutting down
            let _ = tx.send(request.await);
        });
    }

    pub fn check_health(&mut self) {
        self.health = HealthState::Checking;
        let client = self.client.clone();
        self.spawn(async move { Outcome::Health(client.health().await) });
    }

    pub fn submit_prediction(&mut self) {
        let input = self.page.begin_prediction();
        let client = self.client.clone();
        self.spawn(async move { Outcome::Prediction(client.predict_price(&input).await) });
    }

    pub fn request_curve(&mut self) {
        let request = self.page.begin_curve();
        let client = self.client.clone();
        self.spawn(async move { Outcome::Curve(client.feature_curve(&request).await) });
    }

    /// Apply every outcome that has arrived since the last tick
    pub fn on_tick(&mut self) {
        while let Ok(outcome) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            match outcome {
                Outcome::Prediction(result) => self.page.complete_prediction(result),
                Outcome::Curve(result) => self.page.complete_curve(result),
                Outcome::Health(Ok(status)) => {
                    tracing::info!(status = %status.status, "API health");
                    self.health = HealthState::Up(status);
                }
                Outcome::Health(Err(e)) => {
                    tracing::warn!("Health check failed: {}", e);
                    self.health = HealthState::Down(e.to_string());
                }
            }
        }
    }

    /// Handle keyboard input, returns true if should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char('c') if ctrl => return true,

            KeyCode::F(5) => self.request_curve(),
            KeyCode::F(2) => self.check_health(),

            KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::Up | KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Tab => {
                self.focus = if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.focus.prev()
                } else {
                    self.focus.next()
                };
            }

            KeyCode::Left if self.focus == Control::FeatureSelect => {
                self.page.form.feature = self.page.form.feature.prev();
            }
            KeyCode::Right if self.focus == Control::FeatureSelect => {
                self.page.form.feature = self.page.form.feature.next();
            }

            KeyCode::Enter => {
                if self.focus == Control::CurveButton {
                    self.request_curve();
                } else {
                    self.submit_prediction();
                }
            }

            KeyCode::Backspace => {
                if let Some(text) = self.page.form.text_mut(self.focus) {
                    text.pop();
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(text) = self.page.form.text_mut(self.focus) {
                    text.push(c);
                }
            }

            _ => {}
        }

        false
    }
}
