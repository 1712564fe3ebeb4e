//! Housing Estimator CLI
//!
//! One-shot access to the estimation API: health check, point prediction
//! and feature curves. Requests go through the same page handlers the TUI
//! uses, so output and error messages match what the form would show.

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use estimator_api::ApiClient;
use estimator_config::EstimatorConfig;
use estimator_core::{BaseInput, Feature};
use estimator_form::{ChartConfig, ChartInstance, ChartSurface, FormState, Page};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry};

/// Filter used until the config file has been read
const BOOT_LOG_FILTER: &str = "info";

type FilterHandle = reload::Handle<EnvFilter, Registry>;

#[derive(Parser)]
#[command(name = "estimator")]
#[command(about = "Housing price estimator - point predictions and feature curves")]
#[command(version)]
struct Cli {
    /// Config file [default: <config dir>/housing-estimator/config.yaml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config and ESTIMATOR_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the API and show model metrics
    Health,

    /// Estimate the price for one district
    Predict {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Sweep one feature over a range, holding the rest fixed
    Curve {
        #[command(flatten)]
        fields: FieldArgs,

        /// Feature to sweep [default: from config]
        #[arg(long, value_parser = parse_feature)]
        feature: Option<Feature>,

        /// Start of the range [default: from config]
        #[arg(long, allow_hyphen_values = true)]
        min: Option<String>,

        /// End of the range [default: from config]
        #[arg(long, allow_hyphen_values = true)]
        max: Option<String>,

        /// Number of points [default: from config]
        #[arg(long)]
        points: Option<String>,

        /// How many points to print
        #[arg(long, default_value_t = 5)]
        show: usize,

        /// Print the chart configuration as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config,
}

/// Form fields, taken as text and parsed the way the form parses them
#[derive(Args, Debug, Clone)]
struct FieldArgs {
    /// Median income (tens of thousands of dollars)
    #[arg(long, default_value = "4.0", allow_hyphen_values = true)]
    med_inc: String,

    /// Median house age
    #[arg(long, default_value = "20.0", allow_hyphen_values = true)]
    house_age: String,

    /// Average rooms per dwelling
    #[arg(long, default_value = "5.0", allow_hyphen_values = true)]
    ave_rooms: String,

    /// Average bedrooms per dwelling
    #[arg(long, default_value = "1.0", allow_hyphen_values = true)]
    ave_bedrooms: String,

    /// District population
    #[arg(long, default_value = "1000.0", allow_hyphen_values = true)]
    population: String,

    /// Average occupants per dwelling
    #[arg(long, default_value = "3.0", allow_hyphen_values = true)]
    ave_occup: String,

    /// Latitude (degrees north)
    #[arg(long, default_value = "34.0", allow_hyphen_values = true)]
    latitude: String,

    /// Longitude (degrees east, negative for the west)
    #[arg(long, default_value = "-118.0", allow_hyphen_values = true)]
    longitude: String,
}

impl FieldArgs {
    fn text(&self, feature: Feature) -> &str {
        match feature {
            Feature::MedInc => &self.med_inc,
            Feature::HouseAge => &self.house_age,
            Feature::AveRooms => &self.ave_rooms,
            Feature::AveBedrooms => &self.ave_bedrooms,
            Feature::Population => &self.population,
            Feature::AveOccup => &self.ave_occup,
            Feature::Latitude => &self.latitude,
            Feature::Longitude => &self.longitude,
        }
    }

    fn to_form(&self, config: &EstimatorConfig) -> FormState {
        let mut form = FormState::new(&BaseInput::sample(), &config.curve);
        for feature in Feature::ALL {
            form.set_field(feature, self.text(feature));
        }
        form
    }
}

fn parse_feature(s: &str) -> Result<Feature, String> {
    s.parse::<Feature>().map_err(|e| {
        let names: Vec<&str> = Feature::ALL.iter().map(|f| f.name()).collect();
        format!("{} (expected one of: {})", e, names.join(", "))
    })
}

/// Charts are only kept for printing
struct PrintedChart(ChartConfig);

impl ChartInstance for PrintedChart {
    fn config(&self) -> &ChartConfig {
        &self.0
    }

    fn destroy(self) {}
}

struct PrintSurface;

impl ChartSurface for PrintSurface {
    type Chart = PrintedChart;

    fn create(&mut self, config: ChartConfig) -> PrintedChart {
        PrintedChart(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = init_logging();
    let config = EstimatorConfig::load(cli.config.as_deref(), cli.api_url.clone())?;
    apply_log_filter(log_filter, &config);

    let client = ApiClient::from_config(&config)?;
    tracing::debug!(base_url = %client.base_url(), "Using estimation API");

    match cli.command {
        Commands::Health => cmd_health(&client).await,
        Commands::Predict { fields } => cmd_predict(&client, &config, &fields).await,
        Commands::Curve {
            fields,
            feature,
            min,
            max,
            points,
            show,
            json,
        } => {
            let mut form = fields.to_form(&config);
            if let Some(feature) = feature {
                form.feature = feature;
            }
            if let Some(min) = min {
                form.min_value = min;
            }
            if let Some(max) = max {
                form.max_value = max;
            }
            if let Some(points) = points {
                form.num_points = points;
            }
            cmd_curve(&client, form, show, json).await
        }
        Commands::Config => cmd_config(&config),
    }
}

/// Start logging before the config is read. Without `RUST_LOG` the returned
/// handle swaps in the configured filter once it is known.
fn init_logging() -> Option<FilterHandle> {
    let from_env = EnvFilter::try_from_default_env().ok();
    let pending = from_env.is_none();
    let (filter, handle) =
        reload::Layer::new(from_env.unwrap_or_else(|| EnvFilter::new(BOOT_LOG_FILTER)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    pending.then_some(handle)
}

fn apply_log_filter(handle: Option<FilterHandle>, config: &EstimatorConfig) {
    if let Some(handle) = handle {
        if let Err(e) = handle.reload(EnvFilter::new(&config.log_filter)) {
            tracing::warn!("Failed to apply log filter '{}': {}", config.log_filter, e);
        }
    }
}

async fn cmd_health(client: &ApiClient) -> Result<()> {
    let health = match client.health().await {
        Ok(health) => health,
        Err(e) => bail!("Error al conectar con la API: {}", e),
    };

    println!("Estado: {}", health.status);
    if !health.model_metrics.is_empty() {
        println!("Métricas del modelo:");
        for (name, value) in &health.model_metrics {
            println!("  {:<10} {:.3}", name, value);
        }
    }
    Ok(())
}

async fn cmd_predict(client: &ApiClient, config: &EstimatorConfig, fields: &FieldArgs) -> Result<()> {
    let mut page = Page::new(fields.to_form(config), PrintSurface);

    let input = page.begin_prediction();
    let outcome = client.predict_price(&input).await;
    let details = outcome
        .as_ref()
        .map(|p| p.details.clone())
        .unwrap_or_default();
    page.complete_prediction(outcome);

    if let Some(message) = page.view.error.shown() {
        bail!("{}", message);
    }

    println!("{}", page.view.result.text());
    if !details.is_empty() {
        println!("Detalles:");
        for (name, value) in &details {
            match value.as_str() {
                Some(text) => println!("  {}: {}", name, text),
                None => println!("  {}: {}", name, value),
            }
        }
    }
    Ok(())
}

async fn cmd_curve(client: &ApiClient, form: FormState, show: usize, json: bool) -> Result<()> {
    let mut page = Page::new(form, PrintSurface);
    page.request_curve(client).await;

    if let Some(message) = page.view.error.shown() {
        bail!("{}", message);
    }
    let Some(chart) = page.chart() else {
        bail!("La API no devolvió ninguna curva");
    };

    if json {
        println!("{}", chart.config().to_json()?);
        return Ok(());
    }

    print!("{}", curve_lines(chart.config(), show));
    Ok(())
}

/// `<feature>=<x> -> precio ≈ <k> mil $` for the first `limit` points
fn curve_lines(config: &ChartConfig, limit: usize) -> String {
    let feature = config.x_title();
    config
        .labels()
        .iter()
        .zip(config.series())
        .take(limit)
        .map(|(x, thousands)| format!("{}={} -> precio ≈ {:.1} mil $\n", feature, x, thousands))
        .collect()
}

fn cmd_config(config: &EstimatorConfig) -> Result<()> {
    if let Some(path) = EstimatorConfig::default_path() {
        println!("# default location: {}", path.display());
    }
    print!("{}", config.to_yaml()?);
    Ok(())
}
