//! Estimation page model
//!
//! The page the handlers operate on, independent of how it is drawn:
//!
//! - [`FormState`]: text of every input control
//! - [`PageView`]: the result region and the shared error region
//! - [`ChartSlot`]: at most one live chart, destroyed before it is replaced
//!
//! Both handlers are split at their network call (`begin_*` / `complete_*`)
//! so an event loop can keep the page while the request is in flight.
//! Completions are applied in arrival order; nothing sequences them.

pub mod chart;
pub mod form;
pub mod page;
pub mod view;

pub use chart::{build_chart_config, ChartConfig, ChartInstance, ChartSlot, ChartSurface};
pub use form::{Control, FormState};
pub use page::Page;
pub use view::{PageView, Region};

/// Fixed label in front of the formatted price
pub const PRICE_PREFIX: &str = "Precio estimado: ";

/// Title of the chart's value axis
pub const PRICE_AXIS_TITLE: &str = "Precio (miles $)";

/// Name of the single chart series
pub const PRICE_SERIES_LABEL: &str = "Precio estimado (miles $)";
