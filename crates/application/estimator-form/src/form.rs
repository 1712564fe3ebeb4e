//! Form controls and input collection

use estimator_config::CurveDefaults;
use estimator_core::{parse_float, parse_int, BaseInput, CurveRequest, Feature};

/// Every control on the page, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Base(Feature),
    FeatureSelect,
    MinValue,
    MaxValue,
    NumPoints,
    CurveButton,
}

impl Control {
    pub const ORDER: [Control; 13] = [
        Control::Base(Feature::MedInc),
        Control::Base(Feature::HouseAge),
        Control::Base(Feature::AveRooms),
        Control::Base(Feature::AveBedrooms),
        Control::Base(Feature::Population),
        Control::Base(Feature::AveOccup),
        Control::Base(Feature::Latitude),
        Control::Base(Feature::Longitude),
        Control::FeatureSelect,
        Control::MinValue,
        Control::MaxValue,
        Control::NumPoints,
        Control::CurveButton,
    ];

    /// Element identifier
    pub fn id(&self) -> &'static str {
        match self {
            Control::Base(feature) => feature.name(),
            Control::FeatureSelect => "feature_name",
            Control::MinValue => "min_value",
            Control::MaxValue => "max_value",
            Control::NumPoints => "num_points",
            Control::CurveButton => "curve_button",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Control::Base(feature) => feature.label(),
            Control::FeatureSelect => "Variable a estudiar",
            Control::MinValue => "Valor mínimo",
            Control::MaxValue => "Valor máximo",
            Control::NumPoints => "Número de puntos",
            Control::CurveButton => "Calcular curva",
        }
    }

    pub fn is_text(&self) -> bool {
        !matches!(self, Control::FeatureSelect | Control::CurveButton)
    }

    fn position(&self) -> usize {
        Self::ORDER.iter().position(|c| c == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Raw text of every control. Nothing is validated on edit.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    base: [String; 8],
    pub feature: Feature,
    pub min_value: String,
    pub max_value: String,
    pub num_points: String,
}

impl FormState {
    pub fn new(base: &BaseInput, curve: &CurveDefaults) -> Self {
        Self {
            base: Feature::ALL.map(|feature| base.get(feature).to_string()),
            feature: curve.feature,
            min_value: curve.min_value.to_string(),
            max_value: curve.max_value.to_string(),
            num_points: curve.num_points.to_string(),
        }
    }

    pub fn field(&self, feature: Feature) -> &str {
        &self.base[feature.index()]
    }

    pub fn set_field(&mut self, feature: Feature, text: impl Into<String>) {
        self.base[feature.index()] = text.into();
    }

    /// Text of a control, `None` for the selector and the button
    pub fn text(&self, control: Control) -> Option<&str> {
        match control {
            Control::Base(feature) => Some(self.field(feature)),
            Control::MinValue => Some(&self.min_value),
            Control::MaxValue => Some(&self.max_value),
            Control::NumPoints => Some(&self.num_points),
            Control::FeatureSelect | Control::CurveButton => None,
        }
    }

    pub fn text_mut(&mut self, control: Control) -> Option<&mut String> {
        match control {
            Control::Base(feature) => Some(&mut self.base[feature.index()]),
            Control::MinValue => Some(&mut self.min_value),
            Control::MaxValue => Some(&mut self.max_value),
            Control::NumPoints => Some(&mut self.num_points),
            Control::FeatureSelect | Control::CurveButton => None,
        }
    }

    /// Read the eight base fields. Unparseable text becomes NaN.
    pub fn base_input(&self) -> BaseInput {
        BaseInput::from_fn(|feature| parse_float(self.field(feature)))
    }

    /// Base fields plus the sweep controls
    pub fn curve_request(&self) -> CurveRequest {
        CurveRequest {
            feature_name: self.feature.name().to_string(),
            base: self.base_input(),
            min_value: parse_float(&self.min_value),
            max_value: parse_float(&self.max_value),
            num_points: parse_int(&self.num_points),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(&BaseInput::sample(), &CurveDefaults::default())
    }
}
