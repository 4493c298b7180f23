//! Layout configuration.
//!
//! A UI description names a layout type plus its options. The loader that
//! reads those descriptions lives outside this crate; it hands over either
//! a [`LayoutType`] or a [`LayoutConfig`], typically deserialized from
//! JSON:
//!
//! ```json
//! { "type": "scroll", "arrangement": "vertical", "overscroll": { "mode": "elastic", "limit": 48 } }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::layout::{LayoutType, ScrollArrangement, ScrollDirection};

/// Complete description of a layout and its options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutConfig {
    Flow(FlowConfig),
    Vertical(VerticalConfig),
    Absolute,
    Scroll(ScrollConfig),
}

impl LayoutConfig {
    /// Parse and validate a JSON layout description.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Default options for a layout type.
    pub fn for_type(layout_type: LayoutType) -> Self {
        match layout_type {
            LayoutType::Flow => LayoutConfig::Flow(FlowConfig::default()),
            LayoutType::Vertical => LayoutConfig::Vertical(VerticalConfig::default()),
            LayoutType::Absolute => LayoutConfig::Absolute,
            LayoutType::Scroll => LayoutConfig::Scroll(ScrollConfig::default()),
        }
    }

    pub fn layout_type(&self) -> LayoutType {
        match self {
            LayoutConfig::Flow(_) => LayoutType::Flow,
            LayoutConfig::Vertical(_) => LayoutType::Vertical,
            LayoutConfig::Absolute => LayoutType::Absolute,
            LayoutConfig::Scroll(_) => LayoutType::Scroll,
        }
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        match self {
            LayoutConfig::Flow(flow) => {
                non_negative("spacing", flow.spacing)?;
                non_negative("line_spacing", flow.line_spacing)
            }
            LayoutConfig::Vertical(vertical) => non_negative("spacing", vertical.spacing),
            LayoutConfig::Absolute => Ok(()),
            LayoutConfig::Scroll(scroll) => scroll.validate(),
        }
    }
}

/// Options for the flow layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Horizontal gap between items.
    pub spacing: f32,
    /// Vertical gap between rows.
    pub line_spacing: f32,
}

/// Options for the vertical layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerticalConfig {
    pub spacing: f32,
    /// Walk children last to first.
    pub bottom_to_top: bool,
}

/// What happens when a drag pushes past the scroll range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Overscroll {
    /// Stop hard at the range.
    #[default]
    Clamp,
    /// Allow up to `limit` pixels past the range, springing back on release.
    Elastic { limit: f32 },
}

/// Options for the scroll layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub arrangement: ScrollArrangement,
    pub direction: ScrollDirection,
    /// Gap between children for the vertical and horizontal arrangements.
    pub spacing: f32,
    pub overscroll: Overscroll,
    /// Keep moving after release.
    pub inertia: bool,
    /// Per-frame velocity multiplier, in `[0, 1)`.
    pub friction: f32,
    /// Inertia stops below this speed (pixels per frame).
    pub min_velocity: f32,
    /// Fraction of the overscroll recovered per frame, in `(0, 1]`.
    pub spring: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            arrangement: ScrollArrangement::None,
            direction: ScrollDirection::Both,
            spacing: 0.0,
            overscroll: Overscroll::Clamp,
            inertia: true,
            friction: 0.95,
            min_velocity: 0.5,
            spring: 0.25,
        }
    }
}

impl ScrollConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        non_negative("spacing", self.spacing)?;
        non_negative("min_velocity", self.min_velocity)?;
        if let Overscroll::Elastic { limit } = self.overscroll {
            non_negative("overscroll limit", limit)?;
        }
        if !(0.0..1.0).contains(&self.friction) {
            return Err(LayoutError::InvalidConfig(format!(
                "friction must be in [0, 1), got {}",
                self.friction
            )));
        }
        if !(self.spring > 0.0 && self.spring <= 1.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "spring must be in (0, 1], got {}",
                self.spring
            )));
        }
        Ok(())
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), LayoutError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidConfig(format!(
            "{name} must be a non-negative number, got {value}"
        )))
    }
}
