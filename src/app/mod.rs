use crate::constants::{DEFAULT_MAX_DURATION, DEFAULT_MIN_DURATION};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::{AtomError, AtomResult};

/// Bounds for the randomized orbit period, in whole seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRange {
    #[serde(default = "default_minimum")]
    pub minimum: u32,
    #[serde(default = "default_maximum")]
    pub maximum: u32,
}

fn default_minimum() -> u32 {
    DEFAULT_MIN_DURATION
}

fn default_maximum() -> u32 {
    DEFAULT_MAX_DURATION
}

impl DurationRange {
    pub const fn new(minimum: u32, maximum: u32) -> Self {
        Self { minimum, maximum }
    }

    pub fn validate(&self) -> AtomResult<()> {
        if self.minimum == 0 {
            return Err(AtomError::InvalidConfiguration(
                "minimum animation duration must be at least 1 second".to_owned(),
            ));
        }
        if self.minimum > self.maximum {
            return Err(AtomError::InvalidConfiguration(format!(
                "minimum animation duration ({}s) exceeds maximum ({}s)",
                self.minimum, self.maximum
            )));
        }
        Ok(())
    }
}

impl Default for DurationRange {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DURATION, DEFAULT_MAX_DURATION)
    }
}

/// Options accepted by a single render call.
///
/// Field names follow the JavaScript option object, so the same JSON works for
/// the browser entry point and the native binary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtomOptions {
    pub container_selector: String,
    /// Kept as a JS number so `-1` or `1.5` reach the element check instead of
    /// failing deserialization.
    pub element_periodic_number: f64,
    #[serde(default)]
    pub animation_duration: DurationRange,
    #[serde(default = "default_animated")]
    pub animated: bool,
    #[serde(default)]
    pub fixed_view_box: bool,
    #[serde(default)]
    pub embed_style: bool,
}

fn default_animated() -> bool {
    true
}

impl AtomOptions {
    pub fn new(container_selector: impl Into<String>, element_periodic_number: u32) -> Self {
        Self {
            container_selector: container_selector.into(),
            element_periodic_number: f64::from(element_periodic_number),
            animation_duration: DurationRange::default(),
            animated: true,
            fixed_view_box: false,
            embed_style: false,
        }
    }

    pub fn from_json(json: &str) -> AtomResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| AtomError::InvalidConfiguration(format!("malformed options: {e}")))
    }

    pub fn validate(&self) -> AtomResult<()> {
        self.animation_duration.validate()
    }

    /// The requested element as a whole, positive number.
    ///
    /// Whether the table actually has that element is up to the lookup; anything
    /// that cannot be an atomic number at all is rejected here.
    pub fn periodic_number(&self) -> AtomResult<u32> {
        let number = self.element_periodic_number;
        if number.fract() == 0.0 && (1.0..=f64::from(u32::MAX)).contains(&number) {
            Ok(number as u32)
        } else {
            Err(AtomError::InvalidElement(number.to_string()))
        }
    }
}
