//! Mount-time configuration for the particle field.

use log::warn;
use serde::Deserialize;

use super::theme::ModeStyle;

/// Base particle count used when none (or zero) is given.
pub const DEFAULT_DENSITY: u32 = 50;

/// Visual preset for the field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldMode {
	/// Fewer, slower, smaller particles in a single warm colour.
	#[default]
	#[serde(alias = "corporate")]
	Plain,
	/// More, faster, larger particles with gradient fill and connecting lines.
	#[serde(alias = "cinematic")]
	Linked,
}

impl FieldMode {
	/// The motion and paint preset for this mode.
	pub fn style(self) -> ModeStyle {
		match self {
			FieldMode::Plain => ModeStyle::plain(),
			FieldMode::Linked => ModeStyle::linked(),
		}
	}
}

/// Field configuration as read from props or the page config element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	pub mode: FieldMode,
	/// Particle count at desktop widths.
	pub density: u32,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			mode: FieldMode::default(),
			density: DEFAULT_DENSITY,
		}
	}
}

impl FieldConfig {
	pub fn new(mode: FieldMode, density: u32) -> Self {
		Self { mode, density }.normalized()
	}

	/// Replaces a zero density with the default.
	pub fn normalized(self) -> Self {
		if self.density == 0 {
			warn!(
				"particle-field: density must be positive, using {}",
				DEFAULT_DENSITY
			);
			return Self {
				density: DEFAULT_DENSITY,
				..self
			};
		}
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn legacy_mode_names_are_accepted() {
		let config: FieldConfig =
			serde_json::from_str(r#"{"mode": "cinematic", "density": 70}"#).unwrap();
		assert_eq!(config.mode, FieldMode::Linked);
		assert_eq!(config.density, 70);

		let config: FieldConfig = serde_json::from_str(r#"{"mode": "corporate"}"#).unwrap();
		assert_eq!(config.mode, FieldMode::Plain);
		assert_eq!(config.density, DEFAULT_DENSITY);
	}

	#[test]
	fn empty_object_yields_defaults() {
		let config: FieldConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config, FieldConfig::default());
	}

	#[test]
	fn unknown_mode_is_rejected() {
		assert!(serde_json::from_str::<FieldConfig>(r#"{"mode": "sparkly"}"#).is_err());
	}

	#[test]
	fn zero_density_falls_back_to_default() {
		let config = FieldConfig::new(FieldMode::Linked, 0);
		assert_eq!(config.density, DEFAULT_DENSITY);
		assert_eq!(config.mode, FieldMode::Linked);
	}
}
