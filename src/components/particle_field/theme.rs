//! Colours and per-mode visual presets.
//!
//! Everything that differs between the `plain` and `linked` modes lives in a
//! [`ModeStyle`]: initial motion ranges, pointer repulsion, paint and links.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Warm gold used for plain particles and the outer gradient stop.
pub const GOLD: Color = Color::rgb(255, 213, 65);
/// Blue used for gradient cores and connecting lines.
pub const AZURE: Color = Color::rgb(80, 135, 255);

/// How each particle body is painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticleFill {
	/// Single colour, alpha taken from the particle opacity.
	Flat(Color),
	/// Radial gradient: `core` at the centre, `halo` at half opacity midway,
	/// transparent `halo` at twice the particle radius.
	Glow { core: Color, halo: Color },
}

/// Connecting lines between nearby particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkStyle {
	pub color: Color,
	/// Pairs at or beyond this distance are not linked.
	pub distance: f64,
	/// Line alpha for two coincident particles.
	pub max_opacity: f64,
	pub width: f64,
}

/// Complete motion and paint preset for one field mode.
#[derive(Clone, Debug, PartialEq)]
pub struct ModeStyle {
	/// Full span of the initial per-axis velocity, centred on zero.
	pub initial_speed: f64,
	pub radius_min: f64,
	pub radius_max: f64,
	pub opacity_min: f64,
	pub opacity_max: f64,
	/// Pointer influence radius.
	pub repel_radius: f64,
	/// Velocity added per frame at zero distance from the pointer.
	pub repel_strength: f64,
	pub fill: ParticleFill,
	pub links: Option<LinkStyle>,
}

impl ModeStyle {
	/// Sparse, slow, warm dust.
	pub fn plain() -> Self {
		Self {
			initial_speed: 0.3,
			radius_min: 1.0,
			radius_max: 2.5,
			opacity_min: 0.15,
			opacity_max: 0.4,
			repel_radius: 100.0,
			repel_strength: 0.04,
			fill: ParticleFill::Flat(GOLD),
			links: None,
		}
	}

	/// Denser glowing particles joined into a loose web.
	pub fn linked() -> Self {
		Self {
			initial_speed: 0.8,
			radius_min: 1.5,
			radius_max: 4.0,
			opacity_min: 0.3,
			opacity_max: 0.7,
			repel_radius: 150.0,
			repel_strength: 0.08,
			fill: ParticleFill::Glow {
				core: AZURE,
				halo: GOLD,
			},
			links: Some(LinkStyle {
				color: AZURE,
				distance: 120.0,
				max_opacity: 0.1,
				width: 0.5,
			}),
		}
	}
}

impl Default for ModeStyle {
	fn default() -> Self {
		Self::plain()
	}
}
