//! Drawing the particle field.
//!
//! Rendering goes through the small [`Surface`] trait so the frame logic can
//! be exercised without a browser. The canvas implementation lives at the
//! bottom of this file.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particles::ParticleSet;
use super::theme::{Color, ModeStyle, ParticleFill};

/// How a circle is filled.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
	Solid(Color),
	/// Radial gradient centred on the circle, `(offset, color)` stops out to `extent`.
	Radial { stops: [(f64, Color); 3], extent: f64 },
}

/// The drawing operations the particle field needs.
pub trait Surface {
	fn clear(&mut self, width: f64, height: f64);
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, paint: &Paint);
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64);
}

/// Draws one frame: particles first, then links on top.
pub fn render<S: Surface>(set: &ParticleSet, style: &ModeStyle, surface: &mut S) {
	surface.clear(set.width(), set.height());

	for p in set.iter() {
		let paint = match style.fill {
			ParticleFill::Flat(color) => Paint::Solid(color.with_alpha(p.opacity)),
			ParticleFill::Glow { core, halo } => Paint::Radial {
				stops: [
					(0.0, core.with_alpha(p.opacity)),
					(0.5, halo.with_alpha(p.opacity * 0.5)),
					(1.0, halo.with_alpha(0.0)),
				],
				extent: p.radius * 2.0,
			},
		};
		surface.fill_circle(p.x, p.y, p.radius, &paint);
	}

	if let Some(link) = &style.links {
		for l in set.links(link.distance) {
			let color = link.color.with_alpha(link.max_opacity * l.strength);
			surface.stroke_line(l.from, l.to, color, link.width);
		}
	}
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, paint: &Paint) {
		match paint {
			Paint::Solid(color) => self.set_fill_style_str(&color.to_css()),
			Paint::Radial { stops, extent } => {
				let Ok(gradient) = self.create_radial_gradient(x, y, 0.0, x, y, *extent) else {
					return;
				};
				for (offset, color) in stops {
					let _ = gradient.add_color_stop(*offset as f32, &color.to_css());
				}
				#[allow(deprecated)]
				self.set_fill_style(&gradient);
			}
		}

		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.stroke();
	}
}

/// Records draw calls for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
	pub clears: usize,
	pub circles: Vec<(f64, f64, f64, Paint)>,
	pub lines: Vec<((f64, f64), (f64, f64), Color, f64)>,
}

#[cfg(test)]
impl Surface for RecordingSurface {
	fn clear(&mut self, _width: f64, _height: f64) {
		self.clears += 1;
		self.circles.clear();
		self.lines.clear();
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, paint: &Paint) {
		self.circles.push((x, y, radius, paint.clone()));
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
		self.lines.push((from, to, color, width));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::particles::Particle;
	use crate::components::particle_field::theme::{AZURE, GOLD};

	fn still(x: f64, y: f64) -> Particle {
		Particle {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			radius: 2.0,
			opacity: 0.6,
			base_opacity: 0.6,
		}
	}

	#[test]
	fn plain_mode_uses_flat_fill_without_links() {
		let set =
			ParticleSet::from_particles(vec![still(10.0, 10.0), still(10.0, 10.0)], 100.0, 100.0);
		let mut surface = RecordingSurface::default();
		render(&set, &ModeStyle::plain(), &mut surface);

		assert_eq!(surface.clears, 1);
		assert_eq!(surface.circles.len(), 2);
		assert_eq!(surface.circles[0].3, Paint::Solid(GOLD.with_alpha(0.6)));
		assert!(surface.lines.is_empty());
	}

	#[test]
	fn linked_mode_glows_and_links_coincident_particles_at_full_strength() {
		let set =
			ParticleSet::from_particles(vec![still(50.0, 50.0), still(50.0, 50.0)], 100.0, 100.0);
		let mut surface = RecordingSurface::default();
		render(&set, &ModeStyle::linked(), &mut surface);

		let Paint::Radial { stops, extent } = &surface.circles[0].3 else {
			panic!("expected gradient paint");
		};
		assert_eq!(*extent, 4.0);
		assert_eq!(stops[0], (0.0, AZURE.with_alpha(0.6)));
		assert_eq!(stops[1], (0.5, GOLD.with_alpha(0.3)));
		assert_eq!(stops[2].1.a, 0.0);

		assert_eq!(surface.lines.len(), 1);
		let (_, _, color, width) = surface.lines[0];
		assert!((color.a - 0.1).abs() < 1e-12);
		assert_eq!(width, 0.5);
	}

	#[test]
	fn no_link_at_or_past_threshold() {
		let set = ParticleSet::from_particles(
			vec![still(0.0, 50.0), still(120.0, 50.0), still(300.0, 50.0)],
			400.0,
			100.0,
		);
		let mut surface = RecordingSurface::default();
		render(&set, &ModeStyle::linked(), &mut surface);
		assert!(surface.lines.is_empty());
	}

	#[test]
	fn link_alpha_fades_with_distance() {
		let set =
			ParticleSet::from_particles(vec![still(0.0, 50.0), still(90.0, 50.0)], 400.0, 100.0);
		let mut surface = RecordingSurface::default();
		render(&set, &ModeStyle::linked(), &mut surface);
		let (_, _, color, _) = surface.lines[0];
		assert!((color.a - 0.025).abs() < 1e-12);
	}
}
