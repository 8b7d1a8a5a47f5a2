//! Ambient particle simulation.
//!
//! Particles drift independently: each frame applies pointer repulsion,
//! velocity damping and a little random jitter, then wraps positions around
//! the viewport edges. There are no inter-particle forces.

use rand::Rng;

use super::theme::ModeStyle;

/// Velocity multiplier applied every frame.
pub const DAMPING: f64 = 0.98;
/// Half-width of the uniform per-axis velocity noise added every frame.
pub const JITTER: f64 = 0.01;
/// Fraction of the gap to base opacity closed per frame outside pointer range.
pub const OPACITY_RELAX: f64 = 0.05;
/// Opacity added on top of the base while under pointer influence.
pub const HIGHLIGHT_BOOST: f64 = 0.3;
/// Upper bound on highlighted opacity.
pub const HIGHLIGHT_CAP: f64 = 0.9;
/// Viewports narrower than this count as mobile.
pub const MOBILE_BREAKPOINT: f64 = 768.0;
/// Density multiplier on mobile widths.
pub const MOBILE_DENSITY_FACTOR: f64 = 0.3;

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	pub opacity: f64,
	pub base_opacity: f64,
}

impl Particle {
	pub fn speed(&self) -> f64 {
		(self.vx * self.vx + self.vy * self.vy).sqrt()
	}

	fn repel_from(&mut self, pointer: Pointer, style: &ModeStyle) -> bool {
		let (dx, dy) = (self.x - pointer.x, self.y - pointer.y);
		let distance = (dx * dx + dy * dy).sqrt();
		if distance >= style.repel_radius {
			return false;
		}

		// Sitting exactly on a particle gives no direction; push it along its own heading.
		let (ux, uy) = if distance > f64::EPSILON {
			(dx / distance, dy / distance)
		} else {
			let speed = self.speed();
			if speed > f64::EPSILON {
				(self.vx / speed, self.vy / speed)
			} else {
				(1.0, 0.0)
			}
		};

		let force = (style.repel_radius - distance) / style.repel_radius;
		self.vx += ux * force * style.repel_strength;
		self.vy += uy * force * style.repel_strength;
		true
	}
}

/// Pointer position in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
	pub x: f64,
	pub y: f64,
}

impl Pointer {
	/// Far enough off-screen that no particle is ever within repulsion range.
	pub const OFFSCREEN: Pointer = Pointer {
		x: -1000.0,
		y: -1000.0,
	};

	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

impl Default for Pointer {
	fn default() -> Self {
		Self::OFFSCREEN
	}
}

/// A connecting line between two nearby particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	pub from: (f64, f64),
	pub to: (f64, f64),
	/// 1.0 for coincident particles, falling linearly to 0.0 at the threshold.
	pub strength: f64,
}

/// Linear falloff of link visibility with distance; zero at and past `threshold`.
pub fn link_strength(distance: f64, threshold: f64) -> f64 {
	if distance >= threshold {
		0.0
	} else {
		1.0 - distance / threshold
	}
}

/// Number of particles for a viewport width.
pub fn particle_count(density: u32, width: f64) -> usize {
	if width < MOBILE_BREAKPOINT {
		(density as f64 * MOBILE_DENSITY_FACTOR).floor() as usize
	} else {
		density as usize
	}
}

/// Wraps `value` into `[0, extent)`.
fn wrap(value: f64, extent: f64) -> f64 {
	let wrapped = value.rem_euclid(extent);
	// rem_euclid rounds tiny negatives up to `extent`
	if wrapped >= extent { 0.0 } else { wrapped }
}

/// The whole particle population for one viewport size.
#[derive(Clone, Debug, Default)]
pub struct ParticleSet {
	particles: Vec<Particle>,
	width: f64,
	height: f64,
}

impl ParticleSet {
	/// Scatters `particle_count(density, width)` particles across the viewport.
	pub fn build<R: Rng>(
		style: &ModeStyle,
		density: u32,
		width: f64,
		height: f64,
		rng: &mut R,
	) -> Self {
		if width <= 0.0 || height <= 0.0 {
			return Self {
				particles: Vec::new(),
				width: width.max(0.0),
				height: height.max(0.0),
			};
		}

		let count = particle_count(density, width);
		let half_speed = style.initial_speed / 2.0;
		let particles = (0..count)
			.map(|_| {
				let base_opacity = rng.gen_range(style.opacity_min..style.opacity_max);
				Particle {
					x: rng.gen_range(0.0..width),
					y: rng.gen_range(0.0..height),
					vx: rng.gen_range(-half_speed..half_speed),
					vy: rng.gen_range(-half_speed..half_speed),
					radius: rng.gen_range(style.radius_min..style.radius_max),
					opacity: base_opacity,
					base_opacity,
				}
			})
			.collect();

		Self {
			particles,
			width,
			height,
		}
	}

	/// Wraps existing particles, e.g. for tests that need exact placement.
	pub fn from_particles(particles: Vec<Particle>, width: f64, height: f64) -> Self {
		Self {
			particles,
			width,
			height,
		}
	}

	/// Advance every particle by one frame.
	pub fn step<R: Rng>(&mut self, style: &ModeStyle, pointer: Pointer, rng: &mut R) {
		let (width, height) = (self.width, self.height);
		for p in &mut self.particles {
			if p.repel_from(pointer, style) {
				p.opacity = (p.base_opacity + HIGHLIGHT_BOOST).min(HIGHLIGHT_CAP);
			} else {
				p.opacity += (p.base_opacity - p.opacity) * OPACITY_RELAX;
			}

			p.vx *= DAMPING;
			p.vy *= DAMPING;
			p.vx += rng.gen_range(-JITTER..JITTER);
			p.vy += rng.gen_range(-JITTER..JITTER);

			p.x = wrap(p.x + p.vx, width);
			p.y = wrap(p.y + p.vy, height);
		}
	}

	/// Every unordered pair closer than `threshold`.
	pub fn links(&self, threshold: f64) -> impl Iterator<Item = Link> + '_ {
		self.particles.iter().enumerate().flat_map(move |(i, a)| {
			self.particles[i + 1..].iter().filter_map(move |b| {
				let (dx, dy) = (a.x - b.x, a.y - b.y);
				let strength = link_strength((dx * dx + dy * dy).sqrt(), threshold);
				(strength > 0.0).then_some(Link {
					from: (a.x, a.y),
					to: (b.x, b.y),
					strength,
				})
			})
		})
	}

	pub fn iter(&self) -> impl Iterator<Item = &Particle> {
		self.particles.iter()
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn particle_at(x: f64, y: f64) -> Particle {
		Particle {
			x,
			y,
			vx: 0.1,
			vy: -0.05,
			radius: 2.0,
			opacity: 0.2,
			base_opacity: 0.2,
		}
	}

	#[test]
	fn count_is_reduced_on_narrow_viewports() {
		assert_eq!(particle_count(50, 1024.0), 50);
		assert_eq!(particle_count(50, 768.0), 50);
		assert_eq!(particle_count(50, 400.0), 15);
		assert_eq!(particle_count(7, 320.0), 2);
	}

	#[test]
	fn build_respects_style_ranges() {
		let style = ModeStyle::linked();
		let mut rng = SmallRng::seed_from_u64(3);
		let set = ParticleSet::build(&style, 40, 1280.0, 720.0, &mut rng);
		assert_eq!(set.len(), 40);
		for p in set.iter() {
			assert!((0.0..1280.0).contains(&p.x));
			assert!((0.0..720.0).contains(&p.y));
			assert!((style.radius_min..style.radius_max).contains(&p.radius));
			assert!((style.opacity_min..style.opacity_max).contains(&p.base_opacity));
			assert!(p.vx.abs() <= style.initial_speed / 2.0);
			assert_eq!(p.opacity, p.base_opacity);
		}
	}

	#[test]
	fn zero_area_viewport_has_no_particles() {
		let mut rng = SmallRng::seed_from_u64(1);
		let set = ParticleSet::build(&ModeStyle::plain(), 50, 0.0, 600.0, &mut rng);
		assert!(set.is_empty());
	}

	#[test]
	fn positions_stay_inside_viewport() {
		let style = ModeStyle::linked();
		let mut rng = SmallRng::seed_from_u64(42);
		let mut set = ParticleSet::build(&style, 80, 900.0, 500.0, &mut rng);
		for frame in 0..2_000 {
			let pointer = Pointer::new((frame * 7 % 900) as f64, (frame * 3 % 500) as f64);
			set.step(&style, pointer, &mut rng);
			for p in set.iter() {
				assert!(p.x >= 0.0 && p.x < 900.0, "x out of range: {}", p.x);
				assert!(p.y >= 0.0 && p.y < 500.0, "y out of range: {}", p.y);
			}
		}
	}

	#[test]
	fn edges_wrap_to_the_opposite_side() {
		assert_eq!(wrap(-0.5, 100.0), 99.5);
		assert_eq!(wrap(100.0, 100.0), 0.0);
		assert_eq!(wrap(100.25, 100.0), 0.25);
		assert_eq!(wrap(-1e-20, 100.0), 0.0);
	}

	#[test]
	fn pointer_on_particle_speeds_it_up() {
		for style in [ModeStyle::plain(), ModeStyle::linked()] {
			let start = particle_at(300.0, 200.0);
			let mut pushed = ParticleSet::from_particles(vec![start.clone()], 800.0, 600.0);
			let mut baseline = ParticleSet::from_particles(vec![start.clone()], 800.0, 600.0);

			let pointer = Pointer::new(start.x, start.y);
			pushed.step(&style, pointer, &mut SmallRng::seed_from_u64(9));
			baseline.step(&style, Pointer::OFFSCREEN, &mut SmallRng::seed_from_u64(9));

			let pushed = pushed.iter().next().unwrap();
			let baseline = baseline.iter().next().unwrap();
			assert!(pushed.speed() > baseline.speed());
		}
	}

	#[test]
	fn pointer_at_rest_particle_still_repels() {
		let style = ModeStyle::plain();
		let mut resting = particle_at(50.0, 50.0);
		resting.vx = 0.0;
		resting.vy = 0.0;
		assert!(resting.repel_from(Pointer::new(50.0, 50.0), &style));
		assert_eq!(resting.vx, style.repel_strength);
		assert_eq!(resting.vy, 0.0);
	}

	#[test]
	fn repulsion_points_away_from_pointer() {
		let style = ModeStyle::plain();
		let mut p = particle_at(110.0, 100.0);
		p.vx = 0.0;
		p.vy = 0.0;
		assert!(p.repel_from(Pointer::new(100.0, 100.0), &style));
		assert!(p.vx > 0.0);
		assert!((p.vx - 0.9 * style.repel_strength).abs() < 1e-12);
	}

	#[test]
	fn opacity_rises_near_pointer_and_relaxes_after() {
		let style = ModeStyle::plain();
		let mut rng = SmallRng::seed_from_u64(5);
		let mut set = ParticleSet::from_particles(vec![particle_at(400.0, 300.0)], 800.0, 600.0);

		set.step(&style, Pointer::new(405.0, 300.0), &mut rng);
		let lit = set.iter().next().unwrap().opacity;
		assert!((lit - 0.5).abs() < 1e-12);

		set.step(&style, Pointer::OFFSCREEN, &mut rng);
		let relaxed = set.iter().next().unwrap().opacity;
		assert!((relaxed - (0.5 + (0.2 - 0.5) * OPACITY_RELAX)).abs() < 1e-12);
	}

	#[test]
	fn highlighted_opacity_is_capped() {
		let style = ModeStyle::linked();
		let mut bright = particle_at(10.0, 10.0);
		bright.base_opacity = 0.7;
		let mut set = ParticleSet::from_particles(vec![bright], 800.0, 600.0);
		set.step(&style, Pointer::new(12.0, 10.0), &mut SmallRng::seed_from_u64(2));
		assert_eq!(set.iter().next().unwrap().opacity, HIGHLIGHT_CAP);
	}

	#[test]
	fn link_strength_falls_off_linearly() {
		assert_eq!(link_strength(0.0, 120.0), 1.0);
		assert_eq!(link_strength(60.0, 120.0), 0.5);
		assert_eq!(link_strength(120.0, 120.0), 0.0);
		assert_eq!(link_strength(500.0, 120.0), 0.0);
	}

	#[test]
	fn links_cover_each_close_pair_once() {
		let set = ParticleSet::from_particles(
			vec![
				particle_at(100.0, 100.0),
				particle_at(100.0, 100.0),
				particle_at(220.0, 100.0),
				particle_at(700.0, 500.0),
			],
			800.0,
			600.0,
		);
		let links: Vec<Link> = set.links(120.0).collect();
		// Coincident pair only; 220 is exactly on the threshold from both.
		assert_eq!(links.len(), 1);
		assert_eq!(links[0].strength, 1.0);
	}
}
