//! Component-owned animation state.
//!
//! A [`FieldAnimation`] exclusively owns the particle set, the pointer cell,
//! the drawing surface and the pending frame handle for as long as the field
//! is mounted. The host calls [`FieldAnimation::frame`] whenever a requested
//! frame fires; everything else is driven by DOM events.

use log::{debug, info, warn};
use rand::Rng;

use super::config::FieldConfig;
use super::environment::HostSignals;
use super::particles::{ParticleSet, Pointer};
use super::render::{self, Surface};
use super::scheduler::{FrameRequest, FrameScheduler};
use super::theme::ModeStyle;

/// Particle field state plus its frame loop.
pub struct FieldAnimation<S: FrameScheduler, D: Surface, R: Rng> {
	config: FieldConfig,
	style: ModeStyle,
	particles: ParticleSet,
	pointer: Pointer,
	scheduler: S,
	surface: Option<D>,
	rng: R,
	pending: Option<FrameRequest>,
	running: bool,
}

impl<S: FrameScheduler, D: Surface, R: Rng> FieldAnimation<S, D, R> {
	/// Creates an idle animation. Nothing is built or scheduled until [`mount`](Self::mount).
	pub fn new(config: FieldConfig, scheduler: S, surface: Option<D>, rng: R) -> Self {
		Self {
			style: config.mode.style(),
			config: config.normalized(),
			particles: ParticleSet::default(),
			pointer: Pointer::OFFSCREEN,
			scheduler,
			surface,
			rng,
			pending: None,
			running: false,
		}
	}

	/// Builds the particle set and starts the frame loop if the host allows motion.
	///
	/// Returns whether the animation is running.
	pub fn mount(&mut self, signals: &HostSignals) -> bool {
		if !signals.motion_allowed() {
			info!(
				"particle-field: motion disabled (reduced motion: {}, touch: {})",
				signals.reduced_motion, signals.touch
			);
			return false;
		}
		self.resize(signals.viewport_width, signals.viewport_height);
		self.start();
		self.running
	}

	/// Replaces the particle set for a new viewport size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.particles =
			ParticleSet::build(&self.style, self.config.density, width, height, &mut self.rng);
		debug!(
			"particle-field: built {} particles for {}x{}",
			self.particles.len(),
			width,
			height
		);
	}

	pub fn start(&mut self) {
		if self.running {
			return;
		}
		self.running = true;
		self.schedule();
	}

	/// Cancels the pending frame; no frame runs again until [`start`](Self::start).
	pub fn stop(&mut self) {
		self.running = false;
		if let Some(request) = self.pending.take() {
			self.scheduler.cancel_frame(request);
		}
	}

	/// Runs one frame: step, draw, then request the next one.
	pub fn frame(&mut self) {
		self.pending = None;
		if !self.running {
			return;
		}
		let Some(surface) = self.surface.as_mut() else {
			self.running = false;
			return;
		};

		self.particles.step(&self.style, self.pointer, &mut self.rng);
		render::render(&self.particles, &self.style, surface);
		self.schedule();
	}

	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		self.pointer = Pointer::new(x, y);
	}

	pub fn pointer_left(&mut self) {
		self.pointer = Pointer::OFFSCREEN;
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn particles(&self) -> &ParticleSet {
		&self.particles
	}

	pub fn pointer(&self) -> Pointer {
		self.pointer
	}

	pub fn scheduler(&self) -> &S {
		&self.scheduler
	}

	pub fn surface(&self) -> Option<&D> {
		self.surface.as_ref()
	}

	fn schedule(&mut self) {
		self.pending = self.scheduler.request_frame();
		if self.pending.is_none() {
			warn!("particle-field: frame request refused, stopping");
			self.running = false;
		}
	}
}

impl<S: FrameScheduler, D: Surface, R: Rng> Drop for FieldAnimation<S, D, R> {
	fn drop(&mut self) {
		self.stop();
	}
}
