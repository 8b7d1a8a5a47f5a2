//! Leptos component wrapping the particle field canvas.
//!
//! The component renders a fixed, full-viewport canvas behind the page and
//! owns one [`FieldSession`] while motion is allowed. A session bundles the
//! animation state with its window listeners; dropping it removes the
//! listeners and cancels the pending animation frame together.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::animation::FieldAnimation;
use super::config::{DEFAULT_DENSITY, FieldConfig, FieldMode};
use super::environment::{EventListener, HostSignals, REDUCED_MOTION_QUERY, viewport_size};
use super::scheduler::AnimationFrames;

type CanvasAnimation = FieldAnimation<AnimationFrames, CanvasRenderingContext2d, SmallRng>;

/// A running field bound to one canvas element.
struct FieldSession {
	canvas: HtmlCanvasElement,
	animation: Rc<RefCell<CanvasAnimation>>,
	listeners: Vec<EventListener>,
}

impl FieldSession {
	fn start(canvas: HtmlCanvasElement, config: FieldConfig) -> Option<Self> {
		let window = web_sys::window()?;
		let signals = HostSignals::read(&window)?;
		canvas.set_width(signals.viewport_width as u32);
		canvas.set_height(signals.viewport_height as u32);

		let ctx = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
		if ctx.is_none() {
			warn!("particle-field: 2d context unavailable, nothing will be drawn");
		}

		let rng = SmallRng::seed_from_u64((js_sys::Math::random() * u64::MAX as f64) as u64);
		let animation = Rc::new(RefCell::new(FieldAnimation::new(
			config,
			AnimationFrames::new(),
			ctx,
			rng,
		)));

		let animation_frame = Rc::downgrade(&animation);
		animation.borrow().scheduler().bind(move || {
			if let Some(animation) = animation_frame.upgrade() {
				if let Ok(mut animation) = animation.try_borrow_mut() {
					animation.frame();
				}
			}
		});

		if !animation.borrow_mut().mount(&signals) {
			return None;
		}
		info!(
			"particle-field: animating {} particles ({:?})",
			animation.borrow().particles().len(),
			config.mode
		);

		let listeners = Self::listen(&window, &canvas, &animation);
		Some(Self {
			canvas,
			animation,
			listeners,
		})
	}

	fn listen(
		window: &Window,
		canvas: &HtmlCanvasElement,
		animation: &Rc<RefCell<CanvasAnimation>>,
	) -> Vec<EventListener> {
		let mut listeners = Vec::with_capacity(3);

		let (animation_resize, canvas_resize) = (animation.clone(), canvas.clone());
		listeners.extend(EventListener::new(window, "resize", move |_| {
			let Some((w, h)) = web_sys::window().as_ref().and_then(viewport_size) else {
				return;
			};
			canvas_resize.set_width(w as u32);
			canvas_resize.set_height(h as u32);
			if let Ok(mut animation) = animation_resize.try_borrow_mut() {
				animation.resize(w, h);
			}
		}));

		let animation_move = animation.clone();
		listeners.extend(EventListener::new(window, "mousemove", move |ev| {
			let Some(ev) = ev.dyn_ref::<MouseEvent>() else {
				return;
			};
			if let Ok(mut animation) = animation_move.try_borrow_mut() {
				animation.pointer_moved(ev.client_x() as f64, ev.client_y() as f64);
			}
		}));

		if let Some(document) = window.document() {
			let animation_leave = animation.clone();
			listeners.extend(EventListener::new(&document, "mouseleave", move |_| {
				if let Ok(mut animation) = animation_leave.try_borrow_mut() {
					animation.pointer_left();
				}
			}));
		}

		listeners
	}
}

impl Drop for FieldSession {
	fn drop(&mut self) {
		self.listeners.clear();
		if let Ok(mut animation) = self.animation.try_borrow_mut() {
			animation.stop();
		}
	}
}

fn motion_allowed_now() -> bool {
	web_sys::window()
		.as_ref()
		.and_then(HostSignals::read)
		.is_some_and(|signals| signals.motion_allowed())
}

/// Re-evaluates the motion gate whenever the reduced-motion preference changes.
fn watch_motion_preference(enabled: RwSignal<bool>) -> Option<EventListener> {
	let window = web_sys::window()?;
	let query = window.match_media(REDUCED_MOTION_QUERY).ok().flatten()?;
	EventListener::new(&query, "change", move |_| {
		enabled.set(motion_allowed_now());
	})
}

/// Ambient animated particle background.
///
/// Renders nothing when the visitor prefers reduced motion or browses on a
/// narrow touch device. The reduced-motion preference is watched, so toggling
/// it stops or restarts a mounted field.
#[component]
pub fn ParticleField(
	/// Visual preset.
	#[prop(optional)]
	mode: FieldMode,
	/// Particle count at desktop widths; narrow viewports get 30% of it.
	#[prop(default = DEFAULT_DENSITY)]
	density: u32,
) -> impl IntoView {
	let config = FieldConfig::new(mode, density);
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let enabled = RwSignal::new(motion_allowed_now());
	let motion_watch = StoredValue::new_local(watch_motion_preference(enabled));
	let session = StoredValue::new_local(None::<FieldSession>);

	Effect::new(move |_| {
		let allowed = enabled.get();
		let canvas: Option<HtmlCanvasElement> = canvas_ref
			.get()
			.map(Into::into)
			.filter(|canvas: &HtmlCanvasElement| canvas.is_connected());

		session.update_value(|slot| {
			if !allowed {
				if slot.take().is_some() {
					info!("particle-field: motion disabled, animation stopped");
				}
				return;
			}
			let Some(canvas) = canvas else {
				return;
			};
			if slot.as_ref().is_some_and(|s| s.canvas == canvas) {
				return;
			}
			*slot = None;
			*slot = FieldSession::start(canvas, config);
		});
	});

	on_cleanup(move || {
		session.try_update_value(|slot| slot.take());
		motion_watch.try_update_value(|watch| watch.take());
	});

	view! {
		<Show when=move || enabled.get()>
			<canvas
				node_ref=canvas_ref
				class="particle-canvas"
				aria-hidden="true"
				style="position: fixed; inset: 0; pointer-events: none; z-index: 0;"
			/>
		</Show>
	}
}
