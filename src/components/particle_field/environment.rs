//! Host environment signals and DOM listener plumbing.

use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, Window};

use super::particles::MOBILE_BREAKPOINT;

/// Media query matching a reduced-motion accessibility preference.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Snapshot of what the host tells us about the viewport and device.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HostSignals {
	pub viewport_width: f64,
	pub viewport_height: f64,
	pub reduced_motion: bool,
	pub touch: bool,
}

impl HostSignals {
	/// Whether the field may animate at all.
	///
	/// Reduced motion always disables it, and so does a narrow touch device.
	/// This is a hard off switch rather than a lighter mode.
	pub fn motion_allowed(&self) -> bool {
		let narrow_touch = self.viewport_width < MOBILE_BREAKPOINT && self.touch;
		!(self.reduced_motion || narrow_touch)
	}

	/// Reads the current signals from the browser window.
	pub fn read(window: &Window) -> Option<Self> {
		let (viewport_width, viewport_height) = viewport_size(window)?;
		let reduced_motion = window
			.match_media(REDUCED_MOTION_QUERY)
			.ok()
			.flatten()
			.is_some_and(|query| query.matches());
		let touch = window.navigator().max_touch_points() > 0
			|| js_sys::Reflect::has(window, &JsValue::from_str("ontouchstart")).unwrap_or(false);

		Some(Self {
			viewport_width,
			viewport_height,
			reduced_motion,
			touch,
		})
	}
}

/// Inner window size in CSS pixels.
pub fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// A DOM event listener that unregisters itself when dropped.
pub struct EventListener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl EventListener {
	/// Registers `handler` for `event` on `target`; `None` if the browser refuses.
	pub fn new(
		target: &EventTarget,
		event: &'static str,
		handler: impl FnMut(web_sys::Event) + 'static,
	) -> Option<Self> {
		let callback = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
		target
			.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
			.ok()?;
		Some(Self {
			target: target.clone(),
			event,
			callback,
		})
	}
}

impl Drop for EventListener {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}
