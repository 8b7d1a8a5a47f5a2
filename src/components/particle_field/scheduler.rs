//! Per-frame scheduling.
//!
//! A [`FrameScheduler`] asks the host to run the animation's frame callback
//! once before the next repaint and hands back a [`FrameRequest`] that can
//! cancel it. The browser implementation wraps `requestAnimationFrame`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

/// Handle for one pending frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRequest(pub i32);

/// Host mechanism for "run the frame callback once before the next repaint".
pub trait FrameScheduler {
	/// Returns `None` when the host refused the request.
	fn request_frame(&self) -> Option<FrameRequest>;
	fn cancel_frame(&self, request: FrameRequest);
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for Rc<T> {
	fn request_frame(&self) -> Option<FrameRequest> {
		(**self).request_frame()
	}

	fn cancel_frame(&self, request: FrameRequest) {
		(**self).cancel_frame(request)
	}
}

/// `requestAnimationFrame` driven scheduler with a single persistent callback.
#[derive(Default)]
pub struct AnimationFrames {
	callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl AnimationFrames {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the function every requested frame will run.
	pub fn bind(&self, frame: impl FnMut() + 'static) {
		*self.callback.borrow_mut() = Some(Closure::new(frame));
	}
}

impl FrameScheduler for AnimationFrames {
	fn request_frame(&self) -> Option<FrameRequest> {
		let window = web_sys::window()?;
		let callback = self.callback.borrow();
		let id = window
			.request_animation_frame(callback.as_ref()?.as_ref().unchecked_ref())
			.ok()?;
		Some(FrameRequest(id))
	}

	fn cancel_frame(&self, request: FrameRequest) {
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(request.0);
		}
	}
}

/// Scheduler double that only fires when the test pumps it.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ManualFrames {
	next_id: std::cell::Cell<i32>,
	pending: std::cell::Cell<Option<FrameRequest>>,
	pub requested: std::cell::Cell<usize>,
	pub cancelled: std::cell::Cell<usize>,
	pub refuse: std::cell::Cell<bool>,
}

#[cfg(test)]
impl ManualFrames {
	/// Consumes the pending request, if any. The caller then runs the frame.
	pub fn fire(&self) -> bool {
		self.pending.take().is_some()
	}

	pub fn is_pending(&self) -> bool {
		self.pending.get().is_some()
	}
}

#[cfg(test)]
impl FrameScheduler for ManualFrames {
	fn request_frame(&self) -> Option<FrameRequest> {
		if self.refuse.get() {
			return None;
		}
		let id = self.next_id.get() + 1;
		self.next_id.set(id);
		self.requested.set(self.requested.get() + 1);
		let request = FrameRequest(id);
		self.pending.set(Some(request));
		Some(request)
	}

	fn cancel_frame(&self, request: FrameRequest) {
		if self.pending.get() == Some(request) {
			self.pending.set(None);
		}
		self.cancelled.set(self.cancelled.get() + 1);
	}
}
