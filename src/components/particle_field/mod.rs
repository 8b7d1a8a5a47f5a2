//! Ambient particle field background component.
//!
//! Renders drifting particles on a full-viewport canvas with:
//! - Gentle pointer repulsion and highlight
//! - Two presets: `plain` warm dust and `linked` glowing particles joined by lines
//! - Automatic rebuild on resize, with fewer particles on narrow viewports
//! - A hard off switch for reduced motion and narrow touch devices
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{FieldMode, ParticleField};
//!
//! view! { <ParticleField mode=FieldMode::Linked density=70 /> }
//! ```

mod animation;
mod component;
pub mod config;
mod environment;
mod particles;
mod render;
mod scheduler;
pub mod theme;

pub use animation::FieldAnimation;
pub use component::ParticleField;
pub use config::{FieldConfig, FieldMode};
pub use environment::HostSignals;
pub use particles::{Link, Particle, ParticleSet, Pointer};
pub use render::{Paint, Surface};
pub use scheduler::{AnimationFrames, FrameRequest, FrameScheduler};
