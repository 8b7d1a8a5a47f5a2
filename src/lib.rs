//! particle-field: ambient canvas particle background for brochure pages.
//!
//! This crate provides a WASM-based Leptos component that animates drifting
//! particles behind page content, reacting softly to the pointer.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{FieldConfig, FieldMode, ParticleField};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Load field configuration from a script element with id="particle-config".
/// Expected format: JSON with { mode: "plain" | "linked", density: N }
fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<FieldConfig>(&json_text) {
		Ok(config) => {
			info!(
				"particle-field: loaded config {:?} at density {}",
				config.mode, config.density
			);
			Some(config)
		}
		Err(e) => {
			warn!("particle-field: failed to parse config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Reads the field configuration from the DOM and renders a hero over the field.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Particle Field" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main class="hero">
			<ParticleField mode=config.mode density=config.density />
			<div class="hero-content">
				<h1>"Crafted with care"</h1>
				<p class="subtitle">"Move the pointer across the page to stir the field."</p>
			</div>
		</main>
	}
}
