//! Outreach templates
//!
//! Flat `{field}` substitution with `{{` / `}}` as literal braces.

pub mod renderer;

pub use renderer::TemplateRenderer;
