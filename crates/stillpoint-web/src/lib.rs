#![forbid(unsafe_code)]

//! Browser runtime for the Stillpoint studio page.
//!
//! This crate composes the scroll spy and navigation controller from
//! `stillpoint-runtime` into a host-driven page runner:
//!
//! - [`site`] - the fixed section list and nav destinations
//! - [`nav_bar`] - the derived navigation bar view model
//! - [`host_message`] - JSON events forwarded by the host
//! - [`runner_core`] - [`SiteRunner`], shared by the wasm exports and native tests
//!
//! On `wasm32` the runner is exported to JavaScript as `StudioSite`.

pub mod host_message;
pub mod nav_bar;
pub mod runner_core;
pub mod site;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::StudioSite;

pub use host_message::{HostMessage, HostMessageError, parse_host_message};
pub use nav_bar::{BrandView, Breakpoint, DESKTOP_MIN_WIDTH, NavBarView, NavItemView, ToggleIcon};
pub use runner_core::{SiteError, SiteRunner};
pub use site::{NavLink, PageDefinition, STUDIO_SECTIONS};
