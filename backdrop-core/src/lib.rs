//! Animation core for the Hyperion landing page backdrop.
//!
//! Main components:
//! - [`store`] - falling chain logos and bouncing dots, stepped per tick.
//! - [`phases`] - the per-tick motion pipeline the store runs.
//! - [`entity`] - entity types and their random initialisation.
//! - [`easing`] - cubic ease-out count-up of the landing statistics.
//! - [`scheduler`] - fixed-period timers driven by elapsed time.
//! - [`visibility`] - fire-once reveal gate for on-screen sections.
//! - [`presenter`] - maps store state to drawable sprites.
//! - [`scene`] - ties the above to one mount/teardown lifecycle.
//! - [`pointer`], [`typewriter`], [`dashboard`] - smaller decorative state.
//! - [`config`] - tunables, loaded from TOML.
//! - [`palette`], [`types`] - shared constants and value types.

pub mod config;
pub mod dashboard;
pub mod easing;
pub mod entity;
pub mod palette;
pub mod phases;
pub mod pointer;
pub mod presenter;
pub mod scene;
pub mod scheduler;
pub mod store;
pub mod types;
pub mod typewriter;
pub mod visibility;
