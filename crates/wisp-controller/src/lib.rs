//! Orchestration controller driving Wisp event generation.
//!
//! [`Controller`] is the top-level user-facing API: it selects an
//! experiment's detector model, assembles the primary and secondary
//! process graph with default distributions, resolves cross-section
//! collections per process, drives a bounded resumable generation loop,
//! and serializes the accumulated interaction trees to the output
//! container.
//!
//! Lifecycle: [`Controller::new`] → [`set_processes`](Controller::set_processes)
//! → [`set_cross_sections`](Controller::set_cross_sections)
//! → [`initialize`](Controller::initialize)
//! → [`generate_events`](Controller::generate_events) (repeatable)
//! → [`save_events`](Controller::save_events).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod controller;
pub mod error;
pub mod fiducial;
pub mod progress;
pub mod serialize;

pub use controller::Controller;
pub use error::ConfigError;
pub use fiducial::{fiducial_sector, fiducial_volume};
pub use progress::{ProgressSink, Silent, StatusLine};
pub use serialize::build_container;
