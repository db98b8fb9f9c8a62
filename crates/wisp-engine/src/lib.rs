//! Injection and weighting engines for Wisp event generation.
//!
//! [`Injector`] and [`Weighter`] are the contracts the controller wires
//! configured processes into. [`StandardInjector`] and [`TreeWeighter`]
//! are the reference single-threaded implementations: the injector
//! samples one interaction tree per call and owns the authoritative
//! injected-event counter; the weighter computes a physical weight for
//! a finished tree without touching it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod injector;
pub mod weighter;

pub use error::EngineError;
pub use injector::{Injector, StandardInjector, StoppingCondition};
pub use weighter::{TreeWeighter, Weighter};
