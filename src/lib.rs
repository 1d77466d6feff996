// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Gesture-driven camera navigation for planet-scale 3D globe viewers.
//!
//! Orbit, pan and zoom gestures move a camera around a globe in
//! double-precision globe-fixed (ECEF) coordinates, with inertia after
//! release and automatic re-centering of the view at high altitude.
//!
//! # Key entry points
//!
//! - [`camera::GlobeCameraController`] - the per-frame controller
//! - [`input::InputCollector`] - folds platform events into frame snapshots
//! - [`globe`] - the collaborator traits the host implements, plus a
//!   spherical reference globe
//! - [`options::NavigationOptions`] - gesture tuning (TOML presets, JSON
//!   schema)
//! - [`math::Quaterniond`] - the double-precision rotation type
//!
//! # Architecture
//!
//! Each frame the controller resamples the pointer states from an
//! [`input::InputSource`], lets the [`camera::ActionMachine`] start at most
//! one gesture and advance the running one, and finally keeps the camera
//! above ground. Gestures mutate the host's camera pose through
//! [`globe::GlobeAnchor`] and query the surface through
//! [`globe::RayCaster`]; nothing here renders.
//!
//! The [`replay`] module drives the controller from scripted input, which
//! is what the `globenav` binary (feature `binary`) runs.

pub mod camera;
pub mod error;
pub mod globe;
pub mod input;
pub mod math;
pub mod options;
pub mod replay;
pub mod util;

pub use camera::GlobeCameraController;
pub use error::NavError;
pub use math::Quaterniond;
