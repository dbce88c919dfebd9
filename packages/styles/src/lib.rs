//! # Proseline Styles
//!
//! Pure functions from a node's semantic attributes to concrete CSS
//! declarations. Two families exist:
//!
//! - [`surface`]: the interactive editing surface
//! - [`email`]: the static email renderer
//!
//! They share formulas through [`defaults`] but not code, so each target can
//! spell the result the way its output medium needs while staying visually
//! equivalent. Column width normalization lives in [`layout`].

pub mod defaults;
pub mod email;
pub mod layout;
pub mod style;
pub mod surface;

pub use style::Style;
pub use surface::ListMarker;
