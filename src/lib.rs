//! pinchtype – hold-to-click interaction core for a gesture-driven virtual
//! keyboard.
//!
//! An external hand-tracking collaborator supplies, once per video frame,
//! zero or one hand as 21 normalized landmarks. This crate classifies the
//! gesture (fist pauses interaction, an index/middle pinch is the click
//! signal), hit-tests the index fingertip against a static key grid, runs a
//! hold-to-confirm click state machine with a global cooldown, and applies
//! confirmed clicks to an in-memory text buffer. Rendering is left to an
//! external collaborator fed by per-frame [`engine::RenderHints`].

pub mod clicker;
pub mod config;
pub mod engine;
pub mod gesture;
pub mod layout;
pub mod runner;
pub mod text;
