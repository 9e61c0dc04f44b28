//! Orbis Core - Core types shared by the Orbis globe renderer
//!
//! This crate provides the foundational types used by the other crates:
//! - Mathematical primitives (re-exported from glam)
//! - Placement of a model on the globe (`Transform`, `AltitudeMode`)
//! - Linear RGBA colors used by shading attributes

pub mod types;

pub use glam::{Mat4, Quat, Vec3};
pub use types::{AltitudeMode, Color, Transform};
