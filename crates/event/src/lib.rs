//! # chainsight Event Model (`event`)
//!
//! Shared data model for the disruption-detection pipeline. This crate defines
//! the shape of raw feed records and the categorical attributes the scorer and
//! impact assessor attach to them:
//!
//! - [`RawEvent`]: one record from a weather, seismic, or news feed, with
//!   normalization applied (missing fields defaulted, whitespace trimmed).
//! - [`Severity`]: feed-level severity tiers (`critical` / `warning` / `watch`).
//! - [`DisruptionType`], [`UrgencyLevel`], [`GeographicScope`],
//!   [`ImpactSeverity`]: fixed enumerations used by the scorer. Unknown values
//!   from an external classifier always parse to a safe default rather than
//!   failing the pipeline.
//! - [`DisruptionEvent`]: a scored, retained disruption. Immutable once built.
//!
//! Everything here is serde-friendly and cheap to clone so records can flow
//! across pipeline stages and process boundaries.

mod types;

pub use crate::types::{
    DisruptionEvent, DisruptionType, GeographicScope, ImpactSeverity, MacroRegion, RawEvent,
    Severity, UrgencyLevel,
};
