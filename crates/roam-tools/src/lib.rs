//! Tooling primitives for the roam simulation.
//!
//! This crate stays engine-agnostic: it records what happened during a tick so debug
//! overlays, replays, and log exporters can consume it later.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{tags, NullTraceSink, TraceEvent, TraceLog, TraceSink, VecTraceSink};
