//! Parse, validate and session-classify vendor minute payloads.
//!
//! This crate is the normalization core of sessionbars:
//!
//! - [`Normalizer`] - Turns one raw record into one terminal [`Outcome`]
//! - [`SessionBars`] - Bars partitioned by session plus the dropped count
//! - [`SessionClassifier`] - Streaming sample-to-session classifier
//! - [`MalformedReason`] - Why a payload failed structural validation

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sessionbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod chart;
mod classifier;
mod normalizer;
mod outcome;
mod payload;

pub use chart::MalformedReason;
pub use classifier::SessionClassifier;
pub use normalizer::Normalizer;
pub use outcome::{Outcome, SessionBars};
