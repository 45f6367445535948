//! SAN referee front-end
//!
//! Configuration, logging and the batch and scoring drivers behind the
//! `san-referee` binary. Move classification itself lives in `chess_rules`, and
//! engine access in `uci_evaluator`.

pub mod batch;
pub mod config;
pub mod error;
pub mod logging;
pub mod scoring;

pub use config::{ConfigOrigin, RefereeConfig};
pub use error::{RefereeError, RefereeResult};
