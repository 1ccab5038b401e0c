//! Simulation errors
//!
//! A tick only fails when an internal invariant breaks. Continuing after one
//! would desync score and visuals, so the host is expected to halt the run.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Every carrot slot is active while a platform needs a new one
    #[error("carrot pool exhausted ({capacity} slots all active)")]
    CarrotPoolExhausted { capacity: usize },
}
