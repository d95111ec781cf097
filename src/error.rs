// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Fatal conditions of a benchmark run.

use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("could not grow output buffer from {current} to {requested} elements: {source}")]
    BufferGrowth {
        current: usize,
        requested: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("invalid benchmark plan: {0}")]
    InvalidPlan(&'static str),
}
