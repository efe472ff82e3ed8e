#![doc(test(attr(deny(warnings))))]

//! Finance Control keeps categories, people and transactions, and renders
//! them as filtered, paginated lists with a compact pager.

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod listing;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Control tracing initialized.");
    });
}
