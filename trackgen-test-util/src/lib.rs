//! Utility functions for tests.

use std::fmt::Debug;

use flexi_logger::{LogSpecBuilder, Logger, LoggerHandle};
use log::LevelFilter;
use parking_lot::{const_mutex, Mutex};
use thiserror::Error;

/// Helper variable for [`init_test_logging`].
/// Makes sure only the first call registers a logger.
static LOGGER_HANDLE: Mutex<Option<LoggerHandle>> = const_mutex(None);

/// Initialize `FlexiLogger` once, store the handle in a global variable.
///
/// Necessary, since `cargo test` runs multiple tests in parallel,
/// but only one logger can be active.
///
/// ## Panics
///
/// If the logger can't be initialized, e.g. because another one already exists.
pub fn init_test_logging() {
    let handle = &mut *LOGGER_HANDLE.lock();
    if handle.is_none() {
        let mut log_spec_builder = LogSpecBuilder::new();
        let _ = log_spec_builder
            .default(LevelFilter::Error)
            .module("trackgen", LevelFilter::Debug)
            .module("trackgen_track", LevelFilter::Debug)
            .module("trackgen_id", LevelFilter::Warn);
        let log_spec = log_spec_builder.finalize();
        *handle = Some(
            Logger::with(log_spec)
                .log_to_stderr()
                .start()
                .expect("Initializing the logger failed!"),
        );
    }
}

/// A failed expectation in a test.
#[derive(Debug, Error)]
pub enum Expectation {
    /// `true` was expected.
    #[error(transparent)]
    True(#[from] ExpectTrue),
    /// Both values were expected to be equal.
    #[error(transparent)]
    Eq(#[from] ExpectEq),
    /// Both values were expected to be different.
    #[error(transparent)]
    Ne(#[from] ExpectNe),
}

/// `true` was expected.
#[derive(Debug, Clone, Copy, Error)]
#[error("Expected true!")]
pub struct ExpectTrue;

#[allow(clippy::missing_errors_doc)]
/// Return [`Ok`] if the value is [`true`], otherwise [`Err`].
pub fn expect_true(value: bool) -> Result<(), ExpectTrue> {
    if value {
        Ok(())
    } else {
        Err(ExpectTrue)
    }
}

/// Both values were expected to be equal.
#[derive(Debug, Error)]
#[error("Expected {0:?} and {1:?} to be equal!")]
pub struct ExpectEq(Box<dyn Debug>, Box<dyn Debug>);

#[allow(clippy::missing_errors_doc)]
/// Return [`Ok`] if both values are equal, otherwise [`Err`].
#[allow(clippy::min_ident_chars)]
pub fn expect_eq<T: 'static + Debug + PartialEq>(a: T, b: T) -> Result<(), ExpectEq> {
    expect_true(a == b).map_err(|_expect_true| ExpectEq(Box::new(a), Box::new(b)))
}

/// Both values were expected to be different.
#[derive(Debug, Error)]
#[error("Expected {0:?} and {1:?} to be different!")]
pub struct ExpectNe(Box<dyn Debug>, Box<dyn Debug>);

#[allow(clippy::missing_errors_doc)]
/// Return [`Ok`] if both values are different, otherwise [`Err`].
#[allow(clippy::min_ident_chars)]
pub fn expect_ne<T: 'static + Debug + PartialEq>(a: T, b: T) -> Result<(), ExpectNe> {
    expect_true(a != b).map_err(|_expect_true| ExpectNe(Box::new(a), Box::new(b)))
}
