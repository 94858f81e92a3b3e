//! The debug flag set through the C surface reaches the installed subscriber.
//!
//! Kept in its own test binary: the subscriber is process-global.

#![allow(unsafe_code)]

use std::ffi::CString;

use casement::ffi::{casement_free, casement_new, casement_set_debug};
use tracing::{level_filters::LevelFilter, Level};

#[test]
fn debug_flag_raises_and_restores_the_log_level() {
    // The configured level only applies when RUST_LOG is absent.
    std::env::remove_var("RUST_LOG");

    let title = CString::new("Logging").unwrap();
    unsafe {
        let shell = casement_new(title.as_ptr(), 800, 600, 1, 0, 0, 0, 3, 0);
        assert_eq!(LevelFilter::current(), LevelFilter::INFO);
        assert!(!tracing::enabled!(Level::DEBUG));

        casement_set_debug(shell, 1);
        assert_eq!(LevelFilter::current(), LevelFilter::DEBUG);
        assert!(tracing::enabled!(Level::DEBUG));

        casement_set_debug(shell, 0);
        assert_eq!(LevelFilter::current(), LevelFilter::INFO);

        casement_free(shell);
    }
}
