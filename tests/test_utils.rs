use latlng_bounds::{GeoError, GeoPoint};
use regex::Regex;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

fn initialize_logger_once() {
    INIT_LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

pub mod shared {
    use super::*;

    // Every test starts here so trace output from clamping/wrapping is visible with RUST_LOG.
    #[allow(dead_code)]
    pub fn setup() {
        initialize_logger_once();
    }

    // Shorthand for points the test itself guarantees are valid.
    #[allow(dead_code)]
    pub fn point(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint::new(latitude, longitude)
            .unwrap_or_else(|e| panic!("test point ({}, {}) rejected: {}", latitude, longitude, e))
    }

    #[allow(dead_code)]
    pub fn assert_invalid_type(result: Result<impl std::fmt::Debug, GeoError>, pattern: &str) {
        match result {
            Err(e) if e.is_invalid_type() => assert_message_matches(&e, pattern),
            other => panic!("Expected InvalidType matching {:?}, got {:?}", pattern, other),
        }
    }

    #[allow(dead_code)]
    pub fn assert_invalid_value(result: Result<impl std::fmt::Debug, GeoError>, pattern: &str) {
        match result {
            Err(e) if e.is_invalid_value() => assert_message_matches(&e, pattern),
            other => panic!("Expected InvalidValue matching {:?}, got {:?}", pattern, other),
        }
    }

    fn assert_message_matches(err: &GeoError, pattern: &str) {
        let re = Regex::new(pattern).expect("invalid test pattern");
        assert!(
            re.is_match(&err.to_string()),
            "Error message {:?} does not match {:?}",
            err.to_string(),
            pattern
        );
    }
}
