use crate::tests::{EnvGuard, setup_config_dir};
use crate::{Config, LogLevel};

use std::str::FromStr;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err};
use log::LevelFilter;
use serial_test::serial;

// =========================================================================
// Logging
// =========================================================================

#[test]
fn given_unknown_level_when_parsed_then_falls_back_to_info() {
    let level = LogLevel::from_str("verbose").unwrap();

    assert_that!(*level, eq(LevelFilter::Info));
}

#[test]
#[serial]
fn given_level_env_var_when_load_then_level_applied() {
    // Given
    let _temp = setup_config_dir();
    let _level = EnvGuard::set("NX_LOG_LEVEL", "DEBUG");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(*config.logging.level, eq(LevelFilter::Debug));
}

#[test]
#[serial]
fn given_log_file_with_traversal_when_validate_then_error() {
    // Given
    let _temp = setup_config_dir();
    let _file = EnvGuard::set("NX_LOG_FILE", "../../escape.log");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}
