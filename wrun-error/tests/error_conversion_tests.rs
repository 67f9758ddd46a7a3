//! Integration tests for the wrun-error crate.

use wrun_error::{codes, kinds, Error, ErrorCategory, Result, ToErrorCategory};

fn read_missing() -> Result<Vec<u8>> {
    let bytes = std::fs::read("/definitely/not/a/module.wasm")?;
    Ok(bytes)
}

#[test]
fn test_io_error_propagates_through_question_mark() {
    let error = read_missing().unwrap_err();
    assert_eq!(error.category, ErrorCategory::Io);
    assert_eq!(error.code, codes::IO_ERROR);
}

#[test]
fn test_each_kind_lands_in_its_category() {
    let cases: Vec<(Error, ErrorCategory)> = vec![
        (kinds::initialization_error("no engine"), ErrorCategory::Initialization),
        (kinds::missing_argument("wasm file"), ErrorCategory::Parameter),
        (kinds::invalid_argument(0, "abc"), ErrorCategory::Parameter),
        (kinds::empty_module(), ErrorCategory::Compilation),
        (kinds::compilation_error("bad magic"), ErrorCategory::Compilation),
        (kinds::link_error("incompatible import"), ErrorCategory::Link),
        (kinds::no_exports(), ErrorCategory::Export),
        (kinds::type_mismatch("not a function"), ErrorCategory::Type),
        (kinds::memory_out_of_bounds(16, 8, 20), ErrorCategory::Memory),
        (kinds::unaligned_memory_access(3, 4), ErrorCategory::Memory),
        (kinds::trap("unreachable"), ErrorCategory::RuntimeTrap),
    ];

    for (error, category) in cases {
        assert_eq!(error.to_category(), category, "{error}");
    }
}

#[test]
fn test_error_is_std_error() {
    let error: Box<dyn std::error::Error + Send + Sync> = Box::new(kinds::trap("wasm trap"));
    assert!(error.to_string().contains("wasm trap"));
}

#[test]
fn test_invalid_argument_names_token() {
    let error = kinds::invalid_argument(2, "x1");
    assert_eq!(error.message, "argument 2 is not a base-10 integer: \"x1\"");
}
