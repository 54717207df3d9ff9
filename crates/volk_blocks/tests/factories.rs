//! Factory lookup, argument checking, and the errors a caller sees when a block can't be built.
mod common;

use num::complex::Complex32;
use pretty_assertions::assert_eq;

use common::*;
use volk_blocks::{registry, Block, BlockArg, DType, DispatchError, ElementKind};

fn make_err(path: &str, args: &[BlockArg]) -> volk_blocks::Error {
    init_logging();
    match registry().make(path, args) {
        Ok(_) => panic!("{} should have failed", path),
        Err(e) => e,
    }
}

#[test]
fn test_every_path_builds() {
    init_logging();
    let r = registry();
    assert_eq!(r.len(), 54);

    // Every fixed block builds with no arguments and has at least one port each way.
    for path in r.paths() {
        let entry = r.get(path).unwrap();
        if entry.arity() != 0 {
            continue;
        }
        let block = r.make(path, &[]).unwrap();
        assert_eq!(block.descriptor().path, path);
        assert!(!block.inputs().is_empty(), "{} has no inputs", path);
        assert!(!block.outputs().is_empty(), "{} has no outputs", path);
    }
}

#[test]
fn test_unsupported_dtypes() {
    let err = make_err("/volk/add", &[dtype::<f32>(), dtype::<i8>(), dtype::<f32>()]);
    assert!(err.is_unsupported_dtypes());
    assert_eq!(
        err.to_string(),
        "/volk/add: unsupported dtype combination (inputs: [float32, int8], outputs: [float32], scalars: [])"
    );

    let err = make_err("/volk/multiply_scalar", &[dtype::<f64>(), dtype::<f64>(), dtype::<f64>()]);
    assert_eq!(
        err.as_dispatch_error(),
        Some(&DispatchError::UnsupportedDTypes {
            context: "/volk/multiply_scalar".to_string(),
            inputs: vec![DType::of::<f64>()],
            outputs: vec![DType::of::<f64>()],
            scalars: vec![DType::of::<f64>()],
        })
    );
}

#[test]
fn test_dispatch_checks_every_position() {
    // The first two types match a supported row; only the output does not.
    let err = make_err(
        "/volk/add",
        &[dtype::<Complex32>(), dtype::<f32>(), dtype::<f32>()],
    );
    assert!(err.is_unsupported_dtypes());

    let err = make_err("/volk/max", &[dtype::<Complex32>()]);
    assert!(err.is_unsupported_dtypes());
}

#[test]
fn test_vector_dtypes_are_rejected() {
    let wide = DType::with_dimension(ElementKind::Float32, 2).unwrap();
    let err = make_err("/volk/max", &[wide.into()]);
    assert!(err.is_unsupported_dtypes());
}

#[test]
fn test_exp_mode() {
    let err = make_err("/volk/exp", &["BAD".into()]);
    assert!(err.is_unsupported_mode());
    assert_eq!(err.to_string(), "/volk/exp mode: BAD");

    let err = make_err("/volk/exp", &[dtype::<f32>()]);
    assert!(err.is_registry_error());
}

#[test]
fn test_wrong_arity() {
    let err = make_err("/volk/sqrt", &[dtype::<f32>()]);
    assert!(err.is_registry_error());
    assert_eq!(
        err.to_string(),
        "Registry error: /volk/sqrt takes 0 argument(s), got 1"
    );

    let err = make_err("/volk/convert", &[dtype::<i8>()]);
    assert!(err.is_registry_error());
}

#[test]
fn test_unknown_path() {
    let err = make_err("/volk/frobnicate", &[]);
    assert!(err.is_registry_error());
    assert_eq!(err.to_string(), "Registry error: no block is registered at /volk/frobnicate");
}

#[test]
fn test_dtype_names() {
    let block = make("/volk/deinterleave", &["complex_float32".into(), "float32".into()]);
    assert_eq!(block.outputs().len(), 2);

    let err = make_err("/volk/deinterleave", &["complex_float32".into(), "float33".into()]);
    assert!(err.is_dtype_error());
}
