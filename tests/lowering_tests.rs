//! Integration tests for lowering argument lists onto the calling convention.

use bumpalo::Bump;
use lambda_args::literal::{parse_argument, parse_signature};
use lambda_args::x64::{lower_arguments, lower_call, ArgLocation, GpReg, WordKind};
use lambda_args::{ArgumentError, LambdaArgument, TensorArgument};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn parse_all(literals: &[&str]) -> Vec<LambdaArgument> {
    literals
        .iter()
        .map(|text| parse_argument(text).unwrap_or_else(|e| panic!("Failed to parse {text}: {e}")))
        .collect()
}

#[test]
fn test_seven_scalars_spill_to_stack() {
    init_logging();
    let arena = Bump::new();
    let args: Vec<_> = (0..7u32).map(LambdaArgument::int).collect();

    let frame = lower_arguments(&arena, &args).unwrap();
    let locations: Vec<_> = frame.words().iter().map(|w| w.location()).collect();

    assert_eq!(
        locations,
        vec![
            ArgLocation::Register(GpReg::Rdi),
            ArgLocation::Register(GpReg::Rsi),
            ArgLocation::Register(GpReg::Rdx),
            ArgLocation::Register(GpReg::Rcx),
            ArgLocation::Register(GpReg::R8),
            ArgLocation::Register(GpReg::R9),
            ArgLocation::Stack(0),
        ]
    );
    assert_eq!(frame.stack_size(), 16);
    assert_eq!(frame.words()[6].value, 6);
}

#[test]
fn test_rank2_tensor_lowers_to_memref_descriptor() {
    init_logging();
    let arena = Bump::new();
    let args = parse_all(&["eu8[2x3]:1,2,3,4,5,6"]);

    let frame = lower_arguments(&arena, &args).unwrap();
    assert_eq!(frame.words().len(), 7);

    let sizes: Vec<_> = frame
        .words()
        .iter()
        .filter(|w| matches!(w.kind, WordKind::Size(_)))
        .map(|w| w.value)
        .collect();
    let strides: Vec<_> = frame
        .words()
        .iter()
        .filter(|w| matches!(w.kind, WordKind::Stride(_)))
        .map(|w| w.value)
        .collect();

    assert_eq!(sizes, vec![2, 3]);
    assert_eq!(strides, vec![3, 1]);
}

#[test]
fn test_lower_call_checks_signature() {
    init_logging();
    let arena = Bump::new();
    let signature = parse_signature("eint<8>, tensor<?x2xint<16>>").unwrap();

    let good = parse_all(&["eu8:3", "u16[3x2]:1,2,3,4,5,6"]);
    let frame = lower_call(&arena, &signature, &good).unwrap();
    assert_eq!(frame.words_for(0).count(), 1);
    assert_eq!(frame.words_for(1).count(), 7);

    let wrong = parse_all(&["u8:3", "u16[3x2]:1,2,3,4,5,6"]);
    assert_eq!(
        lower_call(&arena, &signature, &wrong).unwrap_err(),
        ArgumentError::SignatureMismatch {
            index: 0,
            expected: "eint<8>".to_string(),
            actual: "uint8_t".to_string(),
        }
    );

    let short = parse_all(&["eu8:3"]);
    assert!(matches!(
        lower_call(&arena, &signature, &short),
        Err(ArgumentError::ArityMismatch {
            expected: 2,
            actual: 1
        })
    ));
}

#[test]
fn test_overflowing_tensor_aborts_lowering() {
    init_logging();
    let arena = Bump::new();
    let args = vec![LambdaArgument::tensor(TensorArgument::from_vec::<u8>(
        Vec::new(),
        &[1 << 32, 1 << 32],
    ))];

    assert!(matches!(
        lower_arguments(&arena, &args),
        Err(ArgumentError::Overflow { .. })
    ));
}

#[test]
fn test_negative_dimension_aborts_lowering() {
    let arena = Bump::new();
    let args = vec![LambdaArgument::tensor(TensorArgument::from_slice(&[1u8], &[-1]))];

    assert_eq!(
        lower_arguments(&arena, &args).unwrap_err(),
        ArgumentError::NegativeDimension { index: 0, size: -1 }
    );
}
