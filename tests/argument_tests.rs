//! Integration tests for the argument model.
//!
//! These exercise the public API the way an invoker would: build arguments,
//! inspect them, and compute tensor sizes.

use lambda_args::{
    argument_type_name, safe_unsigned_mul, ArgumentError, IntArgument, LambdaArgument,
    TensorArgument,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_num_elements_matches_product() {
    init_logging();

    let shapes: &[&[i64]] = &[&[1], &[7], &[2, 3], &[4, 1, 5], &[3, 3, 3, 3], &[65536, 65536]];
    for &dims in shapes {
        let expected: usize = dims.iter().map(|&d| d as usize).product();
        let tensor = TensorArgument::from_slice::<u8>(&[], dims);
        assert_eq!(tensor.num_elements().unwrap(), expected, "dims {dims:?}");
    }
}

#[test]
fn test_num_elements_reports_overflow() {
    init_logging();

    let tensor = TensorArgument::from_slice::<u64>(&[], &[1 << 32, 1 << 32]);
    let err = tensor.num_elements().unwrap_err();
    assert!(matches!(err, ArgumentError::Overflow { .. }));

    let tensor = TensorArgument::from_slice::<u64>(&[], &[i64::MAX, i64::MAX]);
    assert!(matches!(
        tensor.num_elements(),
        Err(ArgumentError::Overflow { .. })
    ));

    let tensor = TensorArgument::from_slice::<u64>(&[], &[5, 1 << 62]);
    assert_eq!(
        tensor.num_elements(),
        Err(ArgumentError::Overflow {
            accumulator: 5,
            factor: 1 << 62
        })
    );
}

#[test]
fn test_tensor_from_flat_buffer() {
    let tensor = TensorArgument::from_slice(&[1u8, 2, 3, 4, 5, 6], &[2, 3]);

    assert_eq!(tensor.dimensions(), &[2, 3]);
    assert_eq!(tensor.num_elements().unwrap(), 6);
    assert_eq!(tensor.values::<u8>().unwrap(), &[1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_tensor_construction_forms_agree() {
    let copied = TensorArgument::from_slice(&[1i32, 2, 3, 4, 5, 6], &[2, 3]);
    let moved = TensorArgument::from_vec(vec![1i32, 2, 3, 4, 5, 6], &[2, 3]);
    let native = TensorArgument::from_2d(&[[1i32, 2, 3], [4, 5, 6]]);
    let flat = TensorArgument::from_1d(&[1i32, 2, 3, 4, 5, 6]);

    assert_eq!(copied, moved);
    assert_eq!(copied, native);
    assert_ne!(copied, flat);
    assert_eq!(flat.dimensions(), &[6]);
}

#[test]
fn test_scalar_equality_is_value_based() {
    let plain_u8 = LambdaArgument::int(9u8);
    let enc_u64 = LambdaArgument::encrypted_int(9u64);
    let enc_i16 = LambdaArgument::encrypted_int(9i16);
    let other = LambdaArgument::int(10u8);

    assert_eq!(plain_u8, enc_u64);
    assert_eq!(enc_u64, enc_i16);
    assert_ne!(plain_u8, other);
    assert_eq!(IntArgument::new(9u8), IntArgument::new(9u32));
}

#[test]
fn test_type_identification() {
    assert_eq!(argument_type_name(&LambdaArgument::int(1u8)), "uint8_t");
    assert_eq!(
        argument_type_name(&LambdaArgument::encrypted_int(1i16)),
        "encrypted int16_t"
    );
    assert_eq!(
        argument_type_name(&LambdaArgument::tensor(TensorArgument::from_1d(&[1u32]))),
        "tensor<uint32_t>"
    );
    assert_eq!(
        argument_type_name(&LambdaArgument::encrypted_tensor(TensorArgument::from_1d(
            &[1i8]
        ))),
        "tensor<encrypted int8_t>"
    );
    assert_eq!(
        argument_type_name(&LambdaArgument::int(1i64)),
        "int64_t"
    );
}

#[test]
fn test_precision_single_bit_mask() {
    // 0b1111 with precision 4 keeps only bit 3.
    let arg = LambdaArgument::int_with_precision(0b1111u8, 4);
    assert_eq!(arg.as_scalar().unwrap().value::<u8>(), Some(0b1000));
    assert_eq!(arg.as_scalar().unwrap().precision(), 4);

    let arg = LambdaArgument::encrypted_int_with_precision(0b0111u8, 4);
    assert_eq!(arg.as_scalar().unwrap().value::<u8>(), Some(0));

    let arg = LambdaArgument::int_with_precision(0b1111u8, 8);
    assert_eq!(arg.as_scalar().unwrap().value::<u8>(), Some(0b1111));
}

#[test]
fn test_overflow_helper_message() {
    let mut accu: u64 = u64::MAX / 2;
    let err = safe_unsigned_mul(&mut accu, 3u64).unwrap_err();

    assert_eq!(accu, u64::MAX / 2);
    assert_eq!(
        err.to_string(),
        format!(
            "Multiplying value {} with 3 would cause an overflow",
            u64::MAX / 2
        )
    );
}

#[test]
fn test_mutable_tensor_view() {
    let mut arg = LambdaArgument::encrypted_tensor(TensorArgument::from_1d(&[0u16; 4]));
    let tensor = arg.as_tensor_mut().unwrap();
    for (i, v) in tensor.values_mut::<u16>().unwrap().iter_mut().enumerate() {
        *v = i as u16 * 10;
    }

    assert_eq!(
        arg.as_tensor().unwrap().values::<u16>().unwrap(),
        &[0, 10, 20, 30]
    );
}

#[test]
fn test_arguments_are_shareable_across_threads() {
    let arg = std::sync::Arc::new(LambdaArgument::tensor(TensorArgument::from_slice(
        &[1u8, 2, 3, 4],
        &[2, 2],
    )));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let arg = arg.clone();
            std::thread::spawn(move || arg.as_tensor().unwrap().num_elements().unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 4);
    }
}
