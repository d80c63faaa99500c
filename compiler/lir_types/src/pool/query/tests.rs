#![expect(clippy::expect_used, reason = "Test code uses expect for clarity")]

use crate::{Idx, Pool};

#[test]
fn scalar_queries() {
    let mut pool = Pool::new();
    let p3 = pool.pointer(3);

    assert_eq!(pool.int_width(Idx::I64), Some(64));
    assert_eq!(pool.int_width(Idx::PTR), None);
    assert_eq!(pool.pointer_addrspace(p3), Some(3));
    assert_eq!(pool.pointer_addrspace(Idx::I8), None);
    assert_eq!(pool.float_width(Idx::HALF), Some(16));
    assert_eq!(pool.float_width(Idx::X86_FP80), Some(80));
    assert_eq!(pool.float_width(Idx::I32), None);
}

#[test]
fn element_types() {
    let mut pool = Pool::new();
    let arr = pool.array(3, Idx::I16);
    let vec = pool.vector(2, Idx::DOUBLE);
    let st = pool.struct_type(&[Idx::I8, Idx::PTR], false);

    assert_eq!(pool.element_type(arr, 2), Some(Idx::I16));
    assert_eq!(pool.element_type(arr, 3), None);
    assert_eq!(pool.element_type(vec, 1), Some(Idx::DOUBLE));
    assert_eq!(pool.element_type(st, 1), Some(Idx::PTR));
    assert_eq!(pool.element_type(st, 2), None);
    assert_eq!(pool.element_type(Idx::I32, 0), None);

    assert_eq!(pool.aggregate_len(arr), Some(3));
    assert_eq!(pool.aggregate_len(vec), Some(2));
    assert_eq!(pool.aggregate_len(st), Some(2));
    assert_eq!(pool.aggregate_len(Idx::PTR), None);
}

#[test]
fn scalar_type_of_vector() {
    let mut pool = Pool::new();
    let vec = pool.vector(8, Idx::I8);
    assert_eq!(pool.scalar_type(vec), Idx::I8);
    assert_eq!(pool.scalar_type(Idx::I8), Idx::I8);
}

#[test]
fn function_queries() {
    let mut pool = Pool::new();
    let f = pool.function(&[Idx::I32, Idx::PTR], Idx::I1, true);

    assert_eq!(pool.function_params(f), Some(vec![Idx::I32, Idx::PTR]));
    assert_eq!(pool.function_return(f), Some(Idx::I1));
    assert!(pool.function_is_variadic(f));
    assert_eq!(pool.function_params(Idx::I32), None);
    assert!(!pool.function_is_variadic(Idx::I32));
}

#[test]
fn primitive_sizes() {
    let mut pool = Pool::new();
    let v4i32 = pool.vector(4, Idx::I32);
    let arr = pool.array(4, Idx::I32);

    assert_eq!(pool.primitive_size_bits(Idx::I1), Some(1));
    assert_eq!(pool.primitive_size_bits(Idx::BFLOAT), Some(16));
    assert_eq!(pool.primitive_size_bits(Idx::FP128), Some(128));
    assert_eq!(pool.primitive_size_bits(v4i32), Some(128));
    assert_eq!(pool.primitive_size_bits(Idx::PTR), None);
    assert_eq!(pool.primitive_size_bits(arr), None);
}

#[test]
fn sizedness() {
    let mut pool = Pool::new();
    let opaque = pool.named_struct("opaque").expect("fresh name");
    let empty_arr = pool.array(0, Idx::I32);
    let st = pool.struct_type(&[Idx::I32, empty_arr], false);
    let func = pool.function(&[], Idx::VOID, false);

    assert!(pool.is_sized(Idx::I32));
    assert!(pool.is_sized(Idx::PTR));
    assert!(pool.is_sized(empty_arr));
    assert!(pool.is_sized(st));
    assert!(!pool.is_sized(opaque));
    assert!(!pool.is_sized(Idx::VOID));
    assert!(!pool.is_sized(Idx::LABEL));
    assert!(!pool.is_sized(func));
}
