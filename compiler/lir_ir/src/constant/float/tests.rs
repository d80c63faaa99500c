use lir_types::Tag;
use pretty_assertions::assert_eq;

use super::{is_representable, narrow_bits, push_float, BFLOAT, HALF, SINGLE};

fn printed(tag: Tag, value: f64) -> String {
    let mut buf = String::new();
    push_float(&mut buf, tag, value);
    buf
}

#[test]
fn half_encodings() {
    assert_eq!(narrow_bits(1.0, HALF), Some(0x3C00));
    assert_eq!(narrow_bits(0.5, HALF), Some(0x3800));
    assert_eq!(narrow_bits(-2.0, HALF), Some(0xC000));
    assert_eq!(narrow_bits(65504.0, HALF), Some(0x7BFF));
    assert_eq!(narrow_bits(f64::INFINITY, HALF), Some(0x7C00));
}

#[test]
fn half_subnormal() {
    assert_eq!(narrow_bits(2f64.powi(-24), HALF), Some(0x0001));
    assert_eq!(narrow_bits(2f64.powi(-25), HALF), None);
}

#[test]
fn inexact_values_are_rejected() {
    assert!(!is_representable(Tag::Half, 0.1));
    assert!(!is_representable(Tag::Half, 65536.0));
    assert!(!is_representable(Tag::Float, 0.1));
    assert!(!is_representable(Tag::Float, 1e40));
    assert!(is_representable(Tag::Float, 0.5));
    assert!(is_representable(Tag::Double, 0.1));
    assert!(is_representable(Tag::Fp128, 0.1));
    assert!(!is_representable(Tag::Int, 1.0));
}

#[test]
fn bfloat_and_single() {
    assert_eq!(narrow_bits(1.0, BFLOAT), Some(0x3F80));
    assert_eq!(narrow_bits(1.0, SINGLE), Some(0x3F80_0000));
    assert_eq!(narrow_bits(-0.0, SINGLE), Some(0x8000_0000));
}

#[test]
fn double_prints_decimal_when_exact() {
    assert_eq!(printed(Tag::Double, 1.0), "1.000000e+00");
    assert_eq!(printed(Tag::Double, -2.5), "-2.500000e+00");
    assert_eq!(printed(Tag::Double, 0.0), "0.000000e+00");
    assert_eq!(printed(Tag::Double, 1e100), "1.000000e+100");
    assert_eq!(printed(Tag::Float, 0.125), "1.250000e-01");
}

#[test]
fn decimal_that_reads_back_is_kept() {
    assert_eq!(printed(Tag::Double, 0.1), "1.000000e-01");
}

#[test]
fn falls_back_to_hex_when_six_digits_lose_bits() {
    assert_eq!(printed(Tag::Double, 1.0 / 3.0), "0x3FD5555555555555");
    assert_eq!(printed(Tag::Float, f64::from(0.1f32)), "0x3FB99999A0000000");
    assert_eq!(printed(Tag::Double, f64::INFINITY), "0x7FF0000000000000");
}

#[test]
fn extended_formats() {
    assert_eq!(printed(Tag::Half, 1.0), "0xH3C00");
    assert_eq!(printed(Tag::BFloat, 1.0), "0xR3F80");
    assert_eq!(printed(Tag::X86Fp80, 1.0), "0xK3FFF8000000000000000");
    assert_eq!(
        printed(Tag::Fp128, 1.0),
        "0xL00000000000000003FFF000000000000"
    );
    assert_eq!(
        printed(Tag::PpcFp128, 1.0),
        "0xM3FF00000000000000000000000000000"
    );
}
