//! Floating-point encodings.
//!
//! Float constants are built from an `f64`. Narrower formats accept the
//! value only if it converts without rounding; wider formats always do.
//! Printing follows the assembly writer: `float` and `double` use a
//! six-digit `%e` form when it reads back to the same value and the hex
//! bits of the double otherwise, every other format is always hex.

#![allow(clippy::format_push_string)] // Hex formatting reads clearest with format!

use lir_types::Tag;

/// IEEE layout of a binary interchange format narrower than `f64`.
#[derive(Clone, Copy)]
struct Narrow {
    exp_bits: u32,
    man_bits: u32,
}

const HALF: Narrow = Narrow {
    exp_bits: 5,
    man_bits: 10,
};
const BFLOAT: Narrow = Narrow {
    exp_bits: 8,
    man_bits: 7,
};
const SINGLE: Narrow = Narrow {
    exp_bits: 8,
    man_bits: 23,
};

const F64_MAN_BITS: u32 = 52;
const F64_MAN_MASK: u64 = (1 << F64_MAN_BITS) - 1;
const F64_BIAS: i32 = 1023;

struct Parts {
    sign: u64,
    exp_field: u32,
    man: u64,
}

#[expect(clippy::cast_possible_truncation, reason = "11-bit field")]
fn parts(value: f64) -> Parts {
    let bits = value.to_bits();
    Parts {
        sign: bits >> 63,
        exp_field: ((bits >> F64_MAN_BITS) & 0x7FF) as u32,
        man: bits & F64_MAN_MASK,
    }
}

/// Encode `value` in a narrow format, or `None` if it would round.
#[expect(
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    reason = "exponents are bounded by the format widths"
)]
fn narrow_bits(value: f64, format: Narrow) -> Option<u64> {
    let Narrow { exp_bits, man_bits } = format;
    let Parts {
        sign,
        exp_field,
        man,
    } = parts(value);
    let bias = (1i32 << (exp_bits - 1)) - 1;
    let max_field = (1u64 << exp_bits) - 1;
    let with_sign = |rest: u64| (sign << (exp_bits + man_bits)) | rest;

    if exp_field == 0x7FF {
        if man == 0 {
            return Some(with_sign(max_field << man_bits));
        }
        // NaN: keep the top payload bits and force a quiet NaN.
        let payload = man >> (F64_MAN_BITS - man_bits);
        let quiet = 1u64 << (man_bits - 1);
        return Some(with_sign((max_field << man_bits) | payload | quiet));
    }
    if exp_field == 0 {
        // f64 subnormals are far below every narrow format's range.
        return (man == 0).then(|| with_sign(0));
    }

    let exp = exp_field as i32 - F64_BIAS;
    if exp > bias {
        return None;
    }
    let drop = F64_MAN_BITS - man_bits;
    let min_normal = 1 - bias;
    if exp >= min_normal {
        if man & ((1u64 << drop) - 1) != 0 {
            return None;
        }
        let field = (exp + bias) as u64;
        return Some(with_sign((field << man_bits) | (man >> drop)));
    }

    // Subnormal in the narrow format.
    let significand = man | (1u64 << F64_MAN_BITS);
    let shift = drop + (min_normal - exp) as u32;
    if shift > F64_MAN_BITS || significand & ((1u64 << shift) - 1) != 0 {
        return None;
    }
    Some(with_sign(significand >> shift))
}

/// Whether `value` converts to the float type `tag` without rounding.
pub(crate) fn is_representable(tag: Tag, value: f64) -> bool {
    match tag {
        Tag::Half => narrow_bits(value, HALF).is_some(),
        Tag::BFloat => narrow_bits(value, BFLOAT).is_some(),
        Tag::Float => narrow_bits(value, SINGLE).is_some(),
        Tag::Double | Tag::X86Fp80 | Tag::Fp128 | Tag::PpcFp128 => true,
        _ => false,
    }
}

/// Sign-and-exponent word and mantissa of the x87 80-bit format.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    reason = "exponent is rebiased into 15 bits"
)]
fn x86_fp80_parts(value: f64) -> (u16, u64) {
    const INTEGER_BIT: u64 = 1 << 63;
    let Parts {
        sign,
        exp_field,
        man,
    } = parts(value);
    let sign = (sign as u16) << 15;
    match (exp_field, man) {
        (0, 0) => (sign, 0),
        (0x7FF, 0) => (sign | 0x7FFF, INTEGER_BIT),
        (0x7FF, _) => (sign | 0x7FFF, INTEGER_BIT | (man << 11)),
        (0, _) => {
            // Normalize an f64 subnormal: the x87 exponent range covers it.
            let top = 63 - man.leading_zeros();
            let exp = top as i32 - 1074;
            let field = (exp + 16383) as u16;
            (sign | field, man << (63 - top))
        }
        _ => {
            let field = (exp_field as i32 - F64_BIAS + 16383) as u16;
            (sign | field, INTEGER_BIT | (man << 11))
        }
    }
}

/// Bits of the IEEE binary128 encoding of `value`.
#[expect(
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    reason = "exponent is rebiased into 15 bits"
)]
fn fp128_bits(value: f64) -> u128 {
    const MAN_BITS: u32 = 112;
    let Parts {
        sign,
        exp_field,
        man,
    } = parts(value);
    let sign = u128::from(sign) << 127;
    let (field, man): (u128, u128) = match (exp_field, man) {
        (0, 0) => (0, 0),
        (0x7FF, _) => (0x7FFF, u128::from(man) << (MAN_BITS - F64_MAN_BITS)),
        (0, _) => {
            let top = 63 - man.leading_zeros();
            let exp = top as i32 - 1074;
            let frac = u128::from(man & !(1u64 << top));
            ((exp + 16383) as u128, frac << (MAN_BITS - top))
        }
        _ => (
            (exp_field as i32 - F64_BIAS + 16383) as u128,
            u128::from(man) << (MAN_BITS - F64_MAN_BITS),
        ),
    };
    sign | (field << MAN_BITS) | man
}

/// Six-digit `%e` form with a signed, at least two-digit exponent.
fn scientific(value: f64) -> String {
    let formatted = format!("{value:.6e}");
    let Some((mantissa, exp)) = formatted.split_once('e') else {
        return formatted;
    };
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exp),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

/// Append the textual form of a float constant of type `tag`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "narrow encodings fit their hex widths"
)]
pub(crate) fn push_float(buf: &mut String, tag: Tag, value: f64) {
    match tag {
        Tag::Half => {
            let bits = narrow_bits(value, HALF).unwrap_or_default() as u16;
            buf.push_str(&format!("0xH{bits:04X}"));
        }
        Tag::BFloat => {
            let bits = narrow_bits(value, BFLOAT).unwrap_or_default() as u16;
            buf.push_str(&format!("0xR{bits:04X}"));
        }
        Tag::X86Fp80 => {
            let (se, man) = x86_fp80_parts(value);
            buf.push_str(&format!("0xK{se:04X}{man:016X}"));
        }
        Tag::Fp128 => {
            let bits = fp128_bits(value);
            let lo = bits as u64;
            let hi = (bits >> 64) as u64;
            buf.push_str(&format!("0xL{lo:016X}{hi:016X}"));
        }
        Tag::PpcFp128 => {
            // High double carries the value, low double is zero.
            buf.push_str(&format!("0xM{:016X}{:016X}", value.to_bits(), 0u64));
        }
        _ => {
            if value.is_finite() {
                let decimal = scientific(value);
                if decimal
                    .parse::<f64>()
                    .is_ok_and(|back| back.to_bits() == value.to_bits())
                {
                    buf.push_str(&decimal);
                    return;
                }
            }
            buf.push_str(&format!("0x{:016X}", value.to_bits()));
        }
    }
}

#[cfg(test)]
mod tests;
