use super::*;

#[test]
fn tag_values_in_expected_ranges() {
    // Primitives: 0-15
    assert!((Tag::Void as u8) < 16);
    assert!((Tag::Metadata as u8) < 16);

    // Parameterized scalars: 16-31
    assert!((16..32).contains(&(Tag::Int as u8)));
    assert!((16..32).contains(&(Tag::Pointer as u8)));

    // Sequential: 32-47
    assert!((32..48).contains(&(Tag::Array as u8)));
    assert!((32..48).contains(&(Tag::Vector as u8)));

    // Structural: 48-63
    assert!((48..64).contains(&(Tag::Struct as u8)));
    assert!((48..64).contains(&(Tag::Function as u8)));

    // Identified: 80-95
    assert!((80..96).contains(&(Tag::NamedStruct as u8)));
}

#[test]
fn uses_extra_is_correct() {
    assert!(!Tag::Int.uses_extra());
    assert!(!Tag::Pointer.uses_extra());
    assert!(!Tag::NamedStruct.uses_extra());

    assert!(Tag::Array.uses_extra());
    assert!(Tag::Vector.uses_extra());
    assert!(Tag::Struct.uses_extra());
    assert!(Tag::Function.uses_extra());
}

#[test]
fn float_kinds() {
    for tag in [
        Tag::Half,
        Tag::BFloat,
        Tag::Float,
        Tag::Double,
        Tag::X86Fp80,
        Tag::Fp128,
        Tag::PpcFp128,
    ] {
        assert!(tag.is_float(), "{tag:?}");
    }
    assert!(!Tag::Int.is_float());
    assert!(!Tag::Pointer.is_float());
}

#[test]
fn struct_kinds() {
    assert!(Tag::Struct.is_struct());
    assert!(Tag::NamedStruct.is_struct());
    assert!(!Tag::Array.is_struct());
}
