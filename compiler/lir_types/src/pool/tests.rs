use super::*;

#[test]
fn primitives_at_correct_indices() {
    let pool = Pool::new();

    assert_eq!(pool.tag(Idx::VOID), Tag::Void);
    assert_eq!(pool.tag(Idx::I1), Tag::Int);
    assert_eq!(pool.data(Idx::I1), 1);
    assert_eq!(pool.data(Idx::I128), 128);
    assert_eq!(pool.tag(Idx::HALF), Tag::Half);
    assert_eq!(pool.tag(Idx::DOUBLE), Tag::Double);
    assert_eq!(pool.tag(Idx::PPC_FP128), Tag::PpcFp128);
    assert_eq!(pool.tag(Idx::PTR), Tag::Pointer);
    assert_eq!(pool.data(Idx::PTR), 0);
    assert_eq!(pool.tag(Idx::LABEL), Tag::Label);
    assert_eq!(pool.tag(Idx::TOKEN), Tag::Token);
    assert_eq!(pool.tag(Idx::METADATA), Tag::Metadata);
}

#[test]
fn pool_starts_with_primitives() {
    let pool = Pool::new();
    assert_eq!(pool.len(), Idx::PRIMITIVE_COUNT as usize);
    assert!(!pool.is_empty());
}

#[test]
fn primitive_flags_correct() {
    let pool = Pool::new();

    let int_flags = pool.flags(Idx::I32);
    assert!(int_flags.contains(TypeFlags::IS_PRIMITIVE));
    assert!(int_flags.is_int());
    assert!(int_flags.contains(TypeFlags::IS_FIRST_CLASS));

    assert!(pool.flags(Idx::FLOAT).is_float());
    assert!(pool.flags(Idx::PTR).is_pointer());
    assert!(!pool.flags(Idx::VOID).contains(TypeFlags::IS_FIRST_CLASS));
}

#[test]
fn primitive_names_match_formatting() {
    let pool = Pool::new();
    for raw in 0..Idx::PRIMITIVE_COUNT {
        let idx = Idx::from_raw(raw);
        assert_eq!(Some(pool.format_type(idx).as_str()), idx.name());
    }
}
