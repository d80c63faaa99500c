use super::*;

#[test]
fn primitive_range() {
    assert!(Idx::VOID.is_primitive());
    assert!(Idx::METADATA.is_primitive());
    assert!(!Idx::from_raw(Idx::PRIMITIVE_COUNT).is_primitive());
    assert!(!Idx::NONE.is_primitive());
}

#[test]
fn primitive_names() {
    assert_eq!(Idx::I1.name(), Some("i1"));
    assert_eq!(Idx::I32.name(), Some("i32"));
    assert_eq!(Idx::PPC_FP128.name(), Some("ppc_fp128"));
    assert_eq!(Idx::PTR.name(), Some("ptr"));
    assert_eq!(Idx::from_raw(100).name(), None);
}

#[test]
fn debug_output() {
    assert_eq!(format!("{:?}", Idx::I64), "Idx(i64)");
    assert_eq!(format!("{:?}", Idx::NONE), "Idx::NONE");
    assert_eq!(format!("{:?}", Idx::from_raw(40)), "Idx(40)");
}

#[test]
fn index_equality() {
    assert_eq!(Idx::I8, Idx::from_raw(2));
    assert_ne!(Idx::I8, Idx::I16);
    assert!(Idx::I8 < Idx::I16);
}
