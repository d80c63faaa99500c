#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use lir_types::Idx;
use pretty_assertions::assert_eq;

use crate::{
    ArithFlags, BinaryOp, BlockId, CastOp, FloatPredicate, FuncId, InstKind, IntPredicate,
    IrError, Module, Value,
};

/// `define <ret> @f(<params>)` with one block named `entry`; params named a, b, ...
fn function(module: &mut Module, params: &[Idx], ret: Idx) -> (FuncId, BlockId) {
    let sig = module.types_mut().function(params, ret, false);
    let f = module.add_function("f", sig).unwrap();
    for (i, name) in ["a", "b", "c"].iter().enumerate().take(params.len()) {
        let param = module.param(f, i).unwrap();
        module.set_name(param.into(), *name);
    }
    let entry = module.add_block(f, "entry");
    (f, entry)
}

fn param(module: &Module, f: FuncId, index: usize) -> Value {
    module.param(f, index).unwrap().into()
}

// Arithmetic and comparison

#[test]
fn binary_with_flags() {
    let mut module = Module::new("m");
    let (f, entry) = function(&mut module, &[Idx::I32, Idx::I32], Idx::VOID);
    let (a, b) = (param(&module, f, 0), param(&module, f, 1));
    let sum = module
        .build_binary(entry, BinaryOp::Add, ArithFlags::NUW | ArithFlags::NSW, a, b)
        .unwrap();
    module.set_name(sum.into(), "sum");
    assert_eq!(module.format_inst(sum), "%sum = add nuw nsw i32 %a, %b");
    assert_eq!(module.inst_kind(sum), InstKind::Binary(BinaryOp::Add, ArithFlags::NUW | ArithFlags::NSW));
    assert_eq!(module.inst_parent(sum), entry);
    assert_eq!(module.type_of(sum.into()), Idx::I32);
}

#[test]
fn binary_type_errors_leave_block_untouched() {
    let mut module = Module::new("m");
    let (f, entry) = function(&mut module, &[Idx::I32, Idx::I64], Idx::VOID);
    let (a, b) = (param(&module, f, 0), param(&module, f, 1));
    assert!(matches!(
        module.build_binary(entry, BinaryOp::Add, ArithFlags::empty(), a, b),
        Err(IrError::TypeMismatch { .. })
    ));
    assert!(module.block_insts(entry).is_empty());
}

#[test]
fn comparisons_and_casts() {
    let mut module = Module::new("m");
    let (f, entry) = function(&mut module, &[Idx::I64, Idx::DOUBLE], Idx::VOID);
    let (a, b) = (param(&module, f, 0), param(&module, f, 1));
    let zero = Value::Const(module.const_int(Idx::I64, 0).unwrap());
    let cmp = module.build_icmp(entry, IntPredicate::Slt, a, zero).unwrap();
    let fcmp = module.build_fcmp(entry, FloatPredicate::Oge, b, b).unwrap();
    let narrow = module.build_cast(entry, CastOp::Trunc, a, Idx::I32).unwrap();
    let neg = module.build_fneg(entry, b).unwrap();
    let pick = module.build_select(entry, cmp.into(), a, zero).unwrap();
    module.number_values();

    assert_eq!(module.format_inst(cmp), "%0 = icmp slt i64 %a, 0");
    assert_eq!(module.format_inst(fcmp), "%1 = fcmp oge double %b, %b");
    assert_eq!(module.format_inst(narrow), "%2 = trunc i64 %a to i32");
    assert_eq!(module.format_inst(neg), "%3 = fneg double %b");
    assert_eq!(module.format_inst(pick), "%4 = select i1 %0, i64 %a, i64 0");
    assert_eq!(module.type_of(cmp.into()), Idx::I1);
    assert!(module.build_cast(entry, CastOp::ZExt, a, Idx::I32).is_err());
}

// Memory

#[test]
fn memory_instructions() {
    let mut module = Module::new("m");
    let (f, entry) = function(&mut module, &[Idx::I32], Idx::VOID);
    let a = param(&module, f, 0);
    let slot = module.build_alloca(entry, Idx::I32).unwrap();
    module.set_name(slot.into(), "slot");
    let store = module.build_store(entry, a, slot.into()).unwrap();
    let load = module.build_load(entry, Idx::I32, slot.into()).unwrap();
    module.set_name(load.into(), "v");

    assert_eq!(module.format_inst(slot), "%slot = alloca i32");
    assert_eq!(module.format_inst(store), "store i32 %a, ptr %slot");
    assert_eq!(module.format_inst(load), "%v = load i32, ptr %slot");
    assert_eq!(module.named(store.into()), None);

    assert!(module.build_load(entry, Idx::I32, a).is_err());
    assert!(module.build_store(entry, a, a).is_err());
    assert!(module.build_alloca(entry, Idx::VOID).is_err());
    assert!(module.build_load(entry, Idx::LABEL, slot.into()).is_err());
}

// Calls

#[test]
fn call_checks_arguments() {
    let mut module = Module::new("m");
    let (f, entry) = function(&mut module, &[Idx::I32], Idx::VOID);
    let a = param(&module, f, 0);
    let callee_sig = module.types_mut().function(&[Idx::I32], Idx::I32, false);
    let g = module.add_function("g", callee_sig).unwrap();
    let g_addr = Value::Const(module.function(g).address());

    let call = module.build_call(entry, callee_sig, g_addr, &[a]).unwrap();
    module.set_name(call.into(), "r");
    assert_eq!(module.format_inst(call), "%r = call i32 @g(i32 %a)");

    assert!(matches!(
        module.build_call(entry, callee_sig, g_addr, &[]),
        Err(IrError::InvalidOperation { op: "call", .. })
    ));
    let wide = Value::Const(module.const_int(Idx::I64, 1).unwrap());
    assert!(matches!(
        module.build_call(entry, callee_sig, g_addr, &[wide]),
        Err(IrError::TypeMismatch { .. })
    ));
    assert!(matches!(
        module.build_call(entry, Idx::I32, g_addr, &[a]),
        Err(IrError::ExpectedFunctionType { .. })
    ));
}

#[test]
fn variadic_call_prints_full_type() {
    let mut module = Module::new("m");
    let (f, entry) = function(&mut module, &[Idx::PTR], Idx::VOID);
    let fmt = param(&module, f, 0);
    let sig = module.types_mut().function(&[Idx::PTR], Idx::I32, true);
    let printf = module.add_function("printf", sig).unwrap();
    let callee = Value::Const(module.function(printf).address());
    let seven = Value::Const(module.const_int(Idx::I32, 7).unwrap());
    let call = module.build_call(entry, sig, callee, &[fmt, seven]).unwrap();
    module.number_values();
    assert_eq!(
        module.format_inst(call),
        "%0 = call i32 (ptr, ...) @printf(ptr %a, i32 7)"
    );
}

// Control flow

#[test]
fn terminators_close_the_block() {
    let mut module = Module::new("m");
    let (f, entry) = function(&mut module, &[Idx::I1], Idx::VOID);
    let cond = param(&module, f, 0);
    let then_bb = module.add_block(f, "then");
    let else_bb = module.add_block(f, "else");
    let br = module.build_cond_br(entry, cond, then_bb, else_bb).unwrap();
    assert_eq!(module.format_inst(br), "br i1 %a, label %then, label %else");
    assert_eq!(module.terminator(entry), Some(br));

    assert_eq!(
        module.build_unreachable(entry).unwrap_err(),
        IrError::BlockTerminated {
            block: "%entry".to_owned()
        }
    );
    let jump = module.build_br(then_bb, else_bb).unwrap();
    assert_eq!(module.format_inst(jump), "br label %else");
    let ret = module.build_ret(else_bb, None).unwrap();
    assert_eq!(module.format_inst(ret), "ret void");
}

#[test]
fn ret_matches_return_type() {
    let mut module = Module::new("m");
    let (f, entry) = function(&mut module, &[Idx::I32], Idx::I32);
    let a = param(&module, f, 0);
    assert!(matches!(module.build_ret(entry, None), Err(IrError::TypeMismatch { .. })));
    let wide = Value::Const(module.const_int(Idx::I64, 0).unwrap());
    assert!(module.build_ret(entry, Some(wide)).is_err());
    let ret = module.build_ret(entry, Some(a)).unwrap();
    assert_eq!(module.format_inst(ret), "ret i32 %a");
}

#[test]
fn branches_stay_within_the_function() {
    let mut module = Module::new("m");
    let (_, entry) = function(&mut module, &[], Idx::VOID);
    let sig = module.types_mut().function(&[], Idx::VOID, false);
    let other = module.add_function("other", sig).unwrap();
    let foreign = module.add_block(other, "x");
    assert!(matches!(
        module.build_br(entry, foreign),
        Err(IrError::InvalidOperation { op: "br", .. })
    ));
}

#[test]
fn phi_lists_incoming_pairs() {
    let mut module = Module::new("m");
    let (f, entry) = function(&mut module, &[Idx::I32], Idx::I32);
    let a = param(&module, f, 0);
    let join = module.add_block(f, "join");
    let zero = Value::Const(module.const_int(Idx::I32, 0).unwrap());
    let phi = module
        .build_phi(join, Idx::I32, &[(a, entry), (zero, join)])
        .unwrap();
    module.set_name(phi.into(), "p");
    assert_eq!(module.format_inst(phi), "%p = phi i32 [ %a, %entry ], [ 0, %join ]");
    let wide = Value::Const(module.const_int(Idx::I64, 0).unwrap());
    assert!(module.build_phi(join, Idx::I32, &[(wide, entry)]).is_err());
}

#[test]
fn switch_cases() {
    let mut module = Module::new("m");
    let (f, entry) = function(&mut module, &[Idx::I32], Idx::VOID);
    let a = param(&module, f, 0);
    let default = module.add_block(f, "default");
    let one_bb = module.add_block(f, "one");
    let one = module.const_int(Idx::I32, 1).unwrap();
    let sw = module
        .build_switch(entry, a, default, &[(one, one_bb)])
        .unwrap();
    assert_eq!(
        module.format_inst(sw),
        "switch i32 %a, label %default [\n    i32 1, label %one\n  ]"
    );
    assert!(module.inst_kind(sw).requires_constant(2));
    assert!(!module.inst_kind(sw).requires_constant(3));

    let wide = module.const_int(Idx::I64, 1).unwrap();
    assert!(module.build_switch(default, a, one_bb, &[(wide, one_bb)]).is_err());
    let ptr = Value::Const(module.const_null(Idx::PTR).unwrap());
    assert!(module.build_switch(default, ptr, one_bb, &[]).is_err());
}

#[test]
fn switch_rejects_duplicate_cases() {
    let mut module = Module::new("m");
    let (f, entry) = function(&mut module, &[Idx::I8], Idx::VOID);
    let a = param(&module, f, 0);
    let default = module.add_block(f, "default");
    let other = module.add_block(f, "other");
    let one = module.const_int(Idx::I8, 1).unwrap();
    let err = module
        .build_switch(entry, a, default, &[(one, other), (one, default)])
        .unwrap_err();
    assert!(matches!(err, IrError::InvalidOperation { op: "switch", .. }));

    // 200 and -56 share a bit pattern in i8.
    let unsigned = module.const_int(Idx::I8, 200).unwrap();
    let signed = module.const_int(Idx::I8, -56).unwrap();
    assert!(matches!(
        module.build_switch(entry, a, default, &[(unsigned, other), (signed, default)]),
        Err(IrError::InvalidOperation { op: "switch", .. })
    ));
    assert!(module.block_insts(entry).is_empty());

    let sw = module
        .build_switch(entry, a, default, &[(unsigned, other), (one, default)])
        .unwrap();
    assert_eq!(
        module.format_inst(sw),
        "switch i8 %a, label %default [\n    i8 200, label %other\n    i8 1, label %default\n  ]"
    );
}
