#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use lir_types::Idx;
use pretty_assertions::assert_eq;

use crate::{
    ArithFlags, BinaryOp, CastOp, ConstId, ExprOp, IntPredicate, IrError, Module, Value,
};

fn int(module: &mut Module, ty: Idx, value: i64) -> Value {
    Value::Const(module.const_int(ty, value).unwrap())
}

fn printed(module: &Module, id: ConstId) -> String {
    module.display(Value::Const(id)).to_string()
}

#[test]
fn expressions_are_not_folded() {
    let mut module = Module::new("m");
    let one = int(&mut module, Idx::I32, 1);
    let two = int(&mut module, Idx::I32, 2);
    let sum = module
        .const_expr(ExprOp::Binary(BinaryOp::Add, ArithFlags::NUW), &[one, two])
        .unwrap();
    assert_eq!(printed(&module, sum), "i32 add nuw (i32 1, i32 2)");
    assert_eq!(
        module.const_expr(ExprOp::Binary(BinaryOp::Add, ArithFlags::NUW), &[one, two]).unwrap(),
        sum
    );
}

#[test]
fn cast_and_compare() {
    let mut module = Module::new("m");
    let wide = int(&mut module, Idx::I64, 300);
    let narrow = module
        .const_expr(ExprOp::Cast(CastOp::Trunc, Idx::I32), &[wide])
        .unwrap();
    assert_eq!(printed(&module, narrow), "i32 trunc (i64 300 to i32)");

    let g = module.add_global("g", Idx::I32, None).unwrap();
    let addr = Value::Const(module.global(g).address());
    let null = Value::Const(module.const_null(Idx::PTR).unwrap());
    let cmp = module
        .const_expr(ExprOp::ICmp(IntPredicate::Eq), &[addr, null])
        .unwrap();
    assert_eq!(printed(&module, cmp), "i1 icmp eq (ptr @g, ptr null)");
}

#[test]
fn gep_over_a_global_string() {
    let mut module = Module::new("m");
    let text = module.const_string("hey\0");
    let ty = module.consts.ty(text);
    let s = module.add_global("s", ty, Some(text)).unwrap();
    module.set_global_constant(s, true);
    let base = Value::Const(module.global(s).address());
    let zero = int(&mut module, Idx::I64, 0);
    let one = int(&mut module, Idx::I64, 1);
    let gep = module
        .const_expr(
            ExprOp::GetElementPtr {
                source: ty,
                inbounds: true,
            },
            &[base, zero, one],
        )
        .unwrap();
    assert_eq!(
        printed(&module, gep),
        "ptr getelementptr inbounds ([4 x i8], ptr @s, i64 0, i64 1)"
    );
}

#[test]
fn runtime_operand_is_rejected() {
    let mut module = Module::new("m");
    let sig = module.types_mut().function(&[Idx::I32], Idx::I32, false);
    let f = module.add_function("f", sig).unwrap();
    let x = module.param(f, 0).unwrap();
    module.set_name(x.into(), "x");
    let one = int(&mut module, Idx::I32, 1);
    let before = module.const_count();

    let err = module
        .const_expr(
            ExprOp::Binary(BinaryOp::Add, ArithFlags::empty()),
            &[one, Value::Param(x)],
        )
        .unwrap_err();
    assert_eq!(
        err,
        IrError::NonConstantOperand {
            context: "add",
            index: 1,
            operand: "i32 %x".to_owned(),
        }
    );
    assert_eq!(module.const_count(), before);
}

#[test]
fn operand_count_and_types_are_checked() {
    let mut module = Module::new("m");
    let one = int(&mut module, Idx::I32, 1);
    let wide = int(&mut module, Idx::I64, 1);
    let add = ExprOp::Binary(BinaryOp::Add, ArithFlags::empty());
    assert!(matches!(
        module.const_expr(add, &[one]),
        Err(IrError::InvalidOperation { op: "add", .. })
    ));
    assert!(matches!(
        module.const_expr(add, &[one, wide]),
        Err(IrError::TypeMismatch { .. })
    ));
    assert!(module
        .const_expr(ExprOp::Cast(CastOp::ZExt, Idx::I32), &[wide])
        .is_err());
}

#[test]
fn vector_expressions() {
    let mut module = Module::new("m");
    let v2 = module.types_mut().vector(2, Idx::I32);
    let zero = module.const_zero(v2).unwrap();
    let idx = int(&mut module, Idx::I32, 1);
    let elem = module
        .const_expr(ExprOp::ExtractElement, &[Value::Const(zero), idx])
        .unwrap();
    assert_eq!(
        printed(&module, elem),
        "i32 extractelement (<2 x i32> zeroinitializer, i32 1)"
    );
}
