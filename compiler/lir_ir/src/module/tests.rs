#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use lir_types::Idx;
use pretty_assertions::assert_eq;

use crate::{
    ArithFlags, BinaryOp, GlobalRef, IrError, Linkage, Module, Named, Value,
};

// Entities

#[test]
fn globals_carry_their_address() {
    let mut module = Module::new("m");
    let init = module.const_int(Idx::I32, 7).unwrap();
    let g = module.add_global("g", Idx::I32, Some(init)).unwrap();
    let global = module.global(g);
    assert_eq!(global.content_type(), Idx::I32);
    assert_eq!(global.initializer(), Some(init));
    assert_eq!(global.linkage(), Linkage::External);
    assert_eq!(module.type_of(Value::Const(global.address())), Idx::PTR);
    assert_eq!(module.global_address(GlobalRef::Var(g)), global.address());
}

#[test]
fn global_in_addrspace_has_matching_pointer() {
    let mut module = Module::new("m");
    let g = module.add_global_in("g", Idx::I8, None, 3).unwrap();
    let addr = module.global(g).address();
    assert_eq!(module.ident(Value::Const(addr)), "@g");
    assert_eq!(module.display(Value::Const(addr)).to_string(), "ptr addrspace(3) @g");
}

#[test]
fn initializer_type_must_match() {
    let mut module = Module::new("m");
    let wide = module.const_int(Idx::I64, 1).unwrap();
    assert_eq!(
        module.add_global("g", Idx::I32, Some(wide)).unwrap_err(),
        IrError::TypeMismatch {
            expected: "i32".to_owned(),
            found: "i64".to_owned()
        }
    );
    let g = module.add_global("g", Idx::I32, None).unwrap();
    assert!(module.set_initializer(g, Some(wide)).is_err());
    assert_eq!(module.global(g).initializer(), None);
    assert!(module.add_global("bad", Idx::VOID, None).is_err());
}

#[test]
fn functions_and_blocks() {
    let mut module = Module::new("m");
    let sig = module.types_mut().function(&[Idx::I32, Idx::PTR], Idx::VOID, false);
    let f = module.add_function("f", sig).unwrap();
    assert!(module.function(f).is_declaration());
    assert_eq!(module.function(f).params().len(), 2);
    let p1 = module.param(f, 1).unwrap();
    assert_eq!(module.type_of(Value::Param(p1)), Idx::PTR);
    assert_eq!(module.param_parent(p1), f);
    assert_eq!(module.param(f, 2), None);

    let entry = module.add_block(f, "entry");
    assert!(!module.function(f).is_declaration());
    assert_eq!(module.block_parent(entry), f);
    assert_eq!(module.function(f).blocks(), &[entry]);

    assert!(matches!(
        module.add_function("g", Idx::I32),
        Err(IrError::ExpectedFunctionType { .. })
    ));
}

#[test]
fn aliases_and_ifuncs() {
    let mut module = Module::new("m");
    let g = module.add_global("g", Idx::I32, None).unwrap();
    let addr = module.global(g).address();
    let a = module.add_alias("a", Idx::I32, addr).unwrap();
    assert_eq!(module.alias(a).aliasee(), addr);

    let one = module.const_int(Idx::I32, 1).unwrap();
    assert_eq!(
        module.add_alias("bad", Idx::I32, one).unwrap_err(),
        IrError::TypeMismatch {
            expected: "ptr".to_owned(),
            found: "i32".to_owned()
        }
    );

    let sig = module.types_mut().function(&[], Idx::PTR, false);
    let resolver = module.add_function("resolve", sig).unwrap();
    let resolver_addr = module.function(resolver).address();
    let target = module.types_mut().function(&[], Idx::VOID, false);
    let i = module.add_ifunc("i", target, resolver_addr).unwrap();
    assert_eq!(module.ifunc(i).resolver(), resolver_addr);
    assert!(module.add_ifunc("bad", Idx::PTR, resolver_addr).is_err());
}

#[test]
fn linkage_and_lookup() {
    let mut module = Module::new("m");
    let g = module.add_global("g", Idx::I32, None).unwrap();
    let sig = module.types_mut().function(&[], Idx::VOID, false);
    let f = module.add_function("f", sig).unwrap();

    module.set_linkage(g.into(), Linkage::Internal);
    assert_eq!(module.linkage(g.into()), Linkage::Internal);
    assert_eq!(module.lookup_global("g"), Some(GlobalRef::Var(g)));
    assert_eq!(module.lookup_global("f"), Some(GlobalRef::Func(f)));
    assert_eq!(module.lookup_global("h"), None);

    module.set_name(Named::from(f), "h");
    assert_eq!(module.lookup_global("h"), Some(GlobalRef::Func(f)));
    assert_eq!(module.lookup_global("f"), None);
}

// Numbering

#[test]
fn numbering_follows_layout() {
    let mut module = Module::new("m");
    let sig = module.types_mut().function(&[Idx::I32, Idx::I32], Idx::I32, false);
    let f = module.add_function("f", sig).unwrap();
    let a = module.param(f, 0).unwrap();
    let b = module.param(f, 1).unwrap();
    module.set_name(b.into(), "b");
    let entry = module.add_block(f, "");
    let sum = module
        .build_binary(entry, BinaryOp::Add, ArithFlags::empty(), a.into(), b.into())
        .unwrap();
    module.build_ret(entry, Some(sum.into())).unwrap();
    let anon = module.add_global("", Idx::I8, None).unwrap();

    module.number_values();
    assert_eq!(module.ident(a.into()), "%0");
    assert_eq!(module.ident(b.into()), "%b");
    assert_eq!(module.ident(Value::Block(entry)), "%1");
    assert_eq!(module.ident(sum.into()), "%2");
    assert_eq!(module.ident(Value::Const(module.global(anon).address())), "@0");
}

// Printing

#[test]
fn empty_module() {
    let module = Module::new("empty");
    assert_eq!(module.print(), "; ModuleID = 'empty'\n");
}

#[test]
fn prints_sections_in_order() {
    let mut module = Module::new("demo");
    let pair = module.types_mut().named_struct("pair").unwrap();
    module
        .types_mut()
        .set_struct_body(pair, &[Idx::I32, Idx::I32], false)
        .unwrap();
    let seven = module.const_int(Idx::I32, 7).unwrap();
    let g = module.add_global("counter", Idx::I32, Some(seven)).unwrap();
    module.set_linkage(g.into(), Linkage::Internal);
    let ext = module.add_global("ext", Idx::I64, None).unwrap();
    let greeting = module.const_string("hi\n");
    let greeting_ty = module.type_of(Value::Const(greeting));
    let s = module.add_global("str", greeting_ty, Some(greeting)).unwrap();
    module.set_global_constant(s, true);
    module.set_linkage(s.into(), Linkage::Private);
    let ext_addr = module.global(ext).address();
    module.add_alias("ext.alias", Idx::I64, ext_addr).unwrap();

    let decl_sig = module.types_mut().function(&[Idx::PTR], Idx::I32, true);
    module.add_function("printf", decl_sig).unwrap();

    assert_eq!(
        module.print(),
        "; ModuleID = 'demo'\n\
         \n\
         %pair = type { i32, i32 }\n\
         \n\
         @counter = internal global i32 7\n\
         @ext = external global i64\n\
         @str = private constant [3 x i8] c\"hi\\0A\"\n\
         \n\
         @ext.alias = alias i64, ptr @ext\n\
         \n\
         declare i32 @printf(ptr, ...)\n"
    );
}

#[test]
fn display_matches_print() {
    let mut module = Module::new("m");
    let yes = module.const_bool(true);
    module.add_global("g", Idx::I1, Some(yes)).unwrap();
    assert_eq!(module.to_string(), module.print());
    assert!(module.print().ends_with("@g = global i1 true\n"));
}
