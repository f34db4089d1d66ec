//! Loadable constants and the key model used to deduplicate dynamic
//! entries when a pool is written back out.
//!
//! These are pure values with no resolver dependency. A pool writer compares
//! [`PoolKey`]s (not the constants themselves) to decide whether two
//! constants would produce the same pool entry; for dynamic constants that
//! comparison is what keeps the `BootstrapMethods` table free of duplicates.

use std::rc::Rc;

use crate::tag;

/// A (name, type descriptor) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameAndType {
    pub name: Rc<str>,
    pub descriptor: Rc<str>,
}

impl NameAndType {
    pub fn pool_tag(&self) -> u8 {
        tag::CONSTANT_NAME_AND_TYPE
    }

    pub fn pool_key(&self) -> PoolKey {
        PoolKey::NameAndType(Rc::clone(&self.name), Rc::clone(&self.descriptor))
    }
}

/// A method handle reference: reference kind (1..=9), the owning class in
/// internal form, and the referenced member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodHandleConstant {
    pub kind: u8,
    pub owner: Rc<str>,
    pub name_and_type: NameAndType,
}

/// Whether a dynamic entry produces a constant (condy) or a call site
/// (invokedynamic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DynamicKind {
    Constant,
    CallSite,
}

/// An invokedynamic / constant-dynamic reference: the dynamic entry's own
/// (name, type) plus the bootstrap method specification that resolves it.
/// Bootstrap methods and their static arguments are acyclic by construction
/// in the class file format, so key derivation below cannot recurse forever.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicConstant {
    pub kind: DynamicKind,
    pub name_and_type: NameAndType,
    pub bootstrap_method: LoadableConstant,
    pub static_args: Vec<LoadableConstant>,
}

impl DynamicConstant {
    pub fn bsm_key(&self) -> BsmKey {
        BsmKey::new(&self.bootstrap_method, &self.static_args)
    }
}

/// A constant usable as the operand of an `ldc`-style instruction or as a
/// bootstrap method static argument.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadableConstant {
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    String(Rc<str>),
    Class(Rc<str>),
    MethodType(Rc<str>),
    MethodHandle(MethodHandleConstant),
    Dynamic(Rc<DynamicConstant>),
}

impl LoadableConstant {
    /// The wire tag this constant is written with.
    pub fn pool_tag(&self) -> u8 {
        match self {
            LoadableConstant::Integer(_) => tag::CONSTANT_INTEGER,
            LoadableConstant::Float(_) => tag::CONSTANT_FLOAT,
            LoadableConstant::Long(_) => tag::CONSTANT_LONG,
            LoadableConstant::Double(_) => tag::CONSTANT_DOUBLE,
            LoadableConstant::String(_) => tag::CONSTANT_STRING,
            LoadableConstant::Class(_) => tag::CONSTANT_CLASS,
            LoadableConstant::MethodType(_) => tag::CONSTANT_METHOD_TYPE,
            LoadableConstant::MethodHandle(_) => tag::CONSTANT_METHOD_HANDLE,
            LoadableConstant::Dynamic(dynamic) => match dynamic.kind {
                DynamicKind::Constant => tag::CONSTANT_DYNAMIC,
                DynamicKind::CallSite => tag::CONSTANT_INVOKE_DYNAMIC,
            },
        }
    }

    /// The comparable identity used for write-side deduplication.
    pub fn pool_key(&self) -> PoolKey {
        match self {
            LoadableConstant::Integer(value) => PoolKey::Integer(*value),
            // Floats key by raw bits so equal bit patterns collapse to one
            // entry and NaN does not defeat interning.
            LoadableConstant::Float(value) => PoolKey::Float(value.to_bits()),
            LoadableConstant::Long(value) => PoolKey::Long(*value),
            LoadableConstant::Double(value) => PoolKey::Double(value.to_bits()),
            LoadableConstant::String(value) => PoolKey::String(Rc::clone(value)),
            LoadableConstant::Class(name) => PoolKey::Class(Rc::clone(name)),
            LoadableConstant::MethodType(descriptor) => {
                PoolKey::MethodType(Rc::clone(descriptor))
            }
            LoadableConstant::MethodHandle(handle) => PoolKey::MethodHandle(
                handle.kind,
                Rc::clone(&handle.owner),
                handle.name_and_type.clone(),
            ),
            LoadableConstant::Dynamic(dynamic) => PoolKey::Bsm(dynamic.bsm_key()),
        }
    }
}

/// Opaque, comparable identity of a pool constant. Equality and hashing are
/// by value; nothing here depends on object identity or byte layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PoolKey {
    Integer(i32),
    Float(u32),
    Long(i64),
    Double(u64),
    String(Rc<str>),
    Class(Rc<str>),
    MethodType(Rc<str>),
    MethodHandle(u8, Rc<str>, NameAndType),
    NameAndType(Rc<str>, Rc<str>),
    Bsm(BsmKey),
}

/// Identity of a bootstrap method specification: the bootstrap method's own
/// key plus the keys of its static arguments in declaration order. Two
/// dynamic constants whose `BsmKey`s are equal would produce the same
/// `BootstrapMethods` entry, whatever their object identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BsmKey {
    bootstrap_method: Box<PoolKey>,
    static_args: Vec<PoolKey>,
}

impl BsmKey {
    pub fn new(bootstrap_method: &LoadableConstant, static_args: &[LoadableConstant]) -> Self {
        Self {
            bootstrap_method: Box::new(bootstrap_method.pool_key()),
            static_args: static_args.iter().map(LoadableConstant::pool_key).collect(),
        }
    }
}

#[cfg(test)]
mod bsm_key_tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use super::*;

    fn metafactory() -> LoadableConstant {
        LoadableConstant::MethodHandle(MethodHandleConstant {
            kind: 6,
            owner: Rc::from("java/lang/invoke/LambdaMetafactory"),
            name_and_type: NameAndType {
                name: Rc::from("metafactory"),
                descriptor: Rc::from("(Ljava/lang/invoke/MethodHandles$Lookup;...)"),
            },
        })
    }

    fn indy(static_args: Vec<LoadableConstant>) -> DynamicConstant {
        DynamicConstant {
            kind: DynamicKind::CallSite,
            name_and_type: NameAndType {
                name: Rc::from("run"),
                descriptor: Rc::from("()Ljava/lang/Runnable;"),
            },
            bootstrap_method: metafactory(),
            static_args,
        }
    }

    fn hash_of(key: &BsmKey) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn it_should_consider_independently_built_constants_equal() {
        let args = || {
            vec![
                LoadableConstant::MethodType(Rc::from("()V")),
                LoadableConstant::Integer(5),
            ]
        };
        let a = indy(args()).bsm_key();
        let b = indy(args()).bsm_key();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn it_should_distinguish_argument_order() {
        let x = LoadableConstant::Integer(1);
        let y = LoadableConstant::Integer(2);
        let a = indy(vec![x.clone(), y.clone()]).bsm_key();
        let b = indy(vec![y, x]).bsm_key();
        assert_ne!(a, b);
    }

    #[test]
    fn it_should_distinguish_bootstrap_methods() {
        let mut other = indy(vec![]);
        other.bootstrap_method = LoadableConstant::MethodHandle(MethodHandleConstant {
            kind: 8,
            owner: Rc::from("java/lang/invoke/StringConcatFactory"),
            name_and_type: NameAndType {
                name: Rc::from("makeConcat"),
                descriptor: Rc::from("(...)"),
            },
        });
        assert_ne!(indy(vec![]).bsm_key(), other.bsm_key());
    }

    #[test]
    fn it_should_key_nested_dynamic_arguments_recursively() {
        let condy = |value| {
            LoadableConstant::Dynamic(Rc::new(DynamicConstant {
                kind: DynamicKind::Constant,
                name_and_type: NameAndType {
                    name: Rc::from("x"),
                    descriptor: Rc::from("I"),
                },
                bootstrap_method: metafactory(),
                static_args: vec![LoadableConstant::Integer(value)],
            }))
        };
        assert_eq!(
            indy(vec![condy(7)]).bsm_key(),
            indy(vec![condy(7)]).bsm_key()
        );
        assert_ne!(
            indy(vec![condy(7)]).bsm_key(),
            indy(vec![condy(8)]).bsm_key()
        );
    }

    #[test]
    fn it_should_key_floats_by_bits() {
        assert_eq!(
            LoadableConstant::Float(f32::NAN).pool_key(),
            LoadableConstant::Float(f32::NAN).pool_key()
        );
        assert_ne!(
            LoadableConstant::Double(0.0).pool_key(),
            LoadableConstant::Double(-0.0).pool_key()
        );
    }

    #[test]
    fn it_should_report_the_wire_tag_per_dynamic_kind() {
        let call_site = indy(vec![]);
        let mut constant = indy(vec![]);
        constant.kind = DynamicKind::Constant;
        assert_eq!(
            LoadableConstant::Dynamic(Rc::new(call_site)).pool_tag(),
            crate::tag::CONSTANT_INVOKE_DYNAMIC
        );
        assert_eq!(
            LoadableConstant::Dynamic(Rc::new(constant)).pool_tag(),
            crate::tag::CONSTANT_DYNAMIC
        );
    }
}
