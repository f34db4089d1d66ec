use std::collections::HashMap;
use std::rc::Rc;

/// A class, named in internal (slash-separated) form.
#[derive(Debug, PartialEq, Eq)]
pub struct ClassSymbol {
    pub name: Rc<str>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ModuleSymbol {
    pub name: Rc<str>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct PackageSymbol {
    pub name: Rc<str>,
}

/// Materializes symbols for names decoded out of a constant pool. The pool
/// reader only decodes bytes to names and indices; which symbol a name maps
/// to is this collaborator's decision.
pub trait SymbolTable {
    fn enter_class(&mut self, name: Rc<str>) -> Rc<ClassSymbol>;
    fn enter_module(&mut self, name: Rc<str>) -> Rc<ModuleSymbol>;
    fn enter_package(&mut self, name: Rc<str>) -> Rc<PackageSymbol>;
}

impl<T: SymbolTable + ?Sized> SymbolTable for &mut T {
    fn enter_class(&mut self, name: Rc<str>) -> Rc<ClassSymbol> {
        (**self).enter_class(name)
    }

    fn enter_module(&mut self, name: Rc<str>) -> Rc<ModuleSymbol> {
        (**self).enter_module(name)
    }

    fn enter_package(&mut self, name: Rc<str>) -> Rc<PackageSymbol> {
        (**self).enter_package(name)
    }
}

/// Interning symbol table: one symbol per distinct name.
#[derive(Debug, Default)]
pub struct Symtab {
    classes: HashMap<Rc<str>, Rc<ClassSymbol>>,
    modules: HashMap<Rc<str>, Rc<ModuleSymbol>>,
    packages: HashMap<Rc<str>, Rc<PackageSymbol>>,
}

impl Symtab {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SymbolTable for Symtab {
    fn enter_class(&mut self, name: Rc<str>) -> Rc<ClassSymbol> {
        Rc::clone(
            self.classes
                .entry(Rc::clone(&name))
                .or_insert_with(|| Rc::new(ClassSymbol { name })),
        )
    }

    fn enter_module(&mut self, name: Rc<str>) -> Rc<ModuleSymbol> {
        Rc::clone(
            self.modules
                .entry(Rc::clone(&name))
                .or_insert_with(|| Rc::new(ModuleSymbol { name })),
        )
    }

    fn enter_package(&mut self, name: Rc<str>) -> Rc<PackageSymbol> {
        Rc::clone(
            self.packages
                .entry(Rc::clone(&name))
                .or_insert_with(|| Rc::new(PackageSymbol { name })),
        )
    }
}
