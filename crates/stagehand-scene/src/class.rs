use std::collections::HashMap;
use std::fmt;

use crate::error::{ScriptError, ScriptResult};
use crate::heap::{Handle, Heap};
use crate::value::Value;

/// Native method body: `(heap, receiver, args) -> result`.
pub type NativeMethod = fn(&mut Heap, Handle, &[Value]) -> ScriptResult<Value>;

/// Index into a [`ClassTable`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ClassId(usize);

/// Accepted argument count range.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Arity {
    min: usize,
    max: Option<usize>,
}

impl Arity {
    pub const fn exact(n: usize) -> Self {
        Self { min: n, max: Some(n) }
    }

    pub const fn range(min: usize, max: usize) -> Self {
        Self { min, max: Some(max) }
    }

    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    #[inline]
    pub fn accepts(self, given: usize) -> bool {
        given >= self.min && self.max.is_none_or(|max| given <= max)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{}", self.min),
            Some(max) => write!(f, "{}..{}", self.min, max),
            None => write!(f, "{}+", self.min),
        }
    }
}

#[derive(Clone, Copy)]
struct MethodEntry {
    func: NativeMethod,
    arity: Arity,
}

struct Class {
    name: String,
    superclass: Option<ClassId>,
    methods: HashMap<String, MethodEntry>,
}

/// Registry of classes with single inheritance.
pub struct ClassTable {
    classes: Vec<Class>,
    by_name: HashMap<String, ClassId>,
}

impl ClassTable {
    pub const ROOT: &'static str = "Object";

    pub fn new() -> Self {
        let mut table = Self {
            classes: Vec::new(),
            by_name: HashMap::new(),
        };
        table.define_class(Self::ROOT, None);
        table
    }

    /// Id of the root class every other class descends from.
    #[inline]
    pub fn root(&self) -> ClassId {
        ClassId(0)
    }

    /// Defines `name` or returns the existing class of that name.
    ///
    /// `superclass` defaults to the root class. Reopening an existing class
    /// keeps its original superclass.
    pub fn define_class(&mut self, name: &str, superclass: Option<ClassId>) -> ClassId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        let id = ClassId(self.classes.len());
        let superclass = superclass.or_else(|| (id.0 > 0).then_some(ClassId(0)));
        self.classes.push(Class {
            name: name.to_string(),
            superclass,
            methods: HashMap::new(),
        });
        self.by_name.insert(name.to_string(), id);
        log::trace!("defined class {name}");
        id
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    pub fn require(&self, name: &str) -> ScriptResult<ClassId> {
        self.lookup(name)
            .ok_or_else(|| ScriptError::UnknownClass(name.to_string()))
    }

    pub fn name(&self, id: ClassId) -> &str {
        self.classes.get(id.0).map_or("?", |c| c.name.as_str())
    }

    pub fn superclass(&self, id: ClassId) -> Option<ClassId> {
        self.classes.get(id.0).and_then(|c| c.superclass)
    }

    pub fn define_method(&mut self, class: ClassId, name: &str, arity: Arity, func: NativeMethod) {
        if let Some(c) = self.classes.get_mut(class.0) {
            c.methods.insert(name.to_string(), MethodEntry { func, arity });
        }
    }

    /// Makes `new_name` call whatever `existing` resolves to on `class` now.
    pub fn alias_method(&mut self, class: ClassId, new_name: &str, existing: &str) -> ScriptResult<()> {
        let entry = self.find(class, existing).ok_or_else(|| ScriptError::NoMethod {
            method: existing.to_string(),
            class: self.name(class).to_string(),
        })?;
        if let Some(c) = self.classes.get_mut(class.0) {
            c.methods.insert(new_name.to_string(), entry);
        }
        Ok(())
    }

    /// Resolves `name` on `class` or its nearest ancestor.
    pub fn find_method(&self, class: ClassId, name: &str) -> Option<(NativeMethod, Arity)> {
        self.find(class, name).map(|e| (e.func, e.arity))
    }

    #[inline]
    pub fn responds_to(&self, class: ClassId, name: &str) -> bool {
        self.find(class, name).is_some()
    }

    /// `true` if `class` is `ancestor` or inherits from it.
    pub fn is_subclass_of(&self, class: ClassId, ancestor: ClassId) -> bool {
        self.ancestors(class).any(|c| c == ancestor)
    }

    fn find(&self, class: ClassId, name: &str) -> Option<MethodEntry> {
        self.ancestors(class)
            .find_map(|c| self.classes.get(c.0).and_then(|c| c.methods.get(name)).copied())
    }

    fn ancestors(&self, class: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        std::iter::successors(Some(class), |c| self.superclass(*c))
    }
}

impl Default for ClassTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(_: &mut Heap, _: Handle, _: &[Value]) -> ScriptResult<Value> {
        Ok(Value::Int(42))
    }

    #[test]
    fn methods_resolve_through_superclasses() {
        let mut t = ClassTable::new();
        let base = t.define_class("Base", None);
        let derived = t.define_class("Derived", Some(base));
        t.define_method(base, "answer", Arity::exact(0), answer);

        assert!(t.responds_to(derived, "answer"));
        assert!(!t.responds_to(base, "missing"));
        assert!(t.is_subclass_of(derived, base));
        assert!(t.is_subclass_of(derived, t.root()));
        assert!(!t.is_subclass_of(base, derived));
    }

    #[test]
    fn redefining_returns_existing_class() {
        let mut t = ClassTable::new();
        let a = t.define_class("A", None);
        assert_eq!(t.define_class("A", None), a);
        assert_eq!(t.name(a), "A");
        assert_eq!(t.superclass(a), Some(t.root()));
        assert_eq!(t.superclass(t.root()), None);
    }

    #[test]
    fn alias_requires_existing_method() {
        let mut t = ClassTable::new();
        let a = t.define_class("A", None);
        t.define_method(a, "add_child", Arity::exact(1), answer);
        assert!(t.alias_method(a, "<<", "add_child").is_ok());
        assert_eq!(t.find_method(a, "<<").map(|(_, ar)| ar), Some(Arity::exact(1)));
        assert!(matches!(
            t.alias_method(a, ">>", "nope"),
            Err(ScriptError::NoMethod { .. })
        ));
    }

    #[test]
    fn arity_bounds() {
        assert!(Arity::exact(1).accepts(1));
        assert!(!Arity::exact(1).accepts(2));
        assert!(Arity::range(1, 2).accepts(2));
        assert!(Arity::at_least(1).accepts(7));
        assert!(!Arity::at_least(1).accepts(0));
        assert_eq!(Arity::range(1, 2).to_string(), "1..2");
        assert_eq!(Arity::at_least(1).to_string(), "1+");
    }
}
