//! Object space.
//!
//! Every script object lives in a generational slot map. Objects stay alive
//! while they are reachable from a root:
//! - a global
//! - an explicitly registered handle
//! - the arena of temporaries allocated since the last `arena_restore`
//!
//! `collect` is a plain mark and sweep. Dropping a swept object drops its
//! native wrapper, which is the only finalization hook.

use std::collections::{HashMap, HashSet};

use slotmap::{Key, SlotMap, new_key_type};

use crate::bridge::NativeWrapper;
use crate::class::{ClassId, ClassTable};
use crate::dispatcher::ListenerRegistry;
use crate::error::{ScriptError, ScriptResult};
use crate::value::Value;

new_key_type! {
    /// Generational handle to a heap object. Stale handles never alias a
    /// newer object.
    pub struct Handle;
}

/// Arena position returned by [`Heap::arena_save`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ArenaIndex(usize);

pub struct Object {
    class: ClassId,
    ivars: HashMap<String, Value>,
    pub(crate) native: Option<NativeWrapper>,
    pub(crate) listeners: ListenerRegistry,
}

impl Object {
    #[inline]
    pub fn class(&self) -> ClassId {
        self.class
    }

    #[inline]
    pub fn has_native(&self) -> bool {
        self.native.is_some()
    }
}

pub struct Heap {
    objects: SlotMap<Handle, Object>,
    classes: ClassTable,
    globals: HashMap<String, Value>,
    registered: HashMap<Handle, usize>,
    arena: Vec<Handle>,
}

impl Heap {
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
            classes: ClassTable::new(),
            globals: HashMap::new(),
            registered: HashMap::new(),
            arena: Vec::new(),
        }
    }

    #[inline]
    pub fn classes(&self) -> &ClassTable {
        &self.classes
    }

    #[inline]
    pub fn classes_mut(&mut self) -> &mut ClassTable {
        &mut self.classes
    }

    // ── objects ──────────────────────────────────────────────────────────

    /// Allocates a bare instance of `class` and protects it in the arena.
    pub fn alloc(&mut self, class: ClassId) -> Handle {
        let handle = self.objects.insert(Object {
            class,
            ivars: HashMap::new(),
            native: None,
            listeners: ListenerRegistry::default(),
        });
        self.arena.push(handle);
        log::trace!("alloc {} -> {}", self.classes.name(class), self.inspect(handle));
        handle
    }

    /// `Class.new(*args)`: allocates and runs `initialize` if the class
    /// defines one.
    pub fn new_instance(&mut self, class_name: &str, args: &[Value]) -> ScriptResult<Handle> {
        let class = self.classes.require(class_name)?;
        let handle = self.alloc(class);
        if self.classes.responds_to(class, "initialize") {
            self.call(handle, "initialize", args)?;
        } else if !args.is_empty() {
            return Err(ScriptError::ArgumentCount {
                method: "initialize".to_string(),
                given: args.len(),
                expected: "0".to_string(),
            });
        }
        Ok(handle)
    }

    /// Sends `method` to `receiver`.
    pub fn call(&mut self, receiver: Handle, method: &str, args: &[Value]) -> ScriptResult<Value> {
        let class = self.object(receiver)?.class;
        let (func, arity) = self
            .classes
            .find_method(class, method)
            .ok_or_else(|| ScriptError::NoMethod {
                method: method.to_string(),
                class: self.classes.name(class).to_string(),
            })?;
        if !arity.accepts(args.len()) {
            return Err(ScriptError::ArgumentCount {
                method: method.to_string(),
                given: args.len(),
                expected: arity.to_string(),
            });
        }
        func(self, receiver, args)
    }

    #[inline]
    pub fn is_alive(&self, handle: Handle) -> bool {
        self.objects.contains_key(handle)
    }

    pub fn object(&self, handle: Handle) -> ScriptResult<&Object> {
        self.objects.get(handle).ok_or(ScriptError::Collected)
    }

    pub fn object_mut(&mut self, handle: Handle) -> ScriptResult<&mut Object> {
        self.objects.get_mut(handle).ok_or(ScriptError::Collected)
    }

    pub fn class_name(&self, handle: Handle) -> ScriptResult<&str> {
        let class = self.object(handle)?.class;
        Ok(self.classes.name(class))
    }

    /// `obj.is_a?(ClassName)`. Unknown classes and dead handles are `false`.
    pub fn is_kind_of(&self, handle: Handle, class_name: &str) -> bool {
        match (self.objects.get(handle), self.classes.lookup(class_name)) {
            (Some(obj), Some(class)) => self.classes.is_subclass_of(obj.class, class),
            _ => false,
        }
    }

    /// Kind name of a value for error messages: class name for objects.
    pub fn kind_of_value(&self, value: &Value) -> String {
        match value {
            Value::Object(h) => self
                .class_name(*h)
                .map_or_else(|_| "collected object".to_string(), str::to_string),
            other => other.kind().to_string(),
        }
    }

    /// `#<ClassName:0x…>`
    pub fn inspect(&self, handle: Handle) -> String {
        let class = self.objects.get(handle).map_or("collected", |o| self.classes.name(o.class));
        format!("#<{}:0x{:x}>", class, handle.data().as_ffi())
    }

    #[inline]
    pub fn live_objects(&self) -> usize {
        self.objects.len()
    }

    // ── instance variables ───────────────────────────────────────────────

    /// Reads an instance variable; unset names and dead handles read as nil.
    pub fn ivar(&self, handle: Handle, name: &str) -> Value {
        self.objects
            .get(handle)
            .and_then(|o| o.ivars.get(name))
            .cloned()
            .unwrap_or_default()
    }

    pub fn ivar_ref(&self, handle: Handle, name: &str) -> Option<&Value> {
        self.objects.get(handle).and_then(|o| o.ivars.get(name))
    }

    pub fn set_ivar(&mut self, handle: Handle, name: &str, value: Value) -> ScriptResult<()> {
        self.object_mut(handle)?.ivars.insert(name.to_string(), value);
        Ok(())
    }

    // ── roots ────────────────────────────────────────────────────────────

    pub fn define_global(&mut self, name: &str, value: Value) {
        self.globals.insert(name.to_string(), value);
    }

    pub fn global(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }

    /// Protects `handle` from collection until a matching `unregister`.
    /// Registrations nest.
    pub fn register(&mut self, handle: Handle) {
        *self.registered.entry(handle).or_insert(0) += 1;
    }

    pub fn unregister(&mut self, handle: Handle) {
        if let Some(count) = self.registered.get_mut(&handle) {
            *count -= 1;
            if *count == 0 {
                self.registered.remove(&handle);
            }
        }
    }

    /// Marks the current arena position.
    #[inline]
    pub fn arena_save(&self) -> ArenaIndex {
        ArenaIndex(self.arena.len())
    }

    /// Releases every temporary allocated after `index`. Released objects
    /// remain alive if reachable from another root.
    #[inline]
    pub fn arena_restore(&mut self, index: ArenaIndex) {
        self.arena.truncate(index.0);
    }

    #[inline]
    pub fn arena_len(&self) -> usize {
        self.arena.len()
    }

    // ── collection ───────────────────────────────────────────────────────

    /// Reclaims every object not reachable from a root. Returns how many
    /// objects were freed.
    ///
    /// Only instance variables are traced. Native state, such as a sprite's
    /// parent link, never keeps another object alive.
    pub fn collect(&mut self) -> usize {
        let mut marked: HashSet<Handle> = HashSet::with_capacity(self.objects.len());
        let mut pending: Vec<Handle> = Vec::new();

        for value in self.globals.values() {
            value.for_each_handle(&mut |h| pending.push(h));
        }
        pending.extend(self.registered.keys().copied());
        pending.extend(self.arena.iter().copied());

        while let Some(h) = pending.pop() {
            let Some(obj) = self.objects.get(h) else { continue };
            if !marked.insert(h) {
                continue;
            }
            for value in obj.ivars.values() {
                value.for_each_handle(&mut |child| {
                    if !marked.contains(&child) {
                        pending.push(child);
                    }
                });
            }
        }

        let before = self.objects.len();
        self.objects.retain(|h, _| marked.contains(&h));
        let freed = before - self.objects.len();
        if freed > 0 {
            log::debug!("gc: freed {freed} objects, {} live", self.objects.len());
        }
        freed
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}
