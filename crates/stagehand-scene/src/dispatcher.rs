//! Named-event listener registries.
//!
//! Each heap object owns a registry mapping event names to listeners in
//! registration order. Delivery iterates a snapshot, so listeners added or
//! removed while an event is being delivered only affect later deliveries.

use std::collections::HashMap;
use std::fmt;
use std::ops::AddAssign;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::error::ScriptResult;
use crate::heap::{Handle, Heap};
use crate::value::Value;

type ListenerFn = dyn Fn(&mut Heap, &[Value]) -> ScriptResult<()>;

/// A callable event listener. Clones share identity; `off` matches by it.
#[derive(Clone)]
pub struct Listener(Rc<ListenerFn>);

impl Listener {
    pub fn new(f: impl Fn(&mut Heap, &[Value]) -> ScriptResult<()> + 'static) -> Self {
        Self(Rc::new(f))
    }

    #[inline]
    pub fn call(&self, heap: &mut Heap, args: &[Value]) -> ScriptResult<()> {
        (self.0)(heap, args)
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Listener) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

type Snapshot = SmallVec<[Listener; 4]>;

#[derive(Default)]
pub struct ListenerRegistry {
    by_name: HashMap<String, Vec<Listener>>,
}

impl ListenerRegistry {
    pub fn on(&mut self, name: &str, listener: Listener) {
        self.by_name.entry(name.to_string()).or_default().push(listener);
    }

    /// Removes the first registration of `listener` under `name`.
    pub fn off(&mut self, name: &str, listener: &Listener) -> bool {
        let Some(list) = self.by_name.get_mut(name) else { return false };
        let Some(pos) = list.iter().position(|l| l.ptr_eq(listener)) else { return false };
        list.remove(pos);
        if list.is_empty() {
            self.by_name.remove(name);
        }
        true
    }

    pub fn count(&self, name: &str) -> usize {
        self.by_name.get(name).map_or(0, Vec::len)
    }

    fn snapshot(&self, name: &str) -> Snapshot {
        self.by_name
            .get(name)
            .map(|l| l.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// Delivery counters for one dispatch, summed across a traversal.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct DispatchReport {
    /// Listeners that returned normally.
    pub delivered: usize,
    /// Listeners that raised; their errors were logged and swallowed.
    pub failed: usize,
}

impl DispatchReport {
    #[inline]
    pub fn invoked(&self) -> usize {
        self.delivered + self.failed
    }
}

impl AddAssign for DispatchReport {
    fn add_assign(&mut self, rhs: Self) {
        self.delivered += rhs.delivered;
        self.failed += rhs.failed;
    }
}

pub fn on(heap: &mut Heap, target: Handle, name: &str, listener: Listener) -> ScriptResult<()> {
    heap.object_mut(target)?.listeners.on(name, listener);
    Ok(())
}

pub fn off(heap: &mut Heap, target: Handle, name: &str, listener: &Listener) -> ScriptResult<bool> {
    Ok(heap.object_mut(target)?.listeners.off(name, listener))
}

pub fn listener_count(heap: &Heap, target: Handle, name: &str) -> ScriptResult<usize> {
    Ok(heap.object(target)?.listeners.count(name))
}

/// Invokes `target`'s own listeners for `name` in registration order.
///
/// A listener that raises is logged and skipped; the rest still run.
pub fn deliver(heap: &mut Heap, target: Handle, name: &str, args: &[Value]) -> ScriptResult<DispatchReport> {
    let snapshot = heap.object(target)?.listeners.snapshot(name);
    let mut report = DispatchReport::default();
    for listener in &snapshot {
        match listener.call(heap, args) {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                log::warn!("listener for '{name}' on {} raised: {e}", heap.inspect(target));
                report.failed += 1;
            }
        }
    }
    Ok(report)
}
