//! Native data attached to script objects.
//!
//! An object carries at most one native wrapper. The wrapper owns the native
//! value and drops it exactly once: when it is replaced by `attach`, removed
//! by `detach`, or when the collector frees the object.

use std::any::Any;

use crate::error::{ScriptError, ScriptResult};
use crate::heap::{Handle, Heap};

/// Types that may be attached to a script object.
pub trait NativeObject: Any {
    /// Kind name reported in type mismatch errors.
    const KIND: &'static str;
}

pub struct NativeWrapper {
    kind: &'static str,
    instance: Option<Box<dyn Any>>,
}

impl NativeWrapper {
    fn new<T: NativeObject>(value: T) -> Self {
        Self {
            kind: T::KIND,
            instance: Some(Box::new(value)),
        }
    }

    #[inline]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    fn finalize(&mut self) {
        if let Some(instance) = self.instance.take() {
            log::trace!("finalizing native {}", self.kind);
            drop(instance);
        }
    }
}

impl Drop for NativeWrapper {
    fn drop(&mut self) {
        self.finalize();
    }
}

/// Attaches `value` to `handle`. A previously attached native is finalized
/// first.
pub fn attach<T: NativeObject>(heap: &mut Heap, handle: Handle, value: T) -> ScriptResult<()> {
    let obj = heap.object_mut(handle)?;
    if let Some(mut old) = obj.native.take() {
        log::trace!("replacing native {} with {}", old.kind(), T::KIND);
        old.finalize();
    }
    obj.native = Some(NativeWrapper::new(value));
    Ok(())
}

/// Finalizes and removes the attached native, if any. Returns whether one
/// was attached.
pub fn detach(heap: &mut Heap, handle: Handle) -> ScriptResult<bool> {
    Ok(heap.object_mut(handle)?.native.take().is_some())
}

/// Borrows the native of type `T` attached to `handle`. A collected handle
/// reports `Collected`.
pub fn fetch<T: NativeObject>(heap: &Heap, handle: Handle) -> ScriptResult<&T> {
    let wrapper = wrapper_of::<T, _>(heap.object(handle)?.native.as_ref())?;
    let kind = wrapper.kind;
    wrapper
        .instance
        .as_deref()
        .and_then(|i| i.downcast_ref::<T>())
        .ok_or_else(|| ScriptError::type_mismatch(T::KIND, kind))
}

/// Mutably borrows the native of type `T` attached to `handle`.
pub fn fetch_mut<T: NativeObject>(heap: &mut Heap, handle: Handle) -> ScriptResult<&mut T> {
    let wrapper = wrapper_of::<T, _>(heap.object_mut(handle)?.native.as_mut())?;
    let kind = wrapper.kind;
    wrapper
        .instance
        .as_deref_mut()
        .and_then(|i| i.downcast_mut::<T>())
        .ok_or_else(|| ScriptError::type_mismatch(T::KIND, kind))
}

fn wrapper_of<T: NativeObject, W>(wrapper: Option<W>) -> ScriptResult<W> {
    wrapper.ok_or_else(|| ScriptError::MissingNativeObject {
        expected: T::KIND.to_string(),
    })
}
