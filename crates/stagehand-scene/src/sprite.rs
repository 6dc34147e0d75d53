//! Transform node.
//!
//! The native [`Sprite`] holds a node's transform attributes and a cached,
//! non-owning parent link. The ordered child list lives on the script object
//! as the `children` instance variable, so the collector sees the tree
//! through it and the native side never owns another object.
//!
//! Tree structure changes only through [`add_child`], [`remove_child`] and
//! [`remove_from_parent`], which keep the child list and the parent link
//! consistent with each other.

use glam::{Mat4, Vec3, Vec4};
use smallvec::SmallVec;
use stagehand_engine::coords::{Rect, Vec2};
use stagehand_engine::render::RenderCtx;

use crate::bridge::{self, NativeObject};
use crate::dispatcher::{self, DispatchReport};
use crate::error::{ScriptError, ScriptResult};
use crate::heap::{Handle, Heap};
use crate::leaf::Drawable;
use crate::value::Value;

pub const CLASS: &str = "Sprite";

/// Instance variable holding the ordered child list.
pub const CHILDREN: &str = "children";

/// A copy of a child list taken before traversing it.
pub type Children = SmallVec<[Handle; 8]>;

pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub width: i32,
    pub height: i32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Pivot as a fraction of the size.
    pub anchor_x: f32,
    pub anchor_y: f32,
    /// Radians, clockwise on screen (Y down).
    pub rotation: f32,
    pub visible: bool,
    parent: Option<Handle>,
    drawable: Option<Box<dyn Drawable>>,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0,
            height: 0,
            scale_x: 1.0,
            scale_y: 1.0,
            anchor_x: 0.0,
            anchor_y: 0.0,
            rotation: 0.0,
            visible: true,
            parent: None,
            drawable: None,
        }
    }
}

impl NativeObject for Sprite {
    const KIND: &'static str = "Sprite";
}

impl Sprite {
    pub fn new() -> Self {
        Self::default()
    }

    /// A node sized `width x height` that draws `drawable` as its own content.
    pub fn with_drawable(drawable: impl Drawable, width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            drawable: Some(Box::new(drawable)),
            ..Self::default()
        }
    }

    /// Cached parent link. It may name an object that was collected; use
    /// [`parent`] for a checked lookup.
    #[inline]
    pub fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub fn set_drawable(&mut self, drawable: impl Drawable) {
        self.drawable = Some(Box::new(drawable));
    }

    pub fn drawable<T: Drawable>(&self) -> Option<&T> {
        self.drawable.as_ref()?.as_any().downcast_ref::<T>()
    }

    pub fn drawable_mut<T: Drawable>(&mut self) -> Option<&mut T> {
        self.drawable.as_mut()?.as_any_mut().downcast_mut::<T>()
    }

    /// Local bounds `[0, width] x [0, height]`.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width as f32, self.height as f32)
    }

    /// Model matrix used when rendering:
    /// `translate(x, y) * (rotate * anchor_offset) * scale`.
    pub fn model(&self) -> Mat4 {
        let (w, h) = (self.width as f32, self.height as f32);
        let translate = Mat4::from_translation(Vec3::new(self.x, self.y, 0.0));
        let rotate = Mat4::from_rotation_z(self.rotation);
        let anchor = Mat4::from_translation(Vec3::new(
            -w * self.scale_x * self.anchor_x,
            -h * self.scale_y * self.anchor_y,
            0.0,
        ));
        let scale = Mat4::from_scale(Vec3::new(self.scale_x, self.scale_y, 1.0));
        translate * (rotate * anchor) * scale
    }

    /// Maps a point from the parent's space into this node's local space.
    ///
    /// A zero scale yields non-finite coordinates.
    pub fn map_from_parent(&self, point: Vec2) -> Vec2 {
        let (w, h) = (self.width as f32, self.height as f32);
        let model = Mat4::from_translation(Vec3::new(self.x, self.y, 0.0))
            * Mat4::from_rotation_z(-self.rotation)
            * Mat4::from_translation(Vec3::new(-w * self.anchor_x, -h * self.anchor_y, 0.0));
        let p = model * point.to_point4();
        let o = model * Vec4::new(self.x, self.y, 1.0, 1.0);
        Vec2::new(
            (p.x - o.x + w * self.anchor_x * self.scale_x) / self.scale_x,
            (p.y - o.y + h * self.anchor_y * self.scale_y) / self.scale_y,
        )
    }
}

// ── construction ─────────────────────────────────────────────────────────

/// `Sprite.new`
pub fn create(heap: &mut Heap) -> ScriptResult<Handle> {
    spawn(heap, CLASS, Sprite::new())
}

/// Allocates an instance of `class_name` carrying `sprite`.
pub fn spawn(heap: &mut Heap, class_name: &str, sprite: Sprite) -> ScriptResult<Handle> {
    let class = heap.classes().require(class_name)?;
    let handle = heap.alloc(class);
    init(heap, handle, sprite)?;
    Ok(handle)
}

/// Turns an allocated object into a detached node with no children.
///
/// Re-initializing a node first unlinks it from its parent and its children,
/// so both sides of every link stay consistent.
pub fn init(heap: &mut Heap, handle: Handle, sprite: Sprite) -> ScriptResult<()> {
    if bridge::fetch::<Sprite>(heap, handle).is_ok() {
        unlink(heap, handle)?;
    }
    bridge::attach(heap, handle, sprite)?;
    heap.set_ivar(handle, CHILDREN, Value::Array(Vec::new()))
}

// ── structure ────────────────────────────────────────────────────────────

/// Borrows the node, reporting non-nodes as a type mismatch.
pub fn node(heap: &Heap, handle: Handle) -> ScriptResult<&Sprite> {
    bridge::fetch::<Sprite>(heap, handle).map_err(|e| match e {
        ScriptError::MissingNativeObject { expected } => ScriptError::TypeMismatch {
            expected,
            found: heap.class_name(handle).unwrap_or("collected object").to_string(),
        },
        other => other,
    })
}

pub fn node_mut(heap: &mut Heap, handle: Handle) -> ScriptResult<&mut Sprite> {
    node(heap, handle)?;
    bridge::fetch_mut::<Sprite>(heap, handle)
}

/// Current child list. Objects without one have no children.
pub fn children(heap: &Heap, handle: Handle) -> Children {
    heap.ivar_ref(handle, CHILDREN)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_handle).collect())
        .unwrap_or_default()
}

fn set_children(heap: &mut Heap, handle: Handle, children: &[Handle]) -> ScriptResult<()> {
    let items = children.iter().copied().map(Value::Object).collect();
    heap.set_ivar(handle, CHILDREN, Value::Array(items))
}

/// Parent of `handle`, or `None` for roots, detached nodes and nodes whose
/// parent was collected.
pub fn parent(heap: &Heap, handle: Handle) -> ScriptResult<Option<Handle>> {
    Ok(node(heap, handle)?.parent.filter(|p| heap.is_alive(*p)))
}

pub fn contains(heap: &Heap, parent: Handle, child: Handle) -> ScriptResult<bool> {
    node(heap, parent)?;
    node(heap, child)?;
    Ok(children(heap, parent).contains(&child))
}

/// Appends `child` to `parent`, moving it out of its previous parent.
///
/// Adding an existing child does nothing. Adding a node to itself or to one of
/// its descendants is an argument error and leaves the tree unchanged.
pub fn add_child(heap: &mut Heap, parent: Handle, child: Handle) -> ScriptResult<()> {
    if contains(heap, parent, child)? {
        return Ok(());
    }
    if is_self_or_ancestor(heap, child, parent) {
        return Err(ScriptError::argument(format!(
            "{} cannot be added to itself or its own descendant",
            heap.inspect(child)
        )));
    }

    let mut list = children(heap, parent);
    list.push(child);
    set_children(heap, parent, &list)?;
    remove_from_parent(heap, child)?;
    node_mut(heap, child)?.parent = Some(parent);
    log::trace!("{} << {}", heap.inspect(parent), heap.inspect(child));
    Ok(())
}

/// Removes `child` from `parent` and clears its parent link. Does nothing if
/// `child` is not a child of `parent`.
pub fn remove_child(heap: &mut Heap, parent: Handle, child: Handle) -> ScriptResult<()> {
    if !contains(heap, parent, child)? {
        return Ok(());
    }
    let kept: Children = children(heap, parent).into_iter().filter(|h| *h != child).collect();
    set_children(heap, parent, &kept)?;
    node_mut(heap, child)?.parent = None;
    Ok(())
}

pub fn remove_from_parent(heap: &mut Heap, handle: Handle) -> ScriptResult<()> {
    let cached = node(heap, handle)?.parent;
    match cached {
        Some(p) if heap.is_alive(p) => remove_child(heap, p, handle),
        Some(_) => {
            node_mut(heap, handle)?.parent = None;
            Ok(())
        }
        None => Ok(()),
    }
}

fn unlink(heap: &mut Heap, handle: Handle) -> ScriptResult<()> {
    remove_from_parent(heap, handle)?;
    for child in children(heap, handle) {
        if let Ok(node) = bridge::fetch_mut::<Sprite>(heap, child) {
            if node.parent == Some(handle) {
                node.parent = None;
            }
        }
    }
    set_children(heap, handle, &[])
}

fn is_self_or_ancestor(heap: &Heap, candidate: Handle, of: Handle) -> bool {
    std::iter::successors(Some(of), |h| parent(heap, *h).ok().flatten()).any(|h| h == candidate)
}

// ── traversal ────────────────────────────────────────────────────────────

/// Draws `handle` and its visible descendants in child order.
///
/// The heap is borrowed shared for the whole pass, so no child list can change
/// while it is being walked.
pub fn render(heap: &Heap, handle: Handle, ctx: &mut RenderCtx<'_>) -> ScriptResult<()> {
    let sprite = node(heap, handle)?;
    if !sprite.visible {
        return Ok(());
    }

    ctx.push_transform(sprite.model());
    if let Some(drawable) = &sprite.drawable {
        drawable.draw(ctx, sprite.bounds());
    }
    let result = children(heap, handle)
        .into_iter()
        .try_for_each(|child| render(heap, child, ctx));
    ctx.pop_transform();
    result
}

/// Post-order broadcast: every descendant, deepest first in child order,
/// then `handle`'s own listeners.
///
/// Visibility and geometry are not consulted. Each node's child list is
/// copied before it is walked, so listeners that restructure the tree only
/// affect the next broadcast.
pub fn dispatch(heap: &mut Heap, handle: Handle, name: &str, args: &[Value]) -> ScriptResult<DispatchReport> {
    let mut report = DispatchReport::default();
    for child in children(heap, handle) {
        // A listener may have run the collector.
        if !heap.is_alive(child) {
            continue;
        }
        report += dispatch(heap, child, name, args)?;
    }
    if !heap.is_alive(handle) {
        return Ok(report);
    }
    report += dispatcher::deliver(heap, handle, name, args)?;
    Ok(report)
}

// ── geometry ─────────────────────────────────────────────────────────────

/// Maps a root-space point into `handle`'s local space through every ancestor.
pub fn global_to_local(heap: &Heap, handle: Handle, point: Vec2) -> ScriptResult<Vec2> {
    let sprite = node(heap, handle)?;
    let point = match sprite.parent.filter(|p| heap.is_alive(*p)) {
        Some(p) => global_to_local(heap, p, point)?,
        None => point,
    };
    Ok(sprite.map_from_parent(point))
}

/// Closed hit test of a root-space point against the node's local bounds.
pub fn collide(heap: &Heap, handle: Handle, point: Vec2) -> ScriptResult<bool> {
    let local = global_to_local(heap, handle, point)?;
    Ok(node(heap, handle)?.bounds().contains_closed(local))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use stagehand_engine::scene::{DrawList, FontId};

    use super::*;
    use crate::bindings;
    use crate::dispatcher::Listener;
    use crate::leaf::TextField;

    fn space() -> Heap {
        let mut heap = Heap::new();
        bindings::define_classes(&mut heap).unwrap();
        heap
    }

    fn sprite_at(heap: &mut Heap, x: f32, y: f32, w: i32, h: i32) -> Handle {
        let s = create(heap).unwrap();
        let n = node_mut(heap, s).unwrap();
        n.x = x;
        n.y = y;
        n.width = w;
        n.height = h;
        s
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn add_and_remove_keep_both_sides_consistent() {
        let mut heap = space();
        let a = create(&mut heap).unwrap();
        let b = create(&mut heap).unwrap();

        add_child(&mut heap, a, b).unwrap();
        assert!(contains(&heap, a, b).unwrap());
        assert_eq!(parent(&heap, b).unwrap(), Some(a));

        remove_child(&mut heap, a, b).unwrap();
        assert!(!contains(&heap, a, b).unwrap());
        assert_eq!(parent(&heap, b).unwrap(), None);
    }

    #[test]
    fn add_child_is_idempotent() {
        let mut heap = space();
        let a = create(&mut heap).unwrap();
        let b = create(&mut heap).unwrap();
        add_child(&mut heap, a, b).unwrap();
        add_child(&mut heap, a, b).unwrap();
        assert_eq!(children(&heap, a).as_slice(), &[b]);
    }

    #[test]
    fn reparenting_moves_the_child() {
        let mut heap = space();
        let a = create(&mut heap).unwrap();
        let b = create(&mut heap).unwrap();
        let c = create(&mut heap).unwrap();
        add_child(&mut heap, a, b).unwrap();
        add_child(&mut heap, c, b).unwrap();
        assert_eq!(parent(&heap, b).unwrap(), Some(c));
        assert!(!contains(&heap, a, b).unwrap());
        assert!(children(&heap, a).is_empty());
    }

    #[test]
    fn remove_preserves_sibling_order() {
        let mut heap = space();
        let root = create(&mut heap).unwrap();
        let kids: Vec<Handle> = (0..4).map(|_| create(&mut heap).unwrap()).collect();
        for k in &kids {
            add_child(&mut heap, root, *k).unwrap();
        }
        remove_child(&mut heap, root, kids[1]).unwrap();
        assert_eq!(children(&heap, root).as_slice(), &[kids[0], kids[2], kids[3]]);

        remove_from_parent(&mut heap, kids[3]).unwrap();
        assert_eq!(children(&heap, root).as_slice(), &[kids[0], kids[2]]);
        // not a child: no-op
        remove_child(&mut heap, root, kids[1]).unwrap();
        remove_from_parent(&mut heap, kids[1]).unwrap();
    }

    #[test]
    fn cycles_are_rejected_without_mutation() {
        let mut heap = space();
        let a = create(&mut heap).unwrap();
        let b = create(&mut heap).unwrap();
        let c = create(&mut heap).unwrap();
        add_child(&mut heap, a, b).unwrap();
        add_child(&mut heap, b, c).unwrap();

        assert!(matches!(add_child(&mut heap, c, a), Err(ScriptError::ArgumentError(_))));
        assert!(matches!(add_child(&mut heap, a, a), Err(ScriptError::ArgumentError(_))));
        assert_eq!(parent(&heap, a).unwrap(), None);
        assert!(children(&heap, c).is_empty());
    }

    #[test]
    fn non_nodes_are_type_errors() {
        let mut heap = space();
        let a = create(&mut heap).unwrap();
        let plain = heap.new_instance("EventDispatcher", &[]).unwrap();

        for result in [
            add_child(&mut heap, a, plain),
            remove_child(&mut heap, a, plain),
            contains(&heap, a, plain).map(|_| ()),
        ] {
            assert_eq!(
                result,
                Err(ScriptError::type_mismatch("Sprite", "EventDispatcher"))
            );
        }
        assert!(children(&heap, a).is_empty());
    }

    #[test]
    fn identity_ancestors_translate_only() {
        let mut heap = space();
        let mut parent_handle = create(&mut heap).unwrap();
        for _ in 0..3 {
            let next = create(&mut heap).unwrap();
            add_child(&mut heap, parent_handle, next).unwrap();
            parent_handle = next;
        }
        let leaf = sprite_at(&mut heap, 12.0, 7.0, 40, 20);
        add_child(&mut heap, parent_handle, leaf).unwrap();

        let p = Vec2::new(100.0, 50.0);
        assert!(approx(global_to_local(&heap, leaf, p).unwrap(), Vec2::new(88.0, 43.0)));

        let n = node_mut(&mut heap, leaf).unwrap();
        n.anchor_x = 0.5;
        n.anchor_y = 0.5;
        // origin moves to (12 - 20, 7 - 10)
        assert!(approx(global_to_local(&heap, leaf, p).unwrap(), Vec2::new(108.0, 53.0)));
    }

    #[test]
    fn global_to_local_inverts_the_render_transform() {
        let mut heap = space();
        let root = sprite_at(&mut heap, 30.0, -10.0, 200, 100);
        let leaf = sprite_at(&mut heap, 15.0, 25.0, 64, 32);
        {
            let r = node_mut(&mut heap, root).unwrap();
            r.rotation = 0.4;
            r.scale_x = 2.0;
            r.anchor_x = 0.25;
        }
        {
            let l = node_mut(&mut heap, leaf).unwrap();
            l.rotation = -1.1;
            l.scale_y = 0.5;
            l.anchor_x = 0.5;
            l.anchor_y = 1.0;
            l.set_drawable(TextField::new(FontId(0), "hi"));
        }
        add_child(&mut heap, root, leaf).unwrap();

        let mut list = DrawList::new();
        render(&heap, root, &mut RenderCtx::new(&mut list)).unwrap();
        let to_global = list.items()[0].transform;

        for local in [Vec2::new(0.0, 0.0), Vec2::new(10.0, 3.0), Vec2::new(64.0, 32.0)] {
            let g = to_global * local.to_point4();
            let back = global_to_local(&heap, leaf, Vec2::new(g.x, g.y)).unwrap();
            assert!(approx(back, local), "{local:?} -> {back:?}");
        }
    }

    #[test]
    fn collide_uses_closed_local_bounds() {
        let mut heap = space();
        let root = create(&mut heap).unwrap();
        let a = sprite_at(&mut heap, 10.0, 20.0, 50, 50);
        add_child(&mut heap, root, a).unwrap();

        assert!(collide(&heap, a, Vec2::new(30.0, 40.0)).unwrap());
        assert!(!collide(&heap, a, Vec2::new(200.0, 200.0)).unwrap());
        assert!(collide(&heap, a, Vec2::new(60.0, 70.0)).unwrap());
        assert!(collide(&heap, a, Vec2::new(10.0, 20.0)).unwrap());
        assert!(!collide(&heap, a, Vec2::new(9.5, 20.0)).unwrap());
    }

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn tag(heap: &mut Heap, node: Handle, log: &Log, name: &'static str) {
        let log = log.clone();
        dispatcher::on(
            heap,
            node,
            "e",
            Listener::new(move |_, _| {
                log.borrow_mut().push(name);
                Ok(())
            }),
        )
        .unwrap();
    }

    #[test]
    fn dispatch_is_post_order() {
        let mut heap = space();
        let r = create(&mut heap).unwrap();
        let p = create(&mut heap).unwrap();
        let q = create(&mut heap).unwrap();
        let x = create(&mut heap).unwrap();
        add_child(&mut heap, r, p).unwrap();
        add_child(&mut heap, r, q).unwrap();
        add_child(&mut heap, p, x).unwrap();

        let log = Log::default();
        for (h, name) in [(r, "R"), (p, "P"), (q, "Q"), (x, "X")] {
            tag(&mut heap, h, &log, name);
        }
        let report = dispatch(&mut heap, r, "e", &[]).unwrap();
        assert_eq!(*log.borrow(), ["X", "P", "Q", "R"]);
        assert_eq!(report.delivered, 4);
    }

    #[test]
    fn hidden_subtrees_skip_render_but_receive_events() {
        let mut heap = space();
        let root = create(&mut heap).unwrap();
        let hidden = create(&mut heap).unwrap();
        let child = create(&mut heap).unwrap();
        for h in [root, hidden, child] {
            node_mut(&mut heap, h)
                .unwrap()
                .set_drawable(TextField::new(FontId(1), "x"));
        }
        add_child(&mut heap, root, hidden).unwrap();
        add_child(&mut heap, hidden, child).unwrap();
        node_mut(&mut heap, hidden).unwrap().visible = false;

        let mut list = DrawList::new();
        render(&heap, root, &mut RenderCtx::new(&mut list)).unwrap();
        assert_eq!(list.len(), 1);

        let log = Log::default();
        tag(&mut heap, child, &log, "child");
        dispatch(&mut heap, root, "e", &[]).unwrap();
        assert_eq!(*log.borrow(), ["child"]);
    }

    #[test]
    fn mutation_during_dispatch_applies_next_pass() {
        let mut heap = space();
        let r = create(&mut heap).unwrap();
        let p = create(&mut heap).unwrap();
        let q = create(&mut heap).unwrap();
        add_child(&mut heap, r, p).unwrap();
        add_child(&mut heap, r, q).unwrap();

        let log = Log::default();
        dispatcher::on(
            &mut heap,
            p,
            "e",
            Listener::new(move |heap, _| remove_from_parent(heap, q)),
        )
        .unwrap();
        tag(&mut heap, q, &log, "Q");

        dispatch(&mut heap, r, "e", &[]).unwrap();
        assert_eq!(*log.borrow(), ["Q"]);
        assert_eq!(children(&heap, r).as_slice(), &[p]);

        dispatch(&mut heap, r, "e", &[]).unwrap();
        assert_eq!(*log.borrow(), ["Q"]);
    }

    #[test]
    fn ancestor_collected_during_dispatch_is_skipped() {
        let mut heap = space();
        let mark = heap.arena_save();
        let r = create(&mut heap).unwrap();
        let p = create(&mut heap).unwrap();
        let q = create(&mut heap).unwrap();
        let x = create(&mut heap).unwrap();
        add_child(&mut heap, r, p).unwrap();
        add_child(&mut heap, r, q).unwrap();
        add_child(&mut heap, p, x).unwrap();
        heap.arena_restore(mark);
        heap.register(r);

        let log = Log::default();
        let seen = log.clone();
        dispatcher::on(
            &mut heap,
            x,
            "e",
            Listener::new(move |heap, _| {
                seen.borrow_mut().push("X");
                remove_from_parent(heap, p)?;
                heap.collect();
                Ok(())
            }),
        )
        .unwrap();
        tag(&mut heap, p, &log, "P");
        tag(&mut heap, q, &log, "Q");
        tag(&mut heap, r, &log, "R");

        let report = dispatch(&mut heap, r, "e", &[]).unwrap();
        assert_eq!(*log.borrow(), ["X", "Q", "R"]);
        assert_eq!(report.delivered, 3);
        assert!(!heap.is_alive(p));
        assert!(!heap.is_alive(x));
        assert_eq!(children(&heap, r).as_slice(), &[q]);
    }

    #[test]
    fn reinitializing_a_child_detaches_it() {
        let mut heap = space();
        let a = create(&mut heap).unwrap();
        let b = create(&mut heap).unwrap();
        add_child(&mut heap, a, b).unwrap();

        heap.call(b, "initialize", &[]).unwrap();
        assert!(!contains(&heap, a, b).unwrap());
        assert_eq!(parent(&heap, b).unwrap(), None);
    }

    #[test]
    fn reinitializing_a_parent_releases_its_children() {
        let mut heap = space();
        let root = create(&mut heap).unwrap();
        let a = create(&mut heap).unwrap();
        let b = create(&mut heap).unwrap();
        add_child(&mut heap, root, a).unwrap();
        add_child(&mut heap, a, b).unwrap();

        heap.call(a, "initialize", &[]).unwrap();
        assert!(children(&heap, a).is_empty());
        assert_eq!(parent(&heap, b).unwrap(), None);
        assert!(!contains(&heap, root, a).unwrap());

        add_child(&mut heap, root, b).unwrap();
        assert_eq!(parent(&heap, b).unwrap(), Some(root));
    }

    #[test]
    fn render_composes_translate_rotate_anchor_scale() {
        let mut heap = space();
        let s = sprite_at(&mut heap, 100.0, 50.0, 20, 10);
        {
            let n = node_mut(&mut heap, s).unwrap();
            n.scale_x = 2.0;
            n.scale_y = 3.0;
            n.anchor_x = 0.5;
            n.anchor_y = 0.5;
            n.rotation = std::f32::consts::FRAC_PI_2;
            n.set_drawable(TextField::new(FontId(0), "t"));
        }
        let mut list = DrawList::new();
        render(&heap, s, &mut RenderCtx::new(&mut list)).unwrap();
        let m = list.items()[0].transform;

        // local origin: anchor offset (-20, -15) rotated a quarter turn -> (15, -20)
        let origin = m * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((origin.x - 115.0).abs() < 1e-3 && (origin.y - 30.0).abs() < 1e-3);
    }

    #[test]
    fn detached_subtrees_are_collected_and_parent_links_go_stale() {
        let mut heap = space();
        let mark = heap.arena_save();
        let root = create(&mut heap).unwrap();
        let a = create(&mut heap).unwrap();
        let b = create(&mut heap).unwrap();
        add_child(&mut heap, root, a).unwrap();
        add_child(&mut heap, a, b).unwrap();
        heap.arena_restore(mark);
        heap.register(b);

        // b is pinned, but its ancestors are not reachable from it.
        assert_eq!(heap.collect(), 2);
        assert_eq!(parent(&heap, b).unwrap(), None);
        assert!(approx(
            global_to_local(&heap, b, Vec2::new(5.0, 5.0)).unwrap(),
            Vec2::new(5.0, 5.0)
        ));
    }
}
