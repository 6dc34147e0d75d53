use stagehand_engine::core::{App, AppControl, FrameCtx};
use stagehand_engine::input::PlatformEvent;
use stagehand_engine::render::Surface;

use crate::bindings;
use crate::dispatcher::DispatchReport;
use crate::error::ScriptResult;
use crate::heap::Heap;
use crate::stage::Stage;

#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Run the collector every `gc_interval` frames. Zero disables it.
    pub gc_interval: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { gc_interval: 1 }
    }
}

/// What one frame did.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameReport {
    pub events: DispatchReport,
    /// Objects reclaimed at the end of the frame.
    pub collected: usize,
}

/// Drives an object space frame by frame.
///
/// Each frame, in order:
/// 1. forward the frame's platform events to the stage
/// 2. broadcast `enter_frame(dt)`
/// 3. render the stage
/// 4. release the frame's temporaries and, on schedule, collect
pub struct Player {
    heap: Heap,
    stage: Stage,
    config: PlayerConfig,
    frames: u64,
}

impl Player {
    pub fn new(config: PlayerConfig) -> ScriptResult<Self> {
        let mut heap = Heap::new();
        let mark = heap.arena_save();
        let stage = bindings::install(&mut heap)?;
        heap.arena_restore(mark);
        Ok(Self { heap, stage, config, frames: 0 })
    }

    /// Runs scene construction. Objects it creates survive only if they are
    /// reachable from a root afterwards, typically by being added to the stage.
    pub fn setup<F>(&mut self, build: F) -> ScriptResult<()>
    where
        F: FnOnce(&mut Heap, Stage) -> ScriptResult<()>,
    {
        let mark = self.heap.arena_save();
        let result = build(&mut self.heap, self.stage);
        self.heap.arena_restore(mark);
        result
    }

    #[inline]
    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    #[inline]
    pub fn heap_mut(&mut self) -> &mut Heap {
        &mut self.heap
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one frame. Temporaries are released even when the frame fails.
    pub fn step(&mut self, dt: f32, input: &[PlatformEvent], surface: &mut dyn Surface) -> ScriptResult<FrameReport> {
        let mark = self.heap.arena_save();
        let result = self.run_frame(dt, input, surface);
        self.heap.arena_restore(mark);

        self.frames += 1;
        let collected = match self.config.gc_interval {
            0 => 0,
            n if self.frames % n == 0 => self.heap.collect(),
            _ => 0,
        };
        result.map(|events| FrameReport { events, collected })
    }

    fn run_frame(&mut self, dt: f32, input: &[PlatformEvent], surface: &mut dyn Surface) -> ScriptResult<DispatchReport> {
        let mut report = DispatchReport::default();
        for event in input {
            report += self.stage.forward(&mut self.heap, event)?;
        }
        report += self.stage.enter_frame(&mut self.heap, dt)?;
        self.stage.render(&self.heap, surface)?;
        Ok(report)
    }
}

impl App for Player {
    fn on_start(&mut self) -> AppControl {
        log::info!("player started with {} live objects", self.heap.live_objects());
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        match self.step(ctx.time.dt, ctx.input.events(), ctx.surface) {
            Ok(report) => {
                if report.events.failed > 0 {
                    log::debug!("frame {}: {} listener(s) raised", self.frames, report.events.failed);
                }
                AppControl::Continue
            }
            Err(e) => {
                log::error!("frame {} failed: {e}", self.frames);
                AppControl::Exit
            }
        }
    }

    fn on_exit(&mut self) {
        log::info!("player stopped after {} frames", self.frames);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    use stagehand_engine::input::{Key, MouseButton};
    use stagehand_engine::scene::DrawList;
    use stagehand_engine::window::Headless;

    use super::*;
    use crate::bindings::TEXT_FIELD;
    use crate::dispatcher::{self, Listener};
    use crate::error::ScriptError;
    use crate::sprite;
    use crate::value::Value;

    #[test]
    fn events_precede_enter_frame_in_arrival_order() {
        let mut player = Player::new(PlayerConfig::default()).unwrap();
        let seen: Rc<RefCell<Vec<String>>> = Rc::default();
        let stage = player.stage();
        for name in ["mouse_up", "key_down", "enter_frame"] {
            let seen = seen.clone();
            dispatcher::on(
                player.heap_mut(),
                stage.handle(),
                name,
                Listener::new(move |_, _| {
                    seen.borrow_mut().push(name.to_string());
                    Ok(())
                }),
            )
            .unwrap();
        }

        let input = [
            PlatformEvent::KeyDown { key: Key::A },
            PlatformEvent::MouseUp { button: MouseButton::Left, x: 1, y: 1 },
        ];
        let report = player.step(0.016, &input, &mut DrawList::new()).unwrap();
        assert_eq!(*seen.borrow(), ["key_down", "mouse_up", "enter_frame"]);
        assert_eq!(report.events.delivered, 3);
    }

    #[test]
    fn frame_temporaries_are_collected() {
        let mut player = Player::new(PlayerConfig::default()).unwrap();
        let stage = player.stage();
        let spawned = Rc::new(Cell::new(0));
        let counter = spawned.clone();
        dispatcher::on(
            player.heap_mut(),
            stage.handle(),
            "enter_frame",
            Listener::new(move |heap, _| {
                sprite::create(heap)?;
                counter.set(counter.get() + 1);
                Ok(())
            }),
        )
        .unwrap();

        let baseline = player.heap().live_objects();
        for _ in 0..5 {
            let report = player.step(0.016, &[], &mut DrawList::new()).unwrap();
            assert_eq!(report.collected, 1);
        }
        assert_eq!(spawned.get(), 5);
        assert_eq!(player.heap().live_objects(), baseline);
        assert_eq!(player.heap().arena_len(), 0);
    }

    #[test]
    fn setup_keeps_only_what_the_stage_reaches() {
        let mut player = Player::new(PlayerConfig::default()).unwrap();
        let kept = Rc::new(Cell::new(None));
        let slot = kept.clone();
        player
            .setup(|heap, stage| {
                let label = heap.new_instance(TEXT_FIELD, &[Value::Int(0), Value::from("hello")])?;
                stage.add_child(heap, label)?;
                sprite::create(heap)?;
                slot.set(Some(label));
                Ok(())
            })
            .unwrap();

        let report = player.step(0.0, &[], &mut DrawList::new()).unwrap();
        assert_eq!(report.collected, 1);
        let label = kept.get().unwrap();
        assert!(player.heap().is_alive(label));
    }

    #[test]
    fn gc_interval_controls_collection() {
        let mut player = Player::new(PlayerConfig { gc_interval: 3 }).unwrap();
        player
            .setup(|heap, _| sprite::create(heap).map(|_| ()))
            .unwrap();
        let collected: Vec<usize> = (0..3)
            .map(|_| player.step(0.0, &[], &mut DrawList::new()).unwrap().collected)
            .collect();
        assert_eq!(collected, [0, 0, 1]);
    }

    #[test]
    fn listener_failures_do_not_fail_the_frame() {
        let mut player = Player::new(PlayerConfig::default()).unwrap();
        let stage = player.stage();
        dispatcher::on(
            player.heap_mut(),
            stage.handle(),
            "enter_frame",
            Listener::new(|_, _| Err(ScriptError::runtime("broken"))),
        )
        .unwrap();
        let report = player.step(0.016, &[], &mut DrawList::new()).unwrap();
        assert_eq!(report.events.failed, 1);
    }

    #[test]
    fn runs_under_the_headless_loop() {
        let mut player = Player::new(PlayerConfig::default()).unwrap();
        let moves = Rc::new(Cell::new(0));
        let counter = moves.clone();
        player
            .setup(|heap, stage| {
                let label = heap.new_instance(TEXT_FIELD, &[Value::Int(0), Value::from("fps")])?;
                stage.add_child(heap, label)?;
                dispatcher::on(
                    heap,
                    label,
                    "mouse_move",
                    Listener::new(move |_, args| {
                        assert_eq!(args.len(), 2);
                        counter.set(counter.get() + 1);
                        Ok(())
                    }),
                )
            })
            .unwrap();

        let report = Headless::new(4, Duration::from_millis(16)).run(&mut player, |frame, input| {
            if frame % 2 == 0 {
                input.push_event(PlatformEvent::MouseMove { x: frame as i64, y: 0 });
            }
        });
        assert_eq!(report.frames_run, 4);
        assert_eq!(moves.get(), 2);
        assert_eq!(report.last_frame.len(), 1);
        assert_eq!(player.frames(), 4);
    }
}
