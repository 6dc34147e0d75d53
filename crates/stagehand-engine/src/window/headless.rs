use std::time::Duration;

use crate::core::{App, AppControl, FrameCtx};
use crate::input::InputFrame;
use crate::scene::DrawList;
use crate::time::FrameClock;

/// Windowless frame loop with a fixed time step.
#[derive(Debug, Clone)]
pub struct Headless {
    /// Upper bound on frames to run; the app may stop earlier.
    pub frames: u64,
    pub step: Duration,
}

/// Outcome of a headless run.
#[derive(Debug)]
pub struct HeadlessReport {
    pub frames_run: u64,
    /// Draw list of the last frame that ran.
    pub last_frame: DrawList,
}

impl Headless {
    pub fn new(frames: u64, step: Duration) -> Self {
        Self { frames, step }
    }

    /// Runs up to `self.frames` frames.
    ///
    /// Before each frame `feed(frame_index, input)` may queue platform events
    /// that the app receives in that frame.
    pub fn run<A, F>(&self, app: &mut A, mut feed: F) -> HeadlessReport
    where
        A: App + ?Sized,
        F: FnMut(u64, &mut InputFrame),
    {
        let mut clock = FrameClock::fixed(self.step);
        let mut input = InputFrame::default();
        let mut list = DrawList::new();
        let mut frames_run = 0;

        if app.on_start() == AppControl::Exit {
            app.on_exit();
            return HeadlessReport { frames_run, last_frame: list };
        }

        while frames_run < self.frames {
            let time = clock.tick();
            input.clear();
            feed(time.frame_index, &mut input);
            list.clear();

            let control = {
                let mut ctx = FrameCtx { time, input: &input, surface: &mut list };
                app.on_frame(&mut ctx)
            };
            frames_run += 1;

            if control == AppControl::Exit {
                break;
            }
        }

        log::debug!("headless run finished after {frames_run} frames");
        app.on_exit();
        HeadlessReport { frames_run, last_frame: list }
    }
}
