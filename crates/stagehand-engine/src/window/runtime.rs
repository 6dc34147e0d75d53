use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, PointerTracker};
use crate::scene::DrawList;
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "stagehand".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

/// Render backend seam: receives each finished frame.
pub trait Presenter {
    fn present(&mut self, window: &Window, frame: &DrawList);
}

/// Presenter that only reports frame sizes at trace level.
#[derive(Debug, Default)]
pub struct LogPresenter {
    frames: u64,
}

impl Presenter for LogPresenter {
    fn present(&mut self, _window: &Window, frame: &DrawList) {
        self.frames += 1;
        log::trace!("frame {}: {} draw items", self.frames, frame.len());
    }
}

/// Entry point for the windowed loop.
pub struct Runtime;

impl Runtime {
    pub fn run<A, P>(config: RuntimeConfig, app: A, presenter: P) -> Result<()>
    where
        A: App + 'static,
        P: Presenter + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = RuntimeState::new(config, app, presenter);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct WindowEntry {
    window: Window,
    tracker: PointerTracker,
    input_frame: InputFrame,
    clock: FrameClock,
    draw_list: DrawList,
}

struct RuntimeState<A, P> {
    config: RuntimeConfig,
    app: A,
    presenter: P,

    entry: Option<WindowEntry>,
    exit_requested: bool,
    failure: Option<anyhow::Error>,
}

impl<A, P> RuntimeState<A, P>
where
    A: App,
    P: Presenter,
{
    fn new(config: RuntimeConfig, app: A, presenter: P) -> Self {
        Self {
            config,
            app,
            presenter,
            entry: None,
            exit_requested: false,
            failure: None,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        if !self.exit_requested {
            self.exit_requested = true;
            self.app.on_exit();
        }
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        self.entry = Some(WindowEntry {
            window,
            tracker: PointerTracker::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            draw_list: DrawList::new(),
        });
        Ok(())
    }

    fn drive_frame(&mut self) -> AppControl {
        let Some(entry) = self.entry.as_mut() else {
            return AppControl::Continue;
        };

        let time = entry.clock.tick();
        entry.draw_list.clear();

        let control = {
            let mut ctx = FrameCtx {
                time,
                input: &entry.input_frame,
                surface: &mut entry.draw_list,
            };
            self.app.on_frame(&mut ctx)
        };

        // Events are consumed exactly once.
        entry.input_frame.clear();

        entry.window.pre_present_notify();
        self.presenter.present(&entry.window, &entry.draw_list);

        control
    }
}

impl<A, P> ApplicationHandler for RuntimeState<A, P>
where
    A: App,
    P: Presenter,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to create window: {e:#}");
            self.failure = Some(e);
            self.request_exit(event_loop);
            return;
        }

        if self.app.on_start() == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        // Scene setup time must not show up as the first frame's dt.
        if let Some(entry) = self.entry.as_mut() {
            entry.clock.reset();
            entry.window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: one tick per presented frame.
        if let Some(entry) = &self.entry {
            entry.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        if entry.window.id() != window_id {
            return;
        }

        let scale = entry.window.scale_factor();
        if let Some(ev) = translate_window_event(scale, &mut entry.tracker, &event) {
            entry.input_frame.push_event(ev);
        }

        match event {
            WindowEvent::CloseRequested => {
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                entry.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                if self.drive_frame() == AppControl::Exit {
                    self.request_exit(event_loop);
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if !self.exit_requested {
            self.exit_requested = true;
            self.app.on_exit();
        }
        self.entry = None;
    }
}
