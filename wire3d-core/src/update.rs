/// The update loop: drain a command, mutate the scene, project the
/// selected model into a draw sink.
///
/// Redraws happen only when a command has been applied. An empty mailbox
/// makes the tick a no-op, with no sink calls at all.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::camera::Camera;
use crate::command::{Command, Verb};
use crate::config::LoopConfig;
use crate::error::SinkError;
use crate::mailbox::CommandMailbox;
use crate::projection::Projector;
use crate::scene::SceneRegistry;
use crate::sink::DrawSink;

/// Where the loop is within a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    CommandAvailable,
    Mutating,
    Projecting,
}

/// What a tick did. Ticks never fail; problems are reported here and in
/// the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No pending command
    Idle,
    /// A command was applied and its model drawn
    Rendered {
        model: String,
        plotted: usize,
        skipped: usize,
    },
    /// The command could not be applied; nothing changed
    Rejected { reason: String },
    /// The frame was abandoned part-way; the next tick starts afresh
    Aborted { reason: String },
}

pub struct UpdateLoop {
    registry: SceneRegistry,
    camera: Camera,
    projector: Projector,
    commands: Arc<CommandMailbox>,
    selected: Option<String>,
    state: LoopState,
    tick_interval: Duration,
}

impl UpdateLoop {
    pub fn new(config: LoopConfig, registry: SceneRegistry, commands: Arc<CommandMailbox>) -> Self {
        Self {
            registry,
            camera: config.camera,
            projector: Projector::new(config.depth),
            commands,
            selected: None,
            state: LoopState::Idle,
            tick_interval: config.tick_interval,
        }
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Model drawn by the most recently applied command
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Display DPI changed
    pub fn set_dpi(&mut self, dpi: f32) -> bool {
        self.camera.set_dpi(dpi)
    }

    /// Run one tick against `sink`
    pub fn tick(&mut self, sink: &mut dyn DrawSink) -> TickOutcome {
        let outcome = self.step(sink);
        self.transition(LoopState::Idle);
        outcome
    }

    /// Tick until `shutdown` is raised, at most once per tick interval,
    /// then release the sink.
    pub fn run(&mut self, sink: &mut dyn DrawSink, shutdown: &AtomicBool) {
        log::info!("update loop started, tick interval {:?}", self.tick_interval);
        while !shutdown.load(Ordering::Acquire) {
            let started = Instant::now();
            match self.tick(sink) {
                TickOutcome::Idle => {}
                TickOutcome::Rendered {
                    model,
                    plotted,
                    skipped,
                } => log::debug!("rendered `{model}`: {plotted} points plotted, {skipped} not visible"),
                TickOutcome::Rejected { reason } => log::debug!("command rejected: {reason}"),
                TickOutcome::Aborted { reason } => log::debug!("frame aborted: {reason}"),
            }
            if let Some(remaining) = self.tick_interval.checked_sub(started.elapsed()) {
                thread::sleep(remaining);
            }
        }
        log::info!("update loop stopping");
        sink.release();
    }

    fn step(&mut self, sink: &mut dyn DrawSink) -> TickOutcome {
        let command = match self.commands.try_consume() {
            Ok(Some(command)) => command,
            Ok(None) => return TickOutcome::Idle,
            Err(e) => {
                log::error!("{e}");
                return TickOutcome::Aborted { reason: e.to_string() };
            }
        };
        self.transition(LoopState::CommandAvailable);

        self.transition(LoopState::Mutating);
        if let Err(reason) = self.apply(&command) {
            return TickOutcome::Rejected { reason };
        }
        self.selected = Some(command.model);

        self.transition(LoopState::Projecting);
        self.render(sink)
    }

    fn apply(&mut self, command: &Command) -> Result<(), String> {
        let Command { verb, model, dx, dy, dz } = command;
        let result = match verb {
            Verb::Rotate => self.registry.rotate(model, *dx, *dy, *dz),
            Verb::Translate => self.registry.translate(model, *dx, *dy, *dz),
        };
        result.map_err(|e| {
            log::warn!("{e}");
            e.to_string()
        })
    }

    fn render(&self, sink: &mut dyn DrawSink) -> TickOutcome {
        let Some(name) = self.selected.as_deref() else {
            return TickOutcome::Idle;
        };

        let viewport = match sink.begin_frame() {
            Ok(viewport) => viewport,
            Err(e) => return Self::abort(e),
        };

        let (mut plotted, mut skipped) = (0, 0);
        let mut failure = None;
        let projector = &self.projector;
        let camera = &self.camera;
        self.registry.for_each_point(name, |point, color| {
            if failure.is_some() {
                return;
            }
            match projector.project_world(point, camera, viewport) {
                Some(pixel) => match sink.plot_pixel(pixel.x, pixel.y, color) {
                    Ok(()) => plotted += 1,
                    Err(e) => failure = Some(e),
                },
                None => skipped += 1,
            }
        });
        if let Some(e) = failure {
            return Self::abort(e);
        }

        if let Err(e) = sink.end_frame() {
            return Self::abort(e);
        }
        TickOutcome::Rendered {
            model: name.to_string(),
            plotted,
            skipped,
        }
    }

    fn abort(error: SinkError) -> TickOutcome {
        log::error!("{error}");
        TickOutcome::Aborted {
            reason: error.to_string(),
        }
    }

    fn transition(&mut self, next: LoopState) {
        if self.state != next {
            log::trace!("{:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}
