/// Terminal front end: stdin command thread plus the update loop
use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use wire3d_core::{parse_line, CommandError, CommandMailbox, DrawSink, Input, LoopConfig, SceneRegistry, UpdateLoop};

pub mod config;
pub mod renderer;
pub mod text;

pub use config::{Config, SinkKind};
pub use renderer::TerminalSink;
pub use text::TextSink;

/// Main application struct: owns the update loop and the shutdown flag
/// shared with the input thread
pub struct TerminalApp {
    update: UpdateLoop,
    commands: Arc<CommandMailbox>,
    shutdown: Arc<AtomicBool>,
}

impl TerminalApp {
    pub fn new(config: LoopConfig, registry: SceneRegistry) -> Self {
        let commands = Arc::new(CommandMailbox::new());
        Self {
            update: UpdateLoop::new(config, registry, Arc::clone(&commands)),
            commands,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn commands(&self) -> &Arc<CommandMailbox> {
        &self.commands
    }

    pub fn update_loop(&self) -> &UpdateLoop {
        &self.update
    }

    /// Read commands from `input` on a background thread and run the update
    /// loop against `sink` until the input asks to quit or runs dry.
    ///
    /// Only the input thread raises the shutdown flag, so it has always
    /// left its read loop by the time the join below runs.
    pub fn run<R>(&mut self, input: R, sink: &mut dyn DrawSink) -> io::Result<()>
    where
        R: BufRead + Send + 'static,
    {
        let handle = match spawn_input_thread(input, Arc::clone(&self.commands), Arc::clone(&self.shutdown)) {
            Ok(handle) => handle,
            Err(e) => {
                sink.release();
                return Err(e);
            }
        };
        self.update.run(sink, &self.shutdown);
        if handle.join().is_err() {
            log::error!("command input thread panicked");
        }
        Ok(())
    }
}

/// Spawn the named input thread running [`input_loop`]
pub fn spawn_input_thread<R>(
    input: R,
    commands: Arc<CommandMailbox>,
    shutdown: Arc<AtomicBool>,
) -> io::Result<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    thread::Builder::new()
        .name("command-input".into())
        .spawn(move || input_loop(input, &commands, &shutdown))
}

/// Parse lines from `input` and publish them, newest wins. Raises
/// `shutdown` on `quit`, end of input or a read error.
pub fn input_loop<R: BufRead>(mut input: R, commands: &CommandMailbox, shutdown: &AtomicBool) {
    let mut line = String::new();
    while !shutdown.load(Ordering::Acquire) {
        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => {
                log::info!("command input closed");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                log::error!("failed to read command input: {e}");
                break;
            }
        }

        match parse_line(&line) {
            Ok(Input::Quit) => {
                log::info!("quit requested");
                break;
            }
            Ok(Input::Command(command)) => match commands.publish(command) {
                Ok(Some(displaced)) => log::warn!("command {displaced:?} replaced before it was applied"),
                Ok(None) => {}
                Err(e) => {
                    log::error!("{e}");
                    break;
                }
            },
            Err(CommandError::Empty) => {}
            Err(e) => log::warn!("{e}"),
        }
    }
    shutdown.store(true, Ordering::Release);
}
