use std::io::{self, BufReader, Read};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use wire3d_core::{Command, LoopConfig, PointCloud, RecordingSink, SceneRegistry, Viewport};
use wire3d_terminal::TerminalApp;

/// Blocking reader fed line by line from the test, like a terminal stdin.
struct LineFeed {
    lines: Receiver<String>,
    pending: Vec<u8>,
}

impl Read for LineFeed {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pending.is_empty() {
            match self.lines.recv() {
                Ok(line) => self.pending = line.into_bytes(),
                Err(_) => return Ok(0),
            }
        }
        let n = buf.len().min(self.pending.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending.drain(..n);
        Ok(n)
    }
}

fn start() -> (Sender<String>, thread::JoinHandle<RecordingSink>) {
    let mut registry = SceneRegistry::new();
    registry.insert("cube", PointCloud::cube(100.0).into());
    let config = LoopConfig {
        tick_interval: Duration::from_millis(5),
        camera: wire3d_core::Camera::new([0.0, 0.0, -300.0].into()),
        ..LoopConfig::default()
    };

    let mut app = TerminalApp::new(config, registry);
    app.commands().publish(Command::rotate("cube", 0.0, 0.0, 0.0)).unwrap();

    let (tx, rx) = mpsc::channel();
    let input = BufReader::new(LineFeed {
        lines: rx,
        pending: Vec::new(),
    });
    let handle = thread::spawn(move || {
        let mut sink = RecordingSink::new(Viewport::new(640, 480));
        app.run(input, &mut sink).unwrap();
        sink
    });
    (tx, handle)
}

#[test]
fn test_initial_frame_then_quit() {
    let (tx, handle) = start();
    thread::sleep(Duration::from_millis(200));
    tx.send("quit\n".into()).unwrap();

    let sink = handle.join().unwrap();
    assert_eq!(sink.frames.len(), 1);
    assert_eq!(sink.frames[0].len(), PointCloud::cube(100.0).points.len());
    assert!(sink.released);
}

#[test]
fn test_typed_commands_redraw() {
    let (tx, handle) = start();
    thread::sleep(Duration::from_millis(200));
    tx.send("rotate cube 0 0.5 0\n".into()).unwrap();
    thread::sleep(Duration::from_millis(200));
    tx.send("rotate nowhere 1 1 1\n".into()).unwrap();
    thread::sleep(Duration::from_millis(200));
    drop(tx);

    let sink = handle.join().unwrap();
    assert_eq!(sink.frames.len(), 2);
    assert_ne!(sink.frames[0], sink.frames[1]);
    assert!(sink.released);
}
