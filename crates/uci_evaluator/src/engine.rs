//! UCI engine process handle
//!
//! The engine runs as a child process speaking UCI over its standard streams.
//! A reader thread forwards every stdout line into a channel, so each read can
//! carry its own deadline through `recv_timeout` instead of blocking forever on
//! a stuck engine.
//!
//! The process lives exactly as long as its [`UciEngine`]. Dropping the handle
//! sends `quit`, gives the engine a short grace period, then kills and reaps it.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError};
use log::{debug, info, trace, warn};

use crate::error::{EvalError, EvalResult};
use crate::score::EngineScore;
use crate::Evaluator;

/// Time allowed for `uciok` and `readyok`
pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

/// Extra time past the search budget before `bestmove` counts as missing
pub const READ_GRACE: Duration = Duration::from_millis(500);

/// Time the engine gets to exit on its own after `quit`
const QUIT_GRACE: Duration = Duration::from_millis(200);

pub struct UciEngine {
    child: Child,
    stdin: ChildStdin,
    lines: Receiver<String>,
    reader: Option<JoinHandle<()>>,
}

impl UciEngine {
    /// Start the engine binary at `path` and complete the UCI handshake
    pub fn spawn(path: impl AsRef<Path>) -> EvalResult<Self> {
        let path = path.as_ref();
        Self::spawn_command(Command::new(path)).map_err(|err| match err {
            EvalError::Io(source) => EvalError::Spawn {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    /// Start an engine from a prepared command
    ///
    /// Standard streams are overridden; arguments and environment are kept.
    pub fn spawn_command(mut command: Command) -> EvalResult<Self> {
        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let (stdin, stdout) = match (child.stdin.take(), child.stdout.take()) {
            (Some(stdin), Some(stdout)) => (stdin, stdout),
            _ => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(EvalError::Disconnected);
            }
        };

        let (sender, lines) = crossbeam_channel::unbounded();
        let reader = thread::Builder::new()
            .name("uci-reader".to_string())
            .spawn(move || {
                for line in BufReader::new(stdout).lines() {
                    let Ok(line) = line else { break };
                    if sender.send(line).is_err() {
                        break;
                    }
                }
            });
        let reader = match reader {
            Ok(handle) => handle,
            Err(err) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(err.into());
            }
        };

        // From here on, Drop cleans up the process on any failure
        let mut engine = UciEngine {
            child,
            stdin,
            lines,
            reader: Some(reader),
        };

        engine.send("uci")?;
        engine.read_until("uciok", HANDSHAKE_TIMEOUT, |_| {})?;
        engine.send("isready")?;
        engine.read_until("readyok", HANDSHAKE_TIMEOUT, |_| {})?;
        info!("[UCI] Engine ready (pid {})", engine.child.id());

        Ok(engine)
    }

    fn send(&mut self, command: &str) -> EvalResult<()> {
        trace!("[UCI] >>> {command}");
        writeln!(self.stdin, "{command}")?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Read lines until one starts with the `expected` token, handing every
    /// other line to `on_line`
    fn read_until(
        &mut self,
        expected: &'static str,
        timeout: Duration,
        mut on_line: impl FnMut(&str),
    ) -> EvalResult<String> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.lines.recv_timeout(remaining) {
                Ok(line) => {
                    let line = line.trim();
                    trace!("[UCI] <<< {line}");
                    if line.split_whitespace().next() == Some(expected) {
                        return Ok(line.to_string());
                    }
                    on_line(line);
                }
                Err(RecvTimeoutError::Timeout) => {
                    warn!("[UCI] Timed out waiting for '{expected}'");
                    return Err(EvalError::Timeout {
                        expected,
                        waited: timeout,
                    });
                }
                Err(RecvTimeoutError::Disconnected) => return Err(EvalError::Disconnected),
            }
        }
    }
}

impl Evaluator for UciEngine {
    fn evaluate(&mut self, fen: &str, budget: Duration) -> EvalResult<Option<EngineScore>> {
        self.send(&format!("position fen {fen}"))?;
        self.send(&format!("go movetime {}", budget.as_millis()))?;

        let mut last = None;
        let best = self.read_until("bestmove", budget + READ_GRACE, |line| {
            if let Some(score) = EngineScore::parse_info(line) {
                last = Some(score);
            }
        })?;
        debug!("[UCI] {best}, score {last:?}");

        Ok(last)
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        let _ = self.send("quit");

        let deadline = Instant::now() + QUIT_GRACE;
        let exited = loop {
            match self.child.try_wait() {
                Ok(Some(_)) => break true,
                Ok(None) if Instant::now() < deadline => thread::sleep(Duration::from_millis(10)),
                _ => break false,
            }
        };
        if !exited {
            debug!("[UCI] Engine ignored quit, killing it");
            let _ = self.child.kill();
        }
        let _ = self.child.wait();

        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
    }
}

/// Run `f` with a freshly spawned engine that is shut down afterwards, whether
/// `f` succeeds or not
pub fn with_engine<T>(
    path: impl AsRef<Path>,
    f: impl FnOnce(&mut UciEngine) -> EvalResult<T>,
) -> EvalResult<T> {
    let mut engine = UciEngine::spawn(path)?;
    f(&mut engine)
}
