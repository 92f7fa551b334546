use std::fs::File;
use std::io::{self, BufRead, LineWriter, Write};
use std::path::Path;

use cave_sim::{Console, Speech};

use crate::render::Renderer;

/// Every command line typed, one per line, after a `seed N` header.
/// Lines are flushed as they are written, so the log survives an abrupt exit.
#[derive(Debug)]
pub struct CommandLog {
    out: LineWriter<File>,
}

impl CommandLog {
    pub fn create(path: &Path, seed: u64) -> io::Result<Self> {
        let mut out = LineWriter::new(File::create(path)?);
        writeln!(out, "seed {seed}")?;
        Ok(Self { out })
    }

    pub fn record(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{line}")
    }
}

/// A console over a line reader and a text writer.
pub struct TerminalConsole<'w, R, W> {
    renderer: Renderer<'w>,
    input: R,
    output: W,
    oldstyle: bool,
    log: Option<CommandLog>,
    /// First output failure. Speech has no error channel, so it is parked here.
    failure: Option<io::Error>,
}

impl<'w, R: BufRead, W: Write> TerminalConsole<'w, R, W> {
    pub fn new(renderer: Renderer<'w>, input: R, output: W) -> Self {
        Self {
            renderer,
            input,
            output,
            oldstyle: false,
            log: None,
            failure: None,
        }
    }

    /// Drop the prompt.
    pub fn oldstyle(mut self, oldstyle: bool) -> Self {
        self.oldstyle = oldstyle;
        self
    }

    pub fn with_log(mut self, log: Option<CommandLog>) -> Self {
        self.log = log;
        self
    }

    /// The first I/O error seen, if any.
    pub fn take_failure(&mut self) -> Option<io::Error> {
        self.failure.take()
    }

    fn note(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            log::warn!("console output failed: {e}");
            self.failure.get_or_insert(e);
        }
    }
}

impl<R: BufRead, W: Write> Console for TerminalConsole<'_, R, W> {
    fn speak(&mut self, speech: Speech) {
        let Some(text) = self.renderer.render(&speech) else {
            return;
        };
        let result = writeln!(self.output, "{text}");
        self.note(result);
    }

    fn read_line(&mut self) -> Option<String> {
        if !self.oldstyle {
            let result = write!(self.output, "\n> ");
            self.note(result);
        }
        let result = self.output.flush();
        self.note(result);

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => return None,
            Ok(_) => {}
            Err(e) => {
                log::warn!("reading input failed: {e}");
                self.failure.get_or_insert(e);
                return None;
            }
        }
        let line = line.trim_end_matches(['\n', '\r']).to_string();

        if let Some(log) = self.log.as_mut() {
            let result = log.record(&line);
            self.note(result);
        }
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cave_core::World;
    use tempfile::TempDir;

    #[test]
    fn prompts_then_reads_lines() {
        let world = World::sample().unwrap();
        let mut out = Vec::new();
        {
            let mut console =
                TerminalConsole::new(Renderer::new(&world), "look\r\nquit\n".as_bytes(), &mut out);
            console.speak(Speech::message(54));
            assert_eq!(console.read_line().as_deref(), Some("look"));
            assert_eq!(console.read_line().as_deref(), Some("quit"));
            assert_eq!(console.read_line(), None);
            assert!(console.take_failure().is_none());
        }
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("OK\n\n> "));
    }

    #[test]
    fn oldstyle_has_no_prompt() {
        let world = World::sample().unwrap();
        let mut out = Vec::new();
        {
            let mut console =
                TerminalConsole::new(Renderer::new(&world), "w\n".as_bytes(), &mut out)
                    .oldstyle(true);
            assert_eq!(console.read_line().as_deref(), Some("w"));
        }
        assert!(out.is_empty());
    }

    #[test]
    fn commands_are_logged_after_the_seed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game.log");
        let world = World::sample().unwrap();
        let log = CommandLog::create(&path, 77).unwrap();
        let mut console =
            TerminalConsole::new(Renderer::new(&world), "in\nxyzzy\n".as_bytes(), io::sink())
                .with_log(Some(log));
        while console.read_line().is_some() {}
        let logged = std::fs::read_to_string(&path).unwrap();
        assert_eq!(logged, "seed 77\nin\nxyzzy\n");
    }
}
