use std::io::{self, Read, Write};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use anyhow::{Context, Result};
use log::debug;
use termios::{tcsetattr, Termios, ECHO, ICANON, TCSANOW};

const STDIN_FD: i32 = 0;

pub fn clear_screen(out: &mut impl Write) -> Result<()> {
    write!(out, "{}[2J{}[1;1H", 27 as char, 27 as char).context("Failed to clear screen")
}

/// Keeps stdin unbuffered and silent for as long as it lives
pub struct RawMode {
    original: Termios,
}

impl RawMode {
    pub fn enable() -> Result<Self> {
        let original = Termios::from_fd(STDIN_FD).context("stdin is not a terminal")?;
        let mut raw = original;
        raw.c_lflag &= !(ICANON | ECHO); // no echo and canonical mode for stdin
        tcsetattr(STDIN_FD, TCSANOW, &raw).context("Failed to enable raw mode")?;
        Ok(RawMode { original })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(err) = tcsetattr(STDIN_FD, TCSANOW, &self.original) {
            debug!("failed to restore terminal: {}", err);
        }
    }
}

/// Reads stdin one byte at a time on a helper thread. The channel
/// disconnects once stdin reaches EOF or fails.
pub fn spawn_stdin_channel() -> Receiver<u8> {
    let (tx, rx) = mpsc::channel::<u8>();
    thread::spawn(move || {
        let mut reader = io::stdin();
        let mut buffer = [0u8; 1];
        while reader.read_exact(&mut buffer).is_ok() {
            if tx.send(buffer[0]).is_err() {
                break;
            }
        }
        debug!("stdin reader finished");
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_screen_sequence() {
        let mut out = Vec::new();
        clear_screen(&mut out).unwrap();
        assert_eq!(out, b"\x1b[2J\x1b[1;1H");
    }
}
