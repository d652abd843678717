// arrow keys arrive as 3 byte escape sequences: 27, 91, then 65..=68
use circular_buffer::CircularBuffer;

use crate::game::Direction;

type InputBuffer = CircularBuffer<1024, u8>; // 1024 bytes in input buffer

const ESC: u8 = 27;
const BRACKET: u8 = 91;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    Start,
    Restart,
    Menu,
    Quit,
}

/// Turns raw terminal bytes into key actions
pub struct InputDecoder {
    buffer: InputBuffer,
}

impl InputDecoder {
    pub fn new() -> Self {
        InputDecoder {
            buffer: InputBuffer::new(),
        }
    }

    pub fn push(&mut self, byte: u8) {
        // if the buffer is full, ignore the input
        if self.buffer.is_full() {
            return;
        }
        self.buffer.push_back(byte);
    }

    /// Next complete action in the buffer. A partial escape sequence stays
    /// buffered until the rest of it arrives.
    pub fn next_action(&mut self) -> Option<KeyAction> {
        while let Some(&byte) = self.buffer.front() {
            if byte != ESC {
                self.buffer.pop_front();
                if let Some(action) = plain_key(byte) {
                    return Some(action);
                }
                continue;
            }
            match self.buffer.nth_front(1) {
                None => return None,
                Some(&BRACKET) => {}
                Some(_) => {
                    // lone escape, drop it and look at what follows
                    self.buffer.pop_front();
                    continue;
                }
            }
            let code = match self.buffer.nth_front(2) {
                Some(&code) => code,
                None => return None,
            };
            for _ in 0..3 {
                self.buffer.pop_front();
            }
            if let Some(direction) = arrow(code) {
                return Some(KeyAction::Steer(direction));
            }
        }
        None
    }

    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

impl Default for InputDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn arrow(code: u8) -> Option<Direction> {
    match code {
        65 => Some(Direction::Up),
        66 => Some(Direction::Down),
        67 => Some(Direction::Right),
        68 => Some(Direction::Left),
        _ => None,
    }
}

fn plain_key(byte: u8) -> Option<KeyAction> {
    match byte {
        b'\n' | b'\r' => Some(KeyAction::Start),
        b'r' | b'R' => Some(KeyAction::Restart),
        b'm' | b'M' => Some(KeyAction::Menu),
        b'q' | b'Q' => Some(KeyAction::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Vec<KeyAction> {
        let mut decoder = InputDecoder::new();
        for &byte in bytes {
            decoder.push(byte);
        }
        std::iter::from_fn(|| decoder.next_action()).collect()
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(
            decode(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![
                KeyAction::Steer(Direction::Up),
                KeyAction::Steer(Direction::Down),
                KeyAction::Steer(Direction::Right),
                KeyAction::Steer(Direction::Left),
            ]
        );
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(
            decode(b"\nrMq"),
            vec![
                KeyAction::Start,
                KeyAction::Restart,
                KeyAction::Menu,
                KeyAction::Quit
            ]
        );
        assert_eq!(decode(b"\r"), vec![KeyAction::Start]);
    }

    #[test]
    fn test_unknown_bytes_ignored() {
        assert_eq!(decode(b"xyz\x1b[Z"), vec![]);
        assert_eq!(decode(b"x\x1b[Ax"), vec![KeyAction::Steer(Direction::Up)]);
    }

    #[test]
    fn test_partial_sequence_waits() {
        let mut decoder = InputDecoder::new();
        decoder.push(ESC);
        decoder.push(BRACKET);
        assert_eq!(decoder.next_action(), None);
        assert_eq!(decoder.pending(), 2);
        decoder.push(b'D');
        assert_eq!(decoder.next_action(), Some(KeyAction::Steer(Direction::Left)));
        assert_eq!(decoder.pending(), 0);
    }

    #[test]
    fn test_lone_escape_dropped() {
        assert_eq!(decode(b"\x1bq\n"), vec![KeyAction::Quit, KeyAction::Start]);
    }

    #[test]
    fn test_escape_then_key_needs_no_third_byte() {
        assert_eq!(decode(&[ESC, b'q']), vec![KeyAction::Quit]);
        assert_eq!(decode(&[ESC, b'\n']), vec![KeyAction::Start]);

        let mut decoder = InputDecoder::new();
        decoder.push(ESC);
        assert_eq!(decoder.next_action(), None);
        assert_eq!(decoder.pending(), 1);
    }

    #[test]
    fn test_full_buffer_drops_input() {
        let mut decoder = InputDecoder::new();
        for _ in 0..1024 {
            decoder.push(b'x');
        }
        decoder.push(b'q');
        assert_eq!(decoder.pending(), 1024);
        assert_eq!(decoder.next_action(), None);
    }
}
