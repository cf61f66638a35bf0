/// Input reader.
///
/// A background thread reads raw bytes from the terminal and classifies
/// each read into a `Command`:
///   - a lone ESC byte         → Quit
///   - ESC '[' 'A'|'B'|'C'|'D' → Move(Up|Down|Right|Left)
///   - a lone Ctrl-C byte      → Quit (raw mode swallows SIGINT)
///   - anything else           → Idle
///
/// Commands go onto an unbounded queue. The tick loop polls it without
/// blocking and takes at most one command per tick, so a burst of keys is
/// replayed one move per tick.

use std::io::{ErrorKind, Read};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use crate::domain::entity::{Command, Direction};

const ESC: u8 = 0x1b;
const CTRL_C: u8 = 0x03;
const READ_BUF: usize = 100;

/// Classify the bytes returned by a single read.
pub fn classify(bytes: &[u8]) -> Command {
    match bytes {
        [ESC] | [CTRL_C] => Command::Quit,
        [ESC, b'[', key, ..] => match *key {
            b'A' => Command::Move(Direction::Up),
            b'B' => Command::Move(Direction::Down),
            b'C' => Command::Move(Direction::Right),
            b'D' => Command::Move(Direction::Left),
            _ => Command::Idle,
        },
        _ => Command::Idle,
    }
}

/// Consumer side of the input thread.
pub struct InputQueue {
    rx: Receiver<Command>,
}

impl InputQueue {
    /// Start the reader thread on `source`. It runs until the source fails
    /// or the queue is dropped.
    pub fn spawn<R: Read + Send + 'static>(source: R) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || read_loop(source, tx));
        InputQueue { rx }
    }

    /// Take the next command, if any, without blocking.
    /// A dead reader reads as Quit.
    pub fn poll(&self) -> Option<Command> {
        match self.rx.try_recv() {
            Ok(cmd) => Some(cmd),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Command::Quit),
        }
    }
}

fn read_loop<R: Read>(mut source: R, tx: Sender<Command>) {
    let mut buf = [0u8; READ_BUF];
    loop {
        let cmd = match source.read(&mut buf) {
            Ok(0) => {
                tracing::warn!("input closed");
                let _ = tx.send(Command::Quit);
                return;
            }
            Ok(n) => classify(&buf[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!(error = %e, "error reading input");
                let _ = tx.send(Command::Quit);
                return;
            }
        };
        if tx.send(cmd).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io;
    use std::time::{Duration, Instant};

    /// Hands out one pre-recorded chunk per read, then EOF.
    struct Chunks(VecDeque<Vec<u8>>);

    impl Read for Chunks {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.pop_front() {
                Some(chunk) => {
                    buf[..chunk.len()].copy_from_slice(&chunk);
                    Ok(chunk.len())
                }
                None => Ok(0),
            }
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::Other, "device gone"))
        }
    }

    fn drain(queue: &InputQueue, n: usize) -> Vec<Command> {
        let deadline = Instant::now() + Duration::from_secs(1);
        let mut out = Vec::new();
        while out.len() < n && Instant::now() < deadline {
            match queue.poll() {
                Some(cmd) => out.push(cmd),
                None => std::thread::sleep(Duration::from_millis(1)),
            }
        }
        out
    }

    #[test]
    fn classifies_arrow_keys() {
        assert_eq!(classify(b"\x1b[A"), Command::Move(Direction::Up));
        assert_eq!(classify(b"\x1b[B"), Command::Move(Direction::Down));
        assert_eq!(classify(b"\x1b[C"), Command::Move(Direction::Right));
        assert_eq!(classify(b"\x1b[D"), Command::Move(Direction::Left));
    }

    #[test]
    fn lone_escape_and_ctrl_c_quit() {
        assert_eq!(classify(&[ESC]), Command::Quit);
        assert_eq!(classify(&[CTRL_C]), Command::Quit);
    }

    #[test]
    fn everything_else_is_idle() {
        assert_eq!(classify(b""), Command::Idle);
        assert_eq!(classify(b"a"), Command::Idle);
        assert_eq!(classify(b"\x1b["), Command::Idle);
        assert_eq!(classify(b"\x1b[Z"), Command::Idle);
        assert_eq!(classify(b"\x1bOA"), Command::Idle);
        assert_eq!(classify(b"[A"), Command::Idle);
    }

    #[test]
    fn trailing_bytes_after_arrow_are_ignored() {
        assert_eq!(classify(b"\x1b[Cxyz"), Command::Move(Direction::Right));
    }

    #[test]
    fn reader_publishes_in_order_then_quits_on_eof() {
        let chunks = Chunks(VecDeque::from(vec![
            b"\x1b[A".to_vec(),
            b"q".to_vec(),
            vec![ESC],
        ]));
        let queue = InputQueue::spawn(chunks);
        assert_eq!(
            drain(&queue, 4),
            vec![
                Command::Move(Direction::Up),
                Command::Idle,
                Command::Quit,
                Command::Quit,
            ]
        );
    }

    #[test]
    fn read_error_becomes_quit() {
        let queue = InputQueue::spawn(Broken);
        assert_eq!(drain(&queue, 1), vec![Command::Quit]);
    }

    #[test]
    fn poll_takes_one_command_at_a_time() {
        let chunks = Chunks(VecDeque::from(vec![b"\x1b[C".to_vec(), b"\x1b[C".to_vec()]));
        let queue = InputQueue::spawn(chunks);
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(queue.poll(), Some(Command::Move(Direction::Right)));
        assert_eq!(queue.poll(), Some(Command::Move(Direction::Right)));
        // EOF quit, then the finished reader still reads as Quit.
        assert_eq!(queue.poll(), Some(Command::Quit));
        assert_eq!(queue.poll(), Some(Command::Quit));
    }

    #[test]
    fn empty_queue_polls_none() {
        let (_tx, rx) = mpsc::channel();
        let queue = InputQueue { rx };
        assert_eq!(queue.poll(), None);
    }
}
