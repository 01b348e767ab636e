//! Unix raw-mode terminal backend.

use std::io::{self, Write};
use std::mem;
use std::os::unix::io::RawFd;

use linedit_core::{InputEvent, Terminal, TerminalError};

/// Raw-mode terminal over stdin/stdout.
///
/// Construction switches stdin into raw mode (no echo, no canonical line
/// buffering, byte-at-a-time reads); the saved settings are restored on
/// drop, including when the process unwinds past the value.
pub struct UnixTerminal {
    fd: RawFd,
    saved: libc::termios,
}

impl UnixTerminal {
    /// Open the controlling terminal on stdin and enter raw mode.
    pub fn new() -> Result<Self, TerminalError> {
        let fd = libc::STDIN_FILENO;
        if unsafe { libc::isatty(fd) } == 0 {
            return Err(TerminalError::Unsupported(
                "stdin is not a terminal".to_string(),
            ));
        }

        let mut saved: libc::termios = unsafe { mem::zeroed() };
        if unsafe { libc::tcgetattr(fd, &mut saved) } != 0 {
            return Err(last_os_error("tcgetattr"));
        }

        let mut raw = saved;
        raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
        raw.c_oflag &= !libc::OPOST;
        // Block until at least one byte is available; no read timeout.
        raw.c_cc[libc::VMIN] = 1;
        raw.c_cc[libc::VTIME] = 0;

        if unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, &raw) } != 0 {
            return Err(last_os_error("tcsetattr"));
        }

        Ok(UnixTerminal { fd, saved })
    }
}

impl Terminal for UnixTerminal {
    fn read_event(&mut self) -> Result<InputEvent, TerminalError> {
        let mut byte = [0u8; 1];
        loop {
            let n = unsafe { libc::read(self.fd, byte.as_mut_ptr() as *mut libc::c_void, 1) };
            if n == 1 {
                return Ok(InputEvent::Byte(byte[0]));
            }
            if n == 0 {
                return Ok(InputEvent::EndOfStream);
            }
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(TerminalError::Io(format!("read: {err}")));
        }
    }

    fn write(&mut self, text: &str) -> Result<(), TerminalError> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(text.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|err| TerminalError::Io(format!("write: {err}")))
    }

    fn width(&self) -> usize {
        let mut size: libc::winsize = unsafe { mem::zeroed() };
        let rc = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) };
        if rc == 0 && size.ws_col > 0 {
            size.ws_col as usize
        } else {
            80
        }
    }
}

impl Drop for UnixTerminal {
    fn drop(&mut self) {
        // Best effort; there is nowhere to report failure during drop.
        unsafe {
            libc::tcsetattr(self.fd, libc::TCSAFLUSH, &self.saved);
        }
    }
}

fn last_os_error(call: &str) -> TerminalError {
    TerminalError::Io(format!("{call}: {}", io::Error::last_os_error()))
}
