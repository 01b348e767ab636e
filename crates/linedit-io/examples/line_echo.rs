//! Minimal interactive loop: a prompt, a tab-completion extension, and an
//! echo of every accepted line. Run it from a real terminal:
//!
//! ```text
//! cargo run --example line_echo
//! ```

#[cfg(unix)]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use linedit_core::{ControlCode, Session, SessionConfig, Terminal};
    use linedit_io::UnixTerminal;

    let mut session = Session::new(SessionConfig {
        prompt: "prompt> ".to_string(),
        ..SessionConfig::default()
    })?;

    session.register_function(
        "complete",
        "insert a canned completion",
        Box::new(|ops, _key| {
            ops.insert_str("hello!");
            Ok(ControlCode::Refresh)
        }),
    );
    session.bind("^I", "complete")?;

    let mut terminal = UnixTerminal::new()?;
    while let Some(line) = session.read_line(&mut terminal)? {
        terminal.write(&format!("cmd => {line}\r\n"))?;
        if line == "exit" {
            break;
        }
    }
    Ok(())
}

#[cfg(not(unix))]
fn main() {
    eprintln!("this example requires a Unix terminal");
}
