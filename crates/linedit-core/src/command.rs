//! Control codes and the built-in editing command vocabulary.

/// Signal returned by every executed action to the dispatch loop.
///
/// This is the closed vocabulary extension callbacks must speak: it tells
/// the loop whether to repaint, reposition the cursor, ring the bell, or
/// finish the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCode {
    /// Ordinary edit; repaint the line in place and keep reading.
    Normal,
    /// Repaint prompt and buffer.
    Refresh,
    /// Signal an error condition (bell); no further mutation this cycle.
    Error,
    /// Only the cursor moved; reposition it without reprinting.
    Cursor,
    /// Unconditional full repaint (clear and redraw).
    Redisplay,
    /// The line is complete; return it to the caller.
    Accept,
}

/// The closed set of built-in editing commands.
///
/// Built-ins and user-registered extension functions share one name
/// namespace; registering an extension under one of these names shadows the
/// built-in at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinCommand {
    BackwardChar,
    ForwardChar,
    BeginningOfLine,
    EndOfLine,
    DeleteChar,
    BackwardDeleteChar,
    KillLine,
    BackwardKillLine,
    TransposeChars,
    Redisplay,
    AcceptLine,
    PreviousHistory,
    NextHistory,
}

impl BuiltinCommand {
    /// All built-in commands, in a stable order.
    pub const ALL: [BuiltinCommand; 13] = [
        BuiltinCommand::BackwardChar,
        BuiltinCommand::ForwardChar,
        BuiltinCommand::BeginningOfLine,
        BuiltinCommand::EndOfLine,
        BuiltinCommand::DeleteChar,
        BuiltinCommand::BackwardDeleteChar,
        BuiltinCommand::KillLine,
        BuiltinCommand::BackwardKillLine,
        BuiltinCommand::TransposeChars,
        BuiltinCommand::Redisplay,
        BuiltinCommand::AcceptLine,
        BuiltinCommand::PreviousHistory,
        BuiltinCommand::NextHistory,
    ];

    /// The dispatch name of this command.
    pub fn name(self) -> &'static str {
        match self {
            BuiltinCommand::BackwardChar => "backward-char",
            BuiltinCommand::ForwardChar => "forward-char",
            BuiltinCommand::BeginningOfLine => "beginning-of-line",
            BuiltinCommand::EndOfLine => "end-of-line",
            BuiltinCommand::DeleteChar => "delete-char",
            BuiltinCommand::BackwardDeleteChar => "backward-delete-char",
            BuiltinCommand::KillLine => "kill-line",
            BuiltinCommand::BackwardKillLine => "backward-kill-line",
            BuiltinCommand::TransposeChars => "transpose-chars",
            BuiltinCommand::Redisplay => "redisplay",
            BuiltinCommand::AcceptLine => "accept-line",
            BuiltinCommand::PreviousHistory => "previous-history",
            BuiltinCommand::NextHistory => "next-history",
        }
    }

    /// Short help text for introspection.
    pub fn description(self) -> &'static str {
        match self {
            BuiltinCommand::BackwardChar => "move the cursor one character left",
            BuiltinCommand::ForwardChar => "move the cursor one character right",
            BuiltinCommand::BeginningOfLine => "move the cursor to the start of the line",
            BuiltinCommand::EndOfLine => "move the cursor to the end of the line",
            BuiltinCommand::DeleteChar => "delete the character under the cursor",
            BuiltinCommand::BackwardDeleteChar => "delete the character before the cursor",
            BuiltinCommand::KillLine => "delete from the cursor to the end of the line",
            BuiltinCommand::BackwardKillLine => "delete from the start of the line to the cursor",
            BuiltinCommand::TransposeChars => "swap the two characters before the cursor",
            BuiltinCommand::Redisplay => "redraw the prompt and line",
            BuiltinCommand::AcceptLine => "finish the line and return it",
            BuiltinCommand::PreviousHistory => "replace the line with the previous history entry",
            BuiltinCommand::NextHistory => "replace the line with the next history entry",
        }
    }

    /// Look up a built-in command by its dispatch name.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.name() == name)
    }
}
