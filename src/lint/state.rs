//! Scanner states.
//!
//! The scanner is a deterministic finite-state machine; [`LexState`] is its
//! state value. A second slot of the same type (the resume state) records
//! where to return after a comment, escape, or conditional completes.

/// One state of the KeyValues scanner.
///
/// Exactly one variant is current at any time. Comments, escapes, and
/// conditionals are parenthetical: they stash the surrounding state in the
/// scanner's resume slot and restore it when they end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexState {
    /// Expecting a key or structural token at the current nesting level.
    Key,
    /// A bare key was seen; expecting the `{` that opens its block.
    Subkey,
    /// Accumulating key text.
    KeyString,
    /// A key string ended; expecting its value, block, or conditional.
    KeyStringEnd,
    /// Accumulating value text.
    ValueString,
    /// A value string ended; expecting end of line or a conditional.
    ValueStringEnd,
    /// Immediately after a backslash inside a quoted string.
    StringEscape,
    /// A `/` was seen; expecting the second character of a comment opener.
    Slash,
    /// Inside a `//` comment, ignoring until end of line.
    LineComment,
    /// Inside a `/* */` comment.
    BlockComment,
    /// A `*` was seen inside a block comment; `/` would close it.
    BlockAsterisk,
    /// Inside a `[...]` conditional.
    Conditional,
    /// A conditional closed; expecting end of line.
    ConditionalEnd,
    /// The root key has closed and no further data is allowed.
    EndOfRoot,
}

impl LexState {
    /// Whether this state is a valid resume target for a line comment or
    /// conditional. Anything else reaching the resume slot at end of line
    /// is an internal invariant violation, reported as a diagnostic.
    pub fn resumable_at_line_end(self) -> bool {
        matches!(
            self,
            LexState::Key
                | LexState::Subkey
                | LexState::KeyStringEnd
                | LexState::ValueStringEnd
                | LexState::EndOfRoot
        )
    }
}
