//! Styling helpers for terminal output.
//!
//! The [`GameStyle`] trait provides a set of convenience methods for applying
//! ANSI styling via the `colored` crate. Implementations for `&str` and
//! `String` are provided so string literals can be styled directly.

use colored::{ColoredString, Colorize};

/// Convenience trait for applying color and style to text output.
pub trait GameStyle {
    fn item_style(&self) -> ColoredString;
    fn npc_style(&self) -> ColoredString;
    fn room_title_style(&self) -> ColoredString;
    fn description_style(&self) -> ColoredString;
    fn speech_style(&self) -> ColoredString;
    fn exit_open_style(&self) -> ColoredString;
    fn exit_locked_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
    fn subheading_style(&self) -> ColoredString;
    fn success_style(&self) -> ColoredString;
}

impl GameStyle for &str {
    fn item_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40)
    }
    fn npc_style(&self) -> ColoredString {
        self.truecolor(13, 130, 60).underline()
    }
    fn room_title_style(&self) -> ColoredString {
        self.truecolor(223, 77, 10).underline()
    }
    fn description_style(&self) -> ColoredString {
        self.italic().truecolor(102, 208, 250)
    }
    fn speech_style(&self) -> ColoredString {
        self.italic().truecolor(110, 220, 110)
    }
    fn exit_open_style(&self) -> ColoredString {
        self.italic().truecolor(220, 180, 40)
    }
    fn exit_locked_style(&self) -> ColoredString {
        self.italic().truecolor(200, 50, 50)
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
    fn subheading_style(&self) -> ColoredString {
        self.underline()
    }
    fn success_style(&self) -> ColoredString {
        self.italic().truecolor(230, 230, 30)
    }
}

impl GameStyle for String {
    fn item_style(&self) -> ColoredString {
        self.as_str().item_style()
    }
    fn npc_style(&self) -> ColoredString {
        self.as_str().npc_style()
    }
    fn room_title_style(&self) -> ColoredString {
        self.as_str().room_title_style()
    }
    fn description_style(&self) -> ColoredString {
        self.as_str().description_style()
    }
    fn speech_style(&self) -> ColoredString {
        self.as_str().speech_style()
    }
    fn exit_open_style(&self) -> ColoredString {
        self.as_str().exit_open_style()
    }
    fn exit_locked_style(&self) -> ColoredString {
        self.as_str().exit_locked_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
    fn subheading_style(&self) -> ColoredString {
        self.as_str().subheading_style()
    }
    fn success_style(&self) -> ColoredString {
        self.as_str().success_style()
    }
}
