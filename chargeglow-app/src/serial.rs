//! Serial console commands
//!
//! One command per line:
//!
//! | Command              | Effect                                 |
//! |----------------------|----------------------------------------|
//! | `render true/false`  | enable or disable automatic rendering  |
//! | `clean`              | blank the grid and the strip           |
//! | `draw <x> <y> <col>` | paint one cell and show it             |
//! | `sound`              | play the alert pattern                 |
//! | `logs`               | print the log, oldest first            |

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use chargeglow_core::traits::Buzzer;
use chargeglow_display::{Color, LedStrip};

use crate::controller::Controller;

/// Parsed console command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Render(bool),
    Clean,
    Draw { x: i32, y: i32, color: Color },
    Sound,
    Logs,
}

/// Command parse errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Blank line
    Empty,
    /// Not a known command
    Unknown,
    /// `draw` without numeric x, y and a color
    InvalidDraw,
    /// `render` with something other than true or false
    InvalidRender,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "empty command"),
            CommandError::Unknown => write!(f, "unknown command"),
            CommandError::InvalidDraw => write!(f, "Invalid draw command. Format: draw x y color"),
            CommandError::InvalidRender => write!(f, "Invalid render command. Format: render true|false"),
        }
    }
}

impl Command {
    /// Parse one console line
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }

        let (word, args) = match line.split_once(' ') {
            Some((word, args)) => (word, args.trim()),
            None => (line, ""),
        };

        match (word, args) {
            ("render", "true") => Ok(Command::Render(true)),
            ("render", "false") => Ok(Command::Render(false)),
            ("render", _) => Err(CommandError::InvalidRender),
            ("clean", "") => Ok(Command::Clean),
            ("sound", "") => Ok(Command::Sound),
            ("logs", "") => Ok(Command::Logs),
            ("draw", args) => parse_draw(args),
            _ => Err(CommandError::Unknown),
        }
    }
}

fn parse_draw(args: &str) -> Result<Command, CommandError> {
    let mut parts = args.splitn(3, ' ');
    let (Some(x), Some(y), Some(color)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CommandError::InvalidDraw);
    };
    let x = x.parse().map_err(|_| CommandError::InvalidDraw)?;
    let y = y.parse().map_err(|_| CommandError::InvalidDraw)?;
    Ok(Command::Draw {
        x,
        y,
        color: Color::from_name(color),
    })
}

/// Parse and run one console line, returning lines to print
pub fn execute<S: LedStrip, B: Buzzer>(
    line: &str,
    controller: &mut Controller<S, B>,
    now_ms: u64,
) -> Vec<String> {
    controller.set_clock(now_ms);

    let command = match Command::parse(line) {
        Ok(command) => command,
        Err(CommandError::Empty) => return Vec::new(),
        Err(e @ (CommandError::InvalidDraw | CommandError::InvalidRender)) => {
            controller.log_mut().error(format_args!("{}", e));
            return Vec::new();
        }
        Err(CommandError::Unknown) => {
            controller
                .log_mut()
                .debug(format_args!("Ignoring console input: {}", line.trim()));
            return Vec::new();
        }
    };

    let mut out = Vec::new();
    match command {
        Command::Render(enabled) => controller.set_render_enabled(enabled),
        Command::Clean => controller.clean(),
        Command::Draw { x, y, color } => {
            controller.draw(x, y, color);
            out.push(format!(
                "Drawing pixel at ({}, {}) with color {}",
                x,
                y,
                color.name()
            ));
        }
        Command::Sound => {
            controller.log_mut().info(format_args!("Playing sound"));
            controller.play_alert();
        }
        Command::Logs => {
            out.push(String::from("--- Last Messages ---"));
            for (n, entry) in controller.log().iter_oldest_first().enumerate() {
                out.push(format!("{}: {}", n + 1, entry.as_str()));
            }
            out.push(String::from("--- End of Logs ---"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("render true"), Ok(Command::Render(true)));
        assert_eq!(Command::parse("  render false \r"), Ok(Command::Render(false)));
        assert_eq!(Command::parse("clean"), Ok(Command::Clean));
        assert_eq!(Command::parse("sound"), Ok(Command::Sound));
        assert_eq!(Command::parse("logs"), Ok(Command::Logs));
    }

    #[test]
    fn test_parse_draw() {
        assert_eq!(
            Command::parse("draw 3 5 magenta"),
            Ok(Command::Draw {
                x: 3,
                y: 5,
                color: Color::Magenta
            })
        );
        // Unknown color names paint black
        assert_eq!(
            Command::parse("draw 0 0 purple"),
            Ok(Command::Draw {
                x: 0,
                y: 0,
                color: Color::Black
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Command::parse(""), Err(CommandError::Empty));
        assert_eq!(Command::parse("draw 1 2"), Err(CommandError::InvalidDraw));
        assert_eq!(Command::parse("draw a 2 red"), Err(CommandError::InvalidDraw));
        assert_eq!(Command::parse("render maybe"), Err(CommandError::InvalidRender));
        assert_eq!(Command::parse("clean now"), Err(CommandError::Unknown));
        assert_eq!(Command::parse("reboot"), Err(CommandError::Unknown));
    }
}
