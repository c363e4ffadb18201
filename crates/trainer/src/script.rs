//! Line-oriented trainer scripts.
//!
//! One command per line, `#` starts a comment:
//!
//! ```text
//! move 0 1        # walk forward
//! sprint on
//! wait 1.5
//! ragdoll
//! wait 2
//! recover
//! track head 1.0
//! target 1 1.6 2
//! push left_hand 0 30 0
//! explode 500 5 1
//! ```

use std::str::FromStr;

use character_core::RigSelector;
use character_core::host::Bone;
use glam::{Vec2, Vec3};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ScriptError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("`{command}` expects {expected}")]
    Arguments {
        command: &'static str,
        expected: &'static str,
    },

    #[error("`{0}` is not a number")]
    InvalidNumber(String),

    #[error("unknown rig channel `{0}`")]
    UnknownChannel(String),

    #[error("unknown bone `{0}`")]
    UnknownBone(String),

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<ScriptError>,
    },
}

/// One trainer action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Knock the character over with a uniform 200 force (only while controllable).
    Ragdoll,
    /// Start the stand-up sequence (only while ragdolled).
    Recover,
    /// Fade out every rig override.
    Reset,
    /// Point the head at the test target.
    Look,
    Track { selector: RigSelector, weight: f32 },
    Untrack { selector: RigSelector },
    /// Move the test target.
    Target(Vec3),
    Move(Vec2),
    Sprint(bool),
    Jump,
    /// Simulate for the given number of seconds.
    Wait(f32),
    Push { bone: Bone, force: Vec3 },
    Explode { force: f32, radius: f32, upwards: f32 },
    Status,
}

impl Command {
    /// Parses one script line. Blank and comment-only lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ScriptError> {
        let line = line.split('#').next().unwrap_or_default();
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match name.to_ascii_lowercase().as_str() {
            "ragdoll" => no_args("ragdoll", &args, Self::Ragdoll)?,
            "recover" => no_args("recover", &args, Self::Recover)?,
            "reset" => no_args("reset", &args, Self::Reset)?,
            "look" => no_args("look", &args, Self::Look)?,
            "jump" => no_args("jump", &args, Self::Jump)?,
            "status" => no_args("status", &args, Self::Status)?,
            "track" => match args.as_slice() {
                [selector] => Self::Track {
                    selector: selector_arg(selector)?,
                    weight: 1.0,
                },
                [selector, weight] => Self::Track {
                    selector: selector_arg(selector)?,
                    weight: number(weight)?,
                },
                _ => return Err(arguments("track", "<channel|all> [weight]")),
            },
            "untrack" => match args.as_slice() {
                [selector] => Self::Untrack {
                    selector: selector_arg(selector)?,
                },
                _ => return Err(arguments("untrack", "<channel|all>")),
            },
            "target" => match args.as_slice() {
                [x, y, z] => Self::Target(vec3(x, y, z)?),
                _ => return Err(arguments("target", "<x> <y> <z>")),
            },
            "move" => match args.as_slice() {
                [x, y] => Self::Move(Vec2::new(number(x)?, number(y)?)),
                _ => return Err(arguments("move", "<x> <y>")),
            },
            "sprint" => match args.as_slice() {
                ["on"] => Self::Sprint(true),
                ["off"] => Self::Sprint(false),
                _ => return Err(arguments("sprint", "on|off")),
            },
            "wait" | "tick" => match args.as_slice() {
                [seconds] => Self::Wait(number(seconds)?),
                _ => return Err(arguments("wait", "<seconds>")),
            },
            "push" => match args.as_slice() {
                [bone, x, y, z] => Self::Push {
                    bone: Bone::from_str(bone)
                        .map_err(|_| ScriptError::UnknownBone((*bone).to_owned()))?,
                    force: vec3(x, y, z)?,
                },
                _ => return Err(arguments("push", "<bone> <x> <y> <z>")),
            },
            "explode" => match args.as_slice() {
                [force, radius] => Self::Explode {
                    force: number(force)?,
                    radius: number(radius)?,
                    upwards: 0.0,
                },
                [force, radius, upwards] => Self::Explode {
                    force: number(force)?,
                    radius: number(radius)?,
                    upwards: number(upwards)?,
                },
                _ => return Err(arguments("explode", "<force> <radius> [upwards]")),
            },
            _ => return Err(ScriptError::UnknownCommand(name.to_owned())),
        };
        Ok(Some(command))
    }
}

/// Parses a whole script, tagging failures with their 1-based line number.
pub fn parse_script(text: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (index, line) in text.lines().enumerate() {
        match Command::parse(line) {
            Ok(Some(command)) => commands.push(command),
            Ok(None) => {}
            Err(source) => {
                return Err(ScriptError::Line {
                    line: index + 1,
                    source: Box::new(source),
                });
            }
        }
    }
    Ok(commands)
}

fn no_args(command: &'static str, args: &[&str], parsed: Command) -> Result<Command, ScriptError> {
    if args.is_empty() {
        Ok(parsed)
    } else {
        Err(arguments(command, "no arguments"))
    }
}

fn arguments(command: &'static str, expected: &'static str) -> ScriptError {
    ScriptError::Arguments { command, expected }
}

fn number(word: &str) -> Result<f32, ScriptError> {
    word.parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ScriptError::InvalidNumber(word.to_owned()))
}

fn vec3(x: &str, y: &str, z: &str) -> Result<Vec3, ScriptError> {
    Ok(Vec3::new(number(x)?, number(y)?, number(z)?))
}

fn selector_arg(word: &str) -> Result<RigSelector, ScriptError> {
    RigSelector::from_str(word).map_err(|_| ScriptError::UnknownChannel(word.to_owned()))
}
