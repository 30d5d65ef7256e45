/// Command-line grammar: `verb name [f32 [f32 [f32]]]`
use nom::{
    bytes::complete::take_till1,
    character::complete::{alpha1, multispace0, multispace1},
    combinator::eof,
    multi::many_m_n,
    number::complete::float,
    sequence::preceded,
    IResult,
};

use crate::error::CommandError;

/// Registry mutation requested by a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// Add to the model's accumulated rotation angles
    Rotate,
    /// Move every point of the model
    Translate,
}

/// A parsed, well-formed command aimed at one model
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub verb: Verb,
    pub model: String,
    pub dx: f32,
    pub dy: f32,
    pub dz: f32,
}

impl Command {
    pub fn rotate(model: impl Into<String>, dx: f32, dy: f32, dz: f32) -> Self {
        Self {
            verb: Verb::Rotate,
            model: model.into(),
            dx,
            dy,
            dz,
        }
    }

    pub fn translate(model: impl Into<String>, dx: f32, dy: f32, dz: f32) -> Self {
        Self {
            verb: Verb::Translate,
            model: model.into(),
            dx,
            dy,
            dz,
        }
    }
}

/// One line of operator input
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Command(Command),
    Quit,
}

/// Parse one line of operator input
pub fn parse_line(line: &str) -> Result<Input, CommandError> {
    if line.trim().is_empty() {
        return Err(CommandError::Empty);
    }

    let malformed = || CommandError::Malformed(line.trim().to_string());
    let (rest, verb) = parse_verb(line).map_err(|_| malformed())?;

    let verb = match verb.to_ascii_lowercase().as_str() {
        "rotate" => Verb::Rotate,
        "translate" => Verb::Translate,
        "draw" => {
            log::debug!("`draw` is treated as `translate`");
            Verb::Translate
        }
        "quit" | "exit" => {
            return parse_end(rest).map(|_| Input::Quit).map_err(|_| malformed());
        }
        other => return Err(CommandError::UnknownVerb(other.to_string())),
    };

    if rest.trim().is_empty() {
        return Err(CommandError::MissingModelName(verb_name(verb).to_string()));
    }

    let (_, (model, deltas)) = parse_operands(rest).map_err(|_| malformed())?;
    if deltas.iter().any(|d| !d.is_finite()) {
        return Err(malformed());
    }
    let delta = |i: usize| deltas.get(i).copied().unwrap_or(0.0);

    Ok(Input::Command(Command {
        verb,
        model: model.to_string(),
        dx: delta(0),
        dy: delta(1),
        dz: delta(2),
    }))
}

fn verb_name(verb: Verb) -> &'static str {
    match verb {
        Verb::Rotate => "rotate",
        Verb::Translate => "translate",
    }
}

fn parse_verb(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, alpha1)(input)
}

fn parse_operands(input: &str) -> IResult<&str, (&str, Vec<f32>)> {
    let (input, model) = preceded(multispace1, take_till1(char::is_whitespace))(input)?;
    let (input, deltas) = many_m_n(0, 3, preceded(multispace1, float))(input)?;
    let (input, _) = parse_end(input)?;
    Ok((input, (model, deltas)))
}

fn parse_end(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, eof)(input)
}
