/*
 * Command Module
 *
 * Parses the chat commands that steer the flock:
 *
 *   color leader | random | hue <value> | rainbow [<speed>]
 *   speed <value>
 *
 * A leading `!` is accepted. Anything that does not parse is ignored,
 * so `parse` returns None rather than an error.
 */

use crate::color::ColorMode;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Color(ColorMode),
    /// Rainbow mode; `None` keeps the current rainbow speed.
    Rainbow(Option<f32>),
    Speed(f32),
}

impl Command {
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        let line = line.strip_prefix('!').unwrap_or(line);
        let mut words = line.split_whitespace();

        let keyword = words.next()?.to_ascii_lowercase();
        match keyword.as_str() {
            "color" | "colour" => parse_color(words),
            "speed" => number(words.next()?).map(Command::Speed),
            _ => None,
        }
    }
}

fn parse_color<'a>(mut words: impl Iterator<Item = &'a str>) -> Option<Command> {
    let predicate = words.next()?.to_ascii_lowercase();
    match predicate.as_str() {
        "leader" => Some(Command::Color(ColorMode::Leader)),
        "random" => Some(Command::Color(ColorMode::Random)),
        "hue" => number(words.next()?).map(|hue| Command::Color(ColorMode::FixedHue(hue))),
        "rainbow" => match words.next() {
            // A speed that is present but unreadable voids the whole command
            Some(word) => number(word).map(|speed| Command::Rainbow(Some(speed))),
            None => Some(Command::Rainbow(None)),
        },
        _ => None,
    }
}

fn number(word: &str) -> Option<f32> {
    word.parse::<f32>().ok().filter(|value| value.is_finite())
}
