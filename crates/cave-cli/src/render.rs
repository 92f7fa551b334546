//! Turning engine speech into text.
//!
//! Message text carries `%` markers that take the message's parameters in
//! order:
//!
//! - `%1` to `%9`: the next number, right-aligned to that width
//! - `%S`: `s` unless the last number shown was 1
//! - `%W`: the next word as typed; `%L`, `%U`, `%C` lower, upper and capitalized
//! - `%T`: every remaining word, space-separated
//! - `%B`: as many blanks as the next number
//! - `%%`: a literal percent sign
//!
//! A message containing `%!` is not shown at all.

use cave_core::World;
use cave_sim::{Form, Param, Speech};

/// Renders [`Speech`] against one world's text tables.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'w> {
    world: &'w World,
}

impl<'w> Renderer<'w> {
    pub fn new(world: &'w World) -> Self {
        Self { world }
    }

    /// The text for `speech`, or `None` if there is nothing to show.
    pub fn render(&self, speech: &Speech) -> Option<String> {
        match speech {
            Speech::Message { id, params } => {
                let Some(text) = self.world.message(*id) else {
                    log::warn!("no text for message {id}");
                    return None;
                };
                expand(text, params)
            }
            Speech::Location { loc, form } => {
                let location = self.world.location(*loc);
                let text = match (form, &location.short) {
                    (Form::Short, Some(short)) => short.as_str(),
                    _ => location.long.as_str(),
                };
                non_empty(text)
            }
            Speech::Object { obj, state } => self
                .world
                .object(*obj)
                .and_then(|def| def.state_text(*state))
                .and_then(non_empty),
            Speech::Inventory(obj) => self
                .world
                .object(*obj)
                .and_then(|def| def.inventory.as_deref())
                .and_then(non_empty),
            Speech::Threshold(index) => self
                .world
                .thresholds()
                .get(*index)
                .and_then(|t| non_empty(&t.text)),
            Speech::SeedSet(seed) => Some(format!("Seed set to {seed}")),
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

fn param_text(param: Option<&Param>) -> String {
    match param {
        Some(Param::Word(w)) => w.clone(),
        Some(Param::Number(n)) => n.to_string(),
        None => String::new(),
    }
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Substitute `params` into `text`. `None` if the message is suppressed.
fn expand(text: &str, params: &[Param]) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut args = params.iter();
    let mut last_number: Option<i64> = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let Some(&marker) = chars.peek() else {
            out.push('%');
            break;
        };
        chars.next();
        match marker {
            '!' => return None,
            '%' => out.push('%'),
            '1'..='9' => {
                let width = marker.to_digit(10).unwrap_or(1) as usize;
                match args.next() {
                    Some(Param::Number(n)) => {
                        last_number = Some(*n);
                        out.push_str(&format!("{n:>width$}"));
                    }
                    other => out.push_str(&format!("{:>width$}", param_text(other))),
                }
            }
            'S' => {
                if last_number != Some(1) {
                    out.push('s');
                }
            }
            'W' => out.push_str(&param_text(args.next())),
            'L' => out.push_str(&param_text(args.next()).to_lowercase()),
            'U' => out.push_str(&param_text(args.next()).to_uppercase()),
            'C' => out.push_str(&capitalize(&param_text(args.next()))),
            'T' => {
                let rest: Vec<String> = args.by_ref().map(|p| param_text(Some(p))).collect();
                out.push_str(&rest.join(" "));
            }
            'B' => {
                if let Some(Param::Number(n)) = args.next() {
                    let blanks = usize::try_from(*n).unwrap_or(0);
                    out.push_str(&" ".repeat(blanks));
                }
            }
            other => {
                out.push('%');
                out.push(other);
            }
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cave_core::{LocId, ObjId};

    fn number(n: i64) -> Param {
        Param::Number(n)
    }

    fn word(w: &str) -> Param {
        Param::Word(w.to_string())
    }

    #[test]
    fn numbers_are_padded() {
        assert_eq!(expand("[%1]", &[number(7)]).as_deref(), Some("[7]"));
        assert_eq!(expand("[%3]", &[number(7)]).as_deref(), Some("[  7]"));
    }

    #[test]
    fn plurals_follow_the_last_number() {
        let text = "It costs %1 point%S.";
        assert_eq!(expand(text, &[number(1)]).as_deref(), Some("It costs 1 point."));
        assert_eq!(expand(text, &[number(5)]).as_deref(), Some("It costs 5 points."));
    }

    #[test]
    fn word_cases() {
        let params = [word("LaMp")];
        assert_eq!(expand("%W", &params).as_deref(), Some("LaMp"));
        assert_eq!(expand("%L", &params).as_deref(), Some("lamp"));
        assert_eq!(expand("%U", &params).as_deref(), Some("LAMP"));
        assert_eq!(expand("%C what?", &params).as_deref(), Some("Lamp what?"));
    }

    #[test]
    fn remaining_words_and_blanks() {
        let params = [number(2), word("brass"), word("lantern")];
        assert_eq!(expand("<%B>%T", &params).as_deref(), Some("<  >brass lantern"));
    }

    #[test]
    fn literal_and_suppressed() {
        assert_eq!(expand("100%%", &[]).as_deref(), Some("100%"));
        assert_eq!(expand("%!never", &[]), None);
        assert_eq!(expand("trailing %", &[]).as_deref(), Some("trailing %"));
    }

    #[test]
    fn speech_against_the_sample_cave() {
        let world = World::sample().unwrap();
        let renderer = Renderer::new(&world);

        let unknown = Speech::Message {
            id: 254,
            params: vec![word("frobozz")],
        };
        assert_eq!(
            renderer.render(&unknown).as_deref(),
            Some("Sorry, I don't know the word \"frobozz\".")
        );

        let long = renderer.render(&Speech::Location {
            loc: LocId(1),
            form: Form::Long,
        });
        assert_eq!(long.as_deref(), Some(world.location(LocId(1)).long.as_str()));

        let lamp = world.object_named("lamp").unwrap();
        assert!(renderer.render(&Speech::Inventory(lamp)).is_some());
        assert_eq!(
            renderer.render(&Speech::SeedSet(9)).as_deref(),
            Some("Seed set to 9")
        );
        assert_eq!(renderer.render(&Speech::message(u16::MAX)), None);
        assert_eq!(
            renderer.render(&Speech::Object {
                obj: ObjId(u16::MAX),
                state: 0
            }),
            None
        );
    }
}
