//! Verb handling.
//!
//! The turn dispatcher resolves words and objects; everything a verb does
//! once it is known happens behind the [`Actions`] trait. [`StandardActions`]
//! covers the verbs needed to get around: picking things up, putting them
//! down, the lamp, inventory and quitting.

use std::collections::HashMap;

use cave_core::{Fixed, ObjId, VerbId, World, WorldResult};

use crate::console::{Param, Speech};
use crate::context::TurnContext;
use crate::error::SimResult;
use crate::input::Word;
use crate::msg;
use crate::state::Presence;

/// Most objects a player can carry.
pub const CARRY_LIMIT: usize = 7;

/// A verb ready to run.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    /// The verb.
    pub verb: VerbId,
    /// The word the player typed for it.
    pub word: &'a Word,
    /// The object it applies to, if one was named.
    pub object: Option<ObjId>,
}

/// Where the turn goes after a verb ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Done; read the next command.
    Done,
    /// Describe the location again before the next command.
    Redescribe,
    /// The verb does not apply.
    Unknown,
    /// The player woke the dwarves in the repository. The game is over.
    WakeDwarves,
    /// The player confirmed quitting.
    Quit,
}

/// Runs verbs on behalf of the turn dispatcher.
pub trait Actions: std::fmt::Debug {
    /// Carry out `req`.
    fn perform(&mut self, ctx: &mut TurnContext<'_>, req: &Request<'_>) -> SimResult<Flow>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Carry,
    Drop,
    Say,
    Nothing,
    Light,
    Extinguish,
    Walk,
    Quit,
    Find,
    Inventory,
    Wake,
}

/// The verb set every world is expected to define.
#[derive(Debug, Clone)]
pub struct StandardActions {
    verbs: HashMap<VerbId, Verb>,
}

impl StandardActions {
    /// Bind the standard verbs to `world`'s vocabulary.
    pub fn new(world: &World) -> WorldResult<Self> {
        let vocab = world.vocabulary();
        let mut verbs = HashMap::new();
        for (word, verb) in [
            ("carry", Verb::Carry),
            ("drop", Verb::Drop),
            ("say", Verb::Say),
            ("nothing", Verb::Nothing),
            ("light", Verb::Light),
            ("extinguish", Verb::Extinguish),
            ("walk", Verb::Walk),
            ("quit", Verb::Quit),
            ("find", Verb::Find),
            ("inventory", Verb::Inventory),
            ("wake", Verb::Wake),
        ] {
            verbs.insert(vocab.action(word)?, verb);
        }
        Ok(Self { verbs })
    }

    fn intransitive(&self, ctx: &mut TurnContext<'_>, verb: Verb, word: &Word) -> Flow {
        let lamp = ctx.cast.lamp;
        match verb {
            Verb::Inventory => inventory(ctx),
            Verb::Nothing => {
                ctx.say(msg::OK);
                Flow::Done
            }
            Verb::Walk => {
                ctx.say(msg::WHERE);
                Flow::Done
            }
            Verb::Quit => {
                if ctx.ask(msg::REALLY_QUIT, msg::OK, msg::OK) {
                    Flow::Quit
                } else {
                    Flow::Done
                }
            }
            Verb::Light | Verb::Extinguish if ctx.here(lamp) => self.transitive(ctx, verb, lamp),
            _ => {
                ctx.say_with(msg::WHAT_OBJECT, vec![Param::Word(word.text.clone())]);
                Flow::Done
            }
        }
    }

    fn transitive(&self, ctx: &mut TurnContext<'_>, verb: Verb, obj: ObjId) -> Flow {
        match verb {
            Verb::Carry => carry(ctx, obj),
            Verb::Drop => {
                if !ctx.state.toting(obj) {
                    ctx.say(msg::NOT_CARRYING);
                } else {
                    let loc = ctx.state.loc;
                    ctx.state.drop(obj, loc);
                    ctx.say(msg::OK);
                }
                Flow::Done
            }
            Verb::Light if obj == ctx.cast.lamp => {
                if ctx.state.limit < 0 {
                    ctx.say(msg::LAMP_OUT);
                    return Flow::Done;
                }
                ctx.state.set_prop(obj, 1);
                ctx.say(msg::LAMP_ON);
                if ctx.state.was_dark {
                    Flow::Redescribe
                } else {
                    Flow::Done
                }
            }
            Verb::Extinguish if obj == ctx.cast.lamp => {
                ctx.state.set_prop(obj, 0);
                ctx.say(msg::LAMP_OFF);
                if ctx.dark() {
                    ctx.say(msg::PITCH_DARK);
                }
                Flow::Done
            }
            Verb::Wake if obj == ctx.cast.dwarf && ctx.state.closed => {
                ctx.say(msg::DWARVES_AWAKEN);
                Flow::WakeDwarves
            }
            Verb::Find => {
                let loc = ctx.state.loc;
                let dwarf_here = obj == ctx.cast.dwarf
                    && matches!(ctx.state.presence(loc), Presence::Here(_));
                if ctx.state.toting(obj) {
                    ctx.say(msg::ALREADY_CARRYING);
                } else if ctx.state.at(obj, loc) || dwarf_here {
                    ctx.say(msg::RIGHT_HERE);
                } else {
                    ctx.say(msg::ONLY_WHAT_YOU_SEE);
                }
                Flow::Done
            }
            Verb::Inventory => inventory(ctx),
            Verb::Nothing | Verb::Say => {
                ctx.say(msg::OK);
                Flow::Done
            }
            _ => Flow::Unknown,
        }
    }
}

impl Actions for StandardActions {
    fn perform(&mut self, ctx: &mut TurnContext<'_>, req: &Request<'_>) -> SimResult<Flow> {
        let Some(&verb) = self.verbs.get(&req.verb) else {
            return Ok(Flow::Unknown);
        };
        log::debug!("verb {verb:?} on {:?}", req.object);
        Ok(match req.object {
            Some(obj) => self.transitive(ctx, verb, obj),
            None => self.intransitive(ctx, verb, req.word),
        })
    }
}

fn carry(ctx: &mut TurnContext<'_>, obj: ObjId) -> Flow {
    if ctx.state.toting(obj) {
        ctx.say(msg::ALREADY_CARRYING);
    } else if ctx.state.fixed(obj) != Fixed::Movable {
        ctx.say(msg::YOU_JEST);
    } else if ctx.state.holding() >= CARRY_LIMIT {
        ctx.say(msg::CARRY_LIMIT);
    } else {
        ctx.state.carry(obj);
        ctx.say(msg::OK);
    }
    Flow::Done
}

fn inventory(ctx: &mut TurnContext<'_>) -> Flow {
    let bear = ctx.cast.bear;
    let held: Vec<ObjId> = ctx.state.carried().filter(|&o| o != bear).collect();
    if !held.is_empty() {
        ctx.say(msg::NOW_HOLDING);
        for obj in held.iter().copied() {
            ctx.speak(Speech::Inventory(obj));
        }
    }
    if ctx.state.toting(bear) {
        ctx.say(msg::BEAR_FOLLOWS);
    }
    if held.is_empty() {
        ctx.say(msg::NOTHING_CARRIED);
    }
    Flow::Done
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::Fixture;

    fn run(fx: &mut Fixture, verb: &str, object: Option<&str>) -> Flow {
        let mut actions = StandardActions::new(&fx.world).unwrap();
        let id = fx.world.vocabulary().action(verb).unwrap();
        let word = Word::new(verb);
        let object = object.map(|name| fx.obj(name));
        let req = Request {
            verb: id,
            word: &word,
            object,
        };
        actions.perform(&mut fx.ctx(), &req).unwrap()
    }

    #[test]
    fn take_and_drop() {
        let mut fx = Fixture::new();
        let lamp = fx.obj("lamp");
        fx.at(2);
        assert_eq!(run(&mut fx, "take", Some("lamp")), Flow::Done);
        assert!(fx.state.toting(lamp));
        assert_eq!(run(&mut fx, "take", Some("lamp")), Flow::Done);
        fx.at(1);
        assert_eq!(run(&mut fx, "drop", Some("lamp")), Flow::Done);
        assert!(fx.state.at(lamp, cave_core::LocId(1)));
        run(&mut fx, "drop", Some("lamp"));
        assert_eq!(
            fx.console.messages(),
            vec![msg::OK, msg::ALREADY_CARRYING, msg::OK, msg::NOT_CARRYING]
        );
    }

    #[test]
    fn fixed_objects_stay_put() {
        let mut fx = Fixture::new();
        fx.at(3);
        run(&mut fx, "take", Some("grate"));
        assert_eq!(fx.console.messages(), vec![msg::YOU_JEST]);
        assert_eq!(fx.state.holding(), 0);
    }

    #[test]
    fn carrying_is_limited() {
        let mut fx = Fixture::new();
        fx.at(2);
        for name in ["keys", "cage", "rod", "bird", "pillow", "axe", "oyster"] {
            let obj = fx.obj(name);
            fx.state.carry(obj);
        }
        run(&mut fx, "take", Some("lamp"));
        assert_eq!(fx.console.messages(), vec![msg::CARRY_LIMIT]);
        assert!(!fx.state.toting(fx.obj("lamp")));
    }

    #[test]
    fn lighting_the_lamp_in_the_dark() {
        let mut fx = Fixture::new();
        let lamp = fx.obj("lamp");
        fx.at(5);
        fx.state.carry(lamp);
        fx.state.was_dark = true;
        assert_eq!(run(&mut fx, "light", None), Flow::Redescribe);
        assert_eq!(fx.state.prop(lamp), 1);
        assert_eq!(run(&mut fx, "extinguish", Some("lamp")), Flow::Done);
        assert_eq!(fx.state.prop(lamp), 0);
        assert_eq!(
            fx.console.messages(),
            vec![msg::LAMP_ON, msg::LAMP_OFF, msg::PITCH_DARK]
        );
    }

    #[test]
    fn a_dead_lamp_stays_dark() {
        let mut fx = Fixture::new();
        let lamp = fx.obj("lamp");
        fx.at(2);
        fx.state.limit = -1;
        run(&mut fx, "light", Some("lamp"));
        assert_eq!(fx.state.prop(lamp), 0);
        assert_eq!(fx.console.messages(), vec![msg::LAMP_OUT]);
    }

    #[test]
    fn verbs_without_objects_ask_what() {
        let mut fx = Fixture::new();
        fx.at(1);
        run(&mut fx, "take", None);
        run(&mut fx, "light", None);
        assert_eq!(fx.console.transcript().len(), 2);
        assert_eq!(
            fx.console.transcript()[0],
            Speech::Message {
                id: msg::WHAT_OBJECT,
                params: vec![Param::Word("take".into())],
            }
        );
    }

    #[test]
    fn inventory_lists_carried_objects() {
        let mut fx = Fixture::new();
        run(&mut fx, "inventory", None);
        let (keys, bear) = (fx.obj("keys"), fx.obj("bear"));
        fx.state.carry(keys);
        fx.state.carry(bear);
        fx.console.clear();
        run(&mut fx, "inventory", None);
        assert_eq!(
            fx.console.transcript(),
            &[
                Speech::message(msg::NOW_HOLDING),
                Speech::Inventory(keys),
                Speech::message(msg::BEAR_FOLLOWS),
            ]
        );
    }

    #[test]
    fn empty_handed_inventory() {
        let mut fx = Fixture::new();
        run(&mut fx, "inventory", None);
        assert_eq!(fx.console.messages(), vec![msg::NOTHING_CARRIED]);
    }

    #[test]
    fn quitting_needs_confirmation() {
        let mut fx = Fixture::new();
        fx.console.push_line("n");
        assert_eq!(run(&mut fx, "quit", None), Flow::Done);
        fx.console.push_line("y");
        assert_eq!(run(&mut fx, "quit", None), Flow::Quit);
    }

    #[test]
    fn find_tells_what_it_can() {
        let mut fx = Fixture::new();
        fx.at(2);
        run(&mut fx, "find", Some("lamp"));
        run(&mut fx, "find", Some("nugget"));
        assert_eq!(
            fx.console.messages(),
            vec![msg::RIGHT_HERE, msg::ONLY_WHAT_YOU_SEE]
        );
    }

    #[test]
    fn waking_dwarves_only_ends_a_closed_game() {
        let mut fx = Fixture::new();
        assert_eq!(run(&mut fx, "wake", Some("dwarf")), Flow::Unknown);
        fx.state.closed = true;
        assert_eq!(run(&mut fx, "wake", Some("dwarf")), Flow::WakeDwarves);
        assert_eq!(fx.console.messages(), vec![msg::DWARVES_AWAKEN]);
    }
}
