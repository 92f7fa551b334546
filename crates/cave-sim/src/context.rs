use cave_core::{Conditions, LocId, Location, MessageId, ObjId, ObjectDef, World, WorldError};

use crate::cast::Cast;
use crate::config::GameConfig;
use crate::console::{Console, Param, Speech};
use crate::error::SimResult;
use crate::input::Input;
use crate::msg;
use crate::rng::Lcg;
use crate::state::GameState;

/// Everything a component may touch while it handles one step of a turn.
pub struct TurnContext<'a> {
    /// The world being played.
    pub world: &'a World,
    /// Named objects and words.
    pub cast: &'a Cast,
    /// Session tuning.
    pub config: &'a GameConfig,
    /// The game state, lent for this step only.
    pub state: &'a mut GameState,
    /// The session's only source of randomness.
    pub rng: &'a mut Lcg,
    /// Where speech goes and command lines come from.
    pub console: &'a mut dyn Console,
}

impl<'a> TurnContext<'a> {
    /// Speak message `id`. Message 0 is silence.
    pub fn say(&mut self, id: MessageId) {
        if id != 0 {
            self.console.speak(Speech::message(id));
        }
    }

    /// Speak message `id` with parameters.
    pub fn say_with(&mut self, id: MessageId, params: Vec<Param>) {
        self.console.speak(Speech::Message { id, params });
    }

    /// Speak anything.
    pub fn speak(&mut self, speech: Speech) {
        self.console.speak(speech);
    }

    /// Ask a yes/no question until answered. Speaks `yes` or `no` after the
    /// answer. End of input counts as "no", without the reply.
    pub fn ask(&mut self, question: MessageId, yes: MessageId, no: MessageId) -> bool {
        loop {
            self.say(question);
            let Some(line) = self.console.read_line() else {
                return false;
            };
            let reply = Input::parse(&line).map(|input| input.first.key);
            match reply.as_deref() {
                Some("yes" | "y") => {
                    self.say(yes);
                    return true;
                }
                Some("no" | "n") => {
                    self.say(no);
                    return false;
                }
                _ => self.say(msg::PLEASE_ANSWER),
            }
        }
    }

    /// The player's location.
    pub fn location(&self) -> &'a Location {
        self.world.location(self.state.loc)
    }

    /// Static definition of an object.
    pub fn def(&self, obj: ObjId) -> SimResult<&'a ObjectDef> {
        Ok(self
            .world
            .object(obj)
            .ok_or(WorldError::UnknownObject(obj))?)
    }

    /// The object is carried or at the player's location.
    pub fn here(&self, obj: ObjId) -> bool {
        self.state.here(obj)
    }

    /// `loc` is unlit: no light of its own, and no lit lamp present.
    pub fn dark_at(&self, loc: LocId) -> bool {
        let lamp = self.cast.lamp;
        !self.world.location(loc).has(Conditions::LIGHT)
            && (self.state.prop(lamp) == 0 || !self.state.here(lamp))
    }

    /// The player's location is unlit.
    pub fn dark(&self) -> bool {
        self.dark_at(self.state.loc)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use cave_core::{LocId, ObjId, World};

    use super::TurnContext;
    use crate::cast::Cast;
    use crate::config::GameConfig;
    use crate::console::ScriptConsole;
    use crate::rng::Lcg;
    use crate::state::GameState;

    /// A world, a fresh state and a scripted console.
    pub(crate) struct Fixture {
        pub world: World,
        pub cast: Cast,
        pub config: GameConfig,
        pub state: GameState,
        pub rng: Lcg,
        pub console: ScriptConsole,
    }

    impl Fixture {
        pub fn new() -> Self {
            Self::with_world(World::sample().unwrap())
        }

        pub fn with_world(world: World) -> Self {
            let config = GameConfig::default();
            let cast = Cast::new(&world).unwrap();
            let state = GameState::new(&world, &config);
            Self {
                rng: Lcg::new(config.seed),
                world,
                cast,
                config,
                state,
                console: ScriptConsole::default(),
            }
        }

        pub fn ctx(&mut self) -> TurnContext<'_> {
            TurnContext {
                world: &self.world,
                cast: &self.cast,
                config: &self.config,
                state: &mut self.state,
                rng: &mut self.rng,
                console: &mut self.console,
            }
        }

        pub fn obj(&self, name: &str) -> ObjId {
            self.world.object_named(name).unwrap()
        }

        pub fn at(&mut self, loc: u16) -> &mut Self {
            self.state.loc = LocId(loc);
            self.state.new_loc = LocId(loc);
            self
        }

        /// Take every adversary out of play.
        pub fn calm(&mut self) -> &mut Self {
            for member in &mut self.state.adversaries {
                member.loc = LocId::NOWHERE;
                member.old_loc = LocId::NOWHERE;
            }
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::Fixture;
    use super::*;

    #[test]
    fn ask_repeats_until_answered() {
        let mut fx = Fixture::new();
        fx.console.push_line("maybe");
        fx.console.push_line("Y");
        assert!(fx.ctx().ask(msg::REALLY_QUIT, msg::OK, 0));
        assert_eq!(
            fx.console.messages(),
            vec![msg::REALLY_QUIT, msg::PLEASE_ANSWER, msg::REALLY_QUIT, msg::OK]
        );
    }

    #[test]
    fn ask_at_end_of_input_is_no() {
        let mut fx = Fixture::new();
        assert!(!fx.ctx().ask(msg::REALLY_QUIT, msg::OK, msg::OK));
        assert_eq!(fx.console.messages(), vec![msg::REALLY_QUIT]);
    }

    #[test]
    fn lamp_lights_dark_places() {
        let mut fx = Fixture::new();
        let lamp = fx.obj("lamp");
        fx.at(5);
        assert!(fx.ctx().dark());
        fx.state.carry(lamp);
        assert!(fx.ctx().dark());
        fx.state.set_prop(lamp, 1);
        assert!(!fx.ctx().dark());
        fx.at(1);
        fx.state.set_prop(lamp, 0);
        assert!(!fx.ctx().dark());
    }
}
