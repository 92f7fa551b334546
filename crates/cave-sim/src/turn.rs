//! The turn dispatcher.
//!
//! [`Game`] owns the session: the state, the generator, the verb handlers.
//! Each call to [`Game::command`] runs the turn loop from arrival at the
//! chosen destination up to the next command that moves the player, or
//! until the session ends.
//!
//! The loop is a small state machine over [`Phase`]. Every short-circuit
//! in a turn (a death, a redescription, a word that needs a second look)
//! re-enters a named phase instead of jumping around.

use cave_core::{Conditions, LocId, Liquid, MotionId, ObjId, Token, VerbId, World};

use crate::actions::{Actions, Flow, Request, StandardActions};
use crate::adversary::{self, Survival};
use crate::cast::Cast;
use crate::config::GameConfig;
use crate::console::{Console, Form, Param, Speech};
use crate::context::TurnContext;
use crate::death::{self, Fate};
use crate::endgame::{self, Transition};
use crate::error::SimResult;
use crate::hints;
use crate::input::{Input, Word};
use crate::msg;
use crate::rng::Lcg;
use crate::state::{GameState, KnifeSpot, Presence};
use crate::travel::{self, Travel};

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The player quit.
    Quit,
    /// Input ran out.
    EndOfInput,
    /// The player died for good.
    Died,
    /// The player woke the dwarves in the repository.
    DwarvesAwoken,
}

/// A game session.
#[derive(Debug)]
pub struct Game<'w> {
    world: &'w World,
    cast: Cast,
    config: GameConfig,
    state: GameState,
    rng: Lcg,
    actions: Box<dyn Actions>,
}

impl<'w> Game<'w> {
    /// Set up a new game in `world`.
    pub fn new(world: &'w World, config: GameConfig) -> SimResult<Self> {
        let cast = Cast::new(world)?;
        let actions = Box::new(StandardActions::new(world)?);
        let state = GameState::new(world, &config);
        let rng = Lcg::new(config.seed);
        log::info!("new game, seed {}", config.seed);
        Ok(Self {
            world,
            cast,
            config,
            state,
            rng,
            actions,
        })
    }

    /// Replace the verb handlers.
    pub fn with_actions(mut self, actions: Box<dyn Actions>) -> Self {
        self.actions = actions;
        self
    }

    /// The world being played.
    pub fn world(&self) -> &'w World {
        self.world
    }

    /// The session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable game state, for setting up scenarios.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// The session's random generator.
    pub fn rng(&self) -> &Lcg {
        &self.rng
    }

    fn turn<'a>(&'a mut self, console: &'a mut dyn Console) -> Turn<'a> {
        Turn {
            ctx: TurnContext {
                world: self.world,
                cast: &self.cast,
                config: &self.config,
                state: &mut self.state,
                rng: &mut self.rng,
                console,
            },
            actions: self.actions.as_mut(),
            input: None,
            verb: None,
        }
    }

    /// Opening question. Asking for instructions buys a longer-lasting lamp.
    pub fn start(&mut self, console: &mut dyn Console) {
        let mut turn = self.turn(console);
        let ctx = &mut turn.ctx;
        if ctx.config.ask_instructions {
            ctx.state.novice = ctx.ask(msg::WANT_INSTRUCTIONS, msg::INSTRUCTIONS, 0);
        }
        ctx.state.limit = if ctx.state.novice {
            ctx.config.novice_lamp_limit
        } else {
            ctx.config.lamp_limit
        };
    }

    /// Run the turn loop until the player moves or the session ends.
    /// Returns the ending, if there was one.
    pub fn command(&mut self, console: &mut dyn Console) -> SimResult<Option<Ending>> {
        self.turn(console).run()
    }

    /// Play a whole session.
    pub fn play(&mut self, console: &mut dyn Console) -> SimResult<Ending> {
        self.start(console);
        loop {
            if let Some(ending) = self.command(console)? {
                log::info!("game over: {ending:?} after {} turns", self.state.turns);
                return Ok(ending);
            }
        }
    }
}

/// A step of the turn loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Commit the chosen destination and let the adversaries move.
    Arrive,
    /// Describe the location and what lies there.
    Describe,
    /// Forget the current verb and object.
    ClearObject,
    /// Offer hints, then read and account for a new command.
    Prompt,
    /// Rewrite `enter` phrases.
    Preprocess,
    /// Count habits worth a remark.
    Count,
    /// Look up the first word.
    Lookup,
    /// Run the verb.
    Act,
    /// Leave the loop.
    Finished(Option<Ending>),
}

struct Turn<'a> {
    ctx: TurnContext<'a>,
    actions: &'a mut dyn Actions,
    input: Option<Input>,
    verb: Option<(VerbId, Word)>,
}

impl Turn<'_> {
    fn run(&mut self) -> SimResult<Option<Ending>> {
        let mut phase = Phase::Arrive;
        loop {
            phase = match phase {
                Phase::Arrive => self.arrive()?,
                Phase::Describe => self.describe()?,
                Phase::ClearObject => self.clear_object(),
                Phase::Prompt => self.prompt(),
                Phase::Preprocess => self.preprocess(),
                Phase::Count => self.count(),
                Phase::Lookup => self.lookup()?,
                Phase::Act => self.act()?,
                Phase::Finished(ending) => return Ok(ending),
            };
        }
    }

    fn die(&mut self) -> Phase {
        match death::croak(&mut self.ctx) {
            Fate::Revived => Phase::Describe,
            Fate::Ended => Phase::Finished(Some(Ending::Died)),
        }
    }

    fn arrive(&mut self) -> SimResult<Phase> {
        let ctx = &mut self.ctx;
        let (loc, new_loc) = (ctx.state.loc, ctx.state.new_loc);
        if ctx.state.closing && !new_loc.is_nowhere() && ctx.world.location(new_loc).outside() {
            ctx.say(msg::EXIT_CLOSED);
            ctx.state.new_loc = loc;
            if !ctx.state.panic {
                ctx.state.clock2 = ctx.config.panic_clock;
            }
            ctx.state.panic = true;
        }

        let new_loc = ctx.state.new_loc;
        let here = ctx.location();
        if new_loc != loc && !here.forced && !here.has(Conditions::NO_PIRATE) {
            let generic = ctx.state.antagonist();
            let blocked = ctx.state.adversaries[..generic]
                .iter()
                .any(|m| m.old_loc == new_loc && m.seen);
            if blocked {
                ctx.state.new_loc = loc;
                ctx.say(msg::DWARF_BLOCKS);
            }
        }

        ctx.state.loc = ctx.state.new_loc;
        if adversary::advance(ctx)? == Survival::Killed {
            return Ok(self.die());
        }
        Ok(Phase::Describe)
    }

    fn describe(&mut self) -> SimResult<Phase> {
        let ctx = &mut self.ctx;
        let loc = ctx.state.loc;
        let here = ctx.location();
        let seen = ctx.state.abbrev.get(loc.index()).copied().unwrap_or(0);
        let form = if seen % ctx.config.abbreviate_every.max(1) == 0 || here.short.is_none() {
            Form::Long
        } else {
            Form::Short
        };

        let dark = ctx.dark();
        let description = if !here.forced && dark {
            if ctx.state.was_dark && ctx.rng.pct(ctx.config.dark_fall_chance) {
                ctx.say(msg::FELL_IN_PIT);
                ctx.state.old_loc2 = loc;
                return Ok(self.die());
            }
            Speech::message(msg::PITCH_DARK)
        } else {
            Speech::Location { loc, form }
        };
        if ctx.state.toting(ctx.cast.bear) {
            ctx.say(msg::BEAR_FOLLOWS);
        }
        ctx.speak(description);

        if here.forced {
            return Ok(match travel::player_move(ctx, None, MotionId::FORCED)? {
                Travel::Done => Phase::Finished(None),
                Travel::Died => self.die(),
            });
        }
        if loc == ctx.world.landmarks().y2 && ctx.rng.pct(25) && !ctx.state.closing {
            ctx.say(msg::HOLLOW_VOICE);
        }
        if !dark {
            list_objects(ctx, loc)?;
        }
        Ok(Phase::ClearObject)
    }

    fn clear_object(&mut self) -> Phase {
        self.verb = None;
        let state = &mut *self.ctx.state;
        state.old_obj = state.object.take();
        Phase::Prompt
    }

    fn prompt(&mut self) -> Phase {
        let ctx = &mut self.ctx;
        hints::check(ctx);

        if ctx.state.closed {
            let oyster = ctx.cast.oyster;
            if ctx.state.prop(oyster) < 0 && ctx.state.toting(oyster) {
                ctx.speak(Speech::Object {
                    obj: oyster,
                    state: 1,
                });
            }
            let carried: Vec<ObjId> = ctx.state.carried().collect();
            for obj in carried {
                let prop = ctx.state.prop(obj);
                if prop < 0 {
                    ctx.state.set_prop(obj, -1 - prop);
                }
            }
        }

        let loc = ctx.state.loc;
        ctx.state.was_dark = ctx.dark();
        if let KnifeSpot::At(spot) = ctx.state.knife {
            if spot != loc {
                ctx.state.knife = KnifeSpot::Hidden;
            }
        }

        let input = loop {
            let Some(line) = ctx.console.read_line() else {
                return Phase::Finished(Some(Ending::EndOfInput));
            };
            if let Some(input) = Input::parse(&line) {
                break input;
            }
        };
        log::debug!("command {:?}", input.raw);
        self.input = Some(input);

        let ctx = &mut self.ctx;
        ctx.state.turns += 1;
        let index = ctx.state.threshold_index;
        if let Some(threshold) = ctx.world.thresholds().get(index) {
            if ctx.state.turns == threshold.turns + 1 {
                ctx.speak(Speech::Threshold(index));
                ctx.state.turn_penalty += threshold.penalty;
                ctx.state.threshold_index += 1;
            }
        }

        match endgame::tick(ctx) {
            Transition::Closed => return Phase::Finished(None),
            Transition::Warned => {}
            Transition::None => endgame::lamp_check(ctx),
        }
        Phase::Preprocess
    }

    fn preprocess(&mut self) -> Phase {
        let Some(input) = self.input.as_mut() else {
            return Phase::ClearObject;
        };
        let ctx = &mut self.ctx;
        let vocab = ctx.world.vocabulary();
        if vocab.lookup(&input.first.text) != Some(Token::Motion(ctx.cast.enter)) {
            return Phase::Count;
        }
        let Some(second) = input.second.take() else {
            return Phase::Count;
        };
        match vocab.lookup(&second.text) {
            Some(Token::Motion(m)) if m == ctx.cast.stream => {}
            Some(Token::Object(o)) if o == ctx.cast.water => {}
            _ => {
                input.first = second;
                return Phase::Count;
            }
        }
        let wet = ctx.location().liquid() == Some(Liquid::Water);
        ctx.say(if wet { msg::FEET_WET } else { msg::WHERE });
        Phase::ClearObject
    }

    fn count(&mut self) -> Phase {
        let Some(input) = self.input.as_ref() else {
            return Phase::ClearObject;
        };
        let state = &mut *self.ctx.state;
        if input.first.text.eq_ignore_ascii_case("west") {
            state.west_count += 1;
            if state.west_count == 10 {
                self.ctx.say(msg::TYPE_W);
            }
        } else if input.first.text.eq_ignore_ascii_case("go") && input.second.is_some() {
            state.go_count += 1;
            if state.go_count == 10 {
                self.ctx.say(msg::GO_UNNEEDED);
            }
        }
        Phase::Lookup
    }

    /// Move on to the second word, if there is one.
    fn second_word(&mut self) -> Option<Phase> {
        let input = self.input.as_mut()?;
        let second = input.second.take()?;
        input.first = second;
        Some(Phase::Count)
    }

    fn lookup(&mut self) -> SimResult<Phase> {
        let Some(input) = self.input.as_ref() else {
            return Ok(Phase::ClearObject);
        };
        let first = input.first.clone();
        let has_second = input.second.is_some();
        let ctx = &mut self.ctx;

        match ctx.world.vocabulary().lookup(&first.text) {
            None => {
                if let Some(seed) = self.reseed() {
                    let ctx = &mut self.ctx;
                    ctx.rng.set_seed(seed);
                    ctx.speak(Speech::SeedSet(seed));
                    ctx.state.turns = ctx.state.turns.saturating_sub(1);
                    log::info!("reseeded with {seed}");
                    return Ok(Phase::Finished(None));
                }
                self.ctx
                    .say_with(msg::UNKNOWN_WORD, vec![Param::Word(first.text)]);
                Ok(Phase::Prompt)
            }
            Some(Token::Motion(motion)) => {
                let verb = self.verb.as_ref().map(|(v, _)| *v);
                Ok(match travel::player_move(ctx, verb, motion)? {
                    Travel::Done => Phase::Finished(None),
                    Travel::Died => self.die(),
                })
            }
            Some(Token::Object(obj)) => {
                ctx.state.object = Some(obj);
                if !ctx.here(obj) {
                    if let Some(phase) = self.missing_object(obj, &first, has_second) {
                        return Ok(phase);
                    }
                }
                if let Some(phase) = self.second_word() {
                    return Ok(phase);
                }
                if self.verb.is_some() {
                    return Ok(Phase::Act);
                }
                self.ctx
                    .say_with(msg::DO_WHAT, vec![Param::Word(first.text)]);
                Ok(Phase::Prompt)
            }
            Some(Token::Action(verb)) => {
                self.verb = Some((verb, first));
                Ok(self.second_word().unwrap_or(Phase::Act))
            }
            Some(Token::Message(id)) => {
                ctx.say(id);
                Ok(Phase::ClearObject)
            }
        }
    }

    /// The `seed N` debug command.
    fn reseed(&self) -> Option<u64> {
        let input = self.input.as_ref()?;
        if !input.first.text.eq_ignore_ascii_case("seed") {
            return None;
        }
        input.second.as_ref()?.text.parse().ok()
    }

    /// The player named an object that is not here. Returns where to go
    /// next, or `None` if the object may be used anyway.
    fn missing_object(&mut self, obj: ObjId, word: &Word, has_second: bool) -> Option<Phase> {
        let ctx = &mut self.ctx;
        let cast = ctx.cast;
        let loc = ctx.state.loc;
        if cast.knife == Some(obj) && ctx.state.knife == KnifeSpot::At(loc) {
            ctx.state.knife = KnifeSpot::Cautioned;
            ctx.say(msg::KNIVES_VANISH);
            return Some(Phase::ClearObject);
        }
        if obj == cast.dwarf && matches!(ctx.state.presence(loc), Presence::Here(_)) {
            return None;
        }
        if obj == cast.rod && ctx.here(cast.rod2) {
            ctx.state.object = Some(cast.rod2);
            return None;
        }
        let searching = self
            .verb
            .as_ref()
            .is_some_and(|(v, _)| *v == cast.find || *v == cast.inventory);
        if searching && !has_second {
            return None;
        }
        self.ctx
            .say_with(msg::NO_SEE, vec![Param::Word(word.text.clone())]);
        Some(Phase::ClearObject)
    }

    fn act(&mut self) -> SimResult<Phase> {
        let Some((verb, word)) = self.verb.as_ref() else {
            return Ok(Phase::ClearObject);
        };
        let req = Request {
            verb: *verb,
            word,
            object: self.ctx.state.object,
        };
        let flow = self.actions.perform(&mut self.ctx, &req)?;
        Ok(match flow {
            Flow::Done => Phase::ClearObject,
            Flow::Redescribe => Phase::Describe,
            Flow::Unknown => {
                let text = word.text.clone();
                self.ctx
                    .say_with(msg::DONT_UNDERSTAND, vec![Param::Word(text)]);
                // Drop the object without making it the previous one.
                self.ctx.state.object = None;
                Phase::Prompt
            }
            Flow::WakeDwarves => Phase::Finished(Some(Ending::DwarvesAwoken)),
            Flow::Quit => Phase::Finished(Some(Ending::Quit)),
        })
    }
}

/// Describe the objects at `loc`, marking treasures as found.
fn list_objects(ctx: &mut TurnContext<'_>, loc: LocId) -> SimResult<()> {
    if let Some(count) = ctx.state.abbrev.get_mut(loc.index()) {
        *count += 1;
    }
    let present: Vec<ObjId> = ctx.state.objects_at(loc).collect();
    for obj in present {
        let mut prop = ctx.state.prop(obj);
        if prop < 0 {
            if ctx.state.closed {
                continue;
            }
            let def = ctx.def(obj)?;
            prop = def.found_state;
            ctx.state.set_prop(obj, prop);
            if def.treasure {
                ctx.state.tally = ctx.state.tally.saturating_sub(1);
                log::debug!("found treasure {obj}, {} to go", ctx.state.tally);
            }
        }
        ctx.speak(Speech::Object { obj, state: prop });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptConsole;
    use crate::state::{Activation, Endgame};

    fn quiet() -> GameConfig {
        GameConfig::default().with_instructions(false)
    }

    fn calm(game: &mut Game<'_>) {
        let state = game.state_mut();
        state.activation = Activation::Active;
        for member in &mut state.adversaries {
            member.loc = LocId::NOWHERE;
            member.old_loc = LocId::NOWHERE;
        }
    }

    const TO_THE_FISSURE: [&str; 7] = ["in", "take lamp", "light lamp", "xyzzy", "w", "w", "down"];

    #[test]
    fn treasures_are_tallied_once() {
        let world = World::sample().unwrap();
        let mut game = Game::new(&world, quiet()).unwrap();
        calm(&mut game);
        let mut console = ScriptConsole::new(TO_THE_FISSURE);
        game.start(&mut console);
        while console.remaining() > 0 {
            game.command(&mut console).unwrap();
        }
        assert_eq!(game.state().new_loc, LocId(8));
        assert_eq!(game.state().tally, 6);

        console.push_line("w");
        assert_eq!(game.command(&mut console).unwrap(), None);
        assert_eq!(
            game.command(&mut console).unwrap(),
            Some(Ending::EndOfInput)
        );
        assert_eq!(game.state().loc, LocId(10));
        assert_eq!(game.state().tally, 5);

        console.push_line("e");
        console.push_line("w");
        while game.command(&mut console).unwrap().is_none() {}
        assert_eq!(game.state().loc, LocId(10));
        assert_eq!(game.state().tally, 5);
    }

    #[test]
    fn replay_is_deterministic() {
        let world = World::sample().unwrap();
        let script = [
            "in", "take lamp", "light lamp", "xyzzy", "w", "w", "down", "w", "e", "s", "s", "n",
            "look", "foo", "inventory", "e", "back", "seed 7", "w",
        ];
        let run = || {
            let mut game = Game::new(&world, quiet().with_seed(99)).unwrap();
            let mut console = ScriptConsole::new(script);
            let ending = game.play(&mut console).unwrap();
            (ending, console.transcript().to_vec(), game.state().turns)
        };
        let first = run();
        let second = run();
        assert!(first.2 > 0);
        assert_eq!(first, second);
    }

    #[test]
    fn instructions_buy_a_longer_lamp() {
        let world = World::sample().unwrap();
        let mut game = Game::new(&world, GameConfig::default()).unwrap();
        let mut console = ScriptConsole::new(["yes"]);
        game.start(&mut console);
        assert!(game.state().novice);
        assert_eq!(game.state().limit, game.config().novice_lamp_limit);
        assert_eq!(
            console.messages(),
            vec![msg::WANT_INSTRUCTIONS, msg::INSTRUCTIONS]
        );
    }

    #[test]
    fn unknown_words_and_empty_lines() {
        let world = World::sample().unwrap();
        let mut game = Game::new(&world, quiet()).unwrap();
        let mut console = ScriptConsole::new(["", "   ", "frobozz"]);
        assert_eq!(game.play(&mut console).unwrap(), Ending::EndOfInput);
        assert_eq!(game.state().turns, 1);
        assert!(console.transcript().contains(&Speech::Message {
            id: msg::UNKNOWN_WORD,
            params: vec![Param::Word("frobozz".into())],
        }));
    }

    #[test]
    fn verbs_then_objects() {
        let world = World::sample().unwrap();
        let mut game = Game::new(&world, quiet()).unwrap();
        let mut console = ScriptConsole::new(["in", "lamp", "take", "keys get", "sing"]);
        game.play(&mut console).unwrap();
        let keys = world.object_named("keys").unwrap();
        let lamp = world.object_named("lamp").unwrap();
        assert!(game.state().toting(lamp));
        assert!(game.state().toting(keys));
        let said = console.messages();
        assert!(said.contains(&msg::DO_WHAT));
        assert!(said.contains(&msg::WHAT_OBJECT));
    }

    #[test]
    fn absent_objects_are_not_seen() {
        let world = World::sample().unwrap();
        let mut game = Game::new(&world, quiet()).unwrap();
        let mut console = ScriptConsole::new(["take lamp", "find lamp"]);
        game.play(&mut console).unwrap();
        let lamp = world.object_named("lamp").unwrap();
        assert!(!game.state().toting(lamp));
        assert_eq!(
            console
                .messages()
                .iter()
                .filter(|&&m| m == msg::NO_SEE)
                .count(),
            1
        );
        assert!(console.said(msg::ONLY_WHAT_YOU_SEE));
    }

    #[test]
    fn reseeding_is_free() {
        let world = World::sample().unwrap();
        let mut game = Game::new(&world, quiet()).unwrap();
        let mut console = ScriptConsole::new(["seed 1234"]);
        game.play(&mut console).unwrap();
        assert_eq!(game.state().turns, 0);
        assert_eq!(game.rng(), &Lcg::new(1234));
        assert!(console.transcript().contains(&Speech::SeedSet(1234)));
        let start = world.landmarks().start;
        let described = console
            .transcript()
            .iter()
            .filter(|s| matches!(s, Speech::Location { loc, .. } if *loc == start))
            .count();
        assert_eq!(described, 2);
    }

    #[test]
    fn unknown_verbs_keep_the_previous_object() {
        let world = World::sample().unwrap();
        let mut game = Game::new(&world, quiet()).unwrap();
        let mut console = ScriptConsole::new(["in", "take keys", "wake lamp"]);
        game.play(&mut console).unwrap();
        let keys = world.object_named("keys").unwrap();
        assert!(console.said(msg::DONT_UNDERSTAND));
        assert_eq!(game.state().old_obj, Some(keys));
        assert_eq!(game.state().object, None);
    }

    #[test]
    fn entering_the_stream() {
        let world = World::sample().unwrap();
        let mut game = Game::new(&world, quiet()).unwrap();
        let mut console = ScriptConsole::new(["enter stream", "enter building"]);
        game.start(&mut console);
        game.command(&mut console).unwrap();
        assert_eq!(game.state().new_loc, LocId(2));
        assert!(console.said(msg::FEET_WET));
    }

    #[test]
    fn going_west_the_long_way() {
        let world = World::sample().unwrap();
        let mut game = Game::new(&world, quiet()).unwrap();
        let mut script = Vec::new();
        for _ in 0..5 {
            script.push("west");
            script.push("east");
        }
        let mut console = ScriptConsole::new(script);
        game.play(&mut console).unwrap();
        assert_eq!(game.state().west_count, 5);
        assert!(!console.said(msg::TYPE_W));

        let mut console = ScriptConsole::new(["west"; 5]);
        game.play(&mut console).unwrap();
        assert_eq!(game.state().west_count, 10);
        assert!(console.said(msg::TYPE_W));
    }

    #[test]
    fn thresholds_cost_points() {
        let world = World::sample().unwrap();
        let mut game = Game::new(&world, quiet()).unwrap();
        game.state_mut().turns = 350;
        let mut console = ScriptConsole::new(["nothing"]);
        game.play(&mut console).unwrap();
        assert_eq!(game.state().turn_penalty, 2);
        assert_eq!(game.state().threshold_index, 1);
        assert!(console.transcript().contains(&Speech::Threshold(0)));
    }

    #[test]
    fn closing_blocks_the_exit_and_panics_once() {
        let world = World::sample().unwrap();
        let mut game = Game::new(&world, quiet()).unwrap();
        calm(&mut game);
        {
            let state = game.state_mut();
            state.closing = true;
            state.clock1 = -1;
            state.clock2 = 40;
            state.loc = LocId(4);
            state.new_loc = LocId(4);
            state.tally = 0;
        }
        let grate = world.object_named("grate").unwrap();
        game.state_mut().set_prop(grate, 1);
        let mut console = ScriptConsole::new(["up", "up"]);
        game.play(&mut console).unwrap();
        assert_eq!(game.state().loc, LocId(4));
        assert!(game.state().panic);
        let closed = console
            .messages()
            .iter()
            .filter(|&&m| m == msg::EXIT_CLOSED)
            .count();
        assert_eq!(closed, 2);
        assert!(game.state().clock2 <= game.config().panic_clock);
    }

    #[test]
    fn once_closed_the_player_stays_in_the_repository() {
        let world = World::sample().unwrap();
        let mut game = Game::new(&world, quiet()).unwrap();
        calm(&mut game);
        {
            let state = game.state_mut();
            state.tally = 0;
            state.closing = true;
            state.clock1 = -1;
            state.clock2 = 1;
            state.loc = LocId(13);
            state.new_loc = LocId(13);
        }
        let script = [
            "look", "sw", "ne", "n", "s", "e", "w", "up", "down", "out", "back", "xyzzy", "sw",
        ];
        let mut console = ScriptConsole::new(script);
        game.start(&mut console);
        let repository = [LocId(23), LocId(24)];
        while console.remaining() > 0 {
            game.command(&mut console).unwrap();
            if game.state().phase() == Endgame::Closed {
                assert!(repository.contains(&game.state().loc));
                assert!(repository.contains(&game.state().new_loc));
            }
        }
        assert_eq!(game.state().phase(), Endgame::Closed);
        assert!(console.said(msg::CAVE_CLOSED));
    }

    #[test]
    fn waking_the_dwarves_ends_the_game() {
        let world = World::sample().unwrap();
        let mut game = Game::new(&world, quiet()).unwrap();
        calm(&mut game);
        {
            let state = game.state_mut();
            state.tally = 0;
            state.closing = true;
            state.clock1 = -1;
            state.clock2 = 1;
            state.loc = LocId(13);
            state.new_loc = LocId(13);
        }
        let mut console = ScriptConsole::new(["look", "wake dwarf"]);
        assert_eq!(game.play(&mut console).unwrap(), Ending::DwarvesAwoken);
    }

    #[test]
    fn quitting() {
        let world = World::sample().unwrap();
        let mut game = Game::new(&world, quiet()).unwrap();
        let mut console = ScriptConsole::new(["quit", "y"]);
        assert_eq!(game.play(&mut console).unwrap(), Ending::Quit);
    }

    #[test]
    fn revival_goes_straight_to_the_description() {
        let world = World::sample().unwrap();
        let mut game = Game::new(&world, quiet()).unwrap();
        calm(&mut game);
        {
            let state = game.state_mut();
            state.adversaries[0].loc = LocId(13);
            state.adversaries[0].old_loc = LocId(13);
            state.loc = LocId(8);
            state.new_loc = LocId(8);
            state.old_loc2 = LocId(8);
        }
        let rng_before = game.rng().clone();
        let mut console = ScriptConsole::new(["yes"]);
        {
            let mut turn = game.turn(&mut console);
            assert_eq!(turn.die(), Phase::Describe);
            assert_eq!(turn.describe().unwrap(), Phase::ClearObject);
        }
        let revival = world.landmarks().revival;
        assert_eq!(game.state().loc, revival);
        assert_eq!(game.state().adversaries[0].loc, LocId(13));
        assert_eq!(game.state().adversaries[0].old_loc, LocId(13));
        assert_eq!(game.rng(), &rng_before);
        assert!(console.transcript().contains(&Speech::Location {
            loc: revival,
            form: Form::Long,
        }));
    }

    #[test]
    fn falling_in_the_dark() {
        let world = World::sample().unwrap();
        let mut game =
            Game::new(&world, quiet().with_dark_fall_chance(100)).unwrap();
        calm(&mut game);
        let mut console = ScriptConsole::new(["in", "xyzzy", "w", "no"]);
        assert_eq!(game.play(&mut console).unwrap(), Ending::Died);
        assert!(console.said(msg::PITCH_DARK));
        assert!(console.said(msg::FELL_IN_PIT));
        assert_eq!(game.state().deaths, 1);
    }
}
