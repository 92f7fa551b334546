//! Closing the cave, and the lamp's slow death.

use cave_core::{Fixed, LocId};

use crate::context::TurnContext;
use crate::msg;
use crate::state::Place;

/// What the closing clocks did this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed.
    None,
    /// The closing warning was just given.
    Warned,
    /// The cave was just sealed and the player moved to the repository.
    Closed,
}

/// Run the closing clocks for one turn.
pub fn tick(ctx: &mut TurnContext<'_>) -> Transition {
    let loc = ctx.state.loc;
    if ctx.state.tally == 0 && ctx.location().deep() && loc != ctx.world.landmarks().y2 {
        ctx.state.clock1 -= 1;
    }

    if ctx.state.clock1 == 0 {
        begin_closing(ctx);
        return Transition::Warned;
    } else if ctx.state.clock1 < 0 {
        ctx.state.clock2 -= 1;
    }

    if ctx.state.clock2 == 0 {
        seal(ctx);
        return Transition::Closed;
    }
    Transition::None
}

/// Lock the grate, clear out the adversaries, troll and bear.
fn begin_closing(ctx: &mut TurnContext<'_>) {
    let cast = ctx.cast;
    let state = &mut *ctx.state;
    state.set_prop(cast.grate, 0);
    state.set_prop(cast.fissure, 0);
    for member in &mut state.adversaries {
        member.seen = false;
        member.loc = LocId::NOWHERE;
    }

    if let Some(troll) = ctx.world.object(cast.troll) {
        state.destroy(cast.troll);
        state.set_fixed(cast.troll, Fixed::Movable);
        state.drop(cast.troll2, troll.place);
        state.set_fixed(cast.troll2, troll.fixed);
    }
    if state.prop(cast.bear) != 3 {
        state.destroy(cast.bear);
    }
    state.set_prop(cast.chain, 0);
    state.set_fixed(cast.chain, Fixed::Movable);
    state.set_prop(cast.axe, 0);
    state.set_fixed(cast.axe, Fixed::Movable);

    state.clock1 = -1;
    state.closing = true;
    ctx.say(msg::CAVE_CLOSING);
    log::info!("the cave is closing");
}

/// Build the repository and move the player into it.
fn seal(ctx: &mut TurnContext<'_>) {
    let cast = ctx.cast;
    let marks = ctx.world.landmarks();
    let (ne, sw) = (marks.repository_ne, marks.repository_sw);
    let state = &mut *ctx.state;

    for (obj, prop) in [
        (cast.bottle, 1),
        (cast.plant, 0),
        (cast.oyster, 0),
        (cast.lamp, 0),
        (cast.rod, 0),
        (cast.dwarf, 0),
    ] {
        let hidden = state.put(obj, ne, prop);
        state.set_prop(obj, hidden);
    }
    // The underside of the oyster now carries the closing hint.
    state.set_inscription(cast.oyster, 1);
    state.loc = ne;
    state.old_loc = ne;
    state.new_loc = ne;

    state.put(cast.grate, sw, 0);
    state.put(cast.sign, sw, 0);
    // The sign reads differently in the repository.
    state.set_prop(cast.sign, 1);
    for (obj, prop) in [
        (cast.snake, 1),
        (cast.bird, 1),
        (cast.cage, 0),
        (cast.rod2, 0),
        (cast.pillow, 0),
    ] {
        let hidden = state.put(obj, sw, prop);
        state.set_prop(obj, hidden);
    }

    let mirror = state.put(cast.mirror, ne, 0);
    state.set_prop(cast.mirror, mirror);
    state.set_fixed(cast.mirror, Fixed::Also(sw));

    let carried: Vec<_> = state.carried().collect();
    for obj in carried {
        state.destroy(obj);
    }

    state.closed = true;
    ctx.say(msg::CAVE_CLOSED);
    log::info!("the cave is closed");
}

/// Burn the lamp for one turn and deal with it running low.
pub fn lamp_check(ctx: &mut TurnContext<'_>) {
    let cast = ctx.cast;
    if ctx.state.prop(cast.lamp) == 1 {
        ctx.state.limit -= 1;
    }

    let fresh_batteries = ctx.here(cast.batteries) && ctx.state.prop(cast.batteries) == 0;
    if ctx.state.limit <= 30 && fresh_batteries && ctx.here(cast.lamp) {
        ctx.say(msg::REPLACE_BATTERIES);
        ctx.state.set_prop(cast.batteries, 1);
        if ctx.state.toting(cast.batteries) {
            let loc = ctx.state.loc;
            ctx.state.drop(cast.batteries, loc);
        }
        ctx.state.limit += 2500;
        ctx.state.lamp_warned = false;
    } else if ctx.state.limit == 0 {
        ctx.state.limit = -1;
        ctx.state.set_prop(cast.lamp, 0);
        if ctx.here(cast.lamp) {
            ctx.say(msg::LAMP_OUT);
        }
        log::info!("the lamp has run out");
    } else if ctx.state.limit <= 30 && !ctx.state.lamp_warned && ctx.here(cast.lamp) {
        ctx.state.lamp_warned = true;
        let warning = if ctx.state.prop(cast.batteries) == 1 {
            msg::LOST_INTEREST
        } else if ctx.state.place(cast.batteries) == Place::Limbo {
            msg::LAMP_DIM
        } else {
            msg::GET_BATTERIES
        };
        ctx.say(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::Fixture;
    use crate::state::{Endgame, Place};

    fn ready(fx: &mut Fixture) {
        fx.state.tally = 0;
        fx.at(13);
    }

    #[test]
    fn warned_after_thirty_eligible_turns() {
        let mut fx = Fixture::new();
        let grate = fx.obj("grate");
        ready(&mut fx);
        fx.state.set_prop(grate, 1);
        let mut warnings = 0;
        for turn in 1..=40 {
            if tick(&mut fx.ctx()) == Transition::Warned {
                warnings += 1;
                assert_eq!(turn, 30);
            }
        }
        assert_eq!(warnings, 1);
        assert_eq!(fx.state.prop(grate), 0);
        assert_eq!(fx.state.phase(), Endgame::Warned);
        assert!(fx.console.said(msg::CAVE_CLOSING));
        assert!(fx.state.adversaries.iter().all(|m| m.loc.is_nowhere()));
    }

    #[test]
    fn clock_pauses_outside_the_deep_cave() {
        let mut fx = Fixture::new();
        ready(&mut fx);
        let y2 = fx.world.landmarks().y2;
        fx.at(y2.0);
        for _ in 0..40 {
            tick(&mut fx.ctx());
        }
        fx.at(1);
        for _ in 0..40 {
            tick(&mut fx.ctx());
        }
        assert_eq!(fx.state.clock1, fx.config.clock1);
        assert_eq!(fx.state.phase(), Endgame::Open);
    }

    #[test]
    fn untallied_treasure_holds_the_clock() {
        let mut fx = Fixture::new();
        ready(&mut fx);
        fx.state.tally = 1;
        for _ in 0..100 {
            assert_eq!(tick(&mut fx.ctx()), Transition::None);
        }
    }

    #[test]
    fn closing_clears_troll_and_bear() {
        let mut fx = Fixture::new();
        let (troll, troll2, bear) = (fx.obj("troll"), fx.obj("troll2"), fx.obj("bear"));
        ready(&mut fx);
        fx.state.clock1 = 1;
        assert_eq!(tick(&mut fx.ctx()), Transition::Warned);
        assert_eq!(fx.state.place(troll), Place::Limbo);
        assert!(fx.state.at(troll2, LocId(17)));
        assert!(fx.state.at(troll2, LocId(18)));
        assert_eq!(fx.state.place(bear), Place::Limbo);
    }

    #[test]
    fn sealed_after_second_clock() {
        let mut fx = Fixture::new();
        let (lamp, keys, mirror, bottle, sign) = (
            fx.obj("lamp"),
            fx.obj("keys"),
            fx.obj("mirror"),
            fx.obj("bottle"),
            fx.obj("sign"),
        );
        ready(&mut fx);
        fx.state.clock1 = 1;
        fx.state.clock2 = 3;
        fx.state.carry(keys);
        assert_eq!(tick(&mut fx.ctx()), Transition::Warned);
        assert_eq!(tick(&mut fx.ctx()), Transition::None);
        assert_eq!(tick(&mut fx.ctx()), Transition::None);
        assert_eq!(tick(&mut fx.ctx()), Transition::Closed);

        let marks = fx.world.landmarks().clone();
        assert_eq!(fx.state.phase(), Endgame::Closed);
        assert_eq!(fx.state.loc, marks.repository_ne);
        assert_eq!(fx.state.new_loc, marks.repository_ne);
        assert!(fx.state.at(lamp, marks.repository_ne));
        assert_eq!(fx.state.prop(lamp), -1);
        assert_eq!(fx.state.prop(bottle), -2);
        assert!(fx.state.at(mirror, marks.repository_sw));
        assert!(fx.state.at(sign, marks.repository_sw));
        assert_eq!(fx.state.prop(sign), 1);
        let oyster = fx.obj("oyster");
        assert!(fx.state.at(oyster, marks.repository_ne));
        assert_eq!(fx.state.inscription(oyster), 1);
        assert_eq!(fx.state.inscription(sign), 0);
        assert_eq!(fx.state.place(keys), Place::Limbo);
        assert_eq!(fx.state.holding(), 0);
        assert!(fx.console.said(msg::CAVE_CLOSED));
    }

    #[test]
    fn lamp_burns_down_and_warns_once() {
        let mut fx = Fixture::new();
        let lamp = fx.obj("lamp");
        fx.at(2);
        fx.state.carry(lamp);
        fx.state.set_prop(lamp, 1);
        fx.state.limit = 32;
        for _ in 0..5 {
            lamp_check(&mut fx.ctx());
        }
        assert_eq!(fx.state.limit, 27);
        assert_eq!(fx.console.messages(), vec![msg::LAMP_DIM]);
        assert!(fx.state.lamp_warned);
    }

    #[test]
    fn lamp_goes_out() {
        let mut fx = Fixture::new();
        let lamp = fx.obj("lamp");
        fx.at(2);
        fx.state.carry(lamp);
        fx.state.set_prop(lamp, 1);
        fx.state.lamp_warned = true;
        fx.state.limit = 1;
        lamp_check(&mut fx.ctx());
        assert_eq!(fx.state.limit, -1);
        assert_eq!(fx.state.prop(lamp), 0);
        assert_eq!(fx.console.messages(), vec![msg::LAMP_OUT]);
    }

    #[test]
    fn fresh_batteries_are_swapped_in() {
        let mut fx = Fixture::new();
        let lamp = fx.obj("lamp");
        let batteries = fx.obj("batteries");
        fx.at(2);
        fx.state.carry(lamp);
        fx.state.carry(batteries);
        fx.state.set_prop(lamp, 1);
        fx.state.limit = 20;
        lamp_check(&mut fx.ctx());
        assert_eq!(fx.state.limit, 2519);
        assert_eq!(fx.state.prop(batteries), 1);
        assert!(fx.state.at(batteries, LocId(2)));
        assert_eq!(fx.console.messages(), vec![msg::REPLACE_BATTERIES]);
    }
}
