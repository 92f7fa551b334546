//! Player movement: matching a motion against the travel table, checking
//! preconditions, and running the three scripted maneuvers.

use cave_core::{
    Conditions, Destination, Fixed, LocId, Maneuver, MessageId, MotionId, Precondition,
    TravelRule, VerbId,
};

use crate::console::Speech;
use crate::context::TurnContext;
use crate::error::{EngineFault, SimResult};
use crate::msg;

/// Result of a player move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Travel {
    /// The command is finished. `state.new_loc` holds the destination.
    Done,
    /// The player was killed on the way.
    Died,
}

/// Resolve `motion` from the player's location into `state.new_loc`.
pub fn player_move(
    ctx: &mut TurnContext<'_>,
    verb: Option<VerbId>,
    motion: MotionId,
) -> SimResult<Travel> {
    let here = ctx.state.loc;
    ctx.state.new_loc = here;
    let rules = &ctx.location().travel;
    if rules.is_empty() {
        return Err(EngineFault::NoTravel { loc: here }.into());
    }

    let cast = ctx.cast;
    let mut motion = motion;
    if motion == cast.null {
        return Ok(Travel::Done);
    } else if motion == cast.back {
        match retrace(ctx, rules) {
            Ok(via) => motion = via,
            Err(refusal) => {
                ctx.say(refusal);
                return Ok(Travel::Done);
            }
        }
    } else if motion == cast.look {
        if ctx.state.detail < 3 {
            ctx.say(msg::NO_MORE_DETAIL);
        }
        ctx.state.detail += 1;
        ctx.state.was_dark = false;
        if let Some(count) = ctx.state.abbrev.get_mut(here.index()) {
            *count = 0;
        }
        return Ok(Travel::Done);
    } else if motion == cast.cave {
        let silly = ctx.location().outside() && here != ctx.world.landmarks().grate_outside;
        ctx.say(if silly { msg::CAVE_SILLY } else { msg::CAVE_WHICH });
        return Ok(Travel::Done);
    } else {
        ctx.state.old_loc2 = ctx.state.old_loc;
        ctx.state.old_loc = here;
    }

    let Some(mut idx) = rules.iter().position(|r| r.matches(motion)) else {
        ctx.say(refusal(ctx, verb, motion));
        return Ok(Travel::Done);
    };

    loop {
        while !precondition_holds(ctx, rules[idx].condition) {
            idx = next_distinct(rules, idx).ok_or(EngineFault::TravelExhausted { loc: here })?;
        }
        log::debug!("travel from {here}: rule {idx} -> {:?}", rules[idx].destination);

        match rules[idx].destination {
            Destination::Location(dest) => {
                ctx.state.new_loc = dest;
                return Ok(Travel::Done);
            }
            Destination::Message(id) => {
                ctx.say(id);
                return Ok(Travel::Done);
            }
            Destination::Special(Maneuver::NarrowPassage) => {
                narrow_passage(ctx);
                return Ok(Travel::Done);
            }
            Destination::Special(Maneuver::ForcedDrop) => {
                ctx.state.drop(cast.emerald, here);
                idx = next_distinct(rules, idx).ok_or(EngineFault::TravelExhausted { loc: here })?;
            }
            Destination::Special(Maneuver::TrollBridge) => return troll_bridge(ctx),
        }
    }
}

/// Work out which motion would take the player back where they came from.
/// The error is the refusal message.
fn retrace(ctx: &mut TurnContext<'_>, rules: &[TravelRule]) -> Result<MotionId, MessageId> {
    let world = ctx.world;
    let here = ctx.state.loc;
    let mut target = ctx.state.old_loc;
    if world.location(target).forced {
        target = ctx.state.old_loc2;
    }
    ctx.state.old_loc2 = ctx.state.old_loc;
    ctx.state.old_loc = here;

    if ctx.location().has(Conditions::NO_BACK) {
        return Err(msg::TWIST_TURN);
    }
    if target == here {
        return Err(msg::FORGOT_PATH);
    }

    let mut direct = None;
    let mut via_forced = None;
    for rule in rules {
        let Some(dest) = rule.destination.location() else {
            continue;
        };
        if dest == target {
            direct = Some(rule);
            break;
        }
        let next = world.location(dest);
        if next.forced && next.travel.first().and_then(|r| r.destination.location()) == Some(target)
        {
            via_forced = Some(rule);
        }
    }
    direct
        .or(via_forced)
        .and_then(|rule| rule.motions.first().copied())
        .ok_or(msg::NOT_CONNECTED)
}

fn precondition_holds(ctx: &mut TurnContext<'_>, condition: Precondition) -> bool {
    match condition {
        Precondition::Always => true,
        Precondition::Chance(percent) => ctx.rng.pct(u32::from(percent)),
        // Consumes a draw like any other percentage check.
        Precondition::PlayerOnly => ctx.rng.pct(100),
        Precondition::Carrying(obj) => ctx.state.toting(obj),
        Precondition::CarryingOrHere(obj) => {
            ctx.state.toting(obj) || ctx.state.at(obj, ctx.state.loc)
        }
        Precondition::PropNot { obj, value } => ctx.state.prop(obj) != value,
    }
}

/// Index of the next rule with a different outcome, skipping duplicates.
fn next_distinct(rules: &[TravelRule], idx: usize) -> Option<usize> {
    let current = &rules[idx];
    (idx + 1..rules.len()).find(|&i| !rules[i].same_outcome(current))
}

/// Message for a motion that has no rule here.
fn refusal(ctx: &TurnContext<'_>, verb: Option<VerbId>, motion: MotionId) -> MessageId {
    let asked = verb.is_some_and(|v| v == ctx.cast.find || v == ctx.cast.inventory);
    match motion.0 {
        17 => msg::WHICH_WAY,
        62 | 65 => msg::NOTHING_HAPPENS,
        _ if asked => msg::ONLY_WHAT_YOU_SEE,
        11 | 19 => msg::NOT_INTERESTED_INSIDE,
        7 | 36 | 37 => msg::NOT_INTERESTED_DIRECTION,
        29 | 30 | 43..=50 => msg::NO_WAY,
        _ => msg::DONT_KNOW_HOW,
    }
}

/// Only an empty-handed player, or one holding just the emerald, fits.
fn narrow_passage(ctx: &mut TurnContext<'_>) {
    let here = ctx.state.loc;
    let [a, b] = ctx.world.landmarks().narrow_passage;
    let holding = ctx.state.holding();
    if holding == 0 || (holding == 1 && ctx.state.toting(ctx.cast.emerald)) {
        ctx.state.new_loc = if here == a { b } else { a };
    } else {
        ctx.say(msg::TOO_NARROW);
    }
}

fn troll_bridge(ctx: &mut TurnContext<'_>) -> SimResult<Travel> {
    let cast = ctx.cast;
    let troll = ctx.def(cast.troll)?;
    let here = ctx.state.loc;
    let far_side = troll.fixed.second().unwrap_or(LocId::NOWHERE);

    if ctx.state.prop(cast.troll) == 1 {
        // Paid once and crossed: the troll steps back out.
        ctx.speak(Speech::Object {
            obj: cast.troll,
            state: 1,
        });
        ctx.state.set_prop(cast.troll, 0);
        ctx.state.destroy(cast.troll2);
        ctx.state.set_fixed(cast.troll2, Fixed::Movable);
        ctx.state.drop(cast.troll, troll.place);
        ctx.state.set_fixed(cast.troll, troll.fixed);
        return Ok(Travel::Done);
    }

    ctx.state.new_loc = if here == troll.place {
        far_side
    } else {
        troll.place
    };
    if ctx.state.prop(cast.troll) == 0 {
        ctx.state.set_prop(cast.troll, 1);
    }
    if !ctx.state.toting(cast.bear) {
        return Ok(Travel::Done);
    }

    ctx.say(msg::BRIDGE_COLLAPSE);
    log::info!("the bridge collapsed under the bear");
    let dest = ctx.state.new_loc;
    ctx.state.set_prop(cast.chasm, 1);
    ctx.state.set_prop(cast.troll, 2);
    ctx.state.drop(cast.bear, dest);
    ctx.state.set_fixed(cast.bear, Fixed::Immovable);
    ctx.state.set_prop(cast.bear, 3);
    ctx.state.old_loc2 = dest;
    Ok(Travel::Died)
}
