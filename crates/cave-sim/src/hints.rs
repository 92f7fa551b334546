//! The hint engine.
//!
//! Each hint watches one location condition bit. Dwelling long enough at
//! marked locations arms the hint; its topic then decides whether the
//! situation really calls for help.

use cave_core::{HintTopic, LocId};

use crate::console::Param;
use crate::context::TurnContext;
use crate::msg;
use crate::state::{Activation, Presence};

/// What a topic's test says about the situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    /// Offer the hint now.
    Offer,
    /// Not now; start counting again.
    Reset,
    /// Not now; stay armed.
    Wait,
}

/// Update dwell counters and offer any hint that is due.
pub fn check(ctx: &mut TurnContext<'_>) {
    let here = ctx.location();
    if !here.conditions.has_hint_interest() {
        return;
    }
    for (i, def) in ctx.world.hints().iter().enumerate() {
        let Some(progress) = ctx.state.hints.get_mut(i) else {
            break;
        };
        if progress.granted {
            continue;
        }
        if !here.has(def.topic.condition()) {
            progress.dwell = -1;
        }
        progress.dwell += 1;
        if progress.dwell < def.turns {
            continue;
        }

        match verdict(ctx, def.topic) {
            Verdict::Offer => {}
            Verdict::Reset => {
                ctx.state.hints[i].dwell = 0;
                return;
            }
            Verdict::Wait => return,
        }

        ctx.state.hints[i].dwell = 0;
        log::debug!("offering hint {:?}", def.topic);
        if !ctx.ask(def.question, 0, msg::OK) {
            return;
        }
        ctx.say_with(msg::HINT_COST, vec![Param::Number(i64::from(def.penalty))]);
        let granted = ctx.ask(msg::WANT_HINT, def.answer, msg::OK);
        ctx.state.hints[i].granted = granted;
        if granted {
            ctx.state.hint_penalty += def.penalty;
            if ctx.state.limit > 30 {
                ctx.state.limit += 30 * def.penalty;
            }
        }
    }
}

fn verdict(ctx: &TurnContext<'_>, topic: HintTopic) -> Verdict {
    let state = &*ctx.state;
    let cast = ctx.cast;
    let offer_or = |ok: bool, otherwise: Verdict| if ok { Verdict::Offer } else { otherwise };
    let lost = |loc: LocId| state.nothing_at(loc);
    match topic {
        HintTopic::Cave => offer_or(
            state.prop(cast.grate) == 0 && !state.here(cast.keys),
            Verdict::Reset,
        ),
        HintTopic::Bird => offer_or(
            state.at(cast.bird, state.loc)
                && state.toting(cast.rod)
                && state.old_obj == Some(cast.bird),
            Verdict::Wait,
        ),
        HintTopic::Snake => offer_or(
            state.here(cast.snake) && !state.here(cast.bird),
            Verdict::Reset,
        ),
        HintTopic::Maze => offer_or(
            lost(state.loc) && lost(state.old_loc) && lost(state.old_loc2) && state.holding() > 1,
            Verdict::Reset,
        ),
        HintTopic::Dark => offer_or(
            state.prop(cast.emerald) != -1 && state.prop(cast.pyramid) == -1,
            Verdict::Reset,
        ),
        HintTopic::Witt => Verdict::Offer,
        HintTopic::Urn => offer_or(state.activation == Activation::Dormant, Verdict::Reset),
        HintTopic::Woods => offer_or(
            lost(state.loc) && lost(state.old_loc) && lost(state.old_loc2),
            Verdict::Wait,
        ),
        HintTopic::Ogre => match state.presence(state.loc) {
            Presence::Gone => Verdict::Reset,
            Presence::Elsewhere if state.here(cast.ogre) => Verdict::Offer,
            _ => Verdict::Wait,
        },
        HintTopic::Jade => offer_or(
            state.tally == 1 && state.prop(cast.jade) < 0,
            Verdict::Reset,
        ),
    }
}
