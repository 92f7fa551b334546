//! Death and reincarnation.

use crate::context::TurnContext;
use crate::msg;

/// How a death turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    /// The player was brought back at the revival point.
    Revived,
    /// The game is over.
    Ended,
}

/// Handle the player's death.
///
/// While the cave is closing a death is final. Otherwise the player is
/// offered reincarnation until the world runs out of reincarnation
/// messages. A revived player loses everything carried: the lamp goes
/// back to the start, and the rest is left where the player last stood
/// safely.
pub fn croak(ctx: &mut TurnContext<'_>) -> Fate {
    ctx.state.deaths += 1;
    let deaths = ctx.state.deaths;
    log::info!("player died ({deaths} so far)");

    if ctx.state.closing {
        ctx.say(msg::DIED_CLOSING);
        return Fate::Ended;
    }

    let question = msg::REINCARNATION - 2 + 2 * deaths as u16;
    if !ctx.ask(question, question + 1, msg::OK) {
        return Fate::Ended;
    }
    if deaths >= ctx.world.max_deaths() {
        return Fate::Ended;
    }

    let cast = ctx.cast;
    let marks = ctx.world.landmarks();
    let state = &mut *ctx.state;
    state.destroy(cast.water);
    state.destroy(cast.oil);
    if state.toting(cast.lamp) {
        state.set_prop(cast.lamp, 0);
    }

    let carried: Vec<_> = state.carried().rev().collect();
    for obj in carried {
        let spot = if obj == cast.lamp {
            marks.start
        } else {
            state.old_loc2
        };
        state.drop(obj, spot);
    }

    state.loc = marks.revival;
    state.old_loc = marks.revival;
    state.new_loc = marks.revival;
    Fate::Revived
}
