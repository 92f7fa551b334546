//! The adversary simulator.
//!
//! The roster is a row of generic adversaries followed by one antagonist.
//! All members move by the same rules; what they do on reaching the player
//! depends on their [`Behavior`].

use cave_core::{Conditions, Fixed, LocId, Precondition};

use crate::console::Param;
use crate::context::TurnContext;
use crate::error::SimResult;
use crate::msg;
use crate::state::{Activation, Adversary, KnifeSpot, Place};

/// Most candidate destinations considered per member per turn.
const MAX_CANDIDATES: usize = 19;

/// Whether the player lived through the adversaries' turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Survival {
    /// Nothing fatal happened.
    Survived,
    /// A knife hit.
    Killed,
}

/// How a roster member acts once it has noticed the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Threatens and throws knives.
    Generic,
    /// Steals treasure and hides it in the chest.
    Antagonist,
}

impl Behavior {
    /// Behavior of roster member `index` in a roster of `len`.
    pub fn of(index: usize, len: usize) -> Self {
        if index + 1 == len {
            Self::Antagonist
        } else {
            Self::Generic
        }
    }
}

/// Outcome of one member's turn.
#[derive(Debug, Default)]
struct Tally {
    present: u32,
    attacks: u32,
    hits: u32,
}

/// Run the adversaries for one turn.
pub fn advance(ctx: &mut TurnContext<'_>) -> SimResult<Survival> {
    let loc = ctx.state.loc;
    if loc.is_nowhere()
        || ctx.location().forced
        || ctx.world.location(ctx.state.new_loc).has(Conditions::NO_PIRATE)
    {
        return Ok(Survival::Survived);
    }

    match ctx.state.activation {
        Activation::Dormant => {
            if ctx.location().deep() {
                ctx.state.activation = Activation::Encountered;
                log::info!("adversaries encountered at {loc}");
            }
            Ok(Survival::Survived)
        }
        Activation::Encountered => {
            first_meeting(ctx);
            Ok(Survival::Survived)
        }
        Activation::Active | Activation::Hostile(_) => roam(ctx),
    }
}

/// The one-time gate that brings the roster to life.
fn first_meeting(ctx: &mut TurnContext<'_>) {
    let loc = ctx.state.loc;
    let here = ctx.location();
    if !here.deep()
        || (ctx.rng.pct(95) && (!here.has(Conditions::NO_BACK) || ctx.rng.pct(85)))
    {
        return;
    }
    ctx.state.activation = Activation::Active;
    log::info!("adversaries active");

    let generic = ctx.state.antagonist();
    for _ in 0..2 {
        let j = ctx.rng.range(generic as u32) as usize;
        if ctx.rng.pct(50) {
            if let Some(member) = ctx.state.adversaries.get_mut(j) {
                member.loc = LocId::NOWHERE;
            }
        }
    }
    let alternate = ctx.world.landmarks().dwarf_alternate;
    for member in &mut ctx.state.adversaries[..generic] {
        if member.loc == loc {
            member.loc = alternate;
        }
        member.old_loc = member.loc;
    }
    ctx.say(msg::FIRST_DWARF);
    ctx.state.drop(ctx.cast.axe, loc);
}

/// Where member `index` could go next, best first. Never empty.
pub fn candidates(ctx: &TurnContext<'_>, index: usize) -> Vec<LocId> {
    let member = &ctx.state.adversaries[index];
    let antagonist = Behavior::of(index, ctx.state.adversaries.len()) == Behavior::Antagonist;
    let mut found: Vec<LocId> = Vec::new();
    for rule in &ctx.world.location(member.loc).travel {
        let Some(dest) = rule.destination.location() else {
            continue;
        };
        let target = ctx.world.location(dest);
        let avoided = !target.deep()
            || dest == member.old_loc
            || found.last() == Some(&dest)
            || found.len() >= MAX_CANDIDATES
            || dest == member.loc
            || target.forced
            || (antagonist && target.has(Conditions::NO_PIRATE))
            || rule.condition == Precondition::PlayerOnly;
        if !avoided {
            found.push(dest);
        }
    }
    if found.is_empty() {
        found.push(member.old_loc);
    }
    found
}

fn roam(ctx: &mut TurnContext<'_>) -> SimResult<Survival> {
    let loc = ctx.state.loc;
    let deep = ctx.location().deep();
    let mut tally = Tally::default();

    for i in 0..ctx.state.adversaries.len() {
        if ctx.state.adversaries[i].loc.is_nowhere() {
            continue;
        }
        let options = candidates(ctx, i);
        let pick = options[ctx.rng.range(options.len() as u32) as usize];

        let member = &mut ctx.state.adversaries[i];
        member.old_loc = member.loc;
        member.loc = pick;
        member.seen = (member.seen && deep) || member.loc == loc || member.old_loc == loc;
        if !member.seen {
            continue;
        }
        member.loc = loc;
        log::debug!("adversary {i} is with the player at {loc}");

        match Behavior::of(i, ctx.state.adversaries.len()) {
            Behavior::Antagonist => plunder(ctx, i)?,
            Behavior::Generic => {
                tally.present += 1;
                if ctx.state.adversaries[i].old_loc == loc {
                    tally.attacks += 1;
                    if ctx.state.knife != KnifeSpot::Cautioned {
                        ctx.state.knife = KnifeSpot::At(loc);
                    }
                    if ctx.rng.range(1000) < ctx.state.activation.accuracy() {
                        tally.hits += 1;
                    }
                }
            }
        }
    }

    Ok(report(ctx, tally))
}

/// Tell the player about the threats and knives.
fn report(ctx: &mut TurnContext<'_>, tally: Tally) -> Survival {
    if tally.present == 0 {
        return Survival::Survived;
    }
    let count = if tally.present == 1 {
        msg::DWARF_HERE
    } else {
        msg::DWARVES_HERE
    };
    ctx.say_with(count, vec![Param::Number(i64::from(tally.present))]);
    if tally.attacks == 0 {
        return Survival::Survived;
    }
    if ctx.state.activation == Activation::Active {
        ctx.state.activation = Activation::Hostile(1);
        log::info!("adversaries hostile");
    }
    let thrown = if tally.attacks > 1 {
        msg::KNIVES_THROWN
    } else {
        msg::KNIFE_THROWN
    };
    ctx.say_with(thrown, vec![Param::Number(i64::from(tally.attacks))]);
    let outcome = thrown + 1 + (2 / (1 + tally.hits)) as u16;
    ctx.say_with(outcome, vec![Param::Number(i64::from(tally.hits))]);
    if tally.hits == 0 {
        return Survival::Survived;
    }
    ctx.state.old_loc2 = ctx.state.loc;
    Survival::Killed
}

/// The antagonist has caught up with the player.
fn plunder(ctx: &mut TurnContext<'_>, index: usize) -> SimResult<()> {
    let cast = ctx.cast;
    let marks = ctx.world.landmarks();
    let loc = ctx.state.loc;
    if loc == marks.chest_hideout || ctx.state.prop(cast.chest) >= 0 {
        return Ok(());
    }
    let pyramid_home = ctx.def(cast.pyramid)?.place;
    let emerald_home = ctx.def(cast.emerald)?.place;
    let exempt =
        |t| t == cast.pyramid && (loc == pyramid_home || loc == emerald_home);

    let mut treasure_here = false;
    for t in ctx.world.treasures() {
        if exempt(t) {
            treasure_here |= ctx.state.here(t);
            continue;
        }
        if ctx.state.toting(t) {
            if ctx.state.place(cast.chest) == Place::Limbo {
                hide_chest(ctx);
            }
            ctx.say(msg::PIRATE_THEFT);
            for loot in ctx.world.treasures() {
                if exempt(loot) {
                    continue;
                }
                if ctx.state.at(loot, loc) && ctx.state.fixed(loot) == Fixed::Movable {
                    ctx.state.carry(loot);
                }
                if ctx.state.toting(loot) {
                    ctx.state.drop(loot, marks.chest_hideout);
                }
            }
            retreat(&mut ctx.state.adversaries[index], marks.chest_hideout);
            log::info!("treasure stolen at {loc}");
            return Ok(());
        }
        treasure_here |= ctx.state.here(t);
    }

    // Make sure the chest turns up before the last treasure is found.
    if ctx.state.tally == 1
        && !treasure_here
        && ctx.state.place(cast.chest) == Place::Limbo
        && ctx.state.here(cast.lamp)
        && ctx.state.prop(cast.lamp) == 1
    {
        ctx.say(msg::PIRATE_SPOTTED);
        hide_chest(ctx);
        retreat(&mut ctx.state.adversaries[index], marks.chest_hideout);
        return Ok(());
    }

    let member = &ctx.state.adversaries[index];
    if member.old_loc != member.loc && ctx.rng.pct(20) {
        ctx.say(msg::PIRATE_NOISE);
    }
    Ok(())
}

fn hide_chest(ctx: &mut TurnContext<'_>) {
    let marks = ctx.world.landmarks();
    ctx.state.drop(ctx.cast.chest, marks.chest_hideout);
    ctx.state.drop(ctx.cast.message, marks.note_hideout);
}

fn retreat(member: &mut Adversary, hideout: LocId) {
    member.loc = hideout;
    member.old_loc = hideout;
    member.seen = false;
}
