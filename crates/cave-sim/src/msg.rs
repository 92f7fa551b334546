//! Message numbers the engine speaks. The texts live in the world document.

#![allow(missing_docs)]

use cave_core::MessageId;

pub const INSTRUCTIONS: MessageId = 1;
pub const DWARF_BLOCKS: MessageId = 2;
pub const FIRST_DWARF: MessageId = 3;
pub const DWARVES_HERE: MessageId = 4;
pub const DWARF_HERE: MessageId = 5;
pub const KNIFE_THROWN: MessageId = 6;
pub const HOLLOW_VOICE: MessageId = 7;
pub const NOT_INTERESTED_DIRECTION: MessageId = 10;
pub const NOT_INTERESTED_INSIDE: MessageId = 11;
pub const DONT_KNOW_HOW: MessageId = 12;
pub const NO_MORE_DETAIL: MessageId = 15;
pub const PITCH_DARK: MessageId = 16;
pub const TYPE_W: MessageId = 17;
pub const REALLY_QUIT: MessageId = 22;
pub const FELL_IN_PIT: MessageId = 23;
pub const ALREADY_CARRYING: MessageId = 24;
pub const YOU_JEST: MessageId = 25;
pub const NOT_CARRYING: MessageId = 29;
pub const LAMP_ON: MessageId = 39;
pub const LAMP_OFF: MessageId = 40;
pub const NOTHING_HAPPENS: MessageId = 42;
pub const WHERE: MessageId = 43;
pub const NO_WAY: MessageId = 52;
pub const OK: MessageId = 54;
pub const CAVE_SILLY: MessageId = 57;
pub const CAVE_WHICH: MessageId = 58;
pub const ONLY_WHAT_YOU_SEE: MessageId = 59;
pub const WANT_INSTRUCTIONS: MessageId = 65;
pub const FEET_WET: MessageId = 70;
pub const WHICH_WAY: MessageId = 80;
pub const FORGOT_PATH: MessageId = 91;
pub const CARRY_LIMIT: MessageId = 92;
pub const RIGHT_HERE: MessageId = 94;
pub const NOTHING_CARRIED: MessageId = 98;
pub const NOW_HOLDING: MessageId = 99;
pub const KNIVES_VANISH: MessageId = 116;
pub const TOO_NARROW: MessageId = 117;
pub const PIRATE_NOISE: MessageId = 127;
pub const PIRATE_THEFT: MessageId = 128;
pub const CAVE_CLOSING: MessageId = 129;
pub const EXIT_CLOSED: MessageId = 130;
pub const DIED_CLOSING: MessageId = 131;
pub const CAVE_CLOSED: MessageId = 132;
pub const DWARVES_AWAKEN: MessageId = 136;
pub const NOT_CONNECTED: MessageId = 140;
pub const BEAR_FOLLOWS: MessageId = 141;
pub const BRIDGE_COLLAPSE: MessageId = 162;
pub const WANT_HINT: MessageId = 175;
pub const LAMP_DIM: MessageId = 183;
pub const LAMP_OUT: MessageId = 184;
pub const PLEASE_ANSWER: MessageId = 185;
pub const PIRATE_SPOTTED: MessageId = 186;
pub const GET_BATTERIES: MessageId = 187;
pub const REPLACE_BATTERIES: MessageId = 188;
pub const LOST_INTEREST: MessageId = 189;
pub const KNIVES_THROWN: MessageId = 250;
pub const UNKNOWN_WORD: MessageId = 254;
pub const DO_WHAT: MessageId = 255;
pub const NO_SEE: MessageId = 256;
pub const DONT_UNDERSTAND: MessageId = 257;
pub const WHAT_OBJECT: MessageId = 258;
pub const HINT_COST: MessageId = 261;
pub const TWIST_TURN: MessageId = 274;
pub const GO_UNNEEDED: MessageId = 276;

/// First rung of the reincarnation ladder: `n`th death asks
/// `REINCARNATION - 2 + 2n` and accepts with the next message.
pub const REINCARNATION: MessageId = 81;
