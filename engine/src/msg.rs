//! Game events for the presentation layer.

use crate::{prelude::*, ItemId};

/// Something that happened during a turn that a UI may want to animate.
///
/// Events are only reported, they never feed back into the game state.
#[derive(Clone, PartialEq, Debug)]
pub enum Msg {
    /// Monster took damage.
    Hurt(MonsterId, i32),

    /// A creature died at location.
    Death(Location),

    /// The player picked up an item.
    PickedUp(ItemId),

    /// A trap went off.
    TrapTriggered(Location),

    /// The player noticed a hidden trap.
    TrapDetected(Location),

    /// A monster breathed or cast something towards the player.
    EffectSpawned(EffectKind, Location),

    /// The player shot an arrow from one location at another.
    ArrowFired(Location, Location),
}

/// Append a formatted line to the log of the current command.
macro_rules! msg {
    // NB. Even the simple cases needs to be wrapped in `format!` in case the
    // fmt string is doing named variable capture.
    ($r:expr, $fmt:expr) => {
        $r.log_line(format!($fmt))
    };

    ($r:expr, $fmt:expr, $($arg:expr),*) => {
        $r.log_line(format!($fmt, $($arg),*))
    };
}

pub(crate) use msg;
