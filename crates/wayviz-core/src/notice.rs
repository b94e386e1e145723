//! Short user-visible notices. At most one shows at a time; a new notice
//! displaces whatever was showing.

use std::fmt;

/// A transient status message for the user.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// A click or submit arrived while an animation was in flight.
    Busy,
    /// The search found no route to the target.
    Unreachable,
    /// The target is one step from the start; nothing worth animating.
    TooClose,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Notice::Busy => "still walking - wait for the animation to finish",
            Notice::Unreachable => "walled off - no route to the target",
            Notice::TooClose => "target is right next door - pick a farther cell",
        };
        f.write_str(text)
    }
}
