//! wayviz — a terminal grid pathfinding visualizer.
//!
//! Click once for the start, once for the end, and watch the search
//! explore and then walk its path. `g` regenerates the board from the
//! current options; options persist across sessions.

mod colors;
mod model;
mod term;

use std::error::Error;
use std::time::{Duration, Instant};

use model::{Effect, Msg, VizModel};
use term::Term;
use wayviz_core::ConfigStore;

/// Poll granularity while no animation tick is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "wayviz.json".to_string());
    let mut model = VizModel::new(ConfigStore::new(path));
    let mut term = Term::new()?;
    let result = run(&mut model, &mut term);
    term.restore();
    result
}

/// The cooperative event loop: one thread, one message at a time.
///
/// Animation timing works by deadline: when the model schedules a tick we
/// poll for input only until the deadline, then deliver [`Msg::Tick`].
/// Input arriving mid-animation is still delivered (and rejected by the
/// core's busy guard) rather than freezing the UI.
fn run(model: &mut VizModel, term: &mut Term) -> Result<(), Box<dyn Error>> {
    let mut deadline: Option<Instant> = None;
    term.draw(model)?;
    loop {
        let msg = match deadline {
            Some(at) => {
                let now = Instant::now();
                if at <= now {
                    deadline = None;
                    Some(Msg::Tick)
                } else {
                    term.poll(at - now)?
                }
            }
            None => term.poll(IDLE_POLL)?,
        };
        let Some(msg) = msg else {
            continue;
        };
        match model.update(msg) {
            Some(Effect::End) => return Ok(()),
            Some(Effect::Tick(delay)) => deadline = Some(Instant::now() + delay),
            None => {}
        }
        term.draw(model)?;
    }
}
