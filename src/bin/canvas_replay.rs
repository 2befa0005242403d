//! Replay a recorded input script against a fresh canvas.
//!
//! Usage: `canvas-replay <script.json>` (or `-` for stdin)
//!
//! The script is `{ "options"?: {...}, "truth": {...}, "events": [...] }`.
//! Every domain event the canvas emits is printed to stdout as one JSON line.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::cell::RefCell;
use std::io::Read;
use std::rc::Rc;
use tracing::info;

use swimlane_canvas::logging::init_logging;
use swimlane_canvas::{Canvas, CanvasEvent, CanvasEventKind, CanvasOptions, InputEvent, Truth};

#[derive(Debug, Deserialize)]
struct Script {
    #[serde(default)]
    options: Option<CanvasOptions>,
    truth: Truth,
    #[serde(default)]
    events: Vec<InputEvent>,
}

fn read_script(path: &str) -> Result<Script> {
    let json = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading script from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading script {path}"))?
    };
    serde_json::from_str(&json).context("parsing script")
}

fn flush(emitted: &RefCell<Vec<CanvasEvent>>) -> Result<()> {
    for event in emitted.borrow_mut().drain(..) {
        println!("{}", serde_json::to_string(&event)?);
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging();

    let path = std::env::args()
        .nth(1)
        .context("usage: canvas-replay <script.json | ->")?;
    let script = read_script(&path)?;

    let mut canvas = Canvas::with_options(script.options.unwrap_or_default());
    let emitted: Rc<RefCell<Vec<CanvasEvent>>> = Rc::default();
    for kind in CanvasEventKind::ALL {
        let sink = emitted.clone();
        canvas.on(kind, move |event| sink.borrow_mut().push(event.clone()));
    }

    canvas.set_truth(script.truth);
    canvas.update().context("applying truth")?;
    flush(&emitted)?;

    let total = script.events.len();
    for event in script.events {
        canvas.send(event);
        flush(&emitted)?;
    }

    info!(events = total, state = %canvas.input_state().kind(), "replay finished");
    Ok(())
}
