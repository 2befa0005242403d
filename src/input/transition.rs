//! The gesture transition table as a pure function.
//!
//! `transition` never touches the canvas: it only says what should happen.
//! The canvas runs the matching exit/enter or update side effects.

use super::state::{InputEvent, InputState, InputStateKind};

/// Outcome of feeding one event to the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Event not handled in this state; nothing changes.
    Ignore,
    /// Self-transition with a side effect; the state is not re-entered.
    Update,
    /// Exit the current state and enter another one.
    Enter(InputStateKind),
}

pub fn transition(state: &InputState, event: &InputEvent) -> Step {
    use InputEvent as E;
    use InputStateKind as K;

    match (state.kind(), event) {
        (K::Ready, E::MouseDownOnItem { .. }) => Step::Enter(K::MousedownOnItem),
        (K::Ready, E::MouseDownOnLane { .. }) => Step::Enter(K::MousedownOnLane),
        (K::Ready, E::MouseDownOnResizeHandle { .. }) => Step::Enter(K::ResizeItem),
        (K::Ready, E::DblClickOnLane { .. }) => Step::Update,
        (K::Ready, E::SpaceDown) => Step::Enter(K::SpaceDown),

        (K::MousedownOnItem, E::MouseMove { .. }) => Step::Enter(K::DragItem),
        (K::MousedownOnItem, E::MouseUp { .. }) => Step::Enter(K::Ready),

        (K::MousedownOnLane, E::MouseMove { .. }) => Step::Enter(K::MarqueeSelect),
        (K::MousedownOnLane, E::MouseUp { .. }) => Step::Enter(K::Ready),

        (K::DragItem, E::MouseMove { .. }) => Step::Update,
        (K::DragItem, E::MouseUp { .. } | E::Escape) => Step::Enter(K::Ready),

        (K::ResizeItem, E::MouseMove { .. }) => Step::Update,
        (K::ResizeItem, E::MouseUp { .. } | E::Escape) => Step::Enter(K::Ready),

        (K::MarqueeSelect, E::MouseMove { .. }) => Step::Update,
        (K::MarqueeSelect, E::MouseUp { .. } | E::Escape) => Step::Enter(K::Ready),

        (K::SpaceDown, E::MouseDownOnLane { .. } | E::MouseDownOnItem { .. }) => {
            Step::Enter(K::Pan)
        }
        (K::SpaceDown, E::SpaceUp) => Step::Enter(K::Ready),

        (K::Pan, E::MouseMove { .. }) => Step::Update,
        (K::Pan, E::MouseUp { .. } | E::SpaceUp | E::Escape) => Step::Enter(K::Ready),

        _ => Step::Ignore,
    }
}
