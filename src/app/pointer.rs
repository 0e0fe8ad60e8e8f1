use crate::graph::{DragBox, Graph, ScreenRect, ViewTransform, Viewport};

/// Pointer input in graph-panel pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) enum PointerEvent {
    Down { at: (f64, f64) },
    Move { at: (f64, f64) },
    Up { at: (f64, f64) },
    SecondaryClick,
    Scroll { at: (f64, f64), factor: f64 },
    Pan { delta: (f64, f64) },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum PointerState {
    #[default]
    Idle,
    Dragging {
        origin: (f64, f64),
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct PointerOutcome {
    pub(super) selection_changed: bool,
    pub(super) view_changed: bool,
}

#[derive(Debug, Default)]
pub(super) struct PointerController {
    state: PointerState,
}

impl PointerController {
    pub(super) fn is_dragging(&self) -> bool {
        matches!(self.state, PointerState::Dragging { .. })
    }

    pub(super) fn handle(
        &mut self,
        event: PointerEvent,
        graph: &mut Graph,
        view: &mut ViewTransform,
        viewport: Viewport,
    ) -> PointerOutcome {
        let mut outcome = PointerOutcome::default();

        match (self.state, event) {
            (PointerState::Idle, PointerEvent::Move { at }) => {
                let nearest = graph.find_nearest_visible(at, view, viewport);
                outcome.selection_changed = graph.set_selection(nearest);
            }
            (PointerState::Idle, PointerEvent::Down { at }) => {
                self.state = PointerState::Dragging { origin: at };
            }
            (PointerState::Dragging { origin }, PointerEvent::Move { at }) => {
                graph.set_drag_box(Some(DragBox {
                    origin,
                    current: at,
                }));
            }
            (PointerState::Dragging { origin }, PointerEvent::Up { at }) => {
                graph.set_drag_box(None);
                self.state = PointerState::Idle;
                outcome.view_changed = view.zoom_to(ScreenRect::from_corners(origin, at), viewport);
            }
            (_, PointerEvent::SecondaryClick) => {
                graph.set_drag_box(None);
                self.state = PointerState::Idle;
                view.reset();
                outcome.view_changed = true;
            }
            (_, PointerEvent::Scroll { at, factor }) => {
                outcome.view_changed = view.zoom_about(at, factor, viewport);
            }
            (_, PointerEvent::Pan { delta }) => {
                outcome.view_changed = view.pan_by(delta, viewport);
            }
            (PointerState::Idle, PointerEvent::Up { .. })
            | (PointerState::Dragging { .. }, PointerEvent::Down { .. }) => {}
        }

        outcome
    }
}
