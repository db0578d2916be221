//! Interactive crop selection.
//!
//! The crop tool is a small state machine driven by pointer input. It is
//! expressed as a pure function, [`transition`], which takes the current
//! [`CropState`] and one [`CropEvent`] and returns the next state together
//! with the [`CropEffect`]s the host has to carry out (redraw, cursor,
//! button state, committing the crop).
//!
//! ## States
//!
//! ```text
//! Inactive --Start--> Active { rect: full canvas, Idle }
//! Active/Idle --PointerDown on handle--> Resizing(handle)
//! Active/Idle --PointerDown inside----> Moving { offset }
//! Active/Idle --PointerDown outside---> Creating { anchor }
//! Active/*    --PointerUp-------------> Idle
//! Active      --Apply (rect valid)----> Inactive + Commit
//! Active      --Cancel----------------> Inactive
//! ```
//!
//! After every geometry change the rectangle is clamped to the canvas, so
//! `0 <= x`, `x + width <= canvas width` (and the same for y) always hold.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::geometry::{cursor_at, handle_at, Cursor, Handle, PixelRect, Point, Rect, Size};

/// Default side length of a crop handle in canvas pixels.
pub const DEFAULT_HANDLE_SIZE: f64 = 10.0;

/// What the pointer is currently doing to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Interaction {
    /// No button held; hovering only updates the cursor.
    #[default]
    Idle,
    /// Dragging out a new selection from `anchor`.
    Creating { anchor: Point },
    /// Dragging the whole selection; `offset` is pointer minus origin.
    Moving { offset: Point },
    /// Dragging one of the eight handles.
    Resizing(Handle),
}

/// Crop tool state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum CropState {
    #[default]
    Inactive,
    Active { rect: Rect, interaction: Interaction },
}

impl CropState {
    pub fn is_active(&self) -> bool {
        matches!(self, CropState::Active { .. })
    }

    /// Current selection, if crop mode is on.
    pub fn rect(&self) -> Option<Rect> {
        match self {
            CropState::Active { rect, .. } => Some(*rect),
            CropState::Inactive => None,
        }
    }

    pub fn interaction(&self) -> Option<Interaction> {
        match self {
            CropState::Active { interaction, .. } => Some(*interaction),
            CropState::Inactive => None,
        }
    }

    /// Whether Apply may be offered.
    pub fn can_apply(&self) -> bool {
        self.rect().is_some_and(|r| r.has_area())
    }
}

/// Input to the crop tool, already in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CropEvent {
    Start,
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    Apply,
    Cancel,
}

/// Fixed facts a transition needs about the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropContext {
    pub canvas: Size,
    pub handle_size: f64,
}

impl CropContext {
    pub fn new(canvas: Size, handle_size: f64) -> Self {
        Self {
            canvas,
            handle_size,
        }
    }

    /// Smallest extent a handle drag may leave on either axis.
    pub fn min_size(&self) -> f64 {
        self.handle_size * 2.0
    }
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CropEffect {
    /// The canvas needs to be repainted.
    Redraw,
    SetCursor(Cursor),
    SetApplyEnabled(bool),
    /// Show or hide the crop mode controls (apply, cancel, hint text).
    ShowCropControls(bool),
    /// Replace the source image with this region of it.
    Commit(PixelRect),
}

/// Result of feeding one event to the crop tool.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: CropState,
    pub effects: Vec<CropEffect>,
}

impl Transition {
    fn unchanged(state: &CropState) -> Self {
        Self {
            state: *state,
            effects: Vec::new(),
        }
    }
}

/// Compute the next crop state for `event`.
pub fn transition(state: &CropState, event: CropEvent, ctx: &CropContext) -> Transition {
    match (*state, event) {
        (_, CropEvent::Start) => {
            let rect = Rect::full(ctx.canvas);
            debug!("crop started with {:?}", rect);
            Transition {
                state: CropState::Active {
                    rect,
                    interaction: Interaction::Idle,
                },
                effects: vec![
                    CropEffect::ShowCropControls(true),
                    CropEffect::SetApplyEnabled(rect.has_area()),
                    CropEffect::SetCursor(Cursor::Crosshair),
                    CropEffect::Redraw,
                ],
            }
        }

        (CropState::Inactive, _) => Transition::unchanged(state),

        // Non-finite positions would poison the rectangle past any clamp.
        (_, CropEvent::PointerDown(p) | CropEvent::PointerMove(p)) if !p.is_finite() => {
            debug!("ignoring non-finite pointer position {:?}", p);
            Transition::unchanged(state)
        }

        (
            CropState::Active {
                rect,
                interaction: Interaction::Idle,
            },
            CropEvent::PointerDown(p),
        ) => pointer_down(rect, p, ctx),

        // A second press without a release keeps the current drag going.
        (CropState::Active { .. }, CropEvent::PointerDown(_)) => Transition::unchanged(state),

        (CropState::Active { rect, interaction }, CropEvent::PointerMove(p)) => {
            pointer_move(rect, interaction, p, ctx)
        }

        (CropState::Active { rect, .. }, CropEvent::PointerUp) => Transition {
            state: CropState::Active {
                rect,
                interaction: Interaction::Idle,
            },
            effects: vec![
                CropEffect::SetCursor(Cursor::Crosshair),
                CropEffect::SetApplyEnabled(rect.has_area()),
            ],
        },

        (CropState::Active { rect, .. }, CropEvent::Apply) => match rect.to_pixel_rect(ctx.canvas)
        {
            Some(region) => {
                debug!("crop committed: {:?}", region);
                Transition {
                    state: CropState::Inactive,
                    effects: vec![
                        CropEffect::Commit(region),
                        CropEffect::ShowCropControls(false),
                        CropEffect::SetApplyEnabled(false),
                        CropEffect::SetCursor(Cursor::Default),
                        CropEffect::Redraw,
                    ],
                }
            }
            None => Transition::unchanged(state),
        },

        (CropState::Active { .. }, CropEvent::Cancel) => Transition {
            state: CropState::Inactive,
            effects: vec![
                CropEffect::ShowCropControls(false),
                CropEffect::SetApplyEnabled(false),
                CropEffect::SetCursor(Cursor::Default),
                CropEffect::Redraw,
            ],
        },
    }
}

fn pointer_down(rect: Rect, p: Point, ctx: &CropContext) -> Transition {
    if let Some(handle) = handle_at(&rect, p, ctx.handle_size) {
        debug!("resizing crop from handle {}", handle.name());
        return Transition {
            state: CropState::Active {
                rect,
                interaction: Interaction::Resizing(handle),
            },
            effects: Vec::new(),
        };
    }

    if rect.contains(p) {
        return Transition {
            state: CropState::Active {
                rect,
                interaction: Interaction::Moving {
                    offset: p - rect.origin(),
                },
            },
            effects: Vec::new(),
        };
    }

    let mut rect = Rect::new(p.x, p.y, 0.0, 0.0);
    rect.clamp_to(ctx.canvas);
    Transition {
        state: CropState::Active {
            rect,
            interaction: Interaction::Creating { anchor: p },
        },
        effects: vec![CropEffect::SetApplyEnabled(false), CropEffect::Redraw],
    }
}

fn pointer_move(rect: Rect, interaction: Interaction, p: Point, ctx: &CropContext) -> Transition {
    let mut next = match interaction {
        Interaction::Idle => {
            return Transition {
                state: CropState::Active { rect, interaction },
                effects: vec![CropEffect::SetCursor(cursor_at(&rect, p, ctx.handle_size))],
            };
        }
        Interaction::Creating { anchor } => span(anchor, p),
        Interaction::Moving { offset } => {
            Rect::new(p.x - offset.x, p.y - offset.y, rect.width, rect.height)
        }
        Interaction::Resizing(handle) => resize(rect, handle, p, ctx.min_size()),
    };

    next.clamp_to(ctx.canvas);
    Transition {
        state: CropState::Active {
            rect: next,
            interaction,
        },
        effects: vec![
            CropEffect::Redraw,
            CropEffect::SetApplyEnabled(next.has_area()),
        ],
    }
}

/// Rectangle spanned by two corners, in either drag direction.
fn span(anchor: Point, p: Point) -> Rect {
    Rect::new(
        anchor.x.min(p.x),
        anchor.y.min(p.y),
        (p.x - anchor.x).abs(),
        (p.y - anchor.y).abs(),
    )
}

/// Move the edges `handle` owns to the pointer, keeping the opposite edges fixed.
///
/// An axis squeezed below `min_size` is pinned at exactly `min_size`, measured
/// from the fixed edge.
fn resize(rect: Rect, handle: Handle, p: Point, min_size: f64) -> Rect {
    let (right, bottom) = (rect.right(), rect.bottom());
    let mut next = rect;

    if handle.moves_left() {
        next.x = p.x;
        next.width = right - p.x;
    } else if handle.moves_right() {
        next.width = p.x - rect.x;
    }

    if handle.moves_top() {
        next.y = p.y;
        next.height = bottom - p.y;
    } else if handle.moves_bottom() {
        next.height = p.y - rect.y;
    }

    if next.width < min_size {
        if handle.moves_left() {
            next.x = right - min_size;
        }
        next.width = min_size;
    }
    if next.height < min_size {
        if handle.moves_top() {
            next.y = bottom - min_size;
        }
        next.height = min_size;
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> CropContext {
        CropContext::new(Size::new(200, 100), DEFAULT_HANDLE_SIZE)
    }

    fn active(rect: Rect) -> CropState {
        CropState::Active {
            rect,
            interaction: Interaction::Idle,
        }
    }

    /// Feed a sequence of events, returning the final state.
    fn run(state: CropState, events: &[CropEvent]) -> CropState {
        events
            .iter()
            .fold(state, |s, e| transition(&s, *e, &ctx()).state)
    }

    fn drag(state: CropState, from: (f64, f64), to: (f64, f64)) -> CropState {
        run(
            state,
            &[
                CropEvent::PointerDown(Point::new(from.0, from.1)),
                CropEvent::PointerMove(Point::new(to.0, to.1)),
                CropEvent::PointerUp,
            ],
        )
    }

    #[test]
    fn test_start_selects_full_canvas() {
        let t = transition(&CropState::Inactive, CropEvent::Start, &ctx());
        assert_eq!(t.state, active(Rect::new(0.0, 0.0, 200.0, 100.0)));
        assert!(t.effects.contains(&CropEffect::ShowCropControls(true)));
        assert!(t.effects.contains(&CropEffect::SetApplyEnabled(true)));
        assert!(t.effects.contains(&CropEffect::Redraw));
    }

    #[test]
    fn test_restart_resets_to_full_canvas() {
        let state = active(Rect::new(10.0, 10.0, 30.0, 30.0));
        let t = transition(&state, CropEvent::Start, &ctx());
        assert_eq!(t.state.rect(), Some(Rect::new(0.0, 0.0, 200.0, 100.0)));
    }

    #[test]
    fn test_inactive_ignores_pointer_input() {
        for event in [
            CropEvent::PointerDown(Point::new(5.0, 5.0)),
            CropEvent::PointerMove(Point::new(50.0, 50.0)),
            CropEvent::PointerUp,
            CropEvent::Apply,
            CropEvent::Cancel,
        ] {
            let t = transition(&CropState::Inactive, event, &ctx());
            assert_eq!(t.state, CropState::Inactive);
            assert!(t.effects.is_empty());
        }
    }

    #[test]
    fn test_pointer_down_on_handle_starts_resize() {
        let state = active(Rect::new(50.0, 20.0, 100.0, 60.0));
        let t = transition(&state, CropEvent::PointerDown(Point::new(151.0, 79.0)), &ctx());
        assert_eq!(
            t.state.interaction(),
            Some(Interaction::Resizing(Handle::SouthEast))
        );
    }

    #[test]
    fn test_pointer_down_inside_starts_move() {
        let state = active(Rect::new(50.0, 20.0, 100.0, 60.0));
        let t = transition(&state, CropEvent::PointerDown(Point::new(70.0, 40.0)), &ctx());
        assert_eq!(
            t.state.interaction(),
            Some(Interaction::Moving {
                offset: Point::new(20.0, 20.0)
            })
        );
    }

    #[test]
    fn test_pointer_down_outside_starts_new_selection() {
        let state = active(Rect::new(50.0, 20.0, 100.0, 60.0));
        let t = transition(&state, CropEvent::PointerDown(Point::new(10.0, 10.0)), &ctx());
        assert_eq!(
            t.state,
            CropState::Active {
                rect: Rect::new(10.0, 10.0, 0.0, 0.0),
                interaction: Interaction::Creating {
                    anchor: Point::new(10.0, 10.0)
                },
            }
        );
        assert!(t.effects.contains(&CropEffect::SetApplyEnabled(false)));
    }

    #[test]
    fn test_create_drag() {
        let state = active(Rect::new(150.0, 60.0, 40.0, 30.0));
        let state = drag(state, (10.0, 10.0), (60.0, 40.0));
        assert_eq!(state, active(Rect::new(10.0, 10.0, 50.0, 30.0)));
    }

    #[test]
    fn test_create_drag_in_reverse_direction() {
        let state = active(Rect::new(150.0, 60.0, 40.0, 30.0));
        let state = drag(state, (60.0, 40.0), (10.0, 10.0));
        assert_eq!(state, active(Rect::new(10.0, 10.0, 50.0, 30.0)));
    }

    #[test]
    fn test_create_keeps_anchor_across_moves() {
        let state = active(Rect::new(150.0, 60.0, 40.0, 30.0));
        let state = run(
            state,
            &[
                CropEvent::PointerDown(Point::new(50.0, 50.0)),
                CropEvent::PointerMove(Point::new(20.0, 20.0)),
                CropEvent::PointerMove(Point::new(80.0, 70.0)),
            ],
        );
        assert_eq!(state.rect(), Some(Rect::new(50.0, 50.0, 30.0, 20.0)));
    }

    #[test]
    fn test_create_clamps_to_canvas() {
        let state = active(Rect::new(150.0, 60.0, 40.0, 30.0));
        let state = drag(state, (100.0, 50.0), (250.0, 150.0));
        assert_eq!(state.rect(), Some(Rect::new(100.0, 50.0, 100.0, 50.0)));
    }

    #[test]
    fn test_move_drag() {
        let state = active(Rect::new(10.0, 10.0, 50.0, 30.0));
        let state = drag(state, (20.0, 20.0), (50.0, 40.0));
        assert_eq!(state, active(Rect::new(40.0, 30.0, 50.0, 30.0)));
    }

    #[test]
    fn test_move_past_edge_shrinks_extent() {
        let state = active(Rect::new(10.0, 10.0, 50.0, 30.0));
        let state = drag(state, (20.0, 20.0), (190.0, 20.0));
        // Origin follows the pointer, width is cut at the canvas edge
        assert_eq!(state.rect(), Some(Rect::new(180.0, 10.0, 20.0, 30.0)));
    }

    #[test]
    fn test_move_past_origin_clips_origin() {
        let state = active(Rect::new(10.0, 10.0, 50.0, 30.0));
        let state = drag(state, (20.0, 20.0), (0.0, 0.0));
        assert_eq!(state.rect(), Some(Rect::new(0.0, 0.0, 50.0, 30.0)));
    }

    #[test]
    fn test_resize_each_handle() {
        let rect = Rect::new(50.0, 20.0, 100.0, 60.0);
        let cases = [
            (Handle::NorthWest, (40.0, 10.0), Rect::new(40.0, 10.0, 110.0, 70.0)),
            (Handle::NorthEast, (160.0, 10.0), Rect::new(50.0, 10.0, 110.0, 70.0)),
            (Handle::SouthWest, (40.0, 90.0), Rect::new(40.0, 20.0, 110.0, 70.0)),
            (Handle::SouthEast, (160.0, 90.0), Rect::new(50.0, 20.0, 110.0, 70.0)),
            (Handle::North, (999.0, 10.0), Rect::new(50.0, 10.0, 100.0, 70.0)),
            (Handle::South, (-5.0, 90.0), Rect::new(50.0, 20.0, 100.0, 70.0)),
            (Handle::West, (40.0, -99.0), Rect::new(40.0, 20.0, 110.0, 60.0)),
            (Handle::East, (160.0, 999.0), Rect::new(50.0, 20.0, 110.0, 60.0)),
        ];

        for (handle, (px, py), expected) in cases {
            let state = CropState::Active {
                rect,
                interaction: Interaction::Resizing(handle),
            };
            let t = transition(&state, CropEvent::PointerMove(Point::new(px, py)), &ctx());
            assert_eq!(t.state.rect(), Some(expected), "handle {}", handle.name());
        }
    }

    #[test]
    fn test_resize_se_below_minimum_pins_to_minimum() {
        let state = active(Rect::new(10.0, 10.0, 50.0, 30.0));
        // se handle sits at (60, 40); drag it to where width would be 3
        let state = drag(state, (60.0, 40.0), (13.0, 40.0));
        assert_eq!(state.rect(), Some(Rect::new(10.0, 10.0, 20.0, 30.0)));
    }

    #[test]
    fn test_resize_nw_below_minimum_pins_from_fixed_corner() {
        let state = active(Rect::new(10.0, 10.0, 50.0, 30.0));
        // Drag nw past the se corner
        let state = drag(state, (10.0, 10.0), (100.0, 90.0));
        // Right edge 60 and bottom edge 40 stay fixed
        assert_eq!(state.rect(), Some(Rect::new(40.0, 20.0, 20.0, 20.0)));
    }

    #[test]
    fn test_resize_w_inward_pins_left_edge() {
        let state = active(Rect::new(10.0, 10.0, 50.0, 30.0));
        let state = drag(state, (10.0, 25.0), (58.0, 25.0));
        assert_eq!(state.rect(), Some(Rect::new(40.0, 10.0, 20.0, 30.0)));
    }

    #[test]
    fn test_resize_n_inward_pins_top_edge() {
        let state = active(Rect::new(10.0, 10.0, 50.0, 30.0));
        let state = drag(state, (35.0, 10.0), (35.0, 39.0));
        assert_eq!(state.rect(), Some(Rect::new(10.0, 20.0, 50.0, 20.0)));
    }

    #[test]
    fn test_resize_is_clamped_after_minimum() {
        let state = active(Rect::new(10.0, 10.0, 50.0, 30.0));
        let state = drag(state, (60.0, 40.0), (400.0, 400.0));
        assert_eq!(state.rect(), Some(Rect::new(10.0, 10.0, 190.0, 90.0)));
    }

    #[test]
    fn test_hover_updates_cursor_only() {
        let rect = Rect::new(50.0, 20.0, 100.0, 60.0);
        let state = active(rect);
        let t = transition(&state, CropEvent::PointerMove(Point::new(50.0, 20.0)), &ctx());
        assert_eq!(t.state, state);
        assert_eq!(t.effects, vec![CropEffect::SetCursor(Cursor::NwseResize)]);

        let t = transition(&state, CropEvent::PointerMove(Point::new(100.0, 50.0)), &ctx());
        assert_eq!(t.effects, vec![CropEffect::SetCursor(Cursor::Move)]);

        let t = transition(&state, CropEvent::PointerMove(Point::new(5.0, 5.0)), &ctx());
        assert_eq!(t.effects, vec![CropEffect::SetCursor(Cursor::Crosshair)]);
    }

    #[test]
    fn test_pointer_up_returns_to_idle() {
        let state = CropState::Active {
            rect: Rect::new(1.0, 1.0, 5.0, 5.0),
            interaction: Interaction::Resizing(Handle::East),
        };
        let t = transition(&state, CropEvent::PointerUp, &ctx());
        assert_eq!(t.state.interaction(), Some(Interaction::Idle));
        assert!(t.effects.contains(&CropEffect::SetCursor(Cursor::Crosshair)));
    }

    #[test]
    fn test_second_pointer_down_is_ignored_mid_drag() {
        let state = CropState::Active {
            rect: Rect::new(10.0, 10.0, 50.0, 30.0),
            interaction: Interaction::Moving {
                offset: Point::new(5.0, 5.0),
            },
        };
        let t = transition(&state, CropEvent::PointerDown(Point::new(150.0, 90.0)), &ctx());
        assert_eq!(t.state, state);
    }

    #[test]
    fn test_non_finite_pointer_is_ignored() {
        let idle = active(Rect::new(10.0, 10.0, 50.0, 30.0));
        let creating = CropState::Active {
            rect: Rect::new(10.0, 10.0, 50.0, 30.0),
            interaction: Interaction::Creating {
                anchor: Point::new(10.0, 10.0),
            },
        };
        for p in [
            Point::new(f64::NAN, 20.0),
            Point::new(20.0, f64::INFINITY),
            Point::new(f64::NEG_INFINITY, f64::NAN),
        ] {
            let t = transition(&idle, CropEvent::PointerDown(p), &ctx());
            assert_eq!(t.state, idle);
            assert!(t.effects.is_empty());

            let t = transition(&creating, CropEvent::PointerMove(p), &ctx());
            assert_eq!(t.state, creating);
            assert!(t.effects.is_empty());
        }
    }

    #[test]
    fn test_apply_commits_pixel_region() {
        let state = active(Rect::new(10.0, 10.0, 50.0, 30.0));
        let t = transition(&state, CropEvent::Apply, &ctx());
        assert_eq!(t.state, CropState::Inactive);
        assert_eq!(t.effects[0], CropEffect::Commit(PixelRect::new(10, 10, 50, 30)));
        assert!(t.effects.contains(&CropEffect::ShowCropControls(false)));
    }

    #[test]
    fn test_apply_on_degenerate_rect_is_ignored() {
        let state = CropState::Active {
            rect: Rect::new(10.0, 10.0, 0.0, 0.0),
            interaction: Interaction::Idle,
        };
        assert!(!state.can_apply());
        let t = transition(&state, CropEvent::Apply, &ctx());
        assert_eq!(t.state, state);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_cancel_discards_selection() {
        let state = active(Rect::new(10.0, 10.0, 50.0, 30.0));
        let t = transition(&state, CropEvent::Cancel, &ctx());
        assert_eq!(t.state, CropState::Inactive);
        assert!(!t.effects.iter().any(|e| matches!(e, CropEffect::Commit(_))));
        assert!(t.effects.contains(&CropEffect::Redraw));
    }

    #[test]
    fn test_min_size_is_twice_handle() {
        assert_eq!(CropContext::new(Size::new(1, 1), 10.0).min_size(), 20.0);
        assert_eq!(CropContext::new(Size::new(1, 1), 6.0).min_size(), 12.0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
