use bevy::prelude::*;
use puzzle_helpers::input::{current_world_position, just_pressed_world_position};
use puzzle_helpers::{WINDOW_HEIGHT, WINDOW_WIDTH};

use crate::game::{GameState, PuzzleSolved};
use crate::puzzle::{MoveOutcome, PuzzleEngine};

// Pointer travel below this distance stays a tap
const TAP_SLOP: f32 = 10.0;

#[derive(Resource, Default)]
struct DragState {
    start: Option<Vec2>,
    dragging: bool,
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DragState>()
            .add_systems(Update, handle_pointer.run_if(in_state(GameState::Playing)))
            .add_systems(OnExit(GameState::Playing), reset_drag_state);
    }
}

fn handle_pointer(
    windows: Query<&Window>,
    buttons: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    camera: Query<(&Camera, &GlobalTransform)>,
    mut drag_state: ResMut<DragState>,
    mut engine: ResMut<PuzzleEngine>,
    mut solved_events: EventWriter<PuzzleSolved>,
) {
    // Gesture start; presses outside the board never reach the engine
    if let Some(world_position) =
        just_pressed_world_position(&buttons, &touch_input, &windows, &camera)
    {
        let point = to_surface(world_position);
        drag_state.start = in_board(point).then_some(point);
        drag_state.dragging = false;
        return;
    }

    let Some(start) = drag_state.start else {
        return;
    };

    // Gesture end: taps commit directly, drags go through the release
    // threshold
    if buttons.just_released(MouseButton::Left) || touch_input.any_just_released() {
        let outcome = if drag_state.dragging {
            engine.on_release()
        } else {
            engine.on_tap(start)
        };

        if outcome.moved() {
            debug!("board after move:\n{}", engine.board());
        }
        if outcome == MoveOutcome::Solved {
            solved_events.send(PuzzleSolved);
        }

        drag_state.start = None;
        drag_state.dragging = false;
        return;
    }

    // Gesture update
    if let Some(world_position) =
        current_world_position(&buttons, &touch_input, &windows, &camera)
    {
        let point = to_surface(world_position);
        if !drag_state.dragging && start.distance(point) < TAP_SLOP {
            return;
        }
        drag_state.dragging = true;
        engine.on_drag(start, point);
    }
}

fn reset_drag_state(mut drag_state: ResMut<DragState>) {
    *drag_state = DragState::default();
}

// World coordinates (center origin, y up) to the surface pixels the
// engine works in (top-left origin, y down).
fn to_surface(world: Vec2) -> Vec2 {
    Vec2::new(
        world.x + WINDOW_WIDTH / 2.0,
        WINDOW_HEIGHT / 2.0 - world.y,
    )
}

fn in_board(point: Vec2) -> bool {
    point.x >= 0.0 && point.x < WINDOW_WIDTH && point.y >= 0.0 && point.y < WINDOW_HEIGHT
}
