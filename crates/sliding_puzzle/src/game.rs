use bevy::prelude::*;

pub const GRID_ROWS: usize = 4;
pub const GRID_COLS: usize = 4;

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    Welcome,
    Playing,
    Solved,
}

/// Fired once for the commit that puts the board into the solved
/// arrangement.
#[derive(Event)]
pub struct PuzzleSolved;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PuzzleSolved>()
            .add_systems(Update, handle_solved.run_if(in_state(GameState::Playing)));
    }
}

fn handle_solved(
    mut events: EventReader<PuzzleSolved>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !events.is_empty() {
        events.clear();
        info!("puzzle solved");
        next_state.set(GameState::Solved);
    }
}
