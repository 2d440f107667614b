use bevy::prelude::*;
use puzzle_helpers::{WINDOW_HEIGHT, WINDOW_WIDTH};

mod game;
mod input;
mod puzzle;
mod screen;
mod tiles;

use game::{GRID_COLS, GRID_ROWS, GamePlugin, GameState};
use input::InputPlugin;
use puzzle::PuzzleEngine;
use screen::ScreenPlugin;
use tiles::TilePlugin;

pub fn run() {
    let tile_size = Vec2::new(
        WINDOW_WIDTH / GRID_COLS as f32,
        WINDOW_HEIGHT / GRID_ROWS as f32,
    );
    let engine = PuzzleEngine::new(GRID_ROWS, GRID_COLS, tile_size)
        .expect("puzzle grid must be at least 2x2");

    puzzle_helpers::get_default_app("Sliding Puzzle")
        .insert_resource(engine)
        .init_state::<GameState>()
        .add_plugins(GamePlugin)
        .add_plugins(TilePlugin)
        .add_plugins(InputPlugin)
        .add_plugins(ScreenPlugin)
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}
