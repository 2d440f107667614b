use bevy::prelude::*;
use puzzle_helpers::{FONT, WINDOW_HEIGHT, WINDOW_WIDTH};

use crate::game::GameState;
use crate::puzzle::{Position, PuzzleEngine};

const PUZZLE_IMAGE: &str = "puzzle.png";
const TILE_BORDER: f32 = 2.0;
const NUMBER_FONT_SIZE: f32 = 40.0;

/// Sprite hierarchy for one tile, tracked by tile identity. The cell it
/// occupies is looked up from the board every frame.
#[derive(Component)]
pub struct TileVisual {
    tile: usize,
}

pub struct TilePlugin;

impl Plugin for TilePlugin {
    fn build(&self, app: &mut App) {
        // Tiles from the previous round stay on screen under the solved
        // overlay; they are replaced when the next round starts.
        app.add_systems(
            OnEnter(GameState::Playing),
            (despawn_tiles, spawn_tiles).chain(),
        )
        .add_systems(
            Update,
            sync_tile_transforms.run_if(in_state(GameState::Playing)),
        );
    }
}

fn spawn_tiles(
    mut commands: Commands,
    mut engine: ResMut<PuzzleEngine>,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
) {
    engine.reshuffle();
    info!("new round:\n{}", engine.board());

    let tile_size = engine.tile_size();
    let board = engine.board();

    // The source image is carved into one atlas cell per tile, in the
    // same row-major order as the tile indices.
    let texture = asset_server.load(PUZZLE_IMAGE);
    let layout = TextureAtlasLayout::from_grid(
        UVec2::new(tile_size.x as u32, tile_size.y as u32),
        board.cols() as u32,
        board.rows() as u32,
        None,
        None,
    );
    let layout_handle = layouts.add(layout);

    for row in 0..board.rows() {
        for column in 0..board.cols() {
            let position = Position::new(row, column);
            let Some(tile) = board.tile_at(position) else {
                continue;
            };
            if tile == board.empty_tile() {
                continue;
            }

            commands
                .spawn((
                    Sprite::from_color(Color::WHITE, tile_size),
                    TileVisual { tile },
                    Transform::from_translation(tile_translation(position, Vec2::ZERO, tile_size)),
                ))
                .with_children(|parent| {
                    parent.spawn((
                        Sprite {
                            custom_size: Some(tile_size - Vec2::splat(TILE_BORDER * 2.0)),
                            ..Sprite::from_atlas_image(
                                texture.clone(),
                                TextureAtlas {
                                    layout: layout_handle.clone(),
                                    index: tile,
                                },
                            )
                        },
                        Transform::from_xyz(0.0, 0.0, 1.0),
                    ));
                    // Tile number on top to make the play easier
                    parent.spawn((
                        Text2d::new((tile + 1).to_string()),
                        TextFont {
                            font: asset_server.load(FONT),
                            font_size: NUMBER_FONT_SIZE,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        Transform::from_xyz(0.0, 0.0, 2.0),
                    ));
                });
        }
    }
}

fn despawn_tiles(mut commands: Commands, tiles: Query<Entity, With<TileVisual>>) {
    for entity in tiles.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

fn sync_tile_transforms(
    engine: Res<PuzzleEngine>,
    mut tiles: Query<(&TileVisual, &mut Transform)>,
) {
    let board = engine.board();
    for (visual, mut transform) in &mut tiles {
        let Some(position) = board.position_of(visual.tile) else {
            continue;
        };
        let offset = engine.drag_offset(position);
        transform.translation = tile_translation(position, offset, engine.tile_size());
    }
}

// Surface pixels (origin top-left, y down) to world coordinates of the
// cell center, drag offset included.
fn tile_translation(position: Position, offset: Vec2, tile_size: Vec2) -> Vec3 {
    Vec3::new(
        (position.column as f32 + 0.5).mul_add(tile_size.x, -WINDOW_WIDTH / 2.0) + offset.x,
        (position.row as f32 + 0.5).mul_add(-tile_size.y, WINDOW_HEIGHT / 2.0) - offset.y,
        0.0,
    )
}
