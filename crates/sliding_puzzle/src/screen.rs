use bevy::color::palettes::css::YELLOW;
use bevy::prelude::*;
use puzzle_helpers::FONT;
use puzzle_helpers::input::just_pressed_world_position;

use crate::game::GameState;

const RESULT_DISPLAY_SECONDS: f32 = 2.0;

/// Welcome and solved overlays around the playing state.
pub struct ScreenPlugin;

#[derive(Component)]
struct WelcomeScreen;

#[derive(Component)]
struct SolvedScreen;

#[derive(Component)]
struct ResultTimer {
    timer: Timer,
}

impl Plugin for ScreenPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Welcome), spawn_welcome_screen)
            .add_systems(
                Update,
                handle_welcome_input.run_if(in_state(GameState::Welcome)),
            )
            .add_systems(OnExit(GameState::Welcome), despawn_screen::<WelcomeScreen>)
            .add_systems(OnEnter(GameState::Solved), spawn_solved_screen)
            .add_systems(
                Update,
                advance_after_result.run_if(in_state(GameState::Solved)),
            )
            .add_systems(OnExit(GameState::Solved), despawn_screen::<SolvedScreen>);
    }
}

fn spawn_welcome_screen(mut commands: Commands, asset_server: Res<AssetServer>) {
    let font = asset_server.load(FONT);
    let base_text_font = TextFont {
        font,
        font_size: 50.0,
        ..default()
    };

    commands
        .spawn((WelcomeScreen, Transform::default(), Visibility::default()))
        .with_children(|parent| {
            parent.spawn((
                Text2d::new("Sliding Puzzle"),
                base_text_font.clone().with_font_size(64.0),
                TextLayout::new_with_justify(JustifyText::Center),
                Transform::from_translation(Vec3::new(0.0, 100.0, 0.0)),
            ));

            parent.spawn((
                Text2d::new("Slide the tiles\nto rebuild the picture"),
                base_text_font.clone(),
                TextLayout::new_with_justify(JustifyText::Center),
                Transform::from_translation(Vec3::new(0.0, 0.0, 0.0)),
            ));

            parent.spawn((
                Text2d::new("Click or tap to start"),
                base_text_font.with_font_size(40.0),
                TextLayout::new_with_justify(JustifyText::Center),
                TextColor(Color::Srgba(YELLOW)),
                Transform::from_translation(Vec3::new(0.0, -100.0, 0.0)),
            ));
        });
}

fn handle_welcome_input(
    windows: Query<&Window>,
    buttons: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    camera: Query<(&Camera, &GlobalTransform)>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if just_pressed_world_position(&buttons, &touch_input, &windows, &camera).is_some() {
        next_state.set(GameState::Playing);
    }
}

fn spawn_solved_screen(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands
        .spawn((SolvedScreen, Transform::default(), Visibility::default()))
        .insert(ResultTimer {
            timer: Timer::from_seconds(RESULT_DISPLAY_SECONDS, TimerMode::Once),
        })
        .with_children(|parent| {
            parent.spawn((
                Text2d::new("Solved!"),
                TextFont {
                    font: asset_server.load(FONT),
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::Srgba(YELLOW)),
                TextLayout::new_with_justify(JustifyText::Center),
                Transform::from_xyz(0.0, 240.0, 10.0),
            ));
        });
}

fn advance_after_result(
    time: Res<Time>,
    mut timers: Query<&mut ResultTimer>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for mut result in &mut timers {
        result.timer.tick(time.delta());
        if result.timer.finished() {
            next_state.set(GameState::Playing);
        }
    }
}

fn despawn_screen<T: Component>(mut commands: Commands, screens: Query<Entity, With<T>>) {
    for entity in screens.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
