//! HUD text and the start / pause / game-over overlays.

use bevy::prelude::*;
use bevy::ui::{AlignItems, FlexDirection, JustifyContent, Node};

use super::outbox::HostOutbox;
use super::session::ActiveSession;
use super::state::AppState;
use crate::audio::settings::AudioSettings;
use crate::core::system::system_order::HudSet;
use crate::rendering::palette::palette::{HUD_TEXT, OVERLAY_BG};

pub struct ScreensPlugin;

impl Plugin for ScreensPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(OnEnter(AppState::Menu), spawn_start_overlay)
            .add_systems(OnEnter(AppState::Paused), spawn_pause_overlay)
            .add_systems(OnEnter(AppState::GameOver), spawn_game_over_overlay)
            .add_systems(OnExit(AppState::Menu), despawn_overlays)
            .add_systems(OnExit(AppState::Paused), despawn_overlays)
            .add_systems(OnExit(AppState::GameOver), despawn_overlays)
            .add_systems(Update, refresh_hud.in_set(HudSet));
    }
}

#[derive(Component)]
struct HudScore;
#[derive(Component)]
struct HudCoins;
#[derive(Component)]
struct HudAudio;
#[derive(Component)]
struct ScreenOverlay;

fn spawn_hud(mut commands: Commands) {
    let font = TextFont {
        font_size: 28.0,
        ..default()
    };
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            left: Val::Px(16.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|p| {
            p.spawn((HudScore, Text::new("Score: 0"), font.clone(), TextColor(HUD_TEXT)));
            p.spawn((HudCoins, Text::new("Coins: 0"), font.clone(), TextColor(HUD_TEXT)));
            p.spawn((
                HudAudio,
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(HUD_TEXT),
            ));
        });
}

fn refresh_hud(
    outbox: Res<HostOutbox>,
    settings: Option<Res<AudioSettings>>,
    mut q_score: Query<&mut Text, (With<HudScore>, Without<HudCoins>, Without<HudAudio>)>,
    mut q_coins: Query<&mut Text, (With<HudCoins>, Without<HudScore>, Without<HudAudio>)>,
    mut q_audio: Query<&mut Text, (With<HudAudio>, Without<HudScore>, Without<HudCoins>)>,
) {
    set_text(&mut q_score, format!("Score: {}", outbox.score));
    set_text(&mut q_coins, format!("Coins: {}", outbox.coins));
    if let Some(s) = settings {
        let onoff = |b: bool| if b { "on" } else { "off" };
        set_text(
            &mut q_audio,
            format!("sound {} [N]  music {} [B]", onoff(s.sound_enabled), onoff(s.music_enabled)),
        );
    }
}

fn set_text<F: bevy::ecs::query::QueryFilter>(q: &mut Query<&mut Text, F>, s: String) {
    let Ok(mut text) = q.single_mut() else { return; };
    if text.as_str() != s {
        *text = Text::new(s);
    }
}

fn spawn_overlay(commands: &mut Commands, lines: &[(String, f32)]) {
    commands
        .spawn((
            ScreenOverlay,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(12.0),
                ..default()
            },
            BackgroundColor(OVERLAY_BG),
        ))
        .with_children(|p| {
            for (line, size) in lines {
                p.spawn((
                    Text::new(line.clone()),
                    TextFont {
                        font_size: *size,
                        ..default()
                    },
                    TextColor(HUD_TEXT),
                ));
            }
        });
}

fn spawn_start_overlay(mut commands: Commands) {
    info!(target: "menu", "=== RAIL RUNNER === press Enter/Space or tap to start");
    spawn_overlay(
        &mut commands,
        &[
            ("RAIL RUNNER".into(), 64.0),
            ("Enter / Space / tap to start".into(), 26.0),
            ("Arrows or swipes: move, jump, slide. Esc pauses.".into(), 18.0),
        ],
    );
}

fn spawn_pause_overlay(mut commands: Commands) {
    spawn_overlay(
        &mut commands,
        &[
            ("PAUSED".into(), 56.0),
            ("Esc / Enter to resume, M for menu".into(), 22.0),
        ],
    );
}

fn spawn_game_over_overlay(mut commands: Commands, session: Res<ActiveSession>) {
    let (score, coins) = session
        .last_summary()
        .map(|s| (s.score, s.coins))
        .unwrap_or_default();
    spawn_overlay(
        &mut commands,
        &[
            ("GAME OVER".into(), 56.0),
            (format!("Final score: {score}"), 32.0),
            (format!("Coins: {coins}"), 24.0),
            ("Enter / tap to play again, M for menu".into(), 20.0),
        ],
    );
}

fn despawn_overlays(mut commands: Commands, q: Query<Entity, With<ScreenOverlay>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
