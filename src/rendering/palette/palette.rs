use bevy::prelude::*;

const fn hex(rgb: u32) -> Color {
    Color::srgb(
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
    )
}

pub const SKY: Color = hex(0x87ceeb);
pub const GROUND: Color = hex(0x444444);
pub const RAIL: Color = hex(0x8b4513);
pub const LANE_LINE: Color = hex(0xffff00);
pub const WALL: Color = hex(0x666666);
pub const PILLAR: Color = hex(0x888888);

pub const BOX: Color = hex(0xff4757);
pub const BARRIER: Color = hex(0xffa502);
pub const CONE: Color = hex(0xff6348);
pub const TRAIN_BODY: Color = hex(0x2c3e50);
pub const TRAIN_WINDOWS: Color = Color::srgba(0x34 as f32 / 255.0, 0x98 as f32 / 255.0, 0xdb as f32 / 255.0, 0.7);
pub const TRAIN_STRIPE: Color = hex(0xf1c40f);

pub const COIN: Color = hex(0xffd700);
pub const COIN_EMISSIVE: Color = hex(0x332200);
pub const COIN_GLOW: Color = Color::srgba(1.0, 1.0, 0.0, 0.3);

pub const PLAYER_BODY: Color = hex(0xff6b6b);
pub const PLAYER_SKIN: Color = hex(0xffcc99);
pub const PLAYER_LEGS: Color = hex(0x4a69bd);

pub const HUD_TEXT: Color = Color::WHITE;
pub const OVERLAY_BG: Color = Color::srgba(0.0, 0.0, 0.0, 0.7);
