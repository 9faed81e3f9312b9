//! Stage layout: the page geometry bricks are built from
//!
//! The page script measures every calendar event chip and hands the
//! rectangles over as a [`StageLayout`]. The same layout is replayed on
//! every stage. For native runs and tests, [`generate_calendar_layout`]
//! fakes a week view.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{CornerRadii, Rect};
use super::state::Brick;
use crate::config::{ConfigError, GameConfig};

/// One calendar event chip as measured on the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickSpec {
    pub id: u32,
    pub rect: Rect,
    /// Border radii, when the page reported them
    #[serde(default)]
    pub radii: Option<CornerRadii>,
    /// Visually heavy chip (solid fill) that takes more hits
    #[serde(default)]
    pub heavy: bool,
}

/// Everything needed to lay out a stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageLayout {
    pub viewport: Rect,
    pub bricks: Vec<BrickSpec>,
}

impl StageLayout {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let layout: Self = serde_json::from_str(json)?;
        if !layout.viewport.is_valid() {
            return Err(ConfigError::Invalid {
                field: "viewport",
                reason: "must have positive, finite size",
            });
        }
        Ok(layout)
    }
}

/// Build fresh bricks for a stage
///
/// Chips entirely above the viewport, or starting at or below its bottom,
/// are scrolled out of view and left out. So are degenerate rectangles.
pub fn build_bricks(layout: &StageLayout, config: &GameConfig) -> Vec<Brick> {
    let viewport = layout.viewport;
    layout
        .bricks
        .iter()
        .filter(|chip| {
            if !chip.rect.is_valid() {
                log::warn!("Skipping brick {} with degenerate rect {:?}", chip.id, chip.rect);
                return false;
            }
            chip.rect.bottom >= viewport.top && chip.rect.top < viewport.bottom
        })
        .map(|chip| {
            let hp = config.brick_hp(chip.heavy);
            let radii = chip
                .radii
                .unwrap_or_else(|| CornerRadii::uniform(config.default_border_radius));
            Brick::new(
                chip.id,
                chip.rect,
                radii,
                hp,
                u32::from(hp).saturating_mul(config.points_per_hp),
                config.ball_radius,
            )
        })
        .collect()
}

/// Days in the generated week view
const DAYS: u32 = 7;
/// Hour slots per day column
const SLOTS: u32 = 12;
/// Share of the viewport width kept free in front of the paddle
const PLAY_AREA_START: f32 = 0.25;

/// Generate a plausible week of calendar events inside `viewport`
///
/// Deterministic for a given seed. Chips never overlap and keep a gap of
/// at least a few pixels to their neighbours.
pub fn generate_calendar_layout(seed: u64, viewport: Rect) -> StageLayout {
    let mut rng = Pcg32::seed_from_u64(seed);

    let grid_left = viewport.left + viewport.width() * PLAY_AREA_START;
    let column_width = (viewport.right - grid_left) / DAYS as f32;
    let slot_height = viewport.height() / SLOTS as f32;
    let gap = (column_width * 0.08).max(4.0);

    let mut bricks = Vec::new();
    let mut next_id = 1;

    for day in 0..DAYS {
        let left = grid_left + day as f32 * column_width + gap / 2.0;
        let right = left + column_width - gap;

        let mut slot = 0;
        while slot < SLOTS {
            if !rng.random_bool(0.35) {
                slot += 1;
                continue;
            }
            let length = rng.random_range(1..=2).min(SLOTS - slot);
            let top = viewport.top + slot as f32 * slot_height + gap / 2.0;
            let bottom = top + length as f32 * slot_height - gap;
            let radius = if rng.random_bool(0.8) { 4.0 } else { 8.0 };

            bricks.push(BrickSpec {
                id: next_id,
                rect: Rect::new(left, top, right, bottom),
                radii: Some(CornerRadii::uniform(radius)),
                heavy: rng.random_bool(0.25),
            });
            next_id += 1;
            slot += length;
        }
    }

    StageLayout { viewport, bricks }
}
