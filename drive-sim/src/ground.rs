//! Recycled window of ground tiles that follows the vehicle.
//!
//! The window holds `(2R + 1)²` slots allocated once at construction. When the
//! vehicle crosses into a new tile, every slot is rewritten in place with the
//! translation and checkerboard shade of the world tile it now covers. Between
//! crossings `recenter` is a no-op.

use bevy::math::{IVec2, Vec3};
use tracing::debug;

/// Two-valued checkerboard category of a ground tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileShade {
    #[default]
    Light,
    Dark,
}

impl TileShade {
    /// Shade of the world tile at `(x, z)`. Tile (0, 0) is light.
    pub fn of(tile: IVec2) -> Self {
        if (tile.x.rem_euclid(2) + tile.y.rem_euclid(2)) % 2 == 0 {
            TileShade::Light
        } else {
            TileShade::Dark
        }
    }
}

/// One recycled tile of the window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TileSlot {
    /// Absolute tile coordinate this slot currently covers (x, z).
    pub tile: IVec2,
    /// Center of the tile's box in world space.
    pub translation: Vec3,
    pub shade: TileShade,
}

#[derive(Debug, Clone)]
pub struct GroundGrid {
    radius: u32,
    tile_size: f32,
    tile_thickness: f32,
    slots: Box<[TileSlot]>,
    /// `None` until the first rebuild.
    center: Option<IVec2>,
    generation: u64,
}

impl GroundGrid {
    /// Allocate the slot window. Slots stay blank until the first `recenter`.
    pub fn new(radius: u32, tile_size: f32, tile_thickness: f32) -> Self {
        let side = (2 * radius + 1) as usize;
        Self {
            radius,
            tile_size,
            tile_thickness,
            slots: vec![TileSlot::default(); side * side].into_boxed_slice(),
            center: None,
            generation: 0,
        }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn tile_thickness(&self) -> f32 {
        self.tile_thickness
    }

    /// Number of slots along one edge of the window.
    pub fn side(&self) -> usize {
        (2 * self.radius + 1) as usize
    }

    /// Center tile of the last rebuild, if any.
    pub fn center(&self) -> Option<IVec2> {
        self.center
    }

    /// Number of full-window rebuilds performed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn slots(&self) -> &[TileSlot] {
        &self.slots
    }

    /// Slot at local window coordinate `(sx, sz)`, both in `0..side()`.
    pub fn slot(&self, sx: usize, sz: usize) -> Option<&TileSlot> {
        let side = self.side();
        if sx >= side || sz >= side {
            return None;
        }
        self.slots.get(sx * side + sz)
    }

    /// Tile containing `position`, rounding half up like the window center.
    pub fn tile_at(&self, position: Vec3) -> IVec2 {
        IVec2::new(
            round_half_up(position.x / self.tile_size),
            round_half_up(position.z / self.tile_size),
        )
    }

    /// Center the window on the tile under `position`.
    ///
    /// Returns `true` when the window was rebuilt. Without `force`, nothing
    /// happens while the vehicle stays inside the previously recorded tile.
    pub fn recenter(&mut self, position: Vec3, force: bool) -> bool {
        let center = self.tile_at(position);
        if !force && self.center == Some(center) {
            return false;
        }

        let side = self.side();
        let radius = self.radius as i32;
        let y = -self.tile_thickness / 2.0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let sx = (index / side) as i32;
            let sz = (index % side) as i32;
            let tile = IVec2::new(center.x + sx - radius, center.y + sz - radius);

            slot.tile = tile;
            slot.translation = Vec3::new(
                tile.x as f32 * self.tile_size,
                y,
                tile.y as f32 * self.tile_size,
            );
            slot.shade = TileShade::of(tile);
        }

        debug!(
            "ground window recentered on tile ({}, {}), {} slots",
            center.x,
            center.y,
            self.slots.len()
        );
        self.center = Some(center);
        self.generation += 1;
        true
    }
}

fn round_half_up(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}
