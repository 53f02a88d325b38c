/// Tunnel shapes, the per-level tunnel arena and the dug-tile mask.

use rand::Rng;

use crate::config::{
    GRID_HEIGHT, GRID_WIDTH, HORIZONTAL_TARGET, TOTAL_TARGET, TUNNEL_ATTEMPTS, TUNNEL_MAX_LEN,
    TUNNEL_MIN_LEN,
};
use crate::geometry::Tile;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A straight corridor `length` tiles long starting at `origin`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tunnel {
    pub origin: Tile,
    pub length: i32,
    pub orientation: Orientation,
    /// Set once the player first steps inside; cleared only by a level reset.
    pub activated: bool,
}

impl Tunnel {
    pub fn new(origin: Tile, length: i32, orientation: Orientation) -> Self {
        Self {
            origin,
            length,
            orientation,
            activated: false,
        }
    }

    /// Coordinate along the tunnel's axis where it starts.
    fn start(&self) -> i32 {
        match self.orientation {
            Orientation::Horizontal => self.origin.x,
            Orientation::Vertical => self.origin.y,
        }
    }

    /// One past the last tile along the axis.
    fn end(&self) -> i32 {
        self.start() + self.length
    }

    /// The fixed perpendicular coordinate (row of a horizontal tunnel,
    /// column of a vertical one).
    fn lane(&self) -> i32 {
        match self.orientation {
            Orientation::Horizontal => self.origin.y,
            Orientation::Vertical => self.origin.x,
        }
    }

    /// Axis coordinate range `[first, last]` of the tunnel's end tiles.
    pub fn span(&self) -> (i32, i32) {
        (self.start(), self.end() - 1)
    }

    pub fn contains(&self, tile: Tile) -> bool {
        let (along, across) = match self.orientation {
            Orientation::Horizontal => (tile.x, tile.y),
            Orientation::Vertical => (tile.y, tile.x),
        };
        across == self.lane() && along >= self.start() && along < self.end()
    }

    pub fn intersects(&self, other: &Tunnel) -> bool {
        if self.orientation == other.orientation {
            self.lane() == other.lane() && self.start() < other.end() && other.start() < self.end()
        } else {
            // Perpendicular: each lane must cross the other's span.
            other.lane() >= self.start()
                && other.lane() < self.end()
                && self.lane() >= other.start()
                && self.lane() < other.end()
        }
    }

    /// Every tile the tunnel covers, from origin outwards.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        (0..self.length).map(move |i| match self.orientation {
            Orientation::Horizontal => Tile::new(self.origin.x + i, self.origin.y),
            Orientation::Vertical => Tile::new(self.origin.x, self.origin.y + i),
        })
    }

    /// Where a resident enemy is spawned.
    pub fn middle_tile(&self) -> Tile {
        let half = self.length / 2;
        match self.orientation {
            Orientation::Horizontal => Tile::new(self.origin.x + half, self.origin.y),
            Orientation::Vertical => Tile::new(self.origin.x, self.origin.y + half),
        }
    }

    /// True if the tunnel keeps a one-tile margin from every grid edge.
    pub fn within_margin(&self) -> bool {
        let (along_limit, across_limit) = match self.orientation {
            Orientation::Horizontal => (GRID_WIDTH, GRID_HEIGHT),
            Orientation::Vertical => (GRID_HEIGHT, GRID_WIDTH),
        };
        self.start() >= 1
            && self.end() < along_limit - 1
            && self.lane() >= 1
            && self.lane() < across_limit - 1
    }
}

/// Stable handle to a tunnel of the current level.  Handles from a previous
/// level are meaningless once the network is regenerated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TunnelId(pub usize);

/// All tunnels of one level.  Tunnels are only ever appended, so a
/// `TunnelId` stays valid until the next `clear`.
#[derive(Clone, Debug, Default)]
pub struct TunnelNetwork {
    tunnels: Vec<Tunnel>,
}

impl TunnelNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tunnels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tunnels.is_empty()
    }

    pub fn clear(&mut self) {
        self.tunnels.clear();
    }

    pub fn get(&self, id: TunnelId) -> Option<&Tunnel> {
        self.tunnels.get(id.0)
    }

    pub fn get_mut(&mut self, id: TunnelId) -> Option<&mut Tunnel> {
        self.tunnels.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TunnelId, &Tunnel)> {
        self.tunnels.iter().enumerate().map(|(i, t)| (TunnelId(i), t))
    }

    /// Inside the grid margin and clear of every accepted tunnel.
    pub fn is_valid_tunnel(&self, candidate: &Tunnel) -> bool {
        candidate.within_margin() && !self.tunnels.iter().any(|t| t.intersects(candidate))
    }

    /// Accept `candidate` if it is valid, returning its handle.
    pub fn try_add(&mut self, candidate: Tunnel) -> Option<TunnelId> {
        if !self.is_valid_tunnel(&candidate) {
            return None;
        }
        self.tunnels.push(candidate);
        Some(TunnelId(self.tunnels.len() - 1))
    }

    /// The tunnel covering `tile`, if any.  Tunnels never overlap, so at
    /// most one can match.
    pub fn tunnel_at(&self, tile: Tile) -> Option<TunnelId> {
        self.iter().find(|(_, t)| t.contains(tile)).map(|(id, _)| id)
    }

    /// Replace the network with a fresh random layout.
    ///
    /// Horizontal tunnels are placed first, then vertical ones, each with at
    /// most `TUNNEL_ATTEMPTS` tries.  Rejected placements are simply dropped,
    /// so a crowded grid yields fewer than `TOTAL_TARGET` tunnels.
    pub fn generate_layout(&mut self, rng: &mut impl Rng) {
        self.clear();

        let mut attempts = 0;
        while self.len() < HORIZONTAL_TARGET && attempts < TUNNEL_ATTEMPTS {
            let x = rng.gen_range(2..GRID_WIDTH - 8);
            let y = rng.gen_range(2..GRID_HEIGHT - 2);
            let length = rng.gen_range(TUNNEL_MIN_LEN..=TUNNEL_MAX_LEN);
            let _ = self.try_add(Tunnel::new(Tile::new(x, y), length, Orientation::Horizontal));
            attempts += 1;
        }

        attempts = 0;
        while self.len() < TOTAL_TARGET && attempts < TUNNEL_ATTEMPTS {
            let x = rng.gen_range(2..GRID_WIDTH - 2);
            let y = rng.gen_range(2..GRID_HEIGHT - 8);
            let length = rng.gen_range(TUNNEL_MIN_LEN..=TUNNEL_MAX_LEN);
            let _ = self.try_add(Tunnel::new(Tile::new(x, y), length, Orientation::Vertical));
            attempts += 1;
        }

        log::debug!("generated {} tunnels (target {})", self.len(), TOTAL_TARGET);
    }

    /// Tunnels come pre-dug.
    pub fn mark_dug(&self, mask: &mut DigMask) {
        for tunnel in &self.tunnels {
            for tile in tunnel.tiles() {
                mask.dig(tile);
            }
        }
    }

    pub fn reset_activation(&mut self) {
        for tunnel in &mut self.tunnels {
            tunnel.activated = false;
        }
    }
}

/// Which tiles have been dug out, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct DigMask {
    cells: Vec<bool>,
}

impl Default for DigMask {
    fn default() -> Self {
        Self {
            cells: vec![false; (GRID_WIDTH * GRID_HEIGHT) as usize],
        }
    }
}

impl DigMask {
    pub fn new() -> Self {
        Self::default()
    }

    fn index(tile: Tile) -> Option<usize> {
        let inside = (0..GRID_WIDTH).contains(&tile.x) && (0..GRID_HEIGHT).contains(&tile.y);
        inside.then(|| (tile.y * GRID_WIDTH + tile.x) as usize)
    }

    pub fn is_dug(&self, tile: Tile) -> bool {
        Self::index(tile).map(|i| self.cells[i]).unwrap_or(false)
    }

    /// Tiles outside the grid are ignored.
    pub fn dig(&mut self, tile: Tile) {
        if let Some(i) = Self::index(tile) {
            self.cells[i] = true;
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn dug_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal(x: i32, y: i32, len: i32) -> Tunnel {
        Tunnel::new(Tile::new(x, y), len, Orientation::Horizontal)
    }

    fn vertical(x: i32, y: i32, len: i32) -> Tunnel {
        Tunnel::new(Tile::new(x, y), len, Orientation::Vertical)
    }

    #[test]
    fn contains_is_half_open() {
        let t = horizontal(3, 5, 4);
        assert!(t.contains(Tile::new(3, 5)));
        assert!(t.contains(Tile::new(6, 5)));
        assert!(!t.contains(Tile::new(7, 5)));
        assert!(!t.contains(Tile::new(2, 5)));
        assert!(!t.contains(Tile::new(4, 6)));

        let v = vertical(3, 5, 4);
        assert!(v.contains(Tile::new(3, 8)));
        assert!(!v.contains(Tile::new(3, 9)));
        assert!(!v.contains(Tile::new(4, 5)));
    }

    #[test]
    fn parallel_tunnels_overlap_only_on_same_lane() {
        let a = horizontal(2, 4, 4);
        assert!(a.intersects(&horizontal(5, 4, 4)));
        assert!(!a.intersects(&horizontal(6, 4, 4))); // end is exclusive
        assert!(!a.intersects(&horizontal(2, 5, 4)));

        let v = vertical(7, 2, 5);
        assert!(v.intersects(&vertical(7, 6, 4)));
        assert!(!v.intersects(&vertical(7, 7, 4)));
    }

    #[test]
    fn crossing_tunnels_intersect() {
        let h = horizontal(2, 5, 6); // x 2..8 on row 5
        assert!(h.intersects(&vertical(4, 3, 4))); // rows 3..7 on column 4
        assert!(vertical(4, 3, 4).intersects(&h));
        assert!(!h.intersects(&vertical(8, 3, 4))); // column past the end
        assert!(!h.intersects(&vertical(4, 6, 4))); // starts below the row
    }

    #[test]
    fn validity_respects_margin() {
        let net = TunnelNetwork::new();
        assert!(net.is_valid_tunnel(&horizontal(1, 1, 4)));
        assert!(!net.is_valid_tunnel(&horizontal(0, 3, 4)));
        // end must stay below GRID_WIDTH - 1
        assert!(net.is_valid_tunnel(&horizontal(GRID_WIDTH - 7, 3, 5)));
        assert!(!net.is_valid_tunnel(&horizontal(GRID_WIDTH - 6, 3, 5)));
        assert!(!net.is_valid_tunnel(&vertical(3, GRID_HEIGHT - 5, 4)));
        assert!(!net.is_valid_tunnel(&vertical(GRID_WIDTH - 1, 3, 4)));
    }

    #[test]
    fn try_add_rejects_overlap() {
        let mut net = TunnelNetwork::new();
        assert_eq!(net.try_add(horizontal(2, 4, 4)), Some(TunnelId(0)));
        assert_eq!(net.try_add(vertical(3, 2, 5)), None);
        assert_eq!(net.try_add(vertical(9, 2, 5)), Some(TunnelId(1)));
        assert_eq!(net.tunnel_at(Tile::new(9, 6)), Some(TunnelId(1)));
        assert_eq!(net.tunnel_at(Tile::new(1, 1)), None);
    }

    #[test]
    fn dig_mask_ignores_out_of_range() {
        let mut mask = DigMask::new();
        mask.dig(Tile::new(-1, 0));
        mask.dig(Tile::new(GRID_WIDTH, 0));
        assert_eq!(mask.dug_count(), 0);
        mask.dig(Tile::new(0, 0));
        mask.dig(Tile::new(0, 0));
        assert!(mask.is_dug(Tile::new(0, 0)));
        assert_eq!(mask.dug_count(), 1);
        mask.clear();
        assert!(!mask.is_dug(Tile::new(0, 0)));
    }
}
