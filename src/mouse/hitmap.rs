//! Per-frame spatial index of clickable regions.
//!
//! Renderers register regions while they draw and the mouse handler queries
//! them when the next event arrives. The map is cleared at the start of every
//! frame and rebuilt from scratch; it is never diffed.

use ratatui::layout::Rect;

use super::geometry;

/// A rectangular hit target registered for a single frame.
///
/// `id` names the kind of target (every row of a list shares one id) and
/// `data` tells instances of that kind apart (the row index, for example).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region<K, D> {
    pub id: K,
    pub rect: Rect,
    pub data: D,
}

impl<K, D> Region<K, D> {
    pub fn new(id: K, rect: Rect, data: D) -> Self {
        Self { id, rect, data }
    }

    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        geometry::contains(self.rect, x, y)
    }
}

/// Ordered collection of regions with last-registered-wins lookup.
///
/// Regions registered later are treated as drawn on top, so an overlay that
/// registers after its background wins every cell the two share.
#[derive(Debug, Clone)]
pub struct HitMap<K, D> {
    regions: Vec<Region<K, D>>,
}

impl<K, D> Default for HitMap<K, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, D> HitMap<K, D> {
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
        }
    }

    /// Drop every region. Call this before the first registration of a frame.
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Append a region. Overlaps and duplicates are allowed.
    pub fn add_rect(&mut self, id: K, x: u16, y: u16, width: u16, height: u16, data: D) {
        self.push(Region::new(id, Rect::new(x, y, width, height), data));
    }

    pub fn push(&mut self, region: Region<K, D>) {
        self.regions.push(region);
    }

    /// Topmost region containing `(x, y)`, if any.
    pub fn test(&self, x: u16, y: u16) -> Option<&Region<K, D>> {
        self.regions.iter().rev().find(|region| region.contains(x, y))
    }

    /// Every region in registration order.
    pub fn regions(&self) -> &[Region<K, D>] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Target {
        Row,
        Pane,
        Button,
    }

    #[test]
    fn test_empty_map_misses() {
        let map: HitMap<Target, usize> = HitMap::new();
        assert!(map.test(0, 0).is_none());
        assert!(map.is_empty());
    }

    #[test]
    fn test_basic_lookup() {
        let mut map = HitMap::new();
        map.add_rect(Target::Row, 0, 0, 10, 1, 0usize);
        map.add_rect(Target::Row, 0, 1, 10, 1, 1);
        map.add_rect(Target::Button, 20, 0, 5, 1, 0);

        assert_eq!(map.test(3, 0).map(|r| r.data), Some(0));
        assert_eq!(map.test(3, 1).map(|r| r.data), Some(1));
        assert_eq!(map.test(22, 0).map(|r| r.id), Some(Target::Button));
        assert!(map.test(15, 0).is_none());
        assert!(map.test(3, 2).is_none());
    }

    #[test]
    fn test_last_registered_wins() {
        let mut map = HitMap::new();
        map.add_rect(Target::Pane, 0, 0, 40, 20, 0usize);
        map.add_rect(Target::Button, 10, 10, 8, 1, 7);

        let hit = map.test(12, 10).unwrap();
        assert_eq!(hit.id, Target::Button);
        assert_eq!(hit.data, 7);

        // Outside the button the background still resolves.
        assert_eq!(map.test(2, 2).map(|r| r.id), Some(Target::Pane));
    }

    #[test]
    fn test_identical_rects_resolve_to_latest() {
        let mut map = HitMap::new();
        map.add_rect("row", 0, 0, 10, 1, 3usize);
        map.add_rect("row", 0, 0, 10, 1, 4);

        assert_eq!(map.test(5, 0).map(|r| r.data), Some(4));
    }

    #[test]
    fn test_zero_area_region_never_hits() {
        let mut map = HitMap::new();
        map.add_rect(Target::Pane, 0, 0, 10, 10, 0usize);
        map.add_rect(Target::Button, 5, 5, 0, 0, 1);

        assert_eq!(map.test(5, 5).map(|r| r.id), Some(Target::Pane));
    }

    #[test]
    fn test_clear_discards_previous_frame() {
        let mut map = HitMap::new();
        map.add_rect(Target::Row, 0, 0, 10, 1, 0usize);
        assert_eq!(map.len(), 1);

        map.clear();
        assert!(map.is_empty());
        assert!(map.test(5, 0).is_none());

        map.add_rect(Target::Row, 0, 4, 10, 1, 9);
        assert!(map.test(5, 0).is_none());
        assert_eq!(map.test(5, 4).map(|r| r.data), Some(9));
    }

    #[test]
    fn test_regions_snapshot_keeps_order() {
        let mut map = HitMap::new();
        map.add_rect(Target::Pane, 0, 0, 1, 1, 0usize);
        map.push(Region::new(Target::Button, Rect::new(1, 1, 1, 1), 1));

        let ids: Vec<_> = map.regions().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Target::Pane, Target::Button]);
    }
}
