use crate::{pool::Frequency, C};
use geo::{point, Point};
use serde::Serialize;
use std::ops::{Index, IndexMut};

/// Position of a tower within its [`TowerSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TowerIdx(pub usize);

/// A relation from one tower to another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Link {
    /// The other tower.
    pub tower: TowerIdx,

    /// Great-circle distance between the two towers, in meters.
    pub distance_m: C,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tower {
    pub id: String,

    /// Location, where `x` is longitude and `y` is latitude.
    pub position: Point<C>,

    /// Carried through for display only.
    pub easting: C,

    /// Carried through for display only.
    pub northing: C,

    /// Assigned frequency, `None` until the assigner reaches it.
    pub frequency: Option<Frequency>,

    /// Towers closer than the threshold, in ascending index order.
    nearby: Vec<Link>,

    /// Towers at or beyond the threshold, in ascending index order.
    out_of_range: Vec<Link>,
}

impl Tower {
    pub fn new(id: impl Into<String>, easting: C, northing: C, longitude: C, latitude: C) -> Self {
        Self {
            id: id.into(),
            position: point!(x: longitude, y: latitude),
            easting,
            northing,
            frequency: None,
            nearby: Vec::new(),
            out_of_range: Vec::new(),
        }
    }

    pub fn latitude(&self) -> C {
        self.position.y()
    }

    pub fn longitude(&self) -> C {
        self.position.x()
    }

    pub fn nearby(&self) -> &[Link] {
        &self.nearby
    }

    pub fn out_of_range(&self) -> &[Link] {
        &self.out_of_range
    }

    /// Returns the out-of-range tower with the greatest distance.
    ///
    /// Ties go to the earliest entry.
    pub fn farthest(&self) -> Option<Link> {
        self.out_of_range.iter().fold(None, |best, link| match best {
            Some(best) if best.distance_m >= link.distance_m => Some(best),
            _ => Some(*link),
        })
    }

    /// Returns `true` if `other` is in either relation list.
    pub fn is_linked(&self, other: TowerIdx) -> bool {
        self.nearby
            .iter()
            .chain(self.out_of_range.iter())
            .any(|link| link.tower == other)
    }

    fn has_links(&self) -> bool {
        !(self.nearby.is_empty() && self.out_of_range.is_empty())
    }
}

/// Arena owning every tower of a run, in input order.
///
/// Relations between towers are stored as [`TowerIdx`] values, so a
/// `TowerSet` is the only thing that can resolve them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TowerSet {
    towers: Vec<Tower>,
}

impl TowerSet {
    pub fn new(towers: Vec<Tower>) -> Self {
        Self { towers }
    }

    pub fn len(&self) -> usize {
        self.towers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.towers.is_empty()
    }

    pub fn get(&self, idx: TowerIdx) -> Option<&Tower> {
        self.towers.get(idx.0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tower> {
        self.towers.iter()
    }

    pub fn indices(&self) -> impl Iterator<Item = TowerIdx> {
        (0..self.towers.len()).map(TowerIdx)
    }

    /// Returns the index of the tower named `id`.
    pub fn find(&self, id: &str) -> Option<TowerIdx> {
        self.towers.iter().position(|t| t.id == id).map(TowerIdx)
    }

    /// Number of towers with a frequency.
    pub fn assigned(&self) -> usize {
        self.towers.iter().filter(|t| t.frequency.is_some()).count()
    }

    /// Towers the assigner could not give a frequency to.
    pub fn unassigned(&self) -> impl Iterator<Item = &Tower> {
        self.towers.iter().filter(|t| t.frequency.is_none())
    }

    /// Records the distance between `a` and `b` on both towers.
    ///
    /// Pairs closer than `threshold_m` become nearby, the rest out of
    /// range. Does nothing if the pair is already related, or if `a`
    /// and `b` are the same tower.
    pub fn connect(&mut self, a: TowerIdx, b: TowerIdx, distance_m: C, threshold_m: C) {
        if a == b || self[a].is_linked(b) {
            return;
        }
        self.link(a, b, distance_m, threshold_m);
    }

    /// Drops every nearby and out-of-range relation.
    pub fn clear_links(&mut self) {
        for tower in &mut self.towers {
            tower.nearby.clear();
            tower.out_of_range.clear();
        }
    }

    /// Drops every relation and assigned frequency.
    pub fn reset(&mut self) {
        self.clear_links();
        for tower in &mut self.towers {
            tower.frequency = None;
        }
    }

    /// Frequencies held by `idx`'s assigned nearby towers.
    pub fn nearby_frequencies(&self, idx: TowerIdx) -> impl Iterator<Item = Frequency> + '_ {
        self[idx]
            .nearby
            .iter()
            .filter_map(|link| self[link.tower].frequency)
    }

    /// Returns `true` if assigning `freq` to `idx` would match one of
    /// its nearby towers.
    pub fn conflicts(&self, idx: TowerIdx, freq: Frequency) -> bool {
        self.nearby_frequencies(idx).any(|f| f == freq)
    }

    /// Per tower, whether it carried any relation.
    pub(crate) fn linked_mask(&self) -> Vec<bool> {
        self.towers.iter().map(Tower::has_links).collect()
    }

    /// [`TowerSet::connect`] without the duplicate check.
    pub(crate) fn link(&mut self, a: TowerIdx, b: TowerIdx, distance_m: C, threshold_m: C) {
        let nearby = distance_m < threshold_m;
        for (from, to) in [(a, b), (b, a)] {
            let link = Link {
                tower: to,
                distance_m,
            };
            let tower = &mut self[from];
            if nearby {
                tower.nearby.push(link);
            } else {
                tower.out_of_range.push(link);
            }
        }
    }
}

impl Index<TowerIdx> for TowerSet {
    type Output = Tower;

    fn index(&self, idx: TowerIdx) -> &Tower {
        &self.towers[idx.0]
    }
}

impl IndexMut<TowerIdx> for TowerSet {
    fn index_mut(&mut self, idx: TowerIdx) -> &mut Tower {
        &mut self.towers[idx.0]
    }
}

impl From<Vec<Tower>> for TowerSet {
    fn from(towers: Vec<Tower>) -> Self {
        Self::new(towers)
    }
}

impl<'a> IntoIterator for &'a TowerSet {
    type Item = &'a Tower;
    type IntoIter = std::slice::Iter<'a, Tower>;

    fn into_iter(self) -> Self::IntoIter {
        self.towers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Tower, TowerIdx, TowerSet};

    fn set(n: usize) -> TowerSet {
        (0..n)
            .map(|i| Tower::new(format!("T{i}"), 0.0, 0.0, 0.0, 0.0))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_connect_is_symmetric() {
        let mut towers = set(3);
        towers.connect(TowerIdx(0), TowerIdx(1), 100.0, 500.0);
        towers.connect(TowerIdx(0), TowerIdx(2), 900.0, 500.0);

        assert_eq!(towers[TowerIdx(0)].nearby()[0].tower, TowerIdx(1));
        assert_eq!(towers[TowerIdx(1)].nearby()[0].tower, TowerIdx(0));
        assert_eq!(towers[TowerIdx(0)].out_of_range()[0].tower, TowerIdx(2));
        assert_eq!(towers[TowerIdx(2)].out_of_range()[0].tower, TowerIdx(0));
        assert_eq!(towers[TowerIdx(2)].out_of_range()[0].distance_m, 900.0);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut towers = set(2);
        towers.connect(TowerIdx(0), TowerIdx(1), 500.0, 500.0);
        assert!(towers[TowerIdx(0)].nearby().is_empty());
        assert_eq!(towers[TowerIdx(0)].out_of_range().len(), 1);
    }

    #[test]
    fn test_connect_ignores_repeats_and_self() {
        let mut towers = set(2);
        towers.connect(TowerIdx(0), TowerIdx(1), 100.0, 500.0);
        towers.connect(TowerIdx(1), TowerIdx(0), 100.0, 500.0);
        towers.connect(TowerIdx(0), TowerIdx(0), 0.0, 500.0);
        assert_eq!(towers[TowerIdx(0)].nearby().len(), 1);
        assert_eq!(towers[TowerIdx(1)].nearby().len(), 1);
        assert!(!towers[TowerIdx(0)].is_linked(TowerIdx(0)));
    }

    #[test]
    fn test_farthest_prefers_first_of_ties() {
        let mut towers = set(4);
        towers.connect(TowerIdx(0), TowerIdx(1), 700.0, 500.0);
        towers.connect(TowerIdx(0), TowerIdx(2), 900.0, 500.0);
        towers.connect(TowerIdx(0), TowerIdx(3), 900.0, 500.0);
        let farthest = towers[TowerIdx(0)].farthest().unwrap();
        assert_eq!(farthest.tower, TowerIdx(2));
        assert!(towers[TowerIdx(1)].farthest().is_some());

        let lonely = set(1);
        assert_eq!(lonely[TowerIdx(0)].farthest(), None);
    }

    #[test]
    fn test_conflicts() {
        let mut towers = set(3);
        towers.connect(TowerIdx(0), TowerIdx(1), 100.0, 500.0);
        towers.connect(TowerIdx(0), TowerIdx(2), 900.0, 500.0);
        towers[TowerIdx(1)].frequency = Some(110);
        towers[TowerIdx(2)].frequency = Some(111);
        assert!(towers.conflicts(TowerIdx(0), 110));
        assert!(!towers.conflicts(TowerIdx(0), 111));
        assert_eq!(towers.assigned(), 2);
        assert_eq!(towers.unassigned().count(), 1);
    }

    #[test]
    fn test_clear_links() {
        let mut towers = set(2);
        towers.connect(TowerIdx(0), TowerIdx(1), 100.0, 500.0);
        towers.clear_links();
        assert!(towers.iter().all(|t| !t.is_linked(TowerIdx(0)) && !t.is_linked(TowerIdx(1))));
        assert_eq!(towers.find("T1"), Some(TowerIdx(1)));
    }
}
