use crate::{math::haversine_m, tower::TowerIdx, TowerSet, C};
use geo::Point;
use log::debug;
use rayon::prelude::*;

/// Rows of distances held in memory at once.
const ROW_CHUNK: usize = 256;

/// Classifies every pair of towers as nearby (closer than
/// `threshold_m`) or out of range, recording the result on both
/// towers.
///
/// Distances are computed in parallel, one row per tower, a bounded
/// chunk of rows at a time; each chunk is written on this thread in
/// pair order, so each tower's lists end up in ascending index order.
///
/// Calling this again on the same set does not duplicate relations,
/// and pairs that already exist keep their original classification.
/// Use [`TowerSet::clear_links`] first to apply a new threshold.
pub fn build_proximity(towers: &mut TowerSet, threshold_m: C) {
    build_chunked(towers, threshold_m, ROW_CHUNK);
}

fn build_chunked(towers: &mut TowerSet, threshold_m: C, row_chunk: usize) {
    let now = std::time::Instant::now();
    let positions: Vec<Point<C>> = towers.iter().map(|t| t.position).collect();
    let n = positions.len();
    let linked = towers.linked_mask();
    let row_chunk = row_chunk.max(1);

    let mut distance_runtime = std::time::Duration::ZERO;
    let mut pairs = 0usize;
    for start in (0..n).step_by(row_chunk) {
        let end = (start + row_chunk).min(n);
        let chunk_now = std::time::Instant::now();
        let rows: Vec<Vec<C>> = (start..end)
            .into_par_iter()
            .map(|i| {
                positions[i + 1..]
                    .iter()
                    .map(|other| haversine_m(positions[i], *other))
                    .collect()
            })
            .collect();
        distance_runtime += chunk_now.elapsed();

        for (i, row) in (start..end).zip(rows) {
            for (offset, distance_m) in row.into_iter().enumerate() {
                let j = i + 1 + offset;
                let (a, b) = (TowerIdx(i), TowerIdx(j));
                if linked[i] || linked[j] {
                    towers.connect(a, b, distance_m, threshold_m);
                } else {
                    towers.link(a, b, distance_m, threshold_m);
                }
                pairs += 1;
            }
        }
    }

    debug!(
        "proximity; towers: {}, pairs: {}, threshold_m: {}, distance_exec: {:?}, total_exec: {:?}",
        n,
        pairs,
        threshold_m,
        distance_runtime,
        now.elapsed()
    );
}
