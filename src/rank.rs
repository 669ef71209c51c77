// src/rank.rs
//
// Win-percentage ranking. Ties share the best (minimum) rank and the ranks
// after them skip: 75, 75, 50 → 1, 1, 3.
// Tie policy is a product decision; average or first-seen would slot in here.

use std::cmp::Ordering;

use crate::model::{ win_pct, TeamSeasonRecord };

/// Compare two (wins, losses) records by win fraction, exactly. Cross-
/// multiplying avoids float ties breaking on rounding noise. No games counts
/// as 0%.
fn cmp_win_fraction(a: (u32, u32), b: (u32, u32)) -> Ordering {
    let frac = |(w, l): (u32, u32)| {
        let gp = w as u64 + l as u64;
        if gp == 0 { (0u64, 1u64) } else { (w as u64, gp) }
    };
    let (aw, agp) = frac(a);
    let (bw, bgp) = frac(b);
    (aw * bgp).cmp(&(bw * agp))
}

/// Competition ranks for a list of (wins, losses), rank 1 = best.
pub fn min_ranks(records: &[(u32, u32)]) -> Vec<u32> {
    records
        .iter()
        .map(|&r| {
            let better = records
                .iter()
                .filter(|&&o| cmp_win_fraction(o, r) == Ordering::Greater)
                .count();
            better as u32 + 1
        })
        .collect()
}

/// Fill `win_pct` and `win_pct_rank` on every record.
pub fn assign(records: &mut [TeamSeasonRecord]) {
    let wl: Vec<(u32, u32)> = records.iter().map(|r| (r.wins, r.losses)).collect();
    let ranks = min_ranks(&wl);
    for (rec, rank) in records.iter_mut().zip(ranks) {
        rec.win_pct = win_pct(rec.wins, rec.losses);
        rec.win_pct_rank = rank;
    }
}
