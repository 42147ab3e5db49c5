//! Winner determination (§4.5).

use crate::lane::Lane;
use crate::player::{Player, PlayerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LaneOutcome {
    FirstWins,
    SecondWins,
    Tie,
}

pub(crate) fn compare_lane(a: &Lane, b: &Lane) -> LaneOutcome {
    match (a.busted, b.busted) {
        (true, true) => LaneOutcome::Tie,
        (true, false) => LaneOutcome::SecondWins,
        (false, true) => LaneOutcome::FirstWins,
        (false, false) => {
            if a.total > b.total {
                LaneOutcome::FirstWins
            } else if b.total > a.total {
                LaneOutcome::SecondWins
            } else {
                LaneOutcome::Tie
            }
        }
    }
}

/// Determine the match winner by comparing the three lane pairs
/// position-by-position. First to two lane wins takes the match; a 1-1
/// split with a tie goes to the higher winning total (equal -> draw); all
/// other configurations draw.
pub fn determine_winner(p1: &Player, p2: &Player) -> Option<PlayerId> {
    let mut p1_wins = 0usize;
    let mut p2_wins = 0usize;
    let mut winning_totals: Vec<(LaneOutcome, u32)> = Vec::new();

    for i in 0..p1.lanes.len() {
        let outcome = compare_lane(&p1.lanes[i], &p2.lanes[i]);
        match outcome {
            LaneOutcome::FirstWins => {
                p1_wins += 1;
                winning_totals.push((outcome, p1.lanes[i].total));
            }
            LaneOutcome::SecondWins => {
                p2_wins += 1;
                winning_totals.push((outcome, p2.lanes[i].total));
            }
            LaneOutcome::Tie => {}
        }
    }

    if p1_wins >= 2 {
        return Some(p1.id.clone());
    }
    if p2_wins >= 2 {
        return Some(p2.id.clone());
    }

    if p1_wins == 1 && p2_wins == 1 {
        let p1_total = winning_totals
            .iter()
            .find(|(o, _)| *o == LaneOutcome::FirstWins)
            .map(|(_, t)| *t)
            .unwrap();
        let p2_total = winning_totals
            .iter()
            .find(|(o, _)| *o == LaneOutcome::SecondWins)
            .map(|(_, t)| *t)
            .unwrap();
        return match p1_total.cmp(&p2_total) {
            std::cmp::Ordering::Greater => Some(p1.id.clone()),
            std::cmp::Ordering::Less => Some(p2.id.clone()),
            std::cmp::Ordering::Equal => None,
        };
    }

    None
}

/// The three per-lane outcomes in lane-index order, reused by diagnostics'
/// draw classification (§4.9) so it never re-derives comparison logic.
pub(crate) fn lane_outcomes(p1: &Player, p2: &Player) -> [LaneOutcome; 3] {
    std::array::from_fn(|i| compare_lane(&p1.lanes[i], &p2.lanes[i]))
}
