use crate::engine::Color;
use crate::solver::Move;
use std::cmp::Reverse;
use std::fmt;

/// Strategy for picking one move out of the evaluated candidates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Most tiles cleared over the whole cascade.
    MaxTotal,
    /// Largest single per-color count.
    MaxLongestRun,
    /// Exhaust the colors in the given order: the first color some move clears wins,
    /// and within that color's moves the longest run is picked.
    ColorPriority(Vec<Color>),
}

impl SelectionPolicy {
    /// Picks a move, or `None` if `moves` is empty (or, for `ColorPriority`, no move
    /// clears any listed color).
    pub fn select<'a>(&self, moves: &'a [Move]) -> Option<&'a Move> {
        match self {
            SelectionPolicy::MaxTotal => choose_move_max_total(moves),
            SelectionPolicy::MaxLongestRun => choose_move_max_longest_run(moves),
            SelectionPolicy::ColorPriority(colors) => choose_move_color_priority(moves, colors),
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionPolicy::MaxTotal => write!(f, "max-total"),
            SelectionPolicy::MaxLongestRun => write!(f, "max-longest-run"),
            SelectionPolicy::ColorPriority(colors) => {
                let names: Vec<&str> = colors.iter().map(|c| c.name()).collect();
                write!(f, "color-priority[{}]", names.join(","))
            }
        }
    }
}

/// Returns the move with the greatest `key`; ties go to the one encountered first.
fn first_max_by_key<'a, I, F>(moves: I, key: F) -> Option<&'a Move>
where
    I: IntoIterator<Item = &'a Move>,
    F: Fn(&Move) -> usize,
{
    let mut best: Option<(&'a Move, usize)> = None;
    for mv in moves {
        let value = key(mv);
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((mv, value)),
        }
    }
    best.map(|(mv, _)| mv)
}

/// Chooses the move clearing the most tiles in total.
pub fn choose_move_max_total(moves: &[Move]) -> Option<&Move> {
    first_max_by_key(moves, Move::total_cleared)
}

/// Chooses the move with the largest single per-color count.
pub fn choose_move_max_longest_run(moves: &[Move]) -> Option<&Move> {
    first_max_by_key(moves, Move::longest_run)
}

/// Chooses by color priority.
///
/// The colors are scanned in order. The first one that at least one move clears
/// selects its group of moves, and the longest run within that group wins, even if
/// a lower-priority color offers a bigger match. A move can belong to several groups.
pub fn choose_move_color_priority<'a>(moves: &'a [Move], priority: &[Color]) -> Option<&'a Move> {
    priority.iter().find_map(|&color| {
        first_max_by_key(
            moves.iter().filter(|mv| mv.cleared(color) > 0),
            Move::longest_run,
        )
    })
}

/// Orders `moves` best-first under `policy`. The sort is stable, so equal moves keep
/// their generation order and the first element is what `policy.select` returns.
///
/// For `ColorPriority`, moves are grouped by the highest-priority color they clear,
/// then by longest run; moves clearing no listed color are left out, matching
/// `select` returning `None` when no move clears a listed color.
pub fn rank_moves<'a>(moves: &'a [Move], policy: &SelectionPolicy) -> Vec<&'a Move> {
    let mut ranked: Vec<&Move> = moves.iter().collect();
    match policy {
        SelectionPolicy::MaxTotal => ranked.sort_by_key(|mv| Reverse(mv.total_cleared())),
        SelectionPolicy::MaxLongestRun => ranked.sort_by_key(|mv| Reverse(mv.longest_run())),
        SelectionPolicy::ColorPriority(colors) => {
            let group = |mv: &Move| colors.iter().position(|&color| mv.cleared(color) > 0);
            ranked.retain(|mv| group(*mv).is_some());
            ranked.sort_by_key(|mv| (group(*mv), Reverse(mv.longest_run())));
        }
    }
    ranked
}
