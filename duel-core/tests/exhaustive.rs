//! Whole-tree checks: encoding round trips over every reachable position,
//! and move-sequence counts from the starting positions.

use std::collections::HashSet;

use duel_core::{count_paths, Color, Game, Reversi, TicTacToe, Verifier};

/// Distinct positions within `depth` plies, found breadth-first by key.
fn reachable<G: Game>(root: G, depth: usize) -> usize {
    let mut seen: HashSet<G> = HashSet::from([root]);
    let mut frontier = vec![root];

    for _ in 0..depth {
        let mut next_frontier = Vec::new();
        for state in frontier {
            let mut children: Vec<G> = state.successors().map(|(_, s)| s).collect();
            if children.is_empty() {
                children.extend(state.forced_pass());
            }
            for child in children {
                if seen.insert(child) {
                    next_frontier.push(child);
                }
            }
        }
        frontier = next_frontier;
    }
    seen.len()
}

#[test]
fn test_tictactoe_exhaustive_round_trip() {
    let report = Verifier::exhaustive().verify(TicTacToe::new()).unwrap();

    println!("tic-tac-toe: {report:?}");
    assert_eq!(report.states, 5478);
    assert_eq!(report.terminal, 958);
    assert_eq!(report.max_depth, 9);
}

#[test]
fn test_tictactoe_path_count() {
    assert_eq!(count_paths(&TicTacToe::new(), 1), 9);
    assert_eq!(count_paths(&TicTacToe::new(), 2), 72);
    assert_eq!(count_paths(&TicTacToe::new(), 9), 255_168);
}

#[test]
fn test_tictactoe_depth_bound_matches_breadth_first() {
    for depth in 0..=9 {
        let report = Verifier::to_depth(depth).verify(TicTacToe::new()).unwrap();
        assert_eq!(report.states, reachable(TicTacToe::new(), depth), "depth {depth}");
    }
}

#[test]
fn test_reversi_path_count() {
    let start = Reversi::new();
    assert_eq!(count_paths(&start, 0), 1);
    assert_eq!(count_paths(&start, 1), 4);
    assert_eq!(count_paths(&start, 2), 12);
}

#[test]
fn test_reversi_bounded_round_trip() {
    let depth = 6;
    let report = Verifier::to_depth(depth).verify(Reversi::new()).unwrap();

    println!("reversi to depth {depth}: {report:?}");
    assert_eq!(report.max_depth, depth);
    assert_eq!(report.states, reachable(Reversi::new(), depth));
}

#[test]
fn test_reversi_round_trip_from_seam_position() {
    let seam = Reversi::from_string("OXXXXX-XXXXX--XO----OX--------------", Color::O).unwrap();
    let report = Verifier::to_depth(4).verify(seam).unwrap();

    assert!(report.states > 1);
    assert_eq!(report.states, reachable(seam, 4));
}
