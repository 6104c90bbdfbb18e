//! Property tests over random games.
//!
//! Each case plays a random legal game from a handful of starting positions
//! and checks the invariants that must hold after every move.

use flywheel_engine::{
    generate_moves, generate_moves_rated, move_to_san, parse_notation, GameResult, Position,
};
use proptest::prelude::*;

const STARTS: [&str; 4] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
];

/// Plays up to `choices.len()` moves, picking each by index modulo the
/// number of legal moves. Stops early when the game is over.
fn random_game(start: &str, choices: &[usize], mut check: impl FnMut(&mut Position)) -> Position {
    let mut position = Position::from_fen(start).unwrap();
    for &choice in choices {
        let moves = generate_moves(&mut position);
        if moves.is_empty() {
            break;
        }
        position.push_move(moves[choice % moves.len()]).unwrap();
        check(&mut position);
    }
    position
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn incremental_hash_matches_recomputation(
        start in 0..STARTS.len(),
        choices in prop::collection::vec(any::<usize>(), 0..60),
    ) {
        random_game(STARTS[start], &choices, |position| {
            assert_eq!(position.hash(), position.compute_hash());
        });
    }

    #[test]
    fn fen_reload_preserves_position(
        start in 0..STARTS.len(),
        choices in prop::collection::vec(any::<usize>(), 0..60),
    ) {
        random_game(STARTS[start], &choices, |position| {
            let fen = position.to_fen();
            let reloaded = Position::from_fen(&fen).unwrap();
            assert_eq!(reloaded.to_fen(), fen);
            assert_eq!(reloaded.hash(), position.hash());
        });
    }

    #[test]
    fn popping_every_move_restores_start(
        start in 0..STARTS.len(),
        choices in prop::collection::vec(any::<usize>(), 0..60),
    ) {
        let initial = Position::from_fen(STARTS[start]).unwrap();
        let mut position = random_game(STARTS[start], &choices, |_| {});
        while position.ply_count() > 0 {
            position.pop_move().unwrap();
        }
        prop_assert_eq!(position, initial);
    }

    #[test]
    fn every_legal_move_has_a_unique_san(
        start in 0..STARTS.len(),
        choices in prop::collection::vec(any::<usize>(), 0..30),
    ) {
        let mut position = random_game(STARTS[start], &choices, |_| {});
        for m in generate_moves(&mut position) {
            let san = move_to_san(&mut position, m).unwrap();
            prop_assert_eq!(parse_notation(&mut position, &san).unwrap(), m);
        }
    }

    #[test]
    fn rated_generation_is_a_sorted_permutation(
        start in 0..STARTS.len(),
        choices in prop::collection::vec(any::<usize>(), 0..30),
    ) {
        let mut position = random_game(STARTS[start], &choices, |_| {});
        let before = position.clone();
        let plain = generate_moves(&mut position);
        let rated = generate_moves_rated(&mut position, |pos, _| pos.legal_moves().len() as i32);
        prop_assert_eq!(&position, &before);
        prop_assert_eq!(plain.len(), rated.len());
        prop_assert!(plain.as_slice().iter().all(|m| rated.contains(m)));
        prop_assert!(rated.as_slice().windows(2).all(|w| w[0].score() >= w[1].score()));
    }

    #[test]
    fn game_over_iff_no_moves_or_draw(
        start in 0..STARTS.len(),
        choices in prop::collection::vec(any::<usize>(), 0..80),
    ) {
        let mut position = random_game(STARTS[start], &choices, |_| {});
        let can_move = !generate_moves(&mut position).is_empty();
        match position.game_result() {
            GameResult::InProgress => prop_assert!(can_move),
            GameResult::WhiteWins | GameResult::BlackWins => {
                prop_assert!(!can_move);
                prop_assert!(position.is_in_check());
            }
            GameResult::Draw(_) => {}
        }
    }
}

#[test]
fn pgn_history_replays_to_same_position() {
    let mut position = Position::startpos();
    position
        .push_history("e4 c5 Nf3 d6 d4 cxd4 Nxd4 Nf6 Nc3 a6 Be3 e5 Nb3 Be6 f3 Be7 Qd2 O-O O-O-O")
        .unwrap();
    let pgn = position.pgn_history().unwrap();
    assert_eq!(
        pgn,
        "e4 c5 Nf3 d6 d4 cxd4 Nxd4 Nf6 Nc3 a6 Be3 e5 Nb3 Be6 f3 Be7 Qd2 O-O O-O-O"
    );

    let mut replay = Position::startpos();
    replay.push_history(&position.alg_history()).unwrap();
    assert_eq!(replay, position);
}
