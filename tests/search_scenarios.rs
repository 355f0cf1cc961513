use std::time::Duration;

use chessopponent::{
    evaluate, Depth, Game, MoveFilter, RulesAuthority, Score, SearchLimits, Searcher,
};

fn patient() -> Searcher {
    Searcher::with_move_time(Duration::from_secs(600))
}

fn best(fen: &str, depth: i32) -> String {
    let mut game = Game::from_fen(fen).expect("valid FEN");
    let mv = patient()
        .select_move(&mut game, Depth::new(depth))
        .expect("position has legal moves");
    mv.uci()
}

/// Plain minimax over the whole tree, valued for the side to move.
fn exhaustive(game: &mut Game, depth: i32) -> Score {
    fn white_frame(game: &mut Game, depth: i32) -> Score {
        if depth == 0 || game.is_game_over() {
            return evaluate(game);
        }
        let white = game.side_to_move() == chessopponent::types::Color::White;
        let mut values = Vec::new();
        for mv in game.legal_moves(MoveFilter::All) {
            game.apply(mv).unwrap();
            values.push(white_frame(game, depth - 1));
            game.undo();
        }
        if white {
            values.into_iter().max().unwrap()
        } else {
            values.into_iter().min().unwrap()
        }
    }

    let sign = chessopponent::types::color_sign(game.side_to_move());
    let mut best = Score::NEG_INFINITY;
    for mv in game.legal_moves(MoveFilter::All) {
        game.apply(mv).unwrap();
        best = best.max(white_frame(game, depth - 1).signed(sign));
        game.undo();
    }
    best
}

#[test]
fn mate_in_one_for_white() {
    let back_rank = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";
    let scholar = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
    // Rxe4 sorts ahead of the quiet mate
    let capture_first = "7k/5K1p/7P/8/p3n3/8/4R3/1R6 w - - 0 1";
    for depth in 1..=3 {
        assert_eq!(best(back_rank, depth), "a1a8", "depth {}", depth);
        assert_eq!(best(scholar, depth), "h5f7", "depth {}", depth);
        assert_eq!(best(capture_first, depth), "b1b8", "depth {}", depth);
    }
}

#[test]
fn mate_in_one_for_black() {
    let cases = [
        ("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1", "a8a1"),
        ("1r6/4r3/8/P3N3/8/7p/5k1P/7K b - - 0 1", "b8b1"),
    ];
    for (fen, mate) in cases {
        for depth in 1..=3 {
            let mut game = Game::from_fen(fen).unwrap();
            let result = patient().search(&mut game, &SearchLimits::depth(Depth::new(depth)));
            assert_eq!(result.best_move.unwrap().uci(), mate, "depth {}", depth);
            assert_eq!(result.score, Score::INFINITY);
        }
    }
}

#[test]
fn hanging_queen_is_taken() {
    let fen = "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1";
    for depth in 1..=2 {
        assert_eq!(best(fen, depth), "e4d5");
    }
}

#[test]
fn search_is_deterministic() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
    let mut game = Game::from_fen(fen).unwrap();
    let limits = SearchLimits::depth(Depth::new(2));
    let first = patient().search(&mut game, &limits);
    let second = patient().search(&mut game, &limits);
    assert_eq!(first.best_move, second.best_move);
    assert_eq!(first.score, second.score);
    assert!(!first.random_fallback);
}

#[test]
fn position_is_unchanged_after_search() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ];
    for fen in fens {
        let mut game = Game::from_fen(fen).unwrap();
        let before = game.clone();

        let mv = patient().select_move(&mut game, Depth::new(2)).unwrap();
        assert!(game.legal_moves(MoveFilter::All).contains(&mv));
        assert_eq!(game, before, "{}", fen);

        // Out of time before the first node
        let limits = SearchLimits::depth(Depth::new(3)).with_movetime(0);
        let result = patient().search(&mut game, &limits);
        assert!(result.random_fallback);
        assert_eq!(game, before, "{}", fen);
    }
}

#[test]
fn short_deadline_still_returns_a_legal_move() {
    let mut game = Game::new();
    let before = game.clone();
    let limits = SearchLimits::depth(Depth::new(6)).with_movetime(5);
    let result = patient().search(&mut game, &limits);
    let mv = result.best_move.unwrap();
    assert!(game.legal_moves(MoveFilter::All).contains(&mv));
    assert_eq!(game, before);
}

#[test]
fn pruned_root_value_matches_exhaustive() {
    let cases = [
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 3),
        ("4k3/8/8/8/4p3/3Q4/8/4K3 b - - 0 1", 3),
        ("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3", 2),
    ];
    for (fen, depth) in cases {
        let mut game = Game::from_fen(fen).unwrap();
        let expected = exhaustive(&mut game, depth);
        let result = patient().search(&mut game, &SearchLimits::depth(Depth::new(depth)));
        assert_eq!(result.score, expected, "{}", fen);
    }
}

#[test]
fn no_move_when_game_is_over() {
    let mate = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
    let stalemate = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1";
    for fen in [mate, stalemate] {
        let mut game = Game::from_fen(fen).unwrap();
        assert_eq!(patient().select_move(&mut game, Depth::new(2)), None);
    }
}
