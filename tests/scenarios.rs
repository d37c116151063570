use std::thread;

use chessgame::{
    movegen, remote::RemoteMove, CastlingSide, Color, Event, Game, Move, MoveFlags, Outcome,
    PieceId, PlayError, Position, Role, Setup, SharedGame, Square, Status,
};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn sq(name: &str) -> Square {
    name.parse().expect("valid square")
}

fn position(fen: &str) -> Position {
    fen.parse::<Setup>()
        .expect("valid fen")
        .position()
        .expect("legal position")
}

fn game(fen: &str) -> Game {
    init_logging();
    Game::from_position(position(fen))
}

fn id_at(game: &Game, name: &str) -> PieceId {
    game.position()
        .piece_at(sq(name))
        .unwrap_or_else(|| panic!("no piece on {name}"))
        .id()
}

fn play(game: &mut Game, from: &str, m: Move) -> Event {
    let id = id_at(game, from);
    game.play_piece(id, m)
        .unwrap_or_else(|err| panic!("{from} {m}: {err}"))
}

fn has_move(game: &Game, from: &str, m: Move) -> bool {
    game.legal_moves(id_at(game, from)).contains(&m)
}

fn king_side() -> Move {
    Move::castle(CastlingSide::KingSide, sq("g1"))
}

fn queen_side() -> Move {
    Move::castle(CastlingSide::QueenSide, sq("c1"))
}

#[test]
fn test_initial_position() {
    init_logging();
    let game = Game::new();

    assert_eq!(game.status(), Status::ToMove(Color::White));
    assert_eq!(game.pieces().len(), 32);
    assert_eq!(game.board().count(), 32);
    for color in Color::ALL {
        assert_eq!(
            game.pieces()
                .by_color(color)
                .filter(|p| p.role() == Role::Pawn)
                .count(),
            8
        );
        assert_eq!(game.pieces().by_color(color).count(), 16);
    }
    assert!(game.captured().is_empty());
    assert!(game.pieces().iter().all(|p| !p.has_moved()));

    assert_eq!(id_at(&game, "a2").get(), 1);
    assert_eq!(id_at(&game, "a1").get(), 9);
    assert_eq!(id_at(&game, "e1").get(), 13);
    assert_eq!(id_at(&game, "a7").get(), 17);
    assert_eq!(id_at(&game, "h8").get(), 25);
    assert_eq!(id_at(&game, "a8").get(), 32);
}

#[test]
fn test_sliding_moves_pass_only_empty_squares() {
    let fens = [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b KQkq -",
        "rn1qkb1r/pbp2ppp/1p2p3/3n4/8/2N2NP1/PP1PPPBP/R1BQ1RK1 b kq -",
    ];

    for fen in fens {
        let pos = position(fen);

        for piece in pos.pieces().iter().filter(|p| p.role().is_slider()) {
            for m in movegen::pseudo_legal_moves(&pos, piece) {
                let from = piece.square();
                let rows = (m.to.row() as i8 - from.row() as i8).signum();
                let columns = (m.to.column() as i8 - from.column() as i8).signum();

                let mut cursor = from.offset(rows, columns).expect("on board");
                while cursor != m.to {
                    assert!(pos.piece_at(cursor).is_none(), "{fen}: {from} {m} jumps {cursor}");
                    cursor = cursor.offset(rows, columns).expect("on board");
                }

                if let Some(target) = pos.piece_at(m.to) {
                    assert_ne!(target.color(), piece.color(), "{fen}: {from} {m} takes ally");
                }
            }
        }
    }
}

#[test]
fn test_self_check_filter_is_idempotent() {
    let mut pos = position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -");
    let before = pos.clone();
    let ids: Vec<PieceId> = pos.pieces().iter().map(|p| p.id()).collect();

    for id in ids {
        for m in pos.pseudo_legal_moves(id) {
            let first = pos.is_self_check_after(id, m);
            let second = pos.is_self_check_after(id, m);
            assert_eq!(first, second);
            assert_eq!(pos, before);
        }
    }
}

#[test]
fn test_en_passant_window() {
    init_logging();
    let mut game = Game::new();
    play(&mut game, "e2", Move::double_pawn_push(sq("e4")));
    play(&mut game, "a7", Move::normal(sq("a6")));
    play(&mut game, "e4", Move::normal(sq("e5")));
    play(&mut game, "d7", Move::double_pawn_push(sq("d5")));

    let ep = Move::en_passant(sq("d6"));
    assert!(has_move(&game, "e5", ep));

    let mut taken = game.clone();
    let victim = id_at(&taken, "d5");
    assert_eq!(play(&mut taken, "e5", ep), Event::EnPassant);
    assert!(taken.position().piece_at(sq("d5")).is_none());
    assert_eq!(taken.captured().last().map(|p| p.id()), Some(victim));
    assert_eq!(taken.select(victim), Err(PlayError::UnknownPiece));

    play(&mut game, "g1", Move::normal(sq("f3")));
    play(&mut game, "a6", Move::normal(sq("a5")));
    assert!(!has_move(&game, "e5", ep));
    assert_eq!(game.position().ep_target(), None);
}

#[test]
fn test_castling_when_eligible() {
    let mut game = game("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -");
    assert!(has_move(&game, "e1", king_side()));
    assert!(has_move(&game, "e1", queen_side()));

    let rook = id_at(&game, "a1");
    assert_eq!(play(&mut game, "e1", queen_side()), Event::Castle);
    assert_eq!(game.position().board_fen(), "r3k2r/8/8/8/8/8/8/2KR3R");
    let rook = game.position().piece(rook).expect("rook on board");
    assert_eq!(rook.square(), sq("d1"));
    assert!(rook.has_moved());

    let black_castle = Move::castle(CastlingSide::KingSide, sq("g8"));
    assert!(has_move(&game, "e8", black_castle));
    assert_eq!(play(&mut game, "e8", black_castle), Event::Castle);
    assert_eq!(game.position().board_fen(), "r4rk1/8/8/8/8/8/8/2KR3R");
}

#[test]
fn test_no_castling_after_king_moved() {
    let mut game = game("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -");
    play(&mut game, "e1", Move::normal(sq("f1")));
    play(&mut game, "e8", Move::normal(sq("f8")));
    play(&mut game, "f1", Move::normal(sq("e1")));
    play(&mut game, "f8", Move::normal(sq("e8")));

    assert!(!has_move(&game, "e1", king_side()));
    assert!(!has_move(&game, "e1", queen_side()));
}

#[test]
fn test_no_castling_with_rook_moved_or_absent() {
    let g = game("r3k2r/8/8/8/8/8/8/R3K2R w Qkq -");
    assert!(!has_move(&g, "e1", king_side()));
    assert!(has_move(&g, "e1", queen_side()));

    let g = game("r3k2r/8/8/8/8/8/8/R3K3 w Qkq -");
    assert!(!has_move(&g, "e1", king_side()));

    let mut setup = Setup::default();
    setup.remove(sq("f1"));
    setup.remove(sq("g1"));
    setup.set_moved(sq("h1"), true);
    let g = Game::from_setup(&setup).expect("legal position");
    assert!(!has_move(&g, "e1", king_side()));
    assert_eq!(g.legal_moves(id_at(&g, "e1")), [Move::normal(sq("f1"))]);
}

#[test]
fn test_no_castling_through_pieces() {
    let game = game("r3k2r/8/8/8/8/8/8/R3KB1R w KQkq -");
    assert!(!has_move(&game, "e1", king_side()));
    assert!(has_move(&game, "e1", queen_side()));

    let game = self::game("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq -");
    assert!(has_move(&game, "e1", king_side()));
    assert!(!has_move(&game, "e1", queen_side()));
}

#[test]
fn test_no_castling_through_attacked_squares() {
    // f1 attacked
    let g = game("r3kr2/8/8/8/8/8/8/R3K2R w KQq -");
    assert!(!has_move(&g, "e1", king_side()));
    assert!(has_move(&g, "e1", queen_side()));

    // g1 attacked
    let g = game("4k1r1/8/8/8/8/8/8/R3K2R w KQ -");
    assert!(!has_move(&g, "e1", king_side()));
    assert!(has_move(&g, "e1", queen_side()));

    // king in check
    let g = game("4r1k1/8/8/8/8/8/8/R3K2R w KQ -");
    assert!(g.is_check());
    assert!(!has_move(&g, "e1", king_side()));
    assert!(!has_move(&g, "e1", queen_side()));

    // the rook may pass an attacked square
    let g = game("1r2k3/8/8/8/8/8/8/R3K2R w KQ -");
    assert!(has_move(&g, "e1", king_side()));
    assert!(has_move(&g, "e1", queen_side()));
}

#[test]
fn test_no_castling_away_from_home_square() {
    let mut setup = Setup::empty();
    setup
        .put(sq("g1"), Color::White, Role::King)
        .put(sq("h1"), Color::White, Role::Rook)
        .put(sq("e8"), Color::Black, Role::King);
    let g = Game::from_setup(&setup).expect("legal position");
    let king = id_at(&g, "g1");
    assert!(!g.legal_moves(king).iter().any(|m| m.is_castle()));
    assert_eq!(g.legal_moves(king).len(), 4);

    let mut setup = Setup::empty();
    setup
        .put(sq("b1"), Color::White, Role::King)
        .put(sq("a1"), Color::White, Role::Rook)
        .put(sq("e8"), Color::Black, Role::King);
    let g = Game::from_setup(&setup).expect("legal position");
    let king = id_at(&g, "b1");
    assert!(!g.legal_moves(king).iter().any(|m| m.is_castle()));
    assert!(!movegen::is_castle_eligible(
        g.position(),
        g.position().piece(king).expect("king"),
        CastlingSide::QueenSide
    ));
}

#[test]
fn test_fools_mate() {
    init_logging();
    let mut game = Game::new();
    assert_eq!(play(&mut game, "f2", Move::normal(sq("f3"))), Event::Move);
    assert_eq!(play(&mut game, "e7", Move::double_pawn_push(sq("e5"))), Event::Move);
    assert_eq!(play(&mut game, "g2", Move::double_pawn_push(sq("g4"))), Event::Move);
    assert_eq!(play(&mut game, "d8", Move::normal(sq("h4"))), Event::Check);

    assert_eq!(game.outcome(), Some(Outcome::Checkmate { winner: Color::Black }));
    assert!(game.is_check());
    assert_eq!(game.legal_move_count(), 0);

    let pawn = id_at(&game, "a2");
    assert_eq!(game.select(pawn), Err(PlayError::GameOver));
    assert_eq!(
        game.play_piece(pawn, Move::normal(sq("a3"))),
        Err(PlayError::GameOver)
    );
    assert_eq!(game.play(Move::normal(sq("a3"))), Err(PlayError::GameOver));
    assert_eq!(game.resign(Color::White), Err(PlayError::GameOver));
}

#[test]
fn test_stalemate_is_not_checkmate() {
    let mut game = game("7k/8/6K1/8/8/8/8/5Q2 w - -");
    assert_eq!(play(&mut game, "f1", Move::normal(sq("f7"))), Event::Move);

    assert_eq!(game.outcome(), Some(Outcome::Stalemate));
    assert!(!game.is_check());
    assert_eq!(game.outcome().map(Outcome::winner), Some(None));
}

#[test]
fn test_promotion_keeps_identity() {
    let mut game = game("8/4P3/8/8/8/8/k7/4K3 w - -");
    let pawn = id_at(&game, "e7");

    assert_eq!(play(&mut game, "e7", Move::normal(sq("e8"))), Event::Promotion);
    let queen = game.position().piece(pawn).expect("promoted piece");
    assert_eq!(queen.role(), Role::Queen);
    assert_eq!(queen.color(), Color::White);
    assert_eq!(queen.square(), sq("e8"));
    assert!(game.captured().is_empty());
}

#[test]
fn test_promotion_with_capture_and_check() {
    let mut game = self::game("3r4/4P3/8/8/8/8/k7/4K3 w - -");
    assert_eq!(play(&mut game, "e7", Move::normal(sq("d8"))), Event::Promotion);
    assert_eq!(game.captured().len(), 1);
    assert_eq!(game.captured()[0].role(), Role::Rook);

    let mut game = self::game("k7/4P3/8/8/8/8/8/4K3 w - -");
    assert_eq!(play(&mut game, "e7", Move::normal(sq("e8"))), Event::Check);
    assert_eq!(
        game.position().piece_at(sq("e8")).map(|p| p.role()),
        Some(Role::Queen)
    );

    let mut game = self::game("4k3/8/8/8/8/7K/3p4/8 b - -");
    assert_eq!(play(&mut game, "d2", Move::normal(sq("d1"))), Event::Promotion);
    assert_eq!(
        game.position().piece_at(sq("d1")).map(|p| (p.color(), p.role())),
        Some((Color::Black, Role::Queen))
    );
}

#[test]
fn test_declined_requests() {
    init_logging();
    let mut game = Game::new();
    let fen = game.position().board_fen();

    assert_eq!(game.play(Move::normal(sq("e3"))), Err(PlayError::NoSelection));
    assert_eq!(game.select(id_at(&game, "e7")), Err(PlayError::NotPlayersTurn));
    assert_eq!(
        game.play_piece(id_at(&game, "e7"), Move::normal(sq("e6"))),
        Err(PlayError::NotPlayersTurn)
    );

    let pawn = id_at(&game, "e2");
    game.select(pawn).expect("white to move");
    assert_eq!(game.play(Move::normal(sq("e5"))), Err(PlayError::IllegalMove));
    assert_eq!(game.play(Move::normal(sq("d3"))), Err(PlayError::IllegalMove));
    assert_eq!(game.selected(), Some(pawn));

    let missing = PieceId::new(33).expect("non-zero");
    assert_eq!(game.select(missing), Err(PlayError::UnknownPiece));

    assert_eq!(game.position().board_fen(), fen);
    assert_eq!(game.turn(), Color::White);
    assert_eq!(game.plies(), 0);
}

#[test]
fn test_pinned_piece_has_no_moves() {
    let game = game("4r1k1/8/8/8/8/8/4N3/4K3 w - -");
    assert!(game.legal_moves(id_at(&game, "e2")).is_empty());
    assert_eq!(game.status(), Status::ToMove(Color::White));
}

#[test]
fn test_resign() {
    let mut game = Game::new();
    play(&mut game, "e2", Move::double_pawn_push(sq("e4")));
    assert_eq!(
        game.resign(Color::Black),
        Ok(Outcome::Resignation { winner: Color::White })
    );
    assert_eq!(
        game.status(),
        Status::Over(Outcome::Resignation { winner: Color::White })
    );
    assert_eq!(game.select(id_at(&game, "e7")), Err(PlayError::GameOver));
}

#[test]
fn test_remote_moves() {
    let mut game = Game::new();
    let pawn = id_at(&game, "e2");

    let remote = RemoteMove::from_hint(1, pawn, Move::double_pawn_push(sq("e4")), "alice");
    assert_eq!(remote.piece_id, 5);
    assert_eq!(game.play_remote(&remote), Ok(Event::Move));
    assert_eq!(game.turn(), Color::Black);

    let mut remote = RemoteMove::from_hint(1, id_at(&game, "e7"), Move::normal(sq("e5")), "bob");
    remote.flags = MoveFlags::DOUBLE_PAWN_PUSH | MoveFlags::EN_PASSANT;
    assert_eq!(game.play_remote(&remote), Err(PlayError::IllegalMove));

    remote.flags = MoveFlags::DOUBLE_PAWN_PUSH;
    remote.piece_id = 0;
    assert_eq!(game.play_remote(&remote), Err(PlayError::UnknownPiece));

    remote.piece_id = id_at(&game, "e7").get();
    remote.row = 0;
    assert_eq!(game.play_remote(&remote), Err(PlayError::IllegalMove));

    remote.row = 5;
    assert_eq!(game.play_remote(&remote), Ok(Event::Move));
}

#[cfg(feature = "serde")]
#[test]
fn test_remote_move_json() {
    let pawn = PieceId::new(5).expect("non-zero");
    let remote = RemoteMove::from_hint(42, pawn, Move::double_pawn_push(sq("e4")), "alice");

    let json = serde_json::to_string(&remote).expect("serialize");
    assert!(json.contains("\"gameId\":42"));
    assert!(json.contains("\"moverId\":\"alice\""));

    let back: RemoteMove = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, remote);
}

#[cfg(feature = "serde")]
#[test]
fn test_off_board_squares_are_not_deserialized() {
    assert_eq!(
        serde_json::from_str::<Square>(r#"{"row":4,"column":5}"#).expect("on board"),
        sq("e4")
    );
    assert!(serde_json::from_str::<Square>(r#"{"row":0,"column":9}"#).is_err());
    assert!(serde_json::from_str::<Square>(r#"{"row":9,"column":1}"#).is_err());

    let json = serde_json::to_string(&Move::normal(sq("e4"))).expect("serialize");
    let off_board = json.replace(r#""column":5"#, r#""column":0"#);
    assert_ne!(json, off_board);
    assert!(serde_json::from_str::<Move>(&off_board).is_err());
}

#[test]
fn test_shared_game_across_threads() {
    init_logging();
    let game = SharedGame::default();
    let (white, black) = game.with(|g| (id_at(g, "e2"), id_at(g, "e7")));

    let moves = [
        (white, Move::double_pawn_push(sq("e4"))),
        (black, Move::double_pawn_push(sq("e5"))),
    ];

    for (id, m) in moves {
        let game = game.clone();
        thread::spawn(move || game.play_piece(id, m))
            .join()
            .expect("thread finished")
            .expect("legal move");
    }

    let snapshot = game.snapshot();
    assert_eq!(snapshot.plies(), 2);
    assert_eq!(
        snapshot.position().board_fen(),
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR"
    );
}
