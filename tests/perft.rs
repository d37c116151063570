use std::{
    fs::File,
    io::{prelude::*, BufReader},
};

use chessgame::{perft, Position, Setup};

fn test_perft_file(path: &str, node_limit: u64) {
    let file = File::open(path).expect("failed to open test suite");
    let reader = BufReader::new(file);

    let mut pos = Position::default();

    for line in reader.lines().map(|l| l.expect("readable line")) {
        println!("{}", line);

        let trimmed = line.trim();
        let mut slices = trimmed.splitn(2, ' ');

        match slices.next() {
            Some("epd") => {
                pos = slices
                    .next()
                    .expect("missing epd")
                    .parse::<Setup>()
                    .expect("invalid fen")
                    .position()
                    .expect("illegal fen");
            }
            Some("perft") => {
                let mut params = slices.next().expect("missing perft params").splitn(2, ' ');

                let depth = params
                    .next()
                    .expect("missing perft depth")
                    .parse()
                    .expect("depth not an integer");

                let nodes = params
                    .next()
                    .expect("missing perft nodes")
                    .parse()
                    .expect("nodes not an integer");

                if nodes <= node_limit {
                    assert_eq!(perft(&pos, depth), nodes);
                }
            }
            _ => {}
        }
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_standard() {
    test_perft_file("tests/standard.perft", 100_000);
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_startpos_depth_4() {
    assert_eq!(perft(&Position::default(), 4), 197_281);
}
