use proptest::prelude::*;
use salvo::{
    coord_key, from_human, in_bounds, parse_placement, to_human, Coord, ErrorCode, Orientation,
    BOARD_SIZE,
};

#[test]
fn test_in_bounds_edges() {
    assert!(in_bounds(Coord::new(0, 0)));
    assert!(in_bounds(Coord::new(9, 9)));
    assert!(!in_bounds(Coord::new(10, 0)));
    assert!(!in_bounds(Coord::new(0, 10)));
    assert!(!in_bounds(Coord::new(-1, 4)));
}

#[test]
fn test_coord_key_format_and_parse_back() {
    let c = Coord::new(3, 7);
    assert_eq!(coord_key(c), "3,7");
    assert_eq!("3,7".parse::<Coord>().unwrap(), c);
    assert_eq!("3;7".parse::<Coord>().unwrap_err().code(), ErrorCode::BadCoord);
}

#[test]
fn test_human_notation_known_cells() {
    assert_eq!(to_human(Coord::new(0, 0)).unwrap(), "A1");
    assert_eq!(to_human(Coord::new(9, 9)).unwrap(), "J10");
    assert_eq!(from_human("a1").unwrap(), Coord::new(0, 0));
    assert_eq!(from_human("J10").unwrap(), Coord::new(9, 9));
    assert_eq!(from_human("c5").unwrap(), Coord::new(2, 4));
    assert_eq!(
        to_human(Coord::new(10, 0)).unwrap_err().code(),
        ErrorCode::OutOfBounds
    );
}

#[test]
fn test_from_human_rejects_malformed() {
    for bad in ["K1", "A11", "A0", "1A", "", "A01", "A", "AA1", " A1", "A1 "] {
        let err = from_human(bad).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadCoord, "input {:?}", bad);
    }
}

#[test]
fn test_neighbor_counts() {
    assert_eq!(Coord::new(0, 0).neighbors8().count(), 3);
    assert_eq!(Coord::new(0, 5).neighbors8().count(), 5);
    assert_eq!(Coord::new(4, 4).neighbors8().count(), 8);
    let edge: Vec<Coord> = Coord::new(0, 0).neighbors4().collect();
    assert_eq!(edge, vec![Coord::new(1, 0), Coord::new(0, 1)]);
}

#[test]
fn test_parse_placement() {
    let ship = parse_placement("ship-3-1", "B3 v 3").unwrap();
    assert_eq!(ship.bow, Coord::new(1, 2));
    assert_eq!(ship.length, 3);
    assert_eq!(ship.orientation(), Orientation::Vertical);
    assert_eq!(ship.id, "ship-3-1");

    assert_eq!(
        parse_placement("x", "B3 x 3").unwrap_err().code(),
        ErrorCode::Orientation
    );
    assert_eq!(
        parse_placement("x", "B3 H 5").unwrap_err().code(),
        ErrorCode::BadLength
    );
    assert_eq!(
        parse_placement("x", "Z3 H 2").unwrap_err().code(),
        ErrorCode::BadCoord
    );
}

#[test]
fn test_orientation_parse() {
    assert_eq!("H".parse::<Orientation>().unwrap(), Orientation::Horizontal);
    assert_eq!("vertical".parse::<Orientation>().unwrap(), Orientation::Vertical);
    assert_eq!(
        "diagonal".parse::<Orientation>().unwrap_err().code(),
        ErrorCode::Orientation
    );
}

proptest! {
    #[test]
    fn human_notation_round_trip(x in 0..BOARD_SIZE as i32, y in 0..BOARD_SIZE as i32) {
        let c = Coord::new(x, y);
        let text = to_human(c).unwrap();
        prop_assert_eq!(from_human(&text).unwrap(), c);
        prop_assert_eq!(from_human(&text.to_lowercase()).unwrap(), c);
    }

    #[test]
    fn coord_key_round_trip(x in -20i32..20, y in -20i32..20) {
        let c = Coord::new(x, y);
        prop_assert_eq!(coord_key(c).parse::<Coord>().unwrap(), c);
    }
}
