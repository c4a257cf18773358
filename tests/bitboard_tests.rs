use salvo::{BitBoard, Coord, CoordSet, ErrorCode};

#[test]
fn test_insert_contains_remove() {
    let mut bb = CoordSet::new();
    assert!(bb.is_empty());

    assert!(bb.insert(Coord::new(1, 1)).unwrap());
    assert!(!bb.insert(Coord::new(1, 1)).unwrap());
    assert!(bb.contains(Coord::new(1, 1)));
    assert_eq!(bb.len(), 1);

    assert!(bb.remove(Coord::new(1, 1)));
    assert!(!bb.remove(Coord::new(1, 1)));
    assert!(bb.is_empty());
}

#[test]
fn test_off_board_coords() {
    let mut bb = CoordSet::new();
    let err = bb.insert(Coord::new(10, 0)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::OutOfBounds);
    assert!(!bb.contains(Coord::new(-1, 0)));
    assert!(CoordSet::try_from_coords([Coord::new(0, 0), Coord::new(0, 10)]).is_err());
}

#[test]
fn test_iter_is_row_major() {
    let bb = CoordSet::try_from_coords([Coord::new(3, 3), Coord::new(9, 0), Coord::new(0, 1)])
        .unwrap();
    let cells: Vec<_> = bb.iter().collect();
    assert_eq!(
        cells,
        vec![Coord::new(9, 0), Coord::new(0, 1), Coord::new(3, 3)]
    );
    assert_eq!((&bb).into_iter().count(), 3);
}

#[test]
fn test_set_operations() {
    let a = CoordSet::try_from_coords([Coord::new(0, 0), Coord::new(1, 0)]).unwrap();
    let b = CoordSet::try_from_coords([Coord::new(1, 0), Coord::new(2, 0)]).unwrap();
    assert_eq!((a | b).len(), 3);
    assert_eq!((a & b).iter().collect::<Vec<_>>(), vec![Coord::new(1, 0)]);
    assert!(!a.is_disjoint(&b));

    let c = CoordSet::try_from_coords([Coord::new(9, 9)]).unwrap();
    assert!(a.is_disjoint(&c));
}

#[test]
fn test_small_board_display() {
    let mut bb = BitBoard::<u16, 4>::new();
    bb.insert(Coord::new(0, 0)).unwrap();
    bb.insert(Coord::new(3, 3)).unwrap();
    assert!(!bb.contains(Coord::new(4, 0)));
    let text = bb.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "■ □ □ □ ");
    assert_eq!(lines[3], "□ □ □ ■ ");
}

#[test]
fn test_serde_as_coordinate_list() {
    let bb = CoordSet::try_from_coords([Coord::new(2, 5)]).unwrap();
    let json = serde_json::to_string(&bb).unwrap();
    assert_eq!(json, r#"[{"x":2,"y":5}]"#);
    let back: CoordSet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, bb);

    let bad = serde_json::from_str::<CoordSet>(r#"[{"x":12,"y":5}]"#);
    assert!(bad.is_err());
}
