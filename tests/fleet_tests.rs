use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use salvo::{
    build_ship_index, create_default_fleet, get_ship_adjacent_cells, is_ship_sunk, random_fleet,
    random_fleet_seeded, validate_fleet, Coord, CoordSet, ErrorCode, Fleet, GameError, Orientation,
    Ship, ShipId, FLEET_COMPOSITION, RANDOM_FLEET_ATTEMPTS, TOTAL_SHIP_CELLS,
};

fn ship(id: &str, x: i32, y: i32, len: u8, o: Orientation) -> Ship {
    Ship::new(id, Coord::new(x, y), len, o)
}

fn replace(fleet: &mut Fleet, id: &str, with: Ship) {
    let slot = fleet.iter_mut().find(|s| s.id == id).unwrap();
    *slot = with;
}

fn reason(fleet: &Fleet, allow_touching: bool) -> ErrorCode {
    validate_fleet(fleet, allow_touching).unwrap_err().code()
}

/// Legal fleet in which the length-1 ships at (0,0) and (1,0) touch.
fn touching_pair_fleet() -> Fleet {
    use Orientation::{Horizontal as H, Vertical as V};
    vec![
        ship("ship-1-1", 0, 0, 1, H),
        ship("ship-1-2", 1, 0, 1, H),
        ship("ship-1-3", 9, 9, 1, H),
        ship("ship-1-4", 7, 9, 1, H),
        ship("ship-4-1", 0, 3, 4, H),
        ship("ship-3-1", 5, 3, 3, H),
        ship("ship-3-2", 0, 5, 3, V),
        ship("ship-2-1", 2, 5, 2, H),
        ship("ship-2-2", 5, 5, 2, H),
        ship("ship-2-3", 9, 5, 2, V),
    ]
}

#[test]
fn test_default_fleet_is_valid() {
    let fleet = create_default_fleet();
    assert_eq!(validate_fleet(&fleet, false), Ok(()));
    assert_eq!(validate_fleet(&fleet, true), Ok(()));
    assert!(!fleet.iter().any(|s| s.occupies(Coord::new(9, 9))));
    let lone = fleet.iter().find(|s| s.id == "ship-1-1").unwrap();
    assert_eq!(lone.bow, Coord::new(1, 7));
}

#[test]
fn test_touching_pair_depends_on_rule() {
    let fleet = touching_pair_fleet();
    assert_eq!(reason(&fleet, false), ErrorCode::Touching);
    assert_eq!(validate_fleet(&fleet, true), Ok(()));
}

#[test]
fn test_two_ship_fleet_fails_on_size_first() {
    let fleet = vec![
        ship("ship-1-1", 0, 0, 1, Orientation::Horizontal),
        ship("ship-1-2", 1, 0, 1, Orientation::Horizontal),
    ];
    assert_eq!(reason(&fleet, false), ErrorCode::FleetSize);
    assert_eq!(reason(&fleet, true), ErrorCode::FleetSize);
}

#[test]
fn test_diagonal_contact_counts_as_touching() {
    let mut fleet = create_default_fleet();
    replace(&mut fleet, "ship-1-2", ship("ship-1-2", 2, 8, 1, Orientation::Horizontal));
    assert_eq!(reason(&fleet, false), ErrorCode::Touching);
    assert_eq!(validate_fleet(&fleet, true), Ok(()));
}

#[test]
fn test_bad_length_reported_before_overlap() {
    let mut fleet = create_default_fleet();
    replace(&mut fleet, "ship-1-2", ship("ship-1-2", 0, 0, 1, Orientation::Horizontal));
    replace(&mut fleet, "ship-1-4", ship("ship-1-4", 8, 5, 5, Orientation::Vertical));
    assert_eq!(reason(&fleet, false), ErrorCode::BadLength);
}

#[test]
fn test_out_of_bounds_reported_before_overlap() {
    let mut fleet = create_default_fleet();
    // overlaps ship-4-1 and comes first in the list
    replace(&mut fleet, "ship-3-1", ship("ship-3-1", 1, 0, 3, Orientation::Horizontal));
    replace(&mut fleet, "ship-1-4", ship("ship-1-4", 10, 5, 1, Orientation::Horizontal));
    assert_eq!(reason(&fleet, false), ErrorCode::OutOfBounds);
}

#[test]
fn test_long_ship_running_off_the_edge() {
    let mut fleet = create_default_fleet();
    replace(&mut fleet, "ship-4-1", ship("ship-4-1", 7, 9, 4, Orientation::Horizontal));
    assert_eq!(reason(&fleet, false), ErrorCode::OutOfBounds);
}

#[test]
fn test_overlap_reported_before_composition_and_touching() {
    let mut fleet = create_default_fleet();
    replace(&mut fleet, "ship-1-2", ship("ship-1-2", 0, 0, 1, Orientation::Horizontal));
    let err = validate_fleet(&fleet, false).unwrap_err();
    assert_eq!(err.code(), ErrorCode::Overlap);
    assert_eq!(err.to_string(), "ship ship-1-2 overlaps another ship at 0,0");
}

#[test]
fn test_wrong_composition_with_every_ship_in_place() {
    // ten legal, non-touching ships, but four of length 2 and three of length 1
    let mut fleet = create_default_fleet();
    replace(&mut fleet, "ship-1-4", ship("ship-2-4", 8, 5, 2, Orientation::Vertical));
    assert_eq!(reason(&fleet, true), ErrorCode::WrongComposition);
    // composition is checked before adjacency
    replace(&mut fleet, "ship-1-2", ship("ship-1-2", 2, 7, 1, Orientation::Horizontal));
    assert_eq!(reason(&fleet, false), ErrorCode::WrongComposition);
}

#[test]
fn test_is_ship_sunk_partial_and_full() {
    let s = ship("ship-3-1", 2, 2, 3, Orientation::Vertical);
    let mut hits = CoordSet::new();
    assert!(!is_ship_sunk(&s, &hits));
    hits.insert(Coord::new(2, 2)).unwrap();
    hits.insert(Coord::new(2, 3)).unwrap();
    assert!(!is_ship_sunk(&s, &hits));
    hits.insert(Coord::new(2, 4)).unwrap();
    assert!(is_ship_sunk(&s, &hits));
}

#[test]
fn test_adjacent_cells_exclude_own_cells_and_clip() {
    let corner = ship("ship-1-1", 0, 0, 1, Orientation::Horizontal);
    assert_eq!(
        get_ship_adjacent_cells(&corner),
        vec![Coord::new(1, 0), Coord::new(0, 1), Coord::new(1, 1)]
    );
    let middle = ship("ship-2-1", 4, 4, 2, Orientation::Horizontal);
    let around = get_ship_adjacent_cells(&middle);
    assert_eq!(around.len(), 10);
    assert!(!around.contains(&Coord::new(4, 4)));
    assert!(!around.contains(&Coord::new(5, 4)));
}

#[test]
fn test_ship_index_covers_every_cell() {
    let fleet = create_default_fleet();
    let index = build_ship_index(&fleet);
    assert_eq!(index.len(), TOTAL_SHIP_CELLS);
    assert_eq!(index.owner(Coord::new(1, 7)).unwrap(), &ShipId::new("ship-1-1"));
    assert_eq!(index.owner(Coord::new(0, 4)).unwrap(), &ShipId::new("ship-3-2"));
    assert!(index.owner(Coord::new(9, 9)).is_none());
}

/// Generator stuck at zero: every ship lands vertically at (0,0).
struct StuckRng;

impl RngCore for StuckRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0);
    }
}

#[test]
fn test_random_fleet_gives_up_after_bounded_attempts() {
    let err = random_fleet(&mut StuckRng, false).unwrap_err();
    assert_eq!(err.code(), ErrorCode::RandomPlacementFailed);
    assert_eq!(
        err,
        GameError::RandomPlacementFailed {
            attempts: RANDOM_FLEET_ATTEMPTS
        }
    );

    let err = random_fleet(&mut StuckRng, true).unwrap_err();
    assert_eq!(err.code(), ErrorCode::RandomPlacementFailed);
}

#[test]
fn test_random_fleet_reproducible_with_seed() {
    let a = random_fleet_seeded(Some(7), false).unwrap();
    let b = random_fleet_seeded(Some(7), false).unwrap();
    assert_eq!(a, b);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_fleet_is_always_valid(seed in any::<u64>(), allow_touching in any::<bool>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let fleet = random_fleet(&mut rng, allow_touching).unwrap();
        prop_assert_eq!(validate_fleet(&fleet, allow_touching), Ok(()));
        for (length, count) in FLEET_COMPOSITION {
            prop_assert_eq!(fleet.iter().filter(|s| s.length == length).count(), count);
        }
    }
}
