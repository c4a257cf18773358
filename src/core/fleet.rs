//! Fleet validation, the reference fleet and random fleet generation.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::core::bitboard::CoordSet;
use crate::core::common::{FleetViolation, GameError};
use crate::core::config::{
    expected_count, BOARD_SIZE, FLEET_COMPOSITION, FLEET_SIZE, MAX_SHIP_LENGTH,
    RANDOM_FLEET_ATTEMPTS,
};
use crate::core::geometry::Coord;
use crate::core::ship::{Orientation, Ship, ShipId};

/// The ships one player places. Legality is checked by [`validate_fleet`],
/// not maintained by the type.
pub type Fleet = Vec<Ship>;

const CELLS: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;

/// Check a proposed fleet. Rules are applied in a fixed order and the first
/// broken one is reported: size, per-ship length and bounds, overlap,
/// composition, then adjacency (skipped when `allow_touching`).
pub fn validate_fleet(fleet: &[Ship], allow_touching: bool) -> Result<(), FleetViolation> {
    if fleet.len() != FLEET_SIZE {
        return Err(FleetViolation::FleetSize {
            found: fleet.len(),
            expected: FLEET_SIZE,
        });
    }

    for ship in fleet {
        if !(1..=MAX_SHIP_LENGTH).contains(&ship.length) {
            return Err(FleetViolation::BadLength {
                ship: ship.id.clone(),
                length: ship.length,
            });
        }
        if !ship.cells().all(|c| c.in_bounds()) {
            return Err(FleetViolation::OutOfBounds {
                ship: ship.id.clone(),
            });
        }
    }

    // occupancy grid: index of the owning ship per cell
    let mut owner: [Option<usize>; CELLS] = [None; CELLS];
    for (i, ship) in fleet.iter().enumerate() {
        for cell in ship.cells() {
            let Some(idx) = cell.index() else { continue };
            if owner[idx].is_some() {
                return Err(FleetViolation::Overlap {
                    ship: ship.id.clone(),
                    at: cell,
                });
            }
            owner[idx] = Some(i);
        }
    }

    for (length, _) in FLEET_COMPOSITION {
        let found = fleet.iter().filter(|s| s.length == length).count();
        let expected = expected_count(length);
        if found != expected {
            return Err(FleetViolation::WrongComposition {
                length,
                found,
                expected,
            });
        }
    }

    if !allow_touching {
        for (idx, slot) in owner.iter().enumerate() {
            let Some(i) = *slot else { continue };
            for n in Coord::from_index(idx).neighbors8() {
                let Some(j) = n.index().and_then(|n_idx| owner[n_idx]) else {
                    continue;
                };
                if j != i {
                    return Err(FleetViolation::Touching {
                        ship: fleet[i].id.clone(),
                        other: fleet[j].id.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}

/// A fixed, legal, non-touching fleet.
pub fn create_default_fleet() -> Fleet {
    use Orientation::{Horizontal as H, Vertical as V};
    let layout: [(&str, (i32, i32), u8, Orientation); FLEET_SIZE] = [
        ("ship-4-1", (0, 0), 4, H),
        ("ship-3-1", (5, 0), 3, H),
        ("ship-3-2", (0, 2), 3, V),
        ("ship-2-1", (2, 2), 2, H),
        ("ship-2-2", (5, 2), 2, H),
        ("ship-2-3", (8, 2), 2, V),
        ("ship-1-1", (1, 7), 1, H),
        ("ship-1-2", (4, 5), 1, H),
        ("ship-1-3", (6, 7), 1, H),
        ("ship-1-4", (8, 5), 1, H),
    ];
    layout
        .into_iter()
        .map(|(id, (x, y), len, o)| Ship::new(id, Coord::new(x, y), len, o))
        .collect()
}

/// Place a legal fleet at random, longest ships first.
///
/// Each attempt places ships one at a time; a ship that cannot be fitted
/// abandons the attempt. Fails with `RANDOM_PLACEMENT_FAILED` after
/// [`RANDOM_FLEET_ATTEMPTS`] attempts.
pub fn random_fleet<R: Rng + ?Sized>(
    rng: &mut R,
    allow_touching: bool,
) -> Result<Fleet, GameError> {
    for _ in 0..RANDOM_FLEET_ATTEMPTS {
        if let Some(fleet) = try_random_fleet(rng, allow_touching) {
            if validate_fleet(&fleet, allow_touching).is_ok() {
                return Ok(fleet);
            }
        }
    }
    Err(GameError::RandomPlacementFailed {
        attempts: RANDOM_FLEET_ATTEMPTS,
    })
}

/// [`random_fleet`] with an optional fixed seed for reproducible layouts.
pub fn random_fleet_seeded(seed: Option<u64>, allow_touching: bool) -> Result<Fleet, GameError> {
    let mut rng = match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_rng(&mut rand::rng()),
    };
    random_fleet(&mut rng, allow_touching)
}

fn try_random_fleet<R: Rng + ?Sized>(rng: &mut R, allow_touching: bool) -> Option<Fleet> {
    let mut occupied = CoordSet::new();
    let mut fleet = Fleet::with_capacity(FLEET_SIZE);
    for (length, count) in FLEET_COMPOSITION.into_iter().rev() {
        for n in 1..=count {
            let ship = random_placement(rng, &occupied, length, allow_touching)
                .map(|(bow, o)| Ship::new(ShipId::numbered(length, n), bow, length, o))?;
            for cell in ship.cells() {
                occupied.insert(cell).ok()?;
            }
            fleet.push(ship);
        }
    }
    Some(fleet)
}

/// Random in-bounds bow and orientation for a ship of `length` that fits
/// around `occupied`.
fn random_placement<R: Rng + ?Sized>(
    rng: &mut R,
    occupied: &CoordSet,
    length: u8,
    allow_touching: bool,
) -> Option<(Coord, Orientation)> {
    let size = BOARD_SIZE as i32;
    let len = length as i32;
    for _ in 0..100 {
        let orient = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let (max_x, max_y) = match orient {
            Orientation::Horizontal => (size - len, size - 1),
            Orientation::Vertical => (size - 1, size - len),
        };
        let bow = Coord::new(rng.random_range(0..=max_x), rng.random_range(0..=max_y));
        let candidate = Ship::new("candidate", bow, length, orient);
        let fits = candidate.cells().all(|c| {
            !occupied.contains(c)
                && (allow_touching || !c.neighbors8().any(|n| occupied.contains(n)))
        });
        if fits {
            return Some((bow, orient));
        }
    }
    None
}
