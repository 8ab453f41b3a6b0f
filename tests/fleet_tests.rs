use broadside::{
    fixed_fleet, random_fleet, ship_def, Cell, Coord, Layout, Orientation, PlacementError, Ship,
    ShipDef, FLEET, GRID_SIZE, SEAMLESS_LAYOUT, SPARSE_LAYOUT, TOTAL_SHIP_CELLS,
};
use rand::{rngs::SmallRng, SeedableRng};

#[test]
fn test_ship_mask() -> Result<(), PlacementError> {
    let def = ShipDef::new("Test", 3);
    let ship = Ship::new(def, Orientation::Horizontal, Coord::new(2, 1))?;
    let cells: Vec<_> = ship.mask().iter().collect();
    assert_eq!(cells, vec![Coord::new(2, 1), Coord::new(2, 2), Coord::new(2, 3)]);

    let vertical = Ship::new(def, Orientation::Vertical, Coord::new(0, 2))?;
    assert!(ship.overlaps(&vertical));
    Ok(())
}

#[test]
fn test_ship_out_of_bounds() {
    let def = ShipDef::new("Test", 4);
    let res = Ship::new(def, Orientation::Vertical, Coord::new(7, 0));
    assert_eq!(res, Err(PlacementError::ShipOutOfBounds));
    let empty = Ship::new(ShipDef::new("Nothing", 0), Orientation::Vertical, Coord::new(0, 0));
    assert_eq!(empty, Err(PlacementError::ShipOutOfBounds));
}

#[test]
fn test_fixed_layouts_deploy_full_fleet() {
    let mut rng = SmallRng::seed_from_u64(0);
    for layout in [Layout::Sparse, Layout::Seamless] {
        let grid = layout.deploy(&mut rng).unwrap();
        assert_eq!(grid.remaining_ship_cells(), TOTAL_SHIP_CELLS, "{}", layout);
        assert_eq!(grid.count(Cell::Empty), GRID_SIZE * GRID_SIZE - TOTAL_SHIP_CELLS);
    }
}

#[test]
fn test_fixed_fleet_size_mismatch() {
    let err = fixed_fleet(&FLEET[..5], &SPARSE_LAYOUT).unwrap_err();
    assert_eq!(err, PlacementError::FleetSizeMismatch { expected: 7, found: 5 });
}

#[test]
fn test_fixed_fleet_rejects_overlap() {
    let mut positions = SEAMLESS_LAYOUT;
    positions[1] = positions[0];
    let err = fixed_fleet(&FLEET, &positions).unwrap_err();
    assert_eq!(err, PlacementError::ShipOverlaps);
}

#[test]
fn test_random_fleet_is_valid_and_seeded() {
    for seed in 0..20u64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let ships = random_fleet(&FLEET, &mut rng).unwrap();
        assert_eq!(ships.len(), FLEET.len());
        for (i, a) in ships.iter().enumerate() {
            assert_eq!(a.def(), FLEET[i]);
            for b in &ships[i + 1..] {
                assert!(!a.overlaps(b));
            }
        }

        let mut again = SmallRng::seed_from_u64(seed);
        assert_eq!(random_fleet(&FLEET, &mut again).unwrap(), ships);
    }
}

#[test]
fn test_random_fleet_gives_up() {
    let giants = [ShipDef::new("Giant", GRID_SIZE); GRID_SIZE * 2 + 1];
    let mut rng = SmallRng::seed_from_u64(3);
    let err = random_fleet(&giants, &mut rng).unwrap_err();
    assert!(matches!(err, PlacementError::UnableToPlace { ship: "Giant" }));
}

#[test]
fn test_ship_lookup() {
    assert_eq!(ship_def("carrier").map(|d| d.length()), Some(5));
    assert_eq!(ship_def("Rescue Ship").map(|d| d.length()), Some(2));
    assert_eq!(ship_def("Dinghy"), None);
}
