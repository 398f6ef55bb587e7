use text_invaders::compute::init_state;
use text_invaders::config::GameConfig;
use text_invaders::entities::*;
use text_invaders::sprites::SHIELD_SPRITE;

fn make_shield() -> Shield {
    Shield {
        position: Position::new(10, 10),
        cells: SHIELD_SPRITE.iter().map(|row| row.as_bytes().to_vec()).collect(),
    }
}

#[test]
fn enums_compare_by_variant() {
    assert_eq!(GameState::Play, GameState::Play);
    assert_ne!(GameState::Play, GameState::Wait);
    assert_ne!(AlienState::Alive, AlienState::Exploding);
    assert_ne!(Signal::Quit, Signal::SessionOver);
    assert_eq!(AlienBomb::default().position, None);
}

#[test]
fn shield_size_follows_its_cells() {
    assert_eq!(make_shield().size(), Size::new(7, 3));

    let empty = Shield {
        position: Position::default(),
        cells: Vec::new(),
    };
    assert_eq!(empty.size(), Size::new(0, 0));
    assert_eq!(empty.solid_cells(), 0);
}

#[test]
fn shield_solidity_by_local_offset() {
    let shield = make_shield();
    assert!(shield.is_solid(Position::new(0, 0)));
    assert!(shield.is_solid(Position::new(6, 2)));
    // The arch under the middle of the bottom row is open.
    assert!(!shield.is_solid(Position::new(3, 2)));

    assert!(!shield.is_solid(Position::new(-1, 0)));
    assert!(!shield.is_solid(Position::new(0, -1)));
    assert!(!shield.is_solid(Position::new(7, 0)));
    assert!(!shield.is_solid(Position::new(0, 3)));
}

#[test]
fn shield_rows_render_as_text() {
    let mut shield = make_shield();
    shield.cells[0][2] = b' ';
    assert_eq!(shield.row_text(0), "/I III\\");
    assert_eq!(shield.row_text(2), "I/   \\I");
    assert_eq!(shield.row_text(9), "");
    assert_eq!(shield.solid_cells(), 17);
}

#[test]
fn swarm_cells_outside_the_grid_are_none() {
    let s = init_state(GameConfig::default(), 80, 40).unwrap();
    let mut swarm = s.swarm;
    assert_eq!(swarm.total_aliens(), 55);
    assert_eq!(swarm.cell(4, 10), Some(AlienState::Alive));
    assert_eq!(swarm.cell(5, 0), None);
    assert_eq!(swarm.cell(0, 11), None);
    assert!(swarm.cell_mut(0, 11).is_none());

    *swarm.cell_mut(2, 3).unwrap() = AlienState::Dead;
    assert_eq!(swarm.cells[2 * 11 + 3], AlienState::Dead);
}

#[test]
fn session_clone_is_independent() {
    let original = init_state(GameConfig::default(), 80, 40).unwrap();
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.position.x = 1;
    cloned.player.score = 999;
    cloned.shields[0].cells[0][0] = b' ';
    cloned.swarm.cells[0] = AlienState::Dead;
    cloned.swarm.bombs[0].position = Some(Position::new(5, 5));

    assert_eq!(original.player.position.x, 38);
    assert_eq!(original.player.score, 0);
    assert!(original.shields[0].is_solid(Position::new(0, 0)));
    assert_eq!(original.swarm.cells[0], AlienState::Alive);
    assert_eq!(original.swarm.bombs[0].position, None);
}
