use salvo::ui::{render_board, render_fog, render_probabilities};
use salvo::{
    create_ai_state, create_default_fleet, make_board, make_empty_fog, AiLevel, CellMark, Coord,
};

#[test]
fn test_render_fog_marks() {
    let mut fog = make_empty_fog();
    fog.mark(Coord::new(0, 0), CellMark::Miss);
    fog.mark(Coord::new(1, 0), CellMark::Hit);
    fog.mark(Coord::new(2, 0), CellMark::Hit);
    fog.mark(Coord::new(2, 0), CellMark::Sunk);

    let text = render_fog(&fog);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[0], "    A B C D E F G H I J");
    assert_eq!(lines[1], " 1  o X # . . . . . . .");
    assert_eq!(lines[10], "10  . . . . . . . . . .");
}

#[test]
fn test_render_board_shows_ships_and_shots() {
    let mut board = make_board(create_default_fleet());
    board.hits.insert(Coord::new(0, 0)).unwrap();
    board.misses.insert(Coord::new(9, 9)).unwrap();

    let text = render_board(&board);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[1], " 1  X S S S . S S S . .");
    assert!(lines[10].ends_with('o'));
}

#[test]
fn test_render_probabilities() {
    let state = create_ai_state(AiLevel::Hard);
    let text = render_probabilities(state.probabilities.as_ref().unwrap());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 11);
    assert!(lines[1].starts_with(" 1  0.20"));
    assert!(lines[5].contains("1.80"));
}
