use stone_grid::core::{AssetCatalog, BoardConfig, StoneBoard};
use stone_grid::term::{BoardView, FrameBuffer, StonePalette, Viewport};

fn settled_board(nx: usize, ny: usize, stones: &[(i32, i32, u32)]) -> StoneBoard {
    let mut board = StoneBoard::with_size(BoardConfig::default(), nx, ny).unwrap();
    for &(x, y, kind) in stones {
        board.generate(x, y, kind, None).unwrap();
    }
    while board.is_playing_animation() {
        board.update();
    }
    board
}

#[test]
fn term_view_renders_border_corners() {
    let board = settled_board(3, 3, &[]);
    let view = BoardView::default();

    // cell_w=2, cell_h=1: 3x3 board => 6x3 chars, plus border => 8x5.
    let fb = view.render(&board, Viewport::new(8, 5));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(7, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 4).unwrap().ch, '└');
    assert_eq!(fb.get(7, 4).unwrap().ch, '┘');
    assert_eq!(fb.get(1, 1).unwrap().ch, '·');
}

#[test]
fn term_view_paints_settled_stone_two_chars_wide() {
    let board = settled_board(3, 3, &[(1, 2, 2)]);
    let view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let drawn = view.render_into(&board, Viewport::new(8, 5), &mut fb);
    assert_eq!(drawn, 1);

    // Inside border: (1,1) origin, column 1 => x 3..5, row 2 => y 3.
    let expected = view.palette().asset(2).unwrap().color;
    for x in [3, 4] {
        let cell = fb.get(x, 3).unwrap();
        assert_ne!(cell.ch, '·');
        assert_eq!(cell.style.fg, expected);
    }
    assert_eq!(fb.get(1, 3).unwrap().ch, '·');
}

#[test]
fn term_view_hides_stones_above_the_board() {
    let mut board = StoneBoard::with_size(BoardConfig::default(), 3, 3).unwrap();
    board.generate(0, 0, 0, None).unwrap();

    // Spawned one row above the top row.
    let mut fb = FrameBuffer::new(0, 0);
    let drawn = BoardView::default().render_into(&board, Viewport::new(8, 5), &mut fb);
    assert_eq!(drawn, 0);
}

#[test]
fn term_view_skips_kinds_missing_from_palette() {
    let board = settled_board(2, 1, &[(0, 0, 0), (1, 0, 99)]);
    let view = BoardView::default();
    assert!(view.palette().asset(99).is_none());

    let mut fb = FrameBuffer::new(0, 0);
    assert_eq!(view.render_into(&board, Viewport::new(6, 3), &mut fb), 1);
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let board = settled_board(3, 3, &[(0, 0, 0), (1, 0, 1)]);
    let view = BoardView::default();

    // Frame is 8x5, centered in 30x10 => starts at (11, 2); panel at x=21.
    let fb = view.render(&board, Viewport::new(30, 10));
    assert!(fb.row_text(2).contains("STONES"));
    assert!(fb.row_text(3).contains('2'));
    assert!(fb.row_text(5).contains("QUEUE"));
    assert!(fb.row_text(8).contains("STATE"));
    assert!(fb.row_text(9).contains("IDLE"));
}

#[test]
fn term_view_shows_placeholder_when_uninitialized() {
    let board = StoneBoard::default();
    let fb = BoardView::default().render(&board, Viewport::new(30, 5));
    assert!(fb.row_text(2).contains("NOT INITIALIZED"));
}

#[test]
fn term_view_accepts_custom_palette() {
    let board = settled_board(1, 1, &[(0, 0, 0)]);
    let view = BoardView::new(1, 1).with_palette(StonePalette::new(Vec::new()));
    assert!(view.palette().asset(0).is_none());

    let mut fb = FrameBuffer::new(0, 0);
    assert_eq!(view.render_into(&board, Viewport::new(3, 3), &mut fb), 0);
}
