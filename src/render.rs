use {
    crate::{
        basis::{AstralEntity, Color, Direction, Placement},
        grid::Grid,
    },
    std::collections::HashMap,
};

fn symbol(entity: AstralEntity) -> char {
    match entity {
        AstralEntity::Polyanet => '@',
        AstralEntity::Soloon { color } => match color {
            Color::Blue => 'b',
            Color::Red => 'r',
            Color::Purple => 'p',
            Color::White => 'w',
        },
        AstralEntity::Cometh { direction } => match direction {
            Direction::Up => '^',
            Direction::Down => 'v',
            Direction::Left => '<',
            Direction::Right => '>',
        },
    }
}

/// `placements` を `grid` 上に一行一文字で描く. 空きセルは `.`, 同じセルに複数あれば後のものが勝つ.
pub fn render(grid: Grid, placements: &[Placement]) -> String {
    let cells = placements
        .iter()
        .filter(|p| grid.is_pos_valid(p.pos))
        .map(|p| (p.pos, p.entity))
        .collect::<HashMap<_, _>>();

    let mut result = String::with_capacity((grid.columns() as usize + 1) * grid.rows() as usize);
    for pos in grid.all_pos() {
        result.push(cells.get(&pos).copied().map_or('.', symbol));
        if pos.column() + 1 == grid.columns() {
            result.push('\n');
        }
    }
    result
}

#[test]
fn test_render() {
    let grid = Grid::new(2, 3);
    let placements = [
        Placement::polyanet(grid.pos(0, 0).unwrap()),
        Placement {
            pos: grid.pos(1, 2).unwrap(),
            entity: AstralEntity::Cometh {
                direction: Direction::Left,
            },
        },
        Placement {
            pos: grid.pos(0, 2).unwrap(),
            entity: AstralEntity::Soloon { color: Color::Red },
        },
    ];
    assert_eq!(render(grid, &placements), "@.r\n..<\n");
}

#[test]
fn test_render_phase1() {
    let placements = crate::shape::phase1().unwrap();
    let text = render(crate::shape::PHASE1_GRID, &placements);
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "..........");
    assert_eq!(lines[2], "..@....@..");
    assert_eq!(lines[4], "....@@....");
    assert_eq!(text.matches('@').count(), 14);
}
