use {crate::basis::Pos, thiserror::Error};

/// `Grid` は天体を置くグリッドの大きさを表す.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    rows: u8,
    columns: u8,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("({row}, {column}) is outside of the {rows}x{columns} grid")]
pub struct OutOfGrid {
    pub row: i32,
    pub column: i32,
    pub rows: u8,
    pub columns: u8,
}

impl Grid {
    pub const fn new(rows: u8, columns: u8) -> Self {
        Self { rows, columns }
    }

    pub const fn square(side: u8) -> Self {
        Self::new(side, side)
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    pub fn is_pos_valid(&self, pos: Pos) -> bool {
        pos.row() < self.rows && pos.column() < self.columns
    }

    /// グリッド内であれば `Pos` を返す.
    pub fn pos(&self, row: u8, column: u8) -> Option<Pos> {
        let pos = Pos::new(row, column);
        self.is_pos_valid(pos).then(|| pos)
    }

    /// `origin` から `(d_row, d_column)` だけずらした座標を返す. はみ出す場合は `OutOfGrid` になる.
    pub fn offset(&self, origin: Pos, d_row: i32, d_column: i32) -> Result<Pos, OutOfGrid> {
        let row = origin.row() as i32 + d_row;
        let column = origin.column() as i32 + d_column;
        let in_range = |v: i32, max: u8| (0..max as i32).contains(&v);

        if in_range(row, self.rows) && in_range(column, self.columns) {
            Ok(Pos::new(row as u8, column as u8))
        } else {
            Err(OutOfGrid {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            })
        }
    }

    /// 左上から行ごとに全ての座標を走査する.
    pub fn all_pos(&self) -> impl Iterator<Item = Pos> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |column| Pos::new(row, column)))
    }
}

#[test]
fn test_pos_bounds() {
    let grid = Grid::new(3, 5);
    assert_eq!(grid.pos(2, 4).map(|p| (p.row(), p.column())), Some((2, 4)));
    assert_eq!(grid.pos(3, 0), None);
    assert_eq!(grid.pos(0, 5), None);
}

#[test]
fn test_offset() {
    let grid = Grid::square(10);
    let origin = grid.pos(5, 5).unwrap();
    assert_eq!(grid.offset(origin, -5, 4), Ok(Pos::new(0, 9)));
    assert_eq!(
        grid.offset(origin, -6, 0),
        Err(OutOfGrid {
            row: -1,
            column: 5,
            rows: 10,
            columns: 10,
        })
    );
    assert!(grid.offset(origin, 0, 5).is_err());
}

#[test]
fn test_all_pos() {
    let grid = Grid::new(2, 3);
    let all = grid.all_pos().collect::<Vec<_>>();
    assert_eq!(all.len(), 6);
    assert_eq!(all[0], Pos::new(0, 0));
    assert_eq!(all[3], Pos::new(1, 0));
    assert_eq!(all[5], Pos::new(1, 2));
}
