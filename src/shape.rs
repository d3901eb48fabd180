//! Phase ごとの目標図形の座標を生成する.

use crate::{
    basis::{Placement, Pos},
    grid::{Grid, OutOfGrid},
};

#[cfg(test)]
mod tests;

pub const PHASE1_GRID: Grid = Grid::square(10);
pub const PHASE2_GRID: Grid = Grid::square(30);

/// ロゴの中心セル (row, column).
pub const LOGO_CENTER: (u8, u8) = (15, 15);

/// 葉の各ステップで対角線から離す距離. インデックスは `step - 1`.
pub const LEAF_OFFSETS: [i32; 10] = [1, 2, 3, 4, 3, 3, 2, 2, 1, 1];

/// この数までのステップは `offset` と `offset + 1` の二組を置く.
const DOUBLE_PAIR_STEPS: i32 = 3;

/// 葉の先端のステップ.
pub const LEAF_TIP_STEP: i32 = LEAF_OFFSETS.len() as i32 + 1;

/// 葉を伸ばす向き `(row_sign, column_sign)`. 右上, 左上, 右下, 左下の順.
pub const LEAF_SIGNS: [(i32, i32); 4] = [(-1, 1), (-1, -1), (1, 1), (1, -1)];

/// `Phase` は再現する目標図形を表す.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Phase {
    /// 10x10 のグリッドに polyanet の X を描く.
    #[value(name = "phase1")]
    Phase1,
    /// 30x30 のグリッドに中心の十字と四枚の葉からなるロゴを描く.
    #[value(name = "phase2")]
    Phase2,
}

impl Phase {
    pub fn grid(self) -> Grid {
        match self {
            Phase::Phase1 => PHASE1_GRID,
            Phase::Phase2 => PHASE2_GRID,
        }
    }

    pub fn generate(self) -> Result<Vec<Placement>, OutOfGrid> {
        match self {
            Phase::Phase1 => phase1(),
            Phase::Phase2 => {
                let (row, column) = LOGO_CENTER;
                let center = PHASE2_GRID.pos(row, column).ok_or(OutOfGrid {
                    row: row as i32,
                    column: column as i32,
                    rows: PHASE2_GRID.rows(),
                    columns: PHASE2_GRID.columns(),
                })?;
                phase2(PHASE2_GRID, center)
            }
        }
    }
}

/// 端の二行を空けて, 10x10 のグリッドに内接する X の二本の対角線を生成する.
pub fn phase1() -> Result<Vec<Placement>, OutOfGrid> {
    let grid = PHASE1_GRID;
    let origin = Pos::new(0, 0);
    let last = grid.rows() as i32 - 1;

    let mut placements = Vec::with_capacity(14);
    for i in 2..=8 {
        placements.push(Placement::polyanet(grid.offset(origin, i, i)?));
        placements.push(Placement::polyanet(grid.offset(origin, last - i, i)?));
    }
    Ok(placements)
}

/// `center` の十字と, そこから対角線方向に伸びる四枚の葉を生成する.
pub fn phase2(grid: Grid, center: Pos) -> Result<Vec<Placement>, OutOfGrid> {
    let mut placements = Vec::new();

    for (d_row, d_column) in [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)] {
        placements.push(Placement::polyanet(grid.offset(center, d_row, d_column)?));
    }

    for &sign in &LEAF_SIGNS {
        placements.extend(leaf(grid, center, sign)?.into_iter().map(Placement::polyanet));
    }

    Ok(placements)
}

/// `center` から `(row_sign, column_sign)` の対角線方向に一枚の葉を描く.
///
/// ステップ `s` では対角線上の点 `(s, s)` から行方向と列方向にそれぞれ `LEAF_OFFSETS[s - 1]` ずらした二点を置き,
/// 最初の `DOUBLE_PAIR_STEPS` ステップではさらに一つ外側の二点も置く. 最後のステップでは対角線上に先端を置く.
pub fn leaf(grid: Grid, center: Pos, (row_sign, column_sign): (i32, i32)) -> Result<Vec<Pos>, OutOfGrid> {
    let at = |along_row: i32, along_column: i32| {
        grid.offset(center, row_sign * along_row, column_sign * along_column)
    };

    let mut cells = Vec::new();
    for (step, &offset) in (1..).zip(LEAF_OFFSETS.iter()) {
        let pairs = if step <= DOUBLE_PAIR_STEPS { 2 } else { 1 };
        for width in offset..offset + pairs {
            cells.push(at(step, step + width)?);
            cells.push(at(step + width, step)?);
        }
    }
    cells.push(at(LEAF_TIP_STEP, LEAF_TIP_STEP)?);

    Ok(cells)
}
