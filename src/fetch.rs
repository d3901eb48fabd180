use {
    crate::{
        basis::{AstralEntity, Color, Direction, Placement, Pos},
        grid::Grid,
    },
    anyhow::{bail, ensure, Context as _, Result},
    serde::Deserialize,
    std::collections::BTreeSet,
};

#[derive(Deserialize)]
struct GoalResponse {
    goal: Vec<Vec<String>>,
}

/// `GoalMap` はサーバーが持つ目標図形を表す.
#[derive(Debug)]
pub struct GoalMap {
    pub grid: Grid,
    pub placements: Vec<Placement>,
}

#[cfg(feature = "net")]
pub fn fetch_goal(api_url: &str, candidate_id: &str) -> Result<GoalMap> {
    let endpoint = format!(
        "{}/map/{}/goal",
        api_url.trim_end_matches('/'),
        candidate_id
    );
    let body = reqwest::blocking::get(&endpoint)
        .and_then(|x| x.error_for_status())
        .and_then(|x| x.text())
        .with_context(|| format!("failed to fetch goal map from {}", endpoint))?;
    parse_goal(&body)
}

pub fn parse_goal(body: &str) -> Result<GoalMap> {
    let response: GoalResponse =
        serde_json::from_str(body).with_context(|| format!("failed to parse body. raw: '{}'", body))?;

    let rows = response.goal.len();
    let columns = response.goal.first().map_or(0, Vec::len);
    ensure!(
        rows <= u8::MAX as usize && columns <= u8::MAX as usize,
        "goal map is too large: {}x{}",
        rows,
        columns
    );
    let grid = Grid::new(rows as u8, columns as u8);

    let mut placements = vec![];
    for (row, line) in response.goal.iter().enumerate() {
        ensure!(
            line.len() == columns,
            "row {} has {} cells, expected {}",
            row,
            line.len(),
            columns
        );
        for (column, cell) in line.iter().enumerate() {
            if let Some(entity) = parse_cell(cell)? {
                let pos = Pos::new(row as u8, column as u8);
                placements.push(Placement { pos, entity });
            }
        }
    }

    Ok(GoalMap { grid, placements })
}

fn parse_cell(cell: &str) -> Result<Option<AstralEntity>> {
    let entity = match cell {
        "SPACE" => return Ok(None),
        "POLYANET" => AstralEntity::Polyanet,
        "BLUE_SOLOON" => AstralEntity::Soloon { color: Color::Blue },
        "RED_SOLOON" => AstralEntity::Soloon { color: Color::Red },
        "PURPLE_SOLOON" => AstralEntity::Soloon {
            color: Color::Purple,
        },
        "WHITE_SOLOON" => AstralEntity::Soloon {
            color: Color::White,
        },
        "UP_COMETH" => AstralEntity::Cometh {
            direction: Direction::Up,
        },
        "DOWN_COMETH" => AstralEntity::Cometh {
            direction: Direction::Down,
        },
        "LEFT_COMETH" => AstralEntity::Cometh {
            direction: Direction::Left,
        },
        "RIGHT_COMETH" => AstralEntity::Cometh {
            direction: Direction::Right,
        },
        _ => bail!("unknown goal cell '{}'", cell),
    };
    Ok(Some(entity))
}

/// `GoalDiff` は目標図形と生成した図形の polyanet の差分を表す.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GoalDiff {
    /// 目標にはあるが生成されていないセル.
    pub missing: Vec<Pos>,
    /// 生成されたが目標にはないセル.
    pub extra: Vec<Pos>,
}

impl GoalDiff {
    pub fn polyanets(goal: &[Placement], generated: &[Placement]) -> Self {
        let cells = |placements: &[Placement]| {
            placements
                .iter()
                .filter(|p| p.entity == AstralEntity::Polyanet)
                .map(|p| p.pos)
                .collect::<BTreeSet<_>>()
        };
        let goal = cells(goal);
        let generated = cells(generated);

        Self {
            missing: goal.difference(&generated).copied().collect(),
            extra: generated.difference(&goal).copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

#[test]
fn test_parse_goal() {
    let goal = parse_goal(
        r#"{"goal": [
            ["SPACE", "POLYANET", "SPACE"],
            ["RED_SOLOON", "SPACE", "UP_COMETH"]
        ]}"#,
    )
    .unwrap();
    assert_eq!(goal.grid, Grid::new(2, 3));
    assert_eq!(
        goal.placements,
        vec![
            Placement::polyanet(Pos::new(0, 1)),
            Placement {
                pos: Pos::new(1, 0),
                entity: AstralEntity::Soloon { color: Color::Red },
            },
            Placement {
                pos: Pos::new(1, 2),
                entity: AstralEntity::Cometh {
                    direction: Direction::Up,
                },
            },
        ]
    );
}

#[test]
fn test_parse_goal_rejects() {
    assert!(parse_goal(r#"{"goal": [["SPACE", "MOON"]]}"#).is_err());
    assert!(parse_goal(r#"{"goal": [["SPACE", "SPACE"], ["SPACE"]]}"#).is_err());
    assert!(parse_goal("not json").is_err());
}

#[test]
fn test_goal_diff() {
    let goal = [
        Placement::polyanet(Pos::new(0, 0)),
        Placement::polyanet(Pos::new(1, 1)),
        Placement {
            pos: Pos::new(2, 2),
            entity: AstralEntity::Soloon {
                color: Color::White,
            },
        },
    ];
    let generated = [
        Placement::polyanet(Pos::new(1, 1)),
        Placement::polyanet(Pos::new(3, 3)),
    ];
    let diff = GoalDiff::polyanets(&goal, &generated);
    assert_eq!(diff.missing, vec![Pos::new(0, 0)]);
    assert_eq!(diff.extra, vec![Pos::new(3, 3)]);
    assert!(!diff.is_empty());

    let phase1 = crate::shape::phase1().unwrap();
    assert!(GoalDiff::polyanets(&phase1, &phase1).is_empty());
}
