use {
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
    thiserror::Error,
};

/// `Pos` はグリッド上のセルの座標を表す. 値は必ず生成元の `Grid` の範囲内になる.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    row: u8,
    column: u8,
}

impl fmt::Debug for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

impl Pos {
    pub(crate) fn new(row: u8, column: u8) -> Self {
        Self { row, column }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn column(&self) -> u8 {
        self.column
    }
}

/// `Kind` は天体の種類を表す. API のエンドポイントはこの種類ごとに分かれている.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Polyanet,
    Soloon,
    Cometh,
}

impl Kind {
    pub fn path(self) -> &'static str {
        match self {
            Kind::Polyanet => "polyanets",
            Kind::Soloon => "soloons",
            Kind::Cometh => "comeths",
        }
    }
}

impl FromStr for Kind {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().trim_end_matches('s') {
            "polyanet" => Ok(Kind::Polyanet),
            "soloon" => Ok(Kind::Soloon),
            "cometh" => Ok(Kind::Cometh),
            _ => Err(EntityError::UnknownKind(s.to_owned())),
        }
    }
}

/// `Color` は soloon の色を表す.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    Red,
    Purple,
    White,
}

/// `Direction` は cometh の向きを表す.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntityError {
    #[error("soloon requires a color")]
    MissingColor,
    #[error("cometh requires a direction")]
    MissingDirection,
    #[error("{0:?} does not take a color")]
    UnexpectedColor(Kind),
    #[error("{0:?} does not take a direction")]
    UnexpectedDirection(Kind),
    #[error("unknown entity kind '{0}'")]
    UnknownKind(String),
}

/// `AstralEntity` はグリッドに置ける天体を表す. 各種類は自分に必要な属性だけを持つ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AstralEntity {
    Polyanet,
    Soloon { color: Color },
    Cometh { direction: Direction },
}

impl AstralEntity {
    /// 型のついていない入力から天体を作る. 種類と属性の組み合わせが不正なら通信前にエラーを返す.
    pub fn from_parts(
        kind: Kind,
        color: Option<Color>,
        direction: Option<Direction>,
    ) -> Result<Self, EntityError> {
        match (kind, color, direction) {
            (Kind::Polyanet, None, None) => Ok(AstralEntity::Polyanet),
            (Kind::Soloon, Some(color), None) => Ok(AstralEntity::Soloon { color }),
            (Kind::Cometh, None, Some(direction)) => Ok(AstralEntity::Cometh { direction }),
            (Kind::Soloon, None, _) => Err(EntityError::MissingColor),
            (Kind::Cometh, _, None) => Err(EntityError::MissingDirection),
            (kind, Some(_), _) if kind != Kind::Soloon => Err(EntityError::UnexpectedColor(kind)),
            (kind, _, _) => Err(EntityError::UnexpectedDirection(kind)),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            AstralEntity::Polyanet => Kind::Polyanet,
            AstralEntity::Soloon { .. } => Kind::Soloon,
            AstralEntity::Cometh { .. } => Kind::Cometh,
        }
    }
}

/// `Placement` は座標 `pos` に天体 `entity` を置く一回の操作を表す.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub pos: Pos,
    pub entity: AstralEntity,
}

impl Placement {
    pub fn polyanet(pos: Pos) -> Self {
        Self {
            pos,
            entity: AstralEntity::Polyanet,
        }
    }
}

#[test]
fn test_from_parts() {
    use {Color::*, Direction::*, EntityError::*, Kind::*};

    assert_eq!(
        AstralEntity::from_parts(Polyanet, None, None),
        Ok(AstralEntity::Polyanet)
    );
    assert_eq!(
        AstralEntity::from_parts(Soloon, Some(Purple), None),
        Ok(AstralEntity::Soloon { color: Purple })
    );
    assert_eq!(
        AstralEntity::from_parts(Cometh, None, Some(Left)),
        Ok(AstralEntity::Cometh { direction: Left })
    );

    assert_eq!(AstralEntity::from_parts(Soloon, None, None), Err(MissingColor));
    assert_eq!(AstralEntity::from_parts(Soloon, None, Some(Up)), Err(MissingColor));
    assert_eq!(AstralEntity::from_parts(Cometh, None, None), Err(MissingDirection));
    assert_eq!(
        AstralEntity::from_parts(Polyanet, Some(Red), None),
        Err(UnexpectedColor(Polyanet))
    );
    assert_eq!(
        AstralEntity::from_parts(Polyanet, None, Some(Down)),
        Err(UnexpectedDirection(Polyanet))
    );
    assert_eq!(
        AstralEntity::from_parts(Cometh, Some(White), Some(Right)),
        Err(UnexpectedColor(Cometh))
    );
    assert_eq!(
        AstralEntity::from_parts(Soloon, Some(Blue), Some(Right)),
        Err(UnexpectedDirection(Soloon))
    );
}

#[test]
fn test_kind_from_str() {
    assert_eq!("polyanet".parse(), Ok(Kind::Polyanet));
    assert_eq!("Soloons".parse(), Ok(Kind::Soloon));
    assert_eq!("cometh".parse(), Ok(Kind::Cometh));
    assert_eq!(
        "planet".parse::<Kind>(),
        Err(EntityError::UnknownKind("planet".into()))
    );
}
