use crate::snapshot::Position;

/// Grid coordinates as the stylesheet sees them (1-based).
pub fn normalize(pos: Position) -> Position {
    Position::new(pos.x + 1, pos.y + 1)
}

pub fn position_class(pos: Position) -> String {
    let pos = normalize(pos);
    format!("tile-position-{}-{}", pos.x, pos.y)
}
