use engine::{ClassList, NodeId, Surface};

use crate::position::position_class;
use crate::snapshot::{Tile, Transition};

pub const DEFAULT_SUPER_TILE_THRESHOLD: u32 = 2048;

/// Index of the position class inside a tile's class list.
const POSITION_SLOT: usize = 2;

/// A position change deferred to the next redraw cycle.
///
/// Creating a node and moving it in the same frame does not animate, so a moved tile is first
/// committed at its previous position and only then given its final one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettleTile {
    pub node: NodeId,
    pub classes: ClassList,
}

#[derive(Debug, Clone, Copy)]
pub struct TileRenderer {
    super_threshold: u32,
}

impl Default for TileRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_SUPER_TILE_THRESHOLD)
    }
}

impl TileRenderer {
    pub fn new(super_threshold: u32) -> Self {
        Self { super_threshold }
    }

    /// Base classes for `tile` drawn at the position its transition starts from.
    pub fn base_classes(&self, tile: &Tile) -> ClassList {
        let start = match tile.transition() {
            Transition::Moved { from } => from,
            Transition::New | Transition::Merged => tile.position(),
        };
        let mut classes = ClassList::from_names([
            "tile".to_string(),
            format!("tile-{}", tile.value),
            position_class(start),
        ]);
        if tile.value > self.super_threshold {
            classes.push("tile-super");
        }
        classes
    }

    /// Appends `tile` (and, for merges, its sources) under `container`.
    ///
    /// Returns the repositioning work that must run on the following redraw cycle.
    pub fn render<S: Surface>(
        &self,
        surface: &mut S,
        container: NodeId,
        tile: &Tile,
    ) -> Vec<SettleTile> {
        let mut settles = Vec::new();
        self.render_into(surface, container, tile, &mut settles);
        settles
    }

    fn render_into<S: Surface>(
        &self,
        surface: &mut S,
        container: NodeId,
        tile: &Tile,
        settles: &mut Vec<SettleTile>,
    ) {
        let mut classes = self.base_classes(tile);
        match tile.transition() {
            Transition::Moved { .. } => {
                let node = self.append(surface, container, tile, &classes);
                classes.replace(POSITION_SLOT, position_class(tile.position()));
                settles.push(SettleTile { node, classes });
            }
            Transition::Merged => {
                // Sources go in first so they slide in underneath the result.
                for source in tile.merged_from.iter().flatten() {
                    self.render_into(surface, container, source, settles);
                }
                classes.push("tile-merged");
                self.append(surface, container, tile, &classes);
            }
            Transition::New => {
                classes.push("tile-new");
                self.append(surface, container, tile, &classes);
            }
        }
    }

    fn append<S: Surface>(
        &self,
        surface: &mut S,
        container: NodeId,
        tile: &Tile,
        classes: &ClassList,
    ) -> NodeId {
        let wrapper = surface.create_node(container, classes.clone());
        surface.create_text_node(
            wrapper,
            ClassList::from_names(["tile-inner"]),
            &tile.value.to_string(),
        );
        wrapper
    }
}
