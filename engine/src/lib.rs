pub mod regression;
pub mod schedule;
pub mod surface;
pub mod view_tree;

pub use schedule::FrameScheduler;
pub use surface::Surface;
pub use view_tree::{ClassList, NodeId, ViewSnapshot, ViewTree};
