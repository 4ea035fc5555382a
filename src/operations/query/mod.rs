mod visibility;

pub use visibility::{InvisibleEdges, VisibleEdges};
