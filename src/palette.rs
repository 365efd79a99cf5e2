// src/palette.rs

/// An sRGB color as three bytes, shared by the window and the PNG export.
pub type Rgb = [u8; 3];

pub const EMPTY: Rgb = [0xff, 0xff, 0xff];
pub const WALL: Rgb = [0x00, 0x00, 0x00];
pub const START: Rgb = [0x4c, 0xaf, 0x50];
pub const END: Rgb = [0xff, 0x00, 0x00];
/// Closed A* nodes.
pub const VISITED: Rgb = [0x56, 0x2b, 0x19];
/// Nodes sitting in the open set.
pub const FRONTIER: Rgb = [0x3a, 0x0c, 0xa3];
pub const PATH: Rgb = [68, 255, 0];
/// The node being expanded.
pub const CURRENT: Rgb = [0xf7, 0x25, 0x85];
/// Neighbors inspected during the latest expansion.
pub const NEIGHBOR: Rgb = [0x72, 0x09, 0xb7];
pub const GRID_LINE: Rgb = [0x7c, 0x7b, 0x7b];
