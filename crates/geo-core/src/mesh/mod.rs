//! Passive mesh container types with no associated operations, used to hand
//! triangulation or CSG output to other collaborators in whichever layout
//! they expect.

pub mod heds;
pub mod ifs;

pub use heds::Heds;
pub use ifs::Ifs;
