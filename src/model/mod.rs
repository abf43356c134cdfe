//! # Similarity Graph Model
//!
//! Plain DTOs handed from the codec to the rendering layer.
//!
//! Design rule: nothing in here knows about byte layouts or profiles.
//! This module is pure data: no I/O, no state.

pub mod node;
pub mod link;
pub mod color;
pub mod dataset;

pub use node::{GraphNode, NodeIndex, Position};
pub use link::GraphLink;
pub use color::{Rgb, ParseColorError};
pub use dataset::GraphDataSet;
