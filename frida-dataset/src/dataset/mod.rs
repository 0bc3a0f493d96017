//! Tracklet indexing toolkit.

mod annotation;
mod builder;
mod frida;
mod partition;
mod path;
mod record;
mod stats;
mod subset;
mod utils;

pub use annotation::*;
pub use builder::*;
pub use frida::*;
pub use partition::*;
pub use path::*;
pub use record::*;
pub use stats::*;
pub use subset::*;
pub use utils::*;
