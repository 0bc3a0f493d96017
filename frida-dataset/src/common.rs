//! Common imports from external crates.

pub use crate::error::{DatasetError, RecordIssue, Result};
pub use indexmap::{IndexMap, IndexSet};
pub use itertools::{chain, Itertools};
pub use log::{info, warn};
pub use noisy_float::types::{r64, R64};
pub use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
pub use serde::{Deserialize, Serialize};
pub use serde_json::Value;
pub use std::{
    collections::HashSet,
    fmt::{self, Debug, Display},
    fs, iter,
    path::{Path, PathBuf},
};
