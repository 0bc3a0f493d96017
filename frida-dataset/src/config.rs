//! Dataset loading configuration format.

use crate::{
    common::*,
    dataset::{check_component, AnnotationSource, GroupingPolicy, PathTemplate, SplitPolicy},
};

/// The default width of zero-padded person identifiers.
pub const DEFAULT_PID_WIDTH: usize = 8;

/// The dataset loading configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// The root directory of the dataset copy.
    pub data_root: PathBuf,
    /// Segment names in traversal order.
    #[serde(default = "default_segments")]
    pub segments: Vec<String>,
    /// Camera names in traversal order.
    ///
    /// The position of a camera in this list is its camera index.
    #[serde(default = "default_cameras")]
    pub cameras: Vec<String>,
    /// Tracklets with fewer records than this are dropped.
    #[serde(default)]
    pub min_seq_len: usize,
    /// The train/test identity split.
    pub split: SplitPolicy,
    /// If set, the identity split is reproducible across runs.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub grouping: GroupingPolicy,
    /// Fail on the first malformed annotation record instead of skipping it.
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl DatasetConfig {
    /// Create a configuration with default segments, cameras and layout.
    pub fn new(data_root: impl Into<PathBuf>, split: SplitPolicy) -> Self {
        Self {
            data_root: data_root.into(),
            segments: default_segments(),
            cameras: default_cameras(),
            min_seq_len: 0,
            split,
            seed: None,
            grouping: GroupingPolicy::default(),
            strict: false,
            layout: LayoutConfig::default(),
        }
    }

    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = fs::read_to_string(path)?;
        let config: Self = json5::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the options that serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        let Self {
            ref segments,
            ref cameras,
            ref split,
            ref layout,
            ..
        } = *self;

        ensure_names("segment", segments)?;
        ensure_names("camera", cameras)?;
        split.validate()?;

        if layout.pid_width == 0 {
            return Err(DatasetError::InvalidConfig(
                "pid_width must be positive".into(),
            ));
        }

        Ok(())
    }
}

/// On-disk layout options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// The number of digits person identifiers are padded to.
    #[serde(default = "default_pid_width")]
    pub pid_width: usize,
    /// The image directory relative to the dataset root. Empty means the root itself.
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,
    #[serde(default)]
    pub path_template: PathTemplate,
    #[serde(default)]
    pub annotations: AnnotationSource,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pid_width: default_pid_width(),
            image_dir: default_image_dir(),
            path_template: PathTemplate::default(),
            annotations: AnnotationSource::default(),
        }
    }
}

fn ensure_names(kind: &'static str, names: &[String]) -> Result<()> {
    if names.is_empty() {
        return Err(DatasetError::InvalidConfig(format!(
            "at least one {} must be declared",
            kind
        )));
    }

    let unique: HashSet<_> = names.iter().collect();
    if unique.len() != names.len() {
        return Err(DatasetError::InvalidConfig(format!(
            "duplicated {} names found in {:?}",
            kind, names
        )));
    }

    names.iter().try_for_each(|name| check_component(kind, name))
}

fn default_segments() -> Vec<String> {
    (1..=4).map(|index| format!("Segment_{}", index)).collect()
}

fn default_cameras() -> Vec<String> {
    (1..=3).map(|index| format!("Camera_{}", index)).collect()
}

fn default_pid_width() -> usize {
    DEFAULT_PID_WIDTH
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("BBs")
}
