use super::*;
use crate::common::*;

/// The directory order of image files below the image directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathTemplate {
    /// `<segment>/<person>/<camera>/<file>`
    SegmentPersonCamera,
    /// `<segment>/<camera>/<person>/<file>`
    SegmentCameraPerson,
    /// `<segment>/<camera>/<file>`, used by the combined annotation file.
    SegmentCamera,
}

impl Default for PathTemplate {
    fn default() -> Self {
        Self::SegmentPersonCamera
    }
}

impl PathTemplate {
    /// Build the image path of a detection. The file itself is not checked.
    pub fn resolve(
        &self,
        root: &Path,
        image_dir: &Path,
        segment: &str,
        person_id: &PersonId,
        camera: &str,
        file_name: &str,
    ) -> Result<PathBuf> {
        check_component("segment", segment)?;
        check_component("person", person_id.as_str())?;
        check_component("camera", camera)?;
        check_component("file name", file_name)?;

        let base = if image_dir.as_os_str().is_empty() {
            root.to_owned()
        } else {
            root.join(image_dir)
        };

        let dir = match self {
            Self::SegmentPersonCamera => base.join(segment).join(person_id.as_str()).join(camera),
            Self::SegmentCameraPerson => base.join(segment).join(camera).join(person_id.as_str()),
            Self::SegmentCamera => base.join(segment).join(camera),
        };

        Ok(dir.join(file_name))
    }
}

/// Reject values that cannot be used as a single path component.
pub fn check_component(component: &'static str, value: &str) -> Result<()> {
    let is_valid = !value.is_empty()
        && value != "."
        && value != ".."
        && !value.contains(|c| c == '/' || c == '\\');

    if is_valid {
        Ok(())
    } else {
        Err(DatasetError::InvalidPathComponent {
            component,
            value: value.to_owned(),
        })
    }
}
