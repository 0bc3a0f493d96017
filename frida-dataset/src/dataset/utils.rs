use crate::common::*;
use serde::de::DeserializeOwned;

/// Read and parse a JSON file.
pub fn read_json<T>(path: impl AsRef<Path>) -> Result<T>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DatasetError::InvalidAnnotationFile {
        path: path.to_owned(),
        source,
    })
}
