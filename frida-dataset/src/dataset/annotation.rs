use super::*;
use crate::common::*;

/// Where the annotation records are read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AnnotationSource {
    /// One JSON array per camera at `<root>/<dir>/<segment>/<camera>/<file_name>`.
    PerCamera {
        #[serde(default = "default_annotations_dir")]
        dir: PathBuf,
        #[serde(default = "default_annotation_file_name")]
        file_name: String,
    },
    /// A single JSON file at `<root>/<file>` that maps segment, camera and
    /// person to a list of frame names.
    Combined { file: PathBuf },
}

impl Default for AnnotationSource {
    fn default() -> Self {
        Self::PerCamera {
            dir: default_annotations_dir(),
            file_name: default_annotation_file_name(),
        }
    }
}

impl AnnotationSource {
    /// Prepare the annotation provider for the dataset at `root`.
    pub fn open(&self, root: &Path) -> Result<Box<dyn AnnotationProvider>> {
        let provider: Box<dyn AnnotationProvider> = match self {
            Self::PerCamera { dir, file_name } => {
                Box::new(CameraAnnotations::new(root.join(dir), file_name.clone()))
            }
            Self::Combined { file } => Box::new(CombinedAnnotations::open(root.join(file))?),
        };
        Ok(provider)
    }
}

/// One annotation entry: a frame of a person.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationRecord {
    pub file_name: String,
    pub person_id: u64,
}

/// The decoded annotations of one segment and camera.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnnotationFile {
    /// Valid records in source order.
    pub records: Vec<AnnotationRecord>,
    /// Records that were skipped.
    pub issues: Vec<RecordIssue>,
}

impl AnnotationFile {
    fn push(
        &mut self,
        segment: &str,
        camera: &str,
        index: usize,
        result: Result<AnnotationRecord, String>,
    ) {
        match result {
            Ok(record) => self.records.push(record),
            Err(reason) => self.issues.push(RecordIssue {
                segment: segment.to_owned(),
                camera: camera.to_owned(),
                index,
                reason,
            }),
        }
    }
}

/// The source of per-camera annotation records.
pub trait AnnotationProvider
where
    Self: Debug,
{
    /// Load the records of a segment and camera.
    fn load(&self, segment: &str, camera: &str) -> Result<AnnotationFile>;
}

/// Annotations stored in one file per segment and camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraAnnotations {
    dir: PathBuf,
    file_name: String,
}

impl CameraAnnotations {
    pub fn new(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
        }
    }

    pub fn file_path(&self, segment: &str, camera: &str) -> PathBuf {
        self.dir.join(segment).join(camera).join(&self.file_name)
    }
}

impl AnnotationProvider for CameraAnnotations {
    fn load(&self, segment: &str, camera: &str) -> Result<AnnotationFile> {
        let path = self.file_path(segment, camera);
        if !path.is_file() {
            return Err(DatasetError::MissingAnnotationFile { path });
        }

        let values: Vec<Value> = read_json(&path)?;
        let mut file = AnnotationFile::default();
        values.iter().enumerate().for_each(|(index, value)| {
            file.push(segment, camera, index, decode_record(value));
        });

        Ok(file)
    }
}

/// Annotations of all segments and cameras stored in one nested file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedAnnotations {
    path: PathBuf,
    entries: IndexMap<String, IndexMap<String, IndexMap<String, Vec<Value>>>>,
}

impl CombinedAnnotations {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DatasetError::MissingAnnotationFile {
                path: path.to_owned(),
            });
        }
        let entries = read_json(path)?;

        Ok(Self {
            path: path.to_owned(),
            entries,
        })
    }
}

impl AnnotationProvider for CombinedAnnotations {
    fn load(&self, segment: &str, camera: &str) -> Result<AnnotationFile> {
        let persons = self
            .entries
            .get(segment)
            .and_then(|cameras| cameras.get(camera))
            .ok_or_else(|| DatasetError::MissingAnnotationEntry {
                path: self.path.clone(),
                segment: segment.to_owned(),
                camera: camera.to_owned(),
            })?;

        let mut file = AnnotationFile::default();
        let frames = persons
            .iter()
            .flat_map(|(person_key, frames)| frames.iter().map(move |frame| (person_key, frame)));

        frames.enumerate().for_each(|(index, (person_key, frame))| {
            let result = parse_person_key(person_key).and_then(|person_id| {
                Ok(AnnotationRecord {
                    file_name: name_field("frame", frame)?,
                    person_id,
                })
            });
            file.push(segment, camera, index, result);
        });

        Ok(file)
    }
}

fn decode_record(value: &Value) -> Result<AnnotationRecord, String> {
    let object = value
        .as_object()
        .ok_or_else(|| format!("expect a JSON object, but found {}", value))?;

    let file_name = match (object.get("file_name"), object.get("image_id")) {
        (Some(name), _) => name_field("file_name", name)?,
        (None, Some(id)) => name_field("image_id", id)?,
        (None, None) => return Err("missing 'file_name' or 'image_id' field".into()),
    };
    let person_id = match object.get("person_id") {
        Some(Value::Number(number)) => number
            .as_u64()
            .ok_or_else(|| format!("person id {} is not a non-negative integer", number))?,
        Some(Value::String(key)) => parse_person_key(key)?,
        Some(other) => return Err(format!("unexpected person id {}", other)),
        None => return Err("missing 'person_id' field".into()),
    };

    Ok(AnnotationRecord {
        file_name,
        person_id,
    })
}

fn name_field(field: &str, value: &Value) -> Result<String, String> {
    match value {
        Value::String(name) if !name.is_empty() => Ok(name.clone()),
        Value::Number(number) if number.is_u64() => Ok(number.to_string()),
        other => Err(format!("unexpected '{}' value {}", field, other)),
    }
}

fn parse_person_key(key: &str) -> Result<u64, String> {
    key.trim()
        .parse()
        .map_err(|_| format!("person id {:?} is not a non-negative integer", key))
}

fn default_annotations_dir() -> PathBuf {
    PathBuf::from("Annotations")
}

fn default_annotation_file_name() -> String {
    "annotations.json".into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_valid_records() {
        let record = decode_record(&json!({"file_name": "a.jpg", "person_id": 1})).unwrap();
        assert_eq!(
            record,
            AnnotationRecord {
                file_name: "a.jpg".into(),
                person_id: 1
            }
        );

        let record = decode_record(&json!({"image_id": 42, "person_id": "0007"})).unwrap();
        assert_eq!(record.file_name, "42");
        assert_eq!(record.person_id, 7);

        // file_name wins over image_id
        let record =
            decode_record(&json!({"file_name": "b.jpg", "image_id": "c.jpg", "person_id": 2}))
                .unwrap();
        assert_eq!(record.file_name, "b.jpg");
    }

    #[test]
    fn decode_malformed_records() {
        for value in [
            json!([1, 2]),
            json!({"person_id": 1}),
            json!({"file_name": "a.jpg"}),
            json!({"file_name": "", "person_id": 1}),
            json!({"file_name": "a.jpg", "person_id": -3}),
            json!({"file_name": "a.jpg", "person_id": 1.5}),
            json!({"file_name": "a.jpg", "person_id": "abc"}),
            json!({"file_name": "a.jpg", "person_id": null}),
        ] {
            assert!(decode_record(&value).is_err(), "{} should be rejected", value);
        }
    }

    #[test]
    fn combined_annotation_order() {
        // parsed from text so that the key order of the file is kept
        let text = r#"{
            "1": {
                "2": {
                    "9": ["f3.jpg", "f1.jpg"],
                    "bad": ["f2.jpg"],
                    "4": ["f0.jpg"]
                }
            }
        }"#;
        let entries: IndexMap<String, IndexMap<String, IndexMap<String, Vec<Value>>>> =
            serde_json::from_str(text).unwrap();
        let annotations = CombinedAnnotations {
            path: "annotations.json".into(),
            entries,
        };

        let file = annotations.load("1", "2").unwrap();
        let names: Vec<_> = file
            .records
            .iter()
            .map(|record| (record.person_id, record.file_name.as_str()))
            .collect();
        assert_eq!(names, [(9, "f3.jpg"), (9, "f1.jpg"), (4, "f0.jpg")]);
        assert_eq!(file.issues.len(), 1);
        assert_eq!(file.issues[0].index, 2);

        assert!(matches!(
            annotations.load("1", "3"),
            Err(DatasetError::MissingAnnotationEntry { .. })
        ));
    }
}
