use crate::common::*;

/// The canonical person identifier, a zero-padded decimal string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    /// Pad the raw id to `width` digits. Longer ids are kept as is.
    pub fn from_raw(raw: u64, width: usize) -> Self {
        Self(format!("{:0width$}", raw, width = width))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PersonId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One detection of a person in one camera frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackletRecord {
    pub image_path: PathBuf,
    pub person_id: PersonId,
    /// The position of the camera in the configured camera list.
    pub camera_index: usize,
}

/// A non-empty sequence of records of the same person.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tracklet {
    records: Vec<TrackletRecord>,
}

impl Tracklet {
    pub fn singleton(record: TrackletRecord) -> Self {
        Self {
            records: vec![record],
        }
    }

    /// Returns `None` if `records` is empty or mixes persons.
    pub fn new(records: Vec<TrackletRecord>) -> Option<Self> {
        let first = records.first()?;
        records
            .iter()
            .all(|record| record.person_id == first.person_id)
            .then(|| Self { records })
    }

    pub fn records(&self) -> &[TrackletRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<TrackletRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn person_id(&self) -> &PersonId {
        &self.records[0].person_id
    }

    pub fn image_paths(&self) -> impl Iterator<Item = &Path> {
        self.records.iter().map(|record| record.image_path.as_path())
    }

    /// The camera index shared by all records, or `None` if the tracklet spans cameras.
    pub fn single_camera(&self) -> Option<usize> {
        let camera_index = self.records[0].camera_index;
        self.records
            .iter()
            .all(|record| record.camera_index == camera_index)
            .then(|| camera_index)
    }

    pub(crate) fn push(&mut self, record: TrackletRecord) {
        debug_assert_eq!(&record.person_id, self.person_id());
        self.records.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, pid: u64, camera_index: usize) -> TrackletRecord {
        TrackletRecord {
            image_path: path.into(),
            person_id: PersonId::from_raw(pid, 2),
            camera_index,
        }
    }

    #[test]
    fn person_id_padding() {
        assert_eq!(PersonId::from_raw(7, 2).as_str(), "07");
        assert_eq!(PersonId::from_raw(7, 8).as_str(), "00000007");
        assert_eq!(PersonId::from_raw(123, 2).as_str(), "123");
        assert_eq!(PersonId::from_raw(0, 3).to_string(), "000");
        assert!(PersonId::from_raw(9, 2) < PersonId::from_raw(10, 2));
    }

    #[test]
    fn tracklet_construction() {
        assert!(Tracklet::new(vec![]).is_none());
        assert!(Tracklet::new(vec![record("a.jpg", 1, 0), record("b.jpg", 2, 0)]).is_none());

        let tracklet = Tracklet::new(vec![record("a.jpg", 1, 0), record("b.jpg", 1, 1)]).unwrap();
        assert_eq!(tracklet.len(), 2);
        assert_eq!(tracklet.person_id().as_str(), "01");
        assert_eq!(tracklet.single_camera(), None);
        assert_eq!(
            tracklet.image_paths().collect::<Vec<_>>(),
            [Path::new("a.jpg"), Path::new("b.jpg")]
        );

        let tracklet = Tracklet::singleton(record("c.jpg", 3, 2));
        assert_eq!(tracklet.single_camera(), Some(2));
        assert_eq!(tracklet.into_records().len(), 1);
    }
}
