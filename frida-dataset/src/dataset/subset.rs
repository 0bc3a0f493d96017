use super::*;
use crate::common::*;

/// The name of a subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SubsetKind {
    Train,
    Test,
    Query,
    Gallery,
}

impl SubsetKind {
    pub const ALL: [SubsetKind; 4] = [Self::Train, Self::Test, Self::Query, Self::Gallery];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Test => "test",
            Self::Query => "query",
            Self::Gallery => "gallery",
        }
    }
}

impl Display for SubsetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named, immutable list of tracklets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subset {
    kind: SubsetKind,
    tracklets: Vec<Tracklet>,
}

impl Subset {
    pub fn new(kind: SubsetKind, tracklets: Vec<Tracklet>) -> Self {
        Self { kind, tracklets }
    }

    pub fn kind(&self) -> SubsetKind {
        self.kind
    }

    pub fn tracklets(&self) -> &[Tracklet] {
        &self.tracklets
    }

    pub fn is_empty(&self) -> bool {
        self.tracklets.is_empty()
    }

    pub fn num_tracklets(&self) -> usize {
        self.tracklets.len()
    }

    /// Distinct identities in order of first appearance.
    pub fn person_ids(&self) -> IndexSet<&PersonId> {
        self.tracklets.iter().map(Tracklet::person_id).collect()
    }

    pub fn num_ids(&self) -> usize {
        self.person_ids().len()
    }

    /// The number of records of each tracklet.
    pub fn lengths(&self) -> Vec<usize> {
        self.tracklets.iter().map(Tracklet::len).collect()
    }

    /// Group tracklets by identity, in order of first appearance.
    pub fn by_person(&self) -> IndexMap<&PersonId, Vec<&Tracklet>> {
        let mut groups: IndexMap<_, Vec<_>> = IndexMap::new();
        self.tracklets.iter().for_each(|tracklet| {
            groups
                .entry(tracklet.person_id())
                .or_default()
                .push(tracklet)
        });
        groups
    }

    /// Fails with [DatasetError::EmptySubset] if there are no tracklets.
    pub fn stats(&self) -> Result<SubsetStats> {
        SubsetStats::new(&self.lengths(), self.num_ids())
            .ok_or(DatasetError::EmptySubset { subset: self.kind })
    }
}
