use super::*;
use crate::common::*;
use rand::Rng;

/// The camera index whose test records form the query subset.
pub const QUERY_CAMERA_INDEX: usize = 0;

/// The number of identities that go to the train subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SplitPolicy {
    /// A fixed number of train identities.
    NumTrainIds { num_train_ids: usize },
    /// A fraction of all identities in the open interval (0, 1), rounded to
    /// the nearest count.
    Ratio { split_ratio: R64 },
}

impl SplitPolicy {
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::NumTrainIds { .. } => Ok(()),
            Self::Ratio { split_ratio } => {
                if split_ratio > 0.0 && split_ratio < 1.0 {
                    Ok(())
                } else {
                    Err(DatasetError::InvalidConfig(format!(
                        "split_ratio must be in range (0, 1), but get {}",
                        split_ratio
                    )))
                }
            }
        }
    }

    /// The number of train identities out of `num_ids` identities.
    pub fn num_train_ids(&self, num_ids: usize) -> Result<usize> {
        let num_train_ids = match *self {
            Self::NumTrainIds { num_train_ids } => num_train_ids,
            Self::Ratio { split_ratio } => (split_ratio.raw() * num_ids as f64).round() as usize,
        };

        if num_train_ids > num_ids {
            return Err(DatasetError::InvalidSplit {
                requested: num_train_ids,
                available: num_ids,
            });
        }

        Ok(num_train_ids)
    }
}

/// Create the random source of the identity split.
///
/// Without a seed the generator is seeded from the OS, and the split varies
/// across runs.
pub fn split_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// The assignment of person identities to the train and test subsets.
///
/// Each identity belongs to exactly one side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    train_ids: IndexSet<PersonId>,
    test_ids: IndexSet<PersonId>,
}

impl Partition {
    /// Randomly pick train identities out of `ids` according to `policy`.
    ///
    /// The identities are sorted before shuffling, so the result only
    /// depends on the identity set and the state of `rng`.
    pub fn new<'a, I, R>(ids: I, policy: &SplitPolicy, rng: &mut R) -> Result<Self>
    where
        I: IntoIterator<Item = &'a PersonId>,
        R: Rng + ?Sized,
    {
        let mut ids: Vec<PersonId> = ids.into_iter().unique().cloned().sorted().collect();
        let num_train_ids = policy.num_train_ids(ids.len())?;

        ids.shuffle(rng);
        let test_ids = ids.split_off(num_train_ids);
        let train_ids = ids;

        Ok(Self {
            train_ids: train_ids.into_iter().sorted().collect(),
            test_ids: test_ids.into_iter().sorted().collect(),
        })
    }

    pub fn train_ids(&self) -> &IndexSet<PersonId> {
        &self.train_ids
    }

    pub fn test_ids(&self) -> &IndexSet<PersonId> {
        &self.test_ids
    }

    pub fn num_ids(&self) -> usize {
        self.train_ids.len() + self.test_ids.len()
    }

    pub fn is_train(&self, person_id: &PersonId) -> bool {
        self.train_ids.contains(person_id)
    }

    /// Split tracklets into train and test lists, keeping their order.
    pub fn split(&self, tracklets: Vec<Tracklet>) -> (Vec<Tracklet>, Vec<Tracklet>) {
        tracklets
            .into_iter()
            .partition(|tracklet| self.is_train(tracklet.person_id()))
    }
}

/// Split test tracklets into query and gallery lists by camera.
///
/// Tracklets recorded by one camera are routed whole. A tracklet that spans
/// cameras is first flattened into one singleton tracklet per record.
pub fn split_query_gallery(test: &[Tracklet]) -> (Vec<Tracklet>, Vec<Tracklet>) {
    let mut query = vec![];
    let mut gallery = vec![];

    let mut route = |tracklet: Tracklet, camera_index: usize| {
        if camera_index == QUERY_CAMERA_INDEX {
            query.push(tracklet);
        } else {
            gallery.push(tracklet);
        }
    };

    for tracklet in test {
        match tracklet.single_camera() {
            Some(camera_index) => route(tracklet.clone(), camera_index),
            None => tracklet.records().iter().for_each(|record| {
                route(Tracklet::singleton(record.clone()), record.camera_index);
            }),
        }
    }

    (query, gallery)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<PersonId> {
        raw.iter().map(|&id| PersonId::from_raw(id, 2)).collect()
    }

    fn record(pid: u64, camera_index: usize) -> TrackletRecord {
        TrackletRecord {
            image_path: format!("{}_{}.jpg", pid, camera_index).into(),
            person_id: PersonId::from_raw(pid, 2),
            camera_index,
        }
    }

    #[test]
    fn train_count_from_policy() -> Result<()> {
        let policy = SplitPolicy::NumTrainIds { num_train_ids: 3 };
        assert_eq!(policy.num_train_ids(5)?, 3);
        assert!(matches!(
            policy.num_train_ids(2),
            Err(DatasetError::InvalidSplit {
                requested: 3,
                available: 2
            })
        ));

        let policy = SplitPolicy::Ratio {
            split_ratio: r64(0.5),
        };
        assert_eq!(policy.num_train_ids(5)?, 3);
        assert_eq!(policy.num_train_ids(4)?, 2);
        assert_eq!(policy.num_train_ids(0)?, 0);

        assert!(SplitPolicy::Ratio {
            split_ratio: r64(0.0)
        }
        .validate()
        .is_err());
        assert!(SplitPolicy::Ratio {
            split_ratio: r64(0.3)
        }
        .validate()
        .is_ok());

        Ok(())
    }

    #[test]
    fn partition_is_disjoint_and_complete() -> Result<()> {
        let all_ids = ids(&[5, 1, 3, 1, 4, 2, 5, 6, 7, 8]);
        let policy = SplitPolicy::NumTrainIds { num_train_ids: 4 };
        let partition = Partition::new(&all_ids, &policy, &mut split_rng(None))?;

        assert_eq!(partition.train_ids().len(), 4);
        assert_eq!(partition.test_ids().len(), 4);
        assert_eq!(partition.num_ids(), 8);
        assert!(partition.train_ids().is_disjoint(partition.test_ids()));

        let union: HashSet<_> = partition
            .train_ids()
            .iter()
            .chain(partition.test_ids())
            .collect();
        let expect: HashSet<_> = all_ids.iter().collect();
        assert_eq!(union, expect);

        Ok(())
    }

    #[test]
    fn seeded_partition_is_reproducible() -> Result<()> {
        let all_ids = ids(&(0..50u64).collect::<Vec<_>>());
        let reversed: Vec<_> = all_ids.iter().rev().cloned().collect();
        let policy = SplitPolicy::Ratio {
            split_ratio: r64(0.3),
        };

        let lhs = Partition::new(&all_ids, &policy, &mut split_rng(Some(42)))?;
        let rhs = Partition::new(&reversed, &policy, &mut split_rng(Some(42)))?;
        assert_eq!(lhs, rhs);
        assert_eq!(lhs.train_ids().len(), 15);

        Ok(())
    }

    #[test]
    fn split_tracklets_by_identity() -> Result<()> {
        let tracklets: Vec<_> = [(1, 0), (2, 1), (1, 2), (3, 0)]
            .iter()
            .map(|&(pid, cam)| Tracklet::singleton(record(pid, cam)))
            .collect();
        let policy = SplitPolicy::NumTrainIds { num_train_ids: 1 };
        let partition = Partition::new(
            tracklets.iter().map(Tracklet::person_id),
            &policy,
            &mut split_rng(Some(0)),
        )?;

        let (train, test) = partition.split(tracklets);
        assert_eq!(train.len() + test.len(), 4);
        assert!(train.iter().all(|t| partition.is_train(t.person_id())));
        assert!(test.iter().all(|t| !partition.is_train(t.person_id())));

        Ok(())
    }

    #[test]
    fn query_gallery_by_camera() {
        let test = vec![
            Tracklet::singleton(record(1, 0)),
            Tracklet::singleton(record(1, 1)),
            Tracklet::new(vec![record(2, 2), record(2, 2)]).unwrap(),
            Tracklet::new(vec![record(3, 0), record(3, 0)]).unwrap(),
        ];
        let (query, gallery) = split_query_gallery(&test);

        assert_eq!(query.len() + gallery.len(), test.len());
        assert_eq!(query.len(), 2);
        assert!(query.iter().all(|t| t.single_camera() == Some(0)));
        assert!(gallery.iter().all(|t| t.single_camera() != Some(0)));
        assert_eq!(gallery[1].len(), 2);
    }

    #[test]
    fn query_gallery_flattens_cross_camera_tracklets() {
        let test = vec![Tracklet::new(vec![record(4, 0), record(4, 1), record(4, 2)]).unwrap()];
        let (query, gallery) = split_query_gallery(&test);

        assert_eq!(query.len(), 1);
        assert_eq!(gallery.len(), 2);
        assert!(query
            .iter()
            .chain(&gallery)
            .all(|tracklet| tracklet.len() == 1));
    }
}
