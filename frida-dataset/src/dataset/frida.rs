use super::*;
use crate::{common::*, config::DatasetConfig};
use rand::Rng;

/// The tracklet index of a FRIDA dataset copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FridaDataset {
    root: PathBuf,
    segments: Vec<String>,
    cameras: Vec<String>,
    partition: Partition,
    train: Subset,
    test: Subset,
    query: Subset,
    gallery: Subset,
    issues: Vec<RecordIssue>,
}

impl FridaDataset {
    /// Build the index, seeding the identity split from `config.seed`.
    pub fn load(config: &DatasetConfig) -> Result<Self> {
        let mut rng = split_rng(config.seed);
        Self::load_with_rng(config, &mut rng)
    }

    /// Build the index with an explicit random source for the identity split.
    pub fn load_with_rng<R>(config: &DatasetConfig, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        config.validate()?;

        let DatasetConfig {
            ref data_root,
            ref segments,
            ref cameras,
            min_seq_len,
            ref split,
            grouping,
            strict,
            ref layout,
            ..
        } = *config;

        // check the root before parsing anything
        if !data_root.is_dir() {
            return Err(DatasetError::DatasetRootNotFound {
                path: data_root.clone(),
            });
        }

        // load annotations
        let provider = layout.annotations.open(data_root)?;
        let files: Vec<_> = segments
            .iter()
            .cartesian_product(cameras.iter().enumerate())
            .map(|(segment, (camera_index, camera))| -> Result<_> {
                let file = provider.load(segment, camera)?;
                Ok((segment, camera_index, camera, file))
            })
            .try_collect()?;

        let issues: Vec<RecordIssue> = files
            .iter()
            .flat_map(|(_, _, _, file)| file.issues.iter().cloned())
            .collect();
        if strict {
            if let Some(issue) = issues.first() {
                return Err(issue.clone().into());
            }
        }
        issues.iter().for_each(|issue| warn!("skip {}", issue));

        // build tracklets
        let tracklets = {
            let passes = files
                .iter()
                .map(|(segment, camera_index, camera, file)| CameraPass {
                    segment,
                    camera,
                    camera_index: *camera_index,
                    records: &file.records,
                });
            build_tracklets(data_root, layout, grouping, passes)?
        };

        // split identities, then drop short tracklets
        let partition = Partition::new(tracklets.iter().map(Tracklet::person_id), split, rng)?;
        let (train, test) = partition.split(tracklets);
        let train = retain_min_len(train, min_seq_len);
        let test = retain_min_len(test, min_seq_len);
        let (query, gallery) = split_query_gallery(&test);

        let dataset = Self {
            root: data_root.clone(),
            segments: segments.clone(),
            cameras: cameras.clone(),
            partition,
            train: Subset::new(SubsetKind::Train, train),
            test: Subset::new(SubsetKind::Test, test),
            query: Subset::new(SubsetKind::Query, query),
            gallery: Subset::new(SubsetKind::Gallery, gallery),
            issues,
        };

        info!(
            "FRIDA loaded from '{}': {} train ids, {} test ids, {} skipped records",
            dataset.root.display(),
            dataset.partition.train_ids().len(),
            dataset.partition.test_ids().len(),
            dataset.issues.len()
        );
        dataset.summary().iter().for_each(|row| {
            info!(
                "{:8} | {:5} ids | {:8} tracklets",
                row.name, row.num_ids, row.num_tracklets
            );
        });

        Ok(dataset)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn cameras(&self) -> &[String] {
        &self.cameras
    }

    pub fn num_cameras(&self) -> usize {
        self.cameras.len()
    }

    /// The identity assignment over all loaded identities, including those
    /// whose tracklets were all dropped by the length filter.
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Annotation records that were skipped while loading.
    pub fn issues(&self) -> &[RecordIssue] {
        &self.issues
    }

    pub fn train(&self) -> &Subset {
        &self.train
    }

    pub fn test(&self) -> &Subset {
        &self.test
    }

    pub fn query(&self) -> &Subset {
        &self.query
    }

    pub fn gallery(&self) -> &Subset {
        &self.gallery
    }

    pub fn subset(&self, kind: SubsetKind) -> &Subset {
        match kind {
            SubsetKind::Train => &self.train,
            SubsetKind::Test => &self.test,
            SubsetKind::Query => &self.query,
            SubsetKind::Gallery => &self.gallery,
        }
    }

    /// Statistics rows of all subsets followed by a `total` row over train and test.
    pub fn summary(&self) -> Vec<SummaryRow> {
        let rows = SubsetKind::ALL.into_iter().map(|kind| {
            let subset = self.subset(kind);
            SummaryRow {
                name: kind.name(),
                num_ids: subset.num_ids(),
                num_tracklets: subset.num_tracklets(),
                stats: subset.stats().ok(),
            }
        });

        let total = {
            let lengths: Vec<_> = chain!(self.train.lengths(), self.test.lengths()).collect();
            let num_ids = self.train.num_ids() + self.test.num_ids();
            SummaryRow {
                name: "total",
                num_ids,
                num_tracklets: lengths.len(),
                stats: SubsetStats::new(&lengths, num_ids),
            }
        };

        rows.chain(iter::once(total)).collect()
    }
}

/// One line of the dataset summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub name: &'static str,
    pub num_ids: usize,
    pub num_tracklets: usize,
    /// `None` if the row has no tracklets.
    pub stats: Option<SubsetStats>,
}
