use super::*;
use crate::{common::*, config::LayoutConfig};

/// Whether consecutive records of a person are merged into one tracklet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupingPolicy {
    /// Every record is a tracklet of its own.
    None,
    /// Consecutive records of the same person within one segment and camera
    /// form one tracklet.
    ByPersonAndCamera,
}

impl Default for GroupingPolicy {
    fn default() -> Self {
        Self::None
    }
}

/// The annotation records of one segment and camera.
#[derive(Debug, Clone, Copy)]
pub struct CameraPass<'a> {
    pub segment: &'a str,
    pub camera: &'a str,
    pub camera_index: usize,
    pub records: &'a [AnnotationRecord],
}

/// Turn annotation records into tracklets.
///
/// The passes must be given in segment-major, camera-minor order. The
/// output keeps that order and the record order within each pass.
pub fn build_tracklets<'a, I>(
    root: &Path,
    layout: &LayoutConfig,
    grouping: GroupingPolicy,
    passes: I,
) -> Result<Vec<Tracklet>>
where
    I: IntoIterator<Item = CameraPass<'a>>,
{
    let LayoutConfig {
        pid_width,
        ref image_dir,
        path_template,
        ..
    } = *layout;
    let mut tracklets = vec![];

    for pass in passes {
        let CameraPass {
            segment,
            camera,
            camera_index,
            records,
        } = pass;
        let mut current: Option<Tracklet> = None;

        for record in records {
            let person_id = PersonId::from_raw(record.person_id, pid_width);
            let image_path = path_template.resolve(
                root,
                image_dir,
                segment,
                &person_id,
                camera,
                &record.file_name,
            )?;
            let record = TrackletRecord {
                image_path,
                person_id,
                camera_index,
            };

            match current.as_mut() {
                Some(tracklet)
                    if grouping == GroupingPolicy::ByPersonAndCamera
                        && tracklet.person_id() == &record.person_id =>
                {
                    tracklet.push(record);
                }
                _ => tracklets.extend(current.replace(Tracklet::singleton(record))),
            }
        }

        tracklets.extend(current);
    }

    Ok(tracklets)
}

/// Drop tracklets with fewer than `min_seq_len` records.
pub fn retain_min_len(mut tracklets: Vec<Tracklet>, min_seq_len: usize) -> Vec<Tracklet> {
    tracklets.retain(|tracklet| tracklet.len() >= min_seq_len);
    tracklets
}
