use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Sample – one row of the source table
// ---------------------------------------------------------------------------

/// A single angle/intensity measurement.
///
/// Cells that could not be parsed as numbers are stored as `f64::NAN`, the
/// missing marker that propagates through every later computation.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Group ("Field of View") label.
    pub group: String,
    /// Run identifier.
    pub run: String,
    /// Angle in degrees.
    pub angle: f64,
    /// Intensity in counts.
    pub intensity: f64,
}

// ---------------------------------------------------------------------------
// Run – all samples of one (group, run) pair
// ---------------------------------------------------------------------------

/// How samples are laid out when a [`Run`] is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOrder {
    /// Stable sort by ascending angle, missing angles last.
    Angle,
    /// Keep the row order of the input table.
    Input,
}

/// One measurement sweep.  `angles` and `intensities` always have the same
/// length.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub id: String,
    pub angles: Vec<f64>,
    pub intensities: Vec<f64>,
}

impl Run {
    fn from_points(id: String, mut points: Vec<(f64, f64)>, order: SampleOrder) -> Self {
        if order == SampleOrder::Angle {
            // Missing angles last; `sort_by` is stable so ties keep row order.
            points.sort_by(|a, b| a.0.is_nan().cmp(&b.0.is_nan()).then(a.0.total_cmp(&b.0)));
        }
        let (angles, intensities) = points.into_iter().unzip();
        Run {
            id,
            angles,
            intensities,
        }
    }
}

// ---------------------------------------------------------------------------
// Group – runs sharing a label
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub label: String,
    /// Runs in first-appearance order.
    pub runs: Vec<Run>,
}

// ---------------------------------------------------------------------------
// BeamDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed label order.
#[derive(Debug, Clone, Default)]
pub struct BeamDataset {
    /// All samples in file order.
    pub samples: Vec<Sample>,
    /// Unique group labels in first-appearance order.
    pub group_labels: Vec<String>,
    /// Number of numeric cells that failed to parse during load.
    pub coerced_cells: usize,
}

impl BeamDataset {
    /// Build the label index from the loaded samples.
    pub fn from_samples(samples: Vec<Sample>, coerced_cells: usize) -> Self {
        let mut group_labels: Vec<String> = Vec::new();
        for s in &samples {
            if !group_labels.contains(&s.group) {
                group_labels.push(s.group.clone());
            }
        }
        BeamDataset {
            samples,
            group_labels,
            coerced_cells,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Partition samples into groups and runs, both in first-appearance
    /// order.  Every returned run holds at least one sample.
    pub fn groups(&self, order: SampleOrder) -> Vec<Group> {
        let mut by_group: BTreeMap<&str, Vec<(&str, Vec<(f64, f64)>)>> = BTreeMap::new();
        for s in &self.samples {
            let runs = by_group.entry(s.group.as_str()).or_default();
            match runs.iter_mut().find(|(id, _)| *id == s.run) {
                Some((_, points)) => points.push((s.angle, s.intensity)),
                None => runs.push((s.run.as_str(), vec![(s.angle, s.intensity)])),
            }
        }

        self.group_labels
            .iter()
            .filter_map(|label| {
                let runs = by_group.remove(label.as_str())?;
                Some(Group {
                    label: label.clone(),
                    runs: runs
                        .into_iter()
                        .map(|(id, points)| Run::from_points(id.to_string(), points, order))
                        .collect(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(group: &str, run: &str, angle: f64, intensity: f64) -> Sample {
        Sample {
            group: group.to_string(),
            run: run.to_string(),
            angle,
            intensity,
        }
    }

    fn run_ids(group: &Group) -> Vec<&str> {
        group.runs.iter().map(|r| r.id.as_str()).collect()
    }

    fn run<'a>(group: &'a Group, id: &str) -> &'a Run {
        group.runs.iter().find(|r| r.id == id).unwrap()
    }

    fn dataset() -> BeamDataset {
        BeamDataset::from_samples(
            vec![
                sample("FoV 2", "Run 1", 10.0, 3.0),
                sample("FoV 1", "Run 2", 0.0, 1.0),
                sample("FoV 2", "Run 1", -10.0, 4.0),
                sample("FoV 1", "Run 1", 5.0, 2.0),
                sample("FoV 2", "Run 3", f64::NAN, 7.0),
                sample("FoV 2", "Run 3", 20.0, 8.0),
            ],
            1,
        )
    }

    #[test]
    fn labels_keep_first_appearance_order() {
        assert_eq!(dataset().group_labels, vec!["FoV 2", "FoV 1"]);
    }

    #[test]
    fn runs_keep_first_appearance_order() {
        let groups = dataset().groups(SampleOrder::Input);
        assert_eq!(run_ids(&groups[0]), vec!["Run 1", "Run 3"]);
        assert_eq!(run_ids(&groups[1]), vec!["Run 2", "Run 1"]);
    }

    #[test]
    fn angle_order_sorts_and_puts_missing_angles_last() {
        let groups = dataset().groups(SampleOrder::Angle);
        let run1 = run(&groups[0], "Run 1");
        assert_eq!(run1.angles, vec![-10.0, 10.0]);
        assert_eq!(run1.intensities, vec![4.0, 3.0]);

        let run3 = run(&groups[0], "Run 3");
        assert_eq!(run3.angles[0], 20.0);
        assert!(run3.angles[1].is_nan());
        assert_eq!(run3.intensities, vec![8.0, 7.0]);
    }

    #[test]
    fn input_order_is_untouched() {
        let groups = dataset().groups(SampleOrder::Input);
        let run1 = run(&groups[0], "Run 1");
        assert_eq!(run1.angles, vec![10.0, -10.0]);
    }

    #[test]
    fn empty_dataset_has_no_groups() {
        let ds = BeamDataset::from_samples(Vec::new(), 0);
        assert!(ds.is_empty());
        assert!(ds.groups(SampleOrder::Angle).is_empty());
    }
}
