use std::collections::BTreeMap;

use super::model::BeamDataset;

/// Exact-match corrections for mislabeled groups: wrong label → canonical.
pub type LabelCorrections = BTreeMap<String, String>;

/// Canonical spelling of `label`, or `label` itself when no entry matches.
pub fn correct_label<'a>(label: &'a str, corrections: &'a LabelCorrections) -> &'a str {
    corrections.get(label).map(String::as_str).unwrap_or(label)
}

/// Rewrite every sample's group label and rebuild the label index.
///
/// A corrected label that equals an existing one merges both into a single
/// group, in the position where the first of them appeared.
pub fn apply_corrections(dataset: BeamDataset, corrections: &LabelCorrections) -> BeamDataset {
    if corrections.is_empty() {
        return dataset;
    }
    let BeamDataset {
        mut samples,
        coerced_cells,
        ..
    } = dataset;

    let mut rewritten = 0usize;
    for s in &mut samples {
        let fixed = correct_label(&s.group, corrections);
        if fixed != s.group {
            s.group = fixed.to_string();
            rewritten += 1;
        }
    }
    if rewritten > 0 {
        log::info!("Corrected {rewritten} group label(s)");
    }

    BeamDataset::from_samples(samples, coerced_cells)
}
