/// Return the run ids of `priority` that are present in `present`, in
/// priority order.
///
/// A run passes when:
/// * it appears in the priority list → kept, at its priority position
/// * it is present in the data but not in the list → dropped from this pass
/// * it is listed but absent from the data → skipped
///
/// A run listed twice is emitted once, at its first position.
pub fn ordered_runs<S: AsRef<str>>(priority: &[String], present: &[S]) -> Vec<String> {
    let mut ordered: Vec<String> = Vec::new();
    for run in priority {
        if ordered.contains(run) {
            continue;
        }
        if present.iter().any(|p| p.as_ref() == run) {
            ordered.push(run.clone());
        }
    }
    ordered
}
