//! Order-independent identity for a symptom set.

/// Distinct labels in sorted order. Sorting is plain byte-wise
/// comparison; duplicates collapse because the input models a set.
pub fn distinct_labels<S: AsRef<str>>(symptoms: &[S]) -> Vec<&str> {
    let mut labels: Vec<&str> = symptoms.iter().map(|s| s.as_ref()).collect();
    labels.sort_unstable();
    labels.dedup();
    labels
}

/// Canonical lookup key for a symptom set: sorted distinct labels
/// joined with a bare comma. Two inputs with the same labels in any
/// order produce the same key.
pub fn canonical_key<S: AsRef<str>>(symptoms: &[S]) -> String {
    distinct_labels(symptoms).join(",")
}
