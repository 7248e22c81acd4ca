//! Enrollment progress computation for dashboard course cards.

/// Percentage of chapters completed, 0–100.
///
/// Guards the denominator before dividing: a course with no generated
/// chapters (or one whose content has not been generated yet) reports 0%
/// rather than NaN/infinity. Completed counts above the total clamp to 100.
pub fn progress_percent(completed_chapters: usize, total_chapters: usize) -> f64 {
    if total_chapters == 0 {
        return 0.0;
    }
    let pct = completed_chapters as f64 / total_chapters as f64 * 100.0;
    pct.min(100.0)
}
