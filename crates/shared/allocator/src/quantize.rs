use sor_core::Quantity;

/// Candidate child quantities for one venue, ascending
///
/// Every multiple of `step` from 0 up to `cap`. With `allow_remainder`, `cap`
/// itself is appended when it is not a multiple of `step`, so a venue whose
/// remaining need or capacity is off-grid can still be taken in full.
///
/// `step` must be positive.
pub fn candidate_quantities(
    cap: Quantity,
    step: Quantity,
    allow_remainder: bool,
) -> impl Iterator<Item = Quantity> {
    debug_assert!(step > 0);
    let stride = usize::try_from(step).unwrap_or(usize::MAX);
    let remainder = (allow_remainder && cap % step != 0).then_some(cap);
    (0..=cap).step_by(stride).chain(remainder)
}
