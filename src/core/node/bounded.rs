/// Upper clamp of every projected node count.
pub const MAX_NODES: i64 = i64::MAX;

/// Saturating add of `a` and `b` that ignores negative operands.
///
/// Summing costs with this function prevents a query from overflowing the
/// total and slipping under the limit, and keeps declarations that return
/// negative values from cancelling out legitimate cost.
pub fn bounded_add(a: i64, b: i64) -> i64 {
    match (a < 0, b < 0) {
        (true, true) => 1,
        (true, false) => b,
        (false, true) => a,
        (false, false) => a.checked_add(b).unwrap_or(MAX_NODES),
    }
}

/// Saturating multiply of `a` and `b` that ignores negative operands.
///
/// A zero multiplier means "no multiplier" and leaves `b` unchanged.
pub fn bounded_multiply(a: i64, b: i64) -> i64 {
    let a = if a == 0 { 1 } else { a };

    if a < 0 {
        if b <= 0 {
            0
        } else {
            b
        }
    } else if b <= 0 {
        a
    } else {
        a.checked_mul(b).unwrap_or(MAX_NODES)
    }
}
