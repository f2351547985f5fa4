/// How a staff reader's limit differs from the base rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffRelaxation {
    /// Shorter cooldowns and windows: `max(1, base / 2)`.
    Halve,
    /// Larger caps: `base * 2`.
    Double,
}

impl StaffRelaxation {
    pub const fn apply(self, base: i32) -> i32 {
        match self {
            Self::Halve => {
                let halved = base / 2;
                if halved < 1 { 1 } else { halved }
            }
            Self::Double => base.saturating_mul(2),
        }
    }
}

/// The limit that actually applies to a reader.
///
/// Every staff adjustment in the rulebook goes through here.
pub const fn effective_for_reader(base: i32, is_staff: bool, relaxation: StaffRelaxation) -> i32 {
    if is_staff { relaxation.apply(base) } else { base }
}
