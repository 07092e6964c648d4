use std::cmp::Ordering;

use crate::utils::seq_nr_offset;

/// A 32-bit TCP sequence number. Comparisons follow serial number arithmetic, so
/// ordering survives wrap-around as long as the two numbers are less than 2^31 apart.
#[derive(PartialEq, Eq, Clone, Copy, Default, Hash)]
pub struct SeqNr(pub u32);

impl std::fmt::Debug for SeqNr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::ops::Add<u32> for SeqNr {
    type Output = SeqNr;

    fn add(self, rhs: u32) -> Self::Output {
        Self(self.0.wrapping_add(rhs))
    }
}

impl std::ops::Sub<SeqNr> for SeqNr {
    type Output = i64;

    fn sub(self, rhs: SeqNr) -> Self::Output {
        seq_nr_offset(self.0, rhs.0)
    }
}

impl std::ops::AddAssign<u32> for SeqNr {
    fn add_assign(&mut self, rhs: u32) {
        *self = *self + rhs;
    }
}

impl std::cmp::PartialOrd for SeqNr {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for SeqNr {
    fn cmp(&self, other: &Self) -> Ordering {
        let offset = *self - *other;
        offset.cmp(&0)
    }
}
