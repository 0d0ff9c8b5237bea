use serde::{Deserialize, Serialize};

/// An unordered pair of distinct pattern ids, always stored smaller id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimilarityPair {
	low: i64,
	high: i64,
}
impl SimilarityPair {
	/// Returns `None` for a self-pair.
	pub fn new(a: i64, b: i64) -> Option<Self> {
		match a.cmp(&b) {
			std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
			std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
			std::cmp::Ordering::Equal => None,
		}
	}

	pub fn low(&self) -> i64 {
		self.low
	}

	pub fn high(&self) -> i64 {
		self.high
	}

	/// The member of the pair that is not `id`, if `id` is a member.
	pub fn other(&self, id: i64) -> Option<i64> {
		if self.low == id {
			Some(self.high)
		} else if self.high == id {
			Some(self.low)
		} else {
			None
		}
	}
}

/// Clamps a similarity score into `0.0..=1.0`. Non-finite scores map to zero.
pub fn clamp_score(score: f32) -> f32 {
	if score.is_finite() { score.clamp(0.0, 1.0) } else { 0.0 }
}
