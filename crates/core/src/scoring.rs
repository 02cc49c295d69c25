//! Claim point calculation.

use serde::Serialize;

use crate::error::CoreError;

/// Flat bonus for the first user to complete a task. Applied before the
/// rarity multiplier.
pub const FIRST_COMPLETION_BONUS: i32 = 25;

/// Flat bonus when the event category is one of the user's top favorites.
/// Applied after the rarity multiplier and never multiplied.
pub const FAVORITE_CATEGORY_BONUS: i32 = 5;

/// Points awarded for a successful claim, or `None` if the award does not
/// fit in an `i32`.
///
/// Order matters: first-completion bonus, then multiplier (floored), then
/// favorite bonus.
pub fn compute_task_points(
    base_points: i32,
    is_first: bool,
    rarity_multiplier: f64,
    is_favorite_category: bool,
) -> Option<i32> {
    let mut points = i64::from(base_points);

    if is_first {
        points += i64::from(FIRST_COMPLETION_BONUS);
    }

    let scaled = (points as f64 * rarity_multiplier).floor();
    if !(0.0..=f64::from(i32::MAX)).contains(&scaled) {
        return None;
    }
    let mut points = scaled as i64;

    if is_favorite_category {
        points += i64::from(FAVORITE_CATEGORY_BONUS);
    }

    i32::try_from(points).ok()
}

/// Points for a claim, pre-computed for both outcomes of the first-completion
/// race. The store picks one once the atomic append tells it whether this
/// claim produced the first completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClaimAward {
    pub if_first: i32,
    pub otherwise: i32,
}

impl ClaimAward {
    pub fn new(
        base_points: i32,
        rarity_multiplier: f64,
        is_favorite_category: bool,
    ) -> Result<Self, CoreError> {
        let points = |is_first| {
            compute_task_points(base_points, is_first, rarity_multiplier, is_favorite_category)
                .ok_or_else(|| {
                    CoreError::Internal(format!(
                        "Award for {base_points} base points (x{rarity_multiplier}) overflows"
                    ))
                })
        };
        Ok(Self {
            if_first: points(true)?,
            otherwise: points(false)?,
        })
    }

    pub fn points(&self, is_first: bool) -> i32 {
        if is_first {
            self.if_first
        } else {
            self.otherwise
        }
    }
}
