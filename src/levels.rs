use serde::Serialize;
use utoipa::ToSchema;

/// One bracket of the experience ladder. `max_points` is exclusive;
/// `None` marks the open-ended top tier.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LevelTier {
    pub level: i32,
    pub min_points: i64,
    pub max_points: Option<i64>,
    pub title: &'static str,
}

pub const LEVEL_TIERS: &[LevelTier] = &[
    LevelTier { level: 1, min_points: 0, max_points: Some(100), title: "Newcomer" },
    LevelTier { level: 2, min_points: 100, max_points: Some(300), title: "Scribbler" },
    LevelTier { level: 3, min_points: 300, max_points: Some(600), title: "Writer" },
    LevelTier { level: 4, min_points: 600, max_points: Some(1000), title: "Storyteller" },
    LevelTier { level: 5, min_points: 1000, max_points: Some(1500), title: "Columnist" },
    LevelTier { level: 6, min_points: 1500, max_points: Some(2500), title: "Essayist" },
    LevelTier { level: 7, min_points: 2500, max_points: Some(4000), title: "Editor" },
    LevelTier { level: 8, min_points: 4000, max_points: Some(6000), title: "Author" },
    LevelTier { level: 9, min_points: 6000, max_points: Some(9000), title: "Luminary" },
    LevelTier { level: 10, min_points: 9000, max_points: None, title: "Legend" },
];

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LevelProgress {
    pub current_level: LevelTier,
    pub next_level: Option<LevelTier>,
    pub percent: i32,
    pub points_into_level: i64,
    pub points_needed_for_level: Option<i64>,
}

/// Looks up the tier containing `points`. Inputs below the floor of the
/// table clamp to the first tier.
pub fn level_of(points: i64) -> &'static LevelTier {
    for tier in LEVEL_TIERS {
        match tier.max_points {
            Some(max) if points < max => {
                if points >= tier.min_points {
                    return tier;
                }
                // below the floor
                return &LEVEL_TIERS[0];
            }
            Some(_) => continue,
            None => return tier,
        }
    }
    // unreachable while the last tier is unbounded
    &LEVEL_TIERS[0]
}

pub fn progress_of(points: i64) -> LevelProgress {
    let current = level_of(points);
    let next = LEVEL_TIERS.get(current.level as usize); // levels are 1-based

    match (current.max_points, next) {
        (Some(max), Some(next_tier)) => {
            let span = max - current.min_points;
            let into = (points - current.min_points).max(0);
            LevelProgress {
                current_level: current.clone(),
                next_level: Some(next_tier.clone()),
                percent: ((into * 100) / span) as i32,
                points_into_level: into,
                points_needed_for_level: Some(max - points.max(current.min_points)),
            }
        }
        _ => LevelProgress {
            current_level: current.clone(),
            next_level: None,
            percent: 100,
            points_into_level: points - current.min_points,
            points_needed_for_level: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_are_contiguous() {
        for pair in LEVEL_TIERS.windows(2) {
            assert_eq!(pair[0].max_points, Some(pair[1].min_points));
            assert_eq!(pair[0].level + 1, pair[1].level);
        }
        assert_eq!(LEVEL_TIERS.last().unwrap().max_points, None);
    }

    #[test]
    fn test_level_of_bounds() {
        for points in [0i64, 1, 99, 100, 299, 300, 8999, 9000, 1_000_000] {
            let tier = level_of(points);
            assert!(tier.min_points <= points);
            if let Some(max) = tier.max_points {
                assert!(points < max);
            }
        }
    }

    #[test]
    fn test_level_of_clamps_below_floor() {
        assert_eq!(level_of(-50).level, 1);
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_of(0).level, 1);
        assert_eq!(level_of(99).level, 1);
        assert_eq!(level_of(100).level, 2);
        assert_eq!(level_of(110).level, 2);
        assert_eq!(level_of(9000).level, 10);
    }

    #[test]
    fn test_progress_monotone_within_tier() {
        let mut last = -1;
        for points in 100..300 {
            let p = progress_of(points);
            assert_eq!(p.current_level.level, 2);
            assert!(p.percent >= last);
            last = p.percent;
        }
        // resets after crossing into the next tier
        assert!(progress_of(300).percent < last);
    }

    #[test]
    fn test_progress_top_tier() {
        let p = progress_of(12_000);
        assert_eq!(p.current_level.level, 10);
        assert!(p.next_level.is_none());
        assert_eq!(p.percent, 100);
        assert_eq!(p.points_needed_for_level, None);
    }

    #[test]
    fn test_progress_counts_remaining_points() {
        let p = progress_of(110);
        assert_eq!(p.points_into_level, 10);
        assert_eq!(p.points_needed_for_level, Some(190));
        assert_eq!(p.percent, 5);
    }
}
