//! Derived statistics over the current review collection.
//!
//! Recomputed in full whenever the feed changes. Every input rating goes
//! through the read-time clamp, so a stored out-of-range value contributes
//! its clamped value to both the average and the histogram.

use crate::model::review::Review;

/// Summary numbers backing the dashboard. Ephemeral, never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution {
    pub total: usize,
    /// Mean of clamped ratings, rounded to one decimal (half away from
    /// zero). 0.0 when the collection is empty.
    pub average: f64,
    /// Occurrence counts for 1..=5 stars; index 0 holds the 1-star bucket.
    pub histogram: [usize; 5],
    pub recommend_count: usize,
}

impl Distribution {
    /// Count for one star bucket. Out-of-range `star` values return 0.
    pub fn stars(&self, star: u8) -> usize {
        match star {
            1..=5 => self.histogram[usize::from(star) - 1],
            _ => 0,
        }
    }

    /// Share of recommenders as a whole percentage, 0 when empty.
    pub fn recommend_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.recommend_count as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// Computes the distribution for the given collection.
pub fn distribution(reviews: &[Review]) -> Distribution {
    let mut histogram = [0usize; 5];
    let mut sum: u64 = 0;
    let mut recommend_count = 0usize;

    for review in reviews {
        let stars = review.clamped_rating();
        histogram[usize::from(stars) - 1] += 1;
        sum += u64::from(stars);
        if review.recommends() {
            recommend_count += 1;
        }
    }

    let total = reviews.len();
    let average = if total == 0 {
        0.0
    } else {
        (sum as f64 / total as f64 * 10.0).round() / 10.0
    };

    Distribution {
        total,
        average,
        histogram,
        recommend_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::review::Role;
    use rstest::rstest;

    fn review(id: &str, rating: i32, recommend: Option<bool>) -> Review {
        Review {
            id: id.to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
            name: "Asha".to_string(),
            role: Role::Student,
            rating,
            experience: None,
            reliability_rating: None,
            would_recommend: recommend,
            security_issues: None,
            bugs_glitches: None,
            database_issues: None,
            feature_requests: None,
            ui_ux_feedback: None,
            other_feedback: None,
        }
    }

    #[test]
    fn empty_collection_yields_zeroes_not_an_error() {
        let dist = distribution(&[]);
        assert_eq!(dist.total, 0);
        assert_eq!(dist.average, 0.0);
        assert_eq!(dist.histogram, [0, 0, 0, 0, 0]);
        assert_eq!(dist.recommend_count, 0);
        assert_eq!(dist.recommend_percent(), 0);
    }

    #[test]
    fn single_review_round_trip() {
        let dist = distribution(&[review("r1", 4, None)]);
        assert_eq!(dist.total, 1);
        assert_eq!(dist.average, 4.0);
        assert_eq!(dist.histogram, [0, 0, 0, 1, 0]);
    }

    #[rstest]
    #[case(&[4, 5], 4.5)]
    #[case(&[1, 2], 1.5)]
    #[case(&[2, 2, 5], 3.0)]
    // 13/4 = 3.25 must round half away from zero, not truncate.
    #[case(&[3, 3, 3, 4], 3.3)]
    #[case(&[1, 1, 2], 1.3)]
    fn average_rounds_to_one_decimal(#[case] ratings: &[i32], #[case] expected: f64) {
        let reviews: Vec<Review> = ratings
            .iter()
            .enumerate()
            .map(|(i, &r)| review(&format!("id{i}"), r, None))
            .collect();
        assert_eq!(distribution(&reviews).average, expected);
    }

    #[test]
    fn out_of_range_rating_aggregates_as_clamped() {
        let dist = distribution(&[review("r1", 7, None), review("r2", -2, None)]);
        assert_eq!(dist.average, 3.0); // (5 + 1) / 2
        assert_eq!(dist.stars(5), 1);
        assert_eq!(dist.stars(1), 1);
    }

    #[test]
    fn histogram_buckets_sum_to_total() {
        let reviews: Vec<Review> = [5, 5, 4, 3, 1, 7, 0]
            .iter()
            .enumerate()
            .map(|(i, &r)| review(&format!("id{i}"), r, None))
            .collect();
        let dist = distribution(&reviews);
        assert_eq!(dist.histogram.iter().sum::<usize>(), dist.total);
    }

    #[test]
    fn recommend_count_is_a_predicate_count() {
        let reviews = vec![
            review("a", 5, Some(true)),
            review("b", 4, Some(false)),
            review("c", 3, None),
            review("d", 5, Some(true)),
        ];
        let dist = distribution(&reviews);
        assert_eq!(dist.recommend_count, 2);
        assert_eq!(dist.recommend_percent(), 50);
    }
}
