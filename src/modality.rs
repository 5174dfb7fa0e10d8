//! # Modality Ranker
//! Blends stated preference with measured performance into a total order
//! over the four modalities. Pure, no I/O.
//!
//! affinity = 0.6 × measured score (+ 40 if the learner listed the modality).

use crate::profile::{LearningProfile, Modality, PerformanceHistory};

const PERFORMANCE_WEIGHT: f64 = 0.6;
/// 0.4 × 100, granted flat for a stated preference.
const PREFERENCE_BONUS: f64 = 40.0;

/// Affinity of one modality for this learner.
pub fn affinity(profile: &LearningProfile, performance: &PerformanceHistory, m: Modality) -> f64 {
    let measured = performance.modality_score(m).min(100) as f64;
    let bonus = if profile.prefers(m) {
        PREFERENCE_BONUS
    } else {
        0.0
    };
    PERFORMANCE_WEIGHT * measured + bonus
}

/// All four modalities, highest affinity first. Ties keep declaration
/// order (visual, reading, handson, listening).
pub fn rank(profile: &LearningProfile, performance: &PerformanceHistory) -> Vec<Modality> {
    let mut scored: Vec<(Modality, f64)> = Modality::ALL
        .iter()
        .map(|m| (*m, affinity(profile, performance, *m)))
        .collect();
    // Stable sort keeps declaration order for equal scores.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().map(|(m, _)| m).collect()
}

/// The two modalities the prompt should lean on.
pub fn top_two(profile: &LearningProfile, performance: &PerformanceHistory) -> [Modality; 2] {
    let r = rank(profile, performance);
    [r[0], r[1]]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(styles: &[Modality]) -> LearningProfile {
        LearningProfile {
            learning_styles: styles.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn baseline_ties_follow_declaration_order() {
        let r = rank(&profile(&[]), &PerformanceHistory::default());
        assert_eq!(r, Modality::ALL.to_vec());
    }

    #[test]
    fn stated_preference_lifts_a_modality() {
        let r = rank(
            &profile(&[Modality::Listening]),
            &PerformanceHistory::default(),
        );
        assert_eq!(r[0], Modality::Listening);
        assert_eq!(&r[1..], &[Modality::Visual, Modality::Reading, Modality::Handson]);
    }

    #[test]
    fn strong_measurement_can_beat_preference() {
        // handson: 0.6 * 100 = 60; reading preferred: 0.6 * 20 + 40 = 52
        let perf = PerformanceHistory {
            handson_score: 100,
            reading_score: 20,
            visual_score: 10,
            listening_score: 10,
            ..Default::default()
        };
        let r = rank(&profile(&[Modality::Reading]), &perf);
        assert_eq!(r[0], Modality::Handson);
        assert_eq!(r[1], Modality::Reading);
    }

    #[test]
    fn output_is_a_permutation() {
        let perf = PerformanceHistory {
            visual_score: 33,
            reading_score: 90,
            handson_score: 33,
            listening_score: 71,
            ..Default::default()
        };
        let p = profile(&[Modality::Visual, Modality::Handson]);
        let r = rank(&p, &perf);
        assert_eq!(r.len(), 4);
        for m in Modality::ALL {
            assert_eq!(r.iter().filter(|x| **x == m).count(), 1);
        }
        assert_eq!(r, rank(&p, &perf));
        assert_eq!(top_two(&p, &perf), [r[0], r[1]]);
    }
}
