// tests/invariants.rs
//
// Seeded random sweeps over the engine. Deterministic: fixed seeds only.

use rand::{rngs::StdRng, Rng, SeedableRng};

use adaptive_learning_engine::profile::{RECENT_SCORES_WINDOW, TOPIC_MEMORY};
use adaptive_learning_engine::updater::apply;
use adaptive_learning_engine::{
    difficulty, modality, recommend, standing, Difficulty, LearningProfile, Modality,
    PerformanceHistory, QuizResult, RecommendationCategory, Taxonomy,
};

const TOPICS: &[&str] = &[
    "Volcanoes", "Fractions", "Black Holes", "Magnets", "Dinosaurs", "Geometry", "Poetry",
    "Robotics", "Photosynthesis",
];

fn random_quiz(rng: &mut StdRng) -> QuizResult {
    let m = Modality::ALL[rng.random_range(0..Modality::ALL.len())];
    let topic = TOPICS[rng.random_range(0..TOPICS.len())];
    // occasionally out of range; the updater clamps
    let score = if rng.random_bool(0.05) {
        rng.random_range(101..=250)
    } else {
        rng.random_range(0..=100)
    };
    QuizResult::new(score, m, topic)
}

fn random_profile(rng: &mut StdRng) -> LearningProfile {
    let styles = Modality::ALL
        .iter()
        .copied()
        .filter(|_| rng.random_bool(0.4))
        .collect();
    let keys: Vec<String> = Taxonomy::builtin()
        .categories()
        .iter()
        .map(|c| c.key.clone())
        .collect();
    let interests = keys.into_iter().filter(|_| rng.random_bool(0.2)).collect();
    LearningProfile {
        age: rng.random_range(5..=40),
        learning_styles: styles,
        interests,
        ..Default::default()
    }
}

fn step_distance(a: Difficulty, b: Difficulty) -> i32 {
    (a as i32 - b as i32).abs()
}

#[test]
fn updater_keeps_every_snapshot_in_bounds() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..40 {
        let mut perf = PerformanceHistory::default();
        for _ in 0..60 {
            let quiz = random_quiz(&mut rng);
            let streak = rng.random_range(0..30);
            let ratio = rng.random_range(0.0..1.0);
            let next = apply(&perf, &quiz, Some(streak), Some(ratio));

            for m in Modality::ALL {
                assert!(next.modality_score(m) <= 100);
            }
            assert!(next.average_quiz_score <= 100);
            assert!(next.tier_score <= 100);
            assert_eq!(next.total_lessons_completed, perf.total_lessons_completed + 1);
            assert!(next.recent_quiz_scores.len() <= RECENT_SCORES_WINDOW);
            assert!(next.recent_quiz_scores.iter().all(|s| *s <= 100));
            assert!(next.strong_topics.len() <= TOPIC_MEMORY);
            assert!(next.weak_topics.len() <= TOPIC_MEMORY);
            assert!(
                next.strong_topics
                    .iter()
                    .all(|s| !next.weak_topics.contains(s)),
                "strong and weak overlap: {:?} / {:?}",
                next.strong_topics,
                next.weak_topics
            );
            assert!(step_distance(perf.current_difficulty, next.current_difficulty) <= 1);
            assert_eq!(
                next.learner_tier,
                standing::tier_for(next.tier_score),
                "tier must follow the score"
            );

            perf = next;
        }
    }
}

#[test]
fn too_few_lessons_never_change_difficulty() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let mut perf = PerformanceHistory {
            current_difficulty: match rng.random_range(0..3) {
                0 => Difficulty::Beginner,
                1 => Difficulty::Intermediate,
                _ => Difficulty::Advanced,
            },
            total_lessons_completed: rng.random_range(0..3),
            average_quiz_score: rng.random_range(0..=100),
            ..Default::default()
        };
        perf.recent_quiz_scores = (0..rng.random_range(0..=5))
            .map(|_| rng.random_range(0..=100))
            .collect();

        let d = difficulty::decide(&perf);
        assert_eq!(d.difficulty, perf.current_difficulty);
        assert_eq!(d.reason, "insufficient sample");
    }
}

#[test]
fn ranking_is_always_a_permutation() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..300 {
        let profile = random_profile(&mut rng);
        let perf = PerformanceHistory {
            visual_score: rng.random_range(0..=100),
            reading_score: rng.random_range(0..=100),
            handson_score: rng.random_range(0..=100),
            listening_score: rng.random_range(0..=100),
            ..Default::default()
        };
        let ranked = modality::rank(&profile, &perf);
        assert_eq!(ranked.len(), 4);
        for m in Modality::ALL {
            assert!(ranked.contains(&m));
        }
        for pair in ranked.windows(2) {
            assert!(
                modality::affinity(&profile, &perf, pair[0])
                    >= modality::affinity(&profile, &perf, pair[1])
            );
        }
    }
}

#[test]
fn recommendations_respect_caps_and_never_repeat() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..200 {
        let profile = random_profile(&mut rng);
        let mut perf = PerformanceHistory::default();
        for _ in 0..rng.random_range(0..12) {
            perf = apply(&perf, &random_quiz(&mut rng), None, None);
        }
        let completed: Vec<String> = TOPICS
            .iter()
            .filter(|_| rng.random_bool(0.3))
            .map(|t| t.to_string())
            .collect();

        let recs = recommend::recommend(Taxonomy::builtin(), &profile, &perf, &completed);
        let count = |c: RecommendationCategory| recs.iter().filter(|r| r.category == c).count();
        assert!(count(RecommendationCategory::Recommended) <= recommend::MAX_RECOMMENDED);
        assert!(count(RecommendationCategory::Challenge) <= recommend::MAX_CHALLENGE);
        assert!(count(RecommendationCategory::Explore) <= recommend::MAX_EXPLORE);

        let mut seen = std::collections::HashSet::new();
        for r in &recs {
            let base = r
                .topic
                .trim_start_matches(recommend::CHALLENGE_PREFIX)
                .to_lowercase();
            assert!(seen.insert(base), "duplicate {:?} in {:?}", r.topic, recs);
        }
    }
}
