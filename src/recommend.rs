//! # Topic Recommender
//! Taxonomy-driven, multi-pass recommendation builder.
//!
//! Passes run in fixed priority; earlier picks block later duplicates through
//! a running set of selected topics (keyed by normalized text):
//!
//! 1. reinforcement  : last 2 weak topics, most recent first  → `recommended`
//! 2. mastery        : last 2 strong topics, most recent first → `continue`
//! 3. interests      : profile interests in order, fills `recommended` up to 6
//! 4. challenge      : every strong topic, "Advanced: " prefix, max 2
//! 5. explore        : categories outside the interests, first topic, max 3
//!
//! Within a pass, order follows input order; there is no numeric ranking.

use std::collections::HashSet;

use crate::normalize::normalize;
use crate::profile::{
    LearningProfile, PerformanceHistory, RecommendationCategory, TopicRecommendation,
};
use crate::taxonomy::{Taxonomy, TopicCategory};

pub const MAX_RECOMMENDED: usize = 6;
pub const MAX_CHALLENGE: usize = 2;
pub const MAX_EXPLORE: usize = 3;
const RECENT_SIGNALS: usize = 2;
pub const CHALLENGE_PREFIX: &str = "Advanced: ";

/// Running state shared by all passes of one call.
struct Builder<'a> {
    completed: Vec<String>,
    selected: HashSet<String>,
    out: Vec<TopicRecommendation>,
    taxonomy: &'a Taxonomy,
}

impl<'a> Builder<'a> {
    fn new(taxonomy: &'a Taxonomy, completed_topics: &[String]) -> Self {
        Self {
            completed: completed_topics.iter().map(|t| t.to_lowercase()).collect(),
            selected: HashSet::new(),
            out: Vec::new(),
            taxonomy,
        }
    }

    /// Substring match: a course titled "Intro to Black Holes" completes
    /// the topic "Black Holes".
    fn is_completed(&self, topic: &str) -> bool {
        let t = topic.to_lowercase();
        !t.is_empty() && self.completed.iter().any(|title| title.contains(&t))
    }

    fn is_selected(&self, topic: &str) -> bool {
        self.selected.contains(&normalize(topic))
    }

    fn is_available(&self, topic: &str) -> bool {
        !self.is_completed(topic) && !self.is_selected(topic)
    }

    fn first_available(&self, cat: &'a TopicCategory) -> Option<&'a str> {
        cat.topics
            .iter()
            .map(String::as_str)
            .find(|t| self.is_available(t))
    }

    fn count(&self, category: RecommendationCategory) -> usize {
        self.out.iter().filter(|r| r.category == category).count()
    }

    fn push(
        &mut self,
        topic: &str,
        display: String,
        reason: String,
        icon: &str,
        category: RecommendationCategory,
    ) {
        self.selected.insert(normalize(topic));
        self.out.push(TopicRecommendation {
            topic: display,
            reason,
            icon: icon.to_string(),
            category,
        });
    }

    fn reinforcement(&mut self, weak_topics: &[String]) {
        let taxonomy = self.taxonomy;
        for weak in weak_topics.iter().rev().take(RECENT_SIGNALS) {
            if self.count(RecommendationCategory::Recommended) >= MAX_RECOMMENDED {
                break;
            }
            let Some(cat) = taxonomy.resolve_category(weak) else {
                continue;
            };
            if let Some(topic) = self.first_available(cat) {
                self.push(
                    topic,
                    topic.to_string(),
                    format!("Focused practice to strengthen your {weak} skills"),
                    &cat.icon,
                    RecommendationCategory::Recommended,
                );
            }
        }
    }

    fn mastery_extension(&mut self, strong_topics: &[String]) {
        let taxonomy = self.taxonomy;
        for strong in strong_topics.iter().rev().take(RECENT_SIGNALS) {
            let Some(cat) = taxonomy.resolve_category(strong) else {
                continue;
            };
            if let Some(topic) = self.first_available(cat) {
                self.push(
                    topic,
                    topic.to_string(),
                    format!("A natural next step after mastering {strong}"),
                    &cat.icon,
                    RecommendationCategory::Continue,
                );
            }
        }
    }

    fn interests(&mut self, interests: &[String]) {
        let taxonomy = self.taxonomy;
        'outer: for interest in interests {
            let Some(cat) = taxonomy.resolve_category(interest) else {
                continue;
            };
            for topic in &cat.topics {
                if self.count(RecommendationCategory::Recommended) >= MAX_RECOMMENDED {
                    break 'outer;
                }
                if !self.is_available(topic) {
                    continue;
                }
                self.push(
                    topic,
                    topic.clone(),
                    format!("Because you're interested in {}", cat.key),
                    &cat.icon,
                    RecommendationCategory::Recommended,
                );
            }
        }
    }

    fn challenge(&mut self, strong_topics: &[String]) {
        let taxonomy = self.taxonomy;
        for strong in strong_topics {
            if self.count(RecommendationCategory::Challenge) >= MAX_CHALLENGE {
                break;
            }
            let Some(cat) = taxonomy.resolve_category(strong) else {
                continue;
            };
            if let Some(topic) = self.first_available(cat) {
                self.push(
                    topic,
                    format!("{CHALLENGE_PREFIX}{topic}"),
                    format!("You're excelling at {strong}; ready for a challenge?"),
                    &cat.icon,
                    RecommendationCategory::Challenge,
                );
            }
        }
    }

    fn explore(&mut self, interests: &[String]) {
        let taxonomy = self.taxonomy;
        let interest_keys: Vec<&str> = interests
            .iter()
            .filter_map(|i| taxonomy.resolve_category(i))
            .map(|c| c.key.as_str())
            .collect();

        for cat in taxonomy.categories() {
            if self.count(RecommendationCategory::Explore) >= MAX_EXPLORE {
                break;
            }
            if interest_keys.contains(&cat.key.as_str()) {
                continue;
            }
            let Some(topic) = cat.topics.iter().find(|t| !self.is_selected(t)) else {
                continue;
            };
            self.push(
                topic,
                topic.clone(),
                format!("Explore something new in {}", cat.key),
                &cat.icon,
                RecommendationCategory::Explore,
            );
        }
    }
}

/// Build the recommendation list. Never fails; sparse input just yields
/// fewer items.
pub fn recommend(
    taxonomy: &Taxonomy,
    profile: &LearningProfile,
    performance: &PerformanceHistory,
    completed_topics: &[String],
) -> Vec<TopicRecommendation> {
    let mut b = Builder::new(taxonomy, completed_topics);
    b.reinforcement(&performance.weak_topics);
    b.mastery_extension(&performance.strong_topics);
    b.interests(&profile.interests);
    b.challenge(&performance.strong_topics);
    b.explore(&profile.interests);
    b.out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(interests: &[&str]) -> LearningProfile {
        LearningProfile {
            interests: interests.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn perf(strong: &[&str], weak: &[&str]) -> PerformanceHistory {
        PerformanceHistory {
            strong_topics: strong.iter().map(|s| s.to_string()).collect(),
            weak_topics: weak.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn of(recs: &[TopicRecommendation], c: RecommendationCategory) -> Vec<&str> {
        recs.iter()
            .filter(|r| r.category == c)
            .map(|r| r.topic.as_str())
            .collect()
    }

    #[test]
    fn empty_inputs_only_explore() {
        let t = Taxonomy::builtin();
        let recs = recommend(t, &profile(&[]), &PerformanceHistory::default(), &[]);
        assert_eq!(
            of(&recs, RecommendationCategory::Explore),
            vec!["Volcanoes", "Black Holes", "Ocean Animals"]
        );
        assert_eq!(recs.len(), 3);
    }

    #[test]
    fn reinforcement_comes_first_most_recent_weak_first() {
        let t = Taxonomy::builtin();
        let recs = recommend(
            t,
            &profile(&[]),
            &perf(&[], &["dinosaurs", "fractions", "volcanoes"]),
            &[],
        );
        // last two weak topics, newest first: volcanoes (science), fractions (math)
        assert_eq!(recs[0].topic, "Volcanoes");
        assert_eq!(recs[0].category, RecommendationCategory::Recommended);
        assert!(recs[0].reason.contains("volcanoes"));
        assert_eq!(recs[1].topic, "Fractions");
        assert_eq!(recs[1].icon, "➗");
    }

    #[test]
    fn mastery_extension_uses_continue_and_skips_completed() {
        let t = Taxonomy::builtin();
        let recs = recommend(
            t,
            &profile(&[]),
            &perf(&["black holes"], &[]),
            &["Exploring Black Holes".to_string()],
        );
        let cont = of(&recs, RecommendationCategory::Continue);
        assert_eq!(cont, vec!["The Solar System"]);
        // challenge picks the next free space topic
        assert_eq!(
            of(&recs, RecommendationCategory::Challenge),
            vec!["Advanced: The Moon"]
        );
    }

    #[test]
    fn interests_fill_up_to_six_recommended() {
        let t = Taxonomy::builtin();
        let recs = recommend(t, &profile(&["space", "animals"]), &PerformanceHistory::default(), &[]);
        let rec = of(&recs, RecommendationCategory::Recommended);
        assert_eq!(rec.len(), MAX_RECOMMENDED);
        assert!(recs
            .iter()
            .filter(|r| r.category == RecommendationCategory::Recommended)
            .all(|r| r.reason.contains("space")));
        // explore skips the interest categories
        assert_eq!(
            of(&recs, RecommendationCategory::Explore),
            vec!["Volcanoes", "Ancient Egypt", "Fractions"]
        );
    }

    #[test]
    fn challenge_is_capped_and_prefixed() {
        let t = Taxonomy::builtin();
        let recs = recommend(
            t,
            &profile(&[]),
            &perf(&["volcanoes", "fractions", "dinosaurs", "poetry"], &[]),
            &[],
        );
        let ch = of(&recs, RecommendationCategory::Challenge);
        assert_eq!(ch.len(), MAX_CHALLENGE);
        assert!(ch.iter().all(|t| t.starts_with(CHALLENGE_PREFIX)));
    }

    #[test]
    fn no_duplicate_normalized_topics() {
        let t = Taxonomy::builtin();
        let recs = recommend(
            t,
            &profile(&["science", "space", "SCIENCE"]),
            &perf(&["volcanoes", "magnets"], &["the water cycle", "photosynthesis"]),
            &[],
        );
        let mut seen = HashSet::new();
        for r in &recs {
            let key = normalize(r.topic.trim_start_matches(CHALLENGE_PREFIX));
            assert!(seen.insert(key), "duplicate topic {}", r.topic);
        }
    }

    #[test]
    fn unresolvable_signals_are_ignored() {
        let t = Taxonomy::builtin();
        let recs = recommend(
            t,
            &profile(&["zzz"]),
            &perf(&["qwerty"], &["xyzzy"]),
            &[],
        );
        assert!(recs
            .iter()
            .all(|r| r.category == RecommendationCategory::Explore));
    }
}
