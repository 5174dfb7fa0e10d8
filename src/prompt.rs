//! Prompt assembly for the external content generator.
//!
//! Deterministic template filling: top-two modalities, the difficulty
//! decision and profile fields pick canned fragments. The JSON shape in the
//! text is a contract with the generator; callers validate what comes back.

use std::fmt::Write as _;

use crate::difficulty::{self, DifficultyDecision};
use crate::modality;
use crate::profile::{Difficulty, EnglishLevel, LearningProfile, Modality, PerformanceHistory};

/// Course shape the generator is asked to return.
pub const COURSE_JSON_SHAPE: &str = r#"{
  "title": "string",
  "description": "string",
  "lessons": [
    { "title": "string", "content": "string", "activity": "string" }
  ],
  "quiz": [
    { "question": "string", "options": ["string"], "correctAnswer": 0, "explanation": "string" }
  ]
}"#;

fn modality_instruction(m: Modality) -> &'static str {
    match m {
        Modality::Visual => {
            "Describe diagrams, charts and vivid mental images; suggest what to draw or look at."
        }
        Modality::Reading => {
            "Use well-structured explanatory text with headings, definitions and short summaries."
        }
        Modality::Handson => {
            "Include a concrete activity or experiment for each lesson that the learner can do at home."
        }
        Modality::Listening => {
            "Write in a conversational, spoken style that works well when read aloud; use rhythm and repetition."
        }
    }
}

fn age_instruction(age: u32) -> &'static str {
    match age {
        0..=7 => "The learner is a young child: use very short sentences, familiar words and a playful tone.",
        8..=12 => "The learner is a child: keep explanations simple, friendly and full of relatable examples.",
        13..=17 => "The learner is a teenager: be engaging and direct, connect ideas to real-world uses.",
        _ => "The learner is an adult: be clear and efficient, go deeper where it helps understanding.",
    }
}

fn english_instruction(level: Option<EnglishLevel>) -> Option<&'static str> {
    match level? {
        EnglishLevel::Beginner => Some(
            "The learner is a beginner in English: use basic vocabulary, present tense and short sentences.",
        ),
        EnglishLevel::Intermediate => Some(
            "The learner has intermediate English: avoid idioms and explain any uncommon word.",
        ),
        EnglishLevel::Advanced => Some("The learner has advanced English: normal vocabulary is fine."),
        EnglishLevel::Native => None,
    }
}

fn difficulty_instruction(d: Difficulty) -> &'static str {
    match d {
        Difficulty::Beginner => "Assume no prior knowledge and build up from the basics.",
        Difficulty::Intermediate => "Assume the basics are known and add detail and connections.",
        Difficulty::Advanced => "Challenge the learner with deeper concepts and multi-step reasoning.",
    }
}

/// Render the instruction string from already computed engine outputs.
pub fn build_course_prompt(
    topic: &str,
    profile: &LearningProfile,
    top_modalities: &[Modality],
    decision: &DifficultyDecision,
    weak_topics: &[String],
) -> String {
    let mut out = String::new();
    let topic = topic.trim();

    let _ = writeln!(
        out,
        "Create a short course about \"{topic}\" for a {age}-year-old learner{grade} from {country}.",
        age = profile.age,
        grade = if profile.grade_level.trim().is_empty() {
            String::new()
        } else {
            format!(" in {}", profile.grade_level.trim())
        },
        country = if profile.country.trim().is_empty() {
            "an unspecified country"
        } else {
            profile.country.trim()
        },
    );
    let _ = writeln!(out, "{}", age_instruction(profile.age));

    let language = if profile.language.trim().is_empty() {
        "English"
    } else {
        profile.language.trim()
    };
    let _ = writeln!(out, "Write all content in {language}.");
    if let Some(line) = english_instruction(profile.english_level) {
        let _ = writeln!(out, "{line}");
    }

    let _ = writeln!(
        out,
        "Difficulty: {} ({}). {}",
        decision.difficulty,
        decision.reason,
        difficulty_instruction(decision.difficulty)
    );

    if !top_modalities.is_empty() {
        let names: Vec<&str> = top_modalities.iter().map(|m| m.as_str()).collect();
        let _ = writeln!(out, "Preferred learning styles: {}.", names.join(", "));
        for m in top_modalities {
            let _ = writeln!(out, "- {}", modality_instruction(*m));
        }
    }

    if !weak_topics.is_empty() {
        let _ = writeln!(
            out,
            "The learner recently struggled with: {}. Revisit related basics where they fit.",
            weak_topics.join(", ")
        );
    }

    let _ = writeln!(
        out,
        "Include 3 to 5 lessons and a quiz of 5 multiple-choice questions."
    );
    let _ = writeln!(
        out,
        "Respond with JSON only, exactly in this shape:\n{COURSE_JSON_SHAPE}"
    );
    out
}

/// Rank, decide and render in one call.
pub fn course_prompt(
    topic: &str,
    profile: &LearningProfile,
    performance: &PerformanceHistory,
) -> String {
    let top = modality::top_two(profile, performance);
    let decision = difficulty::decide(performance);
    build_course_prompt(topic, profile, &top, &decision, &performance.weak_topics)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> LearningProfile {
        LearningProfile {
            age: 10,
            country: "Kenya".into(),
            grade_level: "Grade 5".into(),
            learning_styles: vec![Modality::Handson],
            interests: vec!["science".into()],
            language: "Swahili".into(),
            english_level: Some(EnglishLevel::Beginner),
        }
    }

    #[test]
    fn prompt_carries_profile_and_engine_outputs() {
        let p = course_prompt("Volcanoes", &profile(), &PerformanceHistory::default());
        assert!(p.contains("\"Volcanoes\""));
        assert!(p.contains("10-year-old learner in Grade 5 from Kenya"));
        assert!(p.contains("Write all content in Swahili."));
        assert!(p.contains("beginner in English"));
        assert!(p.contains("Difficulty: beginner (insufficient sample)"));
        // handson is preferred, visual wins the tie for second place
        assert!(p.contains("Preferred learning styles: handson, visual."));
        assert!(p.contains("\"correctAnswer\""));
    }

    #[test]
    fn prompt_is_deterministic() {
        let perf = PerformanceHistory {
            weak_topics: vec!["fractions".into()],
            ..Default::default()
        };
        let a = course_prompt("Fractions", &profile(), &perf);
        let b = course_prompt("Fractions", &profile(), &perf);
        assert_eq!(a, b);
        assert!(a.contains("struggled with: fractions"));
    }

    #[test]
    fn native_speakers_get_no_language_hint_and_adults_get_adult_tone() {
        let prof = LearningProfile {
            age: 35,
            english_level: Some(EnglishLevel::Native),
            ..Default::default()
        };
        let p = course_prompt("Poetry", &prof, &PerformanceHistory::default());
        assert!(!p.contains("in English:"));
        assert!(p.contains("The learner is an adult"));
        assert!(p.contains("from an unspecified country"));
    }
}
