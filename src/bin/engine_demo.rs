//! Demo that walks one learner through a few quizzes and prints each snapshot.

use adaptive_learning_engine::{
    modality, recommend, LearningProfile, Modality, PerformanceHistory, QuizResult, Taxonomy,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let profile = LearningProfile {
        age: 11,
        country: "Portugal".into(),
        grade_level: "Grade 6".into(),
        learning_styles: vec![Modality::Visual],
        interests: vec!["science".into(), "space".into()],
        ..Default::default()
    };

    let quizzes = [
        QuizResult::new(90, Modality::Visual, "Volcanoes"),
        QuizResult::new(88, Modality::Visual, "Volcanoes"),
        QuizResult::new(94, Modality::Handson, "Volcanoes"),
        QuizResult::new(42, Modality::Reading, "Fractions"),
    ];

    let mut perf = PerformanceHistory::default();
    for (day, quiz) in quizzes.iter().enumerate() {
        perf = adaptive_learning_engine::updater::apply(&perf, quiz, Some(day as u32 + 1), None);
        println!("after {} ({}):", quiz.topic, quiz.score);
        println!("{}", serde_json::to_string_pretty(&perf)?);
    }

    println!("modalities: {:?}", modality::rank(&profile, &perf));

    let recs = recommend::recommend(
        Taxonomy::builtin(),
        &profile,
        &perf,
        &["The Moon".to_string()],
    );
    println!("{}", serde_json::to_string_pretty(&recs)?);

    println!("engine-demo done");
    Ok(())
}
