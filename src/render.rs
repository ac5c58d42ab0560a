// src/render.rs
//! Text blocks for the terminal. Pure functions over session data so the
//! output can be asserted on without a terminal attached.

use colored::{Color, Colorize};

use crate::session::SessionSummary;
use crate::types::api::{AnswerEvaluation, Question};

/// Verdict band for a relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Positive,
    Neutral,
    Negative,
}

impl Tier {
    pub fn color(self) -> Color {
        match self {
            Tier::Positive => Color::Green,
            Tier::Neutral => Color::Yellow,
            Tier::Negative => Color::Red,
        }
    }
}

/// Scores of 7 and above read as good, 4 to 7 as mixed, below 4 as weak.
pub fn relevance_tier(relevance: f64) -> Tier {
    if relevance >= 7.0 {
        Tier::Positive
    } else if relevance >= 4.0 {
        Tier::Neutral
    } else {
        Tier::Negative
    }
}

/// Whole scores print without a decimal point, fractional ones as-is.
fn score_display(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

pub fn questions_header(role: &str) -> String {
    format!("Interview Questions for {}", role).bold().to_string()
}

pub fn question_block(question: &Question) -> String {
    format!(
        "{} {}\n  Type your answer here... (aim for 80+ words)",
        format!("Q{}", question.id).cyan().bold(),
        question.question.bold()
    )
}

pub fn feedback_block(evaluation: &AnswerEvaluation) -> String {
    let tier = relevance_tier(evaluation.relevance);
    let relevance_badge = format!("{}/10", score_display(evaluation.relevance)).color(tier.color());
    let star_badge = if evaluation.structure_star {
        "✓ STAR Detected".green()
    } else {
        "✗ Missing STAR Structure".yellow()
    };

    let mut out = String::new();
    out.push_str(&format!("Relevance:  {}\n", relevance_badge));
    out.push_str(&format!("Confidence: {:.0}%\n", evaluation.confidence));
    out.push_str(&format!("{}\n", star_badge));

    if evaluation.missing_points.is_empty() {
        out.push_str("\nGreat answer! Keep practicing with different scenarios.\n");
    } else {
        out.push_str("\nAreas for Improvement:\n");
        for point in &evaluation.missing_points {
            out.push_str(&format!("  - {}\n", point));
        }
    }

    out.push_str("\nStronger Answer Example:\n");
    for line in evaluation.improved_answer.lines() {
        out.push_str(&format!("  > {}\n", line));
    }
    out
}

pub fn summary_block(role: &str, summary: &SessionSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Interview Summary".bold()));
    out.push_str(&format!("Role: {}\n", role));
    out.push_str(&format!(
        "Questions Answered: {}/{}\n",
        summary.answered, summary.total
    ));
    match summary.average_relevance {
        Some(avg) => out.push_str(&format!("Average Relevance: {:.1}/10\n", avg)),
        None => out.push_str("Average Relevance: n/a\n"),
    }
    out.push_str(&format!(
        "STAR Structure Detected: {}/{}\n",
        summary.star_count, summary.answered
    ));
    out.push_str("\nNext Steps:\n");
    for tip in NEXT_STEPS {
        out.push_str(&format!("  - {}\n", tip));
    }
    out
}

const NEXT_STEPS: [&str; 5] = [
    "Review feedback for each answer",
    "Re-record answers using the improved examples",
    "Practice STAR method (Situation → Task → Action → Result)",
    "Quantify your achievements with metrics",
    "Take another mock interview to track progress",
];
