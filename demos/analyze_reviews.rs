//! # Review Analysis Example
//!
//! Runs a small labelled batch through the built-in review lexicon.

use chrono::NaiveDate;
use review_sentiment::{BatchAnalyzer, KeywordExtractor, Review, ReviewLexicon};

fn main() {
    println!("=== Customer Review Sentiment Demo ===\n");

    let day = |d| NaiveDate::from_ymd_opt(2025, 6, d).unwrap();

    let reviews = vec![
        Review::new("Great blender, really easy to clean and very quiet")
            .with_label("POSITIVE")
            .on_date(day(1)),
        Review::new("Arrived damaged and the support team was rude")
            .with_label("NEGATIVE")
            .on_date(day(1)),
        Review::new("The blender works. Delivery took four days")
            .with_label("NEUTRAL")
            .on_date(day(3)),
        Review::new("Not good, the lid is flimsy and the motor is noisy")
            .with_label("NEGATIVE")
            .on_date(day(4)),
        Review::absent().with_label("POSITIVE"),
    ];

    let report = BatchAnalyzer::new().analyze(&reviews);

    println!("Analyzed {} of {} reviews", report.reviews.len(), report.input_count);
    println!("{}", "=".repeat(70));

    for analyzed in &report.reviews {
        let text = analyzed.review.text.as_deref().unwrap_or("");
        println!("\nReview #{}: \"{}\"", analyzed.index, text);
        println!("{}", "-".repeat(60));
        if let Some(sentiment) = analyzed.sentiment {
            println!("  Sentiment: {}", sentiment.label);
            println!("  Polarity:  {:.3}", sentiment.polarity);
        }
        println!("  Keywords:  {}", analyzed.keywords.join(", "));
    }

    println!("\n{}", "=".repeat(70));

    println!("\n=== Distribution ===\n");
    for (label, count) in report.distribution.most_common() {
        println!("  {}: {} ({:.0}%)", label, count, report.distribution.fraction(label) * 100.0);
    }

    println!("\n=== Daily Trend ===\n");
    for point in report.trend.iter() {
        println!("  {}  {:+.3}  ({} reviews)", point.date, point.mean_polarity, point.count);
    }

    println!("\n=== Key Themes ===\n");
    for theme in report.themes.iter().take(5) {
        println!("  {}: {}", theme.term, theme.count);
    }

    println!();
    for line in report.evaluation.summary_lines() {
        println!("{}", line);
    }

    // Lexicon internals
    println!("\n=== Lexicon Matches ===\n");
    let lexicon = ReviewLexicon::new();
    let text = "Absolutely love it, not bad at all";
    let result = lexicon.analyze(text);
    println!("Text: \"{}\"", text);
    for (word, score) in &result.matched_words {
        println!("  {}: {:+.3}", word, score);
    }
    println!("  Polarity: {:.3}", result.polarity);

    let extractor = KeywordExtractor::new().with_top_k(3);
    println!("\nTop 3 keywords: {:?}", extractor.extract(Some(text)));

    println!("\n=== Analysis Complete ===");
}
