//! # Report Writers
//!
//! File sinks for the results of a batch run. Chart rendering is left to
//! external tools, which read the distribution and trend data files.

use crate::data::ReviewDataset;
use crate::error::{Error, Result};
use crate::pipeline::BatchReport;
use crate::sentiment::{SentimentDistribution, TrendSeries};
use crate::utils::config::OutputSettings;
use csv::Writer;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::path::Path;
use tracing::info;

/// Write the retained rows with `sentiment` and `polarity` columns appended
pub fn write_processed_csv<P: AsRef<Path>>(
    path: P,
    dataset: &ReviewDataset,
    report: &BatchReport,
) -> Result<()> {
    let mut writer = Writer::from_path(path.as_ref())?;

    let mut header = dataset.headers.clone();
    header.push("sentiment".to_string());
    header.push("polarity".to_string());
    writer.write_record(&header)?;

    for analyzed in &report.reviews {
        let row = dataset.rows.get(analyzed.index).ok_or_else(|| {
            Error::InvalidInput(format!("review {} is not part of the dataset", analyzed.index))
        })?;

        let mut record = row.fields.clone();
        record.resize(dataset.headers.len(), String::new());
        match analyzed.sentiment {
            Some(sentiment) => {
                record.push(sentiment.label.to_string());
                record.push(sentiment.polarity.to_string());
            }
            None => {
                record.push(String::new());
                record.push(String::new());
            }
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Human-readable run summary
pub fn render_summary(report: &BatchReport) -> String {
    let mut s = String::new();

    s.push_str("Sentiment counts (predicted):\n");
    for (label, count) in report.distribution.most_common() {
        let _ = writeln!(s, "  {}: {}", label, count);
    }

    s.push_str("\nTop key themes:\n");
    for theme in &report.themes {
        let _ = writeln!(s, "  {}: {}", theme.term, theme.count);
    }

    s.push('\n');
    s.push_str(&report.evaluation.summary_lines().join("\n"));
    s.push('\n');
    s
}

/// Write the run summary
pub fn write_summary<P: AsRef<Path>>(path: P, report: &BatchReport) -> Result<()> {
    fs::write(path, render_summary(report))?;
    Ok(())
}

/// Write `{label: count}` for a pie chart renderer
pub fn write_distribution_json<P: AsRef<Path>>(
    path: P,
    distribution: &SentimentDistribution,
) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, distribution)?;
    Ok(())
}

/// Write `date,mean_polarity,count` rows for a line chart renderer
pub fn write_trend_csv<P: AsRef<Path>>(path: P, trend: &TrendSeries) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    for point in trend.iter() {
        writer.serialize(point)?;
    }
    writer.flush()?;
    Ok(())
}

/// Create the output directory and write every artifact
pub fn write_all(
    output: &OutputSettings,
    dataset: &ReviewDataset,
    report: &BatchReport,
) -> Result<()> {
    fs::create_dir_all(&output.dir)?;

    write_processed_csv(output.processed_path(), dataset, report)?;
    info!("Processed data saved to: {}", output.processed_path().display());

    write_summary(output.summary_path(), report)?;
    info!("Summary saved to: {}", output.summary_path().display());

    write_distribution_json(output.distribution_path(), &report.distribution)?;
    write_trend_csv(output.trend_path(), &report.trend)?;
    info!("Chart data saved to: {}", output.dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ReviewLoader;
    use crate::error::Result as CrateResult;
    use crate::pipeline::BatchAnalyzer;
    use crate::sentiment::{FnScorer, SentimentClassifier};
    use crate::utils::config::InputSettings;
    use tempfile::tempdir;

    fn stub(text: &str) -> CrateResult<f64> {
        if text.contains("good") {
            Ok(0.5)
        } else if text.contains("bad") {
            Ok(-0.25)
        } else {
            Ok(0.0)
        }
    }

    fn run(csv: &str) -> (ReviewDataset, BatchReport) {
        let dataset = ReviewLoader::new(InputSettings::default())
            .load_reader(csv.as_bytes())
            .unwrap();
        let report = BatchAnalyzer::new()
            .with_classifier(SentimentClassifier::with_scorer(FnScorer::new(stub)))
            .analyze_dataset(&dataset);
        (dataset, report)
    }

    #[test]
    fn test_processed_csv_appends_columns() {
        let (dataset, report) = run("id,Review\n1,good product\n2,\n3,bad service\n");
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_processed_csv(&path, &dataset, &report).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "id,Review,sentiment,polarity\n\
             1,good product,POSITIVE,0.5\n\
             3,bad service,NEGATIVE,-0.25\n"
        );
    }

    #[test]
    fn test_summary_without_labels() {
        let (_, report) = run("Review\ngood battery\ngood battery life\n");
        let summary = render_summary(&report);
        assert!(summary.starts_with("Sentiment counts (predicted):\n  POSITIVE: 2\n"));
        assert!(summary.contains("\nTop key themes:\n  good: 2\n  battery: 2\n  life: 1\n"));
        assert!(summary.ends_with("Ground-truth labels not found; skipped evaluation metrics.\n"));
    }

    #[test]
    fn test_summary_with_labels() {
        let (_, report) = run("Review,label\ngood,POSITIVE\nbad,POSITIVE\nbad,NEGATIVE\n");
        let summary = render_summary(&report);
        assert!(summary.contains("Accuracy: 0.6667"));
        assert!(summary.contains("Confusion Matrix (rows=true, cols=pred)"));
    }

    #[test]
    fn test_write_all_creates_files() {
        let (dataset, report) = run("Review,timestamp\ngood,2025-01-01\nbad,2025-01-03\n");
        let dir = tempdir().unwrap();
        let output = OutputSettings {
            dir: dir.path().join("nested/output"),
            ..Default::default()
        };
        write_all(&output, &dataset, &report).unwrap();

        let distribution: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output.distribution_path()).unwrap()).unwrap();
        assert_eq!(distribution["POSITIVE"], 1);
        assert_eq!(distribution["NEGATIVE"], 1);

        let trend = fs::read_to_string(output.trend_path()).unwrap();
        assert_eq!(
            trend,
            "date,mean_polarity,count\n2025-01-01,0.5,1\n2025-01-02,0.0,0\n2025-01-03,-0.25,1\n"
        );
        assert!(output.summary_path().exists());
        assert!(output.processed_path().exists());
    }
}
