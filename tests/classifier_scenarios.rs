use std::path::PathBuf;

use hamspam::config::ClassifierConfig;
use hamspam::error::{HamspamError, Result};
use hamspam::session::{Session, Submission};
use hamspam::trainer::{TrainedModel, train};
use hamspam::types::Label;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/dataset/dataset.csv")
}

fn trained_model() -> Result<TrainedModel> {
    train(&ClassifierConfig::default().with_dataset_path(fixture_path()))
}

#[test]
fn training_on_fixture_splits_eighty_twenty() -> Result<()> {
    let model = trained_model()?;
    let report = model.report();

    assert_eq!(report.dataset.rows_read, 60);
    assert_eq!(report.dataset.spam, 20);
    assert_eq!(report.dataset.ham, 40);
    assert_eq!(report.test_size, 12);
    assert_eq!(report.train_size, 48);
    assert!(report.vocabulary_size > 0 && report.vocabulary_size <= 5000);
    Ok(())
}

#[test]
fn training_is_deterministic_for_fixed_seed() -> Result<()> {
    let first = trained_model()?;
    let second = trained_model()?;

    assert_eq!(
        first.vectorizer.feature_names(),
        second.vectorizer.feature_names()
    );
    assert_eq!(first.classifier.weights(), second.classifier.weights());
    assert_eq!(first.classifier.intercept(), second.classifier.intercept());

    for text in ["WIN A FREE IPHONE NOW!!!", "see you at lunch tomorrow"] {
        assert_eq!(first.predict(text)?, second.predict(text)?);
    }
    Ok(())
}

#[test]
fn obvious_messages_are_classified_directionally() -> Result<()> {
    let model = trained_model()?;

    let spam = model.predict("WIN A FREE IPHONE NOW!!!")?;
    assert_eq!(spam.label, Label::Spam);
    assert!(spam.confidence > 50.0);

    let ham = model.predict("Meeting moved to 3pm tomorrow, see you then.")?;
    assert_eq!(ham.label, Label::Ham);
    assert!(ham.confidence > 50.0);
    Ok(())
}

#[test]
fn confidence_stays_within_percent_range() -> Result<()> {
    let model = trained_model()?;

    for text in [
        "",
        "qwertyuiop asdfghjkl",
        "free free free free free prize prize prize",
        "the and of to",
    ] {
        let prediction = model.predict(text)?;
        assert!((0.0..=100.0).contains(&prediction.confidence));
        let display = prediction.confidence_display();
        assert!(display.ends_with('%'), "{display}");
    }
    Ok(())
}

#[test]
fn dataset_without_category_column_is_a_schema_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("dataset.csv");
    std::fs::write(&path, "text,label\nwin a prize,spam\nhello there,ham\n")?;

    let err = train(&ClassifierConfig::default().with_dataset_path(&path)).unwrap_err();
    assert!(matches!(err, HamspamError::Schema(_)), "{err}");
    Ok(())
}

#[test]
fn missing_dataset_is_reported_with_its_path() {
    let err = train(&ClassifierConfig::default().with_dataset_path("nowhere/dataset.csv"))
        .unwrap_err();
    assert!(matches!(err, HamspamError::DatasetNotFound(_)));
    assert!(err.to_string().contains("nowhere/dataset.csv"));
}

#[test]
fn interactive_session_validates_before_classifying() -> Result<()> {
    let config = ClassifierConfig::default().with_dataset_path(fixture_path());
    let rules = config.input;
    let mut session = Session::new(train(&config)?, rules);

    assert!(matches!(session.submit("hi")?, Submission::Rejected(_)));
    assert!(matches!(session.submit("   ")?, Submission::Rejected(_)));
    assert!(session.history().is_empty());

    let submission = session.submit("please review the attached invoice today")?;
    assert!(matches!(submission, Submission::Classified(_)));

    for i in 0..6 {
        session.submit(&format!("lunch meeting moved to tomorrow number {i}"))?;
    }
    assert_eq!(session.history().len(), 7);

    let recent: Vec<_> = session.history().recent(5).collect();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].text, "lunch meeting moved to tomorrow number 5");
    Ok(())
}

#[test]
fn holdout_evaluation_covers_every_held_out_row() -> Result<()> {
    let model = trained_model()?;
    let evaluation = model.evaluate()?;

    assert_eq!(evaluation.samples, model.holdout().len());
    assert_eq!(evaluation.confusion.total(), evaluation.samples);
    let support: usize = evaluation.per_class.iter().map(|c| c.support).sum();
    assert_eq!(support, evaluation.samples);
    Ok(())
}
