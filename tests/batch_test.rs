use std::fs;
use std::path::PathBuf;

use hamspam::batch::BatchClassifier;
use hamspam::config::ClassifierConfig;
use hamspam::error::{HamspamError, Result};
use hamspam::trainer::{TrainedModel, train};
use hamspam::types::Label;

fn trained_model() -> Result<TrainedModel> {
    let dataset = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/dataset/dataset.csv");
    train(&ClassifierConfig::default().with_dataset_path(dataset))
}

#[test]
fn batch_labels_rows_in_order() -> Result<()> {
    let model = trained_model()?;
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("inbox.csv");
    fs::write(
        &input,
        "id,Message\n1,WIN A FREE IPHONE NOW!!!\n2,\"Meeting moved to 3pm tomorrow, see you then.\"\n",
    )?;

    let result = BatchClassifier::new(&model).classify_path(&input)?;

    assert_eq!(result.len(), 2);
    assert_eq!(result.predictions[0].label, Label::Spam);
    assert_eq!(result.predictions[1].label, Label::Ham);
    assert_eq!(result.rows[0][2], "Spam");
    assert_eq!(result.rows[1][2], "Ham");
    assert_eq!(result.rows[1][1], "Meeting moved to 3pm tomorrow, see you then.");
    Ok(())
}

#[test]
fn batch_output_file_has_derived_columns() -> Result<()> {
    let model = trained_model()?;
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.csv");
    fs::write(&input, "BODY,sender\nclaim your free cash prize now,a@example.com\n")?;

    BatchClassifier::new(&model)
        .classify_path(&input)?
        .write_csv_to_path(&output)?;

    let mut reader = csv::Reader::from_path(&output)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    assert_eq!(headers, ["BODY", "sender", "PREDICTION", "CONFIDENCE"]);

    let rows: Vec<csv::StringRecord> = reader.records().collect::<std::result::Result<_, _>>()?;
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][1], "a@example.com");

    let confidence = &rows[0][3];
    let (number, percent) = confidence.split_at(confidence.len() - 1);
    assert_eq!(percent, "%");
    let decimals = number.split('.').nth(1).map(str::len);
    assert_eq!(decimals, Some(1));
    Ok(())
}

#[test]
fn batch_without_message_column_predicts_nothing() -> Result<()> {
    let model = trained_model()?;
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("in.csv");
    fs::write(&input, "subject,from\nhello,someone\n")?;

    let err = BatchClassifier::new(&model).classify_path(&input).unwrap_err();
    assert!(matches!(err, HamspamError::MissingMessageColumn(_)));
    Ok(())
}
