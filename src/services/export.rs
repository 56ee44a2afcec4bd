use crate::{
    errors::{AppError, AppResult},
    models::domain::{ChoiceLabel, QuestionTable},
};

pub const CSV_HEADER: [&str; 6] = ["MCQ", "Choice A", "Choice B", "Choice C", "Choice D", "Correct"];
pub const CSV_FILE_NAME: &str = "mcqs.csv";

/// Serializes a table as UTF-8 CSV with a fixed column order. A choice the
/// record does not have becomes an empty field.
pub fn to_csv(table: &QuestionTable) -> AppResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for record in table {
        let mut row = Vec::with_capacity(CSV_HEADER.len());
        row.push(record.question.as_str());
        for label in ChoiceLabel::ALL {
            row.push(record.choice(label).unwrap_or(""));
        }
        row.push(record.correct.as_str());
        writer.write_record(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::InternalError(format!("failed to flush CSV: {}", e.error())))
}
