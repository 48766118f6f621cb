use crate::error::BotError;
use crate::statuses::HomeworkStatus;
use crate::validator::HomeworkRecord;

/// Формирует текст уведомления о смене статуса работы.
pub fn parse_status(record: &HomeworkRecord) -> Result<String, BotError> {
    let name = non_empty(record.name.as_deref(), "homework_name")?;
    let code = non_empty(record.status.as_deref(), "status")?;
    let status: HomeworkStatus = code.parse()?;

    Ok(format!(
        "Status changed for work \"{}\". {}",
        name,
        status.verdict()
    ))
}

/// Текст уведомления о сбое итерации.
pub fn failure_message(err: &BotError) -> String {
    format!("Internal failure: {}", err)
}

fn non_empty<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, BotError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(BotError::MissingField(field.to_string())),
    }
}
