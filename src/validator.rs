use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use crate::error::BotError;

/// Одна запись из списка `homeworks`. Поля необязательны: их отсутствие
/// проверяет уже форматтер.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HomeworkRecord {
    #[serde(rename = "homework_name", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Результат проверки ответа: работы в порядке сервера и новая отметка.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedResponse {
    pub homeworks: Vec<HomeworkRecord>,
    pub next_watermark: i64,
}

fn fail(err: BotError) -> BotError {
    error!("Invalid API response: {}", err);
    err
}

/// Проверяет структуру ответа API и достаёт список работ и `current_date`.
pub fn check_response(response: &Value) -> Result<ValidatedResponse, BotError> {
    let obj = response
        .as_object()
        .ok_or_else(|| fail(BotError::Shape("response is not a JSON object".into())))?;

    let homeworks = obj
        .get("homeworks")
        .ok_or_else(|| fail(BotError::MissingField("homeworks".into())))?;
    let current_date = obj
        .get("current_date")
        .ok_or_else(|| fail(BotError::MissingField("current_date".into())))?;

    let items = homeworks
        .as_array()
        .ok_or_else(|| fail(BotError::Shape("'homeworks' is not a list".into())))?;
    let next_watermark = current_date
        .as_i64()
        .ok_or_else(|| fail(BotError::Shape("'current_date' is not an integer".into())))?;

    let homeworks = items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            if !item.is_object() {
                return Err(fail(BotError::Shape(format!(
                    "homework #{} is not a JSON object",
                    idx
                ))));
            }
            HomeworkRecord::deserialize(item).map_err(|e| {
                fail(BotError::Shape(format!("homework #{}: {}", idx, e)))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ValidatedResponse {
        homeworks,
        next_watermark,
    })
}
