use serde::Serialize;

use crate::model::TodoItem;

#[derive(Serialize)]
pub struct ItemJson {
    /// 1-based, as accepted by `done` and `rm`
    pub position: usize,
    pub id: String,
    pub text: String,
    #[serde(rename = "isDone")]
    pub is_done: bool,
}

pub fn item_to_json(position: usize, item: &TodoItem) -> ItemJson {
    ItemJson {
        position,
        id: item.id.to_string(),
        text: item.text.clone(),
        is_done: item.is_done,
    }
}

/// `1. [x] Buy milk`
pub fn format_item_line(position: usize, item: &TodoItem) -> String {
    let mark = if item.is_done { 'x' } else { ' ' };
    format!("{}. [{}] {}", position, mark, item.text)
}
