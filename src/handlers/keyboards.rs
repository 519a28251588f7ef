//! Inline keyboard builders

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::engine::Controls;
use crate::models::TransportMode;

/// One row with the four transport modes
pub fn transport_picker() -> InlineKeyboardMarkup {
    let row: Vec<InlineKeyboardButton> = TransportMode::ALL
        .iter()
        .map(|mode| {
            InlineKeyboardButton::callback(mode.picker_label(), format!("transport:{}", mode.code()))
        })
        .collect();

    InlineKeyboardMarkup::new([row])
}

/// Pagination row: previous arrow (page > 1), page label, next arrow
/// (page < total_pages)
pub fn pagination_keyboard(page: usize, total_pages: usize) -> InlineKeyboardMarkup {
    let mut row = vec![InlineKeyboardButton::callback(
        format!("{}/{}", page, total_pages),
        "noop".to_string(),
    )];

    if page > 1 {
        row.insert(
            0,
            InlineKeyboardButton::callback("◀️", format!("page:{}", page - 1)),
        );
    }
    if page < total_pages {
        row.push(InlineKeyboardButton::callback("▶️", format!("page:{}", page + 1)));
    }

    InlineKeyboardMarkup::new([row])
}

/// Build the markup for an engine control set
pub fn markup_for(controls: Controls) -> InlineKeyboardMarkup {
    match controls {
        Controls::TransportPicker => transport_picker(),
        Controls::Pager { page, total_pages } => pagination_keyboard(page, total_pages),
    }
}
