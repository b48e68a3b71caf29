//! UI Builder module for creating keyboards

use teloxide::types::{KeyboardButton, KeyboardMarkup};

use crate::localization::LocalizationManager;

/// Reply keyboard shown with the welcome message, one button per row
pub fn create_main_menu_keyboard(localization: &LocalizationManager) -> KeyboardMarkup {
    let rows = ["menu-register", "menu-ask-ai", "menu-channel"]
        .into_iter()
        .map(|key| vec![KeyboardButton::new(localization.get_message(key))])
        .collect::<Vec<_>>();

    KeyboardMarkup::new(rows).resize_keyboard()
}
