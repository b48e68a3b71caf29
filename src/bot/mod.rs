//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `dialogue_manager`: Decides dialogue state transitions and replies
//! - `message_handler`: Applies a transition using the store and collaborators
//! - `sender`: Delivers replies to Telegram
//! - `ui_builder`: Creates keyboards
//! - `webhook`: HTTP endpoint receiving updates

pub mod dialogue_manager;
pub mod message_handler;
pub mod sender;
pub mod ui_builder;
pub mod webhook;

pub use dialogue_manager::{DialogueManager, Reply, SideEffect, Transition};
pub use message_handler::MessageDispatcher;
pub use sender::{MessageSender, TelegramSender};
pub use ui_builder::create_main_menu_keyboard;
pub use webhook::{parse_update, router, InboundEvent};
