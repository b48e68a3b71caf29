//! # Language School Telegram Bot
//!
//! A Telegram webhook bot that registers students through a short dialogue
//! (name, phone, level), stores completed registrations, and relays
//! questions to an AI model.

pub mod ai;
pub mod bot;
pub mod config;
pub mod db;
pub mod dialogue;
pub mod errors;
pub mod localization;
pub mod store;
