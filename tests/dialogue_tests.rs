use std::sync::Arc;

use tutor_bot::bot::{DialogueManager, Reply, SideEffect};
use tutor_bot::dialogue::{ChatState, StudentDraft};
use tutor_bot::localization::LocalizationManager;

fn manager() -> DialogueManager {
    let localization = Arc::new(LocalizationManager::with_language("en").unwrap());
    DialogueManager::new(localization, None)
}

fn all_states() -> Vec<ChatState> {
    vec![
        ChatState::Idle,
        ChatState::AwaitName,
        ChatState::AwaitPhone {
            name: "Alice".to_string(),
        },
        ChatState::AwaitLevel {
            name: "Alice".to_string(),
            phone: "0912000000".to_string(),
        },
        ChatState::AiMode,
    ]
}

#[test]
fn test_start_welcomes_and_keeps_state() {
    let manager = manager();

    for state in all_states() {
        let transition = manager.transition(&state, "/start");
        assert_eq!(transition.next, state);
        assert!(matches!(transition.reply, Reply::Welcome(ref text) if text.contains("Register")));
        assert!(transition.effect.is_none());
    }
}

#[test]
fn test_start_is_matched_after_trimming() {
    let manager = manager();
    let transition = manager.transition(&ChatState::AwaitName, "  /start\n");
    assert_eq!(transition.next, ChatState::AwaitName);
    assert!(matches!(transition.reply, Reply::Welcome(_)));
}

#[test]
fn test_full_registration_emits_one_record() {
    let manager = manager();
    let mut state = ChatState::Idle;
    let mut saved = Vec::new();

    for input in ["Register", "Alice", "0912000000", "beginner"] {
        let transition = manager.transition(&state, input);
        if let Some(SideEffect::SaveStudent(draft)) = transition.effect {
            saved.push(draft);
        }
        state = transition.next;
    }

    assert_eq!(
        saved,
        vec![StudentDraft {
            name: "Alice".to_string(),
            phone: "0912000000".to_string(),
            level: "beginner".to_string(),
        }]
    );
    assert_eq!(state, ChatState::Idle);
}

#[test]
fn test_registration_replies() {
    let manager = manager();

    let t = manager.transition(&ChatState::Idle, "Register");
    assert_eq!(t.next, ChatState::AwaitName);
    assert!(matches!(t.reply, Reply::Text(ref text) if text.contains("name")));

    let t = manager.transition(&t.next, " Alice ");
    assert_eq!(
        t.next,
        ChatState::AwaitPhone {
            name: "Alice".to_string()
        }
    );
    assert!(matches!(t.reply, Reply::Text(ref text) if text.contains("phone")));

    let t = manager.transition(&t.next, "0912000000");
    assert!(matches!(t.reply, Reply::Text(ref text) if text.contains("level")));

    let t = manager.transition(&t.next, "advanced");
    assert!(matches!(t.reply, Reply::Text(ref text) if text.contains("Thank you Alice")));
}

#[test]
fn test_dialogue_steps_take_priority_over_menu_labels() {
    let manager = manager();

    // While collecting the name, a menu label is just the name
    let t = manager.transition(&ChatState::AwaitName, "Ask AI");
    assert_eq!(
        t.next,
        ChatState::AwaitPhone {
            name: "Ask AI".to_string()
        }
    );
}

#[test]
fn test_missing_phone_degrades_to_empty() {
    let manager = manager();
    // A stored `await_level` row whose scratch has no delimiter
    let state = ChatState::from_row(Some("await_level"), Some(""));

    let t = manager.transition(&state, "beginner");
    assert_eq!(t.next, ChatState::Idle);
    assert_eq!(
        t.effect,
        Some(SideEffect::SaveStudent(StudentDraft {
            name: String::new(),
            phone: String::new(),
            level: "beginner".to_string(),
        }))
    );
}

#[test]
fn test_ai_mode_forwards_prompt() {
    let manager = manager();

    let t = manager.transition(&ChatState::Idle, "Ask AI");
    assert_eq!(t.next, ChatState::AiMode);
    assert!(t.effect.is_none());

    let t = manager.transition(&ChatState::AiMode, "What is the past tense of go?");
    assert_eq!(t.next, ChatState::AiMode);
    assert_eq!(t.reply, Reply::AiAnswer);
    assert_eq!(
        t.effect,
        Some(SideEffect::AskAi("What is the past tense of go?".to_string()))
    );
}

#[test]
fn test_register_leaves_ai_mode() {
    let manager = manager();
    let t = manager.transition(&ChatState::AiMode, "Register");
    assert_eq!(t.next, ChatState::AwaitName);
    assert!(t.effect.is_none());
}

#[test]
fn test_menu_labels_are_case_sensitive() {
    let manager = manager();
    let t = manager.transition(&ChatState::Idle, "register");
    assert_eq!(t.next, ChatState::Idle);
    assert!(matches!(t.reply, Reply::Text(ref text) if text.contains("did not understand")));
}

#[test]
fn test_fallback_keeps_state() {
    let manager = manager();
    let t = manager.transition(&ChatState::Idle, "hello");
    assert_eq!(t.next, ChatState::Idle);
    assert!(t.effect.is_none());
}

#[test]
fn test_channel_button() {
    let localization = Arc::new(LocalizationManager::with_language("en").unwrap());

    let without = DialogueManager::new(localization.clone(), None);
    let t = without.transition(&ChatState::Idle, "Go to channel");
    assert_eq!(t.next, ChatState::Idle);
    assert!(matches!(t.reply, Reply::Text(ref text) if text.contains("not been configured")));

    let with = DialogueManager::new(localization, Some("https://t.me/school".to_string()));
    let t = with.transition(&ChatState::Idle, "Go to channel");
    assert_eq!(t.next, ChatState::Idle);
    assert!(t.effect.is_none());
    assert!(matches!(t.reply, Reply::Text(ref text) if text.contains("https://t.me/school")));
}

#[test]
fn test_channel_label_in_ai_mode_goes_to_ai() {
    let localization = Arc::new(LocalizationManager::new().unwrap());
    let manager = DialogueManager::new(localization, Some("https://t.me/school".to_string()));

    let t = manager.transition(&ChatState::AiMode, "رفتن به کانال");
    assert_eq!(t.next, ChatState::AiMode);
    assert_eq!(t.reply, Reply::AiAnswer);
    assert_eq!(
        t.effect,
        Some(SideEffect::AskAi("رفتن به کانال".to_string()))
    );
}

#[test]
fn test_persian_labels() {
    let localization = Arc::new(LocalizationManager::new().unwrap());
    let manager = DialogueManager::new(localization, None);

    let t = manager.transition(&ChatState::Idle, "ثبت\u{200c}نام");
    assert_eq!(t.next, ChatState::AwaitName);

    let t = manager.transition(&ChatState::Idle, "پرسش از AI");
    assert_eq!(t.next, ChatState::AiMode);
}
