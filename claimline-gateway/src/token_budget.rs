//! Token estimation and context budget management.
//!
//! Pure functions for estimating token usage without requiring a tokenizer.
//! Uses a `ceil(chars / 3.5)` heuristic (~20% margin, works across providers).

use claimline_core::{ChatMessage, MessageRole};

/// Estimate token count from text using the chars/3.5 heuristic.
pub fn estimate_tokens(text: &str) -> u32 {
    (text.len() as f64 / 3.5).ceil() as u32
}

/// Estimate tokens for a chat history.
pub fn estimate_history_tokens(messages: &[ChatMessage]) -> u32 {
    messages
        .iter()
        // Per-message overhead (~4 tokens for role/structure)
        .map(|msg| 4 + estimate_tokens(&msg.content))
        .sum()
}

/// Drop oldest non-system messages until the history plus the reply budget
/// fits under `token_limit`. System messages are never dropped, and at
/// least one message always survives.
pub fn trim_to_budget(messages: &mut Vec<ChatMessage>, max_response_tokens: u32, token_limit: u32) {
    while estimate_history_tokens(messages) + max_response_tokens >= token_limit
        && messages.len() > 1
    {
        match messages
            .iter()
            .position(|msg| msg.role != MessageRole::System)
        {
            Some(idx) => {
                messages.remove(idx);
            }
            None => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_rounds_up() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abc"), 1);
        assert_eq!(estimate_tokens("abcdefg"), 2);
    }

    #[test]
    fn under_budget_is_untouched() {
        let mut messages = vec![
            ChatMessage::system("S"),
            ChatMessage::user("hello there"),
            ChatMessage::assistant("hi"),
        ];
        trim_to_budget(&mut messages, 100, 10_000);
        assert_eq!(messages.len(), 3);
    }

    #[test]
    fn oldest_user_turns_drop_first_and_system_survives() {
        // system: 1 char -> 5 tokens; each turn: 35 chars -> 14 tokens
        let turn = "x".repeat(35);
        let mut messages = vec![
            ChatMessage::system("S"),
            ChatMessage::user(&turn),
            ChatMessage::assistant(&turn),
            ChatMessage::user(&turn),
        ];
        // 5 + 3*14 = 47 estimated; 47 + 10 >= 50 forces one drop
        trim_to_budget(&mut messages, 10, 50);

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[1].role, MessageRole::Assistant);
    }

    #[test]
    fn keeps_trimming_until_it_fits() {
        let turn = "x".repeat(350);
        let mut messages = vec![ChatMessage::system("S")];
        for _ in 0..10 {
            messages.push(ChatMessage::user(&turn));
        }
        trim_to_budget(&mut messages, 100, 400);

        assert!(estimate_history_tokens(&messages) + 100 < 400);
        assert_eq!(messages[0].role, MessageRole::System);
    }

    #[test]
    fn lone_system_message_is_never_dropped() {
        let mut messages = vec![ChatMessage::system("x".repeat(1000))];
        trim_to_budget(&mut messages, 100, 50);
        assert_eq!(messages.len(), 1);
    }
}
