use mindful_memory::Turn;

pub const COMPANION_NAME: &str = "MindfulMate";

fn role_preamble() -> String {
    format!(
        "You are {}, a compassionate mental health companion. \
Your role is to provide emotional support through:\n\
- Active listening and validation\n\
- Gentle guidance (not clinical advice)\n\
- Brief coping strategies when appropriate\n",
        COMPANION_NAME
    )
}

fn response_requirements(mood_directive: &str) -> String {
    format!(
        "Response Requirements:\n\
- Mood: {}\n\
- Tone: Warm, empathetic, human-like\n\
- Length: 2-4 sentences (adjust based on need)\n\
- Style: Simple language, no diagnoses or medical instructions\n\
- Focus: Stay on the user's emotional needs\n",
        mood_directive
    )
}

const CLOSING_INSTRUCTION: &str = "Please respond thoughtfully to the USER's last message, \
focusing on their emotional state shown above:";

pub struct PromptComposer;

impl PromptComposer {
    /// Assemble the full prompt for one turn.
    ///
    /// `history_tail` holds prior turns, oldest first; the current input is
    /// rendered after them as the final `[USER]` line. Output depends on the
    /// arguments alone.
    pub fn compose(user_input: &str, mood_directive: &str, history_tail: &[&Turn]) -> String {
        let mut context = String::new();
        for turn in history_tail {
            context.push_str(&render_line(turn.role().as_str(), turn.content()));
        }
        context.push_str(&render_line("user", user_input));

        format!(
            "{}\n{}\nConversation Context:\n{}\n{}",
            role_preamble(),
            response_requirements(mood_directive),
            context,
            CLOSING_INSTRUCTION
        )
    }
}

fn render_line(role: &str, content: &str) -> String {
    format!("[{}]: {}\n", role.to_uppercase(), content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindful_memory::{History, Role};

    #[test]
    fn test_exact_layout() {
        let mut history = History::new(20);
        history.append(Role::User, "I couldn't sleep");
        history.append(Role::Assistant, "That sounds exhausting.");

        let prompt = PromptComposer::compose(
            "Still tired today",
            "neutral, respond with gentle curiosity",
            &history.last(4),
        );

        let expected = "\
You are MindfulMate, a compassionate mental health companion. Your role is to provide emotional support through:
- Active listening and validation
- Gentle guidance (not clinical advice)
- Brief coping strategies when appropriate

Response Requirements:
- Mood: neutral, respond with gentle curiosity
- Tone: Warm, empathetic, human-like
- Length: 2-4 sentences (adjust based on need)
- Style: Simple language, no diagnoses or medical instructions
- Focus: Stay on the user's emotional needs

Conversation Context:
[USER]: I couldn't sleep
[ASSISTANT]: That sounds exhausting.
[USER]: Still tired today

Please respond thoughtfully to the USER's last message, focusing on their emotional state shown above:";

        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_deterministic() {
        let mut history = History::new(20);
        history.append(Role::User, "a");
        history.append(Role::Assistant, "b");
        let first = PromptComposer::compose("c", "d", &history.last(4));
        let second = PromptComposer::compose("c", "d", &history.last(4));
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_history_has_only_current_message() {
        let prompt = PromptComposer::compose("hello", "neutral", &[]);
        assert!(prompt.contains("Conversation Context:\n[USER]: hello\n\n"));
        assert!(!prompt.contains("[ASSISTANT]"));
    }

    #[test]
    fn test_current_input_is_last_line_before_instruction() {
        let mut history = History::new(20);
        for i in 0..6 {
            history.append(Role::User, format!("old {}", i));
        }
        let prompt = PromptComposer::compose("newest", "x", &history.last(4));
        assert!(!prompt.contains("old 1"));
        let old = prompt.find("[USER]: old 5").unwrap();
        let newest = prompt.find("[USER]: newest").unwrap();
        assert!(old < newest);
    }
}
