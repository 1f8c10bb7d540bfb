//! Bounded, in-memory conversation history.
//!
//! Turns are kept in insertion order. When an append pushes the length past
//! capacity, the oldest turns are evicted first.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One role-tagged message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone)]
pub struct History {
    turns: VecDeque<Turn>,
    capacity: usize,
}

impl History {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turns: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push_back(Turn::new(role, content));
        while self.turns.len() > self.capacity {
            self.turns.pop_front();
        }
    }

    /// The most recent `n` turns, oldest first.
    pub fn last(&self, n: usize) -> Vec<&Turn> {
        let skip = self.turns.len().saturating_sub(n);
        self.turns.iter().skip(skip).collect()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_last() {
        let mut h = History::new(20);
        h.append(Role::User, "hi");
        h.append(Role::Assistant, "hello");
        h.append(Role::User, "how are you");

        let tail: Vec<&str> = h.last(2).iter().map(|t| t.content()).collect();
        assert_eq!(tail, vec!["hello", "how are you"]);
        assert_eq!(h.last(10).len(), 3);
        assert!(h.last(0).is_empty());
    }

    #[test]
    fn test_eviction_is_fifo() {
        let mut h = History::new(3);
        for i in 0..5 {
            h.append(Role::User, format!("m{}", i));
        }
        assert_eq!(h.len(), 3);
        let all: Vec<&str> = h.iter().map(|t| t.content()).collect();
        assert_eq!(all, vec!["m2", "m3", "m4"]);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut h = History::new(4);
        h.append(Role::User, "a");
        h.clear();
        assert!(h.is_empty());
        h.clear();
        assert_eq!(h.len(), 0);
    }

    #[test]
    fn test_zero_capacity_keeps_latest() {
        let mut h = History::new(0);
        h.append(Role::User, "a");
        h.append(Role::Assistant, "b");
        assert_eq!(h.capacity(), 1);
        assert_eq!(h.last(5)[0].content(), "b");
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }
}
