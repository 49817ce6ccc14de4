//! Reply attribution.
//!
//! Chat exports carry no reply metadata, so this is a text heuristic and
//! explicitly approximate. Each rule maps a message to the author it seems
//! to answer; the first rule that fires wins, and the reply is credited to
//! that author's most recent message within the lookback window.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::config::AnalyzerConfig;
use crate::message::Message;

/// A message ranked by how many later messages answered it.
#[derive(Debug, Clone, Serialize)]
pub struct RepliedMessage {
    pub author: String,
    pub body: String,
    pub replies: u64,
}

const QUOTE_MARKERS: &[&str] = &["⟫", ">>", "「"];

/// `@name` mention anywhere in the body. Multi-word authors also match on
/// their first name.
fn mention_target(message: &Message, authors: &HashSet<String>) -> Option<String> {
    let lower = message.body.to_lowercase();
    authors
        .iter()
        .filter(|a| *a != &message.author)
        .find(|a| {
            let full = a.to_lowercase();
            let first = full.split_whitespace().next().unwrap_or(&full).to_string();
            lower.contains(&format!("@{full}")) || lower.contains(&format!("@{first}"))
        })
        .cloned()
}

/// Body opening with `Name:` for a known author.
fn prefix_target(message: &Message, authors: &HashSet<String>) -> Option<String> {
    let lower = message.body.trim_start().to_lowercase();
    authors
        .iter()
        .filter(|a| *a != &message.author)
        .find(|a| lower.starts_with(&format!("{}:", a.to_lowercase())))
        .cloned()
}

/// Body opening with a known author's bare name.
fn leading_name_target(message: &Message, authors: &HashSet<String>) -> Option<String> {
    let lower = message.body.trim_start().to_lowercase();
    authors
        .iter()
        .filter(|a| *a != &message.author)
        .find(|a| lower.starts_with(&a.to_lowercase()))
        .cloned()
}

/// Quote marker at the start of a body. Only meaningful when the previous
/// message came from someone else, in which case that author is the target.
fn quote_target(message: &Message, previous_author: Option<&str>) -> Option<String> {
    let trimmed = message.body.trim_start();
    if !QUOTE_MARKERS.iter().any(|m| trimmed.starts_with(m)) {
        return None;
    }
    match previous_author {
        Some(prev) if prev != message.author => Some(prev.to_string()),
        _ => None,
    }
}

fn reply_target(
    message: &Message,
    authors: &HashSet<String>,
    previous_author: Option<&str>,
) -> Option<String> {
    mention_target(message, authors)
        .or_else(|| prefix_target(message, authors))
        .or_else(|| leading_name_target(message, authors))
        .or_else(|| quote_target(message, previous_author))
}

/// Most-replied messages, most answered first. Ties keep transcript order.
#[must_use]
pub fn most_replied(messages: &[Message], config: &AnalyzerConfig) -> Vec<RepliedMessage> {
    let authors: HashSet<String> = messages.iter().map(|m| m.author.clone()).collect();
    let mut counts: HashMap<usize, u64> = HashMap::new();

    for (i, message) in messages.iter().enumerate() {
        let previous_author = i.checked_sub(1).map(|j| messages[j].author.as_str());
        let Some(target) = reply_target(message, &authors, previous_author) else {
            continue;
        };
        // Latest message by the target inside the lookback window.
        let window_start = i.saturating_sub(config.reply_lookback);
        let hit = (window_start..i)
            .rev()
            .find(|&j| messages[j].author == target);
        if let Some(j) = hit {
            *counts.entry(j).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(usize, u64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(config.top_replied)
        .map(|(index, replies)| RepliedMessage {
            author: messages[index].author.clone(),
            body: messages[index].body.clone(),
            replies,
        })
        .collect()
}
