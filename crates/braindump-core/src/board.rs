//! Board registry: named boards (categories) and their captured ideas.
//!
//! This is the data the persistence collaborator stores; the canvas
//! engine itself never touches it.

use crate::elements::Color;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Unique identifier for boards and ideas.
pub type BoardId = Uuid;

/// Default board fill used when none is chosen.
pub const DEFAULT_BOARD_COLOR: Color = Color::new(0xA5, 0xB4, 0xFC, 255);

/// How an idea was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputMethod {
    #[default]
    Typed,
    Dictated,
}

/// A named board owning one whiteboard and a list of ideas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    pub color: Color,
    /// Creation time, milliseconds since the Unix epoch.
    pub created_at: u64,
}

/// A captured idea attached to a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub id: Uuid,
    pub board_id: BoardId,
    pub content: String,
    pub input_method: InputMethod,
    pub created_at: u64,
    pub updated_at: u64,
}

/// The registry snapshot the storage layer persists: every board plus
/// every idea, round-trippable through JSON without loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardRegistry {
    boards: Vec<Board>,
    ideas: Vec<Idea>,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl BoardRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with the default brainstorm boards.
    pub fn with_defaults() -> Self {
        let palette = [
            "#A5B4FC", "#A5B4FC", "#93C5FD", "#C4B5FD", "#FBBF24", "#FB923C", "#34D399",
            "#60A5FA",
        ];
        let mut registry = Self::new();
        for (i, hex) in palette.iter().enumerate() {
            registry.add_board(format!("BrainStorm {}", i + 1), Color::from_hex(hex));
        }
        registry
    }

    /// Add a board, returning its id.
    pub fn add_board(&mut self, name: impl Into<String>, color: Color) -> BoardId {
        let board = Board {
            id: Uuid::new_v4(),
            name: name.into(),
            color,
            created_at: now_millis(),
        };
        let id = board.id;
        self.boards.push(board);
        id
    }

    /// Rename a board. Missing ids are a no-op.
    pub fn rename_board(&mut self, id: BoardId, name: impl Into<String>) -> bool {
        match self.boards.iter_mut().find(|b| b.id == id) {
            Some(board) => {
                board.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Remove a board, cascading to its ideas. Missing ids are a no-op.
    pub fn remove_board(&mut self, id: BoardId) -> bool {
        let before = self.boards.len();
        self.boards.retain(|b| b.id != id);
        let removed = self.boards.len() != before;
        if removed {
            self.ideas.retain(|idea| idea.board_id != id);
        }
        removed
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id)
    }

    /// Capture an idea on a board. Returns the idea id, or None if the
    /// board does not exist.
    pub fn add_idea(
        &mut self,
        board_id: BoardId,
        content: impl Into<String>,
        input_method: InputMethod,
    ) -> Option<Uuid> {
        if self.board(board_id).is_none() {
            log::debug!("add_idea: unknown board {board_id}");
            return None;
        }
        let now = now_millis();
        let idea = Idea {
            id: Uuid::new_v4(),
            board_id,
            content: content.into(),
            input_method,
            created_at: now,
            updated_at: now,
        };
        let id = idea.id;
        self.ideas.push(idea);
        Some(id)
    }

    /// Remove an idea. Missing ids are a no-op.
    pub fn remove_idea(&mut self, id: Uuid) -> bool {
        let before = self.ideas.len();
        self.ideas.retain(|idea| idea.id != id);
        self.ideas.len() != before
    }

    /// Ideas on a board, newest first.
    pub fn ideas_for(&self, board_id: BoardId) -> Vec<&Idea> {
        let mut ideas: Vec<&Idea> = self
            .ideas
            .iter()
            .filter(|idea| idea.board_id == board_id)
            .collect();
        ideas.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        ideas
    }

    /// Serialize the snapshot.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Restore a snapshot.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
