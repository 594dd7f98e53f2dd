//! Record types stored per user: programmes and the scripts written for them.
//!
//! Field names are camelCase on the wire to match the client contract. A
//! script's `programmeId` is stored verbatim and never validated against the
//! programme collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Record;

// ============================================================================
// Programme
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Programme {
    pub id: String,
    pub name: String,
    pub genre: String,
    pub target_audience: String,
    /// Free-form length description ("45 min", "45"); not parsed.
    pub episode_length: String,
    pub style_references: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The client-supplied mutable fields of a [`Programme`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammeDraft {
    pub name: String,
    pub genre: String,
    pub target_audience: String,
    pub episode_length: String,
    #[serde(default)]
    pub style_references: Vec<String>,
}

impl Record for Programme {
    type Draft = ProgrammeDraft;

    fn assemble(id: String, created_at: DateTime<Utc>, draft: ProgrammeDraft) -> Self {
        Self {
            id,
            name: draft.name,
            genre: draft.genre,
            target_audience: draft.target_audience,
            episode_length: draft.episode_length,
            style_references: draft.style_references,
            created_at,
            updated_at: None,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn revise(&mut self, draft: ProgrammeDraft, updated_at: DateTime<Utc>) {
        self.name = draft.name;
        self.genre = draft.genre;
        self.target_audience = draft.target_audience;
        self.episode_length = draft.episode_length;
        self.style_references = draft.style_references;
        self.updated_at = Some(updated_at);
    }
}

// ============================================================================
// Script
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    pub id: String,
    pub programme_id: String,
    pub topic: String,
    pub content: String,
    pub sources: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The client-supplied mutable fields of a [`Script`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptDraft {
    pub programme_id: String,
    pub topic: String,
    pub content: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

impl Record for Script {
    type Draft = ScriptDraft;

    fn assemble(id: String, created_at: DateTime<Utc>, draft: ScriptDraft) -> Self {
        Self {
            id,
            programme_id: draft.programme_id,
            topic: draft.topic,
            content: draft.content,
            sources: draft.sources,
            created_at,
            updated_at: None,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn revise(&mut self, draft: ScriptDraft, updated_at: DateTime<Utc>) {
        self.programme_id = draft.programme_id;
        self.topic = draft.topic;
        self.content = draft.content;
        self.sources = draft.sources;
        self.updated_at = Some(updated_at);
    }
}
