#![forbid(unsafe_code)]

//! Typed views over records of the well-known collections.
//!
//! Records are stored as open maps; these structs are what call sites decode
//! them into. Unknown fields are ignored on decode and optional fields
//! default, so a view can be read from rows written by older builds.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub current_stage: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub acceptance_criteria: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub order_index: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vision {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub problem: String,
    #[serde(default)]
    pub target_user: String,
    #[serde(default)]
    pub success_metrics: String,
    #[serde(default)]
    pub why_software: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown_content: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prd {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub out_of_scope: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Prompts carry no `updated_at`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Setting<V> {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub key: String,
    pub value: V,
    pub created_at: String,
    pub updated_at: String,
}
