use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub project_id: Uuid,
    /// Set semantics; duplicate ids carry no meaning.
    pub members_ids: Vec<Uuid>,
}

impl Team {
    pub fn new(name: impl Into<String>, project_id: Uuid, members_ids: Vec<Uuid>) -> Self {
        Self {
            id: None,
            name: name.into(),
            project_id,
            members_ids,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct TeamPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members_ids: Option<Vec<Uuid>>,
}
