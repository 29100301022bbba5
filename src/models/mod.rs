use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Avatar palette a group can be tagged with.
///
/// The backend stores the lowercase name. Anything it sends that is not part of
/// the palette (or no color at all) is shown as `Archive`.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    AsRefStr,
    EnumIter,
    EnumString,
)]
#[serde(from = "Option<String>", into = "String")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum GroupColor {
    Red,
    Orange,
    Violet,
    Green,
    Cyan,
    Blue,
    Pink,
    #[default]
    Archive,
}

impl GroupColor {
    /// (top, bottom) stops of the avatar gradient.
    pub fn gradient_stops(self) -> (&'static str, &'static str) {
        match self {
            GroupColor::Red => ("#FF845E", "#D45246"),
            GroupColor::Orange => ("#FEBB5B", "#F68136"),
            GroupColor::Violet => ("#B694F9", "#6C61DF"),
            GroupColor::Green => ("#9AD164", "#46BA43"),
            GroupColor::Cyan => ("#53edd6", "#28c9b7"),
            GroupColor::Blue => ("#5CAFFA", "#408ACF"),
            GroupColor::Pink => ("#FF8AAC", "#D95574"),
            GroupColor::Archive => ("#B8C2CC", "#9EAAB5"),
        }
    }

    pub fn gradient_style(self) -> String {
        let (top, bottom) = self.gradient_stops();
        format!("background: linear-gradient(to bottom, {top}, {bottom});")
    }

    pub fn swatch_style(self) -> String {
        format!("background-color: {};", self.gradient_stops().0)
    }
}

impl From<Option<String>> for GroupColor {
    fn from(value: Option<String>) -> Self {
        value
            .and_then(|s| s.trim().to_lowercase().parse().ok())
            .unwrap_or_default()
    }
}

impl From<GroupColor> for String {
    fn from(value: GroupColor) -> Self {
        value.to_string()
    }
}

pub(crate) const UNNAMED_GROUP: &str = "Unnamed Group";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Group {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: GroupColor,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Group {
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            UNNAMED_GROUP
        } else {
            &self.name
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Note {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(alias = "group_id")]
    pub group_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// One page of `GET /api/groups`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GroupPage {
    #[serde(default)]
    pub data: Vec<Group>,
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct GroupSearchResponse {
    #[serde(default)]
    pub data: Vec<Group>,
}

/// The group currently open in the note panel.
///
/// Identity is `id` alone; name and color are copied from the entity so the
/// header can render before the group list is loaded.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct SelectedGroup {
    pub id: String,
    pub name: String,
    pub color: GroupColor,
}

impl From<&Group> for SelectedGroup {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id.clone(),
            name: group.display_name().to_string(),
            color: group.color,
        }
    }
}

/// Result of copying a note into one target group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ShareOutcome {
    pub group_id: String,
    pub group_name: String,
    pub result: Result<Note, String>,
}

impl ShareOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn test_group_contract_deserialize() {
        let json = r#"{
            "_id": "64f1",
            "name": "Cuvette notes",
            "color": "violet",
            "createdAt": "2024-03-09T10:10:00.000Z",
            "updatedAt": "2024-03-09T11:00:00.000Z",
            "__v": 0
        }"#;
        let g: Group = serde_json::from_str(json).expect("group should parse");
        assert_eq!(g.id, "64f1");
        assert_eq!(g.color, GroupColor::Violet);
        assert_eq!(g.updated_at, "2024-03-09T11:00:00.000Z");
    }

    #[test]
    fn test_unknown_or_missing_color_falls_back_to_archive() {
        let g: Group = serde_json::from_str(r#"{"_id":"a","name":"x","color":"magenta"}"#)
            .expect("group should parse");
        assert_eq!(g.color, GroupColor::Archive);

        let g: Group = serde_json::from_str(r#"{"_id":"b","name":"x"}"#).expect("should parse");
        assert_eq!(g.color, GroupColor::Archive);

        let g: Group = serde_json::from_str(r#"{"_id":"c","color":null}"#).expect("should parse");
        assert_eq!(g.color, GroupColor::Archive);
    }

    #[test]
    fn test_color_serializes_lowercase() {
        let v = serde_json::to_value(GroupColor::Cyan).expect("should serialize");
        assert_eq!(v, serde_json::json!("cyan"));
        assert_eq!(GroupColor::iter().count(), 8);
    }

    #[test]
    fn test_note_contract_deserialize_keeps_newlines() {
        let json = r#"{
            "_id": "n1",
            "groupId": "g1",
            "content": "line one\nline two",
            "createdAt": "2024-03-09T10:10:00.000Z",
            "updatedAt": "2024-03-09T10:10:00.000Z"
        }"#;
        let n: Note = serde_json::from_str(json).expect("note should parse");
        assert_eq!(n.group_id, "g1");
        assert_eq!(n.content.lines().count(), 2);
    }

    #[test]
    fn test_group_page_contract_deserialize() {
        let json = r#"{"data":[{"_id":"a","name":"A","color":"red"}],"totalPages":3}"#;
        let page: GroupPage = serde_json::from_str(json).expect("page should parse");
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_selected_group_uses_display_name() {
        let g = Group {
            id: "g".to_string(),
            name: "  ".to_string(),
            color: GroupColor::Blue,
            created_at: String::new(),
            updated_at: String::new(),
        };
        let sel = SelectedGroup::from(&g);
        assert_eq!(sel.name, UNNAMED_GROUP);
        assert_eq!(sel.color, GroupColor::Blue);
    }
}
