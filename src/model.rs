//! Area documents as the editor sees them.
//! Only the fields the editor shows or the map needs are modelled; any other
//! key found in an area file is ignored on read.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use thiserror::Error;

pub type RoomId = String;

/// Room ids and exit targets appear both as strings and as plain vnums.
/// Exit targets may be any scalar; one that names no room is a dangling exit.
#[derive(Deserialize)]
#[serde(untagged, expecting = "a room id")]
enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl From<Scalar> for String {
    fn from(s: Scalar) -> Self {
        match s {
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Text(t) => t,
            Scalar::Null => String::new(),
        }
    }
}

fn room_id<'de, D: Deserializer<'de>>(d: D) -> Result<RoomId, D::Error> {
    match Scalar::deserialize(d)? {
        Scalar::Null => Err(serde::de::Error::custom("room id must not be empty")),
        id => Ok(id.into()),
    }
}

fn optional_exits<'de, D: Deserializer<'de>>(d: D) -> Result<Exits, D::Error> {
    Option::<Exits>::deserialize(d).map(Option::unwrap_or_default)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exit {
    /// Compass name as written in the document; unknown names are kept.
    pub direction: String,
    pub target: RoomId,
}

/// Exits in document order. Never re-sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Exits(Vec<Exit>);

impl Exits {
    pub fn iter(&self) -> std::slice::Iter<'_, Exit> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Exits {
    type Item = &'a Exit;
    type IntoIter = std::slice::Iter<'a, Exit>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

struct ExitsVisitor;

impl<'de> Visitor<'de> for ExitsVisitor {
    type Value = Exits;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping of direction names to room ids")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Exits, A::Error> {
        let mut exits = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((direction, target)) = map.next_entry::<String, Scalar>()? {
            exits.push(Exit {
                direction,
                target: target.into(),
            });
        }
        Ok(Exits(exits))
    }
}

impl<'de> Deserialize<'de> for Exits {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_map(ExitsVisitor)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Room {
    #[serde(deserialize_with = "room_id")]
    pub id: RoomId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default, deserialize_with = "optional_exits")]
    pub exits: Exits,
    #[serde(default)]
    pub flags: Vec<String>,
}

#[cfg(test)]
impl Room {
    pub fn new(id: impl Into<RoomId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_exit(mut self, direction: &str, target: impl Into<RoomId>) -> Self {
        self.exits.0.push(Exit {
            direction: direction.to_string(),
            target: target.into(),
        });
        self
    }
}

/// An exit whose target id matches no room in the area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DanglingExit<'a> {
    pub room: &'a str,
    pub direction: &'a str,
    pub target: &'a str,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub levels: Vec<u16>,
    #[serde(default)]
    pub reset: u32,
    #[serde(default)]
    pub reset_msg: String,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl Project {
    /// First room carrying `id`, if any.
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn first_room(&self) -> Option<&Room> {
        self.rooms.first()
    }

    pub fn dangling_exits(&self) -> Vec<DanglingExit<'_>> {
        self.rooms
            .iter()
            .flat_map(|room| room.exits.iter().map(move |exit| (room, exit)))
            .filter(|(_, exit)| self.room(&exit.target).is_none())
            .map(|(room, exit)| DanglingExit {
                room: &room.id,
                direction: &exit.direction,
                target: &exit.target,
            })
            .collect()
    }

    /// Header fields as one line, e.g. for a tooltip.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.author.is_empty() {
            parts.push(format!("by {}", self.author));
        }
        match self.levels.as_slice() {
            [] => {}
            [only] => parts.push(format!("level {only}")),
            [low, .., high] => parts.push(format!("levels {low}-{high}")),
        }
        if self.reset > 0 {
            parts.push(format!("resets every {} min", self.reset));
        }
        if !self.reset_msg.is_empty() {
            parts.push(format!("\"{}\"", self.reset_msg));
        }
        parts.join(", ")
    }

    /// Ids used by more than one room, in first-seen order.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut dups: Vec<&str> = Vec::new();
        for room in &self.rooms {
            if !seen.insert(room.id.as_str()) && !dups.contains(&room.id.as_str()) {
                dups.push(&room.id);
            }
        }
        dups
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl From<serde_yaml::Error> for ParseError {
    fn from(err: serde_yaml::Error) -> Self {
        let location = err.location();
        Self {
            message: err.to_string(),
            line: location.as_ref().map(|l| l.line()),
            column: location.as_ref().map(|l| l.column()),
        }
    }
}

/// Parse an area document. A blank document is an empty area.
pub fn load_document(text: &str) -> Result<Project, ParseError> {
    if text.trim().is_empty() {
        return Ok(Project::default());
    }
    let project: Project = serde_yaml::from_str(text)?;
    for id in project.duplicate_ids() {
        log::warn!("room id {id} is used more than once; the first one wins");
    }
    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: &str = r#"
name: Coruscant Underlevels
author: builder
levels: [1, 10]
reset: 15
rooms:
  - id: 100
    name: Landing Pad
    desc: A wide durasteel platform.
    exits:
      north: 101
      east: 102
    flags: [nomob]
    roomProgs:
      enter: say hi
  - id: 101
    name: Corridor
    exits: {south: 100, up: 150}
  - id: 102
    name: Alcove
    exits:
"#;

    #[test]
    fn parses_area_with_numeric_ids() {
        let p = load_document(AREA).unwrap();
        assert_eq!(p.name, "Coruscant Underlevels");
        assert_eq!(p.levels, vec![1, 10]);
        assert_eq!(p.reset, 15);
        assert_eq!(p.rooms.len(), 3);
        assert_eq!(p.rooms[0].id, "100");
        assert_eq!(p.rooms[0].flags, vec!["nomob".to_string()]);
        assert_eq!(p.room("101").map(|r| r.name.as_str()), Some("Corridor"));
        assert!(p.room("102").unwrap().exits.is_empty());
    }

    #[test]
    fn summary_lists_header_fields() {
        let p = load_document(AREA).unwrap();
        assert_eq!(p.summary(), "by builder, levels 1-10, resets every 15 min");
        assert_eq!(Project::default().summary(), "");
    }

    #[test]
    fn exits_keep_document_order() {
        let text = "rooms:\n  - id: hub\n    exits:\n      west: a\n      north: b\n      east: c\n      south: d\n";
        let p = load_document(text).unwrap();
        let order: Vec<&str> = p.rooms[0].exits.iter().map(|e| e.direction.as_str()).collect();
        assert_eq!(order, vec!["west", "north", "east", "south"]);
    }

    #[test]
    fn string_ids_and_missing_exits() {
        let text = "rooms:\n  - id: start\n    exits: {north: cave}\n  - id: cave\n";
        let p = load_document(text).unwrap();
        assert_eq!(p.rooms[1].id, "cave");
        assert!(p.rooms[1].exits.is_empty());
        assert_eq!(p.rooms[0].exits.iter().next().unwrap().target, "cave");
    }

    #[test]
    fn blank_document_is_empty_area() {
        assert_eq!(load_document("").unwrap(), Project::default());
        assert_eq!(load_document("  \n\n").unwrap(), Project::default());
    }

    #[test]
    fn missing_rooms_key_is_empty_area() {
        let p = load_document("name: Nowhere\n").unwrap();
        assert!(p.rooms.is_empty());
        assert!(p.first_room().is_none());
    }

    #[test]
    fn malformed_document_reports_location() {
        let err = load_document("rooms:\n  - id: a\n    exits: [north\n").unwrap_err();
        assert!(!err.message.is_empty());
        assert!(err.line.is_some());
    }

    #[test]
    fn room_without_id_is_rejected() {
        assert!(load_document("rooms:\n  - name: Nameless\n").is_err());
        let err = load_document("rooms:\n  - id: ~\n").unwrap_err();
        assert!(err.message.contains("room id must not be empty"), "{}", err.message);
    }

    #[test]
    fn odd_exit_targets_become_dangling_exits() {
        let text = "rooms:\n  - id: a\n    exits: {north: ~, east: 1.5, south: true, west: a}\n";
        let p = load_document(text).unwrap();
        let targets: Vec<&str> = p.rooms[0].exits.iter().map(|e| e.target.as_str()).collect();
        assert_eq!(targets, vec!["", "1.5", "true", "a"]);
        let dangling: Vec<&str> = p.dangling_exits().iter().map(|d| d.direction).collect();
        assert_eq!(dangling, vec!["north", "east", "south"]);
    }

    #[test]
    fn non_scalar_target_names_what_was_expected() {
        let err = load_document("rooms:\n  - id: a\n    exits: {north: [b]}\n").unwrap_err();
        assert!(err.message.contains("a room id"), "{}", err.message);
        assert!(!err.message.contains("Scalar"));
    }

    #[test]
    fn dangling_exits_are_listed() {
        let p = load_document(AREA).unwrap();
        let dangling = p.dangling_exits();
        assert_eq!(
            dangling,
            vec![DanglingExit {
                room: "101",
                direction: "up",
                target: "150"
            }]
        );
    }

    #[test]
    fn lookup_returns_first_duplicate() {
        let p = Project {
            rooms: vec![
                Room::new("a").with_exit("north", "b"),
                Room::new("a"),
                Room::new("b"),
            ],
            ..Default::default()
        };
        assert_eq!(p.room("a").unwrap().exits.len(), 1);
        assert_eq!(p.duplicate_ids(), vec!["a"]);
        assert!(p.room("zzz").is_none());
    }
}
