//! Edit document: the objects being edited, the selection, the change-set
//! tags and an undo/redo stack of tag changes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::HelperError;
use crate::models::{MapObject, ObjectId};
use crate::tags::{merge_source, SOURCE_KEY};

/// Result of a successful lookup, not yet applied to any document
#[derive(Debug, Clone, PartialEq)]
pub struct AddressUpdate {
    pub target: ObjectId,
    pub tags: BTreeMap<String, String>,
    /// Attribution for the change-set `source` tag
    pub source: String,
    /// Human readable address, e.g. "Feldgasse 3, 2203 Großebersdorf (AT)"
    pub summary: String,
    pub distance: Option<f64>,
}

/// Undoable change of tags on one object
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeTags {
    pub target: ObjectId,
    pub new: BTreeMap<String, String>,
    /// Values before the change, `None` where the tag did not exist
    pub previous: BTreeMap<String, Option<String>>,
}

impl ChangeTags {
    pub fn new(target: ObjectId, new: BTreeMap<String, String>) -> Self {
        Self {
            target,
            new,
            previous: BTreeMap::new(),
        }
    }

    fn execute(&mut self, object: &mut MapObject) {
        self.previous = self
            .new
            .keys()
            .map(|key| (key.clone(), object.tags.get(key).cloned()))
            .collect();
        for (key, value) in &self.new {
            object.tags.insert(key.clone(), value.clone());
        }
    }

    fn revert(&self, object: &mut MapObject) {
        for (key, value) in &self.previous {
            match value {
                Some(value) => object.tags.insert(key.clone(), value.clone()),
                None => object.tags.remove(key),
            };
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub objects: Vec<MapObject>,

    #[serde(default)]
    pub selection: Vec<ObjectId>,

    /// Tags of the change-set the edits will be uploaded with
    #[serde(default)]
    pub changeset: BTreeMap<String, String>,

    #[serde(skip)]
    undo: Vec<ChangeTags>,

    #[serde(skip)]
    redo: Vec<ChangeTags>,
}

impl Document {
    pub fn new(objects: Vec<MapObject>) -> Self {
        Self {
            objects,
            ..Self::default()
        }
    }

    pub fn object(&self, id: ObjectId) -> Option<&MapObject> {
        self.objects.iter().find(|o| o.object_id() == id)
    }

    fn object_mut(&mut self, id: ObjectId) -> Result<&mut MapObject, HelperError> {
        self.objects
            .iter_mut()
            .find(|o| o.object_id() == id)
            .ok_or_else(|| HelperError::UnknownObject(id.to_string()))
    }

    pub fn select(&mut self, ids: impl IntoIterator<Item = ObjectId>) {
        self.selection = ids.into_iter().collect();
    }

    pub fn select_all(&mut self) {
        self.selection = self.objects.iter().map(|o| o.object_id()).collect();
    }

    pub fn selected(&self) -> Result<Vec<&MapObject>, HelperError> {
        self.selection
            .iter()
            .map(|id| {
                self.object(*id)
                    .ok_or_else(|| HelperError::UnknownObject(id.to_string()))
            })
            .collect()
    }

    /// Apply the address tags as one undoable command and attribute the
    /// source on the change-set. The attribution is not undone.
    pub fn apply(&mut self, update: &AddressUpdate) -> Result<(), HelperError> {
        let mut command = ChangeTags::new(update.target, update.tags.clone());
        command.execute(self.object_mut(update.target)?);
        debug!("Applied {} tags to {}", command.new.len(), command.target);
        self.undo.push(command);
        self.redo.clear();

        let source = merge_source(
            self.changeset.get(SOURCE_KEY).map(String::as_str),
            &update.source,
        );
        self.changeset.insert(SOURCE_KEY.to_string(), source);
        Ok(())
    }

    pub fn undo(&mut self) -> Result<bool, HelperError> {
        let Some(command) = self.undo.pop() else {
            return Ok(false);
        };
        command.revert(self.object_mut(command.target)?);
        self.redo.push(command);
        Ok(true)
    }

    pub fn redo(&mut self) -> Result<bool, HelperError> {
        let Some(mut command) = self.redo.pop() else {
            return Ok(false);
        };
        command.execute(self.object_mut(command.target)?);
        self.undo.push(command);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }
}
