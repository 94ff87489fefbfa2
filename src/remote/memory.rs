//! An in-memory remote store for tests and simulated round trips.
//!
//! [`InMemoryRemote`] honors the remote collaborator's mutation primitives
//! exactly: create appends to the end of the order, insert repositions one
//! record relative to another, disable is a soft flag, and listing reports
//! only live records. It backs the round-trip property tests and any caller
//! that wants a full save pipeline without a network.

use crate::domain::{Color, EnumOption, OptioneerError, Result};
use crate::remote::collaborator::{InsertPosition, RemoteCollaborator};

#[derive(Debug, Clone)]
struct Record {
    id: String,
    name: String,
    color: Color,
    enabled: bool,
}

/// A simulated remote option store.
#[derive(Debug, Default)]
pub struct InMemoryRemote {
    records: Vec<Record>,
    next_id: u64,
}

impl InMemoryRemote {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with named, colored options in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use optioneer::domain::Color;
    /// use optioneer::remote::{InMemoryRemote, RemoteCollaborator};
    ///
    /// let mut store = InMemoryRemote::seeded(&[("Todo", Color::Red), ("Done", Color::Green)]);
    /// assert_eq!(store.list().unwrap().len(), 2);
    /// ```
    #[must_use]
    pub fn seeded(options: &[(&str, Color)]) -> Self {
        let mut store = Self::new();
        for (name, color) in options {
            // Creation on a fresh store cannot fail.
            let _ = store.create(name, *color);
        }
        store
    }

    /// Number of records including disabled ones.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| OptioneerError::Remote(format!("unknown option id {id}")))
    }
}

impl RemoteCollaborator for InMemoryRemote {
    fn list(&mut self) -> Result<Vec<EnumOption>> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.enabled)
            .map(|r| EnumOption::remote(r.id.clone(), r.name.clone(), r.color))
            .collect())
    }

    fn create(&mut self, name: &str, color: Color) -> Result<String> {
        self.next_id += 1;
        let id = format!("opt-{}", self.next_id);
        self.records.push(Record {
            id: id.clone(),
            name: name.to_owned(),
            color,
            enabled: true,
        });
        Ok(id)
    }

    fn update(&mut self, id: &str, name: Option<&str>, color: Option<Color>) -> Result<()> {
        let index = self.index_of(id)?;
        let record = &mut self.records[index];
        if let Some(name) = name {
            record.name = name.to_owned();
        }
        if let Some(color) = color {
            record.color = color;
        }
        Ok(())
    }

    fn insert_relative(&mut self, id: &str, position: InsertPosition) -> Result<()> {
        let from = self.index_of(id)?;
        let record = self.records.remove(from);
        let result = match &position {
            InsertPosition::Before(anchor) => self.index_of(anchor),
            InsertPosition::After(anchor) => self.index_of(anchor).map(|i| i + 1),
        };
        match result {
            Ok(to) => {
                self.records.insert(to, record);
                Ok(())
            }
            Err(err) => {
                // Unknown anchor leaves the store unchanged.
                self.records.insert(from, record);
                Err(err)
            }
        }
    }

    fn disable(&mut self, id: &str) -> Result<()> {
        let index = self.index_of(id)?;
        self.records[index].enabled = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(store: &mut InMemoryRemote) -> Vec<String> {
        store
            .list()
            .unwrap()
            .into_iter()
            .map(|o| o.name)
            .collect()
    }

    #[test]
    fn create_appends_in_order() {
        let mut store = InMemoryRemote::new();
        store.create("A", Color::None).unwrap();
        store.create("B", Color::None).unwrap();
        assert_eq!(names(&mut store), vec!["A", "B"]);
    }

    #[test]
    fn insert_relative_repositions_records() {
        let mut store = InMemoryRemote::seeded(&[
            ("A", Color::None),
            ("B", Color::None),
            ("C", Color::None),
        ]);
        store
            .insert_relative("opt-3", InsertPosition::Before("opt-1".into()))
            .unwrap();
        assert_eq!(names(&mut store), vec!["C", "A", "B"]);

        store
            .insert_relative("opt-1", InsertPosition::After("opt-2".into()))
            .unwrap();
        assert_eq!(names(&mut store), vec!["C", "B", "A"]);
    }

    #[test]
    fn unknown_anchor_leaves_order_unchanged() {
        let mut store = InMemoryRemote::seeded(&[("A", Color::None), ("B", Color::None)]);
        let err = store
            .insert_relative("opt-1", InsertPosition::After("nope".into()))
            .unwrap_err();
        assert!(matches!(err, OptioneerError::Remote(_)));
        assert_eq!(names(&mut store), vec!["A", "B"]);
    }

    #[test]
    fn disabled_records_drop_out_of_listings_but_persist() {
        let mut store = InMemoryRemote::seeded(&[("A", Color::None), ("B", Color::None)]);
        store.disable("opt-1").unwrap();
        assert_eq!(names(&mut store), vec!["B"]);
        assert_eq!(store.record_count(), 2);
    }
}
