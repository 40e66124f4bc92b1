//! JSON persistence for datasets.
//!
//! The on-disk shape is an explicit file DTO: a persons list (in id order)
//! and a pairs list. Loading rebuilds the dataset through `add_person` /
//! `add_pair`, so referential integrity is re-checked at the boundary
//! rather than trusted from the file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::{Dataset, Pair, Person};

#[derive(Serialize, Deserialize)]
struct DatasetFile {
    persons: Vec<Person>,
    pairs: Vec<Pair>,
}

impl Dataset {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        let file = DatasetFile {
            persons: self.persons().cloned().collect(),
            pairs: self.pairs().to_vec(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Parse from JSON, re-validating pair references.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: DatasetFile = serde_json::from_str(json)?;

        let mut dataset = Dataset::new();
        for person in file.persons {
            dataset.add_person(person);
        }
        for pair in file.pairs {
            dataset.add_pair(pair)?;
        }
        Ok(dataset)
    }

    /// Write the dataset to a JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load a dataset from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}
