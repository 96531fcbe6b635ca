//! Catalog of created tables, persisted in sled.
//!
//! Hosts use the catalog as the relational engine stand-in: check whether a
//! table exists before creating it, read a stored definition back for dumping,
//! list and drop tables. Existing tables are never altered.

use sled::{Db, Tree};
use tracing::{debug, info, instrument};

use crate::error::{Error, Result};
use crate::relational::{TableDef, TableKey};

/// Tree name for stored table definitions.
const TABLES_TREE: &str = "catalog:tables";

/// Key prefix for tables without a namespace.
const UNQUALIFIED: u8 = 0;
/// Key prefix for namespaced tables, followed by the namespace length.
const QUALIFIED: u8 = 1;

/// Persistent store of table definitions keyed by namespace and name.
pub struct Catalog {
    /// Table definitions tree.
    tables: Tree,
}

impl Catalog {
    /// Open or create a catalog using the given sled database.
    pub fn open(db: &Db) -> Result<Self> {
        let tables = db.open_tree(TABLES_TREE)?;
        Ok(Self { tables })
    }

    /// Check if a table exists.
    pub fn has_table(&self, name: &str, schema: Option<&str>) -> Result<bool> {
        Ok(self.tables.contains_key(encode_key(schema, name))?)
    }

    /// Store a new table definition.
    ///
    /// Fails with [`Error::TableExists`] if the namespace already holds the name.
    #[instrument(skip_all, fields(table = %table.qualified_name()))]
    pub fn create_table(&self, table: &TableDef) -> Result<()> {
        let key = encode_key(table.schema.as_deref(), &table.name);
        let value = serde_json::to_vec(table).map_err(|e| Error::Serialization(e.to_string()))?;

        let swapped = self
            .tables
            .compare_and_swap(key, None as Option<&[u8]>, Some(value))?;
        if swapped.is_err() {
            return Err(Error::TableExists(table.qualified_name()));
        }
        self.tables.flush()?;

        info!(columns = table.columns().len(), "table created");
        Ok(())
    }

    /// Get a stored table definition.
    pub fn get_table(&self, name: &str, schema: Option<&str>) -> Result<Option<TableDef>> {
        match self.tables.get(encode_key(schema, name))? {
            Some(bytes) => {
                let table = serde_json::from_slice(&bytes)
                    .map_err(|e| Error::Serialization(e.to_string()))?;
                Ok(Some(table))
            }
            None => Ok(None),
        }
    }

    /// List keys of all stored tables, unqualified tables first, then by
    /// namespace and name.
    pub fn list_tables(&self) -> Result<Vec<TableKey>> {
        let mut keys = Vec::new();
        for entry in self.tables.iter() {
            let (key, _) = entry?;
            keys.push(decode_key(&key)?);
        }
        keys.sort();
        Ok(keys)
    }

    /// Remove a stored table definition, returning it.
    #[instrument(skip(self))]
    pub fn drop_table(&self, name: &str, schema: Option<&str>) -> Result<TableDef> {
        let table = self
            .get_table(name, schema)?
            .ok_or_else(|| Error::TableNotFound(TableKey::new(schema, name).to_string()))?;
        self.tables.remove(encode_key(schema, name))?;
        self.tables.flush()?;

        debug!("table dropped");
        Ok(table)
    }

    /// Number of stored tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if the catalog holds no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Encode a table identity as a tree key. The namespace is length-prefixed so
/// no choice of characters in either part can collide with another pair.
fn encode_key(schema: Option<&str>, name: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(name.len() + schema.map_or(1, |s| s.len() + 5));
    match schema {
        Some(schema) => {
            key.push(QUALIFIED);
            key.extend_from_slice(&(schema.len() as u32).to_be_bytes());
            key.extend_from_slice(schema.as_bytes());
        }
        None => key.push(UNQUALIFIED),
    }
    key.extend_from_slice(name.as_bytes());
    key
}

fn decode_key(bytes: &[u8]) -> Result<TableKey> {
    let corrupt = || Error::Serialization("corrupt catalog key".to_string());
    let utf8 = |b: &[u8]| String::from_utf8(b.to_vec()).map_err(|_| corrupt());

    match bytes.split_first() {
        Some((&UNQUALIFIED, name)) => Ok(TableKey {
            schema: None,
            name: utf8(name)?,
        }),
        Some((&QUALIFIED, rest)) if rest.len() >= 4 => {
            let (len, rest) = rest.split_at(4);
            let len = u32::from_be_bytes([len[0], len[1], len[2], len[3]]) as usize;
            if rest.len() < len {
                return Err(corrupt());
            }
            let (schema, name) = rest.split_at(len);
            Ok(TableKey {
                schema: Some(utf8(schema)?),
                name: utf8(name)?,
            })
        }
        _ => Err(corrupt()),
    }
}
