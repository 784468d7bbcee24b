//! Intent protocol
//!
//! An intent tells the service how a sub-resource embedded in a request should
//! be resolved against storage: select an existing row, create a new one, or
//! update one. Intents are request-scoped and never persisted.
//!
//! Any operation tag other than `SELECT`, `CREATE` or `UPDATE` deserializes to
//! [`Operation::Unsupported`], which every consumer rejects with
//! [`Error::InvalidOperation`].

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operation carried by an [`Intent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    Select,
    Create,
    Update,
    /// Catch-all for unknown tags such as `DELETE`
    #[serde(other)]
    Unsupported,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Select => "select",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Unsupported => "unsupported",
        };
        f.write_str(s)
    }
}

/// How a referenced resource should be resolved
///
/// For `SELECT` the target is identified by the id inside `data`; the other
/// fields of `data` are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent<T> {
    pub operation: Operation,
    pub data: T,
    /// Client correlation id, echoed back on creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_id: Option<String>,
}

impl<T> Intent<T> {
    pub fn new(operation: Operation, data: T) -> Self {
        Self {
            operation,
            data,
            temp_id: None,
        }
    }

    pub fn select(data: T) -> Self {
        Self::new(Operation::Select, data)
    }

    pub fn create(data: T) -> Self {
        Self::new(Operation::Create, data)
    }

    pub fn update(data: T) -> Self {
        Self::new(Operation::Update, data)
    }

    pub fn with_temp_id(mut self, temp_id: impl Into<String>) -> Self {
        self.temp_id = Some(temp_id.into());
        self
    }

    /// Check that this intent carries the operation the caller is serving.
    ///
    /// Unknown tags are reported as [`Error::InvalidOperation`]; known tags
    /// that differ from `expected` as [`Error::OperationMismatch`].
    pub fn ensure_operation(&self, expected: Operation) -> Result<()> {
        match self.operation {
            Operation::Unsupported => Err(Error::InvalidOperation),
            found if found != expected => Err(Error::OperationMismatch { expected, found }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        id: i64,
    }

    #[test]
    fn test_known_tags_deserialize() {
        let intent: Intent<Payload> =
            serde_json::from_str(r#"{"operation":"SELECT","data":{"id":4}}"#).unwrap();
        assert_eq!(intent.operation, Operation::Select);
        assert_eq!(intent.data, Payload { id: 4 });
        assert_eq!(intent.temp_id, None);

        let intent: Intent<Payload> = serde_json::from_str(
            r#"{"operation":"CREATE","data":{"id":0},"temp_id":"tmp-1"}"#,
        )
        .unwrap();
        assert_eq!(intent.operation, Operation::Create);
        assert_eq!(intent.temp_id.as_deref(), Some("tmp-1"));
    }

    #[test]
    fn test_unknown_tags_become_unsupported() {
        for tag in ["DELETE", "", "select", "UPSERT"] {
            let json = format!(r#"{{"operation":"{}","data":{{"id":1}}}}"#, tag);
            let intent: Intent<Payload> = serde_json::from_str(&json).unwrap();
            assert_eq!(intent.operation, Operation::Unsupported, "tag {:?}", tag);
        }
    }

    #[test]
    fn test_ensure_operation_reports_mismatch_and_invalid() {
        let intent = Intent::create(());
        assert!(intent.ensure_operation(Operation::Create).is_ok());

        match Intent::update(()).ensure_operation(Operation::Create) {
            Err(Error::OperationMismatch { expected, found }) => {
                assert_eq!(expected, Operation::Create);
                assert_eq!(found, Operation::Update);
            }
            other => panic!("expected mismatch, got {:?}", other),
        }

        let unsupported = Intent::new(Operation::Unsupported, ());
        assert!(matches!(
            unsupported.ensure_operation(Operation::Update),
            Err(Error::InvalidOperation)
        ));
    }
}
