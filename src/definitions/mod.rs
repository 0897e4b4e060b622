//! Field definition registry
//!
//! The ledger's field, type, transaction type, ledger entry type and result
//! code tables ship with the crate as JSON and are parsed once on first use.
//! Every lookup the codec performs goes through [`definitions`].

pub mod field;

pub use field::{FieldHeader, FieldInstance};

use std::collections::HashMap;

use log::debug;
use once_cell::sync::OnceCell;
use serde::Deserialize;

use crate::error::{CodecError, Result};

static DEFINITIONS_JSON: &str = include_str!("definitions.json");

static DEFINITIONS: OnceCell<Definitions> = OnceCell::new();

/// Shared registry, loaded and indexed on first call
pub fn definitions() -> Result<&'static Definitions> {
    DEFINITIONS.get_or_try_init(|| {
        let defs = Definitions::from_json_str(DEFINITIONS_JSON)?;
        debug!(
            "Loaded {} field definitions and {} transaction types",
            defs.fields.len(),
            defs.transaction_types.len()
        );
        Ok(defs)
    })
}

#[derive(Deserialize)]
struct RawDefinitions {
    #[serde(rename = "TYPES")]
    types: HashMap<String, i32>,
    #[serde(rename = "LEDGER_ENTRY_TYPES")]
    ledger_entry_types: HashMap<String, i32>,
    #[serde(rename = "FIELDS")]
    fields: Vec<(String, RawFieldInfo)>,
    #[serde(rename = "TRANSACTION_RESULTS")]
    transaction_results: HashMap<String, i32>,
    #[serde(rename = "TRANSACTION_TYPES")]
    transaction_types: HashMap<String, i32>,
}

#[derive(Deserialize)]
struct RawFieldInfo {
    nth: i32,
    #[serde(rename = "isVLEncoded")]
    is_vl_encoded: bool,
    #[serde(rename = "isSerialized")]
    is_serialized: bool,
    #[serde(rename = "isSigningField")]
    is_signing_field: bool,
    #[serde(rename = "type")]
    type_name: String,
}

/// Two-way name/code table
#[derive(Debug, Default)]
pub struct CodeTable {
    kind: &'static str,
    by_name: HashMap<String, i32>,
    by_code: HashMap<i32, String>,
}

impl CodeTable {
    fn new(kind: &'static str, entries: HashMap<String, i32>) -> CodeTable {
        let by_code = entries
            .iter()
            .map(|(name, code)| (*code, name.clone()))
            .collect();
        CodeTable {
            kind,
            by_name: entries,
            by_code,
        }
    }

    pub fn code(&self, name: &str) -> Result<i32> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| CodecError::NotFound {
                kind: self.kind,
                key: name.to_string(),
            })
    }

    pub fn name(&self, code: i32) -> Result<&str> {
        self.by_code
            .get(&code)
            .map(String::as_str)
            .ok_or_else(|| CodecError::NotFound {
                kind: self.kind,
                key: code.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Indexed registry of everything the codec needs to know about the wire
#[derive(Debug)]
pub struct Definitions {
    types: CodeTable,
    ledger_entry_types: CodeTable,
    transaction_types: CodeTable,
    transaction_results: CodeTable,
    fields: HashMap<String, FieldInstance>,
    fields_by_header: HashMap<FieldHeader, String>,
}

impl Definitions {
    /// Parse and index a definitions document
    pub fn from_json_str(json: &str) -> Result<Definitions> {
        let raw: RawDefinitions = serde_json::from_str(json)?;
        let types = CodeTable::new("TypeName", raw.types);

        let mut fields = HashMap::with_capacity(raw.fields.len());
        let mut fields_by_header = HashMap::new();
        for (name, info) in raw.fields {
            let type_code = types.code(&info.type_name)?;
            let instance = FieldInstance::new(
                name.clone(),
                info.nth,
                info.type_name,
                type_code,
                info.is_vl_encoded,
                info.is_serialized,
                info.is_signing_field,
            );
            if let Some(header) = instance.header {
                if let Some(existing) = fields_by_header.insert(header, name.clone()) {
                    return Err(CodecError::Serialization(format!(
                        "fields {existing} and {name} share header {header:?}"
                    )));
                }
            }
            if fields.insert(name.clone(), instance).is_some() {
                return Err(CodecError::Serialization(format!(
                    "field {name} is defined twice"
                )));
            }
        }

        Ok(Definitions {
            types,
            ledger_entry_types: CodeTable::new("LedgerEntryType", raw.ledger_entry_types),
            transaction_types: CodeTable::new("TransactionType", raw.transaction_types),
            transaction_results: CodeTable::new("TransactionResult", raw.transaction_results),
            fields,
            fields_by_header,
        })
    }

    pub fn get_field_instance_by_field_name(&self, name: &str) -> Result<&FieldInstance> {
        self.fields
            .get(name)
            .ok_or_else(|| CodecError::field_not_found(name))
    }

    pub fn get_field_instance_by_header(&self, header: FieldHeader) -> Result<&FieldInstance> {
        self.fields_by_header
            .get(&header)
            .and_then(|name| self.fields.get(name))
            .ok_or_else(|| CodecError::NotFound {
                kind: "FieldHeader",
                key: format!(
                    "type {} field {}",
                    header.type_code, header.field_code
                ),
            })
    }

    pub fn get_field_header_by_field_name(&self, name: &str) -> Result<FieldHeader> {
        self.get_field_instance_by_field_name(name)?
            .serialized_header()
    }

    pub fn get_type_code_by_type_name(&self, name: &str) -> Result<i32> {
        self.types.code(name)
    }

    pub fn get_type_name_by_type_code(&self, code: i32) -> Result<&str> {
        self.types.name(code)
    }

    pub fn get_transaction_type_code_by_name(&self, name: &str) -> Result<i32> {
        self.transaction_types.code(name)
    }

    pub fn get_transaction_type_name_by_code(&self, code: i32) -> Result<&str> {
        self.transaction_types.name(code)
    }

    pub fn get_ledger_entry_type_code_by_name(&self, name: &str) -> Result<i32> {
        self.ledger_entry_types.code(name)
    }

    pub fn get_ledger_entry_type_name_by_code(&self, code: i32) -> Result<&str> {
        self.ledger_entry_types.name(code)
    }

    pub fn get_transaction_result_code_by_name(&self, name: &str) -> Result<i32> {
        self.transaction_results.code(name)
    }

    pub fn get_transaction_result_name_by_code(&self, code: i32) -> Result<&str> {
        self.transaction_results.name(code)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
