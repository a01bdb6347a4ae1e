//! Compact ticket reference tokens.
//!
//! A token is a flat JSON object `{"id":"AB3X7Q9K","n":"Maria Lopez","g":3,"v":1}`
//! printed on the ticket. Scanned text is untrusted, so [`decode_reference`]
//! is total: every input maps to either a reference or [`InvalidReference`].

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::entities::Ticket;
use crate::errors::InvalidReference;
use crate::utils::truncate_chars;

pub const REFERENCE_SCHEMA_VERSION: u32 = 1;
pub const REFERENCE_NAME_MAX_CHARS: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketReference {
    pub id: String,
    pub name_prefix: String,
    pub group_size: u32,
    pub schema_version: u32,
}

impl TicketReference {
    pub fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id.clone(),
            name_prefix: truncate_chars(&ticket.recipient_name, REFERENCE_NAME_MAX_CHARS),
            group_size: ticket.group_size,
            schema_version: REFERENCE_SCHEMA_VERSION,
        }
    }
}

pub fn encode_reference(ticket: &Ticket) -> String {
    let reference = TicketReference::from_ticket(ticket);
    json!({
        "id": reference.id,
        "n": reference.name_prefix,
        "g": reference.group_size,
        "v": reference.schema_version,
    })
    .to_string()
}

pub fn decode_reference(raw: &str) -> Result<TicketReference, InvalidReference> {
    let value: Value = serde_json::from_str(raw.trim()).map_err(|_| InvalidReference)?;
    let Value::Object(fields) = value else {
        return Err(InvalidReference);
    };

    let id = fields
        .get("id")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(InvalidReference)?;
    let group_size = positive_u32(&fields, "g")?;
    let schema_version = positive_u32(&fields, "v")?;
    if schema_version != REFERENCE_SCHEMA_VERSION {
        return Err(InvalidReference);
    }
    let name_prefix = match fields.get("n") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(name)) => truncate_chars(name, REFERENCE_NAME_MAX_CHARS),
        Some(_) => return Err(InvalidReference),
    };

    Ok(TicketReference {
        id: id.to_string(),
        name_prefix,
        group_size,
        schema_version,
    })
}

fn positive_u32(fields: &Map<String, Value>, key: &str) -> Result<u32, InvalidReference> {
    fields
        .get(key)
        .and_then(Value::as_u64)
        .filter(|value| *value > 0)
        .and_then(|value| u32::try_from(value).ok())
        .ok_or(InvalidReference)
}
