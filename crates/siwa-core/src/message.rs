//! Canonical SIWA message codec.
//!
//! [`build_message`] and [`parse_message`] are a strict serializer/parser
//! pair over the plaintext wire format. The format is the interoperability
//! surface between independent client and server implementations: line
//! order, the `": "` field separator, and the blank-line statement framing
//! are all fixed.

use std::collections::HashMap;

use crate::errors::FormatError;
use crate::types::MessageFields;

/// Fixed suffix of the first message line
const DOMAIN_SUFFIX: &str = " wants you to sign in with your Agent account:";

/// Serialize message fields into the canonical plaintext form
///
/// The statement block is framed by blank lines even when the statement is
/// absent, so a statement-less message carries two adjacent blank lines.
/// Optional trailing fields are emitted only when present.
///
/// Fails with [`FormatError::MissingAddress`] when no address is set; the
/// signing flow resolves one from the signer before building.
pub fn build_message(fields: &MessageFields) -> Result<String, FormatError> {
    let address = fields.address.as_deref().ok_or(FormatError::MissingAddress)?;

    let version = if fields.version.is_empty() {
        "1"
    } else {
        &fields.version
    };

    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("{}{}", fields.domain, DOMAIN_SUFFIX));
    lines.push(address.to_string());
    lines.push(String::new());

    if let Some(statement) = fields.statement.as_deref() {
        if !statement.is_empty() {
            lines.push(statement.to_string());
        }
    }
    lines.push(String::new());

    lines.push(format!("URI: {}", fields.uri));
    lines.push(format!("Version: {}", version));
    lines.push(format!("Agent ID: {}", fields.agent_id));
    lines.push(format!("Agent Registry: {}", fields.agent_registry));
    lines.push(format!("Chain ID: {}", fields.chain_id));
    lines.push(format!("Nonce: {}", fields.nonce));
    lines.push(format!("Issued At: {}", fields.issued_at));

    if let Some(expiration_time) = fields.expiration_time.as_deref() {
        if !expiration_time.is_empty() {
            lines.push(format!("Expiration Time: {}", expiration_time));
        }
    }
    if let Some(not_before) = fields.not_before.as_deref() {
        if !not_before.is_empty() {
            lines.push(format!("Not Before: {}", not_before));
        }
    }
    if let Some(request_id) = fields.request_id.as_deref() {
        if !request_id.is_empty() {
            lines.push(format!("Request ID: {}", request_id));
        }
    }

    Ok(lines.join("\n"))
}

/// Parse a canonical plaintext message back into structured fields
///
/// Line 0 must carry the fixed domain suffix; line 1 must be a 0x-prefixed
/// 42-character address. A blank line 2 opens statement mode, which
/// accumulates lines until a blank line or a `URI: ` line. Remaining lines
/// split on the first `": "` into key/value pairs; unrecognized keys are
/// ignored, missing optional keys take their defaults, and a present but
/// non-numeric `Agent ID` or `Chain ID` is a format error.
pub fn parse_message(message: &str) -> Result<MessageFields, FormatError> {
    let lines: Vec<&str> = message.split('\n').collect();

    let domain = lines
        .first()
        .and_then(|line| line.strip_suffix(DOMAIN_SUFFIX))
        .ok_or(FormatError::MissingDomainLine)?;
    if domain.is_empty() {
        return Err(FormatError::MissingDomainLine);
    }

    let address = lines.get(1).copied().unwrap_or_default();
    if !address.starts_with("0x") || address.len() != 42 {
        return Err(FormatError::MalformedAddress);
    }

    let mut field_map: HashMap<&str, &str> = HashMap::new();
    let mut statement: Option<String> = None;
    let mut in_statement = false;
    let mut statement_lines: Vec<&str> = Vec::new();

    for (i, line) in lines.iter().enumerate().skip(2) {
        if i == 2 && line.is_empty() {
            in_statement = true;
            continue;
        }

        if in_statement {
            if line.is_empty() || line.starts_with("URI: ") {
                in_statement = false;
                let joined = statement_lines.join("\n");
                let trimmed = joined.trim();
                statement = (!trimmed.is_empty()).then(|| trimmed.to_string());
                if let Some((key, value)) = line.split_once(": ") {
                    field_map.insert(key, value);
                }
                continue;
            }
            statement_lines.push(line);
            continue;
        }

        if let Some((key, value)) = line.split_once(": ") {
            field_map.insert(key, value);
        }
    }

    Ok(MessageFields {
        domain: domain.to_string(),
        address: Some(address.to_string()),
        statement,
        uri: field_map.get("URI").unwrap_or(&"").to_string(),
        version: field_map.get("Version").unwrap_or(&"1").to_string(),
        agent_id: parse_numeric_field("Agent ID", &field_map)?,
        agent_registry: field_map.get("Agent Registry").unwrap_or(&"").to_string(),
        chain_id: parse_numeric_field("Chain ID", &field_map)?,
        nonce: field_map.get("Nonce").unwrap_or(&"").to_string(),
        issued_at: field_map.get("Issued At").unwrap_or(&"").to_string(),
        expiration_time: field_map.get("Expiration Time").map(|v| v.to_string()),
        not_before: field_map.get("Not Before").map(|v| v.to_string()),
        request_id: field_map.get("Request ID").map(|v| v.to_string()),
    })
}

/// Missing numeric keys default to 0; present but non-numeric values are
/// rejected
fn parse_numeric_field(
    field: &'static str,
    field_map: &HashMap<&str, &str>,
) -> Result<u64, FormatError> {
    match field_map.get(field) {
        None => Ok(0),
        Some(value) => value.parse::<u64>().map_err(|_| FormatError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}
