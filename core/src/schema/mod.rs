//! schema/mod.rs
//! Versioned message structure lookup.
//!
//! Notes:
//! - Header fields are shared by every message type and always come first.
//! - Sign/signal types resolve to one shared body table; callers never see
//!   the indirection.
//! - Request (`Q`) bodies may end in repeated object pairs and test (`T`)
//!   bodies embed the body of a pseudo message type.

pub mod types;
pub mod tables;

pub use types::*;
pub use tables::names;

use std::collections::HashMap;

use regex::Regex;

use crate::config::ProtocolVersion;
use crate::fields::compile_pattern;

/// Immutable message structure table for one protocol version.
#[derive(Debug, Clone)]
pub struct MessageSchema {
    version: ProtocolVersion,
    header: &'static [FieldDef],
    sign_signal: &'static [FieldDef],
    messages: &'static [MessageDef],
    patterns: HashMap<&'static str, Regex>,
}

impl MessageSchema {
    /// Load the tables of `version` and compile field-level patterns.
    pub fn new(version: ProtocolVersion) -> Result<Self, SchemaError> {
        let (header, sign_signal, messages): (&'static [FieldDef], &'static [FieldDef], &'static [MessageDef]) =
            match version {
                ProtocolVersion::V1 => (&tables::HEADER_V1, &tables::SIGN_SIGNAL_V1, &tables::MESSAGES_V1),
            };

        let mut schema = Self { version, header, sign_signal, messages, patterns: HashMap::new() };

        let mut defs: Vec<&'static FieldDef> = header.iter().chain(sign_signal.iter()).collect();
        for m in messages {
            if let BodySchema::Fields(fields) = m.body {
                defs.extend(fields.iter());
            }
            defs.extend(m.repeat.iter());
        }
        for def in defs {
            if let Some(pattern) = def.pattern {
                schema.patterns.insert(def.name, compile_pattern(pattern)?);
            }
        }
        Ok(schema)
    }

    #[inline]
    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// Ordered header fields.
    #[inline]
    pub fn header_fields(&self) -> &'static [FieldDef] {
        self.header
    }

    /// Table row of a message type.
    pub fn definition(&self, message_type: MessageType) -> Result<&'static MessageDef, SchemaError> {
        self.messages
            .iter()
            .find(|m| m.message_type == message_type)
            .ok_or(SchemaError::MissingDefinition { code: message_type.code() })
    }

    /// Ordered fixed body fields of a message type, shared schema resolved.
    pub fn body_fields(&self, message_type: MessageType) -> Result<&'static [FieldDef], SchemaError> {
        Ok(match self.definition(message_type)?.body {
            BodySchema::Fields(fields) => fields,
            BodySchema::SignSignal => self.sign_signal,
        })
    }

    /// Repeated field group of a message type (empty when none).
    pub fn repeat_fields(&self, message_type: MessageType) -> Result<&'static [FieldDef], SchemaError> {
        Ok(self.definition(message_type)?.repeat)
    }

    /// Header layout with concrete names.
    pub fn header_layout(&self) -> Vec<LayoutField> {
        self.header.iter().map(LayoutField::new).collect()
    }

    /// Concrete body layout.
    ///
    /// - `pseudo`: pseudo message type of a test message; `None` stops the
    ///   layout after `PseudoMessageCode`.
    /// - `repeats`: number of repeated groups (request objects).
    pub fn body_layout(
        &self,
        message_type: MessageType,
        pseudo: Option<MessageType>,
        repeats: usize,
    ) -> Result<Vec<LayoutField>, SchemaError> {
        let def = self.definition(message_type)?;
        let mut layout: Vec<LayoutField> = self.body_fields(message_type)?.iter().map(LayoutField::new).collect();

        for i in 1..=repeats {
            layout.extend(def.repeat.iter().map(|f| LayoutField::repeated(f, i)));
        }

        if def.pseudo {
            if let Some(inner) = pseudo {
                if inner == message_type {
                    return Err(SchemaError::InvalidPseudoType(inner.code_str()));
                }
                layout.extend(self.body_layout(inner, None, repeats)?);
            }
        }
        Ok(layout)
    }

    /// Field-level pattern of a definition, if it has one.
    pub fn field_pattern(&self, def: &FieldDef) -> Option<&Regex> {
        self.patterns.get(def.name)
    }

    /// Concrete name of a repeated field: (group index, definition).
    pub fn match_repeated(&self, message_type: MessageType, name: &str) -> Option<(usize, &'static FieldDef)> {
        let repeat = self.repeat_fields(message_type).ok()?;
        repeat.iter().find_map(|def| {
            let (head, tail) = def.name.split_once('#')?;
            let index = name.strip_prefix(head)?.strip_suffix(tail)?;
            if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            index.parse::<usize>().ok().filter(|i| *i > 0).map(|i| (i, def))
        })
    }
}
