//! Program text sources.
//!
//! The surrounding document model hands over Type 4 bodies already
//! filter-decoded, either as bytes or as a reader. `ProgramSource` pulls the
//! reader in fixed-size chunks into one growing buffer, so the lexer always
//! scans complete text and no token can straddle a refill.

use crate::error::Result;
use crate::parser::lexer::CalcLexer;
use bytes::{Bytes, BytesMut};
use std::io::{ErrorKind, Read};

/// Buffer size for reading
const BUFSIZ: usize = 4096;

/// Decoded program text of one calculator function.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgramSource {
    data: Bytes,
}

impl ProgramSource {
    /// Wrap program text that is already in memory.
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Read program text until end of input.
    ///
    /// Interrupted reads are retried; any other I/O error is returned.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = BytesMut::with_capacity(BUFSIZ);
        let mut chunk = [0u8; BUFSIZ];

        loop {
            match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(Self { data: buf.freeze() })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the text as shared bytes.
    pub fn bytes(&self) -> Bytes {
        self.data.clone()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Tokenizer over this text.
    pub fn lexer(&self) -> CalcLexer<'_> {
        CalcLexer::new(&self.data)
    }
}

impl From<&str> for ProgramSource {
    fn from(text: &str) -> Self {
        Self::from_bytes(Bytes::copy_from_slice(text.as_bytes()))
    }
}

impl From<Bytes> for ProgramSource {
    fn from(data: Bytes) -> Self {
        Self::from_bytes(data)
    }
}

impl From<Vec<u8>> for ProgramSource {
    fn from(data: Vec<u8>) -> Self {
        Self::from_bytes(data)
    }
}
