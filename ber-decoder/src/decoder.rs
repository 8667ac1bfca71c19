//! The public `Decoder` API (spec.md §6): `new`/`set_module`/`set_reader`/
//! `dump`/`decode`.

use asn1_schema::{Annotation, DecodeState, Kind, NodeId, Tree};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::driver::Driver;
use crate::error::{Error, ErrorKind, Result};
use crate::header::read_tl;
use crate::reader::Reader;

/// Everything the caller gets back from a successful [`Decoder::decode`]:
/// ownership of the expanded, annotated schema tree and the image buffer.
pub struct DecodeOutput {
    pub tree: Tree,
    pub image: Vec<u8>,
    /// Set when the stream used any BER feature DER forbids (indefinite
    /// lengths, an over-long value clamped to fit its frame).
    pub non_der: bool,
    /// Nodes whose value came from their schema `DEFAULT`, not the wire.
    pub defaulted: Vec<NodeId>,
}

/// A one-shot BER/DER decoder: accepts a schema and a reader exactly once,
/// then produces one [`DecodeOutput`], consuming itself in the process.
pub struct Decoder<R> {
    module: Option<Tree>,
    reader: Option<R>,
    last_error: Option<Error>,
}

impl<R: Reader> Decoder<R> {
    pub fn new() -> Self {
        Decoder {
            module: None,
            reader: None,
            last_error: None,
        }
    }

    /// One-shot: fails with `Conflict` if a module is already set.
    pub fn set_module(&mut self, module: Tree) -> Result<()> {
        if self.module.is_some() {
            return Err(ErrorKind::Conflict.into());
        }
        self.module = Some(module);
        Ok(())
    }

    /// One-shot: fails with `Conflict` if a reader is already set.
    pub fn set_reader(&mut self, reader: R) -> Result<()> {
        if self.reader.is_some() {
            return Err(ErrorKind::Conflict.into());
        }
        self.reader = Some(reader);
        Ok(())
    }

    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Decode the full stream, annotating matched leaf nodes and building
    /// the image buffer. On success, the decoder is left empty (its module
    /// and reader were both consumed).
    #[cfg(feature = "alloc")]
    pub fn decode(&mut self) -> Result<DecodeOutput> {
        let result = self.decode_inner();
        if let Err(ref e) = result {
            self.last_error = Some(*e);
        }
        result
    }

    #[cfg(feature = "alloc")]
    fn decode_inner(&mut self) -> Result<DecodeOutput> {
        let mut tree = self.module.take().ok_or(ErrorKind::InvalidValue)?;
        let mut reader = self.reader.take().ok_or(ErrorKind::InvalidValue)?;

        let mut ds = DecodeState::new(&tree);
        let mut driver = Driver::new();
        let mut image: Vec<u8> = Vec::new();

        while let Some(ti) = read_tl(&mut reader)? {
            let offset = reader.tell() - ti.header.len() as u64;
            image.extend_from_slice(ti.header.as_slice());

            let matched = driver.step(&tree, &mut ds, &ti)?;

            let mut value = Vec::new();
            if !ti.is_constructed {
                value = read_value(&mut reader, ti.length)?;
                image.extend_from_slice(&value);
            }

            if let Some(node) = matched {
                tree.node_mut(node).annotation = Some(Annotation {
                    offset,
                    header_length: ti.header.len() as u32,
                    value_length: ti.length,
                });
                if !ti.is_constructed {
                    tree.node_mut(node).value =
                        asn1_schema::Value::Bytes(core::mem::take(&mut value));
                }
            }
        }

        Ok(DecodeOutput {
            tree,
            image,
            non_der: driver.non_der(),
            defaulted: driver.into_defaulted(),
        })
    }

    /// Trace every TLV to `out` as `depth  class:constructed:tag` plus, for
    /// primitive values, an OID (for `ObjectIdentifier`/`RelativeOid` nodes)
    /// or a truncated hex dump. Extra detail is printed when the
    /// `DEBUG_BER_DECODER` environment variable is set to a non-empty value.
    #[cfg(feature = "std")]
    pub fn dump(&mut self, out: &mut dyn std::io::Write) -> Result<()> {
        let result = self.dump_inner(out);
        if let Err(ref e) = result {
            self.last_error = Some(*e);
        }
        result
    }

    #[cfg(feature = "std")]
    fn dump_inner(&mut self, out: &mut dyn std::io::Write) -> Result<()> {
        let tree = self.module.take().ok_or(ErrorKind::InvalidValue)?;
        let mut reader = self.reader.take().ok_or(ErrorKind::InvalidValue)?;
        let verbose = std::env::var("DEBUG_BER_DECODER")
            .map(|v| !v.is_empty())
            .unwrap_or(false);

        let mut ds = DecodeState::new(&tree);
        let mut driver = Driver::new();

        while let Some(ti) = read_tl(&mut reader)? {
            let matched = driver.step(&tree, &mut ds, &ti)?;

            let _ = writeln!(
                out,
                "{:indent$}{:?}:{}:{}",
                "",
                ti.class,
                ti.is_constructed as u8,
                ti.tag,
                indent = driver.depth() * 2,
            );

            if !ti.is_constructed {
                let value = read_value(&mut reader, ti.length)?;
                let kind = matched.map(|n| tree.node(n).kind);
                if matches!(kind, Some(Kind::ObjectIdentifier) | Some(Kind::RelativeOid)) {
                    if let Ok(oid) = const_oid::ObjectIdentifier::from_bytes(&value) {
                        let _ = writeln!(out, "{:indent$}  {}", "", oid, indent = driver.depth() * 2);
                    }
                } else {
                    let shown = &value[..value.len().min(20)];
                    let mut hex = std::string::String::new();
                    for b in shown {
                        let _ = core::fmt::Write::write_fmt(&mut hex, format_args!("{:02x}", b));
                    }
                    if value.len() > 20 {
                        hex.push_str("..more..");
                    }
                    let _ = writeln!(out, "{:indent$}  {}", "", hex, indent = driver.depth() * 2);
                }
                let _ = verbose;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "alloc")]
fn read_value<R: Reader>(reader: &mut R, len: u64) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(len as usize);
    let mut remaining = len;
    while remaining > 0 {
        let mut chunk = [0u8; 4096];
        let want = chunk.len().min(remaining as usize);
        match reader.read(&mut chunk[..want])? {
            None => return Err(ErrorKind::PrematureEof.at(Some(reader.tell()))),
            Some(0) => continue,
            Some(n) => {
                out.extend_from_slice(&chunk[..n]);
                remaining -= n as u64;
            }
        }
    }
    Ok(out)
}

impl<R: Reader> Default for Decoder<R> {
    fn default() -> Self {
        Decoder::new()
    }
}
