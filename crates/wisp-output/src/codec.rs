//! Binary encode/decode for the container format.
//!
//! All integers are little-endian. Names are length-prefixed with a
//! `u32`. The format is intentionally simple: no compression, no
//! alignment padding, no self-describing schema. Layout:
//!
//! ```text
//! magic "WISP" | u16 version | group
//! group := u32 n_attrs  { name, tag u8, value }*
//!          u32 n_datasets { name, u32 len, f64* }*
//!          u32 n_children { name, group }*
//! ```

use std::io::{Read, Write};

use crate::error::ContainerError;
use crate::group::{Attr, Group};
use crate::{FORMAT_VERSION, MAGIC};

const TAG_U64: u8 = 0;
const TAG_F64: u8 = 1;
const TAG_STR: u8 = 2;

// ── Primitive writers ───────────────────────────────────────────

fn write_u16_le(w: &mut dyn Write, v: u16) -> Result<(), ContainerError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), ContainerError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), ContainerError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

fn write_f64_le(w: &mut dyn Write, v: f64) -> Result<(), ContainerError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

fn write_name(w: &mut dyn Write, s: &str) -> Result<(), ContainerError> {
    write_u32_le(w, s.len() as u32)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

fn read_u16_le(r: &mut dyn Read) -> Result<u16, ContainerError> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

fn read_u32_le(r: &mut dyn Read) -> Result<u32, ContainerError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_u64_le(r: &mut dyn Read) -> Result<u64, ContainerError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn read_f64_le(r: &mut dyn Read) -> Result<f64, ContainerError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(f64::from_le_bytes(buf))
}

fn read_u8(r: &mut dyn Read) -> Result<u8, ContainerError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

fn read_name(r: &mut dyn Read) -> Result<String, ContainerError> {
    let len = read_u32_le(r)? as usize;
    // The length prefix is untrusted; grow the buffer as bytes arrive
    // instead of allocating it up front.
    let mut buf = Vec::new();
    r.take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(ContainerError::Malformed {
            reason: format!("name truncated at {} of {len} bytes", buf.len()),
        });
    }
    String::from_utf8(buf).map_err(|e| ContainerError::Malformed {
        reason: format!("name is not utf-8: {e}"),
    })
}

// ── Group encoding ──────────────────────────────────────────────

fn encode_group(w: &mut dyn Write, group: &Group) -> Result<(), ContainerError> {
    write_u32_le(w, group.attrs().count() as u32)?;
    for (name, attr) in group.attrs() {
        write_name(w, name)?;
        match attr {
            Attr::U64(v) => {
                w.write_all(&[TAG_U64])?;
                write_u64_le(w, *v)?;
            }
            Attr::F64(v) => {
                w.write_all(&[TAG_F64])?;
                write_f64_le(w, *v)?;
            }
            Attr::Str(v) => {
                w.write_all(&[TAG_STR])?;
                write_name(w, v)?;
            }
        }
    }

    write_u32_le(w, group.datasets().count() as u32)?;
    for (name, data) in group.datasets() {
        write_name(w, name)?;
        write_u32_le(w, data.len() as u32)?;
        for v in data {
            write_f64_le(w, *v)?;
        }
    }

    write_u32_le(w, group.group_count() as u32)?;
    for (name, child) in group.groups() {
        write_name(w, name)?;
        encode_group(w, child)?;
    }
    Ok(())
}

fn decode_group(r: &mut dyn Read) -> Result<Group, ContainerError> {
    let mut group = Group::new();

    let n_attrs = read_u32_le(r)?;
    for _ in 0..n_attrs {
        let name = read_name(r)?;
        let tag = read_u8(r)?;
        let attr = match tag {
            TAG_U64 => Attr::U64(read_u64_le(r)?),
            TAG_F64 => Attr::F64(read_f64_le(r)?),
            TAG_STR => Attr::Str(read_name(r)?),
            other => {
                return Err(ContainerError::Malformed {
                    reason: format!("unknown attribute tag {other}"),
                })
            }
        };
        group.set_attr(name, attr);
    }

    let n_datasets = read_u32_le(r)?;
    for _ in 0..n_datasets {
        let name = read_name(r)?;
        let len = read_u32_le(r)? as usize;
        // The length prefix is untrusted; cap the upfront allocation
        // and let a short read surface as an error instead.
        let mut data = Vec::with_capacity(len.min(1024));
        for _ in 0..len {
            data.push(read_f64_le(r)?);
        }
        group.set_dataset(name, data);
    }

    let n_children = read_u32_le(r)?;
    for _ in 0..n_children {
        let name = read_name(r)?;
        let child = decode_group(r)?;
        *group.require_group(name) = child;
    }

    Ok(group)
}

// ── Container entry points ──────────────────────────────────────

/// Write a container (magic, version, root group) to `w`.
pub fn write_container(w: &mut dyn Write, root: &Group) -> Result<(), ContainerError> {
    w.write_all(MAGIC)?;
    write_u16_le(w, FORMAT_VERSION)?;
    encode_group(w, root)
}

/// Read a container back from `r`.
pub fn read_container(r: &mut dyn Read) -> Result<Group, ContainerError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(ContainerError::BadMagic { found: magic });
    }
    let version = read_u16_le(r)?;
    if version != FORMAT_VERSION {
        return Err(ContainerError::UnsupportedVersion { found: version });
    }
    decode_group(r)
}
