use std::{
    fs::{self, File},
    io::{self, BufWriter, Error, ErrorKind, Write},
    mem,
    path::Path,
};

use bytemuck::{Pod, Zeroable, bytes_of, pod_read_unaligned};
use crc32fast::Hasher;
use log::debug;
use memmap2::Mmap;
use tempfile::NamedTempFile;

use crate::table::GramTable;

/// Magic number: "VGTB" in little-endian.
pub const TABLE_MAGIC: u32 = 0x42544756;

pub const TABLE_VERSION: u32 = 1;

/// Fixed-size header preceding the packed gram table on disk.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TableHeader {
    /// Magic number (TABLE_MAGIC)
    pub magic: u32,
    /// Table file format version
    pub version: u32,
    /// Minimum gram length in characters
    pub min_q: u32,
    /// Maximum gram length in characters
    pub max_q: u32,
    /// Length of the packed payload in bytes
    pub payload_len: u32,
    /// CRC32 of the packed payload
    pub payload_crc32: u32,
}

#[inline]
fn invalid(msg: impl Into<String>) -> Error {
    Error::new(ErrorKind::InvalidData, msg.into())
}

/// Write header plus packed table to an open file positioned at start.
pub fn write_table_to(file: &File, table: &GramTable) -> io::Result<()> {
    let payload = table.as_packed();

    let mut hasher = Hasher::new();
    hasher.update(payload);

    let header = TableHeader {
        magic: TABLE_MAGIC,
        version: TABLE_VERSION,
        min_q: table.min_q() as u32,
        max_q: table.max_q() as u32,
        payload_len: payload.len() as u32,
        payload_crc32: hasher.finalize(),
    };

    let mut writer = BufWriter::new(file);
    writer.write_all(bytes_of(&header))?;
    writer.write_all(payload)?;
    writer.flush()?;
    Ok(())
}

/// Atomic table write: temp file in the target directory, then rename.
pub fn write_table_atomic(path: &Path, table: &GramTable) -> io::Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let tmp = NamedTempFile::new_in(parent)?;
    write_table_to(tmp.as_file(), table)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    #[cfg(unix)]
    {
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}

/// Load a table file, validating magic, version, length, and checksum.
pub fn load_table(path: &Path) -> io::Result<GramTable> {
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };
    let bytes: &[u8] = &mmap;

    let header_size = mem::size_of::<TableHeader>();
    if bytes.len() < header_size {
        return Err(invalid("table file shorter than its header"));
    }
    let header: TableHeader = pod_read_unaligned(&bytes[..header_size]);

    if header.magic != TABLE_MAGIC {
        return Err(invalid(format!(
            "bad magic {:#010x}, expected {TABLE_MAGIC:#010x}",
            header.magic
        )));
    }
    if header.version != TABLE_VERSION {
        return Err(invalid(format!(
            "unsupported table version {}",
            header.version
        )));
    }

    let payload_len = header.payload_len as usize;
    if bytes.len() != header_size + payload_len {
        return Err(invalid(format!(
            "payload length {} does not match file size {}",
            payload_len,
            bytes.len(),
        )));
    }
    let payload = &bytes[header_size..];

    let mut hasher = Hasher::new();
    hasher.update(payload);
    if hasher.finalize() != header.payload_crc32 {
        return Err(invalid("payload checksum mismatch"));
    }

    let table = GramTable::from_packed(payload, header.min_q as usize, header.max_q as usize)
        .map_err(|e| Error::new(ErrorKind::InvalidData, e))?;
    debug!("loaded {} grams from {}", table.len(), path.display());
    Ok(table)
}

#[cfg(test)]
#[path = "persist_tests.rs"]
mod tests;
