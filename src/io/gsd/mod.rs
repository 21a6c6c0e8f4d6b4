//! GSD (General Simulation Data) container reader.
//!
//! A GSD file is a 256-byte header, an index of 32-byte chunk entries, a
//! namelist and the raw chunk data. Each chunk is an `N × M` array of one
//! primitive type, stored little-endian and identified by a frame number
//! and a name. File-layer versions 1.x and 2.x are supported; they differ
//! only in the namelist encoding.
//!
//! [`hoomd`] interprets the chunks according to the HOOMD schema.

pub mod hoomd;

use crate::io::{Format, error::Error};
use std::collections::HashMap;
use std::io::{Read, Seek, SeekFrom};

pub const GSD_MAGIC: u64 = 0x65DF_65DF_65DF_65DF;

const HEADER_SIZE: usize = 256;
const INDEX_ENTRY_SIZE: usize = 32;
const V1_NAME_SIZE: usize = 64;

/// Primitive element type of a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkType {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
}

impl ChunkType {
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            1 => ChunkType::U8,
            2 => ChunkType::U16,
            3 => ChunkType::U32,
            4 => ChunkType::U64,
            5 => ChunkType::I8,
            6 => ChunkType::I16,
            7 => ChunkType::I32,
            8 => ChunkType::I64,
            9 => ChunkType::F32,
            10 => ChunkType::F64,
            11 => ChunkType::Char,
            _ => return None,
        })
    }

    pub fn size(self) -> usize {
        match self {
            ChunkType::U8 | ChunkType::I8 | ChunkType::Char => 1,
            ChunkType::U16 | ChunkType::I16 => 2,
            ChunkType::U32 | ChunkType::I32 | ChunkType::F32 => 4,
            ChunkType::U64 | ChunkType::I64 | ChunkType::F64 => 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GsdHeader {
    pub index_location: u64,
    pub index_allocated_entries: u64,
    pub namelist_location: u64,
    pub namelist_allocated_entries: u64,
    pub schema_version: u32,
    pub gsd_version: u32,
    pub application: String,
    pub schema: String,
}

impl GsdHeader {
    pub fn major_version(&self) -> u32 {
        self.gsd_version >> 16
    }

    pub fn minor_version(&self) -> u32 {
        self.gsd_version & 0xFFFF
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub frame: u64,
    pub n: u64,
    pub location: u64,
    pub m: u32,
    pub id: u16,
    pub chunk_type: ChunkType,
}

impl IndexEntry {
    pub fn byte_len(&self) -> Option<u64> {
        self.n
            .checked_mul(u64::from(self.m))?
            .checked_mul(self.chunk_type.size() as u64)
    }
}

/// An open GSD file with its index loaded.
///
/// Chunk data is read lazily through [`GsdFile::read_f64`] and
/// [`GsdFile::read_u64`]. Every region is checked against the stream
/// length before a buffer is allocated for it.
pub struct GsdFile<R> {
    reader: R,
    file_len: u64,
    header: GsdHeader,
    names: Vec<String>,
    chunks: HashMap<(u64, u16), IndexEntry>,
    nframes: u64,
}

impl<R: Read + Seek> GsdFile<R> {
    pub fn new(mut reader: R) -> Result<Self, Error> {
        let file_len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;
        let mut raw = [0u8; HEADER_SIZE];
        read_exact_or_corrupt(&mut reader, &mut raw, "file is shorter than the GSD header")?;
        let header = decode_header(&raw)?;

        let major = header.major_version();
        if major != 1 && major != 2 {
            return Err(Error::corrupt(
                Format::Gsd,
                format!(
                    "unsupported file layer version {}.{}",
                    major,
                    header.minor_version()
                ),
            ));
        }

        let names = read_namelist(&mut reader, &header, file_len)?;
        let entries = read_index(&mut reader, &header, file_len)?;

        // every stored frame owns at least one chunk
        let nentries = entries.len() as u64;
        let mut chunks = HashMap::with_capacity(entries.len());
        let mut nframes = 0;
        for entry in entries {
            if usize::from(entry.id) >= names.len() {
                return Err(Error::corrupt(
                    Format::Gsd,
                    format!("index entry references unknown name id {}", entry.id),
                ));
            }
            if entry.frame >= nentries {
                return Err(Error::corrupt(
                    Format::Gsd,
                    format!(
                        "index entry for frame {} exceeds the {} stored chunks",
                        entry.frame, nentries
                    ),
                ));
            }
            check_range(entry.location, entry.byte_len(), file_len, "chunk data")?;
            nframes = nframes.max(entry.frame + 1);
            chunks.insert((entry.frame, entry.id), entry);
        }

        log::debug!(
            "opened GSD {}.{} file written by '{}' (schema '{}'): {} frames, {} chunk names",
            major,
            header.minor_version(),
            header.application,
            header.schema,
            nframes,
            names.len()
        );

        Ok(Self {
            reader,
            file_len,
            header,
            names,
            chunks,
            nframes,
        })
    }

    pub fn header(&self) -> &GsdHeader {
        &self.header
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn nframes(&self) -> u64 {
        self.nframes
    }

    /// Size of the underlying stream in bytes.
    pub fn file_len(&self) -> u64 {
        self.file_len
    }

    pub fn find_chunk(&self, frame: u64, name: &str) -> Option<IndexEntry> {
        let id = self.names.iter().position(|n| n == name)?;
        let id = u16::try_from(id).ok()?;
        self.chunks.get(&(frame, id)).copied()
    }

    fn read_raw(&mut self, entry: &IndexEntry) -> Result<Vec<u8>, Error> {
        let len = check_range(entry.location, entry.byte_len(), self.file_len, "chunk data")?;
        self.reader.seek(SeekFrom::Start(entry.location))?;
        let mut buf = vec![0u8; len];
        read_exact_or_corrupt(&mut self.reader, &mut buf, "chunk data extends past end of file")?;
        Ok(buf)
    }

    /// Reads a numeric chunk as `f64`, in row-major order.
    pub fn read_f64(&mut self, entry: &IndexEntry) -> Result<Vec<f64>, Error> {
        let raw = self.read_raw(entry)?;
        let size = entry.chunk_type.size();
        let values = raw.chunks_exact(size).map(|b| match entry.chunk_type {
            ChunkType::F32 => Some(f64::from(f32::from_le_bytes(arr(b)))),
            ChunkType::F64 => Some(f64::from_le_bytes(arr(b))),
            ChunkType::U8 => Some(f64::from(b[0])),
            ChunkType::I8 => Some(f64::from(b[0] as i8)),
            ChunkType::U16 => Some(f64::from(u16::from_le_bytes(arr(b)))),
            ChunkType::I16 => Some(f64::from(i16::from_le_bytes(arr(b)))),
            ChunkType::U32 => Some(f64::from(u32::from_le_bytes(arr(b)))),
            ChunkType::I32 => Some(f64::from(i32::from_le_bytes(arr(b)))),
            ChunkType::U64 => Some(u64::from_le_bytes(arr(b)) as f64),
            ChunkType::I64 => Some(i64::from_le_bytes(arr(b)) as f64),
            ChunkType::Char => None,
        });
        values
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| Error::corrupt(Format::Gsd, "expected a numeric chunk, found text"))
    }

    /// Reads an unsigned integer chunk as `u64`.
    pub fn read_u64(&mut self, entry: &IndexEntry) -> Result<Vec<u64>, Error> {
        let raw = self.read_raw(entry)?;
        let size = entry.chunk_type.size();
        let values = raw.chunks_exact(size).map(|b| match entry.chunk_type {
            ChunkType::U8 => Some(u64::from(b[0])),
            ChunkType::U16 => Some(u64::from(u16::from_le_bytes(arr(b)))),
            ChunkType::U32 => Some(u64::from(u32::from_le_bytes(arr(b)))),
            ChunkType::U64 => Some(u64::from_le_bytes(arr(b))),
            _ => None,
        });
        values.collect::<Option<Vec<_>>>().ok_or_else(|| {
            Error::corrupt(
                Format::Gsd,
                format!("expected an unsigned integer chunk, found {:?}", entry.chunk_type),
            )
        })
    }

}

fn arr<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[..N]);
    out
}

fn read_exact_or_corrupt<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    details: &'static str,
) -> Result<(), Error> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => Error::corrupt(Format::Gsd, details),
        _ => Error::Io { source: e },
    })
}

fn u64_at(raw: &[u8], offset: usize) -> u64 {
    u64::from_le_bytes(arr(&raw[offset..offset + 8]))
}

fn u32_at(raw: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(arr(&raw[offset..offset + 4]))
}

fn c_string(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

/// Byte length of `location..location + len` if it lies inside the stream.
fn check_range(
    location: u64,
    len: Option<u64>,
    file_len: u64,
    what: &str,
) -> Result<usize, Error> {
    let end = len.and_then(|len| location.checked_add(len));
    match (end, len) {
        (Some(end), Some(len)) if end <= file_len => usize::try_from(len)
            .map_err(|_| Error::corrupt(Format::Gsd, format!("{what} overflows addressable memory"))),
        _ => Err(Error::corrupt(
            Format::Gsd,
            format!("{what} at offset {location} extends past end of file ({file_len} bytes)"),
        )),
    }
}

fn decode_header(raw: &[u8; HEADER_SIZE]) -> Result<GsdHeader, Error> {
    let magic = u64_at(raw, 0);
    if magic != GSD_MAGIC {
        return Err(Error::corrupt(
            Format::Gsd,
            format!("bad magic number {magic:#018x}"),
        ));
    }

    Ok(GsdHeader {
        index_location: u64_at(raw, 8),
        index_allocated_entries: u64_at(raw, 16),
        namelist_location: u64_at(raw, 24),
        namelist_allocated_entries: u64_at(raw, 32),
        schema_version: u32_at(raw, 40),
        gsd_version: u32_at(raw, 44),
        application: c_string(&raw[48..112]),
        schema: c_string(&raw[112..176]),
    })
}

fn read_namelist<R: Read + Seek>(
    reader: &mut R,
    header: &GsdHeader,
    file_len: u64,
) -> Result<Vec<String>, Error> {
    let byte_len = if header.major_version() == 1 {
        header
            .namelist_allocated_entries
            .checked_mul(V1_NAME_SIZE as u64)
    } else {
        Some(header.namelist_allocated_entries)
    };
    let byte_len = check_range(header.namelist_location, byte_len, file_len, "namelist")?;

    reader.seek(SeekFrom::Start(header.namelist_location))?;
    let mut raw = vec![0u8; byte_len];
    read_exact_or_corrupt(reader, &mut raw, "namelist extends past end of file")?;

    if header.major_version() == 1 {
        Ok(decode_namelist_v1(&raw))
    } else {
        Ok(decode_namelist_v2(&raw))
    }
}

/// Fixed 64-byte NUL-padded entries; the first empty entry ends the list.
pub fn decode_namelist_v1(raw: &[u8]) -> Vec<String> {
    raw.chunks_exact(V1_NAME_SIZE)
        .map(c_string)
        .take_while(|name| !name.is_empty())
        .collect()
}

/// Consecutive NUL-terminated names; an empty name ends the list.
pub fn decode_namelist_v2(raw: &[u8]) -> Vec<String> {
    raw.split(|&b| b == 0)
        .take_while(|name| !name.is_empty())
        .map(|name| String::from_utf8_lossy(name).into_owned())
        .collect()
}

fn read_index<R: Read + Seek>(
    reader: &mut R,
    header: &GsdHeader,
    file_len: u64,
) -> Result<Vec<IndexEntry>, Error> {
    let byte_len = header
        .index_allocated_entries
        .checked_mul(INDEX_ENTRY_SIZE as u64);
    let byte_len = check_range(header.index_location, byte_len, file_len, "index")?;

    reader.seek(SeekFrom::Start(header.index_location))?;
    let mut raw = vec![0u8; byte_len];
    read_exact_or_corrupt(reader, &mut raw, "index extends past end of file")?;

    raw.chunks_exact(INDEX_ENTRY_SIZE)
        .filter_map(|entry| decode_index_entry(entry).transpose())
        .collect()
}

/// Decodes one index entry; unused slots (location 0) yield `None`.
fn decode_index_entry(raw: &[u8]) -> Result<Option<IndexEntry>, Error> {
    let location = u64_at(raw, 16) as i64;
    if location == 0 {
        return Ok(None);
    }
    if location < 0 {
        return Err(Error::corrupt(
            Format::Gsd,
            format!("negative chunk location {location}"),
        ));
    }

    let type_code = raw[30];
    let chunk_type = ChunkType::from_code(type_code).ok_or_else(|| {
        Error::corrupt(Format::Gsd, format!("unknown chunk type code {type_code}"))
    })?;

    Ok(Some(IndexEntry {
        frame: u64_at(raw, 0),
        n: u64_at(raw, 8),
        location: location as u64,
        m: u32_at(raw, 24),
        id: u16::from_le_bytes(arr(&raw[28..30])),
        chunk_type,
    }))
}
