//! HOOMD schema on top of the GSD container.
//!
//! A chunk absent from frame `i > 0` takes its value from frame 0, and a
//! chunk absent from frame 0 takes the schema default (no particles, zero
//! positions and velocities, unit masses, step 0).

use super::{GsdFile, IndexEntry};
use crate::io::{Format, Frame, error::Error};
use crate::model::trajectory::Vec3;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

pub const SCHEMA: &str = "hoomd";

const CHUNK_N: &str = "particles/N";
const CHUNK_POSITION: &str = "particles/position";
const CHUNK_VELOCITY: &str = "particles/velocity";
const CHUNK_MASS: &str = "particles/mass";
const CHUNK_STEP: &str = "configuration/step";

const DEFAULT_MASS: f64 = 1.0;

/// Reads every frame of a HOOMD GSD file. The file is closed on return.
pub fn read_trajectory<P: AsRef<Path>>(path: P) -> Result<Vec<Frame>, Error> {
    let file = File::open(path.as_ref())?;
    let frames = HoomdTrajectory::new(BufReader::new(file))?.read_all()?;
    if let (Some(first), Some(last)) = (frames.first(), frames.last()) {
        log::debug!(
            "read {} frames (steps {}..={}) from {}",
            frames.len(),
            first.step,
            last.step,
            path.as_ref().display()
        );
    }
    Ok(frames)
}

pub struct HoomdTrajectory<R> {
    gsd: GsdFile<R>,
}

impl<R: Read + Seek> HoomdTrajectory<R> {
    pub fn new(reader: R) -> Result<Self, Error> {
        let gsd = GsdFile::new(reader)?;
        if gsd.header().schema != SCHEMA {
            return Err(Error::corrupt(
                Format::Gsd,
                format!(
                    "expected schema '{SCHEMA}', found '{}'",
                    gsd.header().schema
                ),
            ));
        }
        Ok(Self { gsd })
    }

    pub fn read_all(mut self) -> Result<Vec<Frame>, Error> {
        let nframes = self.gsd.nframes();
        let mut frames = Vec::with_capacity(usize::try_from(nframes).unwrap_or(0));
        for idx in 0..nframes {
            frames.push(self.read_frame(idx)?);
        }
        Ok(frames)
    }

    pub fn read_frame(&mut self, frame: u64) -> Result<Frame, Error> {
        let step = match self.lookup(frame, CHUNK_STEP) {
            Some(entry) => first_value(self.gsd.read_u64(&entry)?, CHUNK_STEP)?,
            None => 0,
        };

        let natoms = match self.lookup(frame, CHUNK_N) {
            Some(entry) => first_value(self.gsd.read_u64(&entry)?, CHUNK_N)?,
            None => 0,
        };
        // a real file stores at least one byte per particle in frame 0
        if natoms > self.gsd.file_len() {
            return Err(Error::corrupt(
                Format::Gsd,
                format!(
                    "frame {frame} declares {natoms} particles, more than the file has bytes"
                ),
            ));
        }
        let natoms = usize::try_from(natoms)
            .map_err(|_| Error::corrupt(Format::Gsd, "particle count overflows"))?;

        let position = self.read_vectors(frame, CHUNK_POSITION, natoms)?;
        let velocity = self.read_vectors(frame, CHUNK_VELOCITY, natoms)?;
        let mass = match self.lookup(frame, CHUNK_MASS) {
            Some(entry) => {
                check_shape(&entry, CHUNK_MASS, frame, natoms, 1)?;
                self.gsd.read_f64(&entry)?
            }
            None => vec![DEFAULT_MASS; natoms],
        };

        Ok(Frame {
            step,
            position,
            velocity,
            mass,
        })
    }

    /// Chunk of `frame`, or of frame 0 when `frame` does not store it.
    fn lookup(&self, frame: u64, name: &str) -> Option<IndexEntry> {
        self.gsd
            .find_chunk(frame, name)
            .or_else(|| self.gsd.find_chunk(0, name))
    }

    fn read_vectors(&mut self, frame: u64, name: &str, natoms: usize) -> Result<Vec<Vec3>, Error> {
        match self.lookup(frame, name) {
            Some(entry) => {
                check_shape(&entry, name, frame, natoms, 3)?;
                let flat = self.gsd.read_f64(&entry)?;
                Ok(flat.chunks_exact(3).map(|v| [v[0], v[1], v[2]]).collect())
            }
            None => Ok(vec![[0.0; 3]; natoms]),
        }
    }
}

fn first_value(values: Vec<u64>, name: &str) -> Result<u64, Error> {
    values
        .first()
        .copied()
        .ok_or_else(|| Error::corrupt(Format::Gsd, format!("chunk '{name}' is empty")))
}

fn check_shape(
    entry: &IndexEntry,
    name: &str,
    frame: u64,
    natoms: usize,
    columns: u32,
) -> Result<(), Error> {
    if entry.n != natoms as u64 || entry.m != columns {
        return Err(Error::corrupt(
            Format::Gsd,
            format!(
                "chunk '{name}' in frame {frame} has shape {}x{}, expected {natoms}x{columns}",
                entry.n, entry.m
            ),
        ));
    }
    Ok(())
}
