//! Fixtures shared by the integration tests: a minimal GSD writer and
//! helpers writing complete HOOMD output triples into a temporary directory.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use physval::HoomdFiles;

const MAGIC: u64 = 0x65DF_65DF_65DF_65DF;

struct Chunk {
    frame: u64,
    name: String,
    type_code: u8,
    n: u64,
    m: u32,
    data: Vec<u8>,
}

/// Writes GSD files in layout `header | chunk data | index | namelist`.
pub struct GsdWriter {
    schema: String,
    major: u32,
    chunks: Vec<Chunk>,
}

impl GsdWriter {
    pub fn new() -> Self {
        Self {
            schema: "hoomd".to_string(),
            major: 2,
            chunks: Vec::new(),
        }
    }

    pub fn schema(mut self, schema: &str) -> Self {
        self.schema = schema.to_string();
        self
    }

    pub fn file_layer_v1(mut self) -> Self {
        self.major = 1;
        self
    }

    fn push(&mut self, frame: u64, name: &str, type_code: u8, n: usize, m: u32, data: Vec<u8>) {
        self.chunks.push(Chunk {
            frame,
            name: name.to_string(),
            type_code,
            n: n as u64,
            m,
            data,
        });
    }

    pub fn u32s(&mut self, frame: u64, name: &str, values: &[u32]) -> &mut Self {
        let data = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.push(frame, name, 3, values.len(), 1, data);
        self
    }

    pub fn u64s(&mut self, frame: u64, name: &str, values: &[u64]) -> &mut Self {
        let data = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.push(frame, name, 4, values.len(), 1, data);
        self
    }

    pub fn f32s(&mut self, frame: u64, name: &str, values: &[f32]) -> &mut Self {
        let data = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.push(frame, name, 9, values.len(), 1, data);
        self
    }

    pub fn vec3s(&mut self, frame: u64, name: &str, values: &[[f32; 3]]) -> &mut Self {
        let data = values.iter().flatten().flat_map(|v| v.to_le_bytes()).collect();
        self.push(frame, name, 9, values.len(), 3, data);
        self
    }

    /// A complete HOOMD frame: step, particle count, positions, velocities, masses.
    pub fn hoomd_frame(&mut self, frame: u64, natoms: usize, mass: f32) -> &mut Self {
        let x = frame as f32;
        self.u64s(frame, "configuration/step", &[frame * 1000])
            .u32s(frame, "particles/N", &[natoms as u32])
            .vec3s(frame, "particles/position", &vec![[x, 0.5, -0.5]; natoms])
            .vec3s(frame, "particles/velocity", &vec![[0.1, x, 0.0]; natoms])
            .f32s(frame, "particles/mass", &vec![mass; natoms])
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut names: Vec<&str> = Vec::new();
        for chunk in &self.chunks {
            if !names.contains(&chunk.name.as_str()) {
                names.push(&chunk.name);
            }
        }

        let mut body = Vec::new();
        let mut locations = Vec::with_capacity(self.chunks.len());
        for chunk in &self.chunks {
            locations.push(256 + body.len() as u64);
            body.extend_from_slice(&chunk.data);
        }

        let index_location = 256 + body.len() as u64;
        let mut index = Vec::new();
        for (chunk, location) in self.chunks.iter().zip(&locations) {
            let id = names.iter().position(|n| *n == chunk.name).unwrap() as u16;
            index.extend_from_slice(&chunk.frame.to_le_bytes());
            index.extend_from_slice(&chunk.n.to_le_bytes());
            index.extend_from_slice(&location.to_le_bytes());
            index.extend_from_slice(&chunk.m.to_le_bytes());
            index.extend_from_slice(&id.to_le_bytes());
            index.push(chunk.type_code);
            index.push(0);
        }

        let namelist_location = index_location + index.len() as u64;
        let (namelist, namelist_entries) = if self.major == 1 {
            let mut raw = vec![0u8; 64 * names.len()];
            for (i, name) in names.iter().enumerate() {
                raw[i * 64..i * 64 + name.len()].copy_from_slice(name.as_bytes());
            }
            (raw, names.len() as u64)
        } else {
            let mut raw = Vec::new();
            for name in &names {
                raw.extend_from_slice(name.as_bytes());
                raw.push(0);
            }
            raw.push(0);
            let len = raw.len() as u64;
            (raw, len)
        };

        let mut header = vec![0u8; 256];
        header[0..8].copy_from_slice(&MAGIC.to_le_bytes());
        header[8..16].copy_from_slice(&index_location.to_le_bytes());
        header[16..24].copy_from_slice(&(self.chunks.len() as u64).to_le_bytes());
        header[24..32].copy_from_slice(&namelist_location.to_le_bytes());
        header[32..40].copy_from_slice(&namelist_entries.to_le_bytes());
        header[40..44].copy_from_slice(&((1u32 << 16) | 4).to_le_bytes());
        header[44..48].copy_from_slice(&(self.major << 16).to_le_bytes());
        header[48..55].copy_from_slice(b"physval");
        header[112..112 + self.schema.len()].copy_from_slice(self.schema.as_bytes());

        let mut out = header;
        out.extend_from_slice(&body);
        out.extend_from_slice(&index);
        out.extend_from_slice(&namelist);
        out
    }

    pub fn write(&self, path: &Path) {
        fs::write(path, self.to_bytes()).unwrap();
    }
}

pub fn nve_metadata(dt: f64) -> String {
    format!(
        r#"{{
    "hoomd.md.integrate.mode_standard": [{{"dt": {dt}, "aniso": null}}],
    "hoomd.md.integrate.nve": [{{"limit": null, "zero_force": false}}],
    "hoomd.md.pair.lj": [{{"r_cut": 2.5, "nlist": {{}}}}]
}}"#
    )
}

/// Tab-separated log as written by `hoomd.analyze.log`, every value `value`.
pub fn uniform_log(columns: &[&str], rows: usize, value: f64) -> String {
    let mut text = format!("timestep\t{}\n", columns.join("\t"));
    for row in 0..rows {
        text.push_str(&(row * 10).to_string());
        for _ in columns {
            text.push_str(&format!("\t{value}"));
        }
        text.push('\n');
    }
    text
}

pub const BASE_COLUMNS: [&str; 5] = [
    "kinetic_energy",
    "potential_energy",
    "volume",
    "pressure",
    "temperature",
];

/// Writes the three files of one run into `dir` and returns their paths.
pub fn write_run(dir: &Path, metadata: &str, gsd: &GsdWriter, log: &str) -> HoomdFiles {
    let files = HoomdFiles::new(dir.join("run.json"), dir.join("run.gsd"), dir.join("run.log"));
    fs::write(&files.metadata, metadata).unwrap();
    gsd.write(&files.trajectory);
    fs::write(&files.log, log).unwrap();
    files
}
