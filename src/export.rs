use crate::types::{School, SchoolType};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The categories to crawl and the file each one is written to.
pub const CATEGORY_FILES: [(SchoolType, &str); 3] = [
    (SchoolType::Afdeling, "afdelinger.txt"),
    (SchoolType::Hovedskole, "hovedskoler.txt"),
    (SchoolType::Institution, "institutioner.txt"),
];

/// Writes one record per paragraph, in discovery order. The file is
/// truncated and rewritten on every run.
pub fn write_schools(path: &Path, schools: &[School]) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    for school in schools {
        writeln!(file, "{school}")?;
        writeln!(file)?;
    }
    file.flush()
}
