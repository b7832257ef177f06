use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Reemplaza `path` de forma atómica, creando su directorio si falta.
///
/// El contenido va primero a un temporal con nombre único en el mismo
/// directorio; dos escritores a la vez nunca pisan el temporal del otro ni un
/// `*.tmp` ajeno que ya estuviera ahí.
pub fn atomic_write_str(path: &Path, contents: &str) -> io::Result<()> {
  let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
  fs::create_dir_all(dir)?;

  let mut tmp = NamedTempFile::new_in(dir)?;
  tmp.write_all(contents.as_bytes())?;
  tmp.as_file().sync_all()?;
  tmp.persist(path).map_err(|e| e.error)?;
  Ok(())
}
