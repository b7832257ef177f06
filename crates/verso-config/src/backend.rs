use crate::io::atomic_write_str;
use crate::paths::{ConfigError, VersoPaths};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;

/// toml_edit para escribir sin perder comentarios del usuario
use toml_edit::{DocumentMut, Item};

pub trait ConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;

  /// Lee la sección o su `Default` si el archivo o la sección no existen.
  fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default;

  /// Como [`load_section_with_default`](Self::load_section_with_default), y
  /// además escribe la sección efectiva de vuelta para que el archivo muestre
  /// todas las claves. Si no se puede escribir (disco de sólo lectura, HOME
  /// ajeno) se avisa y se sigue con los valores leídos.
  fn load_section_seeded<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Serialize + Default,
  {
    let value = self.load_section_with_default(section)?;
    if let Err(e) = self.save_section(section, &value) {
      tracing::warn!(section, error = %e, "config section not written back");
    }
    Ok(value)
  }
}

pub struct TomlConfigBackend {
  paths: VersoPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: VersoPaths) -> Self {
    Self { paths }
  }

  pub fn paths(&self) -> &VersoPaths {
    &self.paths
  }

  fn read_table(&self) -> Result<Option<toml::Table>, ConfigError> {
    let path = self.paths.config_file();
    let content = match fs::read_to_string(&path) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(e.into()),
    };

    Ok(Some(toml::from_str(&content)?))
  }
}

fn decode_section<T: DeserializeOwned>(section: &str, value: toml::Value) -> Result<T, ConfigError> {
  value.try_into().map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let path = self.paths.config_file();
    let mut table = self
      .read_table()?
      .ok_or_else(|| ConfigError::Other(format!("config file {path:?} does not exist")))?;

    let value = table
      .remove(section)
      .ok_or_else(|| ConfigError::Other(format!("missing section [{section}] in {path:?}")))?;

    decode_section(section, value)
  }

  fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    let Some(mut table) = self.read_table()? else {
      return Ok(T::default());
    };

    match table.remove(section) {
      Some(value) => decode_section(section, value),
      None => Ok(T::default()),
    }
  }

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    let path = self.paths.config_file();

    // 1) Leer el doc actual, o empezar uno vacío.
    let mut doc: DocumentMut = match fs::read_to_string(&path) {
      Ok(content) => content
        .parse::<DocumentMut>()
        .map_err(|e| ConfigError::Other(format!("parse toml_edit doc: {e}")))?,
      Err(e) if e.kind() == ErrorKind::NotFound => DocumentMut::new(),
      Err(e) => return Err(e.into()),
    };

    // 2) Serializar la sección con `toml` y reparsearla como tabla de toml_edit.
    let section_str = toml::to_string(value)
      .map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;

    let section_item: Item = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section as doc: {e}")))?
      .into_item();

    // 3) Reemplazar sólo esa sección; el resto del archivo queda intacto.
    doc[section] = section_item;

    atomic_write_str(&path, &doc.to_string())?;

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde::Deserialize;
  use tempfile::tempdir;

  #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
  struct Sample {
    port: u16,
    name: Option<String>,
  }

  fn backend() -> (tempfile::TempDir, TomlConfigBackend) {
    let tmp = tempdir().unwrap();
    let paths = VersoPaths::at(tmp.path());
    fs::create_dir_all(&paths.config_dir).unwrap();
    (tmp, TomlConfigBackend::new(paths))
  }

  /// Reads like the TOML backend, refuses every write.
  struct ReadOnly(TomlConfigBackend);

  impl ConfigBackend for ReadOnly {
    fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
      self.0.load_section(section)
    }

    fn save_section<T: Serialize>(&self, _section: &str, _value: &T) -> Result<(), ConfigError> {
      Err(std::io::Error::from(ErrorKind::PermissionDenied).into())
    }

    fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
    where
      T: DeserializeOwned + Default,
    {
      self.0.load_section_with_default(section)
    }
  }

  #[test]
  fn missing_file_yields_default() {
    let (_tmp, backend) = backend();

    let sample: Sample = backend.load_section_with_default("sample").unwrap();
    assert_eq!(sample, Sample::default());
    assert!(backend.load_section::<Sample>("sample").is_err());
  }

  #[test]
  fn save_then_load_section() {
    let (_tmp, backend) = backend();
    let sample = Sample { port: 4000, name: Some("verso".into()) };

    backend.save_section("sample", &sample).unwrap();

    assert_eq!(backend.load_section::<Sample>("sample").unwrap(), sample);
  }

  #[test]
  fn save_keeps_other_sections_and_comments() {
    let (_tmp, backend) = backend();
    let path = backend.paths().config_file();
    fs::write(&path, "# top comment\n[other]\nkeep = true\n").unwrap();

    backend.save_section("sample", &Sample { port: 1, name: None }).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("# top comment"));
    assert!(written.contains("keep = true"));
    assert!(written.contains("[sample]"));
  }

  #[test]
  fn seeded_load_writes_defaults_back() {
    let tmp = tempdir().unwrap();
    let backend = TomlConfigBackend::new(VersoPaths::at(tmp.path()));

    let sample: Sample = backend.load_section_seeded("sample").unwrap();

    assert_eq!(sample, Sample::default());
    assert!(fs::read_to_string(backend.paths().config_file()).unwrap().contains("[sample]"));
  }

  #[test]
  fn seeded_load_survives_unwritable_config() {
    let (_tmp, inner) = backend();
    fs::write(inner.paths().config_file(), "[sample]\nport = 7\n").unwrap();
    let backend = ReadOnly(inner);

    let sample: Sample = backend.load_section_seeded("sample").unwrap();
    assert_eq!(sample.port, 7);

    let missing: Sample = backend.load_section_seeded("absent").unwrap();
    assert_eq!(missing, Sample::default());
  }

  #[cfg(unix)]
  #[test]
  fn seeded_load_from_read_only_directory() {
    use std::os::unix::fs::PermissionsExt;

    let (_tmp, backend) = backend();
    let dir = backend.paths().config_dir.clone();
    fs::write(backend.paths().config_file(), "[sample]\nport = 9\n").unwrap();
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o555)).unwrap();

    let loaded = backend.load_section_seeded::<Sample>("sample");

    fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();
    assert_eq!(loaded.unwrap().port, 9);
  }

  #[test]
  fn bad_section_type_is_reported() {
    let (_tmp, backend) = backend();
    fs::write(backend.paths().config_file(), "[sample]\nport = \"four\"\n").unwrap();

    let err = backend.load_section_with_default::<Sample>("sample").unwrap_err();
    assert!(err.to_string().contains("[sample]"));
  }
}
