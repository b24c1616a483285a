use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Writes `contents` to a sibling temp file and renames it over `path`.
///
/// Two service processes may share one config file; the temp name carries
/// the pid so their writes never interleave inside the same temp file.
pub(crate) fn atomic_write_str(path: &Path, contents: &str) -> io::Result<()> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent)?;
  }

  let tmp_path = tmp_sibling(path);
  let written = fs::File::create(&tmp_path).and_then(|mut file| {
    file.write_all(contents.as_bytes())?;
    file.sync_all()
  });

  if let Err(e) = written {
    let _ = fs::remove_file(&tmp_path);
    return Err(e);
  }

  fs::rename(&tmp_path, path)
}

fn tmp_sibling(path: &Path) -> PathBuf {
  let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
  name.push(format!(".{}.tmp", std::process::id()));
  path.with_file_name(name)
}
