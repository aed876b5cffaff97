//! This is a collection of useful utilities.

use std::fs::File;
use std::io::{Error, Write};

/// Writes \p content to the file \p filename, replacing the file if it
/// exists.
pub fn save_to_file(filename: &str, content: &str) -> Result<(), Error> {
    let mut f = File::create(filename)?;
    f.write_all(content.as_bytes())?;
    #[cfg(feature = "log")]
    log::info!("Wrote {} bytes to {}", content.len(), filename);
    Result::Ok(())
}

#[test]
fn test_save_to_file() {
    let path = std::env::temp_dir().join("dotgraph_save_to_file.gv");
    let path = path.to_string_lossy().to_string();
    save_to_file(&path, "graph {}\n").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "graph {}\n");
    let _ = std::fs::remove_file(&path);
}
