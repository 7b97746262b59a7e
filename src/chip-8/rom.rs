use std::fs;
use std::path::Path;

use log::info;

use crate::error::{Error, Result};
use crate::memory::MAX_ROM_SIZE;

/// Read a ROM image from disk, checking that it fits in program memory.
pub fn read_rom<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let rom = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if rom.len() > MAX_ROM_SIZE {
        return Err(Error::RomTooLarge {
            size: rom.len(),
            max: MAX_ROM_SIZE,
        });
    }
    info!("Read {} bytes from {}", rom.len(), path.display());

    Ok(rom)
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    use super::read_rom;
    use crate::{Error, MAX_ROM_SIZE};

    fn scratch_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = env::temp_dir().join(format!("chip8-vm-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();

        path
    }

    #[test]
    fn test_read_rom() {
        let path = scratch_file("small.ch8", &[0x12, 0x00]);

        let rom = read_rom(&path).unwrap();

        assert_eq!(rom, vec![0x12, 0x00]);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_read_rom_too_large() {
        let path = scratch_file("large.ch8", &vec![0; MAX_ROM_SIZE + 1]);

        let result = read_rom(&path);

        assert!(matches!(result, Err(Error::RomTooLarge { size, .. }) if size == MAX_ROM_SIZE + 1));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_read_rom_missing_file() {
        let path = env::temp_dir().join("chip8-vm-definitely-missing.ch8");

        let error = read_rom(&path).unwrap_err();

        assert!(matches!(error, Error::Io { .. }));
        assert!(error.to_string().contains("chip8-vm-definitely-missing.ch8"));
    }
}
