use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The ROM does not fit between the program start address and the end of memory.
    #[error("ROM is {size} bytes but only {max} bytes are available")]
    RomTooLarge { size: usize, max: usize },

    #[error("could not read ROM {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
