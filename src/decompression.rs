use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Chain, Cursor, Read};
use std::path::Path;

type ChainReader<R> = Chain<Cursor<Vec<u8>>, R>;

/// Compression formats recognised by their magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Gzip (1F 8B 08)
    Gzip,
    /// Zstandard (28 B5 2F FD)
    Zstd,
    None,
}

impl Compression {
    pub fn detect(head: &[u8]) -> Self {
        if head.len() >= 3 && head[..3] == [0x1F, 0x8B, 0x08] {
            Compression::Gzip
        } else if head.len() >= 4 && head[..4] == [0x28, 0xB5, 0x2F, 0xFD] {
            Compression::Zstd
        } else {
            Compression::None
        }
    }
}

/// Read up to four bytes without losing them: the returned reader replays the
/// peeked prefix before the rest of `reader`.
fn peek_head<R: Read>(mut reader: R) -> io::Result<(Compression, ChainReader<R>)> {
    let mut head = [0u8; 4];
    let mut n = 0;
    // Short reads are legal, keep going until EOF or four bytes
    while n < head.len() {
        let read = reader.read(&mut head[n..])?;
        if read == 0 {
            break;
        }
        n += read;
    }

    let compression = Compression::detect(&head[..n]);
    let prefix = Cursor::new(head[..n].to_vec());
    Ok((compression, prefix.chain(reader)))
}

/// Wrap any reader so gzip and zstd streams are transparently decompressed
pub fn maybe_decompress<R: Read + Send + 'static>(reader: R) -> io::Result<Box<dyn Read + Send>> {
    let (compression, chained) = peek_head(reader)?;
    Ok(match compression {
        Compression::Gzip => Box::new(MultiGzDecoder::new(chained)),
        Compression::Zstd => Box::new(zstd::Decoder::new(chained)?),
        Compression::None => Box::new(chained),
    })
}

/// Open a log file, detecting compression by magic bytes
pub fn open_decompressed<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead + Send>> {
    let file = File::open(path)?;
    Ok(Box::new(BufReader::new(maybe_decompress(file)?)))
}
