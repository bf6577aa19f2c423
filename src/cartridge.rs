//! iNES (.nes) cartridge image parser.
//!
//! Reference: <https://www.nesdev.org/wiki/INES>

use std::fs;
use std::path::Path;

use log::{info, warn};
use thiserror::Error;

const INES_MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];
const HEADER_SIZE: usize = 16;
const TRAINER_SIZE: usize = 512;

pub const PRG_PAGE_SIZE: usize = 16 * 1024;
pub const CHR_PAGE_SIZE: usize = 8 * 1024;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file is not in iNES format")]
    BadMagic,
    #[error("file is truncated: missing {0}")]
    Truncated(&'static str),
    #[error("mapper {0} is not supported")]
    UnsupportedMapper(u8),
    #[error("unsupported PRG/CHR layout: {prg} KiB PRG, {chr} KiB CHR")]
    BadLayout { prg: usize, chr: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

/// The decoded 16-byte header.
#[derive(Debug, Clone, Copy)]
pub struct Header {
    pub prg_pages: u8,
    pub chr_pages: u8,
    pub mapper: u8,
    pub mirroring: Mirroring,
    pub battery: bool,
    pub trainer: bool,
    pub play_choice: bool,
    pub nes2: bool,
}

impl Header {
    fn parse(raw: &[u8]) -> Result<Header, LoadError> {
        if raw.len() < HEADER_SIZE {
            return Err(LoadError::Truncated("header"));
        }
        if raw[0..4] != INES_MAGIC {
            return Err(LoadError::BadMagic);
        }

        let flags6 = raw[6];
        let flags7 = raw[7];

        let four_screen = flags6 & 0b1000 != 0;
        let vertical = flags6 & 0b0001 != 0;
        let mirroring = match (four_screen, vertical) {
            (true, _) => Mirroring::FourScreen,
            (false, true) => Mirroring::Vertical,
            (false, false) => Mirroring::Horizontal,
        };

        Ok(Header {
            prg_pages: raw[4],
            chr_pages: raw[5],
            mapper: (flags7 & 0b1111_0000) | (flags6 >> 4),
            mirroring,
            battery: flags6 & 0b0010 != 0,
            trainer: flags6 & 0b0100 != 0,
            play_choice: flags7 & 0b0010 != 0,
            nes2: (flags7 >> 2) & 0b11 == 0b10,
        })
    }
}

/// A parsed cartridge: the header fields that outlive loading plus the
/// PRG and CHR bodies, ready to hand to a mapper.
pub struct Cartridge {
    pub prg: Vec<u8>,
    pub chr: Vec<u8>,
    pub mapper: u8,
    pub mirroring: Mirroring,
    pub battery: bool,
}

impl Cartridge {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Cartridge, LoadError> {
        info!("reading rom from {}", path.as_ref().display());
        let raw = fs::read(path)?;
        Cartridge::new(&raw)
    }

    pub fn new(raw: &[u8]) -> Result<Cartridge, LoadError> {
        let header = Header::parse(raw)?;

        if header.nes2 {
            warn!("NES 2.0 header detected, reading as iNES 1");
        }
        if header.trainer {
            warn!("trainers are not supported, skipping trainer");
        }
        if header.play_choice {
            warn!("PlayChoice-10 data is not supported, ignoring it");
        }

        let prg_size = header.prg_pages as usize * PRG_PAGE_SIZE;
        let chr_size = header.chr_pages as usize * CHR_PAGE_SIZE;

        let prg_start = HEADER_SIZE + if header.trainer { TRAINER_SIZE } else { 0 };
        let chr_start = prg_start + prg_size;

        if raw.len() < chr_start {
            return Err(LoadError::Truncated("PRG ROM"));
        }
        if raw.len() < chr_start + chr_size {
            return Err(LoadError::Truncated("CHR ROM"));
        }

        info!("rom mapper num = {}", header.mapper);
        info!("rom num of PRG pages = {}", header.prg_pages);
        info!("rom num of CHR pages = {}", header.chr_pages);
        info!("rom mirroring is {:?}", header.mirroring);

        Ok(Cartridge {
            prg: raw[prg_start..chr_start].to_vec(),
            chr: raw[chr_start..chr_start + chr_size].to_vec(),
            mapper: header.mapper,
            mirroring: header.mirroring,
            battery: header.battery,
        })
    }
}

pub mod test {
    use super::*;

    /// Builds a minimal image: header, then PRG filled with `prg_fill`,
    /// then an 8 KiB CHR body.
    pub fn build_image(prg_pages: u8, flags6: u8, flags7: u8, prg_fill: u8) -> Vec<u8> {
        let mut raw = vec![
            0x4E, 0x45, 0x53, 0x1A, prg_pages, 0x01, flags6, flags7,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        raw.extend(std::iter::repeat(prg_fill).take(prg_pages as usize * PRG_PAGE_SIZE));
        raw.extend(std::iter::repeat(0u8).take(CHR_PAGE_SIZE));
        raw
    }

    #[test]
    fn test_rejects_bad_magic() {
        let mut raw = build_image(1, 0, 0, 0);
        raw[0] = 0x00;

        assert!(matches!(Cartridge::new(&raw), Err(LoadError::BadMagic)));
    }

    #[test]
    fn test_rejects_truncated_prg() {
        let mut raw = build_image(2, 0, 0, 0);
        raw.truncate(HEADER_SIZE + PRG_PAGE_SIZE);

        assert!(matches!(Cartridge::new(&raw), Err(LoadError::Truncated(_))));
    }

    #[test]
    fn test_mapper_number_from_both_nibbles() {
        // Low nibble in flags6 bits 4-7, high nibble in flags7 bits 4-7.
        let raw = build_image(1, 0x10, 0x20, 0);
        let cartridge = Cartridge::new(&raw).unwrap();

        assert_eq!(cartridge.mapper, 0x21);
    }

    #[test]
    fn test_mirroring_and_battery_flags() {
        let raw = build_image(1, 0b0000_0011, 0, 0);
        let cartridge = Cartridge::new(&raw).unwrap();

        assert_eq!(cartridge.mirroring, Mirroring::Vertical);
        assert!(cartridge.battery);

        let raw = build_image(1, 0b0000_1000, 0, 0);
        let cartridge = Cartridge::new(&raw).unwrap();
        assert_eq!(cartridge.mirroring, Mirroring::FourScreen);
    }

    #[test]
    fn test_trainer_is_skipped() {
        let mut raw = vec![
            0x4E, 0x45, 0x53, 0x1A, 0x01, 0x01, 0b0000_0100, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        raw.extend(std::iter::repeat(0xEE).take(TRAINER_SIZE));
        raw.extend(std::iter::repeat(0x42).take(PRG_PAGE_SIZE));
        raw.extend(std::iter::repeat(0u8).take(CHR_PAGE_SIZE));

        let cartridge = Cartridge::new(&raw).unwrap();
        assert_eq!(cartridge.prg[0], 0x42);
        assert_eq!(cartridge.prg.len(), PRG_PAGE_SIZE);
    }

    #[test]
    fn test_sizes_follow_header_counts() {
        let raw = build_image(2, 0, 0, 0x11);
        let cartridge = Cartridge::new(&raw).unwrap();

        assert_eq!(cartridge.prg.len(), 2 * PRG_PAGE_SIZE);
        assert_eq!(cartridge.chr.len(), CHR_PAGE_SIZE);
    }
}
