//! Error types for wormgrid

use crate::CellAddress;
use std::path::PathBuf;
use thiserror::Error;

/// Why a portal pairing was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortalFault {
    #[error("endpoint {address} lies outside the {height}x{width} board")]
    OutOfBounds {
        address: CellAddress,
        height: usize,
        width: usize,
    },

    #[error("endpoint {0} is paired with itself")]
    SelfPair(CellAddress),

    #[error("{from} points to {to} but {to} does not point back")]
    Asymmetric { from: CellAddress, to: CellAddress },

    #[error("{address} is already paired with {existing}, cannot also pair with {requested}")]
    ConflictingPartner {
        address: CellAddress,
        existing: CellAddress,
        requested: CellAddress,
    },

    #[error("colour {color:?} occurs {count} times (must be even)")]
    OddColor { color: [u8; 3], count: usize },
}

/// wormgrid error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid portal: {0}")]
    InvalidPortal(#[from] PortalFault),

    #[error("invalid portal in {asset}: {fault}")]
    PortalAsset {
        asset: String,
        #[source]
        fault: PortalFault,
    },

    #[error("missing asset: {}", .0.display())]
    MissingAsset(PathBuf),

    #[error("cannot find example folder '{0}'")]
    MissingFolder(String),

    #[error("{asset} is {found:?} (height, width) but the board is {expected:?}")]
    AssetShape {
        asset: String,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "checkpoint")]
    #[error("checkpoint error: {0}")]
    Checkpoint(#[from] bincode::Error),
}

impl Error {
    /// The portal fault behind this error, whether or not it names its asset.
    pub fn portal_fault(&self) -> Option<&PortalFault> {
        match self {
            Error::InvalidPortal(fault) | Error::PortalAsset { fault, .. } => Some(fault),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
