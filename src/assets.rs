//! Raster assets: the starting board, the two tunnel bitmaps, milestone snapshots and
//! the animated summary.

use crate::{Board, CellAddress, Error, PairMap, PortalClass, Result};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, GrayImage, Luma, RgbImage};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const STARTING_POSITION: &str = "starting_position.png";
pub const HORIZONTAL_TUNNEL: &str = "horizontal_tunnel.png";
pub const VERTICAL_TUNNEL: &str = "vertical_tunnel.png";

/// Assets every example folder must contain.
pub const REQUIRED_ASSETS: [&str; 3] = [STARTING_POSITION, HORIZONTAL_TUNNEL, VERTICAL_TUNNEL];

pub const DEFAULT_GIF_NAME: &str = "all_output.gif";
pub const DEFAULT_FRAME_MS: u32 = 500;

/// How a starting-position pixel decides whether its cell is live.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LivePolicy {
    /// Live iff every channel is 255.
    ExactWhite,
    /// Live iff the integer mean of the three channels is at least this value.
    Threshold(u8),
}

impl Default for LivePolicy {
    fn default() -> Self {
        LivePolicy::ExactWhite
    }
}

impl LivePolicy {
    #[inline]
    pub fn is_live(self, [r, g, b]: [u8; 3]) -> bool {
        match self {
            LivePolicy::ExactWhite => r == 255 && g == 255 && b == 255,
            LivePolicy::Threshold(t) => (r as u16 + g as u16 + b as u16) / 3 >= t as u16,
        }
    }
}

/// `(height, width)` of an image.
#[inline]
fn shape(img: &RgbImage) -> (usize, usize) {
    (img.height() as usize, img.width() as usize)
}

fn open_rgb(path: &Path) -> Result<RgbImage> {
    if !path.is_file() {
        return Err(Error::MissingAsset(path.to_path_buf()));
    }
    Ok(image::open(path)?.into_rgb8())
}

pub fn decode_board(img: &RgbImage, policy: LivePolicy) -> Board {
    Board::from_shape_fn(shape(img), |(row, col)| {
        policy.is_live(img.get_pixel(col as u32, row as u32).0)
    })
}

/// Group every non-black pixel by colour and pair the groups up.
pub fn decode_portals(img: &RgbImage, class: PortalClass) -> Result<PairMap> {
    let groups = img
        .enumerate_pixels()
        .filter(|(_, _, px)| px.0 != [0, 0, 0])
        .map(|(x, y, px)| (px.0, CellAddress::new(y as usize, x as usize)))
        .into_group_map();
    PairMap::from_color_groups(class, groups.into_iter().sorted_by_key(|&(color, _)| color))
}

/// Live cells become 255, dead cells 0.
pub fn encode_board(board: &Board) -> GrayImage {
    let (height, width) = board.dim();
    GrayImage::from_fn(width as u32, height as u32, |x, y| {
        Luma([if board[(y as usize, x as usize)] { 255 } else { 0 }])
    })
}

pub fn save_snapshot(board: &Board, path: &Path) -> Result<()> {
    encode_board(board).save(path)?;
    info!("wrote {}", path.display());
    Ok(())
}

/// The file a milestone snapshot is written to.
#[inline]
pub fn snapshot_path(dir: &Path, generation: u64) -> PathBuf {
    dir.join(format!("{}.png", generation))
}

/// Everything decoded from one example folder.
#[derive(Clone, Debug)]
pub struct ExampleAssets {
    pub board: Board,
    pub horizontal: PairMap,
    pub vertical: PairMap,
}

impl ExampleAssets {
    pub fn load(dir: &Path, policy: LivePolicy) -> Result<Self> {
        let start = open_rgb(&dir.join(STARTING_POSITION))?;
        let board = decode_board(&start, policy);
        let horizontal = load_tunnel(dir, HORIZONTAL_TUNNEL, board.dim(), PortalClass::Horizontal)?;
        let vertical = load_tunnel(dir, VERTICAL_TUNNEL, board.dim(), PortalClass::Vertical)?;
        debug!(
            dir = %dir.display(),
            live = board.iter().filter(|&&c| c).count(),
            horizontal = horizontal.len(),
            vertical = vertical.len(),
            "loaded example"
        );
        Ok(Self {
            board,
            horizontal,
            vertical,
        })
    }
}

fn load_tunnel(
    dir: &Path,
    name: &str,
    expected: (usize, usize),
    class: PortalClass,
) -> Result<PairMap> {
    let img = open_rgb(&dir.join(name))?;
    if shape(&img) != expected {
        return Err(Error::AssetShape {
            asset: name.to_string(),
            expected,
            found: shape(&img),
        });
    }
    decode_portals(&img, class).map_err(|e| match e {
        Error::InvalidPortal(fault) => Error::PortalAsset {
            asset: name.to_string(),
            fault,
        },
        other => other,
    })
}

/// Name and `(height, width)` of each required asset.
pub fn inspect(dir: &Path) -> Result<Vec<(&'static str, (usize, usize))>> {
    REQUIRED_ASSETS
        .iter()
        .map(|&name| Ok((name, shape(&open_rgb(&dir.join(name))?))))
        .collect()
}

/// Assemble milestone snapshots into a looping animated GIF.
pub fn write_gif(frames: &[PathBuf], out: &Path, frame_ms: u32) -> Result<()> {
    if let Some(missing) = frames.iter().find(|p| !p.is_file()) {
        return Err(Error::MissingAsset(missing.clone()));
    }
    let mut encoder = GifEncoder::new(BufWriter::new(File::create(out)?));
    encoder.set_repeat(Repeat::Infinite)?;
    for path in frames {
        let rgba = image::open(path)?.into_rgba8();
        encoder.encode_frame(Frame::from_parts(
            rgba,
            0,
            0,
            Delay::from_numer_denom_ms(frame_ms, 1),
        ))?;
    }
    info!("wrote {} ({} frames)", out.display(), frames.len());
    Ok(())
}
