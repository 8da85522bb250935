use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::info;
use roaring::RoaringTreemap;
use xz2::read::XzDecoder;
use xz2::write::XzEncoder;

use crate::engine::models::Coordinate;
use crate::engine::oracle::WorldMap;
use crate::error::MaskError;

pub const NX: u64 = 86400;
pub const NY: u64 = 43200;

/// Global land/sea raster at 1/240 degree. Set bits are land.
#[derive(Debug, Default, Clone)]
pub struct LandMask {
    pub mask: RoaringTreemap,
}

impl LandMask {
    /// An all-sea mask.
    pub fn new() -> Self {
        Self {
            mask: RoaringTreemap::new(),
        }
    }

    /// Loads an xz-compressed serialized treemap, e.g. a rasterised GSHHG
    /// coastline.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MaskError> {
        let path = path.as_ref();
        info!("Loading land mask from {:?}", path);

        let reader = BufReader::new(File::open(path)?);
        let mask = RoaringTreemap::deserialize_from(XzDecoder::new(reader))?;

        info!("Land mask loaded: {} land cells", mask.len());
        Ok(Self { mask })
    }

    /// Writes the mask in the format `load` reads.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), MaskError> {
        let writer = BufWriter::new(File::create(path.as_ref())?);
        let mut encoder = XzEncoder::new(writer, 6);
        self.mask.serialize_into(&mut encoder)?;
        encoder.finish()?;
        Ok(())
    }

    fn coords_to_indices(&self, lon: f64, lat: f64) -> (u64, u64) {
        // Affine transform: sa = 240, sc = 43200, se = 240, sf = 21600
        let x = (lon * 240.0 + 43200.0).max(0.0) as u64;
        let y = (lat * 240.0 + 21600.0).max(0.0) as u64;
        (x.min(NX - 1), y.min(NY - 1))
    }

    /// Marks a lon/lat box (inclusive) as land
    pub fn add_land_box(&mut self, min_lon: f64, max_lon: f64, min_lat: f64, max_lat: f64) {
        let (min_x, min_y) = self.coords_to_indices(min_lon, min_lat);
        let (max_x, max_y) = self.coords_to_indices(max_lon, max_lat);

        for y in min_y..=max_y {
            self.mask.insert_range(y * NX + min_x..=y * NX + max_x);
        }
    }

    /// Checks if a coordinate is over land
    pub fn is_land(&self, coord: &Coordinate) -> bool {
        let (x, y) = self.coords_to_indices(coord.lon, coord.lat);
        self.mask.contains(y * NX + x)
    }
}

impl WorldMap for LandMask {
    fn terrain(&self, lat: f64, lon: f64) -> f64 {
        if LandMask::is_land(self, &Coordinate::new(lat, lon)) { 0.0 } else { 1.0 }
    }
}
