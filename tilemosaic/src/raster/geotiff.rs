//! GeoTIFF writer.
//!
//! Produces a classic (32-bit offset) TIFF with three band-separate 8-bit
//! planes and the GeoTIFF tags declaring an EPSG:4326 geographic raster.

use super::{RasterError, RasterWriter};
use crate::georef::AffineGeoTransform;
use crate::mosaic::RasterPlanes;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};
use tiff::encoder::TiffEncoder;
use tiff::tags::Tag;
use tracing::{debug, info, warn};

/// GeoTIFF tag IDs
const GEOTIFF_MODELPIXELSCALE: u16 = 33550;
const GEOTIFF_MODELTIEPOINT: u16 = 33922;
const GEOTIFF_GEOKEYDIRECTORY: u16 = 34735;
const GEOTIFF_GEOASCIIPARAMS: u16 = 34737;

/// EPSG code of the output coordinate system (WGS84 geographic).
pub const OUTPUT_EPSG: u16 = 4326;

/// Room reserved for the header and tag directory when checking size limits.
const HEADER_RESERVE: u64 = 1 << 20;

/// Suffix of the temporary file written before the final rename.
const PARTIAL_SUFFIX: &str = ".partial";

/// Writes RGB rasters as uncompressed, band-separate GeoTIFF files.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoTiffWriter;

impl GeoTiffWriter {
    pub fn new() -> Self {
        Self
    }

    /// Checks that a `width` x `height` RGB raster fits in 32-bit offsets.
    pub fn check_size(width: u32, height: u32) -> Result<(), RasterError> {
        let total = width as u64 * height as u64 * 3 + HEADER_RESERVE;
        if total > u32::MAX as u64 {
            return Err(RasterError::TooLarge { width, height });
        }
        Ok(())
    }

    /// Encodes the raster into any seekable writer.
    pub fn write_to<W: Write + Seek>(
        &self,
        planes: &RasterPlanes,
        transform: &AffineGeoTransform,
        writer: W,
    ) -> Result<(), RasterError> {
        validate(planes)?;

        let mut encoder = TiffEncoder::new(writer)?;
        let mut dir = encoder.image_directory()?;

        dir.write_tag(Tag::ImageWidth, planes.width)?;
        dir.write_tag(Tag::ImageLength, planes.height)?;
        dir.write_tag(Tag::BitsPerSample, [8u16, 8, 8].as_slice())?;
        dir.write_tag(Tag::Compression, 1u16)?;
        // 2 = RGB
        dir.write_tag(Tag::PhotometricInterpretation, 2u16)?;
        dir.write_tag(Tag::SamplesPerPixel, 3u16)?;
        // 1 = unsigned integer
        dir.write_tag(Tag::SampleFormat, [1u16, 1, 1].as_slice())?;
        // 2 = planar: one strip per band
        dir.write_tag(Tag::PlanarConfiguration, 2u16)?;
        dir.write_tag(Tag::RowsPerStrip, planes.height)?;

        // ModelPixelScale: [ScaleX, ScaleY, ScaleZ]
        let pixel_scale = [transform.pixel_width, transform.pixel_height.abs(), 0.0];
        dir.write_tag(
            Tag::Unknown(GEOTIFF_MODELPIXELSCALE),
            pixel_scale.as_slice(),
        )?;

        // ModelTiepoint: pixel (0, 0) sits at the north-west corner
        let tiepoint = [0.0, 0.0, 0.0, transform.origin_x, transform.origin_y, 0.0];
        dir.write_tag(Tag::Unknown(GEOTIFF_MODELTIEPOINT), tiepoint.as_slice())?;

        dir.write_tag(
            Tag::Unknown(GEOTIFF_GEOKEYDIRECTORY),
            geokey_directory().as_slice(),
        )?;
        dir.write_tag(Tag::Unknown(GEOTIFF_GEOASCIIPARAMS), "WGS 84|")?;

        let mut offsets = [0u32; 3];
        for (offset, band) in offsets.iter_mut().zip(planes.bands()) {
            let position = dir.write_data(band)?;
            *offset = u32::try_from(position).map_err(|_| RasterError::TooLarge {
                width: planes.width,
                height: planes.height,
            })?;
        }
        let band_bytes = planes.pixel_count() as u32;
        dir.write_tag(Tag::StripOffsets, offsets.as_slice())?;
        dir.write_tag(
            Tag::StripByteCounts,
            [band_bytes, band_bytes, band_bytes].as_slice(),
        )?;

        dir.finish()?;
        Ok(())
    }
}

impl RasterWriter for GeoTiffWriter {
    /// Writes to `<path>.partial` and renames it into place once complete.
    fn write(
        &self,
        planes: &RasterPlanes,
        transform: &AffineGeoTransform,
        path: &Path,
    ) -> Result<(), RasterError> {
        validate(planes)?;

        let partial = partial_path(path);
        debug!(path = %partial.display(), "Writing partial GeoTIFF");

        let result = write_file(self, planes, transform, &partial)
            .and_then(|()| fs::rename(&partial, path).map_err(RasterError::from));

        if let Err(e) = &result {
            if let Err(cleanup) = fs::remove_file(&partial) {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %partial.display(), error = %cleanup, "Failed to remove partial file");
                }
            }
            warn!(path = %path.display(), error = %e, "GeoTIFF write failed");
            return result;
        }

        info!(
            path = %path.display(),
            width = planes.width,
            height = planes.height,
            "GeoTIFF written"
        );
        Ok(())
    }
}

fn write_file(
    writer: &GeoTiffWriter,
    planes: &RasterPlanes,
    transform: &AffineGeoTransform,
    path: &Path,
) -> Result<(), RasterError> {
    let mut out = BufWriter::new(File::create(path)?);
    writer.write_to(planes, transform, &mut out)?;
    out.flush()?;
    Ok(())
}

fn validate(planes: &RasterPlanes) -> Result<(), RasterError> {
    if planes.width == 0 || planes.height == 0 {
        return Err(RasterError::InvalidData(format!(
            "raster has zero dimensions ({}x{})",
            planes.width, planes.height
        )));
    }
    GeoTiffWriter::check_size(planes.width, planes.height)?;
    if !planes.is_consistent() {
        return Err(RasterError::InvalidData(format!(
            "band lengths ({}, {}, {}) do not match {}x{}",
            planes.red.len(),
            planes.green.len(),
            planes.blue.len(),
            planes.width,
            planes.height
        )));
    }
    Ok(())
}

/// GeoKeyDirectory declaring a geographic WGS84 raster with area pixels.
fn geokey_directory() -> [u16; 16] {
    [
        1, 1, 0, 3, // version, revision, minor revision, key count
        1024, 0, 1, 2, // GTModelTypeGeoKey = ModelTypeGeographic
        1025, 0, 1, 1, // GTRasterTypeGeoKey = RasterPixelIsArea
        2048, 0, 1, OUTPUT_EPSG, // GeographicTypeGeoKey
    ]
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;
    use tiff::decoder::Decoder;

    fn planes(width: u32, height: u32) -> RasterPlanes {
        let n = (width * height) as usize;
        RasterPlanes {
            width,
            height,
            red: (0..n).map(|i| i as u8).collect(),
            green: vec![100; n],
            blue: (0..n).map(|i| 255 - i as u8).collect(),
        }
    }

    fn transform() -> AffineGeoTransform {
        AffineGeoTransform {
            origin_x: -0.3515625,
            pixel_width: 0.001373291015625,
            row_rotation: 0.0,
            origin_y: 51.61801655,
            column_rotation: 0.0,
            pixel_height: -0.000857,
        }
    }

    fn encode(planes: &RasterPlanes) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        GeoTiffWriter::new()
            .write_to(planes, &transform(), &mut cursor)
            .unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_header_tags() {
        let bytes = encode(&planes(4, 3));
        let mut decoder = Decoder::new(Cursor::new(bytes)).unwrap();

        assert_eq!(decoder.dimensions().unwrap(), (4, 3));
        assert_eq!(decoder.get_tag_u32(Tag::PlanarConfiguration).unwrap(), 2);
        assert_eq!(decoder.get_tag_u32(Tag::SamplesPerPixel).unwrap(), 3);

        let scale = decoder
            .get_tag_f64_vec(Tag::Unknown(GEOTIFF_MODELPIXELSCALE))
            .unwrap();
        assert_eq!(scale, vec![0.001373291015625, 0.000857, 0.0]);

        let tiepoint = decoder
            .get_tag_f64_vec(Tag::Unknown(GEOTIFF_MODELTIEPOINT))
            .unwrap();
        assert_eq!(tiepoint[3], -0.3515625);
        assert_eq!(tiepoint[4], 51.61801655);

        let keys = decoder
            .get_tag_u16_vec(Tag::Unknown(GEOTIFF_GEOKEYDIRECTORY))
            .unwrap();
        assert_eq!(&keys[12..16], &[2048, 0, 1, 4326]);
    }

    #[test]
    fn test_bands_stored_separately() {
        let source = planes(4, 3);
        let bytes = encode(&source);
        let mut decoder = Decoder::new(Cursor::new(bytes.clone())).unwrap();

        let offsets = decoder.get_tag_u32_vec(Tag::StripOffsets).unwrap();
        let counts = decoder.get_tag_u32_vec(Tag::StripByteCounts).unwrap();
        assert_eq!(offsets.len(), 3);
        assert_eq!(counts, vec![12, 12, 12]);

        for (band, (offset, count)) in source.bands().iter().zip(offsets.iter().zip(&counts)) {
            let start = *offset as usize;
            assert_eq!(&bytes[start..start + *count as usize], *band);
        }
    }

    #[test]
    fn test_write_renames_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mosaic.tif");

        GeoTiffWriter::new()
            .write(&planes(8, 8), &transform(), &path)
            .unwrap();

        assert!(path.exists());
        assert!(!partial_path(&path).exists());
        assert!(fs::metadata(&path).unwrap().len() > 3 * 64);
    }

    #[test]
    fn test_invalid_planes_leave_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mosaic.tif");
        let mut bad = planes(4, 4);
        bad.blue.pop();

        let err = GeoTiffWriter::new()
            .write(&bad, &transform(), &path)
            .unwrap_err();

        assert!(matches!(err, RasterError::InvalidData(_)));
        assert!(!path.exists());
        assert!(!partial_path(&path).exists());
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("mosaic.tif");

        let err = GeoTiffWriter::new()
            .write(&planes(2, 2), &transform(), &path)
            .unwrap_err();

        assert!(matches!(err, RasterError::Io(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_rename_removes_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mosaic.tif");
        // A non-empty directory in the way makes the final rename fail
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep.txt"), b"x").unwrap();

        let err = GeoTiffWriter::new()
            .write(&planes(2, 2), &transform(), &path)
            .unwrap_err();

        assert!(matches!(err, RasterError::Io(_)));
        assert!(!partial_path(&path).exists());
        assert!(path.join("keep.txt").exists());
    }

    #[test]
    fn test_check_size_limit() {
        assert!(GeoTiffWriter::check_size(30_000, 30_000).is_ok());
        assert!(matches!(
            GeoTiffWriter::check_size(1 << 20, 1 << 20),
            Err(RasterError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_empty_raster_rejected() {
        let empty = RasterPlanes {
            width: 0,
            height: 0,
            red: vec![],
            green: vec![],
            blue: vec![],
        };
        let mut cursor = Cursor::new(Vec::new());
        let err = GeoTiffWriter::new()
            .write_to(&empty, &transform(), &mut cursor)
            .unwrap_err();
        assert!(matches!(err, RasterError::InvalidData(_)));
    }

    #[test]
    fn test_oversized_raster_rejected() {
        // Validation only looks at the declared size
        let huge = RasterPlanes {
            width: 40_000,
            height: 40_000,
            red: vec![],
            green: vec![],
            blue: vec![],
        };
        assert!(matches!(
            validate(&huge),
            Err(RasterError::TooLarge {
                width: 40_000,
                height: 40_000
            })
        ));
    }

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("/tmp/out.tif")),
            PathBuf::from("/tmp/out.tif.partial")
        );
    }
}
