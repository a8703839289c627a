//! MNIST corpus reader.
//!
//! Reads the IDX files of the MNIST handwritten digit corpus:
//!
//! - label file: `u32` magic 2049, `u32` count, one byte per label
//! - image file: `u32` magic 2051, `u32` count, `u32` rows, `u32` columns, then
//!   `rows * columns` bytes per image
//!
//! All header integers are big-endian. Labels are loaded eagerly; images are read lazily,
//! one at a time, through the [`MnistImages`] iterator, which is forward-only and cannot be
//! restarted.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::{Dataset, Error, Result};

pub const LABEL_MAGIC: u32 = 2049;
pub const IMAGE_MAGIC: u32 = 2051;
/// Number of digit classes.
pub const CLASSES: usize = 10;

/// All labels of a label file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MnistLabels {
    labels: Vec<u8>,
}

impl MnistLabels {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        expect_magic(&mut reader, LABEL_MAGIC, "label")?;
        let count = read_u32_be(&mut reader)? as usize;
        let mut labels = vec![0_u8; count];
        reader.read_exact(&mut labels)?;
        Ok(Self { labels })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[inline]
    pub fn label(&self, idx: usize) -> Option<u8> {
        self.labels.get(idx).copied()
    }
}

/// One labelled image. Pixels are row-major, one byte each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MnistImage {
    pub label: u8,
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl MnistImage {
    /// Pixel intensities mapped linearly from `0..=255` to `[0, 1]`.
    pub fn to_input(&self) -> Vec<f64> {
        self.pixels.iter().map(|&p| f64::from(p) / 255.0).collect()
    }

    /// Expected output vector: 1.0 at the label's index, 0.0 elsewhere.
    pub fn one_hot(&self, classes: usize) -> Result<Vec<f64>> {
        let label = usize::from(self.label);
        if label >= classes {
            return Err(Error::InvalidData(format!(
                "label {label} does not fit {classes} classes"
            )));
        }
        let mut expected = vec![0.0; classes];
        expected[label] = 1.0;
        Ok(expected)
    }
}

/// Lazy sequence of labelled images.
#[derive(Debug)]
pub struct MnistImages<R = BufReader<File>> {
    reader: R,
    labels: MnistLabels,
    count: usize,
    width: usize,
    height: usize,
    next: usize,
}

impl MnistImages<BufReader<File>> {
    /// Open an image file together with its label file.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(images: P, labels: Q) -> Result<Self> {
        let labels = MnistLabels::open(labels)?;
        Self::from_reader(BufReader::new(File::open(images)?), labels)
    }
}

impl<R: Read> MnistImages<R> {
    /// Reads the image header. Pixel data is only read while iterating.
    pub fn from_reader(mut reader: R, labels: MnistLabels) -> Result<Self> {
        expect_magic(&mut reader, IMAGE_MAGIC, "image")?;
        let count = read_u32_be(&mut reader)? as usize;
        let height = read_u32_be(&mut reader)? as usize;
        let width = read_u32_be(&mut reader)? as usize;

        if labels.len() < count {
            return Err(Error::InvalidData(format!(
                "image file has {count} images but label file only {} labels",
                labels.len()
            )));
        }

        Ok(Self {
            reader,
            labels,
            count,
            width,
            height,
            next: 0,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Images announced by the header.
    #[inline]
    pub fn image_count(&self) -> usize {
        self.count
    }

    /// Images not yet read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.count - self.next
    }

    /// Draws up to `n` further images into a dataset with one-hot expected vectors.
    pub fn take_dataset(&mut self, n: usize) -> Result<Dataset> {
        let take = n.min(self.remaining());
        if take == 0 {
            return Err(Error::InvalidData("no images left to draw".to_owned()));
        }

        let pixels = self.width * self.height;
        let mut inputs = Vec::with_capacity(take * pixels);
        let mut expected = Vec::with_capacity(take * CLASSES);
        for image in self.by_ref().take(take) {
            let image = image?;
            inputs.extend(image.to_input());
            expected.extend(image.one_hot(CLASSES)?);
        }

        Dataset::from_flat(inputs, expected, pixels, CLASSES)
    }
}

impl<R: Read> Iterator for MnistImages<R> {
    type Item = Result<MnistImage>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }

        let idx = self.next;
        let mut pixels = vec![0_u8; self.width * self.height];
        if let Err(err) = self.reader.read_exact(&mut pixels) {
            // The stream position is unknown after a failed read.
            self.next = self.count;
            return Some(Err(err.into()));
        }
        self.next += 1;

        // Checked against `count` at construction.
        let label = self.labels.label(idx)?;
        Some(Ok(MnistImage {
            label,
            width: self.width,
            height: self.height,
            pixels,
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}

fn read_u32_be<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0_u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

fn expect_magic<R: Read>(reader: &mut R, magic: u32, kind: &str) -> Result<()> {
    let found = read_u32_be(reader)?;
    if found != magic {
        return Err(Error::InvalidData(format!(
            "bad {kind} file magic {found}, expected {magic}"
        )));
    }
    Ok(())
}
