use thiserror::Error;

/// Errors raised when building a buffer view from raw parts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("invalid buffer length (expected {expected} bytes, got {got})")]
    InvalidLength { expected: usize, got: usize },
    #[error("invalid image dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },
}

/// Borrowed single-channel image, row-major, `len = w*h`.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8],
}

/// Owned single-channel image, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl<'a> GrayImageView<'a> {
    pub fn from_slice(width: usize, height: usize, data: &'a [u8]) -> Result<Self, BufferError> {
        let expected = width
            .checked_mul(height)
            .ok_or(BufferError::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(BufferError::InvalidLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

impl GrayImage {
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> Result<Self, BufferError> {
        GrayImageView::from_slice(width, height, &data)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn as_view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

/// Borrowed interleaved RGB image, row-major, `len = w*h*3`.
#[derive(Clone, Copy, Debug)]
pub struct RgbImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8],
}

/// Owned interleaved RGB image, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl<'a> RgbImageView<'a> {
    pub fn from_slice(width: usize, height: usize, data: &'a [u8]) -> Result<Self, BufferError> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(3))
            .ok_or(BufferError::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(BufferError::InvalidLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

impl RgbImage {
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> Result<Self, BufferError> {
        RgbImageView::from_slice(width, height, &data)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn as_view(&self) -> RgbImageView<'_> {
        RgbImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}
