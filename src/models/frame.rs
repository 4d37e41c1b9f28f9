/// Borrowed view of a luma (Y) plane
///
/// Rows are `row_stride` bytes apart; only the first `width` bytes of a row
/// are pixels. Chroma planes are never touched.
#[derive(Debug, Clone, Copy)]
pub struct LumaFrame<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    row_stride: usize,
}

impl<'a> LumaFrame<'a> {
    /// Wrap a luma plane. Returns None when the buffer is too short for the
    /// given geometry or the stride is narrower than the width.
    pub fn new(data: &'a [u8], width: usize, height: usize, row_stride: usize) -> Option<Self> {
        if row_stride < width {
            return None;
        }
        let needed = match height {
            0 => 0,
            h => (h - 1) * row_stride + width,
        };
        if data.len() < needed {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
            row_stride,
        })
    }

    /// Wrap a tightly packed plane (stride == width)
    pub fn packed(data: &'a [u8], width: usize, height: usize) -> Option<Self> {
        Self::new(data, width, height, width)
    }

    /// Pixels per row
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes between row starts
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Full pixel row
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.row_stride;
        self.data.get(start..start + self.width)
    }

    /// Scan window of a row: starts a quarter of the way in and spans half
    /// a stride, clipped to the buffer
    pub fn scanline(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.row_stride + self.width / 4;
        let end = (start + self.row_stride / 2).min(self.data.len());
        self.data.get(start..end)
    }
}
