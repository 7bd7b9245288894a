use crate::foundation::core::Viewport;
use crate::foundation::error::{InkError, InkResult};
use crate::foundation::math::PixelLayout;

/// Packed 32-bit pixel buffer sized once for the largest supported display.
///
/// Only the leading `width * height` pixels are live; rows are tightly packed with a stride of
/// the current viewport width, top to bottom.
pub struct RasterBuffer {
    pixels: Vec<u32>,
    capacity: Viewport,
    viewport: Viewport,
    layout: PixelLayout,
}

impl RasterBuffer {
    /// Allocate a buffer able to hold `capacity` pixels. The viewport starts at full capacity.
    pub fn new(capacity: Viewport) -> InkResult<Self> {
        if capacity.width == 0 || capacity.height == 0 {
            return Err(InkError::validation("raster capacity must be non-zero"));
        }
        Ok(Self {
            pixels: vec![0; capacity.pixel_count()],
            capacity,
            viewport: capacity,
            layout: PixelLayout::ARGB8888,
        })
    }

    /// Maximum supported dimensions.
    pub fn capacity(&self) -> Viewport {
        self.capacity
    }

    /// Current live dimensions.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Channel layout of the packed pixels.
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Change the live dimensions. Both must fit inside the capacity.
    pub fn set_viewport(&mut self, viewport: Viewport) -> InkResult<()> {
        if viewport.width > self.capacity.width || viewport.height > self.capacity.height {
            return Err(InkError::validation(format!(
                "viewport {}x{} exceeds raster capacity {}x{}",
                viewport.width, viewport.height, self.capacity.width, self.capacity.height
            )));
        }
        self.viewport = viewport;
        Ok(())
    }

    /// Live pixels, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels[..self.viewport.pixel_count()]
    }

    /// Pixel at `(x, y)`, `None` outside the viewport.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.viewport.width || y >= self.viewport.height {
            return None;
        }
        Some(self.pixels[self.index(x as usize, y as usize)])
    }

    /// Fill the live region with one packed color.
    pub fn clear(&mut self, px: u32) {
        let n = self.viewport.pixel_count();
        self.pixels[..n].fill(px);
    }

    /// Overwrite one pixel; callers clip to the viewport first.
    #[inline]
    pub(crate) fn put(&mut self, x: usize, y: usize, px: u32) {
        debug_assert!(x < self.viewport.width as usize && y < self.viewport.height as usize);
        let i = self.index(x, y);
        self.pixels[i] = px;
    }

    /// Unpack the live region into straight RGBA8 bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let layout = self.layout;
        self.pixels()
            .iter()
            .flat_map(|&px| layout.unpack_rgba8(px))
            .collect()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.viewport.width as usize + x
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
