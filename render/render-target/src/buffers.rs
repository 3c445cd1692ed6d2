use render_trait::{BufferSize, PixelBuffer, SOFT_PIXEL_CHANNELS};

/// An RGBA framebuffer kept in memory
pub struct DrawBuffer {
    size: BufferSize,
    /// Total length is width * height * CHANNELS, where CHANNELS is RGBA bytes
    buffer: Vec<u8>,
    stride: usize,
}

impl DrawBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            size: BufferSize::new(width, height),
            buffer: vec![0; (width * height) * SOFT_PIXEL_CHANNELS],
            stride: width * SOFT_PIXEL_CHANNELS,
        }
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }
}

impl PixelBuffer for DrawBuffer {
    #[inline(always)]
    fn size(&self) -> &BufferSize {
        &self.size
    }

    fn clear_with_colour(&mut self, colour: &[u8; SOFT_PIXEL_CHANNELS]) {
        self.buffer
            .chunks_mut(SOFT_PIXEL_CHANNELS)
            .for_each(|n| n.copy_from_slice(colour));
    }

    #[inline(always)]
    fn set_pixel(&mut self, x: usize, y: usize, colour: &[u8; SOFT_PIXEL_CHANNELS]) {
        let pos = y * self.stride + x * SOFT_PIXEL_CHANNELS;
        self.buffer[pos..pos + SOFT_PIXEL_CHANNELS].copy_from_slice(colour);
    }

    #[inline]
    fn read_pixel(&self, x: usize, y: usize) -> [u8; SOFT_PIXEL_CHANNELS] {
        let pos = y * self.stride + x * SOFT_PIXEL_CHANNELS;
        let mut px = [0u8; SOFT_PIXEL_CHANNELS];
        px.copy_from_slice(&self.buffer[pos..pos + SOFT_PIXEL_CHANNELS]);
        px
    }
}

/// An 8 bit palette indexed framebuffer
pub struct IndexedBuffer {
    size: BufferSize,
    buffer: Vec<u8>,
}

impl IndexedBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            size: BufferSize::new(width, height),
            buffer: vec![0; width * height],
        }
    }

    pub fn size(&self) -> &BufferSize {
        &self.size
    }

    pub fn clear_with(&mut self, index: u8) {
        self.buffer.fill(index);
    }

    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, index: u8) {
        self.buffer[y * self.size.width_usize() + x] = index;
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.buffer[y * self.size.width_usize() + x]
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }
}
