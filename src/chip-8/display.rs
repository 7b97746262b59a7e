pub const FRAME_BUFFER_PIXEL_WIDTH: usize = 64;
pub const FRAME_BUFFER_PIXEL_HEIGHT: usize = 32;
const FRAME_BUFFER_SIZE: usize = FRAME_BUFFER_PIXEL_WIDTH * FRAME_BUFFER_PIXEL_HEIGHT;

const SPRITE_WIDTH: usize = 8;

/// The 64x32 monochrome screen, one byte per pixel holding 0 or 1, row-major.
pub struct Framebuffer {
    pixels: [u8; FRAME_BUFFER_SIZE],
    dirty: bool,
}

impl Framebuffer {
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[Self::index(x, y)]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        self.pixels[Self::index(x, y)] = on as u8;
        self.dirty = true;
    }

    /// Pixels as 0x00RRGGBB, white for lit pixels and black otherwise.
    pub fn rgba_framebuffer(&self) -> Vec<u32> {
        self.pixels
            .iter()
            .map(|&pixel| if pixel == 1 { 0x00_FF_FF_FF } else { 0x00_00_00_00 })
            .collect()
    }

    pub fn cls(&mut self) {
        self.pixels = [0; FRAME_BUFFER_SIZE];
        self.dirty = true;
    }

    /// XOR an 8 pixel wide sprite onto the screen with its top left corner
    /// at (`x`, `y`), one row per byte of `rows`. Coordinates wrap around
    /// both edges.
    ///
    /// Returns true if any lit sprite bit hit a pixel that was already lit.
    pub fn draw_sprite<I>(&mut self, x: u8, y: u8, rows: I) -> bool
    where
        I: IntoIterator<Item = u8>,
    {
        self.dirty = true;

        rows.into_iter()
            .enumerate()
            .fold(false, |did_collide, (y_offset, sprite)| {
                let y_norm = (y as usize + y_offset) % FRAME_BUFFER_PIXEL_HEIGHT;

                (0..SPRITE_WIDTH).fold(did_collide, |did_collide, x_bit| {
                    let x_norm = (x as usize + x_bit) % FRAME_BUFFER_PIXEL_WIDTH;
                    let sprite_pixel = (sprite >> (7 - x_bit)) & 0x1;

                    let buffer_index = Self::index(x_norm, y_norm);
                    let previous = self.pixels[buffer_index];
                    self.pixels[buffer_index] = previous ^ sprite_pixel;

                    did_collide || (sprite_pixel == 1 && previous == 1)
                })
            })
    }

    fn index(x: usize, y: usize) -> usize {
        y * FRAME_BUFFER_PIXEL_WIDTH + x
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self {
            pixels: [0; FRAME_BUFFER_SIZE],
            dirty: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Framebuffer, FRAME_BUFFER_PIXEL_HEIGHT, FRAME_BUFFER_PIXEL_WIDTH};

    fn lit(framebuffer: &Framebuffer) -> usize {
        framebuffer.pixels().iter().filter(|&&p| p == 1).count()
    }

    #[test]
    fn test_default_is_blank() {
        let framebuffer = Framebuffer::default();

        assert_eq!(framebuffer.pixels().len(), 2048);
        assert_eq!(lit(&framebuffer), 0);
    }

    #[test]
    fn test_cls() {
        let mut framebuffer = Framebuffer::default();
        for y in 0..FRAME_BUFFER_PIXEL_HEIGHT {
            for x in 0..FRAME_BUFFER_PIXEL_WIDTH {
                framebuffer.set_pixel(x, y, true);
            }
        }
        framebuffer.clear_dirty();

        framebuffer.cls();

        assert_eq!(lit(&framebuffer), 0);
        assert!(framebuffer.is_dirty());
    }

    #[test]
    fn test_draw_sprite_msb_is_leftmost() {
        let mut framebuffer = Framebuffer::default();

        let collided = framebuffer.draw_sprite(10, 3, vec![0b1000_0001]);

        assert!(!collided);
        assert_eq!(framebuffer.pixel(10, 3), 1);
        assert_eq!(framebuffer.pixel(17, 3), 1);
        assert_eq!(lit(&framebuffer), 2);
    }

    #[test]
    fn test_draw_sprite_wraps_both_edges() {
        let mut framebuffer = Framebuffer::default();

        framebuffer.draw_sprite(62, 31, vec![0xF0, 0xF0]);

        assert_eq!(framebuffer.pixel(62, 31), 1);
        assert_eq!(framebuffer.pixel(63, 31), 1);
        assert_eq!(framebuffer.pixel(0, 31), 1);
        assert_eq!(framebuffer.pixel(1, 31), 1);
        assert_eq!(framebuffer.pixel(62, 0), 1);
        assert_eq!(framebuffer.pixel(1, 0), 1);
        assert_eq!(lit(&framebuffer), 8);
    }

    #[test]
    fn test_draw_sprite_twice_erases_and_collides() {
        let mut framebuffer = Framebuffer::default();
        framebuffer.set_pixel(0, 0, true);

        assert!(!framebuffer.draw_sprite(20, 5, vec![0xAA, 0x55]));
        assert!(framebuffer.draw_sprite(20, 5, vec![0xAA, 0x55]));

        assert_eq!(lit(&framebuffer), 1);
        assert_eq!(framebuffer.pixel(0, 0), 1);
    }

    #[test]
    fn test_draw_sprite_zero_bits_never_collide() {
        let mut framebuffer = Framebuffer::default();
        framebuffer.set_pixel(1, 0, true);

        let collided = framebuffer.draw_sprite(0, 0, vec![0b1000_0000]);

        assert!(!collided);
        assert_eq!(framebuffer.pixel(1, 0), 1);
    }

    #[test]
    fn test_rgba_framebuffer() {
        let mut framebuffer = Framebuffer::default();
        framebuffer.set_pixel(1, 0, true);

        let rgba = framebuffer.rgba_framebuffer();

        assert_eq!(rgba[0], 0x00_00_00_00);
        assert_eq!(rgba[1], 0x00_FF_FF_FF);
    }
}
